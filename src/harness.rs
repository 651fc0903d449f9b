//! End-to-end workflow orchestration.
//!
//! Samples records from a dataset, drives perturbation, stub responses,
//! and metric evaluation per record, and collects one [`SampleResult`]
//! per sampled record — no duplicates, no gaps.
//!
//! # RNG draw order
//!
//! All randomness flows through one explicit generator, in a fixed order
//! that is part of the reproducibility contract:
//!
//! 1. record selection (without replacement),
//! 2. per sample, in selection order: perturbation draws, the
//!    original-response suffix draw, the adversarial-response suffix
//!    draw, the `mauve_like` draw.
//!
//! Processing is single-threaded and samples are independent; anyone
//! parallelizing this must first draw per-sample sub-seeds sequentially
//! to keep outputs deterministic.

use crate::dataset::Record;
use crate::lexicon::{Lexicon, StaticLexicon};
use crate::metrics::{self, MetricSet};
use crate::perturb::Perturber;
use crate::respond::{self, ModelId, ResponsePair};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a workflow run.
///
/// Serializable so a run can be driven from a JSON file; unknown model
/// names deserialize through [`ModelId`]'s closed set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of records to sample. Clamped to the dataset size, never an
    /// error (deliberate leniency, logged as a warning).
    pub sample_count: usize,
    /// Per-token replacement probability in [0, 1].
    pub replacement_probability: f64,
    /// Stub model used for both responses of every sample.
    pub model_id: ModelId,
    /// RNG seed; `None` seeds from entropy (runs are then not
    /// reproducible).
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sample_count: 5,
            replacement_probability: 0.3,
            model_id: ModelId::Gpt3,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Set the sample count.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the replacement probability.
    pub fn with_replacement_probability(mut self, probability: f64) -> Self {
        self.replacement_probability = probability;
        self
    }

    /// Set the stub model.
    pub fn with_model_id(mut self, model_id: ModelId) -> Self {
        self.model_id = model_id;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Check the config for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.replacement_probability) {
            return Err(Error::config(format!(
                "replacement probability must be in [0, 1], got {}",
                self.replacement_probability
            )));
        }
        Ok(())
    }
}

/// One fully processed sample.
#[derive(Debug, Clone, Serialize)]
pub struct SampleResult {
    /// Identifier of the sampled record.
    pub sample_id: String,
    /// The record's `clean_text`, unchanged.
    pub original_text: String,
    /// The perturbed text.
    pub adversarial_text: String,
    /// Stub response to the original text.
    pub original_response: String,
    /// Stub response to the adversarial text.
    pub adversarial_response: String,
    /// Comparison scores for the response pair.
    pub metrics: MetricSet,
}

/// Workflow orchestrator tying the pipeline stages together.
pub struct Harness<'a> {
    config: RunConfig,
    lexicon: &'a dyn Lexicon,
}

impl Harness<'static> {
    /// Create a harness over the built-in lexicon.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            lexicon: StaticLexicon::builtin(),
        }
    }
}

impl<'a> Harness<'a> {
    /// Create a harness over a caller-provided lexicon.
    pub fn with_lexicon(config: RunConfig, lexicon: &'a dyn Lexicon) -> Self {
        Self { config, lexicon }
    }

    /// The harness configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the workflow, seeding the RNG from the config.
    pub fn run(&self, records: &[Record]) -> Result<Vec<SampleResult>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(records, &mut rng)
    }

    /// Run the workflow with an externally owned RNG.
    ///
    /// Fails fast on the first per-sample error, naming the record; no
    /// partial results are returned.
    pub fn run_with_rng<R: Rng>(
        &self,
        records: &[Record],
        rng: &mut R,
    ) -> Result<Vec<SampleResult>> {
        self.config.validate()?;
        let mut sample_count = self.config.sample_count;
        if sample_count > records.len() {
            log::warn!(
                "sample count {} exceeds dataset size {}; clamping",
                sample_count,
                records.len()
            );
            sample_count = records.len();
        }
        let selected = rand::seq::index::sample(rng, records.len(), sample_count);
        let perturber = Perturber::new(self.config.replacement_probability);

        let mut results = Vec::with_capacity(sample_count);
        for index in selected.iter() {
            let record = &records[index];
            log::debug!("processing record '{}'", record.id);
            results.push(self.process(record, &perturber, rng)?);
        }
        log::info!(
            "processed {} of {} records with model {}",
            results.len(),
            records.len(),
            self.config.model_id
        );
        Ok(results)
    }

    fn process<R: Rng>(
        &self,
        record: &Record,
        perturber: &Perturber,
        rng: &mut R,
    ) -> Result<SampleResult> {
        let original_text = record.clean_text()?;
        let perturbation = perturber.perturb_pair(original_text, self.lexicon, rng);
        let responses = ResponsePair {
            original_response: respond::respond(
                self.config.model_id,
                &perturbation.original_text,
                rng,
            ),
            adversarial_response: respond::respond(
                self.config.model_id,
                &perturbation.adversarial_text,
                rng,
            ),
        };
        let metrics = metrics::evaluate(
            &responses.original_response,
            &responses.adversarial_response,
            rng,
        );
        Ok(SampleResult {
            sample_id: record.id.clone(),
            original_text: perturbation.original_text,
            adversarial_text: perturbation.adversarial_text,
            original_response: responses.original_response,
            adversarial_response: responses.adversarial_response,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::new(format!("{}", i))
                    .with_field("clean_text", format!("The quick cat number {} sat", i))
            })
            .collect()
    }

    #[test]
    fn oversized_sample_count_clamps_to_dataset_size() {
        let records = records(3);
        let config = RunConfig::default().with_sample_count(10).with_seed(1);
        let results = Harness::new(config).run(&records).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn sampled_records_are_distinct() {
        let records = records(10);
        let config = RunConfig::default().with_sample_count(10).with_seed(2);
        let results = Harness::new(config).run(&records).unwrap();
        let ids: BTreeSet<&str> = results.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(ids.len(), 10, "every sampled record appears exactly once");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let records = records(8);
        let config = RunConfig::default().with_sample_count(4).with_seed(42);
        let a = Harness::new(config.clone()).run(&records).unwrap();
        let b = Harness::new(config).run(&records).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.sample_id, y.sample_id);
            assert_eq!(x.adversarial_text, y.adversarial_text);
            assert_eq!(x.original_response, y.original_response);
            assert_eq!(x.metrics, y.metrics);
        }
    }

    #[test]
    fn empty_dataset_yields_empty_results() {
        let config = RunConfig::default().with_seed(3);
        let results = Harness::new(config).run(&[]).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn missing_clean_text_fails_naming_the_record() {
        let records = vec![Record::new("broken").with_field("sentiment", "pos")];
        let config = RunConfig::default().with_sample_count(1).with_seed(4);
        let err = Harness::new(config).run(&records).unwrap_err();
        assert!(err.to_string().contains("broken"), "got: {}", err);
        assert!(err.to_string().contains("clean_text"), "got: {}", err);
    }

    #[test]
    fn out_of_range_probability_is_a_config_error() {
        let config = RunConfig::default().with_replacement_probability(1.5);
        let err = Harness::new(config).run(&records(1)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn custom_lexicon_is_used() {
        use crate::lexicon::StaticLexicon;
        let lexicon = StaticLexicon::empty().with_sense("cat", &["feline", "mouser"]);
        let records = vec![Record::new("1").with_field("clean_text", "cat cat cat")];
        let config = RunConfig::default()
            .with_sample_count(1)
            .with_replacement_probability(1.0)
            .with_seed(5);
        let results = Harness::with_lexicon(config, &lexicon).run(&records).unwrap();
        for word in results[0].adversarial_text.split(' ') {
            assert!(["feline", "mouser"].contains(&word), "unexpected: {}", word);
        }
    }

    #[test]
    fn config_json_round_trip() {
        let config = RunConfig::default().with_sample_count(7).with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sample_count, 7);
        assert_eq!(back.seed, Some(9));
    }
}

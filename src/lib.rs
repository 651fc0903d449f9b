//! # advex
//!
//! Adversarial robustness evaluation for language models.
//!
//! The pipeline takes text records, perturbs each one by probabilistic
//! synonym substitution, collects a simulated model response for the
//! original and perturbed texts, and scores the response pair with
//! placeholder metrics:
//!
//! ```text
//! dataset -> sampled records -> (original, adversarial) text
//!         -> (original, adversarial) response -> metrics -> report
//! ```
//!
//! Two things are simulation by design, and stay that way:
//!
//! - **Responses** come from fixed templates in [`mod@respond`], not from
//!   a model. A real inference client slots in behind the same signature.
//! - **Metrics** are coarse stand-ins: word overlap, a length ratio, and
//!   one frankly random number. They demonstrate the workflow, not model
//!   quality.
//!
//! What *is* exact: reproducibility. Every random decision flows through
//! one explicit seedable generator, so a seeded run replays bit-for-bit.
//!
//! ## Quick start
//!
//! ```rust
//! use advex::{Harness, Record, RunConfig};
//!
//! let records = vec![
//!     Record::new("1").with_field("clean_text", "The cat sat on the mat"),
//!     Record::new("2").with_field("clean_text", "A quick brown fox jumps"),
//! ];
//! let config = RunConfig::default().with_sample_count(2).with_seed(42);
//! let results = Harness::new(config).run(&records)?;
//! assert_eq!(results.len(), 2);
//! # Ok::<(), advex::Error>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`dataset`] | delimited-file loading, `Record` |
//! | [`lexicon`] | synonym lookup (`Lexicon`, `StaticLexicon`) |
//! | [`perturb`] | tokenizer and synonym-substitution engine |
//! | [`mod@respond`] | templated response stub |
//! | [`mod@metrics`] | placeholder response-pair scoring |
//! | [`harness`] | sampling and orchestration |
//! | [`report`] | summary, CSV/JSON export, SVG charts |

#![warn(missing_docs)]

pub mod dataset;
mod error;
pub mod harness;
pub mod lexicon;
pub mod metrics;
pub mod perturb;
pub mod report;
pub mod respond;

pub use dataset::{load_records, parse_records, Record};
pub use error::{Error, Result};
pub use harness::{Harness, RunConfig, SampleResult};
pub use lexicon::{Lexicon, StaticLexicon};
pub use metrics::{evaluate, MetricSet};
pub use perturb::{tokenize, tokenize_join, PerturbationResult, Perturber, Token};
pub use respond::{respond, ModelId, ResponsePair, SUFFIX_PROBABILITY};

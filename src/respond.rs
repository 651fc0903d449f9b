//! Simulated model responses.
//!
//! This module stands in for a real inference client. Responses are fixed
//! templates keyed by [`ModelId`] plus a probabilistic suffix; swapping in
//! a real client only needs to honor the same `(model, text) -> String`
//! shape, nothing else in the pipeline changes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Probability of appending the follow-up suffix to any response.
pub const SUFFIX_PROBABILITY: f64 = 0.3;

const SUFFIX: &str = " Additionally, I can provide more context if needed.";
const UNKNOWN_RESPONSE: &str = "Unknown model";

/// Supported stub model identifiers.
///
/// A closed set rather than an open string lookup: anything that does not
/// parse as a known identifier lands on [`ModelId::Unrecognized`] and
/// produces the fixed sentinel response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelId {
    /// GPT-3 style template.
    Gpt3,
    /// PaLM style template.
    Palm,
    /// Custom-model template.
    Custom,
    /// Any identifier outside the supported set.
    Unrecognized,
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::Gpt3
    }
}

impl FromStr for ModelId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "gpt-3" | "gpt3" => ModelId::Gpt3,
            "palm" => ModelId::Palm,
            "custom" => ModelId::Custom,
            _ => ModelId::Unrecognized,
        })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelId::Gpt3 => "GPT-3",
            ModelId::Palm => "PaLM",
            ModelId::Custom => "Custom",
            ModelId::Unrecognized => "unrecognized",
        };
        write!(f, "{}", name)
    }
}

/// Responses to an original text and its perturbed counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsePair {
    /// Response to the original text.
    pub original_response: String,
    /// Response to the adversarial text.
    pub adversarial_response: String,
}

/// Produce the stub response for `text` under `model`.
///
/// Exactly one uniform draw is made per call, including for
/// [`ModelId::Unrecognized`], so the RNG stream consumed does not depend
/// on the model id.
pub fn respond<R: Rng>(model: ModelId, text: &str, rng: &mut R) -> String {
    let mut response = match model {
        ModelId::Gpt3 => {
            let lead: Vec<&str> = text.split_whitespace().take(3).collect();
            format!(
                "As a language model, I understand your text about {}...",
                lead.join(" ")
            )
        }
        ModelId::Palm => format!(
            "Based on my training, I can respond to '{}...'",
            prefix_chars(text, 30)
        ),
        ModelId::Custom => format!("Processing the input: '{}...'", prefix_chars(text, 20)),
        ModelId::Unrecognized => UNKNOWN_RESPONSE.to_string(),
    };
    if rng.gen::<f64>() < SUFFIX_PROBABILITY {
        response.push_str(SUFFIX);
    }
    response
}

/// First `n` characters of `text`, char-boundary safe.
fn prefix_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base_or_suffixed(response: &str, base: &str) -> bool {
        response == base || response == format!("{}{}", base, SUFFIX)
    }

    #[test]
    fn gpt3_template_uses_first_three_words() {
        let mut rng = StdRng::seed_from_u64(0);
        let response = respond(ModelId::Gpt3, "The cat sat on the mat", &mut rng);
        let base = "As a language model, I understand your text about The cat sat...";
        assert!(base_or_suffixed(&response, base), "got: {}", response);
    }

    #[test]
    fn palm_template_uses_thirty_char_prefix() {
        let mut rng = StdRng::seed_from_u64(0);
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let response = respond(ModelId::Palm, text, &mut rng);
        let base = "Based on my training, I can respond to 'abcdefghijklmnopqrstuvwxyz0123...'";
        assert!(base_or_suffixed(&response, base), "got: {}", response);
    }

    #[test]
    fn custom_template_is_char_boundary_safe() {
        let mut rng = StdRng::seed_from_u64(0);
        // 25 multi-byte chars; a byte-indexed slice at 20 would panic.
        let text = "ééééééééééééééééééééééééé";
        let response = respond(ModelId::Custom, text, &mut rng);
        assert!(response.starts_with("Processing the input: 'éééééééééééééééééééé...'"));
    }

    #[test]
    fn unrecognized_model_returns_sentinel() {
        let mut rng = StdRng::seed_from_u64(0);
        let response = respond(ModelId::Unrecognized, "anything", &mut rng);
        assert!(base_or_suffixed(&response, UNKNOWN_RESPONSE), "got: {}", response);
    }

    #[test]
    fn suffix_appears_for_some_seeds_and_not_others() {
        let outcomes: Vec<bool> = (0..50)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                respond(ModelId::Gpt3, "hello world", &mut rng).ends_with(SUFFIX)
            })
            .collect();
        assert!(outcomes.iter().any(|&b| b));
        assert!(outcomes.iter().any(|&b| !b));
    }

    #[test]
    fn same_seed_same_response() {
        let a = respond(ModelId::Palm, "text", &mut StdRng::seed_from_u64(3));
        let b = respond(ModelId::Palm, "text", &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn model_id_parses_known_names_case_insensitively() {
        assert_eq!("GPT-3".parse::<ModelId>().unwrap(), ModelId::Gpt3);
        assert_eq!("gpt3".parse::<ModelId>().unwrap(), ModelId::Gpt3);
        assert_eq!("PaLM".parse::<ModelId>().unwrap(), ModelId::Palm);
        assert_eq!("custom".parse::<ModelId>().unwrap(), ModelId::Custom);
        assert_eq!("LLaMA".parse::<ModelId>().unwrap(), ModelId::Unrecognized);
    }
}

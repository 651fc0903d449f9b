//! Probabilistic synonym substitution over tokenized text.
//!
//! # Tokenization
//!
//! The crate uses one fixed tokenizer (exact token boundaries affect
//! reproducibility, so the rules are part of the contract):
//!
//! - a maximal run of alphabetic characters is one [`Token::Word`];
//! - a maximal run of ASCII digits is one [`Token::Other`];
//! - any other non-whitespace character is a single-character
//!   [`Token::Other`];
//! - whitespace only separates tokens and is never kept.
//!
//! So `"don't stop!"` tokenizes as `don` `'` `t` `stop` `!`. This differs
//! from Penn-style contraction handling; the rule here trades linguistic
//! fidelity for a dependency-free, fully specified scanner.
//!
//! # Reassembly is lossy
//!
//! Perturbed tokens are joined with single spaces. Original spacing and
//! punctuation adjacency are not preserved (`"stop!"` comes back as
//! `"stop !"`). This is an accepted limitation of the transform, not
//! something callers should try to undo.
//!
//! # Randomness
//!
//! One uniform draw per token decides whether to attempt substitution; a
//! second draw picks the replacement only when a substitution happens.
//! Given a fixed seed and lexicon the output is exactly reproducible.

use crate::lexicon::Lexicon;
use rand::Rng;
use serde::Serialize;

/// A tokenizer unit. Only `Word` tokens are substitution candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Maximal run of alphabetic characters.
    Word(String),
    /// Digit run or single punctuation/symbol character.
    Other(String),
}

impl Token {
    /// The token text.
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Other(s) => s,
        }
    }

    /// Whether this token is a substitution candidate.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    fn into_text(self) -> String {
        match self {
            Token::Word(s) | Token::Other(s) => s,
        }
    }
}

/// Split `text` into tokens under the rules documented at module level.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_alphabetic() {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_alphabetic() {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Word(word));
        } else if c.is_ascii_digit() {
            let mut run = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                run.push(c);
                chars.next();
            }
            tokens.push(Token::Other(run));
        } else {
            chars.next();
            tokens.push(Token::Other(c.to_string()));
        }
    }
    tokens
}

/// Tokenize and rejoin without any substitution.
///
/// This is the identity transform of the pipeline: `perturb` with
/// probability 0.0 produces exactly this normalization.
#[must_use]
pub fn tokenize_join(text: &str) -> String {
    let tokens = tokenize(text);
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An original text and its perturbed form.
#[derive(Debug, Clone, Serialize)]
pub struct PerturbationResult {
    /// The input text, unchanged.
    pub original_text: String,
    /// The synonym-substituted, space-rejoined text.
    pub adversarial_text: String,
}

/// Perturbation engine configured with a per-token replacement probability.
#[derive(Debug, Clone)]
pub struct Perturber {
    replacement_probability: f64,
}

impl Perturber {
    /// Create an engine. `replacement_probability` is clamped to [0, 1].
    pub fn new(replacement_probability: f64) -> Self {
        Self {
            replacement_probability: replacement_probability.clamp(0.0, 1.0),
        }
    }

    /// The configured per-token replacement probability.
    pub fn probability(&self) -> f64 {
        self.replacement_probability
    }

    /// Perturb `text` by probabilistic synonym substitution.
    ///
    /// For each token one uniform value is drawn. A [`Token::Word`] is
    /// replaced when the draw is below the replacement probability and its
    /// filtered synonym set holds at least two candidates; the replacement
    /// is then chosen by a second uniform draw over the ordered set. All
    /// other tokens pass through unchanged. Empty input yields an empty
    /// string.
    pub fn perturb<L, R>(&self, text: &str, lexicon: &L, rng: &mut R) -> String
    where
        L: Lexicon + ?Sized,
        R: Rng,
    {
        let tokens = tokenize(text);
        let mut out: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let draw: f64 = rng.gen();
            match token {
                Token::Word(word) if draw < self.replacement_probability => {
                    let candidates = lexicon.synonyms(&word);
                    if candidates.len() >= 2 {
                        let idx = rng.gen_range(0..candidates.len());
                        // BTreeSet iterates in sorted order, so indexing is
                        // stable across runs with the same seed.
                        match candidates.into_iter().nth(idx) {
                            Some(replacement) => out.push(replacement),
                            None => out.push(word), // unreachable: idx < len
                        }
                    } else {
                        out.push(word);
                    }
                }
                other => out.push(other.into_text()),
            }
        }
        out.join(" ")
    }

    /// Perturb `text` and return it paired with the original.
    pub fn perturb_pair<L, R>(&self, text: &str, lexicon: &L, rng: &mut R) -> PerturbationResult
    where
        L: Lexicon + ?Sized,
        R: Rng,
    {
        PerturbationResult {
            original_text: text.to_string(),
            adversarial_text: self.perturb(text, lexicon, rng),
        }
    }
}

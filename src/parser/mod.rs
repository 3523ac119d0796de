//! Definition-text parsing.
//!
//! Deck and achievement files share one line format, `[TAG]Value`. Both
//! dialects are tolerant: a malformed line becomes a `ParseWarning` and an
//! inert stand-in, and parsing carries on with the next line. Every
//! warning is also logged through `tracing`.
//!
//! ## Entry points
//!
//! - `parse_requirement`, `parse_application`, `parse_effect`: one value
//! - `parse_deck`: a whole deck file
//! - `parse_criterion`, `parse_achievements`: achievement codes and files

mod tokenizer;
mod special;
mod deck;
mod achievement;

pub use tokenizer::{tokenize, TaggedLine};
pub use special::{parse_application, parse_effect, parse_requirement, SpecialParser};
pub use deck::parse_deck;
pub use achievement::{parse_achievements, parse_criterion};

use serde::{Deserialize, Serialize};

/// A tolerated defect in definition text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number, 0 when parsing a lone value.
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "line {}: {}", self.line, self.message)
        }
    }
}

/// A parsed value plus the warnings raised while producing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Parsed<T> {
    /// A value parsed without complaint.
    #[must_use]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Check if no warnings were raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Drop the warnings.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Warning sink shared by the dialect parsers.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    line: usize,
    warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    pub(crate) fn at_line(&mut self, line: usize) {
        self.line = line;
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let warning = ParseWarning {
            line: self.line,
            message: message.into(),
        };
        tracing::warn!(line = warning.line, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub(crate) fn absorb(&mut self, warnings: Vec<ParseWarning>) {
        let line = self.line;
        self.warnings.extend(warnings.into_iter().map(|mut w| {
            if w.line == 0 {
                w.line = line;
            }
            w
        }));
    }

    pub(crate) fn finish<T>(self, value: T) -> Parsed<T> {
        Parsed {
            value,
            warnings: self.warnings,
        }
    }
}

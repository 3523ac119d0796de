//! Special-card dialect: requirement, application and effect text.
//!
//! ```text
//! requirement := [MIN | MAX]? count application
//! application := [FRIENDLY | ENEMY | ALL]? suits? HAND? (op value)? (VS application)?
//! effect      := KIND payload?
//! ```
//!
//! Suits are separated by commas or `OR`. A bare count means exactly that
//! many. Keywords are case-insensitive; suit names keep their case.

use super::{Diagnostics, Parsed};
use crate::cards::{CardFace, CardValue};
use crate::effects::{Effect, EffectKind, RandomField};
use crate::rules::{Application, ApplicationLeaf, CountOp, Requirement};

/// Parser for special-card text, optionally aware of the deck's suits.
///
/// With known suits, unknown suit words are reported; without them any
/// non-keyword word is taken as a suit.
#[derive(Clone, Debug, Default)]
pub struct SpecialParser {
    suits: Vec<String>,
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_op_start(word: &str) -> bool {
    word.starts_with(['<', '>', '='])
}

impl SpecialParser {
    /// Parser that accepts any suit name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser that checks suit names against `suits`.
    #[must_use]
    pub fn with_suits(suits: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            suits: suits.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a suit after construction.
    pub fn add_suit(&mut self, suit: impl Into<String>) {
        self.suits.push(suit.into());
    }

    /// Resolve a word to a known suit, matching case-insensitively.
    fn suit(&self, word: &str) -> Option<String> {
        if self.suits.is_empty() {
            return Some(word.to_string());
        }
        self.suits
            .iter()
            .find(|s| s.eq_ignore_ascii_case(word))
            .cloned()
    }

    fn knows_suit(&self, word: &str) -> bool {
        self.suits.iter().any(|s| s.eq_ignore_ascii_case(word))
    }

    /// Parse requirement text. Empty text is the trivial requirement.
    #[must_use]
    pub fn requirement(&self, text: &str) -> Parsed<Requirement> {
        let mut diag = Diagnostics::default();
        let value = self.requirement_words(&words(text), &mut diag);
        diag.finish(value)
    }

    fn requirement_words(&self, words: &[&str], diag: &mut Diagnostics) -> Requirement {
        let Some((&first, rest)) = words.split_first() else {
            return Requirement::nothing();
        };

        let (op, rest) = match first.to_ascii_uppercase().as_str() {
            "MIN" => (CountOp::AtLeast, rest),
            "MAX" => (CountOp::NoMoreThan, rest),
            "EXACTLY" => (CountOp::Exactly, rest),
            _ => (CountOp::Exactly, words),
        };

        let Some((count, style)) = rest
            .split_first()
            .and_then(|(count, style)| count.parse::<usize>().ok().map(|c| (c, style)))
        else {
            diag.warn(format!("requirement '{}' has no count", words.join(" ")));
            return Requirement::nothing();
        };

        let style = if style.is_empty() {
            Application::any()
        } else {
            self.application_words(style, diag)
        };
        Requirement::counting(op, count, style)
    }

    /// Parse application text. Empty text matches every card.
    #[must_use]
    pub fn application(&self, text: &str) -> Parsed<Application> {
        let mut diag = Diagnostics::default();
        let value = self.application_words(&words(text), &mut diag);
        diag.finish(value)
    }

    fn application_words(&self, words: &[&str], diag: &mut Diagnostics) -> Application {
        let mut leaf = ApplicationLeaf::new();
        let mut suits: Vec<String> = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let word = words[i];
            match word.to_ascii_uppercase().as_str() {
                "FRIENDLY" => leaf = leaf.friendly(),
                "ENEMY" => leaf = leaf.enemy(),
                "ALL" | "ANY" => leaf.alignment = crate::rules::Alignment::Either,
                "OR" | "CARD" | "CARDS" => {}
                "HAND" => leaf = leaf.in_hand(),
                "VS" => {
                    let nested = &words[i + 1..];
                    if nested.is_empty() {
                        diag.warn("VS without an opposing application");
                    } else {
                        leaf = leaf.versus(self.application_words(nested, diag));
                    }
                    break;
                }
                _ if is_op_start(word) => {
                    let op: String = word.chars().take_while(|c| "<>=".contains(*c)).collect();
                    let mut operand = &word[op.len()..];
                    if operand.is_empty() {
                        i += 1;
                        operand = words.get(i).copied().unwrap_or("");
                    }
                    match operand.parse::<i32>() {
                        Ok(value) => leaf = Self::bound(leaf, &op, value, diag),
                        Err(_) => diag.warn(format!("'{}' needs a number, found '{}'", op, operand)),
                    }
                }
                _ => match self.suit(word) {
                    Some(suit) if word.parse::<i32>().is_err() => suits.push(suit),
                    _ => diag.warn(format!("unknown word '{}' in application", word)),
                },
            }
            i += 1;
        }

        if !suits.is_empty() {
            leaf = leaf.with_suits(suits);
        }
        leaf.into()
    }

    fn bound(leaf: ApplicationLeaf, op: &str, value: i32, diag: &mut Diagnostics) -> ApplicationLeaf {
        match op {
            ">" => leaf.min(value + 1),
            ">=" => leaf.min(value),
            "<" => leaf.max(value - 1),
            "<=" => leaf.max(value),
            "=" | "==" => leaf.min(value).max(value),
            _ => {
                diag.warn(format!("unknown operator '{}'", op));
                leaf
            }
        }
    }

    /// Parse effect text. Unreadable text becomes the inert effect.
    #[must_use]
    pub fn effect(&self, text: &str) -> Parsed<Effect> {
        let mut diag = Diagnostics::default();
        let value = self.effect_words(&words(text), &mut diag);
        diag.finish(value)
    }

    fn effect_words(&self, words: &[&str], diag: &mut Diagnostics) -> Effect {
        let Some((&first, rest)) = words.split_first() else {
            diag.warn("empty effect");
            return Effect::inert();
        };
        let Some(kind) = EffectKind::from_word(first) else {
            diag.warn(format!("unknown effect '{}'", first));
            return Effect::inert();
        };

        let effect = match kind {
            EffectKind::Buff => match rest.first().and_then(|w| CardValue::from_word(w)) {
                Some(value @ (CardValue::Numeric(_) | CardValue::Win | CardValue::Lose)) => {
                    Some(Effect::buff_outcome(value))
                }
                _ => None,
            },
            EffectKind::Multiply => rest
                .first()
                .map(|w| w.trim_start_matches(['x', 'X']))
                .and_then(|w| w.parse::<f64>().ok())
                .map(Effect::multiply),
            EffectKind::Wait => Some(Effect::wait()),
            EffectKind::Switch => Some(Effect::switch()),
            EffectKind::Reverse => Some(Effect::reverse()),
            EffectKind::Kiss => Some(Effect::kiss()),
            EffectKind::Clone => Some(Effect::clone_marker()),
            EffectKind::Flush => Some(Effect::flush()),
            EffectKind::Replace => self.replace(rest),
            EffectKind::Randomize => match rest.first().map(|w| w.to_ascii_uppercase()) {
                None => Some(Effect::randomize(RandomField::Both)),
                Some(field) => match field.as_str() {
                    "SUIT" => Some(Effect::randomize(RandomField::Suit)),
                    "VALUE" => Some(Effect::randomize(RandomField::Value)),
                    "ALL" | "BOTH" => Some(Effect::randomize(RandomField::Both)),
                    _ => None,
                },
            },
        };

        effect.unwrap_or_else(|| {
            diag.warn(format!("bad payload for {:?}: '{}'", kind, rest.join(" ")));
            Effect::inert()
        })
    }

    /// Named suit, then value, then suit and value.
    fn replace(&self, rest: &[&str]) -> Option<Effect> {
        match rest {
            [word] => {
                if self.knows_suit(word) {
                    self.suit(word).map(Effect::replace_suit)
                } else if let Some(value) = CardValue::from_word(word) {
                    Some(Effect::replace_value(value))
                } else if self.suits.is_empty() {
                    Some(Effect::replace_suit(*word))
                } else {
                    None
                }
            }
            [suit, value] => {
                let suit = self.suit(suit)?;
                let value = CardValue::from_word(value)?;
                Some(Effect::replace_face(CardFace::new(suit, value)))
            }
            _ => None,
        }
    }
}

/// Parse requirement text with no suit checking.
#[must_use]
pub fn parse_requirement(text: &str) -> Parsed<Requirement> {
    SpecialParser::new().requirement(text)
}

/// Parse application text with no suit checking.
#[must_use]
pub fn parse_application(text: &str) -> Parsed<Application> {
    SpecialParser::new().application(text)
}

/// Parse effect text with no suit checking.
#[must_use]
pub fn parse_effect(text: &str) -> Parsed<Effect> {
    SpecialParser::new().effect(text)
}

//! Deck files.
//!
//! ```text
//! [SUIT]Boyfriend
//! [SUIT]Girlfriend
//! [SPECIAL-NAME]Rose
//! [SPECIAL-DESC]Every friendly card gets +1
//! [SPECIAL-REQ]min 1 any
//! [SPECIAL-APP]FRIENDLY
//! [SPECIAL-EFF]BUFF 1
//! ```
//!
//! A special's block ends at its `SPECIAL-EFF` line. Up to three
//! requirement lines are ANDed together; application lines are ORed.

use super::special::SpecialParser;
use super::{tokenize, Diagnostics, Parsed};
use crate::cards::{Deck, SpecialCard};
use crate::rules::{Application, Requirement};

/// Most requirement lines a special may carry.
const MAX_REQUIREMENTS: usize = 3;

#[derive(Default)]
struct PendingSpecial {
    name: Option<String>,
    description: String,
    requirements: Vec<Requirement>,
    applications: Vec<Application>,
    started: bool,
}

impl PendingSpecial {
    fn finish(self, effect: crate::effects::Effect, diag: &mut Diagnostics) -> SpecialCard {
        let name = self.name.unwrap_or_else(|| {
            diag.warn("special without SPECIAL-NAME");
            String::from("Unnamed")
        });
        let requirement = self
            .requirements
            .into_iter()
            .reduce(Requirement::and)
            .unwrap_or_default();
        let application = self
            .applications
            .into_iter()
            .reduce(Application::or)
            .unwrap_or_else(|| {
                diag.warn(format!("special '{}' has no SPECIAL-APP; it applies to any card", name));
                Application::any()
            });
        SpecialCard::new(name, self.description, requirement, application, effect)
    }
}

/// Parse a deck file.
#[must_use]
pub fn parse_deck(name: impl Into<String>, text: &str) -> Parsed<Deck> {
    let tokens = tokenize(text);
    let mut diag = Diagnostics::default();
    diag.absorb(tokens.warnings);

    let mut deck = Deck::new(name, std::iter::empty::<String>());
    let mut parser = SpecialParser::new();
    let mut pending = PendingSpecial::default();

    for line in tokens.value {
        diag.at_line(line.number);
        match line.tag.as_str() {
            "SUIT" => {
                if line.value.is_empty() {
                    diag.warn("empty SUIT");
                } else if deck.suits.contains(&line.value) {
                    diag.warn(format!("duplicate suit '{}'", line.value));
                } else {
                    parser.add_suit(line.value.clone());
                    deck.suits.push(line.value);
                }
            }
            "SPECIAL-NAME" => {
                if pending.started {
                    diag.warn("previous special has no SPECIAL-EFF; dropped");
                    pending = PendingSpecial::default();
                }
                pending.started = true;
                pending.name = Some(line.value);
            }
            "SPECIAL-DESC" => {
                pending.started = true;
                pending.description = line.value;
            }
            "SPECIAL-REQ" => {
                pending.started = true;
                let parsed = parser.requirement(&line.value);
                diag.absorb(parsed.warnings);
                if pending.requirements.len() == MAX_REQUIREMENTS {
                    diag.warn(format!("more than {} SPECIAL-REQ lines; ignored", MAX_REQUIREMENTS));
                } else {
                    pending.requirements.push(parsed.value);
                }
            }
            "SPECIAL-APP" => {
                pending.started = true;
                let parsed = parser.application(&line.value);
                diag.absorb(parsed.warnings);
                pending.applications.push(parsed.value);
            }
            "SPECIAL-EFF" => {
                let parsed = parser.effect(&line.value);
                diag.absorb(parsed.warnings);
                let special = std::mem::take(&mut pending).finish(parsed.value, &mut diag);
                tracing::debug!(special = %special.name, effect = %special.effect, "special parsed");
                deck = deck.with_special(special);
            }
            other => diag.warn(format!("unknown deck tag '{}'", other)),
        }
    }

    if pending.started {
        diag.warn("last special has no SPECIAL-EFF; dropped");
    }
    diag.finish(deck)
}

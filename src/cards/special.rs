//! Special card definitions.
//!
//! A `SpecialCard` is parsed once per deck load and shared by every drawn
//! copy through an `Arc`. Drawn copies are plain `Card`s carrying the
//! `Special` sentinel value.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::rules::{Application, Requirement};

/// Static definition of a special card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialCard {
    /// Card name, unique within a deck.
    pub name: String,

    /// Flavor/rules text shown to players.
    pub description: String,

    /// What the rest of the play must contain for this special to be legal.
    pub requirement: Requirement,

    /// Which cards the effect reaches.
    pub application: Application,

    /// What happens to reached cards.
    pub effect: Effect,
}

impl SpecialCard {
    /// Create a special definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        requirement: Requirement,
        application: Application,
        effect: Effect,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            requirement,
            application,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use std::sync::Arc;

    #[test]
    fn test_copies_share_definition() {
        let def = Arc::new(SpecialCard::new(
            "Wedding",
            "Everyone kisses",
            Requirement::nothing(),
            Application::any(),
            Effect::kiss(),
        ));

        let first = Card::special(Arc::clone(&def));
        let second = Card::special(Arc::clone(&def));

        assert_eq!(Arc::strong_count(&def), 3);
        assert_eq!(first, second);
        assert_eq!(first.special_def().map(|d| &d.effect), Some(&Effect::kiss()));
    }
}

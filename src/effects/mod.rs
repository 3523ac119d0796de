//! Effects and the board engine that applies them.
//!
//! - `Effect`: kind plus kind-specific payload
//! - `SpecialResolver`: walks the board and resolves every special on it
//!
//! Cards mutate themselves (`Card::apply`); the resolver only decides
//! which cards a special reaches and handles the effects that act on the
//! board or a hand rather than on a card.

mod effect;
mod resolver;

pub use effect::{multiply_value, Effect, EffectKind, EffectPayload, RandomField};
pub use resolver::{Resolution, SpecialResolver};

//! Core engine types: players, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module leans on.
//! Hosts configure the table through `GameConfig` rather than constants.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{AiConfig, GameConfig};
pub use error::EngineError;

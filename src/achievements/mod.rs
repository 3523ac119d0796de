//! Achievements: goals checked at the end of a game or a round.
//!
//! ## Key Types
//!
//! - `Statistics` / `StatRecord`: lifetime counters, overall and per deck or suit
//! - `AchievementCriterion`: one parsed achievement code
//! - `Achievement`: criteria that must all hold together
//! - `AchievementBook`: every achievement plus the unlocked set; decides
//!   which reward specials are drawable

pub mod statistics;
pub mod criterion;
pub mod achievement;

pub use statistics::{StatRecord, Statistics, StreakType};
pub use criterion::{
    AchievementCriterion, RoundKind, RoundTarget, ScoreOp, ScoreScope, ScoreSide, ScoreTarget,
    StatKind,
};
pub use achievement::{Achievement, AchievementBook};

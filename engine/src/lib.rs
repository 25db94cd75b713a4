//! Deterministic two-player pickleball engine.
//!
//! A fixed-step state-transition system: one external driver applies
//! human intent and calls [`GameState::tick`] once per frame; rendering
//! reads the public state back. All randomness flows through an injected
//! seedable [`LcgRng`], so a seed fully determines a match.

pub mod ai;
pub mod config;
pub mod fault;
pub mod game;
pub mod matchlog;
pub mod physics;
pub mod rng;
pub mod scoring;
pub mod types;

pub use config::{ConfigError, CourtConfig, RuleConfig};
pub use game::{GameState, RallyOutcome};
pub use matchlog::{MatchLog, RallyRecord};
pub use rng::LcgRng;
pub use types::{Fault, GameMode, ScoringMode, ServiceCourt, Side};

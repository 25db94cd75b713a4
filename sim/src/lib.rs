//! Headless match driver for the pickleball engine.
//!
//! Stands in for the rendering/input shell: it synthesizes the human
//! intent signal with a simple ball tracker, drives the engine at a
//! fixed time step, and collects a rally-by-rally summary bound to a
//! log digest.

use engine::{
    CourtConfig, GameMode, GameState, LcgRng, MatchLog, RallyRecord, RuleConfig, ScoringMode, Side,
};
use serde::{Deserialize, Serialize};

/// Fixed simulation step (seconds), within the engine's tick clamp.
pub const FIXED_DT: f64 = 0.016;

/// Default tick budget when no winner emerges (~26 minutes of play).
pub const DEFAULT_MAX_TICKS: u64 = 100_000;

/// Fraction of the paddle's max speed the synthesized human moves at.
/// Kept well below full speed so sharply angled serves are sometimes
/// clean winners and the score actually moves.
const TRACKER_SPEED_FRACTION: f64 = 0.35;

/// Serializable result of one simulated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub ticks: u64,
    pub score_p1: u32,
    pub score_p2: u32,
    pub winner: Option<Side>,
    pub rallies: Vec<RallyRecord>,
    /// Hex SHA-256 digest of the rally log; equal seeds give equal digests.
    pub log_hash: String,
}

/// Runs one match to completion or to the tick budget.
///
/// The human paddle is driven by a dead-simple tracker (full speed toward
/// the ball center with a small dead zone), which keeps the run entirely
/// deterministic for a given seed.
pub fn run_match(
    seed: u64,
    max_ticks: u64,
    dt: f64,
) -> Result<MatchSummary, engine::ConfigError> {
    let mut state = GameState::new(
        CourtConfig::default(),
        RuleConfig::default(),
        Side::P1,
        3,
        GameMode::Singles,
        ScoringMode::Traditional,
    )?;
    let mut rng = LcgRng::new(seed);
    let mut log = MatchLog::new();

    tracing::info!(seed, max_ticks, "starting match");

    let mut ticks = 0;
    while ticks < max_ticks && !state.has_winner() {
        let intent = human_tracker_intent(&state);
        if let Some(outcome) = state.tick(dt, intent, &mut rng) {
            tracing::debug!(
                rally = outcome.rally_number,
                winner = %outcome.winner,
                fault = ?outcome.fault,
                score_p1 = outcome.score.p1,
                score_p2 = outcome.score.p2,
                "rally concluded"
            );
            log.push(RallyRecord::from(outcome));
        }
        ticks += 1;
    }

    let summary = MatchSummary {
        seed,
        ticks,
        score_p1: state.score.p1,
        score_p2: state.score.p2,
        winner: state.winner(),
        rallies: log.records.clone(),
        log_hash: hex::encode(log.log_hash()),
    };
    tracing::info!(
        ticks,
        rallies = summary.rallies.len(),
        score_p1 = summary.score_p1,
        score_p2 = summary.score_p2,
        winner = ?summary.winner,
        "match finished"
    );
    Ok(summary)
}

/// Synthesized human input: a reaction-limited tracker. It chases the
/// ball only once the ball is inbound on its own half, recenters the rest
/// of the time, and moves at a fraction of the paddle's speed — so it
/// returns most serves but loses the sharply angled ones outright.
fn human_tracker_intent(state: &GameState) -> f64 {
    let human = state.human_side();
    let paddle = &state.paddles[human];
    let center = paddle.pos.y + paddle.height / 2.0;
    let ball = &state.ball;

    let mid_x = state.court.width / 2.0;
    let inbound = match human {
        Side::P1 => ball.vel.x < 0.0 && ball.pos.x < mid_x,
        Side::P2 => ball.vel.x > 0.0 && ball.pos.x > mid_x,
    };
    let target = if inbound {
        ball.pos.y
    } else {
        state.court.height / 2.0
    };

    let dy = target - center;
    if dy.abs() < 4.0 {
        0.0
    } else {
        dy.signum() * paddle.max_speed * TRACKER_SPEED_FRACTION
    }
}

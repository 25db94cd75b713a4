//! Opponent paddle control and slow difficulty adaptation.

use crate::config::{
    CourtConfig, RuleConfig, AI_ADAPT_MARGIN, AI_SPEED_FLOOR, AI_SPEED_SPAN, AI_TARGET_JITTER,
};
use crate::rng::LcgRng;
use crate::types::{Ball, Paddle, Score, Side};

/// Paddle speed for a skill level: linear from 60% to 140% of the base
/// paddle speed over the level scale.
pub fn paddle_speed_for_level(level: u32, rules: &RuleConfig, court: &CourtConfig) -> f64 {
    let fraction = AI_SPEED_FLOOR + (f64::from(level) / f64::from(rules.ai_max_level)) * AI_SPEED_SPAN;
    court.base_paddle_speed * fraction
}

/// Tracks the ball center with a bounded random offset, moving at most
/// `max_speed * dt` per tick and staying inside the vertical play field.
pub fn update_opponent(
    paddle: &mut Paddle,
    ball: &Ball,
    level: u32,
    court: &CourtConfig,
    rules: &RuleConfig,
    dt: f64,
    rng: &mut LcgRng,
) {
    paddle.max_speed = paddle_speed_for_level(level, rules, court);

    let target_y = ball.pos.y - paddle.height / 2.0;
    let jitter = (rng.next_f64() - 0.5) * AI_TARGET_JITTER;
    let dy = target_y + jitter - paddle.pos.y;

    let step = dy.signum() * dy.abs().min(paddle.max_speed * dt);
    paddle.pos.y = (paddle.pos.y + step).clamp(0.0, court.height - paddle.height);
}

/// Negative-feedback difficulty curve: after each point, a sustained
/// human lead raises the opponent level one step; a sustained deficit
/// lowers it. Bounded at `[0, ai_max_level]`.
pub fn adapt_difficulty(score: &Score, ai_level: &mut u32, human: Side, rules: &RuleConfig) {
    let diff = i64::from(score[human]) - i64::from(score[human.opponent()]);
    if diff >= AI_ADAPT_MARGIN && *ai_level < rules.ai_max_level {
        *ai_level += 1;
    }
    if diff <= -AI_ADAPT_MARGIN && *ai_level > 0 {
        *ai_level -= 1;
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Paddle speed is monotonically non-decreasing in level.
        #[test]
        fn prop_speed_monotone_in_level(level in 0u32..10) {
            let court = CourtConfig::default();
            let rules = RuleConfig::default();
            let lower = paddle_speed_for_level(level, &rules, &court);
            let upper = paddle_speed_for_level(level + 1, &rules, &court);
            prop_assert!(upper >= lower);
        }

        /// Speed stays within the 60%..140% envelope for every level.
        #[test]
        fn prop_speed_in_envelope(level in 0u32..=10) {
            let court = CourtConfig::default();
            let rules = RuleConfig::default();
            let speed = paddle_speed_for_level(level, &rules, &court);
            prop_assert!(speed >= court.base_paddle_speed * 0.6 - 1e-9);
            prop_assert!(speed <= court.base_paddle_speed * 1.4 + 1e-9);
        }
    }
}

//! Rally outcome decisions, side-out scoring, and serve rotation.

use crate::config::{CourtConfig, RuleConfig};
use crate::fault::check_fault;
use crate::physics::reset_ball_for_serve;
use crate::types::{
    Ball, Fault, GameMode, RallyState, Score, ServeState, ServiceCourt, ScoringMode, Side,
};

/// Decides whether the rally has concluded and, if so, who won it.
///
/// Hard boundary crossings are checked first: a ball past the left or
/// right sideline scores for the opposite side directly, bypassing fault
/// classification. Otherwise a fault ends the rally; server-attributable
/// faults, or any fault after a serve attempt was made this rally, award
/// the point to the non-serving side.
pub fn check_point(
    ball: &Ball,
    serve: &ServeState,
    last_fault: Option<Fault>,
    court: &CourtConfig,
) -> Option<Side> {
    if ball.pos.x < court.sideline_x {
        return Some(Side::P2);
    }
    if ball.pos.x > court.width - court.sideline_x {
        return Some(Side::P1);
    }

    let fault = check_fault(ball, serve, last_fault, court)?;
    let fault_by_server = matches!(
        fault,
        Fault::ServeOutOfBounds
            | Fault::ServeIntoKitchen
            | Fault::NetContact
            | Fault::VolleyFromNvz
    );

    if fault_by_server || serve.serve_attempts > 0 {
        Some(serve.server.opponent())
    } else {
        Some(serve.server)
    }
}

/// Rotates the target service court. Singles: the server's own score
/// parity picks the court (even serves right). Doubles: alternate.
pub fn rotate_serve(score: &Score, serve: &mut ServeState, game_mode: GameMode) {
    serve.service_court = match game_mode {
        GameMode::Singles => {
            if score[serve.server] % 2 == 0 {
                ServiceCourt::Right
            } else {
                ServiceCourt::Left
            }
        }
        GameMode::Doubles => match serve.service_court {
            ServiceCourt::Right => ServiceCourt::Left,
            ServiceCourt::Left => ServiceCourt::Right,
        },
    };
}

/// Applies the rally result to score and serve state, then resets the
/// ball for the next serve.
///
/// Under side-out scoring only the server's counter can increment; a
/// rally lost by the server passes serve without a score change, and the
/// attempt counter resets exactly when server identity changes. Under
/// rally scoring every winner scores and serve flips every
/// `rally_serve_rotation` total points.
#[allow(clippy::too_many_arguments)]
pub fn award_point(
    winner: Side,
    score: &mut Score,
    serve: &mut ServeState,
    ball: &mut Ball,
    rally: &mut RallyState,
    last_fault: &mut Option<Fault>,
    game_mode: GameMode,
    scoring_mode: ScoringMode,
    rules: &RuleConfig,
    court: &CourtConfig,
) {
    match scoring_mode {
        ScoringMode::Traditional => {
            if winner == serve.server {
                score[winner] += 1;
            } else {
                serve.server = serve.server.opponent();
                serve.is_first_serve = true;
                serve.serve_attempts = 0;
            }
            rotate_serve(score, serve, game_mode);
        }
        ScoringMode::Rally => {
            score[winner] += 1;
            let total = score.p1 + score.p2;
            if total % rules.rally_serve_rotation == 0 {
                serve.server = serve.server.opponent();
                serve.is_first_serve = true;
                serve.serve_attempts = 0;
            }
            rotate_serve(score, serve, game_mode);
        }
    }

    reset_ball_for_serve(ball, rally, serve, last_fault, court);
}

/// True iff the leading score has reached the win threshold with the
/// required margin. Deuce continues indefinitely until the margin is met.
pub fn has_winner(score: &Score, rules: &RuleConfig) -> bool {
    let leader = score.p1.max(score.p2);
    let margin = score.p1.abs_diff(score.p2);
    leader >= rules.to_win && margin >= rules.win_by
}

/// The winning side, if the match is over.
pub fn winner(score: &Score, rules: &RuleConfig) -> Option<Side> {
    if !has_winner(score, rules) {
        return None;
    }
    if score.p1 > score.p2 {
        Some(Side::P1)
    } else {
        Some(Side::P2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BySide, Vec2};

    fn test_ball(x: f64, y: f64) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::default(),
            radius: 8.0,
            speed: 420.0,
            bounces: 0,
            last_bounce_time: 0.0,
        }
    }

    fn serving(server: Side, attempts: u32) -> ServeState {
        ServeState {
            server,
            service_court: ServiceCourt::Right,
            is_first_serve: true,
            serve_attempts: attempts,
        }
    }

    #[test]
    fn boundary_crossings_score_directly() {
        let court = CourtConfig::default();
        let serve = serving(Side::P1, 1);

        let past_left = test_ball(court.sideline_x - 1.0, 200.0);
        assert_eq!(check_point(&past_left, &serve, None, &court), Some(Side::P2));

        let past_right = test_ball(court.width - court.sideline_x + 1.0, 200.0);
        assert_eq!(
            check_point(&past_right, &serve, None, &court),
            Some(Side::P1)
        );
    }

    #[test]
    fn boundary_crossing_ignores_latched_fault() {
        let court = CourtConfig::default();
        let serve = serving(Side::P2, 1);
        let ball = test_ball(-1.0, 200.0);
        assert_eq!(
            check_point(&ball, &serve, Some(Fault::NetContact), &court),
            Some(Side::P2)
        );
    }

    #[test]
    fn live_rally_returns_none() {
        let court = CourtConfig::default();
        let serve = serving(Side::P1, 0);
        let ball = test_ball(450.0, 200.0);
        assert_eq!(check_point(&ball, &serve, None, &court), None);
    }

    #[test]
    fn fault_after_serve_awards_receiver() {
        let court = CourtConfig::default();
        let serve = serving(Side::P1, 1);
        let mut ball = test_ball(450.0, 200.0);
        ball.bounces = 2; // double bounce, not in the server-attributable set
        assert_eq!(check_point(&ball, &serve, None, &court), Some(Side::P2));
    }

    #[test]
    fn server_fault_awards_receiver() {
        let court = CourtConfig::default();
        let serve = serving(Side::P2, 1);
        let mut ball = test_ball(450.0, 200.0);
        ball.bounces = 1;
        assert_eq!(
            check_point(&ball, &serve, Some(Fault::NetContact), &court),
            Some(Side::P1)
        );
    }

    fn award(
        winner_side: Side,
        score: &mut Score,
        serve: &mut ServeState,
        scoring_mode: ScoringMode,
    ) {
        let court = CourtConfig::default();
        let rules = RuleConfig::default();
        let mut ball = test_ball(450.0, 200.0);
        let mut rally = RallyState::new();
        let mut fault = None;
        award_point(
            winner_side,
            score,
            serve,
            &mut ball,
            &mut rally,
            &mut fault,
            GameMode::Singles,
            scoring_mode,
            &rules,
            &court,
        );
    }

    #[test]
    fn side_out_passes_serve_without_score_change() {
        let mut score = BySide { p1: 2u32, p2: 1u32 };
        let mut serve = serving(Side::P1, 1);

        award(Side::P2, &mut score, &mut serve, ScoringMode::Traditional);

        assert_eq!(score, BySide { p1: 2, p2: 1 });
        assert_eq!(serve.server, Side::P2);
        assert_eq!(serve.serve_attempts, 0);
        assert!(serve.is_first_serve);
    }

    #[test]
    fn server_win_increments_and_keeps_serve() {
        let mut score = BySide { p1: 2u32, p2: 1u32 };
        let mut serve = serving(Side::P1, 1);

        award(Side::P1, &mut score, &mut serve, ScoringMode::Traditional);

        assert_eq!(score, BySide { p1: 3, p2: 1 });
        assert_eq!(serve.server, Side::P1);
        // Odd server score serves from the left court.
        assert_eq!(serve.service_court, ServiceCourt::Left);
    }

    #[test]
    fn singles_court_follows_server_score_parity() {
        let mut score = BySide { p1: 3u32, p2: 0u32 };
        let mut serve = serving(Side::P1, 0);

        award(Side::P1, &mut score, &mut serve, ScoringMode::Traditional);
        assert_eq!(score.p1, 4);
        assert_eq!(serve.service_court, ServiceCourt::Right);
    }

    #[test]
    fn rally_scoring_always_increments_winner() {
        let mut score = BySide { p1: 0u32, p2: 0u32 };
        let mut serve = serving(Side::P1, 1);

        award(Side::P2, &mut score, &mut serve, ScoringMode::Rally);
        assert_eq!(score, BySide { p1: 0, p2: 1 });
        // One total point played; rotation interval of two keeps the server.
        assert_eq!(serve.server, Side::P1);

        award(Side::P2, &mut score, &mut serve, ScoringMode::Rally);
        assert_eq!(score, BySide { p1: 0, p2: 2 });
        assert_eq!(serve.server, Side::P2);
        assert_eq!(serve.serve_attempts, 0);
    }

    #[test]
    fn win_threshold_and_margin() {
        let rules = RuleConfig::default();
        assert!(has_winner(&BySide { p1: 11, p2: 9 }, &rules));
        assert!(!has_winner(&BySide { p1: 11, p2: 10 }, &rules));
        assert!(has_winner(&BySide { p1: 12, p2: 10 }, &rules));
        assert!(!has_winner(&BySide { p1: 10, p2: 0 }, &rules));
        assert_eq!(winner(&BySide { p1: 9, p2: 11 }, &rules), Some(Side::P2));
        assert_eq!(winner(&BySide { p1: 11, p2: 10 }, &rules), None);
    }
}

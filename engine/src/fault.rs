//! Pure fault classification, evaluated after physics but before scoring.

use crate::config::CourtConfig;
use crate::types::{Ball, Fault, ServeState};

/// Classifies the current state, in strict precedence order:
///
/// 1. ball center outside the sideline/baseline rectangle,
/// 2. serve in progress with no bounce yet and the ball inside the
///    non-volley zone band centered on mid-height,
/// 3. two floor bounces without an intervening legal strike,
/// 4. whatever fault physics latched this tick (e.g. net contact).
///
/// Out-of-bounds always wins, even over a stale latched fault.
pub fn check_fault(
    ball: &Ball,
    serve: &ServeState,
    last_fault: Option<Fault>,
    court: &CourtConfig,
) -> Option<Fault> {
    let pos = ball.pos;

    if pos.x < court.sideline_x
        || pos.x > court.width - court.sideline_x
        || pos.y < court.baseline_y
        || pos.y > court.height - court.baseline_y
    {
        return Some(Fault::BallOutOfBounds);
    }

    if serve.serve_attempts > 0 && ball.bounces == 0 {
        let kitchen_top = court.height / 2.0 - court.nvz_depth / 2.0;
        let kitchen_bottom = court.height / 2.0 + court.nvz_depth / 2.0;
        if pos.x >= court.sideline_x
            && pos.x <= court.width - court.sideline_x
            && pos.y >= kitchen_top
            && pos.y <= kitchen_bottom
        {
            return Some(Fault::ServeIntoKitchen);
        }
    }

    if ball.bounces >= 2 {
        return Some(Fault::DoubleBounce);
    }

    last_fault
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ServiceCourt, Side, Vec2};

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

    fn serving(attempts: u32) -> ServeState {
        ServeState {
            server: Side::P1,
            service_court: ServiceCourt::Right,
            is_first_serve: true,
            serve_attempts: attempts,
        }
    }

    #[test]
    fn detects_ball_out_of_bounds() {
        let court = CourtConfig::default();
        let ball = test_ball(court.sideline_x - 10.0, 200.0);
        assert_eq!(
            check_fault(&ball, &serving(1), None, &court),
            Some(Fault::BallOutOfBounds)
        );
    }

    #[test]
    fn detects_serve_into_kitchen() {
        let court = CourtConfig::default();
        let ball = test_ball(court.width / 2.0, court.height / 2.0);
        assert_eq!(
            check_fault(&ball, &serving(1), None, &court),
            Some(Fault::ServeIntoKitchen)
        );
    }

    #[test]
    fn kitchen_not_checked_after_bounce() {
        let court = CourtConfig::default();
        let mut ball = test_ball(court.width / 2.0, court.height / 2.0);
        ball.bounces = 1;
        assert_eq!(check_fault(&ball, &serving(1), None, &court), None);
    }

    #[test]
    fn detects_double_bounce() {
        let court = CourtConfig::default();
        let mut ball = test_ball(450.0, 200.0);
        ball.bounces = 2;
        assert_eq!(
            check_fault(&ball, &serving(1), None, &court),
            Some(Fault::DoubleBounce)
        );
    }

    #[test]
    fn null_for_valid_ball_position() {
        let court = CourtConfig::default();
        let ball = test_ball(450.0, 200.0);
        assert_eq!(check_fault(&ball, &serving(0), None, &court), None);
    }

    #[test]
    fn out_of_bounds_wins_over_latched_net_contact() {
        let court = CourtConfig::default();
        let ball = test_ball(10.0, 200.0);
        assert_eq!(
            check_fault(&ball, &serving(1), Some(Fault::NetContact), &court),
            Some(Fault::BallOutOfBounds)
        );
    }

    #[test]
    fn latched_fault_surfaces_when_nothing_else_applies() {
        let court = CourtConfig::default();
        let mut ball = test_ball(450.0, 200.0);
        ball.bounces = 1;
        assert_eq!(
            check_fault(&ball, &serving(1), Some(Fault::NetContact), &court),
            Some(Fault::NetContact)
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::types::{ServiceCourt, Side, Vec2};
    use proptest::prelude::*;

    proptest! {
        /// Any ball strictly inside the playable rectangle with fewer than
        /// two bounces, no serve in progress, and no latched fault is
        /// fault-free.
        #[test]
        fn prop_live_ball_has_no_fault(
            x in 51.0f64..849.0,
            y in 51.0f64..499.0,
            bounces in 0u32..2,
        ) {
            let court = CourtConfig::default();
            let ball = Ball {
                pos: Vec2::new(x, y),
                vel: Vec2::default(),
                radius: 8.0,
                speed: 420.0,
                bounces,
                last_bounce_time: 0.0,
            };
            let serve = ServeState {
                server: Side::P1,
                service_court: ServiceCourt::Right,
                is_first_serve: true,
                serve_attempts: 0,
            };
            prop_assert_eq!(check_fault(&ball, &serve, None, &court), None);
        }

        /// Out-of-bounds has strict precedence regardless of serve state
        /// and latched faults.
        #[test]
        fn prop_out_of_bounds_precedence(
            y in 0.0f64..550.0,
            attempts in 0u32..3,
            latched in prop::sample::select(vec![None, Some(Fault::NetContact)]),
        ) {
            let court = CourtConfig::default();
            let ball = Ball {
                pos: Vec2::new(court.sideline_x - 1.0, y),
                vel: Vec2::default(),
                radius: 8.0,
                speed: 420.0,
                bounces: 0,
                last_bounce_time: 0.0,
            };
            let serve = ServeState {
                server: Side::P2,
                service_court: ServiceCourt::Left,
                is_first_serve: true,
                serve_attempts: attempts,
            };
            prop_assert_eq!(
                check_fault(&ball, &serve, latched, &court),
                Some(Fault::BallOutOfBounds)
            );
        }
    }
}

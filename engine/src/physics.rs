//! Ball kinematics, bounce bookkeeping, and paddle contact resolution.
//!
//! Every function here mutates only the sub-structures it is handed; the
//! tick orchestrator decides what each phase may touch.

use crate::config::{
    CourtConfig, RuleConfig, MAX_DEFLECTION_ANGLE, PADDLE_RESTITUTION, SERVE_BASELINE_OFFSET,
    SERVE_LAUNCH_ANGLE, SERVE_SPEED_FRACTION,
};
use crate::rng::LcgRng;
use crate::types::{Ball, BySide, Fault, Paddle, RallyState, ServeState, ServiceCourt, Side, Vec2};

/// Advances the ball by `vel * dt`, reflecting off the top/bottom
/// baselines (each reflection records a floor bounce) and off the net.
///
/// Net contact reflects the horizontal velocity, rolls the horizontal
/// position back to its pre-step value, and latches [`Fault::NetContact`]
/// unless another fault is already latched this tick.
pub fn step_ball(
    ball: &mut Ball,
    rally: &mut RallyState,
    last_fault: &mut Option<Fault>,
    court: &CourtConfig,
    dt: f64,
    now: f64,
) {
    let prev_x = ball.pos.x;
    ball.pos.x += ball.vel.x * dt;
    ball.pos.y += ball.vel.y * dt;

    // Baseline reflections: snap to the boundary so the ball cannot
    // tunnel through on a large step.
    if ball.pos.y - ball.radius < 0.0 && ball.vel.y < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        record_bounce(ball, rally, court.height, now);
    }
    if ball.pos.y + ball.radius > court.height && ball.vel.y > 0.0 {
        ball.pos.y = court.height - ball.radius;
        ball.vel.y = -ball.vel.y;
        record_bounce(ball, rally, court.height, now);
    }

    // Net contact: the step crossed the vertical centerline while the
    // ball's vertical extent overlapped the net band.
    let mid_x = court.width / 2.0;
    let crossed = (prev_x - mid_x) * (ball.pos.x - mid_x) < 0.0;
    if crossed {
        let net_top = court.height / 2.0 - court.net_height / 2.0;
        let net_bottom = net_top + court.net_height;
        let overlaps_net =
            ball.pos.y + ball.radius > net_top && ball.pos.y - ball.radius < net_bottom;
        if overlaps_net {
            ball.pos.x = prev_x;
            ball.vel.x = -ball.vel.x;
            if last_fault.is_none() {
                *last_fault = Some(Fault::NetContact);
            }
        }
    }
}

/// Records a floor bounce: increments the bounce counter, stamps the tick
/// time, and marks the bounced-on side.
///
/// The side is determined by which half of the court, split at
/// mid-height, the ball occupies. Once both sides have bounced in the
/// rally, volleys become legal for both.
pub fn record_bounce(ball: &mut Ball, rally: &mut RallyState, court_height: f64, now: f64) {
    ball.bounces += 1;
    ball.last_bounce_time = now;

    let side = if ball.pos.y < court_height / 2.0 {
        Side::P1
    } else {
        Side::P2
    };
    rally.ball_bounced[side] = true;

    if rally.ball_bounced.p1 && rally.ball_bounced.p2 {
        rally.can_volley = BySide::splat(true);
    }
}

/// True iff the ball circle intersects the axis-aligned paddle rectangle,
/// via closest-point clamping. No side effects.
pub fn paddle_overlap(
    paddle_x: f64,
    paddle_y: f64,
    paddle_w: f64,
    paddle_h: f64,
    ball_pos: Vec2,
    ball_r: f64,
) -> bool {
    let cx = ball_pos.x.clamp(paddle_x, paddle_x + paddle_w);
    let cy = ball_pos.y.clamp(paddle_y, paddle_y + paddle_h);
    let dx = ball_pos.x - cx;
    let dy = ball_pos.y - cy;
    dx * dx + dy * dy <= ball_r * ball_r
}

/// Resolves a confirmed paddle contact. The caller must have checked both
/// overlap and that the ball is moving toward this paddle, which prevents
/// double resolution of the same contact across ticks.
///
/// Returns a fault instead of reflecting the ball when the strike is an
/// illegal volley; otherwise applies restitution and deflection and
/// resets the bounce counter.
pub fn resolve_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    rally: &mut RallyState,
    side: Side,
    _court: &CourtConfig,
) -> Option<Fault> {
    if !rally.can_volley[side] {
        return Some(Fault::VolleyBeforeDoubleBounce);
    }
    if paddle.in_nvz && ball.bounces == 0 {
        return Some(Fault::VolleyFromNvz);
    }

    let speed = ball.vel.length() * PADDLE_RESTITUTION;
    let dir_x = match side {
        Side::P1 => 1.0,
        Side::P2 => -1.0,
    };
    // paddle.height > 0 is guaranteed by construction-time validation
    let center = paddle.pos.y + paddle.height / 2.0;
    let offset = ((ball.pos.y - center) / (paddle.height / 2.0)).clamp(-1.0, 1.0);
    let angle = offset * MAX_DEFLECTION_ANGLE;

    ball.vel.x = angle.cos() * speed * dir_x;
    ball.vel.y = angle.sin() * speed;
    ball.speed = speed;
    ball.bounces = 0;
    None
}

/// Paddle kitchen membership: the paddle sits within one NVZ depth of
/// either sideline.
pub fn is_in_nvz(paddle_x: f64, paddle_w: f64, court: &CourtConfig) -> bool {
    let left_limit = court.sideline_x + court.nvz_depth;
    let right_limit = court.width - court.sideline_x - court.nvz_depth;
    paddle_x < left_limit || paddle_x + paddle_w > right_limit
}

/// Whether a point lies inside the given service court for `side`.
pub fn is_in_service_court(
    pos: Vec2,
    service_court: ServiceCourt,
    side: Side,
    court: &CourtConfig,
) -> bool {
    let (x_min, x_max) = match service_court {
        ServiceCourt::Left => (court.sideline_x, court.centerline_x),
        ServiceCourt::Right => (court.centerline_x, court.width - court.sideline_x),
    };
    let (y_min, y_max) = match side {
        Side::P1 => (court.baseline_y, court.baseline_y + court.service_court_height),
        Side::P2 => (
            court.height - court.baseline_y - court.service_court_height,
            court.height - court.baseline_y,
        ),
    };
    pos.x >= x_min && pos.x <= x_max && pos.y >= y_min && pos.y <= y_max
}

/// The serve spot for the current server and target service court.
pub fn serve_position(serve: &ServeState, court: &CourtConfig) -> Vec2 {
    let x = match serve.server {
        Side::P1 => court.sideline_x + SERVE_BASELINE_OFFSET,
        Side::P2 => court.width - court.sideline_x - SERVE_BASELINE_OFFSET,
    };
    let y = match serve.service_court {
        ServiceCourt::Right => court.height / 2.0 + court.service_court_height / 2.0,
        ServiceCourt::Left => court.height / 2.0 - court.service_court_height / 2.0,
    };
    Vec2::new(x, y)
}

/// Puts the ball at the serve spot with zero velocity (serve velocity is
/// applied by [`execute_serve`]), resets the bounce counters and both
/// rally flags, bumps the rally counter, and clears the recorded fault.
pub fn reset_ball_for_serve(
    ball: &mut Ball,
    rally: &mut RallyState,
    serve: &ServeState,
    last_fault: &mut Option<Fault>,
    court: &CourtConfig,
) {
    ball.pos = serve_position(serve, court);
    ball.vel = Vec2::default();
    ball.speed = court.base_ball_speed;
    ball.bounces = 0;
    ball.last_bounce_time = 0.0;

    rally.ball_bounced = BySide::splat(false);
    rally.can_volley = BySide::splat(false);
    rally.rally_number += 1;

    *last_fault = None;
}

/// Imparts serve velocity toward the receiver, at a seeded launch angle
/// drawn uniformly over the full `±SERVE_LAUNCH_ANGLE` range. Flat draws
/// can carry the ball all the way past the receiving sideline, which is
/// the serving side's only scoring route; steep draws drift out past a
/// baseline instead.
///
/// Once the attempt count has reached the configured maximum the serve
/// itself is a fault and the ball is not moved; the caller treats that as
/// a rally loss.
pub fn execute_serve(
    ball: &mut Ball,
    serve: &mut ServeState,
    court: &CourtConfig,
    rules: &RuleConfig,
    rng: &mut LcgRng,
) -> Option<Fault> {
    if serve.serve_attempts >= rules.max_serve_attempts {
        return Some(Fault::ServeOutOfBounds);
    }
    serve.serve_attempts += 1;

    let dir_x = match serve.server {
        Side::P1 => 1.0,
        Side::P2 => -1.0,
    };
    let angle = rng.jitter(SERVE_LAUNCH_ANGLE);
    let speed = court.base_ball_speed * SERVE_SPEED_FRACTION;

    ball.vel.x = angle.cos() * speed * dir_x;
    ball.vel.y = angle.sin() * speed;
    ball.speed = speed;
    None
}

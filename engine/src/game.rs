//! The aggregate game state and the per-tick orchestration sequence.

use serde::{Deserialize, Serialize};

use crate::ai;
use crate::config::{ConfigError, CourtConfig, RuleConfig, MAX_TICK_DT};
use crate::fault::check_fault;
use crate::physics;
use crate::rng::LcgRng;
use crate::scoring;
use crate::types::{
    Ball, BySide, Fault, GameMode, Paddle, RallyState, Score, ScoringMode, ServeState,
    ServiceCourt, Side, Vec2,
};

/// How a concluded rally ended, surfaced to the caller by [`GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyOutcome {
    pub rally_number: u32,
    pub winner: Side,
    /// The classified fault; a hard sideline crossing classifies as
    /// [`Fault::BallOutOfBounds`], so every concluded rally carries one.
    pub fault: Option<Fault>,
    /// Score after the point was applied.
    pub score: Score,
}

/// The aggregate root. Constructed once per match; every field is mutated
/// in place by exactly one tick phase. All reads the renderer needs are
/// public fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub court: CourtConfig,
    pub rules: RuleConfig,
    /// Accumulated simulation time (seconds); the engine never samples a
    /// wall clock.
    pub clock: f64,
    pub ball: Ball,
    pub paddles: BySide<Paddle>,
    pub score: Score,
    pub serve: ServeState,
    pub rally: RallyState,
    pub paused: bool,
    pub ai_level: u32,
    pub game_mode: GameMode,
    pub scoring_mode: ScoringMode,
    pub last_fault: Option<Fault>,
    /// True between a serve reset and the serve execution step.
    pub serve_pending: bool,
}

impl GameState {
    /// Builds a fresh match state. Fails fast on misconfiguration; the
    /// engine does not re-validate per tick.
    pub fn new(
        court: CourtConfig,
        rules: RuleConfig,
        initial_server: Side,
        initial_ai_level: u32,
        game_mode: GameMode,
        scoring_mode: ScoringMode,
    ) -> Result<Self, ConfigError> {
        court.validate()?;
        rules.validate()?;
        if initial_ai_level > rules.ai_max_level {
            return Err(ConfigError::AiLevelOutOfRange {
                level: initial_ai_level,
                max: rules.ai_max_level,
            });
        }

        let paddle_y = (court.height - court.paddle_height) / 2.0;
        let make_paddle = |x: f64, human: bool| Paddle {
            pos: Vec2::new(x, paddle_y),
            width: court.paddle_width,
            height: court.paddle_height,
            max_speed: court.base_paddle_speed,
            human,
            in_nvz: physics::is_in_nvz(x, court.paddle_width, &court),
        };
        let paddles = BySide {
            p1: make_paddle(court.paddle_margin, true),
            p2: make_paddle(
                court.width - court.paddle_margin - court.paddle_width,
                false,
            ),
        };

        let ball = Ball {
            pos: Vec2::new(court.width / 2.0, court.height / 2.0),
            vel: Vec2::default(),
            radius: court.ball_radius,
            speed: court.base_ball_speed,
            bounces: 0,
            last_bounce_time: 0.0,
        };

        let mut state = Self {
            court,
            rules,
            clock: 0.0,
            ball,
            paddles,
            score: BySide::splat(0),
            serve: ServeState {
                server: initial_server,
                service_court: ServiceCourt::Right,
                is_first_serve: true,
                serve_attempts: 0,
            },
            rally: RallyState::new(),
            paused: false,
            ai_level: initial_ai_level,
            game_mode,
            scoring_mode,
            last_fault: None,
            serve_pending: false,
        };
        state.enter_serve_pending();
        Ok(state)
    }

    /// Reinitializes for a new match, preserving configuration. This is
    /// the external restart trigger; the engine never auto-resets after
    /// a win. Rejects an out-of-range opponent level the same way
    /// construction does.
    pub fn restart(
        &mut self,
        initial_server: Side,
        initial_ai_level: u32,
    ) -> Result<(), ConfigError> {
        if initial_ai_level > self.rules.ai_max_level {
            return Err(ConfigError::AiLevelOutOfRange {
                level: initial_ai_level,
                max: self.rules.ai_max_level,
            });
        }
        self.clock = 0.0;
        self.score = BySide::splat(0);
        self.serve = ServeState {
            server: initial_server,
            service_court: ServiceCourt::Right,
            is_first_serve: true,
            serve_attempts: 0,
        };
        self.rally = RallyState::new();
        self.paused = false;
        self.ai_level = initial_ai_level;
        self.last_fault = None;
        self.enter_serve_pending();
        Ok(())
    }

    fn enter_serve_pending(&mut self) {
        physics::reset_ball_for_serve(
            &mut self.ball,
            &mut self.rally,
            &self.serve,
            &mut self.last_fault,
            &self.court,
        );
        self.serve_pending = true;
    }

    /// Advances the simulation by one tick.
    ///
    /// `dt` is clamped to [`MAX_TICK_DT`]; a zero or negative `dt`, a
    /// pause, or a decided match skips the mutating phase entirely.
    /// Returns the outcome when this tick concluded a rally.
    ///
    /// Phase order: human input, opponent update, NVZ recompute, serve
    /// execution, ball advance, paddle contact resolution, rally
    /// evaluation.
    pub fn tick(
        &mut self,
        dt: f64,
        human_intent_vy: f64,
        rng: &mut LcgRng,
    ) -> Option<RallyOutcome> {
        if self.paused || self.has_winner() {
            return None;
        }
        let dt = dt.min(MAX_TICK_DT);
        if dt <= 0.0 {
            return None;
        }
        let now = self.clock + dt;
        self.clock = now;

        // Human input: vertical intent, clamped to paddle speed and field.
        let human = self.human_side();
        {
            let paddle = &mut self.paddles[human];
            let vy = human_intent_vy.clamp(-paddle.max_speed, paddle.max_speed);
            paddle.pos.y =
                (paddle.pos.y + vy * dt).clamp(0.0, self.court.height - paddle.height);
        }

        ai::update_opponent(
            &mut self.paddles[human.opponent()],
            &self.ball,
            self.ai_level,
            &self.court,
            &self.rules,
            dt,
            rng,
        );

        // NVZ membership is recomputed every tick before collisions.
        self.paddles.p1.in_nvz =
            physics::is_in_nvz(self.paddles.p1.pos.x, self.paddles.p1.width, &self.court);
        self.paddles.p2.in_nvz =
            physics::is_in_nvz(self.paddles.p2.pos.x, self.paddles.p2.width, &self.court);

        if self.serve_pending {
            if let Some(fault) = physics::execute_serve(
                &mut self.ball,
                &mut self.serve,
                &self.court,
                &self.rules,
                rng,
            ) {
                self.last_fault = Some(fault);
            }
            self.serve_pending = false;
        }

        physics::step_ball(
            &mut self.ball,
            &mut self.rally,
            &mut self.last_fault,
            &self.court,
            dt,
            now,
        );

        // Paddle contacts: resolve only when the ball moves toward the
        // paddle, so one contact cannot resolve twice across ticks.
        for side in [Side::P1, Side::P2] {
            let toward = match side {
                Side::P1 => self.ball.vel.x < 0.0,
                Side::P2 => self.ball.vel.x > 0.0,
            };
            if !toward {
                continue;
            }
            let paddle = self.paddles[side];
            if !physics::paddle_overlap(
                paddle.pos.x,
                paddle.pos.y,
                paddle.width,
                paddle.height,
                self.ball.pos,
                self.ball.radius,
            ) {
                continue;
            }
            if let Some(fault) =
                physics::resolve_hit(&mut self.ball, &paddle, &mut self.rally, side, &self.court)
            {
                if self.last_fault.is_none() {
                    self.last_fault = Some(fault);
                }
            }
        }

        let winner = scoring::check_point(&self.ball, &self.serve, self.last_fault, &self.court)?;
        let fault = check_fault(&self.ball, &self.serve, self.last_fault, &self.court);
        let rally_number = self.rally.rally_number;

        scoring::award_point(
            winner,
            &mut self.score,
            &mut self.serve,
            &mut self.ball,
            &mut self.rally,
            &mut self.last_fault,
            self.game_mode,
            self.scoring_mode,
            &self.rules,
            &self.court,
        );
        self.serve_pending = true;
        ai::adapt_difficulty(&self.score, &mut self.ai_level, human, &self.rules);

        Some(RallyOutcome {
            rally_number,
            winner,
            fault,
            score: self.score,
        })
    }

    /// The side driven by the human intent signal.
    pub fn human_side(&self) -> Side {
        if self.paddles.p1.human {
            Side::P1
        } else {
            Side::P2
        }
    }

    pub fn has_winner(&self) -> bool {
        scoring::has_winner(&self.score, &self.rules)
    }

    pub fn winner(&self) -> Option<Side> {
        scoring::winner(&self.score, &self.rules)
    }
}

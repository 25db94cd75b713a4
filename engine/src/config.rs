// Court geometry and rule constants.
// The engine validates configuration once at construction and never
// re-validates per tick; a bad dimension is a caller error, not a fault.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Largest elapsed time accepted per tick (seconds). Larger frame gaps are
/// clamped before any physics computation to avoid large-step instability.
pub const MAX_TICK_DT: f64 = 0.033;

/// Ball speed gain per paddle contact (3%).
pub const PADDLE_RESTITUTION: f64 = 1.03;

/// Maximum deflection angle off a paddle face (radians).
pub const MAX_DEFLECTION_ANGLE: f64 = 0.6;

/// Peak-to-peak vertical jitter applied to the opponent's tracking target
/// (pixels). Models imperfect reaction.
pub const AI_TARGET_JITTER: f64 = 18.0;

/// Opponent paddle speed at level 0, as a fraction of the base speed.
pub const AI_SPEED_FLOOR: f64 = 0.6;

/// Additional speed fraction gained from level 0 to max level.
pub const AI_SPEED_SPAN: f64 = 0.8;

/// Score differential that moves the opponent level by one step.
pub const AI_ADAPT_MARGIN: i64 = 3;

/// Serve speed as a fraction of the base ball speed.
pub const SERVE_SPEED_FRACTION: f64 = 0.85;

/// Maximum serve launch angle (radians). The actual angle is drawn
/// uniformly over `[-SERVE_LAUNCH_ANGLE, SERVE_LAUNCH_ANGLE]`, so the
/// distribution includes flat serves that can carry the full court.
pub const SERVE_LAUNCH_ANGLE: f64 = 0.25;

/// Horizontal distance from the server's sideline to the serve spot.
pub const SERVE_BASELINE_OFFSET: f64 = 40.0;

/// Static court dimensions and zone geometry. Pure data, no behavior
/// beyond validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtConfig {
    pub width: f64,
    pub height: f64,
    pub net_height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Paddle distance from its own court edge.
    pub paddle_margin: f64,
    pub ball_radius: f64,
    pub base_ball_speed: f64,
    pub base_paddle_speed: f64,
    /// Distance from the top/bottom edge to the baseline.
    pub baseline_y: f64,
    /// Distance from the left/right edge to the sideline.
    pub sideline_x: f64,
    /// Distance from the baseline to the service line.
    pub service_line_y: f64,
    /// Divides the left and right service courts.
    pub centerline_x: f64,
    /// Non-volley zone depth (7 ft scaled).
    pub nvz_depth: f64,
    pub service_court_width: f64,
    pub service_court_height: f64,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 550.0,
            net_height: 8.0,
            paddle_width: 14.0,
            paddle_height: 90.0,
            paddle_margin: 40.0,
            ball_radius: 8.0,
            base_ball_speed: 420.0,
            base_paddle_speed: 340.0,
            baseline_y: 50.0,
            sideline_x: 50.0,
            service_line_y: 200.0,
            centerline_x: 450.0,
            nvz_depth: 126.0,
            service_court_width: 400.0,
            service_court_height: 150.0,
        }
    }
}

impl CourtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("net_height", self.net_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("base_ball_speed", self.base_ball_speed),
            ("base_paddle_speed", self.base_paddle_speed),
            ("nvz_depth", self.nvz_depth),
            ("service_court_width", self.service_court_width),
            ("service_court_height", self.service_court_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        let non_negative = [
            ("baseline_y", self.baseline_y),
            ("sideline_x", self.sideline_x),
            ("service_line_y", self.service_line_y),
            ("paddle_margin", self.paddle_margin),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        Ok(())
    }
}

/// Match rules and opponent bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Points needed to win.
    pub to_win: u32,
    /// Required margin over the trailing score.
    pub win_by: u32,
    pub ai_max_level: u32,
    /// Serve attempts allowed before the serve itself becomes a fault.
    pub max_serve_attempts: u32,
    /// Under rally scoring, serve flips every this many total points.
    pub rally_serve_rotation: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            to_win: 11,
            win_by: 2,
            ai_max_level: 10,
            max_serve_attempts: 1,
            rally_serve_rotation: 2,
        }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("to_win", self.to_win),
            ("win_by", self.win_by),
            ("ai_max_level", self.ai_max_level),
            ("max_serve_attempts", self.max_serve_attempts),
            ("rally_serve_rotation", self.rally_serve_rotation),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::ZeroRule { name });
            }
        }
        Ok(())
    }
}

/// Construction-time misconfiguration. The engine fails fast here instead
/// of clamping silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveDimension { name: &'static str, value: f64 },
    ZeroRule { name: &'static str },
    AiLevelOutOfRange { level: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveDimension { name, value } => {
                write!(f, "invalid court dimension {}: {}", name, value)
            }
            ConfigError::ZeroRule { name } => {
                write!(f, "rule {} must be at least 1", name)
            }
            ConfigError::AiLevelOutOfRange { level, max } => {
                write!(f, "opponent level {} out of range 0..={}", level, max)
            }
        }
    }
}

impl Error for ConfigError {}

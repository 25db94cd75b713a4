use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// 2D point or velocity in court pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Player identity. Exactly two sides exist; all per-side state is kept in
/// a [`BySide`] pair so both are always handled symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    P1,
    P2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::P1 => write!(f, "p1"),
            Side::P2 => write!(f, "p2"),
        }
    }
}

/// A fixed pair of values keyed by [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BySide<T> {
    pub p1: T,
    pub p2: T,
}

impl<T: Copy> BySide<T> {
    pub fn splat(value: T) -> Self {
        Self {
            p1: value,
            p2: value,
        }
    }
}

impl<T> Index<Side> for BySide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::P1 => &self.p1,
            Side::P2 => &self.p2,
        }
    }
}

impl<T> IndexMut<Side> for BySide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::P1 => &mut self.p1,
            Side::P2 => &mut self.p2,
        }
    }
}

/// Score counters, one per side.
pub type Score = BySide<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
    /// Nominal speed, updated on every paddle contact.
    pub speed: f64,
    /// Floor bounces since the last legal strike or serve reset.
    pub bounces: u32,
    pub last_bounce_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner.
    pub pos: Vec2,
    pub width: f64,
    pub height: f64,
    pub max_speed: f64,
    pub human: bool,
    /// Recomputed every tick before collision resolution, never lazily.
    pub in_nvz: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCourt {
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Singles,
    Doubles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Side-out scoring: only the serving side can add to the score.
    Traditional,
    /// Every rally winner scores; serve rotates by total points played.
    Rally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeState {
    pub server: Side,
    pub service_court: ServiceCourt,
    /// Doubles-style re-serve tracking.
    pub is_first_serve: bool,
    /// Serve attempts taken this rally. Resets to 0 exactly when server
    /// identity changes; capped by the configured maximum.
    pub serve_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyState {
    /// Whether the ball has bounced on each side since the serve.
    pub ball_bounced: BySide<bool>,
    /// A side may volley only after both sides have recorded a bounce.
    pub can_volley: BySide<bool>,
    pub rally_number: u32,
}

impl RallyState {
    pub fn new() -> Self {
        Self {
            ball_bounced: BySide::splat(false),
            can_volley: BySide::splat(false),
            rally_number: 0,
        }
    }
}

impl Default for RallyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a rally ended illegitimately. A fault is a rally-outcome signal,
/// never a system error.
///
/// The last three variants are reserved for doubles and permanent-object
/// rules that singles play never produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    ServeOutOfBounds,
    ServeIntoKitchen,
    NetContact,
    VolleyBeforeDoubleBounce,
    BallOutOfBounds,
    VolleyFromNvz,
    DoubleBounce,
    NetTouch,
    BallHitPlayer,
    BallHitPermanentObject,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fault::ServeOutOfBounds => "serve_out_of_bounds",
            Fault::ServeIntoKitchen => "serve_into_kitchen",
            Fault::NetContact => "net_contact",
            Fault::VolleyBeforeDoubleBounce => "volley_before_double_bounce",
            Fault::BallOutOfBounds => "ball_out_of_bounds",
            Fault::VolleyFromNvz => "volley_from_nvz",
            Fault::DoubleBounce => "double_bounce",
            Fault::NetTouch => "net_touch",
            Fault::BallHitPlayer => "ball_hit_player",
            Fault::BallHitPermanentObject => "ball_hit_permanent_object",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opponent_is_involutive() {
        assert_eq!(Side::P1.opponent(), Side::P2);
        assert_eq!(Side::P2.opponent(), Side::P1);
        assert_eq!(Side::P1.opponent().opponent(), Side::P1);
    }

    #[test]
    fn by_side_indexing() {
        let mut pair = BySide { p1: 1u32, p2: 2u32 };
        assert_eq!(pair[Side::P1], 1);
        assert_eq!(pair[Side::P2], 2);
        pair[Side::P2] = 7;
        assert_eq!(pair.p2, 7);
    }

    #[test]
    fn fault_display_matches_wire_name() {
        assert_eq!(Fault::DoubleBounce.to_string(), "double_bounce");
        assert_eq!(Fault::VolleyFromNvz.to_string(), "volley_from_nvz");
    }
}

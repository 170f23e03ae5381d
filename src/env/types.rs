//! Core geometric and observation types shared by environments and the runner.
//!
//! Everything here is expressed in the environment's global frame unless a
//! name says otherwise (`heading_ego_frame`).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D position in the global frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin position (0, 0).
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector from `self` toward `target`, in radians.
    pub fn bearing_to(&self, target: &Position) -> f64 {
        (target.y - self.y).atan2(target.x - self.x)
    }

    /// Linear interpolation between `self` (`frac = 0`) and `target` (`frac = 1`).
    ///
    /// `frac` is clamped to `[0, 1]`.
    pub fn lerp(&self, target: &Position, frac: f64) -> Position {
        let f = frac.clamp(0.0, 1.0);
        Position::new(
            self.x + (target.x - self.x) * f,
            self.y + (target.y - self.y) * f,
        )
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Position and heading of an agent at one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Position,
    /// Heading in the global frame, radians.
    pub heading: f64,
}

impl Pose {
    pub fn new(position: Position, heading: f64) -> Self {
        Self { position, heading }
    }

    /// Returns `[x, y, heading]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.heading]
    }
}

/// The action pair an agent applied on a step: commanded speed and heading change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentAction {
    pub speed: f64,
    pub delta_heading: f64,
}

impl AgentAction {
    pub fn new(speed: f64, delta_heading: f64) -> Self {
        Self {
            speed,
            delta_heading,
        }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.speed, self.delta_heading]
    }
}

/// A per-agent state field that can be exposed in observations.
///
/// Each field has a fixed number of components (see [`StateField::size`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StateField {
    PosGlobalFrame,
    HeadingGlobalFrame,
    GoalGlobalFrame,
    Radius,
    PrefSpeed,
    DistToGoal,
    HeadingEgoFrame,
}

impl StateField {
    /// Returns all fields in canonical order.
    pub fn all() -> [StateField; 7] {
        [
            StateField::PosGlobalFrame,
            StateField::HeadingGlobalFrame,
            StateField::GoalGlobalFrame,
            StateField::Radius,
            StateField::PrefSpeed,
            StateField::DistToGoal,
            StateField::HeadingEgoFrame,
        ]
    }

    /// Number of numeric components this field contributes to an observation.
    pub fn size(&self) -> usize {
        match self {
            StateField::PosGlobalFrame | StateField::GoalGlobalFrame => 2,
            StateField::HeadingGlobalFrame
            | StateField::Radius
            | StateField::PrefSpeed
            | StateField::DistToGoal
            | StateField::HeadingEgoFrame => 1,
        }
    }

    /// Canonical field name.
    pub fn name(&self) -> &'static str {
        match self {
            StateField::PosGlobalFrame => "pos_global_frame",
            StateField::HeadingGlobalFrame => "heading_global_frame",
            StateField::GoalGlobalFrame => "goal_global_frame",
            StateField::Radius => "radius",
            StateField::PrefSpeed => "pref_speed",
            StateField::DistToGoal => "dist_to_goal",
            StateField::HeadingEgoFrame => "heading_ego_frame",
        }
    }

    /// Total number of components of a list of fields.
    pub fn total_size(fields: &[StateField]) -> usize {
        fields.iter().map(StateField::size).sum()
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a state field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown state field: {0}")]
pub struct UnknownStateField(pub String);

impl FromStr for StateField {
    type Err = UnknownStateField;

    /// Parses a canonical name or one of the short aliases `pos`, `heading`, `goal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" | "pos_global_frame" => Ok(StateField::PosGlobalFrame),
            "heading" | "heading_global_frame" => Ok(StateField::HeadingGlobalFrame),
            "goal" | "goal_global_frame" => Ok(StateField::GoalGlobalFrame),
            "radius" => Ok(StateField::Radius),
            "pref_speed" => Ok(StateField::PrefSpeed),
            "dist_to_goal" => Ok(StateField::DistToGoal),
            "heading_ego_frame" => Ok(StateField::HeadingEgoFrame),
            other => Err(UnknownStateField(other.to_string())),
        }
    }
}

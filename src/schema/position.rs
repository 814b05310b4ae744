use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An edge name that failed to parse as a [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized direction '{0}' (expected top, right, bottom or left)")]
pub struct UnknownDirection(pub String);

/// The packing axis and edge siblings are laid out towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// True for `left`/`right`, whose packing consumes width.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// An axis-aligned rectangle: either the space still available for
/// packing, or the box a placed child occupies.
///
/// `top` is above `bottom` and `right` is right of `left`. While packing,
/// the cursor may briefly end up inverted; that is how exhaustion shows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Position {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// A box of the given size anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(height, width, 0.0, 0.0)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Extent along the axis `direction` packs on.
    pub fn span(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() {
            self.width()
        } else {
            self.height()
        }
    }

    pub fn edge(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn set_edge(&mut self, direction: Direction, value: f64) {
        match direction {
            Direction::Top => self.top = value,
            Direction::Right => self.right = value,
            Direction::Bottom => self.bottom = value,
            Direction::Left => self.left = value,
        }
    }

    /// Whether any room is left along `direction`.
    pub fn has_space(&self, direction: Direction) -> bool {
        if direction.is_horizontal() {
            self.left < self.right
        } else {
            self.bottom < self.top
        }
    }

    /// Whether a `width` x `height` box fits inside this one.
    pub fn fits(&self, width: f64, height: f64) -> bool {
        width <= self.width() && height <= self.height()
    }

    /// Move the trailing edge past `placed`, leaving `gap` between them.
    ///
    /// Packing towards `right` moves `left` to `placed.right + gap`, and so
    /// on for the other edges.
    pub fn shrink_past(&mut self, direction: Direction, placed: &Position, gap: f64) {
        match direction {
            Direction::Top => self.bottom = placed.top + gap,
            Direction::Right => self.left = placed.right + gap,
            Direction::Bottom => self.top = placed.bottom - gap,
            Direction::Left => self.right = placed.left - gap,
        }
    }

    /// Translate the whole box by `amount` towards `direction`.
    pub fn shift(&mut self, direction: Direction, amount: f64) {
        match direction {
            Direction::Top => {
                self.top += amount;
                self.bottom += amount;
            }
            Direction::Right => {
                self.left += amount;
                self.right += amount;
            }
            Direction::Bottom => {
                self.top -= amount;
                self.bottom -= amount;
            }
            Direction::Left => {
                self.left -= amount;
                self.right -= amount;
            }
        }
    }
}

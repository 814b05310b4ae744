use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::position::Direction;
use super::value::ArgumentMap;

/// A layout mode name that failed to parse as a [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized contents mode '{0}' (expected Random, Certain, Repeat or Multiple)")]
pub struct UnknownMode(pub String);

/// How a possibility lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Weighted picks among children that still fit, until space, fit or
    /// the limit runs out.
    Random,
    /// Every child, in order, packed one after another.
    Certain,
    /// Children round-robin until one no longer fits.
    Repeat,
    /// Every child at the same spot, optionally stepped by the spacing.
    Multiple,
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Random" => Ok(Self::Random),
            "Certain" => Ok(Self::Certain),
            "Repeat" => Ok(Self::Repeat),
            "Multiple" => Ok(Self::Multiple),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// A `{min, max, units}` spacing range. The resolved gap is always a whole
/// multiple of `units` (default 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub units: Option<f64>,
}

/// One weighted alternative of a [`Spacing::Weighted`] list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSpacing {
    pub percent: u32,
    pub value: SpacingRange,
}

/// The gap inserted between packed siblings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Spacing {
    #[default]
    None,
    Constant(f64),
    /// Inclusive integer-step range `[min, max]`.
    Range(f64, f64),
    Weighted(Vec<WeightedSpacing>),
    Units(SpacingRange),
}

/// Optional width/height overrides for a choice.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sizing {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Axes along which a choice fills the whole available position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stretch {
    pub width: bool,
    pub height: bool,
}

/// One weighted alternative of [`Arguments::Weighted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedArguments {
    pub percent: u32,
    pub values: ArgumentMap,
}

/// Arguments attached to a choice's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arguments {
    Fixed(ArgumentMap),
    Weighted(Vec<WeightedArguments>),
}

/// What resolving a choice produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// A terminal placement sized from its own schema.
    Known,
    /// A possibility that is itself expanded within its box.
    Random,
    /// A terminal placement that takes the whole current position, with
    /// nominal size copied from `source`.
    Final { source: String },
}

/// One entry in a possibility's `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub title: String,
    pub kind: ChoiceKind,
    #[serde(default)]
    pub percent: u32,
    #[serde(default)]
    pub sizing: Sizing,
    #[serde(default)]
    pub stretch: Stretch,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

impl Choice {
    fn with_kind(title: &str, kind: ChoiceKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            percent: 0,
            sizing: Sizing::default(),
            stretch: Stretch::default(),
            arguments: None,
        }
    }

    pub fn known(title: &str) -> Self {
        Self::with_kind(title, ChoiceKind::Known)
    }

    pub fn random(title: &str) -> Self {
        Self::with_kind(title, ChoiceKind::Random)
    }

    pub fn final_from(title: &str, source: &str) -> Self {
        Self::with_kind(
            title,
            ChoiceKind::Final {
                source: source.to_string(),
            },
        )
    }

    pub fn with_percent(mut self, percent: u32) -> Self {
        self.percent = percent;
        self
    }

    /// The catalog entry whose nominal size this choice is measured by.
    pub fn target(&self) -> &str {
        match &self.kind {
            ChoiceKind::Final { source } => source,
            _ => &self.title,
        }
    }
}

/// The layout rule of a possibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contents {
    pub mode: Mode,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub snap: Option<Direction>,
    /// Most children Random mode may place before the pass is abandoned.
    #[serde(default)]
    pub limit: Option<usize>,
    pub children: Vec<Choice>,
}

impl Contents {
    pub fn new(mode: Mode, children: Vec<Choice>) -> Self {
        Self {
            mode,
            direction: None,
            spacing: Spacing::None,
            snap: None,
            limit: None,
            children,
        }
    }
}

/// A named, reusable content template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Possibility {
    pub title: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub contents: Option<Contents>,
}

impl Possibility {
    /// A leaf possibility with only a nominal size.
    pub fn leaf(title: &str, width: f64, height: f64) -> Self {
        Self {
            title: title.to_string(),
            width,
            height,
            contents: None,
        }
    }

    pub fn with_contents(mut self, contents: Contents) -> Self {
        self.contents = Some(contents);
        self
    }
}

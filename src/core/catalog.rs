/// Possibility catalog: typed schemas, authoring-file loading, and
/// reference validation.
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::layout::LayoutError;
use crate::schema::position::Direction;
use crate::schema::possibility::{
    Arguments, Choice, ChoiceKind, Contents, Mode, Possibility, Sizing, Spacing, SpacingRange,
    Stretch, WeightedArguments, WeightedSpacing,
};
use crate::schema::value::ArgumentMap;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("possibility '{possibility}': {message}")]
    Config {
        possibility: String,
        message: String,
    },
    #[error("possibility '{possibility}': {source}")]
    Direction {
        possibility: String,
        source: crate::schema::position::UnknownDirection,
    },
    #[error("unsupported catalog file '{0}' (expected .ron or .json)")]
    UnsupportedFile(String),
}

/// The set of named possibilities generation draws from.
///
/// Never written to during generation; replace it wholesale instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PossibilityCatalog {
    possibilities: FxHashMap<String, Possibility>,
}

// Authoring format. Mode, type and edge names are plain strings and
// spacing/arguments accept several shapes; conversion below turns them
// into the closed schema types.

#[derive(Debug, Deserialize)]
struct RawPossibility {
    width: f64,
    height: f64,
    #[serde(default)]
    contents: Option<RawContents>,
}

#[derive(Debug, Deserialize)]
struct RawContents {
    mode: String,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    spacing: Option<RawSpacing>,
    #[serde(default)]
    snap: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    children: Vec<RawChoice>,
}

#[derive(Debug, Deserialize)]
struct RawChoice {
    title: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    percent: u32,
    #[serde(default)]
    sizing: Option<RawSizing>,
    #[serde(default)]
    stretch: Option<RawStretch>,
    #[serde(default)]
    arguments: Option<RawArguments>,
}

#[derive(Debug, Deserialize)]
struct RawSizing {
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawStretch {
    #[serde(default)]
    width: bool,
    #[serde(default)]
    height: bool,
}

#[derive(Debug, Deserialize)]
struct RawWeightedArguments {
    percent: u32,
    values: ArgumentMap,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawArguments {
    Weighted(Vec<RawWeightedArguments>),
    Fixed(ArgumentMap),
}

#[derive(Debug, Deserialize)]
struct RawSpacingRange {
    min: f64,
    max: f64,
    #[serde(default)]
    units: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWeightedSpacing {
    percent: u32,
    value: RawSpacingRange,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSpacingItem {
    Number(f64),
    Weighted(RawWeightedSpacing),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSpacing {
    Number(f64),
    List(Vec<RawSpacingItem>),
    Range(RawSpacingRange),
    Other(serde_json::Value),
}

fn config_error(possibility: &str, message: String) -> CatalogError {
    CatalogError::Config {
        possibility: possibility.to_string(),
        message,
    }
}

fn parse_direction(possibility: &str, raw: Option<String>) -> Result<Option<Direction>, CatalogError> {
    raw.map(|s| {
        s.parse::<Direction>().map_err(|source| CatalogError::Direction {
            possibility: possibility.to_string(),
            source,
        })
    })
    .transpose()
}

fn convert_range(raw: RawSpacingRange) -> SpacingRange {
    SpacingRange {
        min: raw.min,
        max: raw.max,
        units: raw.units,
    }
}

fn convert_spacing(possibility: &str, raw: RawSpacing) -> Result<Spacing, CatalogError> {
    match raw {
        RawSpacing::Number(n) if n == 0.0 => Ok(Spacing::None),
        RawSpacing::Number(n) => Ok(Spacing::Constant(n)),
        RawSpacing::Range(range) => Ok(Spacing::Units(convert_range(range))),
        RawSpacing::List(items) if items.is_empty() => Ok(Spacing::None),
        RawSpacing::List(items) => {
            if let [RawSpacingItem::Number(min), RawSpacingItem::Number(max)] = items.as_slice() {
                return Ok(Spacing::Range(*min, *max));
            }
            let mut weighted = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    RawSpacingItem::Weighted(w) => weighted.push(WeightedSpacing {
                        percent: w.percent,
                        value: convert_range(w.value),
                    }),
                    RawSpacingItem::Number(n) => {
                        return Err(config_error(
                            possibility,
                            format!("invalid spacing: numeric ranges take exactly two numbers, found {} among other entries", n),
                        ))
                    }
                    RawSpacingItem::Other(value) => {
                        return Err(config_error(
                            possibility,
                            format!("invalid spacing entry '{}'", value),
                        ))
                    }
                }
            }
            Ok(Spacing::Weighted(weighted))
        }
        RawSpacing::Other(value) => Err(config_error(
            possibility,
            format!("invalid spacing given: '{}'", value),
        )),
    }
}

fn convert_choice(possibility: &str, raw: RawChoice) -> Result<Choice, CatalogError> {
    let kind = match raw.kind.as_str() {
        "Known" => ChoiceKind::Known,
        "Random" => ChoiceKind::Random,
        "Final" => ChoiceKind::Final {
            source: raw.source.ok_or_else(|| {
                config_error(
                    possibility,
                    format!("Final choice '{}' has no source", raw.title),
                )
            })?,
        },
        other => {
            return Err(config_error(
                possibility,
                format!("unknown choice type '{}' on '{}'", other, raw.title),
            ))
        }
    };

    let arguments = raw.arguments.map(|args| match args {
        RawArguments::Fixed(map) => Arguments::Fixed(map),
        RawArguments::Weighted(list) => Arguments::Weighted(
            list.into_iter()
                .map(|w| WeightedArguments {
                    percent: w.percent,
                    values: w.values,
                })
                .collect(),
        ),
    });

    Ok(Choice {
        title: raw.title,
        kind,
        percent: raw.percent,
        sizing: raw
            .sizing
            .map(|s| Sizing {
                width: s.width,
                height: s.height,
            })
            .unwrap_or_default(),
        stretch: raw
            .stretch
            .map(|s| Stretch {
                width: s.width,
                height: s.height,
            })
            .unwrap_or_default(),
        arguments,
    })
}

fn convert_contents(possibility: &str, raw: RawContents) -> Result<Contents, CatalogError> {
    let mode = raw
        .mode
        .parse::<Mode>()
        .map_err(|e| config_error(possibility, e.to_string()))?;
    let spacing = match raw.spacing {
        Some(spacing) => convert_spacing(possibility, spacing)?,
        None => Spacing::None,
    };
    let children = raw
        .children
        .into_iter()
        .map(|c| convert_choice(possibility, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Contents {
        mode,
        direction: parse_direction(possibility, raw.direction)?,
        spacing,
        snap: parse_direction(possibility, raw.snap)?,
        limit: raw.limit,
        children,
    })
}

impl PossibilityCatalog {
    pub fn get(&self, name: &str) -> Option<&Possibility> {
        self.possibilities.get(name)
    }

    /// Like [`get`](Self::get), failing with [`LayoutError::Lookup`].
    pub fn require(&self, name: &str) -> Result<&Possibility, LayoutError> {
        self.get(name)
            .ok_or_else(|| LayoutError::Lookup(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.possibilities.contains_key(name)
    }

    /// Add or replace a possibility, keyed by its title.
    pub fn insert(&mut self, possibility: Possibility) {
        self.possibilities
            .insert(possibility.title.clone(), possibility);
    }

    pub fn len(&self) -> usize {
        self.possibilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.possibilities.is_empty()
    }

    /// All possibility names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.possibilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge another catalog into this one. Possibilities from `other`
    /// override those in `self` with the same name.
    pub fn merge(&mut self, other: PossibilityCatalog) {
        for (name, possibility) in other.possibilities {
            self.possibilities.insert(name, possibility);
        }
    }

    /// Parse a catalog from a RON map of name to possibility.
    ///
    /// `Option` fields may be written bare (implicit `Some`).
    pub fn parse_ron(input: &str) -> Result<PossibilityCatalog, CatalogError> {
        let raw: FxHashMap<String, RawPossibility> = ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
            .from_str(input)?;
        Self::from_raw(raw)
    }

    /// Parse a catalog from a JSON object of name to possibility.
    pub fn parse_json(input: &str) -> Result<PossibilityCatalog, CatalogError> {
        let raw: FxHashMap<String, RawPossibility> = serde_json::from_str(input)?;
        Self::from_raw(raw)
    }

    /// Load a catalog from a `.ron` or `.json` file.
    pub fn load_from_file(path: &Path) -> Result<PossibilityCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|s| s.to_str()) {
            Some("ron") => Self::parse_ron(&contents)?,
            Some("json") => Self::parse_json(&contents)?,
            _ => return Err(CatalogError::UnsupportedFile(path.display().to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            possibilities = catalog.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    /// Load and merge every `.ron`/`.json` file in `dir`, in file name
    /// order, so later files override earlier ones.
    pub fn load_from_dir(dir: &Path) -> Result<PossibilityCatalog, CatalogError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            match path.extension().and_then(|s| s.to_str()) {
                Some("ron") | Some("json") => paths.push(path),
                _ => tracing::warn!(path = %path.display(), "skipping non-catalog file"),
            }
        }
        paths.sort();

        let mut catalog = PossibilityCatalog::default();
        for path in paths {
            catalog.merge(Self::load_from_file(&path)?);
        }
        Ok(catalog)
    }

    /// Load every catalog file under `dir` and its subdirectories, in path
    /// order. A file that fails to load is recorded and the walk goes on.
    pub fn load_tree(dir: &Path) -> TreeLoad {
        let mut load = TreeLoad::default();
        load.walk(dir);
        load
    }

    fn from_raw(raw: FxHashMap<String, RawPossibility>) -> Result<PossibilityCatalog, CatalogError> {
        let mut possibilities = FxHashMap::default();
        for (name, raw_possibility) in raw {
            let contents = raw_possibility
                .contents
                .map(|c| convert_contents(&name, c))
                .transpose()?;
            possibilities.insert(
                name.clone(),
                Possibility {
                    title: name,
                    width: raw_possibility.width,
                    height: raw_possibility.height,
                    contents,
                },
            );
        }
        Ok(PossibilityCatalog { possibilities })
    }

    /// Check references and layout rules without generating anything.
    ///
    /// Issues come back sorted by possibility name.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for name in self.names() {
            let possibility = &self.possibilities[name];
            let Some(contents) = &possibility.contents else {
                continue;
            };
            let mut issue = |severity, message: String| {
                issues.push(CatalogIssue {
                    severity,
                    possibility: name.to_string(),
                    message,
                })
            };

            // Snap-only contents exist to pin the box, not to hold children
            if contents.children.is_empty() {
                if contents.snap.is_none() {
                    issue(Severity::Warning, "contents has no children".to_string());
                }
                continue;
            }

            let needs_direction = match contents.mode {
                Mode::Random | Mode::Repeat | Mode::Certain => true,
                Mode::Multiple => false,
            };
            if needs_direction && contents.direction.is_none() {
                issue(
                    Severity::Warning,
                    format!(
                        "{:?} mode packs children but has no direction (must inherit one from its parent)",
                        contents.mode
                    ),
                );
            }

            if contents.mode == Mode::Random {
                if contents.limit.is_none() {
                    issue(
                        Severity::Warning,
                        "Random mode has no limit".to_string(),
                    );
                }
                let total: u64 = contents.children.iter().map(|c| u64::from(c.percent)).sum();
                if contents.children.len() > 1 && total < 100 {
                    issue(
                        Severity::Warning,
                        format!("children percents sum to {} (picks above that find nothing)", total),
                    );
                }
            }

            for choice in &contents.children {
                let target = choice.target();
                match self.possibilities.get(target) {
                    None => issue(
                        Severity::Error,
                        format!("choice '{}' references non-existent possibility '{}'", choice.title, target),
                    ),
                    Some(referenced) => {
                        if choice.kind == ChoiceKind::Random && referenced.contents.is_none() {
                            issue(
                                Severity::Error,
                                format!("Random choice '{}' references '{}', which has no contents", choice.title, target),
                            );
                        }
                    }
                }
            }

            let all_self_ref = contents
                .children
                .iter()
                .all(|c| c.kind == ChoiceKind::Random && c.title == name);
            if all_self_ref {
                issue(
                    Severity::Error,
                    "every child expands the possibility itself (infinite recursion)".to_string(),
                );
            }
        }

        issues
    }
}

/// What [`PossibilityCatalog::load_tree`] managed to read.
#[derive(Debug, Default)]
pub struct TreeLoad {
    pub catalog: PossibilityCatalog,
    pub loaded: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, CatalogError)>,
}

impl TreeLoad {
    fn walk(&mut self, dir: &Path) {
        let mut paths: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
            Err(e) => {
                self.failures.push((dir.to_path_buf(), e.into()));
                return;
            }
        };
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.walk(&path);
                continue;
            }
            match path.extension().and_then(|s| s.to_str()) {
                Some("ron") | Some("json") => match PossibilityCatalog::load_from_file(&path) {
                    Ok(loaded) => {
                        self.catalog.merge(loaded);
                        self.loaded.push(path);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "catalog file failed to load");
                        self.failures.push((path, e));
                    }
                },
                _ => tracing::warn!(path = %path.display(), "skipping non-catalog file"),
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A finding from [`PossibilityCatalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub severity: Severity,
    pub possibility: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}: '{}' {}", label, self.possibility, self.message)
    }
}

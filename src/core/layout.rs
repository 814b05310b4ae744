/// Layout engine: the four generation strategies, choice resolution and
/// recursive expansion.
use thiserror::Error;

use crate::core::bounds::wrap_choice_position_extremes;
use crate::core::catalog::PossibilityCatalog;
use crate::core::choice::{choose_among, choose_among_position};
use crate::core::random::RandomSource;
use crate::core::spacing::resolve_spacing;
use crate::schema::node::{GeneratedLayout, GeneratedNode, NodeKind};
use crate::schema::position::{Direction, Position};
use crate::schema::possibility::{Arguments, Choice, ChoiceKind, Contents, Mode};
use crate::schema::value::{ArgumentMap, Value};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("no possibility named '{0}' in the catalog")]
    Lookup(String),
    #[error("possibility '{0}' has no contents to expand")]
    Schema(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("{0} requires a direction but none is configured")]
    Direction(String),
    #[error("expanding '{name}' went deeper than {limit} levels")]
    DepthExceeded { name: String, limit: usize },
}

/// Default for how deeply possibilities may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

fn require_direction(direction: Option<Direction>, operation: &str) -> Result<Direction, LayoutError> {
    direction.ok_or_else(|| LayoutError::Direction(operation.to_string()))
}

/// One expansion pass over a catalog, drawing from a borrowed random
/// source.
pub struct Expander<'a> {
    catalog: &'a PossibilityCatalog,
    random: &'a mut dyn RandomSource,
    max_depth: usize,
}

impl<'a> Expander<'a> {
    pub fn new(catalog: &'a PossibilityCatalog, random: &'a mut dyn RandomSource) -> Self {
        Self {
            catalog,
            random,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand the possibility `name` within `position`.
    ///
    /// `inherited` is used when the possibility's contents name no
    /// direction of their own. Returns `None` when nothing was placed or a
    /// Random-mode limit was exceeded.
    pub fn expand(
        &mut self,
        name: &str,
        position: Position,
        inherited: Option<Direction>,
        depth: usize,
    ) -> Result<Option<GeneratedLayout>, LayoutError> {
        if depth > self.max_depth {
            return Err(LayoutError::DepthExceeded {
                name: name.to_string(),
                limit: self.max_depth,
            });
        }

        let catalog = self.catalog;
        let possibility = catalog.require(name)?;
        let contents = possibility
            .contents
            .as_ref()
            .ok_or_else(|| LayoutError::Schema(name.to_string()))?;
        let direction = contents.direction.or(inherited);

        tracing::debug!(
            possibility = name,
            mode = ?contents.mode,
            direction = ?direction,
            depth,
            "expanding possibility"
        );

        let children = match contents.mode {
            Mode::Random => self.generate_random(contents, position, direction, depth)?,
            Mode::Certain => Some(self.generate_certain(contents, position, direction, depth)?),
            Mode::Repeat => Some(self.generate_repeat(contents, position, direction, depth)?),
            Mode::Multiple => Some(self.generate_multiple(contents, position, direction, depth)?),
        };

        Ok(children.and_then(wrap_choice_position_extremes))
    }

    /// Every child in order, each packed after the previous one.
    pub fn generate_certain(
        &mut self,
        contents: &Contents,
        position: Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<Vec<GeneratedNode>, LayoutError> {
        let mut cursor = position;
        let mut placed = Vec::with_capacity(contents.children.len());

        for choice in &contents.children {
            let node = self.resolve_choice(choice, &cursor, direction, depth)?;
            let dir = require_direction(direction, "Certain packing")?;
            let gap = resolve_spacing(&contents.spacing, &mut *self.random)?;
            cursor.shrink_past(dir, &node.bounds(), gap);
            placed.push(node);
        }

        Ok(placed)
    }

    /// Children round-robin until the cursor is exhausted or the next one
    /// does not fit. The index starts over on every call.
    pub fn generate_repeat(
        &mut self,
        contents: &Contents,
        position: Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<Vec<GeneratedNode>, LayoutError> {
        let dir = require_direction(direction, "Repeat packing")?;
        let mut cursor = position;
        let mut placed = Vec::new();
        if contents.children.is_empty() {
            return Ok(placed);
        }

        let mut index = 0;
        while cursor.has_space(dir) {
            let choice = &contents.children[index];
            let node = self.resolve_choice(choice, &cursor, direction, depth)?;
            if !cursor.fits(node.width, node.height) {
                tracing::trace!(title = %node.title, "repeat candidate does not fit, stopping");
                break;
            }

            let gap = resolve_spacing(&contents.spacing, &mut *self.random)?;
            let before = cursor.span(dir);
            cursor.shrink_past(dir, &node.bounds(), gap);
            placed.push(node);

            if cursor.span(dir) >= before {
                tracing::warn!(choice = %choice.title, "repeat placement made no progress, stopping");
                break;
            }
            index = (index + 1) % contents.children.len();
        }

        Ok(placed)
    }

    /// Weighted picks among fitting children until nothing fits or the
    /// cursor is exhausted. Placing more than `limit` children abandons
    /// the whole pass with `None`.
    pub fn generate_random(
        &mut self,
        contents: &Contents,
        position: Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<Option<Vec<GeneratedNode>>, LayoutError> {
        let dir = require_direction(direction, "Random packing")?;
        let catalog = self.catalog;
        let mut cursor = position;
        let mut placed = Vec::new();

        while cursor.has_space(dir) {
            let Some(choice) =
                choose_among_position(&contents.children, &cursor, catalog, &mut *self.random)?
            else {
                break;
            };
            let node = self.resolve_choice(choice, &cursor, direction, depth)?;

            let gap = resolve_spacing(&contents.spacing, &mut *self.random)?;
            let before = cursor.span(dir);
            cursor.shrink_past(dir, &node.bounds(), gap);
            placed.push(node);

            if let Some(limit) = contents.limit {
                if placed.len() > limit {
                    tracing::debug!(limit, "random placement exceeded its limit");
                    return Ok(None);
                }
            }
            if cursor.span(dir) >= before {
                tracing::warn!(choice = %choice.title, "random placement made no progress, stopping");
                break;
            }
        }

        Ok(Some(placed))
    }

    /// Every child at the current position; with a direction, the shared
    /// position steps by the spacing between children.
    pub fn generate_multiple(
        &mut self,
        contents: &Contents,
        position: Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<Vec<GeneratedNode>, LayoutError> {
        let mut cursor = position;
        let mut placed = Vec::with_capacity(contents.children.len());

        for choice in &contents.children {
            placed.push(self.resolve_choice(choice, &cursor, direction, depth)?);
            if let Some(dir) = direction {
                let gap = resolve_spacing(&contents.spacing, &mut *self.random)?;
                cursor.shift(dir, gap);
            }
        }

        Ok(placed)
    }

    /// Turn one choice into a node at `position`, expanding Random
    /// references within their own box.
    pub fn resolve_choice(
        &mut self,
        choice: &Choice,
        position: &Position,
        direction: Option<Direction>,
        depth: usize,
    ) -> Result<GeneratedNode, LayoutError> {
        if let ChoiceKind::Final { source } = &choice.kind {
            return self.parse_choice_final(choice, source, position);
        }

        let mut node = self.parse_choice(choice, position, direction)?;
        if node.kind == NodeKind::Random {
            node.contents = self
                .expand(&choice.title, node.bounds(), direction, depth + 1)?
                .map(Box::new);
        }
        tracing::trace!(
            title = %node.title,
            top = node.top,
            right = node.right,
            bottom = node.bottom,
            left = node.left,
            "placed choice"
        );
        Ok(node)
    }

    /// Size and position a Known or Random choice.
    ///
    /// The box starts as `position`; the edge at `direction` is rebuilt
    /// from its opposite plus the size. A `snap` on the referenced
    /// possibility then pins the box to that edge, and `stretch` widens it
    /// back to the full position on the flagged axes.
    pub fn parse_choice(
        &mut self,
        choice: &Choice,
        position: &Position,
        direction: Option<Direction>,
    ) -> Result<GeneratedNode, LayoutError> {
        let catalog = self.catalog;
        let schema = catalog.get(&choice.title);
        let lookup = || LayoutError::Lookup(choice.title.clone());
        let mut width = choice
            .sizing
            .width
            .or(schema.map(|s| s.width))
            .ok_or_else(lookup)?;
        let mut height = choice
            .sizing
            .height
            .or(schema.map(|s| s.height))
            .ok_or_else(lookup)?;

        let mut bounds = *position;
        if let Some(dir) = direction {
            let size = if dir.is_horizontal() { width } else { height };
            let anchor = bounds.edge(dir.opposite());
            let edge = match dir {
                Direction::Top | Direction::Right => anchor + size,
                Direction::Bottom | Direction::Left => anchor - size,
            };
            bounds.set_edge(dir, edge);
        }

        let snap = schema
            .and_then(|s| s.contents.as_ref())
            .and_then(|c| c.snap);
        if let Some(snap) = snap {
            let size = if snap.is_horizontal() { width } else { height };
            let anchor = bounds.edge(snap);
            let edge = match snap {
                Direction::Top | Direction::Right => anchor - size,
                Direction::Bottom | Direction::Left => anchor + size,
            };
            bounds.set_edge(snap.opposite(), edge);
        }

        let mut arguments = self.resolve_arguments(choice.arguments.as_ref());
        if choice.stretch.width {
            bounds.left = position.left;
            bounds.right = position.right;
            width = bounds.width();
            arguments
                .get_or_insert_with(ArgumentMap::new)
                .insert("width".to_string(), Value::Float(width));
        }
        if choice.stretch.height {
            bounds.top = position.top;
            bounds.bottom = position.bottom;
            height = bounds.height();
            arguments
                .get_or_insert_with(ArgumentMap::new)
                .insert("height".to_string(), Value::Float(height));
        }

        let kind = match choice.kind {
            ChoiceKind::Random => NodeKind::Random,
            _ => NodeKind::Known,
        };
        let mut node = GeneratedNode {
            title: choice.title.clone(),
            kind,
            arguments,
            width,
            height,
            ..Default::default()
        };
        node.set_bounds(&bounds);
        Ok(node)
    }

    /// A terminal node filling `position`, sized nominally from `source`.
    pub fn parse_choice_final(
        &mut self,
        choice: &Choice,
        source: &str,
        position: &Position,
    ) -> Result<GeneratedNode, LayoutError> {
        let catalog = self.catalog;
        let schema = catalog.require(source)?;
        let mut node = GeneratedNode {
            title: choice.title.clone(),
            kind: NodeKind::Known,
            arguments: self.resolve_arguments(choice.arguments.as_ref()),
            width: schema.width,
            height: schema.height,
            ..Default::default()
        };
        node.set_bounds(position);
        Ok(node)
    }

    fn resolve_arguments(&mut self, arguments: Option<&Arguments>) -> Option<ArgumentMap> {
        match arguments? {
            Arguments::Fixed(map) => Some(map.clone()),
            Arguments::Weighted(options) => {
                choose_among(options, &mut *self.random).map(|o| o.values.clone())
            }
        }
    }
}

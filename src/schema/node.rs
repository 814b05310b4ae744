use serde::{Deserialize, Serialize};

use super::position::Position;
use super::value::ArgumentMap;

/// Whether a generated node is a leaf or was expanded further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Terminal and placeable as-is.
    #[default]
    Known,
    /// Expanded within its own box; the result lives in `contents`.
    Random,
}

/// The output of resolving one choice.
///
/// Terminal nodes are the placement commands handed to consumers:
/// `{ title, type, arguments, top, right, bottom, left, width, height }`.
/// `width`/`height` are the nominal size, which for stamped (Final)
/// placements can differ from the edge span.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedNode {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ArgumentMap>,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Box<GeneratedLayout>>,
}

impl GeneratedNode {
    pub fn bounds(&self) -> Position {
        Position::new(self.top, self.right, self.bottom, self.left)
    }

    pub fn set_bounds(&mut self, bounds: &Position) {
        self.top = bounds.top;
        self.right = bounds.right;
        self.bottom = bounds.bottom;
        self.left = bounds.left;
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == NodeKind::Known
    }

    /// True for a node carrying nothing at all, equal to the default.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

/// The unnamed box a generation pass produces: the union of its children's
/// bounds plus the children themselves, in placement order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedLayout {
    pub bounds: Position,
    pub children: Vec<GeneratedNode>,
}

impl GeneratedLayout {
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::value::Value;

    #[test]
    fn command_serializes_flat() {
        let node = GeneratedNode {
            title: "Tree".to_string(),
            kind: NodeKind::Known,
            arguments: Some(ArgumentMap::from([("leaves".to_string(), Value::Int(3))])),
            top: 8.0,
            right: 4.0,
            bottom: 0.0,
            left: 0.0,
            width: 4.0,
            height: 8.0,
            contents: None,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Known");
        assert_eq!(json["title"], "Tree");
        assert_eq!(json["right"], 4.0);
        assert_eq!(json["arguments"]["leaves"], 3);
        assert!(json.get("contents").is_none());
    }

    #[test]
    fn placeholder_only_for_default() {
        assert!(GeneratedNode::default().is_placeholder());
        let named = GeneratedNode {
            title: "Rock".to_string(),
            ..Default::default()
        };
        assert!(!named.is_placeholder());
    }

    #[test]
    fn bounds_round_trip_through_node() {
        let mut node = GeneratedNode::default();
        let p = Position::new(5.0, 6.0, 1.0, 2.0);
        node.set_bounds(&p);
        assert_eq!(node.bounds(), p);
    }
}

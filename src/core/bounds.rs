/// Bounding-box aggregation over sibling placements.
use crate::schema::node::{GeneratedLayout, GeneratedNode};
use crate::schema::position::Position;

/// The union box of `children`: top/right maxima, bottom/left minima.
///
/// `None` for an empty list. The fold stops at the first placeholder
/// node and keeps whatever was accumulated before it.
pub fn wrap_extremes(children: &[GeneratedNode]) -> Option<Position> {
    let (first, rest) = children.split_first()?;
    let mut bounds = first.bounds();
    for child in rest {
        if child.is_placeholder() {
            break;
        }
        bounds.top = bounds.top.max(child.top);
        bounds.right = bounds.right.max(child.right);
        bounds.bottom = bounds.bottom.min(child.bottom);
        bounds.left = bounds.left.min(child.left);
    }
    Some(bounds)
}

/// Fold placed siblings into the unnamed layout box their parent becomes.
pub fn wrap_choice_position_extremes(children: Vec<GeneratedNode>) -> Option<GeneratedLayout> {
    let bounds = wrap_extremes(&children)?;
    Some(GeneratedLayout { bounds, children })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(title: &str, top: f64, right: f64, bottom: f64, left: f64) -> GeneratedNode {
        GeneratedNode {
            title: title.to_string(),
            top,
            right,
            bottom,
            left,
            width: right - left,
            height: top - bottom,
            ..Default::default()
        }
    }

    #[test]
    fn empty_is_none() {
        assert!(wrap_choice_position_extremes(Vec::new()).is_none());
    }

    #[test]
    fn singleton_keeps_box() {
        let a = node("a", 7.0, 9.0, 2.0, 3.0);
        let layout = wrap_choice_position_extremes(vec![a.clone()]).unwrap();
        assert_eq!(layout.bounds, a.bounds());
        assert_eq!(layout.children, vec![a]);
    }

    #[test]
    fn pair_takes_extremes() {
        let a = node("a", 10.0, 5.0, 2.0, 0.0);
        let b = node("b", 6.0, 12.0, -1.0, 4.0);
        let bounds = wrap_extremes(&[a, b]).unwrap();
        assert_eq!(bounds, Position::new(10.0, 12.0, -1.0, 0.0));
        assert_eq!(bounds.width(), 12.0);
        assert_eq!(bounds.height(), 11.0);
    }

    #[test]
    fn placeholder_stops_the_fold() {
        let a = node("a", 4.0, 4.0, 0.0, 0.0);
        let b = node("b", 20.0, 20.0, 0.0, 0.0);
        let layout =
            wrap_choice_position_extremes(vec![a.clone(), GeneratedNode::default(), b]).unwrap();
        assert_eq!(layout.bounds, a.bounds());
        // Children are kept even when the fold stopped early
        assert_eq!(layout.children.len(), 3);
    }
}

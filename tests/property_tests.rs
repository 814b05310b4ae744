//! Property-based tests using proptest
//!
//! Invariants that must hold for all inputs:
//! - Spacing: same seed → same gaps, always inside the configured range
//! - Aggregation: the union box holds every sibling
//! - Packing: Certain keeps exact gaps; generation stays inside its start box

use possibility_engine::core::bounds::wrap_choice_position_extremes;
use possibility_engine::core::catalog::PossibilityCatalog;
use possibility_engine::core::choice::choose_among;
use possibility_engine::core::generator::LayoutGenerator;
use possibility_engine::core::random::{random_between, SequenceSource};
use possibility_engine::core::spacing::resolve_spacing;
use possibility_engine::schema::node::GeneratedNode;
use possibility_engine::schema::position::{Direction, Position};
use possibility_engine::schema::possibility::{Choice, Contents, Mode, Possibility, Spacing};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn node_strategy() -> impl Strategy<Value = GeneratedNode> {
    (-100i32..100, -100i32..100, 1i32..50, 1i32..50).prop_map(|(left, bottom, w, h)| {
        GeneratedNode {
            title: "n".to_string(),
            left: left as f64,
            bottom: bottom as f64,
            right: (left + w) as f64,
            top: (bottom + h) as f64,
            width: w as f64,
            height: h as f64,
            ..Default::default()
        }
    })
}

// ============================================================
// Spacing
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_spacing_is_deterministic(seed in any::<u64>(), min in 0u32..50, span in 0u32..50) {
        let spacing = Spacing::Range(min as f64, (min + span) as f64);
        let mut a = StdRng::seed_from_u64(seed);
        let mut b = StdRng::seed_from_u64(seed);
        for _ in 0..10 {
            let x = resolve_spacing(&spacing, &mut a).unwrap();
            let y = resolve_spacing(&spacing, &mut b).unwrap();
            prop_assert_eq!(x, y);
            prop_assert!(x >= min as f64 && x <= (min + span) as f64, "gap {} outside range", x);
            prop_assert_eq!(x.fract(), 0.0);
        }
    }

    #[test]
    fn prop_random_between_stays_inclusive(r in 0.0f64..1.0, min in -50i32..50, span in 0i32..50) {
        let max = min + span;
        let mut source = SequenceSource::constant(r);
        let value = random_between(&mut source, min as f64, max as f64);
        prop_assert!(value >= min as f64 && value <= max as f64);
    }

    #[test]
    fn prop_full_weights_always_pick(seed in any::<u64>(), first in 0u32..=100) {
        let choices = vec![
            Choice::known("a").with_percent(first),
            Choice::known("b").with_percent(100 - first),
        ];
        let mut random = StdRng::seed_from_u64(seed);
        prop_assert!(choose_among(&choices, &mut random).is_some());
    }
}

// ============================================================
// Aggregation
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_union_box_holds_every_child(nodes in prop::collection::vec(node_strategy(), 1..12)) {
        let layout = wrap_choice_position_extremes(nodes.clone()).unwrap();
        let b = layout.bounds;
        for n in &nodes {
            prop_assert!(b.left <= n.left && b.right >= n.right);
            prop_assert!(b.bottom <= n.bottom && b.top >= n.top);
        }
        let max_top = nodes.iter().map(|n| n.top).fold(f64::MIN, f64::max);
        let min_left = nodes.iter().map(|n| n.left).fold(f64::MAX, f64::min);
        prop_assert_eq!(b.top, max_top);
        prop_assert_eq!(b.left, min_left);
        prop_assert_eq!(layout.children, nodes);
    }
}

// ============================================================
// Packing
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_certain_keeps_exact_gaps(
        widths in prop::collection::vec(1u32..10, 1..8),
        gap in 0u32..5,
    ) {
        let mut catalog = PossibilityCatalog::default();
        let mut children = Vec::new();
        for (i, w) in widths.iter().enumerate() {
            let title = format!("Block{}", i);
            catalog.insert(Possibility::leaf(&title, *w as f64, 1.0));
            children.push(Choice::known(&title));
        }
        let mut contents = Contents::new(Mode::Certain, children);
        contents.direction = Some(Direction::Right);
        contents.spacing = Spacing::Constant(gap as f64);
        catalog.insert(Possibility::leaf("Strip", 200.0, 1.0).with_contents(contents));

        let mut generator = LayoutGenerator::builder()
            .with_catalog(catalog)
            .seed(0)
            .build()
            .unwrap();
        let layout = generator.generate("Strip", None).unwrap().unwrap();
        prop_assert_eq!(layout.children.len(), widths.len());
        prop_assert_eq!(layout.children[0].left, 0.0);
        for pair in layout.children.windows(2) {
            prop_assert_eq!(pair[1].left - pair[0].right, gap as f64);
        }
    }

    #[test]
    fn prop_village_stays_inside_start(seed in any::<u64>(), extra_w in 0u32..16, extra_h in 0u32..8) {
        let start = Position::new(12.0 + extra_h as f64, 24.0 + extra_w as f64, 0.0, 0.0);
        let mut generator = LayoutGenerator::builder()
            .catalog_file(Path::new("tests/fixtures/test_catalog.ron"))
            .seed(seed)
            .build()
            .unwrap();
        generator.generate_full("Village", Some(start)).unwrap();
        for node in generator.generated_commands() {
            prop_assert!(node.left >= start.left && node.right <= start.right, "{:?}", node);
            prop_assert!(node.bottom >= start.bottom && node.top <= start.top, "{:?}", node);
        }
    }
}

/// Catalog integration tests: fixture loading, merging and validation.

use possibility_engine::core::catalog::{CatalogError, PossibilityCatalog, Severity};
use possibility_engine::schema::position::Direction;
use possibility_engine::schema::possibility::{Arguments, ChoiceKind, Mode, Spacing};
use std::path::Path;

#[test]
fn ron_fixture_loads_every_possibility() {
    let catalog =
        PossibilityCatalog::load_from_file(Path::new("tests/fixtures/test_catalog.ron")).unwrap();

    for name in ["Room", "Tile", "Hallway", "Market", "Village", "Fence", "Loop"] {
        assert!(catalog.contains(name), "missing {}", name);
    }

    let room = catalog.get("Room").unwrap();
    let contents = room.contents.as_ref().unwrap();
    assert_eq!(contents.mode, Mode::Certain);
    assert_eq!(contents.direction, Some(Direction::Right));
    assert_eq!(
        contents.children[0].kind,
        ChoiceKind::Final {
            source: "Tile".to_string()
        }
    );

    let village = catalog.get("Village").unwrap().contents.as_ref().unwrap();
    assert_eq!(village.spacing, Spacing::Range(0.0, 2.0));

    let ledge = catalog.get("Ledge").unwrap().contents.as_ref().unwrap();
    assert_eq!(ledge.snap, Some(Direction::Top));

    let shore = catalog.get("Shore").unwrap().contents.as_ref().unwrap();
    assert!(shore.children[0].stretch.width);
    assert!(!shore.children[0].stretch.height);

    let row = catalog.get("Row").unwrap().contents.as_ref().unwrap();
    assert_eq!(row.limit, Some(8));
    assert!(matches!(row.children[0].arguments, Some(Arguments::Weighted(ref w)) if w.len() == 2));
}

#[test]
fn json_fixture_loads() {
    let catalog =
        PossibilityCatalog::load_from_file(Path::new("tests/fixtures/test_catalog.json")).unwrap();
    assert_eq!(catalog.names(), vec!["AppleTree", "Orchard", "Stall"]);
    let orchard = catalog.get("Orchard").unwrap().contents.as_ref().unwrap();
    assert_eq!(orchard.mode, Mode::Repeat);
    assert_eq!(orchard.spacing, Spacing::Constant(1.0));
}

#[test]
fn directory_load_merges_in_name_order() {
    let catalog = PossibilityCatalog::load_from_dir(Path::new("tests/fixtures")).unwrap();
    assert!(catalog.contains("Orchard"));
    assert!(catalog.contains("Village"));
    // test_catalog.ron sorts after test_catalog.json and wins
    assert_eq!(catalog.get("Stall").unwrap().width, 3.0);
}

#[test]
fn tree_load_records_broken_files_and_keeps_going() {
    let load = PossibilityCatalog::load_tree(Path::new("tests/fixtures/mixed"));

    assert!(!load.is_clean());
    assert_eq!(load.failures.len(), 1);
    let (path, err) = &load.failures[0];
    assert!(path.ends_with("b_broken.ron"));
    assert!(matches!(err, CatalogError::Ron(_)));

    // Files on either side of the broken one, including nested ones, still load
    assert_eq!(load.loaded.len(), 2);
    assert!(load.loaded[1].ends_with("nested/c_valid.json"));
    assert!(load.catalog.contains("Post"));
    assert!(load.catalog.contains("Rail"));
}

#[test]
fn tree_load_of_missing_dir_is_a_failure() {
    let load = PossibilityCatalog::load_tree(Path::new("tests/fixtures/absent"));
    assert!(load.catalog.is_empty());
    assert_eq!(load.failures.len(), 1);
    assert!(matches!(load.failures[0].1, CatalogError::Io(_)));
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = PossibilityCatalog::load_from_file(Path::new("Cargo.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedFile(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = PossibilityCatalog::load_from_file(Path::new("tests/fixtures/absent.ron")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn ron_syntax_error_is_reported() {
    let err = PossibilityCatalog::parse_ron(r#"{ "Broken": (width: 1, height: }"#).unwrap_err();
    assert!(matches!(err, CatalogError::Ron(_)));
}

#[test]
fn fixture_validation_findings() {
    let catalog =
        PossibilityCatalog::load_from_file(Path::new("tests/fixtures/test_catalog.ron")).unwrap();
    let issues = catalog.validate();

    let errors: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].possibility, "Loop");
    assert!(errors[0].message.contains("infinite recursion"));

    let warned: Vec<&str> = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .map(|i| i.possibility.as_str())
        .collect();
    assert!(!warned.contains(&"Ledge"));
    assert!(warned.contains(&"Stand"));
    assert!(warned.contains(&"Drift"));
    assert!(!warned.contains(&"Village"));

    let shown = errors[0].to_string();
    assert!(shown.starts_with("ERROR: 'Loop'"));
}

#[test]
fn validation_flags_missing_final_source() {
    let json = r#"{
        "Room": {"width": 4, "height": 4, "contents": {"mode": "Certain", "direction": "right",
            "children": [{"title": "Floor", "type": "Final", "source": "Marble"}]}}
    }"#;
    let catalog = PossibilityCatalog::parse_json(json).unwrap();
    let issues = catalog.validate();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert!(issues[0].message.contains("'Marble'"));
}

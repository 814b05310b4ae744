/// Catalog Linter: validates possibility references and layout rules.
///
/// Usage: catalog_linter <catalog_file_or_dir> [--strict]
///
/// `--strict` also fails on warnings.

use possibility_engine::core::catalog::{CatalogIssue, PossibilityCatalog, Severity};
use possibility_engine::logging::init_tracing_default;
use std::path::Path;
use std::process;

fn main() {
    init_tracing_default();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog_file_or_dir> [--strict]");
        process::exit(0);
    }

    let catalog_path = Path::new(&args[1]);
    let strict = args[2..].iter().any(|a| a == "--strict");

    let mut catalog = PossibilityCatalog::default();
    let mut load_failures = 0;
    if catalog_path.is_file() {
        match PossibilityCatalog::load_from_file(catalog_path) {
            Ok(loaded) => catalog.merge(loaded),
            Err(e) => {
                eprintln!("ERROR: Failed to load catalog file: {}", e);
                process::exit(1);
            }
        }
    } else if catalog_path.is_dir() {
        let load = PossibilityCatalog::load_tree(catalog_path);
        for path in &load.loaded {
            println!("  Loaded: {}", path.display());
        }
        for (path, e) in &load.failures {
            eprintln!("  ERROR loading {}: {}", path.display(), e);
        }
        load_failures = load.failures.len();
        catalog = load.catalog;
    } else {
        eprintln!("ERROR: Path '{}' does not exist", catalog_path.display());
        process::exit(1);
    }

    println!("Loaded {} possibilities", catalog.len());

    let issues = catalog.validate();
    let (errors, warnings): (Vec<&CatalogIssue>, Vec<&CatalogIssue>) = issues
        .iter()
        .partition(|issue| issue.severity == Severity::Error);

    println!("\n=== Catalog Lint Report ===\n");

    if issues.is_empty() && load_failures == 0 {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("{}", warning);
    }

    for error in &errors {
        println!("{}", error);
    }

    println!(
        "\nSummary: {} files failed to load, {} errors, {} warnings",
        load_failures,
        errors.len(),
        warnings.len()
    );

    if load_failures == 0 && errors.is_empty() && !(strict && !warnings.is_empty()) {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Layout Preview: expand one possibility and print its placements.
///
/// Usage: layout_preview --catalog <path> --name <possibility> [--seed <n>]
///                       [--bounds <top,right,bottom,left>] [--json] [--verbose]
///
/// `--catalog` may be given more than once and accepts files or
/// directories; later catalogs override earlier ones.

use possibility_engine::core::generator::LayoutGenerator;
use possibility_engine::logging::{init_tracing, LogLevel, TracingConfig};
use possibility_engine::schema::node::{GeneratedLayout, GeneratedNode};
use possibility_engine::schema::position::Position;
use std::path::Path;
use std::process;

fn print_usage() {
    println!("Usage: layout_preview --catalog <path> --name <possibility> [--seed <n>]");
    println!("                      [--bounds <top,right,bottom,left>] [--json] [--verbose]");
}

fn parse_bounds(raw: &str) -> Option<Position> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [top, right, bottom, left] => Some(Position::new(*top, *right, *bottom, *left)),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut catalogs: Vec<String> = Vec::new();
    let mut name = None;
    let mut seed: u64 = 42;
    let mut bounds = None;
    let mut json = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalogs.push(args[i].clone());
            }
            "--name" if i + 1 < args.len() => {
                i += 1;
                name = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--bounds" if i + 1 < args.len() => {
                i += 1;
                match parse_bounds(&args[i]) {
                    Some(b) => bounds = Some(b),
                    None => {
                        eprintln!("Invalid bounds '{}', expected top,right,bottom,left", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--json" => json = true,
            "--verbose" | "-v" => verbose = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if verbose {
        init_tracing(&TracingConfig::verbose(LogLevel::Debug));
    } else {
        init_tracing(&TracingConfig::default());
    }

    let Some(name) = name else {
        eprintln!("Missing --name");
        print_usage();
        process::exit(1);
    };
    if catalogs.is_empty() {
        eprintln!("Missing --catalog");
        print_usage();
        process::exit(1);
    }

    let mut builder = LayoutGenerator::builder().seed(seed);
    for path in &catalogs {
        builder = if Path::new(path).is_dir() {
            builder.catalog_dir(path)
        } else {
            builder.catalog_file(path)
        };
    }
    let mut generator = match builder.build() {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let layout = match generator.generate_full(&name, bounds) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if json {
        match generator.commands().to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Possibility: {}", name);
    println!("Seed: {}", seed);
    match &layout {
        Some(layout) => {
            println!(
                "Bounds: top {} right {} bottom {} left {} ({} x {})\n",
                layout.bounds.top,
                layout.bounds.right,
                layout.bounds.bottom,
                layout.bounds.left,
                layout.width(),
                layout.height()
            );
            print_tree(layout, 0);
        }
        None => println!("Nothing generated (empty contents or limit exceeded)"),
    }

    let commands = generator.generated_commands();
    println!("\n{} placement commands:", commands.len());
    for command in commands {
        println!("  {}", describe(command));
    }
}

fn describe(node: &GeneratedNode) -> String {
    let mut line = format!(
        "{} [{}, {}]..[{}, {}]",
        node.title, node.left, node.bottom, node.right, node.top
    );
    if let Some(arguments) = &node.arguments {
        let pairs: Vec<String> = arguments
            .iter()
            .map(|(k, v)| format!("{}={}", k, serde_json::to_string(v).unwrap_or_default()))
            .collect();
        line.push_str(&format!(" {{{}}}", pairs.join(", ")));
    }
    line
}

fn print_tree(layout: &GeneratedLayout, depth: usize) {
    let indent = "  ".repeat(depth);
    for child in &layout.children {
        println!("{}{:?} {}", indent, child.kind, describe(child));
        if let Some(contents) = &child.contents {
            print_tree(contents, depth + 1);
        }
    }
}

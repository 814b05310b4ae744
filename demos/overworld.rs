/// Overworld example: lays out a side-on level strip and draws it.
///
/// Ground band at the bottom, a surface of bushes, rocks, trees and huts
/// (huts expand into walls and a door), and a sky of clouds and birds with
/// clouds snapped to the top of their band.
///
/// Run with: cargo run --example overworld [seed]

use possibility_engine::core::generator::LayoutGenerator;
use possibility_engine::logging::init_tracing_default;
use possibility_engine::schema::node::GeneratedNode;

const MAP_WIDTH: usize = 96;
const MAP_HEIGHT: usize = 16;

fn glyph(title: &str) -> char {
    match title {
        "Ground" => '=',
        "Bush" => '*',
        "Rock" => 'o',
        "Tree" => 'T',
        "HutWall" => '|',
        "Door" => 'D',
        "Cloud" => '~',
        "Bird" => 'v',
        _ => '?',
    }
}

/// Paint one command's nominal footprint, anchored at its bottom-left.
fn paint(map: &mut [Vec<char>], node: &GeneratedNode) {
    let c = glyph(&node.title);
    let left = node.left.max(0.0) as usize;
    let bottom = node.bottom.max(0.0) as usize;
    let right = ((node.left + node.width).min(node.right).max(0.0) as usize).min(MAP_WIDTH);
    let top = ((node.bottom + node.height).min(node.top).max(0.0) as usize).min(MAP_HEIGHT);
    for y in bottom..top {
        let row = MAP_HEIGHT - 1 - y;
        for cell in &mut map[row][left.min(MAP_WIDTH)..right] {
            *cell = c;
        }
    }
}

fn main() {
    init_tracing_default();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1985);

    let mut generator = LayoutGenerator::builder()
        .catalog_file("catalog_data/overworld.ron")
        .seed(seed)
        .on_placement(|commands| {
            let mut map = vec![vec![' '; MAP_WIDTH]; MAP_HEIGHT];
            for node in commands {
                paint(&mut map, node);
            }
            for row in &map {
                println!("{}", row.iter().collect::<String>());
            }
        })
        .build()
        .expect("Failed to build generator");

    println!("=== Overworld (seed {}) ===\n", seed);

    let layout = generator
        .generate_full("Overworld", None)
        .expect("Failed to generate overworld");

    generator.run_generated_commands();

    // --- Summary ---
    let commands = generator.generated_commands();
    println!("\n{} placements", commands.len());
    if let Some(layout) = layout {
        println!(
            "Occupied box: {} x {} (left {}, bottom {})",
            layout.width(),
            layout.height(),
            layout.bounds.left,
            layout.bounds.bottom
        );
    }

    let huts = commands.iter().filter(|c| c.title == "Door").count();
    println!("Huts: {}", huts);
    for door in commands.iter().filter(|c| c.title == "Door") {
        if let Some(color) = door.arguments.as_ref().and_then(|a| a.get("color")) {
            println!("  door at x={} painted {:?}", door.left, color);
        }
    }
}

//! WASM bindings for possibility-engine: powers the in-browser level seeder.

use wasm_bindgen::prelude::*;

use possibility_engine::core::catalog::{PossibilityCatalog, Severity};
use possibility_engine::core::generator::LayoutGenerator;
use possibility_engine::schema::position::Position;

// ---------------------------------------------------------------------------
// Embedded catalog data: compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const OVERWORLD_CATALOG: &str = include_str!("../../catalog_data/overworld.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize)]
struct BoundsInput {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

#[derive(serde::Serialize)]
struct IssueInfo {
    severity: &'static str,
    possibility: String,
    message: String,
}

fn parse_bounds(bounds_json: Option<String>) -> Result<Option<Position>, JsError> {
    bounds_json
        .map(|json| {
            let b: BoundsInput = serde_json::from_str(&json)
                .map_err(|e| JsError::new(&format!("Invalid bounds JSON: {e}")))?;
            Ok(Position::new(b.top, b.right, b.bottom, b.left))
        })
        .transpose()
}

fn build_generator(catalog: PossibilityCatalog, seed: u64) -> Result<LayoutGenerator, JsError> {
    LayoutGenerator::builder()
        .with_catalog(catalog)
        .seed(seed)
        .build()
        .map_err(|e| JsError::new(&format!("Generator build error: {e}")))
}

// ---------------------------------------------------------------------------
// Seeder
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct Seeder {
    generator: LayoutGenerator,
}

#[wasm_bindgen]
impl Seeder {
    /// Create a seeder from a JSON catalog (name → possibility).
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, seed: u64) -> Result<Seeder, JsError> {
        let catalog = PossibilityCatalog::parse_json(catalog_json)
            .map_err(|e| JsError::new(&format!("Catalog parse error: {e}")))?;
        Ok(Seeder {
            generator: build_generator(catalog, seed)?,
        })
    }

    /// A seeder over the bundled overworld catalog.
    pub fn overworld(seed: u64) -> Result<Seeder, JsError> {
        let catalog = PossibilityCatalog::parse_ron(data::OVERWORLD_CATALOG)
            .map_err(|e| JsError::new(&format!("Catalog parse error: {e}")))?;
        Ok(Seeder {
            generator: build_generator(catalog, seed)?,
        })
    }

    /// Expand `name` and return the whole layout tree as JSON (`null` when
    /// nothing was generated).
    ///
    /// `bounds_json` is optional: `{"top": 16, "right": 96, "bottom": 0, "left": 0}`.
    pub fn generate_json(
        &mut self,
        name: &str,
        bounds_json: Option<String>,
    ) -> Result<String, JsError> {
        let bounds = parse_bounds(bounds_json)?;
        let layout = self
            .generator
            .generate(name, bounds)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&layout).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Expand `name` and return only the flattened placement commands.
    /// Each call starts from an empty command list.
    pub fn generate_commands_json(
        &mut self,
        name: &str,
        bounds_json: Option<String>,
    ) -> Result<String, JsError> {
        let bounds = parse_bounds(bounds_json)?;
        self.generator.clear_generated_commands();
        self.generator
            .generate_full(name, bounds)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(self.generator.generated_commands())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Names of every possibility in the catalog as a JSON array.
    pub fn possibilities(&self) -> String {
        serde_json::to_string(&self.generator.catalog().names()).unwrap_or_default()
    }

    /// Catalog lint findings as a JSON array.
    pub fn validate_json(&self) -> String {
        let issues: Vec<IssueInfo> = self
            .generator
            .catalog()
            .validate()
            .into_iter()
            .map(|issue| IssueInfo {
                severity: match issue.severity {
                    Severity::Warning => "warning",
                    Severity::Error => "error",
                },
                possibility: issue.possibility,
                message: issue.message,
            })
            .collect();
        serde_json::to_string(&issues).unwrap_or_default()
    }

    /// Reseed, keeping the catalog.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let catalog = self.generator.catalog().clone();
        self.generator = build_generator(catalog, seed)?;
        Ok(())
    }
}

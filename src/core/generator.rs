/// The top-level layout generator: catalog, random source, command buffer
/// and placement callback behind one facade.
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::{CatalogError, PossibilityCatalog};
use crate::core::commands::CommandBuffer;
use crate::core::layout::{Expander, LayoutError, DEFAULT_MAX_DEPTH};
use crate::core::random::RandomSource;
use crate::schema::node::{GeneratedLayout, GeneratedNode};
use crate::schema::position::Position;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives the collected commands from [`LayoutGenerator::run_generated_commands`].
pub type PlacementCallback = Box<dyn FnMut(&[GeneratedNode])>;

/// Built via `LayoutGenerator::builder()`.
pub struct LayoutGenerator {
    catalog: PossibilityCatalog,
    random: Box<dyn RandomSource>,
    commands: CommandBuffer,
    on_placement: Option<PlacementCallback>,
    max_depth: usize,
}

/// Builder for constructing a `LayoutGenerator`.
pub struct LayoutGeneratorBuilder {
    catalog: Option<PossibilityCatalog>,
    catalog_files: Vec<PathBuf>,
    catalog_dirs: Vec<PathBuf>,
    seed: Option<u64>,
    random: Option<Box<dyn RandomSource>>,
    on_placement: Option<PlacementCallback>,
    max_depth: usize,
}

impl LayoutGenerator {
    pub fn builder() -> LayoutGeneratorBuilder {
        LayoutGeneratorBuilder {
            catalog: None,
            catalog_files: Vec::new(),
            catalog_dirs: Vec::new(),
            seed: None,
            random: None,
            on_placement: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Expand `name` into a layout tree.
    ///
    /// `start` defaults to a box of the possibility's own size anchored at
    /// the origin. `None` means nothing was placed (or a Random-mode limit
    /// was exceeded).
    pub fn generate(
        &mut self,
        name: &str,
        start: Option<Position>,
    ) -> Result<Option<GeneratedLayout>, LayoutError> {
        let start = match start {
            Some(start) => start,
            None => {
                let possibility = self.catalog.require(name)?;
                Position::from_size(possibility.width, possibility.height)
            }
        };
        let mut expander =
            Expander::new(&self.catalog, &mut *self.random).with_max_depth(self.max_depth);
        expander.expand(name, start, None, 0)
    }

    /// [`generate`](Self::generate), then append every terminal placement
    /// of the result to the command buffer.
    pub fn generate_full(
        &mut self,
        name: &str,
        start: Option<Position>,
    ) -> Result<Option<GeneratedLayout>, LayoutError> {
        let layout = self.generate(name, start)?;
        let before = self.commands.len();
        if let Some(layout) = &layout {
            self.commands.collect(layout);
        }
        tracing::info!(
            possibility = name,
            collected = self.commands.len() - before,
            total = self.commands.len(),
            "generated layout"
        );
        Ok(layout)
    }

    pub fn clear_generated_commands(&mut self) {
        self.commands.clear();
    }

    /// Hand the buffered commands to the placement callback. The buffer is
    /// left as is.
    pub fn run_generated_commands(&mut self) {
        match self.on_placement.as_mut() {
            Some(callback) => callback(self.commands.as_slice()),
            None => tracing::debug!(
                commands = self.commands.len(),
                "no placement callback registered"
            ),
        }
    }

    pub fn generated_commands(&self) -> &[GeneratedNode] {
        self.commands.as_slice()
    }

    pub fn commands(&self) -> &CommandBuffer {
        &self.commands
    }

    pub fn catalog(&self) -> &PossibilityCatalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: PossibilityCatalog) {
        self.catalog = catalog;
    }

    pub fn set_on_placement<F>(&mut self, callback: F)
    where
        F: FnMut(&[GeneratedNode]) + 'static,
    {
        self.on_placement = Some(Box::new(callback));
    }
}

impl LayoutGeneratorBuilder {
    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: PossibilityCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Merge a `.ron` or `.json` catalog file over whatever came before.
    pub fn catalog_file(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every catalog file in a directory.
    pub fn catalog_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_dirs.push(path.as_ref().to_path_buf());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use `random` for every draw. Takes precedence over `seed`.
    pub fn with_random<R: RandomSource + 'static>(mut self, random: R) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    pub fn on_placement<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[GeneratedNode]) + 'static,
    {
        self.on_placement = Some(Box::new(callback));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Result<LayoutGenerator, GeneratorError> {
        let mut catalog = self.catalog.unwrap_or_default();

        for path in &self.catalog_files {
            catalog.merge(PossibilityCatalog::load_from_file(path)?);
        }

        for dir in &self.catalog_dirs {
            if !dir.is_dir() {
                return Err(GeneratorError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("catalog directory not found: {}", dir.display()),
                )));
            }
            catalog.merge(PossibilityCatalog::load_from_dir(dir)?);
        }

        let random: Box<dyn RandomSource> = match (self.random, self.seed) {
            (Some(random), _) => random,
            (None, Some(seed)) => Box::new(StdRng::seed_from_u64(seed)),
            (None, None) => Box::new(StdRng::from_entropy()),
        };

        tracing::debug!(
            possibilities = catalog.len(),
            max_depth = self.max_depth,
            "built layout generator"
        );

        Ok(LayoutGenerator {
            catalog,
            random,
            commands: CommandBuffer::new(),
            on_placement: self.on_placement,
            max_depth: self.max_depth,
        })
    }
}

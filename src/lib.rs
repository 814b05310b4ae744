//! Possibility Engine: schema-driven procedural layout for games.
//!
//! Recursively expands named "possibilities" from a catalog into a tree
//! of positioned boxes, ending in inert placement commands that a game
//! turns into live objects.

pub mod core;
pub mod logging;
pub mod schema;

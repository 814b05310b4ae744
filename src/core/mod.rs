pub mod bounds;
pub mod catalog;
pub mod choice;
pub mod commands;
pub mod generator;
pub mod layout;
pub mod random;
pub mod spacing;

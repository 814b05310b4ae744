pub mod node;
pub mod position;
pub mod possibility;
pub mod value;

// src/outline/mod.rs
pub mod models;
pub mod tree;

pub use models::HeadingNode;
pub use tree::build;

//! Document format adapters

pub mod text;

//! Trait Forge - Character creation trait engine (banes and boons)

pub mod catalog;
pub mod core;
pub mod selection;

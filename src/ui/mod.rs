// src/ui/mod.rs
pub mod charts;
pub mod header;
pub mod map;
pub mod palette;
pub mod stats;

//! Presentation layer: sidebar controls and the three chart views.

pub mod map;
pub mod panels;
pub mod scatter;
pub mod treemap;

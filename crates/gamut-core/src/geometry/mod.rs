//! Chroma-plane geometry: points, convex hull, and display mapping.

pub mod ab;
pub mod coords;
pub mod hull;

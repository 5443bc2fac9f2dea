//! Distances and travel times between instance nodes.

mod matrix;

pub use matrix::DistanceMatrix;

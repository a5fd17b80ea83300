//! Numeric restoration passes for the OpenCTM compressed mesh format.
//!
//! The compressed tiers of the format store mesh data as delta-coded,
//! quantized, or spherical-coded integers. This crate provides the pure
//! transforms that turn those integers back into triangle indices, vertex
//! positions, normals, and per-vertex map channels. All functions are
//! synchronous and side-effect free; the file layer in the `openctm` crate
//! drives them.
//!
//! # Key functions
//!
//! - [`restore_indices`]: undo per-triangle index delta coding
//! - [`restore_grid_indices`]: prefix-sum delta-coded grid cell indices
//! - [`restore_vertices`]: dequantize positions against a [`Grid`]
//! - [`smooth_normals`] / [`restore_normals`]: rebuild per-vertex normals
//! - [`restore_map`]: zigzag-decode UV and attribute channels

mod error;

pub mod grid;
pub mod indices;
pub mod maps;
pub mod normals;

pub use error::{DecodeError, DecodeResult};
pub use grid::{Grid, restore_grid_indices, restore_vertices};
pub use indices::restore_indices;
pub use maps::restore_map;
pub use normals::{normal_basis, restore_normals, smooth_normals};

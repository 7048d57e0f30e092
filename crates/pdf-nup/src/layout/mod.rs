//! Layout calculation modules for N-up
//!
//! This module handles all the geometric calculations for tiling:
//! - Geometry engine (sizes, cell rectangles, fit transforms)
//! - Cell fill order per direction

mod geometry;
mod order;
mod types;

pub use geometry::*;
pub use order::*;
pub use types::*;

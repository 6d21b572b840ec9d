//! Orbit View Core - transform and intersection math for the orbital diagram
//!
//! Stateless numerical building blocks consumed by a renderer: homogeneous
//! transformation matrices, line/circle intersection, and the per-frame
//! scene layout built from both.

pub mod error;
pub mod intersect;
pub mod matrix;
pub mod scene;

// Re-export commonly used types
pub use error::{Axis, Error, Result};
pub use intersect::{find_arc_intersections, find_intersections, polar_angle, Arc};
pub use matrix::Matrix;
pub use nalgebra::Point2;
pub use scene::{advance_angle, layout_scene, wrap_degrees, Disc, SceneConfig, SceneLayout};

//! **jpsp-core**: geometry and compass types shared by the JPS+ crates.
//!
//! This crate provides integer points and rectangles ([`Point`], [`Range`])
//! and the eight-way [`Direction`] ring with its relative rotations.

pub mod direction;
pub mod geom;

pub use direction::{Direction, DirectionSet};
pub use geom::{Point, Range};

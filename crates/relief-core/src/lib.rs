//! **relief-core** — Shared types for terrain sampling and routing.
//!
//! This crate provides the foundational types used across the *relief*
//! workspace: [`GridPoint`], a 3D sample point, and [`PointGrid`], an
//! ordered row-major sequence of sample points with a validated square
//! layout.

pub mod grid;
pub mod point;

pub use grid::{GridError, PointGrid};
pub use point::GridPoint;

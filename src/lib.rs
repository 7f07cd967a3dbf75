//! Interactive decision-surface visualizer for SVM-style solvers
//!
//! Training points are collected on a pixel canvas, encoded into a
//! normalized problem, handed to a solver behind the [`Solver`] trait, and
//! the resulting model is painted back onto the canvas as a per-pixel
//! classification surface or a regression curve with an epsilon tube.
//!
//! [`Solver`]: crate::core::traits::Solver

pub mod canvas;
pub mod config;
pub mod core;
pub mod data;
pub mod render;
pub mod session;
pub mod solver;

// Re-export main types for convenience
pub use crate::canvas::{Canvas, Palette, Rgb};
pub use crate::config::SessionConfig;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{Result, SvmToyError};
pub use crate::data::{encode, PointStore};
pub use crate::render::{RenderStats, SurfaceRenderer};
pub use crate::session::{Session, TrainReport};
pub use crate::solver::{ReferenceSolver, SolverParams};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

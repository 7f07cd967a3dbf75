//! Solver bindings
//!
//! The pipeline only knows the [`Solver`](crate::core::traits::Solver)
//! capability trait; this module holds concrete bindings. The reference
//! binding keeps the crate runnable without an external SVM library.

pub mod reference;

pub use self::reference::*;

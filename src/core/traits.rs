//! Seam traits for the external solver collaborator

use crate::core::{ModelKind, Problem, Result};

/// Capability surface of the training/prediction collaborator.
///
/// The parameter string passed to [`train`](Solver::train) is an opaque,
/// solver-specific configuration blob; this crate never interprets it.
/// Coordinates given to [`predict`](Solver::predict) are in the same
/// normalized `[0, 1)` domain used for training.
pub trait Solver {
    /// Opaque handle produced by training
    type Model;

    /// Fit a model to the problem, or report a malformed parameter string
    /// or a failed optimization
    fn train(&self, problem: &Problem, params: &str) -> Result<Self::Model>;

    /// Query the model at a normalized coordinate. Returns a class index
    /// for classification families and a real value for regression ones.
    fn predict(&self, model: &Self::Model, x: f64, y: f64) -> Result<f64>;

    /// Model family; pure query, no side effects
    fn kind(&self, model: &Self::Model) -> ModelKind;

    /// Regression tolerance band half-width. Meaningless for
    /// classification families; callers must not interpret it there.
    fn epsilon(&self, model: &Self::Model) -> f64;

    /// Release the model's resources. Called exactly once per trained
    /// model, after all predictions against it are complete.
    fn release(&self, model: Self::Model) {
        drop(model);
    }
}

/// Single-owner, single-use-window guard for a trained model.
///
/// Training and release are tied to one lexical scope: the model is
/// released when the guard drops, including on error paths out of a
/// render pass. This is what keeps every `train` paired with exactly one
/// `release` across repeated cycles.
pub struct ScopedModel<'a, S: Solver> {
    solver: &'a S,
    model: Option<S::Model>,
}

impl<'a, S: Solver> ScopedModel<'a, S> {
    /// Train a model and take ownership of the handle for this scope
    pub fn train(solver: &'a S, problem: &Problem, params: &str) -> Result<Self> {
        let model = solver.train(problem, params)?;
        Ok(Self {
            solver,
            model: Some(model),
        })
    }

    /// Borrow the model for prediction queries
    pub fn model(&self) -> &S::Model {
        // Only vacated in drop, which ends the borrow.
        self.model.as_ref().expect("model outlives its guard")
    }
}

impl<S: Solver> Drop for ScopedModel<'_, S> {
    fn drop(&mut self) {
        if let Some(model) = self.model.take() {
            self.solver.release(model);
        }
    }
}

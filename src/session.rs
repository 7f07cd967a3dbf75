//! Interactive session driving the full pipeline
//!
//! One [`Session`] owns everything the UI shell used to keep in free
//! global state: the current palette color, the point store, the canvas,
//! and the solver binding. Shell events map to method calls.
//!
//! # Quick Start
//!
//! ```rust
//! use svm_toy::{ReferenceSolver, Session, SessionConfig};
//!
//! # fn main() -> svm_toy::Result<()> {
//! let mut session = Session::new(SessionConfig::default(), ReferenceSolver::new())?;
//! session.click(100.0, 120.0);
//! session.next_color();
//! session.click(400.0, 380.0);
//!
//! let report = session.run("-t 2 -c 100")?;
//! println!("{} predictions over {:?}", report.predictions, report.kind);
//! # Ok(())
//! # }
//! ```

use crate::canvas::Canvas;
use crate::config::SessionConfig;
use crate::core::{ModelKind, Result, ScopedModel, Solver, SvmToyError};
use crate::data::{encode, PointStore};
use crate::render::SurfaceRenderer;
use chrono::{DateTime, Utc};
use log::{debug, info};

/// Side length of the square marker stamped for each placed point
pub const POINT_MARKER_SIZE: u32 = 4;

/// Summary of one completed train/render cycle
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Family of the trained model
    pub kind: ModelKind,
    /// Number of training points encoded
    pub points: usize,
    /// Prediction calls issued by the renderer
    pub predictions: usize,
    /// When the cycle finished
    pub completed_at: DateTime<Utc>,
}

/// One interactive session over a fixed-size canvas.
pub struct Session<S: Solver> {
    config: SessionConfig,
    solver: S,
    renderer: SurfaceRenderer,
    store: PointStore,
    canvas: Canvas,
    color: usize,
}

impl<S: Solver> Session<S> {
    /// Create a session; fails on degenerate canvas dimensions
    pub fn new(config: SessionConfig, solver: S) -> Result<Self> {
        let canvas = Canvas::new(config.width, config.height)?;
        let renderer = SurfaceRenderer::new(config.palette.clone());
        Ok(Self {
            config,
            solver,
            renderer,
            store: PointStore::new(),
            canvas,
            color: 0,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Currently selected class index
    pub fn current_color(&self) -> usize {
        self.color
    }

    /// Cycle to the next palette color
    pub fn next_color(&mut self) {
        self.color = (self.color + 1) % self.config.palette.classes();
    }

    /// Place a training point at a device-pixel position, stamping its
    /// marker immediately
    pub fn click(&mut self, x: f64, y: f64) {
        if let Some(color) = self.config.palette.point_color(self.color) {
            self.canvas.fill_rect(
                x.floor() as i64,
                y.floor() as i64,
                POINT_MARKER_SIZE,
                POINT_MARKER_SIZE,
                color,
            );
        }
        self.store.add(self.color, x, y);
    }

    /// Wipe the canvas and forget every point
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.store.clear();
    }

    /// The collected training points
    pub fn points(&self) -> &PointStore {
        &self.store
    }

    /// The solver binding
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// The render target
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Run one full cycle: encode the store, train, paint the surface,
    /// and overlay the training points.
    ///
    /// The trained model lives exactly as long as this call; it is
    /// released on every exit path, including render failures. A failed
    /// cycle leaves the store and the previous canvas contents intact.
    pub fn run(&mut self, params: &str) -> Result<TrainReport> {
        if self.store.is_empty() {
            return Err(SvmToyError::EmptyTrainingSet);
        }

        let problem = encode(&self.store, self.config.width, self.config.height);
        info!("training on {} points", problem.len());
        debug!("parameter string: {params:?}");

        let model = ScopedModel::train(&self.solver, &problem, params)?;
        let stats = self
            .renderer
            .render(&self.solver, model.model(), &mut self.canvas)?;

        // Training points go back on top of the computed surface.
        for point in &self.store {
            let color = self.config.palette.point_color(point.label).ok_or(
                SvmToyError::LabelOutOfRange {
                    label: point.label as f64,
                    palette: self.config.palette.classes(),
                },
            )?;
            self.canvas.fill_rect(
                point.x.floor() as i64,
                point.y.floor() as i64,
                POINT_MARKER_SIZE,
                POINT_MARKER_SIZE,
                color,
            );
        }

        info!("cycle complete: {:?}, {} predictions", stats.kind, stats.predictions);
        Ok(TrainReport {
            kind: stats.kind,
            points: problem.len(),
            predictions: stats.predictions,
            completed_at: Utc::now(),
        })
    }
}

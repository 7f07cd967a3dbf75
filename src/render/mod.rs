//! Decision-surface rendering
//!
//! Two strategies, selected by the model family: a per-pixel
//! classification fill and a per-column regression sweep with an optional
//! epsilon tube. Both draw into a scratch buffer and commit in one blit,
//! so a prediction failure mid-pass leaves the previous canvas contents
//! untouched.

use crate::canvas::{Canvas, Palette};
use crate::core::{ModelKind, Result, Solver, SvmToyError};
use log::debug;

/// Outcome of one render pass
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    /// Family of the rendered model
    pub kind: ModelKind,
    /// Number of prediction calls issued
    pub predictions: usize,
}

/// Pixel coordinate paired with its normalized position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    pub i: u32,
    pub j: u32,
    pub x: f64,
    pub y: f64,
}

/// Column sweep coordinates: pixel column plus its normalized x
pub fn columns(width: u32) -> impl Iterator<Item = (u32, f64)> {
    (0..width).map(move |i| (i, f64::from(i) / f64::from(width)))
}

/// Row-major coordinates over the full pixel grid
pub fn grid(width: u32, height: u32) -> impl Iterator<Item = PixelCoord> {
    (0..height).flat_map(move |j| {
        (0..width).map(move |i| PixelCoord {
            i,
            j,
            x: f64::from(i) / f64::from(width),
            y: f64::from(j) / f64::from(height),
        })
    })
}

/// Paints a trained model onto the canvas.
pub struct SurfaceRenderer {
    palette: Palette,
}

impl SurfaceRenderer {
    /// Create a renderer drawing with the given palette
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// The palette in use
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Repaint the canvas from the model, dispatching on its family
    pub fn render<S: Solver>(
        &self,
        solver: &S,
        model: &S::Model,
        canvas: &mut Canvas,
    ) -> Result<RenderStats> {
        let kind = solver.kind(model);
        debug!("rendering {kind:?} surface");
        if kind.is_regression() {
            self.render_regression(solver, model, kind, canvas)
        } else {
            self.render_classification(solver, model, kind, canvas)
        }
    }

    /// Sweep the regression curve left to right, one prediction per
    /// column, with tube offsets mirrored around the curve.
    fn render_regression<S: Solver>(
        &self,
        solver: &S,
        model: &S::Model,
        kind: ModelKind,
        canvas: &mut Canvas,
    ) -> Result<RenderStats> {
        let width = canvas.width();
        let height = canvas.height();

        let mut scratch = Canvas::new(width, height)?;
        let eps_px = (solver.epsilon(model) * f64::from(width)).round() as i64;
        let mut predictions = 0;

        for (i, x) in columns(width) {
            let value = solver.predict(model, x, 0.0)?;
            predictions += 1;

            let curve_y = (value * f64::from(height)).round() as i64;
            scratch.put_pixel(i64::from(i), curve_y, self.palette.curve_color);

            if kind.has_epsilon_tube() {
                scratch.put_pixel(i64::from(i), curve_y + eps_px, self.palette.tube_color);
                scratch.put_pixel(i64::from(i), curve_y - eps_px, self.palette.tube_color);
            }
        }

        canvas.blit(scratch.as_rgba())?;
        Ok(RenderStats { kind, predictions })
    }

    /// Classify every pixel of the grid and commit the colored buffer in
    /// a single blit.
    fn render_classification<S: Solver>(
        &self,
        solver: &S,
        model: &S::Model,
        kind: ModelKind,
        canvas: &mut Canvas,
    ) -> Result<RenderStats> {
        let width = canvas.width();
        let height = canvas.height();

        let mut buffer = vec![0u8; width as usize * height as usize * 4];
        let mut predictions = 0;

        for (offset, coord) in grid(width, height).enumerate() {
            let value = solver.predict(model, coord.x, coord.y)?;
            predictions += 1;

            let color = self.region_color_for(value)?;
            let base = offset * 4;
            buffer[base] = color.r;
            buffer[base + 1] = color.g;
            buffer[base + 2] = color.b;
            buffer[base + 3] = 255;
        }

        canvas.blit(&buffer)?;
        Ok(RenderStats { kind, predictions })
    }

    /// Map a predicted class value to its region color. A value the
    /// palette does not cover is a contract violation by the solver.
    fn region_color_for(&self, value: f64) -> Result<crate::canvas::Rgb> {
        let class = value.round();
        if class < 0.0 {
            return Err(SvmToyError::LabelOutOfRange {
                label: value,
                palette: self.palette.classes(),
            });
        }
        self.palette
            .region_color(class as usize)
            .ok_or(SvmToyError::LabelOutOfRange {
                label: value,
                palette: self.palette.classes(),
            })
    }
}

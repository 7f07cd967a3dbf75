//! Reference solver binding
//!
//! A deliberately simple stand-in for the external SVM collaborator:
//! nearest-centroid classification and a least-squares regression line.
//! It speaks the same whitespace-separated `-x value` parameter grammar
//! as the classic svm-train command line, so parameter strings written
//! for the real solver parse here unchanged.

use crate::core::{Instance, ModelKind, Problem, Result, Solver, SvmToyError};
use log::debug;

/// Parsed training parameters.
///
/// Only `svm_type` and `p` influence the reference solver; the remaining
/// options are validated and carried so the grammar stays faithful.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    pub svm_type: ModelKind,
    pub kernel_type: i32,
    pub degree: i32,
    pub gamma: f64,
    pub coef0: f64,
    pub nu: f64,
    pub cache_size: f64,
    pub c: f64,
    pub eps: f64,
    pub p: f64,
    pub shrinking: bool,
    pub probability: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            svm_type: ModelKind::CSvc,
            kernel_type: 2,
            degree: 3,
            gamma: 0.0,
            coef0: 0.0,
            nu: 0.5,
            cache_size: 100.0,
            c: 1.0,
            eps: 1e-3,
            p: 0.1,
            shrinking: true,
            probability: false,
        }
    }
}

impl SolverParams {
    /// Parse an opaque parameter string.
    ///
    /// Options are `-x value` pairs separated by whitespace; `-q` takes
    /// no value; `-wN value` class weights are accepted and ignored. The
    /// first token not starting with `-` ends parsing.
    pub fn parse(input: &str) -> Result<Self> {
        let mut params = Self::default();
        let mut tokens = input.split_whitespace();

        while let Some(flag) = tokens.next() {
            let mut chars = flag.chars();
            if chars.next() != Some('-') {
                break;
            }
            let option = chars
                .next()
                .ok_or_else(|| SvmToyError::InvalidParameter("bare '-'".to_string()))?;
            if option == 'q' {
                continue;
            }

            let value = tokens.next().ok_or_else(|| {
                SvmToyError::InvalidParameter(format!("option -{option} is missing its value"))
            })?;

            match option {
                's' => {
                    let code = parse_value::<i32>(option, value)?;
                    params.svm_type = ModelKind::from_code(code).ok_or_else(|| {
                        SvmToyError::InvalidParameter(format!("unknown svm type: {code}"))
                    })?;
                }
                't' => params.kernel_type = parse_value(option, value)?,
                'd' => params.degree = parse_value(option, value)?,
                'g' => params.gamma = parse_value(option, value)?,
                'r' => params.coef0 = parse_value(option, value)?,
                'n' => params.nu = parse_value(option, value)?,
                'm' => params.cache_size = parse_value(option, value)?,
                'c' => params.c = parse_value(option, value)?,
                'e' => params.eps = parse_value(option, value)?,
                'p' => params.p = parse_value(option, value)?,
                'h' => params.shrinking = parse_value::<i32>(option, value)? != 0,
                'b' => params.probability = parse_value::<i32>(option, value)? != 0,
                'w' => {
                    // class weight: validate the value, nothing to weight here
                    parse_value::<f64>(option, value)?;
                }
                _ => {
                    return Err(SvmToyError::InvalidParameter(format!(
                        "unknown option: -{option}"
                    )));
                }
            }
        }

        Ok(params)
    }
}

fn parse_value<T: std::str::FromStr>(option: char, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        SvmToyError::InvalidParameter(format!("invalid value for -{option}: {value}"))
    })
}

/// Per-class centroid of the training instances
#[derive(Debug, Clone, Copy, PartialEq)]
struct Centroid {
    label: usize,
    x: f64,
    y: f64,
}

/// Opaque model handle produced by [`ReferenceSolver`]
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    inner: Fit,
}

#[derive(Debug, Clone)]
enum Fit {
    Classifier {
        kind: ModelKind,
        centroids: Vec<Centroid>,
    },
    Regressor {
        kind: ModelKind,
        slope: f64,
        intercept: f64,
        epsilon: f64,
    },
}

/// The reference collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSolver;

impl ReferenceSolver {
    /// Create a reference solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for ReferenceSolver {
    type Model = ReferenceModel;

    fn train(&self, problem: &Problem, params: &str) -> Result<ReferenceModel> {
        let params = SolverParams::parse(params)?;
        if problem.is_empty() {
            return Err(SvmToyError::EmptyTrainingSet);
        }
        debug!(
            "reference training: {:?} on {} instances",
            params.svm_type,
            problem.len()
        );

        match params.svm_type {
            ModelKind::CSvc | ModelKind::NuSvc => {
                Ok(train_centroids(problem.instances(), params.svm_type))
            }
            ModelKind::OneClass => Err(SvmToyError::TrainingFailed(
                "one-class estimation is not supported by the reference solver".to_string(),
            )),
            ModelKind::EpsilonSvr | ModelKind::NuSvr => {
                Ok(train_line(problem.instances(), params.svm_type, params.p))
            }
        }
    }

    fn predict(&self, model: &ReferenceModel, x: f64, y: f64) -> Result<f64> {
        match &model.inner {
            Fit::Classifier { centroids, .. } => {
                let mut best: Option<(f64, usize)> = None;
                for centroid in centroids {
                    let dist = (centroid.x - x).powi(2) + (centroid.y - y).powi(2);
                    if best.map_or(true, |(d, _)| dist < d) {
                        best = Some((dist, centroid.label));
                    }
                }
                let (_, label) = best.ok_or_else(|| {
                    SvmToyError::PredictionFailed("classifier has no centroids".to_string())
                })?;
                Ok(label as f64)
            }
            Fit::Regressor {
                slope, intercept, ..
            } => Ok(slope * x + intercept),
        }
    }

    fn kind(&self, model: &ReferenceModel) -> ModelKind {
        match &model.inner {
            Fit::Classifier { kind, .. } => *kind,
            Fit::Regressor { kind, .. } => *kind,
        }
    }

    fn epsilon(&self, model: &ReferenceModel) -> f64 {
        match &model.inner {
            Fit::Classifier { .. } => 0.0,
            Fit::Regressor { epsilon, .. } => *epsilon,
        }
    }
}

fn train_centroids(instances: &[Instance], kind: ModelKind) -> ReferenceModel {
    let mut centroids: Vec<Centroid> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();

    for instance in instances {
        match centroids.iter().position(|c| c.label == instance.label) {
            Some(slot) => {
                centroids[slot].x += instance.x;
                centroids[slot].y += instance.y;
                counts[slot] += 1;
            }
            None => {
                centroids.push(Centroid {
                    label: instance.label,
                    x: instance.x,
                    y: instance.y,
                });
                counts.push(1);
            }
        }
    }

    for (centroid, count) in centroids.iter_mut().zip(counts) {
        centroid.x /= count as f64;
        centroid.y /= count as f64;
    }

    ReferenceModel {
        inner: Fit::Classifier { kind, centroids },
    }
}

/// Fit `value = slope * x + intercept` by least squares. The second
/// feature is re-targeted as the regressand and dropped from the inputs,
/// so regression curves sweep over x alone.
fn train_line(instances: &[Instance], kind: ModelKind, epsilon: f64) -> ReferenceModel {
    let n = instances.len() as f64;
    let mean_x = instances.iter().map(|i| i.x).sum::<f64>() / n;
    let mean_y = instances.iter().map(|i| i.y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for instance in instances {
        cov += (instance.x - mean_x) * (instance.y - mean_y);
        var += (instance.x - mean_x).powi(2);
    }

    // Degenerate input (single point or a vertical stack) flattens to a
    // horizontal line through the mean.
    let slope = if var > 0.0 { cov / var } else { 0.0 };
    let intercept = mean_y - slope * mean_x;

    ReferenceModel {
        inner: Fit::Regressor {
            kind,
            slope,
            intercept,
            epsilon,
        },
    }
}

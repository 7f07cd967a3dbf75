//! Core type definitions for the training/rendering pipeline

/// A user-placed training sample in device-pixel space.
///
/// Immutable once created; the only way to remove one is clearing the
/// whole store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingPoint {
    /// Class index into the point palette
    pub label: usize,
    /// Horizontal position in device pixels
    pub x: f64,
    /// Vertical position in device pixels
    pub y: f64,
}

impl TrainingPoint {
    /// Create a new training point
    pub fn new(label: usize, x: f64, y: f64) -> Self {
        Self { label, x, y }
    }
}

/// One encoded training instance with features normalized to `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    /// Class index of the originating point
    pub label: usize,
    /// `x / canvas_width`
    pub x: f64,
    /// `y / canvas_height`
    pub y: f64,
}

/// Solver input built fresh from the point store on every training run.
///
/// Instance order matches store order; an instance's position is its
/// training index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
    instances: Vec<Instance>,
}

impl Problem {
    /// Create an empty problem with room for `n` instances
    pub fn with_capacity(n: usize) -> Self {
        Self {
            instances: Vec::with_capacity(n),
        }
    }

    /// Append an instance; its index is its insertion position
    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// Number of instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check if the problem holds no instances
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances in training-index order
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

/// Model family reported by the solver.
///
/// The numeric codes match the classic libsvm `-s` option. The renderer
/// only cares about two properties: whether the family is a regression
/// (curve sweep instead of per-pixel coloring) and whether it carries a
/// bounded epsilon tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    CSvc,
    NuSvc,
    OneClass,
    EpsilonSvr,
    NuSvr,
}

impl ModelKind {
    /// Parse a numeric `-s` code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::CSvc),
            1 => Some(Self::NuSvc),
            2 => Some(Self::OneClass),
            3 => Some(Self::EpsilonSvr),
            4 => Some(Self::NuSvr),
            _ => None,
        }
    }

    /// The numeric `-s` code for this family
    pub fn code(self) -> i32 {
        match self {
            Self::CSvc => 0,
            Self::NuSvc => 1,
            Self::OneClass => 2,
            Self::EpsilonSvr => 3,
            Self::NuSvr => 4,
        }
    }

    /// Families rendered as a swept curve rather than a filled surface
    pub fn is_regression(self) -> bool {
        matches!(self, Self::EpsilonSvr | Self::NuSvr)
    }

    /// Only epsilon-SVR carries a meaningful tolerance band
    pub fn has_epsilon_tube(self) -> bool {
        matches!(self, Self::EpsilonSvr)
    }
}

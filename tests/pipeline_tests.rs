//! Integration tests for the train/render pipeline
//!
//! These drive whole sessions through mock solvers with call accounting,
//! plus round trips through the reference solver.

use std::cell::Cell;
use svm_toy::{
    ModelKind, Problem, ReferenceSolver, Result, Rgb, Session, SessionConfig, Solver, SvmToyError,
};

/// Scriptable solver that counts every train/predict/release call.
struct MockSolver {
    kind: ModelKind,
    epsilon: f64,
    value: f64,
    /// Normalized coordinate at which predict fails, if any
    fail_at: Option<(f64, f64)>,
    trains: Cell<usize>,
    predicts: Cell<usize>,
    releases: Cell<usize>,
}

impl MockSolver {
    fn classification(value: f64) -> Self {
        Self::new(ModelKind::CSvc, 0.0, value)
    }

    fn new(kind: ModelKind, epsilon: f64, value: f64) -> Self {
        Self {
            kind,
            epsilon,
            value,
            fail_at: None,
            trains: Cell::new(0),
            predicts: Cell::new(0),
            releases: Cell::new(0),
        }
    }

    fn failing_at(mut self, x: f64, y: f64) -> Self {
        self.fail_at = Some((x, y));
        self
    }
}

impl Solver for MockSolver {
    type Model = ();

    fn train(&self, _problem: &Problem, _params: &str) -> Result<()> {
        self.trains.set(self.trains.get() + 1);
        Ok(())
    }

    fn predict(&self, _model: &(), x: f64, y: f64) -> Result<f64> {
        self.predicts.set(self.predicts.get() + 1);
        if let Some((fx, fy)) = self.fail_at {
            if (x - fx).abs() < 1e-12 && (y - fy).abs() < 1e-12 {
                return Err(SvmToyError::PredictionFailed(
                    "synthetic failure".to_string(),
                ));
            }
        }
        Ok(self.value)
    }

    fn kind(&self, _model: &()) -> ModelKind {
        self.kind
    }

    fn epsilon(&self, _model: &()) -> f64 {
        self.epsilon
    }

    fn release(&self, _model: ()) {
        self.releases.set(self.releases.get() + 1);
    }
}

fn session_with(width: u32, height: u32, solver: MockSolver) -> Session<MockSolver> {
    let config = SessionConfig {
        width,
        height,
        ..SessionConfig::default()
    };
    Session::new(config, solver).expect("session")
}

fn rgb_of(pixel: [u8; 4]) -> Rgb {
    Rgb::new(pixel[0], pixel[1], pixel[2])
}

#[test]
fn test_classification_predicts_once_per_pixel_and_is_opaque() {
    let mut session = session_with(20, 10, MockSolver::classification(1.0));
    session.click(3.0, 3.0);

    let report = session.run("").expect("run");
    assert_eq!(report.predictions, 20 * 10);

    let canvas = session.canvas();
    for y in 0..10 {
        for x in 0..20 {
            let pixel = canvas.pixel(x, y).expect("pixel");
            assert_eq!(pixel[3], 255, "pixel ({x},{y}) must be opaque");
        }
    }
}

#[test]
fn test_classification_paints_the_region_color() {
    let mut session = session_with(16, 16, MockSolver::classification(2.0));
    session.click(30.0, 30.0); // off-canvas marker; store does not care

    session.run("").expect("run");

    let expected = SessionConfig::default()
        .palette
        .region_color(2)
        .expect("color");
    assert_eq!(rgb_of(session.canvas().pixel(8, 8).expect("pixel")), expected);
}

#[test]
fn test_every_train_is_released_on_success() {
    let mut session = session_with(12, 12, MockSolver::classification(0.0));
    session.click(6.0, 6.0);

    for _ in 0..3 {
        session.run("").expect("run");
    }

    assert_eq!(session.solver().trains.get(), 3);
    assert_eq!(session.solver().releases.get(), 3);
}

#[test]
fn test_release_still_happens_when_predict_fails_mid_sweep() {
    let width = 10u32;
    let height = 10u32;
    // fail exactly at pixel (width/2, height/2)
    let solver = MockSolver::classification(0.0).failing_at(0.5, 0.5);
    let mut session = session_with(width, height, solver);
    session.click(2.0, 2.0);

    let result = session.run("");
    assert!(matches!(result, Err(SvmToyError::PredictionFailed(_))));
    assert_eq!(session.solver().trains.get(), 1);
    assert_eq!(session.solver().releases.get(), 1);
}

#[test]
fn test_failed_render_leaves_previous_canvas_intact() {
    let solver = MockSolver::classification(0.0).failing_at(0.5, 0.5);
    let mut session = session_with(10, 10, solver);
    session.click(2.0, 2.0);
    let before = session.canvas().clone();

    assert!(session.run("").is_err());
    assert_eq!(session.canvas(), &before);
    assert_eq!(session.points().len(), 1);
}

#[test]
fn test_label_out_of_palette_aborts_and_releases() {
    let mut session = session_with(8, 8, MockSolver::classification(7.0));
    session.click(1.0, 1.0);

    assert!(matches!(
        session.run(""),
        Err(SvmToyError::LabelOutOfRange { .. })
    ));
    assert_eq!(session.solver().releases.get(), 1);
}

#[test]
fn test_one_class_routes_to_classification_fill() {
    let mut session = session_with(6, 6, MockSolver::new(ModelKind::OneClass, 0.0, 1.0));
    session.click(3.0, 3.0);

    let report = session.run("").expect("run");
    assert_eq!(report.kind, ModelKind::OneClass);
    assert_eq!(report.predictions, 36);
}

#[test]
fn test_regression_sweep_predicts_once_per_column() {
    let mut session = session_with(40, 30, MockSolver::new(ModelKind::NuSvr, 0.0, 0.5));
    session.click(5.0, 5.0);

    let report = session.run("").expect("run");
    assert_eq!(report.predictions, 40);
}

#[test]
fn test_epsilon_tube_is_symmetric_and_counted() {
    let width = 40u32;
    let height = 40u32;
    let epsilon = 0.1; // 4 pixels on a 40-wide canvas
    let solver = MockSolver::new(ModelKind::EpsilonSvr, epsilon, 0.5);
    let mut session = session_with(width, height, solver);
    // park the marker outside the surface so pixel accounting stays exact
    session.click(-50.0, -50.0);

    session.run("").expect("run");

    let palette = SessionConfig::default().palette;
    let canvas = session.canvas();
    let curve_y = 20; // 0.5 * 40
    let eps_px = 4;

    let mut curve_pixels = 0;
    let mut tube_pixels = 0;
    for x in 0..width {
        for y in 0..height {
            let color = rgb_of(canvas.pixel(x, y).expect("pixel"));
            if color == palette.curve_color {
                curve_pixels += 1;
                assert_eq!(y, curve_y, "curve must sit on the predicted row");
            } else if color == palette.tube_color {
                tube_pixels += 1;
                assert!(
                    y == curve_y + eps_px || y == curve_y - eps_px,
                    "tube rows must mirror around the curve"
                );
            }
        }
    }
    assert_eq!(curve_pixels, width);
    assert_eq!(tube_pixels, 2 * width);
}

#[test]
fn test_plain_regression_has_no_tube() {
    let solver = MockSolver::new(ModelKind::NuSvr, 0.1, 0.5);
    let mut session = session_with(20, 20, solver);
    session.click(-50.0, -50.0);

    session.run("").expect("run");

    let palette = SessionConfig::default().palette;
    let canvas = session.canvas();
    let mut tube_pixels = 0;
    for x in 0..20 {
        for y in 0..20 {
            if rgb_of(canvas.pixel(x, y).expect("pixel")) == palette.tube_color {
                tube_pixels += 1;
            }
        }
    }
    assert_eq!(tube_pixels, 0);
}

#[test]
fn test_empty_store_never_reaches_the_solver() {
    let mut session = session_with(10, 10, MockSolver::classification(0.0));

    assert!(matches!(
        session.run(""),
        Err(SvmToyError::EmptyTrainingSet)
    ));
    assert_eq!(session.solver().trains.get(), 0);
    assert_eq!(session.solver().predicts.get(), 0);
}

#[test]
fn test_markers_are_overlaid_after_the_surface() {
    let mut session = session_with(16, 16, MockSolver::classification(0.0));
    session.click(8.0, 8.0);

    session.run("").expect("run");

    let palette = SessionConfig::default().palette;
    let marker = palette.point_color(0).expect("color");
    assert_eq!(rgb_of(session.canvas().pixel(8, 8).expect("pixel")), marker);
    // away from the marker the surface color shows through
    assert_eq!(
        rgb_of(session.canvas().pixel(0, 0).expect("pixel")),
        palette.region_color(0).expect("color")
    );
}

#[test]
fn test_reference_round_trip_three_classes() {
    // one point per class on a 100x100 canvas
    let config = SessionConfig {
        width: 100,
        height: 100,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, ReferenceSolver::new()).expect("session");

    session.click(10.0, 10.0);
    session.next_color();
    session.click(90.0, 10.0);
    session.next_color();
    session.click(50.0, 90.0);

    let report = session.run("-t 2 -c 100").expect("run");
    assert_eq!(report.kind, ModelKind::CSvc);
    assert_eq!(report.points, 3);
    assert_eq!(report.predictions, 100 * 100);

    // the first point's neighborhood is classified as class 0
    let palette = SessionConfig::default().palette;
    let region = session.canvas().pixel(12, 14).expect("pixel");
    assert_eq!(rgb_of(region), palette.region_color(0).expect("color"));
}

#[test]
fn test_reference_regression_end_to_end() {
    let config = SessionConfig {
        width: 100,
        height: 100,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, ReferenceSolver::new()).expect("session");

    for i in 0..10 {
        let x = 5.0 + 10.0 * f64::from(i);
        session.click(x, 30.0 + 0.4 * x);
    }

    let report = session.run("-s 3 -t 2 -p 0.05").expect("run");
    assert_eq!(report.kind, ModelKind::EpsilonSvr);
    assert_eq!(report.predictions, 100);

    // curve pixels exist and sit on the fitted line
    let palette = SessionConfig::default().palette;
    let mut curve_pixels = 0;
    for x in 0..100 {
        for y in 0..100 {
            if rgb_of(session.canvas().pixel(x, y).expect("pixel")) == palette.curve_color {
                curve_pixels += 1;
            }
        }
    }
    assert!(curve_pixels > 0, "regression curve must be visible");
}

#[test]
fn test_malformed_params_short_circuit_rendering() {
    let mut session = session_with(10, 10, MockSolver::classification(0.0));
    session.click(5.0, 5.0);

    // mock train always succeeds; use the reference solver for grammar
    let config = SessionConfig {
        width: 10,
        height: 10,
        ..SessionConfig::default()
    };
    let mut reference = Session::new(config, ReferenceSolver::new()).expect("session");
    reference.click(5.0, 5.0);
    assert!(matches!(
        reference.run("-z 1"),
        Err(SvmToyError::InvalidParameter(_))
    ));

    // and the mock session still works afterwards
    assert!(session.run("").is_ok());
}

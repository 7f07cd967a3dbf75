//! Conversion of stored points into the solver's problem encoding

use crate::core::{Instance, Problem};
use crate::data::PointStore;

/// Encode the store into a [`Problem`], normalizing pixel coordinates by
/// the canvas dimensions.
///
/// The dimensions must be the ones in effect when the points were
/// captured, otherwise predictions land in the wrong place on screen.
/// An empty store encodes to an empty problem; callers treat that as a
/// no-op and must not train on it.
pub fn encode(points: &PointStore, width: u32, height: u32) -> Problem {
    let mut problem = Problem::with_capacity(points.len());
    for point in points {
        problem.push(Instance {
            label: point.label,
            x: point.x / f64::from(width),
            y: point.y / f64::from(height),
        });
    }
    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_point_normalizes_to_half() {
        let mut store = PointStore::new();
        store.add(1, 200.0, 150.0);

        let problem = encode(&store, 400, 300);
        let instance = problem.instances()[0];
        assert_eq!(instance.label, 1);
        assert_relative_eq!(instance.x, 0.5);
        assert_relative_eq!(instance.y, 0.5);
    }

    #[test]
    fn test_empty_store_encodes_to_empty_problem() {
        let store = PointStore::new();
        let problem = encode(&store, 100, 100);
        assert!(problem.is_empty());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mut store = PointStore::new();
        store.add(0, 33.0, 77.0);
        store.add(2, 12.0, 48.0);

        assert_eq!(encode(&store, 100, 100), encode(&store, 100, 100));
    }

    #[test]
    fn test_three_point_scenario() {
        // 100x100 canvas, one point per class
        let mut store = PointStore::new();
        store.add(0, 10.0, 10.0);
        store.add(1, 90.0, 10.0);
        store.add(2, 50.0, 90.0);

        let problem = encode(&store, 100, 100);
        assert_eq!(problem.len(), 3);

        let expected = [(0, 0.1, 0.1), (1, 0.9, 0.1), (2, 0.5, 0.9)];
        for (instance, &(label, x, y)) in problem.instances().iter().zip(expected.iter()) {
            assert_eq!(instance.label, label);
            assert_relative_eq!(instance.x, x);
            assert_relative_eq!(instance.y, y);
        }
    }
}

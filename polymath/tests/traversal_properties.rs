//! Property-based tests for collection traversal.
//!
//! Random nested arrays (jagged, with mixed scalar leaves) are used to check:
//! 1. Shape preservation: `shape(deep_map(c, f)) == shape(c)`
//! 2. Skip identity: skipped leaves come back untouched
//! 3. Leaf order: the transform sees leaves in depth-first order

use polymath::{deep_map, deep_map_skipping, deep_zip, shape, DispatchResult, Matrix, Value};
use proptest::prelude::*;

// -- Strategies --

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(|n| Value::Number(f64::from(n))),
        1 => Just(Value::Number(0.0)),
        1 => any::<bool>().prop_map(Value::Boolean),
    ]
}

/// Jagged nested arrays up to depth 4.
fn nested_strategy() -> impl Strategy<Value = Value> {
    let leaf = leaf_strategy();
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::Array)
    })
    .prop_map(|v| match v {
        Value::Array(_) => v,
        scalar => Value::Array(vec![scalar]),
    })
}

fn increment(value: &Value) -> DispatchResult<Value> {
    Ok(match value {
        Value::Number(n) => Value::Number(n + 1.0),
        other => other.clone(),
    })
}

fn leaves(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| leaves(item, out)),
        Value::Matrix(m) => m.data().iter().for_each(|item| leaves(item, out)),
        leaf => out.push(leaf.clone()),
    }
}

proptest! {
    #[test]
    fn deep_map_preserves_shape(collection in nested_strategy()) {
        let mapped = deep_map(&collection, increment).unwrap();
        prop_assert_eq!(shape(&mapped), shape(&collection));
    }

    #[test]
    fn skipping_everything_is_identity(collection in nested_strategy()) {
        let mapped =
            deep_map_skipping(&collection, |_| panic!("transform called"), |_| true).unwrap();
        prop_assert_eq!(mapped, collection);
    }

    #[test]
    fn skipped_leaves_are_untouched(collection in nested_strategy()) {
        let mapped = deep_map_skipping(&collection, increment, Value::is_zero).unwrap();

        let mut before = Vec::new();
        let mut after = Vec::new();
        leaves(&collection, &mut before);
        leaves(&mapped, &mut after);

        prop_assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            if old.is_zero() {
                prop_assert_eq!(old, new);
            } else {
                prop_assert_eq!(&increment(old).unwrap(), new);
            }
        }
    }

    #[test]
    fn transform_sees_leaves_depth_first(collection in nested_strategy()) {
        let mut seen = Vec::new();
        deep_map(&collection, |leaf| {
            seen.push(leaf.clone());
            Ok(leaf.clone())
        })
        .unwrap();

        let mut expected = Vec::new();
        leaves(&collection, &mut expected);
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn zip_with_self_preserves_shape(collection in nested_strategy()) {
        let zipped = deep_zip(&collection, &collection, |a, _| Ok(a.clone())).unwrap();
        prop_assert_eq!(zipped, collection);
    }

    #[test]
    fn matrix_size_survives_mapping(rows in 1usize..5, cols in 1usize..5) {
        let data = (0..rows)
            .map(|r| {
                Value::Array((0..cols).map(|c| Value::Number((r * cols + c) as f64)).collect())
            })
            .collect();
        let matrix = Value::Matrix(Matrix::new(data).unwrap());

        let mapped = deep_map(&matrix, increment).unwrap();
        let Value::Matrix(result) = mapped else {
            panic!("matrix mapped to a non-matrix");
        };
        prop_assert_eq!(result.size(), &[rows, cols][..]);
    }
}

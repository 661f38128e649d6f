//! Shape-preserving traversal of nested collections.
//!
//! Arrays may be jagged; matrices are rectangular and keep their size
//! through every traversal. Elements that are themselves collections are
//! descended into depth-first, everything else is a leaf.

use crate::error::{DispatchError, DispatchResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Matrix, Value};

/// The nesting pattern of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Leaf,
    Seq(Vec<Shape>),
}

impl Shape {
    /// Number of leaves covered by this shape.
    pub fn leaf_count(&self) -> usize {
        match self {
            Shape::Leaf => 1,
            Shape::Seq(items) => items.iter().map(Shape::leaf_count).sum(),
        }
    }
}

/// Compute the nesting pattern of `value`. Non-collections are a single leaf.
pub fn shape(value: &Value) -> Shape {
    ensure_sufficient_stack(|| match value {
        Value::Array(items) => Shape::Seq(items.iter().map(shape).collect()),
        Value::Matrix(m) => Shape::Seq(m.data().iter().map(shape).collect()),
        _ => Shape::Leaf,
    })
}

/// Apply `transform` to every leaf of `collection`, preserving its shape.
///
/// Fails with a structural error if `collection` is not an array or matrix.
/// The first error returned by `transform` aborts the traversal.
pub fn deep_map<F>(collection: &Value, transform: F) -> DispatchResult<Value>
where
    F: FnMut(&Value) -> DispatchResult<Value>,
{
    deep_map_skipping(collection, transform, |_: &Value| false)
}

/// Like [`deep_map`], but leaves for which `skip` returns true are copied
/// into the output unchanged and `transform` is never called on them.
pub fn deep_map_skipping<F, P>(
    collection: &Value,
    mut transform: F,
    skip: P,
) -> DispatchResult<Value>
where
    F: FnMut(&Value) -> DispatchResult<Value>,
    P: Fn(&Value) -> bool,
{
    match collection {
        Value::Array(items) => Ok(Value::Array(map_items(items, &mut transform, &skip)?)),
        Value::Matrix(m) => {
            let data = map_items(m.data(), &mut transform, &skip)?;
            Ok(Value::Matrix(Matrix::with_size(data, m.size().to_vec())))
        }
        other => Err(not_a_collection(other)),
    }
}

fn map_items<F, P>(items: &[Value], transform: &mut F, skip: &P) -> DispatchResult<Vec<Value>>
where
    F: FnMut(&Value) -> DispatchResult<Value>,
    P: Fn(&Value) -> bool,
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(map_element(item, &mut *transform, skip)?);
    }
    Ok(out)
}

fn map_element<F, P>(item: &Value, transform: &mut F, skip: &P) -> DispatchResult<Value>
where
    F: FnMut(&Value) -> DispatchResult<Value>,
    P: Fn(&Value) -> bool,
{
    ensure_sufficient_stack(|| match item {
        Value::Array(inner) => Ok(Value::Array(map_items(inner, transform, skip)?)),
        Value::Matrix(m) => {
            let data = map_items(m.data(), transform, skip)?;
            Ok(Value::Matrix(Matrix::with_size(data, m.size().to_vec())))
        }
        leaf if skip(leaf) => Ok(leaf.clone()),
        leaf => transform(leaf),
    })
}

/// Pair up the leaves of two collections of identical shape.
///
/// The result is a matrix if either input is a matrix, an array otherwise.
/// Any difference in nesting or length is a structural error.
pub fn deep_zip<F>(left: &Value, right: &Value, mut transform: F) -> DispatchResult<Value>
where
    F: FnMut(&Value, &Value) -> DispatchResult<Value>,
{
    let data = zip_items(collection_items(left)?, collection_items(right)?, &mut transform)?;
    match (left, right) {
        (Value::Matrix(m), _) | (_, Value::Matrix(m)) => {
            Ok(Value::Matrix(Matrix::with_size(data, m.size().to_vec())))
        }
        _ => Ok(Value::Array(data)),
    }
}

fn collection_items(value: &Value) -> DispatchResult<&[Value]> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Matrix(m) => Ok(m.data()),
        other => Err(not_a_collection(other)),
    }
}

fn zip_items<F>(left: &[Value], right: &[Value], transform: &mut F) -> DispatchResult<Vec<Value>>
where
    F: FnMut(&Value, &Value) -> DispatchResult<Value>,
{
    if left.len() != right.len() {
        return Err(DispatchError::structural(format!(
            "dimension mismatch ({} != {})",
            left.len(),
            right.len()
        )));
    }

    let mut out = Vec::with_capacity(left.len());
    for (a, b) in left.iter().zip(right) {
        let item = ensure_sufficient_stack(|| match (a.is_collection(), b.is_collection()) {
            (true, true) => {
                let data = zip_items(collection_items(a)?, collection_items(b)?, &mut *transform)?;
                match (a, b) {
                    (Value::Matrix(m), _) | (_, Value::Matrix(m)) => {
                        Ok(Value::Matrix(Matrix::with_size(data, m.size().to_vec())))
                    }
                    _ => Ok(Value::Array(data)),
                }
            }
            (false, false) => transform(a, b),
            _ => Err(DispatchError::structural(format!(
                "dimension mismatch ({} paired with {})",
                a.type_tag(),
                b.type_tag()
            ))),
        })?;
        out.push(item);
    }
    Ok(out)
}

fn not_a_collection(value: &Value) -> DispatchError {
    DispatchError::structural(format!(
        "expected Array or Matrix, found {}",
        value.type_tag()
    ))
}

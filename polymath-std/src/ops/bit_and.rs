//! `bit_and(x, y)`: bitwise AND of two integers.
//!
//! Numbers are wrapped to 32-bit two's complement integers first, as in
//! `bit_not`. Collections are combined element-wise with a collection of
//! the same shape, or with a scalar broadcast to every element.

use std::sync::Arc;

use polymath::{
    binary, deep_map, deep_zip, DispatchError, DispatchResult, Operation, Registry, SignatureError,
    TypeTag, Value,
};
use rust_decimal::Decimal;

use super::{int32_number, integral_decimal, unexpected};

pub const NAME: &str = "bit_and";

pub fn define(registry: &mut Registry) -> Result<Arc<Operation>, SignatureError> {
    registry.define(
        NAME,
        [
            ("number, number", binary(|op, x, y| match (x, y) {
                (Value::Number(a), Value::Number(b)) => {
                    let a = int32_number(op, *a)?;
                    let b = int32_number(op, *b)?;
                    Ok(Value::Number((a & b) as f64))
                }
                (Value::Number(_), other) => Err(unexpected(op, 1, other, TypeTag::Number)),
                (other, _) => Err(unexpected(op, 0, other, TypeTag::Number)),
            })),
            ("BigNumber, BigNumber", binary(|op, x, y| match (x, y) {
                (Value::Decimal(a), Value::Decimal(b)) => decimal_and(op, a, b),
                (Value::Decimal(_), other) => Err(unexpected(op, 1, other, TypeTag::Decimal)),
                (other, _) => Err(unexpected(op, 0, other, TypeTag::Decimal)),
            })),
            ("Array | Matrix, Array | Matrix", binary(|op, x, y| {
                deep_zip(x, y, |a, b| op.call(&[a.clone(), b.clone()]))
            })),
            ("Array | Matrix, number | BigNumber", binary(|op, x, y| {
                deep_map(x, |e| op.call(&[e.clone(), y.clone()]))
            })),
            ("number | BigNumber, Array | Matrix", binary(|op, x, y| {
                deep_map(y, |e| op.call(&[x.clone(), e.clone()]))
            })),
        ],
    )
}

fn decimal_and(op: &Operation, a: &Decimal, b: &Decimal) -> DispatchResult<Value> {
    use num_traits::FromPrimitive;

    let result = integral_decimal(op, a)? & integral_decimal(op, b)?;
    Decimal::from_i128(result)
        .map(Value::Decimal)
        .ok_or_else(|| DispatchError::domain(op.name(), "Decimal overflow"))
}

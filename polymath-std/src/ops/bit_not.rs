//! `bit_not(x)`: bitwise complement of an integer.
//!
//! Numbers are wrapped to 32-bit two's complement integers before the
//! complement, so `bit_not(2^32) == -1`. Decimals use the identity
//! `!x == -(x + 1)`, which holds at any width.

use std::sync::Arc;

use polymath::{deep_map, unary, DispatchError, Operation, Registry, SignatureError, TypeTag, Value};
use rust_decimal::Decimal;

use super::{int32_number, integral_decimal, unexpected};

pub const NAME: &str = "bit_not";

pub fn define(registry: &mut Registry) -> Result<Arc<Operation>, SignatureError> {
    registry.define(
        NAME,
        [
            ("number", unary(|op, x| match x {
                Value::Number(n) => Ok(Value::Number((!int32_number(op, *n)?) as f64)),
                other => Err(unexpected(op, 0, other, TypeTag::Number)),
            })),
            ("BigNumber", unary(|op, x| match x {
                Value::Decimal(d) => decimal_not(op, d),
                other => Err(unexpected(op, 0, other, TypeTag::Decimal)),
            })),
            ("Array | Matrix", unary(|op, x| deep_map(x, |e| op.call_one(e)))),
        ],
    )
}

fn decimal_not(op: &Operation, d: &Decimal) -> Result<Value, DispatchError> {
    integral_decimal(op, d)?;
    d.checked_add(Decimal::ONE)
        .map(|next| Value::Decimal(-next.trunc()))
        .ok_or_else(|| DispatchError::domain(op.name(), "Decimal overflow"))
}

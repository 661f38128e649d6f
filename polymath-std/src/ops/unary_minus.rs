//! `unary_minus(x)`: negation in the representation of `x`.

use std::sync::Arc;

use polymath::{deep_map, unary, Operation, Registry, SignatureError, TypeTag, Value};

use super::unexpected;

pub const NAME: &str = "unary_minus";

pub fn define(registry: &mut Registry) -> Result<Arc<Operation>, SignatureError> {
    registry.define(
        NAME,
        [
            ("number", unary(|op, x| match x {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(unexpected(op, 0, other, TypeTag::Number)),
            })),
            ("Complex", unary(|op, x| match x {
                Value::Complex(z) => Ok(Value::Complex(-*z)),
                other => Err(unexpected(op, 0, other, TypeTag::Complex)),
            })),
            ("BigNumber", unary(|op, x| match x {
                Value::Decimal(d) => Ok(Value::Decimal(-*d)),
                other => Err(unexpected(op, 0, other, TypeTag::Decimal)),
            })),
            ("Fraction", unary(|op, x| match x {
                Value::Fraction(r) => Ok(Value::Fraction(-r)),
                other => Err(unexpected(op, 0, other, TypeTag::Fraction)),
            })),
            ("Array | Matrix", unary(|op, x| deep_map(x, |e| op.call_one(e)))),
            ("Unit", unary(|op, x| match x {
                Value::Unit(u) => Ok(Value::Unit(u.with_value(op.call_one(u.value())?))),
                other => Err(unexpected(op, 0, other, TypeTag::Unit)),
            })),
        ],
    )
}

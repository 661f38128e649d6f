//! `abs(x)`: magnitude. Complex values give a plain number; units keep
//! their unit.

use std::sync::Arc;

use num_traits::Signed;
use polymath::{deep_map_skipping, unary, Operation, Registry, SignatureError, TypeTag, Value};

use super::unexpected;

pub const NAME: &str = "abs";

pub fn define(registry: &mut Registry) -> Result<Arc<Operation>, SignatureError> {
    registry.define(
        NAME,
        [
            ("number", unary(|op, x| match x {
                Value::Number(n) => Ok(Value::Number(n.abs())),
                other => Err(unexpected(op, 0, other, TypeTag::Number)),
            })),
            ("Complex", unary(|op, x| match x {
                Value::Complex(z) => Ok(Value::Number(z.norm())),
                other => Err(unexpected(op, 0, other, TypeTag::Complex)),
            })),
            ("BigNumber", unary(|op, x| match x {
                Value::Decimal(d) => Ok(Value::Decimal(d.abs())),
                other => Err(unexpected(op, 0, other, TypeTag::Decimal)),
            })),
            ("Fraction", unary(|op, x| match x {
                Value::Fraction(r) => Ok(Value::Fraction(r.abs())),
                other => Err(unexpected(op, 0, other, TypeTag::Fraction)),
            })),
            ("Array | Matrix", unary(|op, x| {
                deep_map_skipping(x, |e| op.call_one(e), Value::is_zero)
            })),
            ("Unit", unary(|op, x| match x {
                Value::Unit(u) => Ok(Value::Unit(u.with_value(op.call_one(u.value())?))),
                other => Err(unexpected(op, 0, other, TypeTag::Unit)),
            })),
        ],
    )
}

//! `sign(x)`: -1, 0 or 1 in the representation of `x`.

use std::sync::Arc;

use num_traits::Signed;
use polymath::{deep_map_skipping, unary, Operation, Registry, SignatureError, TypeTag, Value};

use super::unexpected;

pub const NAME: &str = "sign";

pub fn define(registry: &mut Registry) -> Result<Arc<Operation>, SignatureError> {
    registry.define(
        NAME,
        [
            ("number", unary(|op, x| match x {
                Value::Number(n) => Ok(Value::Number(number_sign(*n))),
                other => Err(unexpected(op, 0, other, TypeTag::Number)),
            })),
            ("Complex", unary(|op, x| match x {
                Value::Complex(_) if x.is_zero() => Ok(x.clone()),
                Value::Complex(z) => Ok(Value::Complex(*z / z.norm())),
                other => Err(unexpected(op, 0, other, TypeTag::Complex)),
            })),
            ("BigNumber", unary(|op, x| match x {
                Value::Decimal(d) => Ok(Value::Decimal(d.signum())),
                other => Err(unexpected(op, 0, other, TypeTag::Decimal)),
            })),
            ("Fraction", unary(|op, x| match x {
                Value::Fraction(r) => Ok(Value::Fraction(r.signum())),
                other => Err(unexpected(op, 0, other, TypeTag::Fraction)),
            })),
            // sign(0) is 0, so zeros are copied through untouched.
            ("Array | Matrix", unary(|op, x| {
                deep_map_skipping(x, |e| op.call_one(e), Value::is_zero)
            })),
            // The sign of a quantity is dimensionless.
            ("Unit", unary(|op, x| match x {
                Value::Unit(u) => op.call_one(u.value()),
                other => Err(unexpected(op, 0, other, TypeTag::Unit)),
            })),
        ],
    )
}

/// 1 or -1; zeros (either sign) and NaN come back unchanged.
fn number_sign(n: f64) -> f64 {
    if n > 0.0 {
        1.0
    } else if n < 0.0 {
        -1.0
    } else {
        n
    }
}

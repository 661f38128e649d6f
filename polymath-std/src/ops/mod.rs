//! The standard operations.
//!
//! Each submodule exposes the operation's `NAME` and a `define` function
//! that registers its signature table on a [`Registry`].

pub mod abs;
pub mod bit_and;
pub mod bit_not;
pub mod sign;
pub mod unary_minus;

use std::sync::Arc;

use polymath::{
    DispatchError, DispatchResult, Operation, Registry, SignatureError, TypeTag, Value,
};
use rust_decimal::Decimal;

/// Handles to the standard operations of one registry.
#[derive(Debug, Clone)]
pub struct StandardOps {
    pub sign: Arc<Operation>,
    pub abs: Arc<Operation>,
    pub unary_minus: Arc<Operation>,
    pub bit_not: Arc<Operation>,
    pub bit_and: Arc<Operation>,
}

/// Define every standard operation on `registry`, in a fixed order.
pub fn define_all(registry: &mut Registry) -> Result<StandardOps, SignatureError> {
    Ok(StandardOps {
        sign: sign::define(registry)?,
        abs: abs::define(registry)?,
        unary_minus: unary_minus::define(registry)?,
        bit_not: bit_not::define(registry)?,
        bit_and: bit_and::define(registry)?,
    })
}

/// The argument at `position` is not the variant its signature promised.
pub(crate) fn unexpected(
    op: &Operation,
    position: usize,
    value: &Value,
    expected: TypeTag,
) -> DispatchError {
    DispatchError::unexpected(op.name(), position, value.type_tag(), expected)
}

pub(crate) fn integer_expected(op: &Operation) -> DispatchError {
    DispatchError::domain(op.name(), "Integer expected")
}

/// An integral float wrapped to a 32-bit two's complement integer.
///
/// Wrapping is modulo 2^32, so `2^32` becomes `0` and `2^31` becomes
/// `-2^31`. Every `i32` is exact as an `f64`, so results never lose bits.
pub(crate) fn int32_number(op: &Operation, n: f64) -> DispatchResult<i32> {
    if n.is_finite() && n.fract() == 0.0 {
        // rem_euclid is exact for integral operands and lands in [0, 2^32).
        let low = n.rem_euclid(TWO_POW_32) as u32;
        Ok(low as i32)
    } else {
        Err(integer_expected(op))
    }
}

const TWO_POW_32: f64 = 4_294_967_296.0;

/// An integral decimal, widened to `i128`.
pub(crate) fn integral_decimal(op: &Operation, d: &Decimal) -> DispatchResult<i128> {
    use num_traits::ToPrimitive;

    if d.fract().is_zero() {
        d.to_i128().ok_or_else(|| integer_expected(op))
    } else {
        Err(integer_expected(op))
    }
}

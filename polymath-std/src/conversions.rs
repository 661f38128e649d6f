//! Built-in conversion catalog.
//!
//! Every conversion the standard library knows how to perform, with its
//! default cost. [`Config`](crate::Config) selects entries from this catalog
//! and may re-price them; it cannot add pairs that are not listed here.
//!
//! There is no `number -> Decimal` entry: a binary float has no faithful
//! decimal reading, so mixing the two is left unsupported.

use std::fmt;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{FromPrimitive, ToPrimitive};
use polymath::{ConversionFailure, ConversionTable, TypeTag, Value};
use rust_decimal::Decimal;

/// Signature of a catalog coercion.
pub type CoerceFnPtr = fn(&Value) -> Result<Value, ConversionFailure>;

/// One built-in conversion.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub from: TypeTag,
    pub to: TypeTag,
    pub default_cost: u32,
    pub coerce: CoerceFnPtr,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("default_cost", &self.default_cost)
            .finish_non_exhaustive()
    }
}

/// The built-in conversions, in default table order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        from: TypeTag::Boolean,
        to: TypeTag::Number,
        default_cost: 1,
        coerce: boolean_to_number,
    },
    CatalogEntry {
        from: TypeTag::Boolean,
        to: TypeTag::Decimal,
        default_cost: 2,
        coerce: boolean_to_decimal,
    },
    CatalogEntry {
        from: TypeTag::Boolean,
        to: TypeTag::Fraction,
        default_cost: 3,
        coerce: boolean_to_fraction,
    },
    CatalogEntry {
        from: TypeTag::String,
        to: TypeTag::Number,
        default_cost: 1,
        coerce: string_to_number,
    },
    CatalogEntry {
        from: TypeTag::Number,
        to: TypeTag::Complex,
        default_cost: 2,
        coerce: number_to_complex,
    },
    CatalogEntry {
        from: TypeTag::Number,
        to: TypeTag::Fraction,
        default_cost: 3,
        coerce: number_to_fraction,
    },
    CatalogEntry {
        from: TypeTag::Decimal,
        to: TypeTag::Complex,
        default_cost: 3,
        coerce: decimal_to_complex,
    },
    CatalogEntry {
        from: TypeTag::Fraction,
        to: TypeTag::Complex,
        default_cost: 3,
        coerce: fraction_to_complex,
    },
    CatalogEntry {
        from: TypeTag::Fraction,
        to: TypeTag::Decimal,
        default_cost: 2,
        coerce: fraction_to_decimal,
    },
];

/// Find the catalog entry for a pair.
pub fn catalog_entry(from: TypeTag, to: TypeTag) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.from == from && entry.to == to)
}

/// The whole catalog at default costs.
pub fn default_table() -> ConversionTable {
    CATALOG.iter().fold(ConversionTable::new(), |table, entry| {
        table.with(entry.from, entry.to, entry.default_cost, entry.coerce)
    })
}

fn boolean_to_number(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Boolean(b) => Ok(Value::Number(if *b { 1.0 } else { 0.0 })),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Boolean)),
    }
}

fn boolean_to_decimal(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Boolean(b) => Ok(Value::Decimal(if *b { Decimal::ONE } else { Decimal::ZERO })),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Boolean)),
    }
}

fn boolean_to_fraction(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Boolean(b) => Ok(Value::Fraction(BigRational::from_integer(BigInt::from(
            u8::from(*b),
        )))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Boolean)),
    }
}

fn string_to_number(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| ConversionFailure::new(format!("\"{s}\" is not a valid number"))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::String)),
    }
}

fn number_to_complex(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Number(n) => Ok(Value::Complex(Complex64::new(*n, 0.0))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Number)),
    }
}

/// Exact: the fraction equals the binary value of the float.
fn number_to_fraction(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Number(n) => BigRational::from_float(*n)
            .map(Value::Fraction)
            .ok_or_else(|| ConversionFailure::new(format!("{n} has no fraction representation"))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Number)),
    }
}

fn decimal_to_complex(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Decimal(d) => d
            .to_f64()
            .map(|re| Value::Complex(Complex64::new(re, 0.0)))
            .ok_or_else(|| ConversionFailure::new(format!("{d} is out of floating point range"))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Decimal)),
    }
}

fn fraction_to_complex(value: &Value) -> Result<Value, ConversionFailure> {
    match value {
        Value::Fraction(r) => r
            .to_f64()
            .map(|re| Value::Complex(Complex64::new(re, 0.0)))
            .ok_or_else(|| ConversionFailure::new(format!("{r} is out of floating point range"))),
        other => Err(ConversionFailure::unexpected(other.type_tag(), TypeTag::Fraction)),
    }
}

/// Numerator over denominator in decimal arithmetic; a fraction whose
/// expansion does not terminate is rounded to 28 significant digits.
fn fraction_to_decimal(value: &Value) -> Result<Value, ConversionFailure> {
    let Value::Fraction(r) = value else {
        return Err(ConversionFailure::unexpected(value.type_tag(), TypeTag::Fraction));
    };
    let out_of_range = || ConversionFailure::new(format!("{r} is out of Decimal range"));

    let numer = r.numer().to_i128().and_then(Decimal::from_i128).ok_or_else(out_of_range)?;
    let denom = r.denom().to_i128().and_then(Decimal::from_i128).ok_or_else(out_of_range)?;
    numer
        .checked_div(denom)
        .map(Value::Decimal)
        .ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fraction(numer: i64, denom: i64) -> Value {
        Value::Fraction(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    #[test]
    fn test_catalog_pairs_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert!((a.from, a.to) != (b.from, b.to), "{} -> {} listed twice", a.from, a.to);
            }
        }
    }

    #[test]
    fn test_no_number_to_decimal() {
        assert!(catalog_entry(TypeTag::Number, TypeTag::Decimal).is_none());
        assert!(default_table().lookup(TypeTag::Number, TypeTag::Decimal).is_none());
    }

    #[test]
    fn test_default_table_matches_catalog() {
        let table = default_table();
        assert_eq!(table.len(), CATALOG.len());
        for entry in CATALOG {
            let conversion = table.lookup(entry.from, entry.to).unwrap();
            assert_eq!(conversion.cost(), entry.default_cost);
        }
    }

    #[test]
    fn test_boolean_conversions() {
        assert_eq!(boolean_to_number(&Value::from(true)), Ok(Value::Number(1.0)));
        assert_eq!(boolean_to_decimal(&Value::from(false)), Ok(Value::Decimal(Decimal::ZERO)));
        assert_eq!(boolean_to_fraction(&Value::from(true)), Ok(fraction(1, 1)));
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number(&Value::from(" 2.5 ")), Ok(Value::Number(2.5)));
        let err = string_to_number(&Value::from("two")).unwrap_err();
        assert_eq!(err.message(), "\"two\" is not a valid number");
    }

    #[test]
    fn test_number_to_fraction_is_exact() {
        assert_eq!(number_to_fraction(&Value::from(0.5)), Ok(fraction(1, 2)));
        assert_eq!(number_to_fraction(&Value::from(-3)), Ok(fraction(-3, 1)));
        assert!(number_to_fraction(&Value::Number(f64::NAN)).is_err());
        assert!(number_to_fraction(&Value::Number(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_fraction_to_decimal() {
        assert_eq!(
            fraction_to_decimal(&fraction(3, 4)),
            Ok(Value::Decimal(Decimal::new(75, 2)))
        );
        let third = fraction_to_decimal(&fraction(1, 3)).unwrap();
        assert!(third.to_string().starts_with("0.3333333333"));
    }

    #[test]
    fn test_to_complex() {
        assert_eq!(
            fraction_to_complex(&fraction(1, 4)),
            Ok(Value::Complex(Complex64::new(0.25, 0.0)))
        );
        assert_eq!(
            decimal_to_complex(&Value::Decimal(Decimal::new(-15, 1))),
            Ok(Value::Complex(Complex64::new(-1.5, 0.0)))
        );
    }

    #[test]
    fn test_wrong_source_type() {
        let err = number_to_complex(&Value::from("1")).unwrap_err();
        assert_eq!(err.message(), "expected number, got string");
    }
}

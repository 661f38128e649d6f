//! Runtime values and their type tags.
//!
//! [`Value`] is the closed set of representations an operation can be
//! dispatched on. The numeric payloads come from the `num` family and
//! `rust_decimal`; the dispatch core only ever looks at [`Value::type_tag`].

use std::fmt;

use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::error::{DispatchError, DispatchResult};

/// Runtime type of a [`Value`], as named in signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Number,
    Boolean,
    String,
    Decimal,
    Fraction,
    Complex,
    Unit,
    Array,
    Matrix,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::String,
        TypeTag::Decimal,
        TypeTag::Fraction,
        TypeTag::Complex,
        TypeTag::Unit,
        TypeTag::Array,
        TypeTag::Matrix,
    ];

    /// Canonical name, used in signatures and error messages.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::String => "string",
            TypeTag::Decimal => "Decimal",
            TypeTag::Fraction => "Fraction",
            TypeTag::Complex => "Complex",
            TypeTag::Unit => "Unit",
            TypeTag::Array => "Array",
            TypeTag::Matrix => "Matrix",
        }
    }

    /// Look up a tag by any of its accepted signature names.
    ///
    /// `BigNumber` is accepted as an alias of `Decimal`, and the scalar
    /// primitives may be written in either case.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        let tag = match name {
            "number" | "Number" => TypeTag::Number,
            "boolean" | "Boolean" => TypeTag::Boolean,
            "string" | "String" => TypeTag::String,
            "Decimal" | "BigNumber" => TypeTag::Decimal,
            "Fraction" => TypeTag::Fraction,
            "Complex" => TypeTag::Complex,
            "Unit" => TypeTag::Unit,
            "Array" => TypeTag::Array,
            "Matrix" => TypeTag::Matrix,
            _ => return None,
        };
        Some(tag)
    }

    pub fn is_collection(self) -> bool {
        matches!(self, TypeTag::Array | TypeTag::Matrix)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A physical quantity: a numeric payload tagged with a unit name.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    value: Box<Value>,
    name: String,
}

impl Unit {
    pub fn new(value: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            value: Box::new(value.into()),
            name: name.into(),
        }
    }

    /// The underlying numeric value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same unit carrying a different value.
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            value: Box::new(value),
            name: self.name.clone(),
        }
    }
}

/// A dense, rectangular matrix.
///
/// Rows are stored as nested [`Value::Array`]s; `size` holds the length of
/// every dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<Value>,
    size: Vec<usize>,
}

impl Matrix {
    /// Build a matrix from nested rows, rejecting jagged data.
    pub fn new(data: Vec<Value>) -> DispatchResult<Self> {
        let size = rectangular_size(&data)?;
        Ok(Self { data, size })
    }

    /// Build a matrix whose size is already known to match `data`.
    pub(crate) fn with_size(data: Vec<Value>, size: Vec<usize>) -> Self {
        Self { data, size }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn size(&self) -> &[usize] {
        &self.size
    }

    pub fn into_data(self) -> Vec<Value> {
        self.data
    }
}

fn rectangular_size(data: &[Value]) -> DispatchResult<Vec<usize>> {
    let mut size = vec![data.len()];
    let Some(first) = data.first() else {
        return Ok(size);
    };

    match first {
        Value::Array(row) => {
            let inner = rectangular_size(row)?;
            for (index, item) in data.iter().enumerate().skip(1) {
                let Value::Array(other) = item else {
                    return Err(DispatchError::structural(format!(
                        "dimension mismatch at index {index}: expected Array, found {}",
                        item.type_tag()
                    )));
                };
                let found = rectangular_size(other)?;
                if found != inner {
                    return Err(DispatchError::structural(format!(
                        "dimension mismatch at index {index}: expected size {inner:?}, \
                         found {found:?}"
                    )));
                }
            }
            size.extend(inner);
        }
        _ => {
            if let Some(index) = data.iter().position(|v| matches!(v, Value::Array(_))) {
                return Err(DispatchError::structural(format!(
                    "dimension mismatch at index {index}: expected a scalar, found Array"
                )));
            }
        }
    }

    Ok(size)
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    String(String),
    Decimal(Decimal),
    Fraction(BigRational),
    Complex(Complex64),
    Unit(Unit),
    Array(Vec<Value>),
    Matrix(Matrix),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Number(_) => TypeTag::Number,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::String(_) => TypeTag::String,
            Value::Decimal(_) => TypeTag::Decimal,
            Value::Fraction(_) => TypeTag::Fraction,
            Value::Complex(_) => TypeTag::Complex,
            Value::Unit(_) => TypeTag::Unit,
            Value::Array(_) => TypeTag::Array,
            Value::Matrix(_) => TypeTag::Matrix,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.type_tag().is_collection()
    }

    /// True for a numeric zero of any scalar representation.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Number(n) => *n == 0.0,
            Value::Decimal(d) => d.is_zero(),
            Value::Fraction(r) => r.is_zero(),
            Value::Complex(c) => c.is_zero(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_fraction(&self) -> Option<&BigRational> {
        match self {
            Value::Fraction(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<&Unit> {
        match self {
            Value::Unit(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<BigRational> for Value {
    fn from(r: BigRational) -> Self {
        Value::Fraction(r)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl From<Unit> for Value {
    fn from(u: Unit) -> Self {
        Value::Unit(u)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Fraction(r) => write!(f, "{r}"),
            Value::Complex(c) => {
                if c.im < 0.0 {
                    write!(f, "{} - {}i", c.re, -c.im)
                } else {
                    write!(f, "{} + {}i", c.re, c.im)
                }
            }
            Value::Unit(u) => write!(f, "{} {}", u.value, u.name),
            Value::Array(items) => write_items(f, items),
            Value::Matrix(m) => write_items(f, &m.data),
        }
    }
}

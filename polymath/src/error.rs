//! Error types for dispatch, traversal and signature registration.

use std::fmt;

use thiserror::Error;

use crate::value::TypeTag;

/// Coarse classification of a [`DispatchError`].
///
/// Lets callers branch on the failure without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No signature accepts the argument types, even after conversion.
    UnsupportedType,
    /// No signature accepts the number of arguments.
    Arity,
    /// An implementation rejected the value of an argument.
    Domain,
    /// A collection was malformed or not a collection at all.
    Structural,
    /// The registry has no operation with the requested name.
    UnknownOperation,
}

/// A single argument position that no signature could accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Zero-based argument position.
    pub position: usize,
    /// Runtime type of the argument.
    pub actual: TypeTag,
    /// Types accepted at this position by signatures of the same arity.
    pub expected: Vec<TypeTag>,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "argument {}: got {}, expected ", self.position, self.actual)?;
        if self.expected.is_empty() {
            return write!(f, "nothing");
        }
        for (i, tag) in self.expected.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

fn render_mismatches(mismatches: &[TypeMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_arities(arities: &[usize]) -> String {
    arities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Errors raised while invoking a dispatched operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error(
        "unexpected type of argument in function {operation} ({})",
        render_mismatches(.mismatches)
    )]
    UnsupportedType {
        operation: String,
        mismatches: Vec<TypeMismatch>,
    },

    #[error(
        "wrong number of arguments in function {operation} ({found} provided, {} expected)",
        render_arities(.expected)
    )]
    Arity {
        operation: String,
        found: usize,
        expected: Vec<usize>,
    },

    #[error("{message} in function {operation}")]
    Domain { operation: String, message: String },

    #[error("malformed collection: {message}")]
    Structural { message: String },

    #[error("undefined function {name}")]
    UnknownOperation { name: String },
}

impl DispatchError {
    pub fn domain(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// An implementation received a value whose variant does not match the
    /// signature it was registered under.
    pub fn unexpected(
        operation: impl Into<String>,
        position: usize,
        actual: TypeTag,
        expected: TypeTag,
    ) -> Self {
        Self::UnsupportedType {
            operation: operation.into(),
            mismatches: vec![TypeMismatch {
                position,
                actual,
                expected: vec![expected],
            }],
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Self::Arity { .. } => ErrorKind::Arity,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::Structural { .. } => ErrorKind::Structural,
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
        }
    }

    /// The operation this error was raised by, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::UnsupportedType { operation, .. }
            | Self::Arity { operation, .. }
            | Self::Domain { operation, .. } => Some(operation),
            Self::UnknownOperation { name } => Some(name),
            Self::Structural { .. } => None,
        }
    }

    /// Offending argument positions of an [`ErrorKind::UnsupportedType`] error.
    pub fn positions(&self) -> Vec<usize> {
        match self {
            Self::UnsupportedType { mismatches, .. } => {
                mismatches.iter().map(|m| m.position).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Dispatch result type.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors raised while defining an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("unknown type `{name}` in signature \"{signature}\"")]
    UnknownType { signature: String, name: String },

    #[error("empty type at parameter {position} in signature \"{signature}\"")]
    EmptyToken { signature: String, position: usize },

    #[error("signature ({signature}) is defined twice for function {operation}")]
    Duplicate { operation: String, signature: String },

    #[error("function {operation} is already defined")]
    AlreadyDefined { operation: String },

    #[error("function {operation} has no signatures")]
    NoSignatures { operation: String },
}

/// A coercion rejected the value it was asked to convert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConversionFailure {
    message: String,
}

impl ConversionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The coercion was handed a value of the wrong source type.
    pub fn unexpected(actual: TypeTag, expected: TypeTag) -> Self {
        Self::new(format!("expected {expected}, got {actual}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message_names_operation_and_types() {
        let err = DispatchError::UnsupportedType {
            operation: "bit_not".to_string(),
            mismatches: vec![TypeMismatch {
                position: 0,
                actual: TypeTag::Complex,
                expected: vec![TypeTag::Number, TypeTag::Decimal],
            }],
        };

        assert_eq!(
            err.to_string(),
            "unexpected type of argument in function bit_not \
             (argument 0: got Complex, expected number | Decimal)"
        );
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.operation(), Some("bit_not"));
        assert_eq!(err.positions(), vec![0]);
    }

    #[test]
    fn test_arity_message() {
        let err = DispatchError::Arity {
            operation: "sign".to_string(),
            found: 3,
            expected: vec![1, 2],
        };
        assert_eq!(
            err.to_string(),
            "wrong number of arguments in function sign (3 provided, 1 or 2 expected)"
        );
        assert_eq!(err.kind(), ErrorKind::Arity);
    }

    #[test]
    fn test_domain_and_structural() {
        let err = DispatchError::domain("bit_not", "Integer expected");
        assert_eq!(err.to_string(), "Integer expected in function bit_not");
        assert_eq!(err.kind(), ErrorKind::Domain);

        let err = DispatchError::structural("dimension mismatch");
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert_eq!(err.operation(), None);
        assert!(err.positions().is_empty());
    }
}

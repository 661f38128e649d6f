//! Core type definitions for dispatch resolution.

use std::fmt;
use std::sync::Arc;

use crate::error::{DispatchError, DispatchResult};
use crate::signature::{format_params, Signature};
use crate::value::{TypeTag, Value};

use super::operation::Operation;

/// The body of one signature of an operation.
///
/// Receives the operation itself so it can dispatch recursively (into a
/// unit's payload, a collection's elements) without going back through a
/// registry.
pub type ImplFn = dyn Fn(&Operation, &[Value]) -> DispatchResult<Value> + Send + Sync;

/// Shared handle to an implementation.
pub type Implementation = Arc<ImplFn>;

/// Wrap a closure as an [`Implementation`].
pub fn implementation<F>(f: F) -> Implementation
where
    F: Fn(&Operation, &[Value]) -> DispatchResult<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a one-argument closure as an [`Implementation`].
pub fn unary<F>(f: F) -> Implementation
where
    F: Fn(&Operation, &Value) -> DispatchResult<Value> + Send + Sync + 'static,
{
    Arc::new(move |op: &Operation, args: &[Value]| match args {
        [x] => f(op, x),
        _ => Err(DispatchError::Arity {
            operation: op.name().to_string(),
            found: args.len(),
            expected: vec![1],
        }),
    })
}

/// Wrap a two-argument closure as an [`Implementation`].
pub fn binary<F>(f: F) -> Implementation
where
    F: Fn(&Operation, &Value, &Value) -> DispatchResult<Value> + Send + Sync + 'static,
{
    Arc::new(move |op: &Operation, args: &[Value]| match args {
        [x, y] => f(op, x, y),
        _ => Err(DispatchError::Arity {
            operation: op.name().to_string(),
            found: args.len(),
            expected: vec![2],
        }),
    })
}

/// One concrete signature after union expansion.
#[derive(Clone)]
pub struct Candidate {
    /// Position in registration order, after expansion.
    pub(crate) index: usize,
    /// Concrete parameter types.
    pub(crate) params: Vec<TypeTag>,
    /// The declared signature this candidate was expanded from.
    pub(crate) declared: Arc<Signature>,
    pub(crate) implementation: Implementation,
}

impl Candidate {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    pub fn declared(&self) -> &Signature {
        &self.declared
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn invoke(&self, op: &Operation, args: &[Value]) -> DispatchResult<Value> {
        (self.implementation)(op, args)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("index", &self.index)
            .field("params", &format_params(&self.params))
            .field("declared", &self.declared.to_string())
            .finish_non_exhaustive()
    }
}

/// A conversion the resolver decided to apply to one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedConversion {
    pub position: usize,
    pub from: TypeTag,
    pub to: TypeTag,
    pub cost: u32,
}

/// How a call's argument types were matched to a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The argument types equal the candidate's parameters.
    Exact { candidate: usize },
    /// The candidate is reachable after converting some arguments.
    Converted {
        candidate: usize,
        conversions: Vec<PlannedConversion>,
        cost: u64,
    },
}

impl Resolution {
    /// Index of the selected candidate.
    pub fn candidate(&self) -> usize {
        match self {
            Resolution::Exact { candidate } | Resolution::Converted { candidate, .. } => *candidate,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact { .. })
    }
}

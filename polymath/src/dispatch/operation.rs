//! The dispatched operation handed out by a registry.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::conversion::ConversionTable;
use crate::error::{DispatchError, DispatchResult, SignatureError, TypeMismatch};
use crate::signature::{format_params, Signature};
use crate::stack::ensure_sufficient_stack;
use crate::value::{TypeTag, Value};

use super::resolver::SignatureTable;
use super::types::{Candidate, Implementation, PlannedConversion, Resolution};

/// A named operation with a fixed signature table.
///
/// Immutable after construction; every call is a pure resolution over the
/// table and the argument types, so an `Operation` can be shared across
/// threads freely.
pub struct Operation {
    name: String,
    table: SignatureTable,
    conversions: Arc<ConversionTable>,
}

impl Operation {
    pub(crate) fn new(
        name: &str,
        signatures: Vec<(Signature, Implementation)>,
        conversions: Arc<ConversionTable>,
    ) -> Result<Self, SignatureError> {
        let table = SignatureTable::build(name, signatures)?;
        debug!(
            operation = name,
            candidates = table.candidates().len(),
            "defined operation"
        );
        Ok(Self {
            name: name.to_string(),
            table,
            conversions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct parameter counts accepted, ascending.
    pub fn arities(&self) -> &[usize] {
        self.table.arities()
    }

    /// Expanded candidates in registration order.
    pub fn candidates(&self) -> &[Candidate] {
        self.table.candidates()
    }

    /// Expanded concrete signatures in registration order.
    pub fn signatures(&self) -> impl Iterator<Item = &[TypeTag]> + '_ {
        self.table.candidates().iter().map(Candidate::params)
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Decide which candidate a call with these argument types would run,
    /// without running it.
    pub fn resolve(&self, types: &[TypeTag]) -> DispatchResult<Resolution> {
        self.table.resolve(&self.name, types, &self.conversions)
    }

    /// Invoke the operation.
    pub fn call(&self, args: &[Value]) -> DispatchResult<Value> {
        ensure_sufficient_stack(|| {
            let types: SmallVec<[TypeTag; 4]> = args.iter().map(Value::type_tag).collect();
            match self.resolve(&types)? {
                Resolution::Exact { candidate } => {
                    trace!(
                        operation = %self.name,
                        signature = %format_params(&types),
                        "exact match"
                    );
                    self.table.candidate(candidate).invoke(self, args)
                }
                Resolution::Converted {
                    candidate,
                    conversions,
                    cost,
                } => {
                    let target = self.table.candidate(candidate);
                    debug!(
                        operation = %self.name,
                        from = %format_params(&types),
                        to = %format_params(target.params()),
                        cost,
                        "dispatching through conversion"
                    );
                    let converted = self.convert_arguments(args, &conversions)?;
                    target.invoke(self, &converted)
                }
            }
        })
    }

    /// Invoke the operation on a single argument.
    pub fn call_one(&self, arg: &Value) -> DispatchResult<Value> {
        self.call(std::slice::from_ref(arg))
    }

    /// Build the argument list for a converted call. Positions without a
    /// planned conversion are cloned once; converted positions never are.
    fn convert_arguments(
        &self,
        args: &[Value],
        plan: &[PlannedConversion],
    ) -> DispatchResult<Vec<Value>> {
        let mut converted = Vec::with_capacity(args.len());
        for (position, arg) in args.iter().enumerate() {
            match plan.iter().find(|step| step.position == position) {
                Some(step) => converted.push(self.convert_one(arg, step)?),
                None => converted.push(arg.clone()),
            }
        }
        Ok(converted)
    }

    fn convert_one(&self, arg: &Value, step: &PlannedConversion) -> DispatchResult<Value> {
        let conversion = self.conversions.lookup(step.from, step.to).ok_or_else(|| {
            DispatchError::UnsupportedType {
                operation: self.name.clone(),
                mismatches: vec![TypeMismatch {
                    position: step.position,
                    actual: step.from,
                    expected: vec![step.to],
                }],
            }
        })?;
        conversion.apply(arg).map_err(|failure| {
            DispatchError::domain(
                self.name.clone(),
                format!("cannot convert {} to {}: {failure}", step.from, step.to),
            )
        })
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field(
                "signatures",
                &self.signatures().map(format_params).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

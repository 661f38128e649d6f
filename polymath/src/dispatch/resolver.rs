//! Signature table and resolution algorithm.
//!
//! The table is built once per operation. Union tokens are expanded into
//! concrete candidates up front, so an exact match is a single hash lookup
//! keyed by the argument tags. Only when that lookup misses do we walk the
//! candidates and price conversions.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::conversion::ConversionTable;
use crate::error::{DispatchError, DispatchResult, SignatureError, TypeMismatch};
use crate::signature::{format_params, Signature};
use crate::value::TypeTag;

use super::types::{Candidate, Implementation, PlannedConversion, Resolution};

/// Expanded, immutable signature table of one operation.
pub(crate) struct SignatureTable {
    candidates: Vec<Candidate>,
    exact: FxHashMap<Vec<TypeTag>, usize>,
    /// Distinct arities, ascending.
    arities: SmallVec<[usize; 2]>,
}

impl SignatureTable {
    pub(crate) fn build(
        operation: &str,
        signatures: Vec<(Signature, Implementation)>,
    ) -> Result<Self, SignatureError> {
        if signatures.is_empty() {
            return Err(SignatureError::NoSignatures {
                operation: operation.to_string(),
            });
        }

        let mut candidates = Vec::new();
        let mut exact = FxHashMap::default();
        let mut arities: SmallVec<[usize; 2]> = SmallVec::new();

        for (signature, implementation) in signatures {
            let declared = Arc::new(signature);
            if !arities.contains(&declared.arity()) {
                arities.push(declared.arity());
            }

            for params in declared.expand() {
                let index = candidates.len();
                match exact.entry(params.clone()) {
                    Entry::Occupied(_) => {
                        return Err(SignatureError::Duplicate {
                            operation: operation.to_string(),
                            signature: format_params(&params),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
                candidates.push(Candidate {
                    index,
                    params,
                    declared: Arc::clone(&declared),
                    implementation: Arc::clone(&implementation),
                });
            }
        }
        arities.sort_unstable();

        Ok(Self {
            candidates,
            exact,
            arities,
        })
    }

    pub(crate) fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub(crate) fn candidate(&self, index: usize) -> &Candidate {
        &self.candidates[index]
    }

    pub(crate) fn arities(&self) -> &[usize] {
        &self.arities
    }

    /// Select a candidate for the given argument types.
    ///
    /// 1. **Arity**: some candidate must take `args.len()` parameters
    /// 2. **Exact**: the tags equal a candidate's parameters
    /// 3. **Conversion**: the candidate reachable at the lowest total cost,
    ///    converting only the arguments whose tag differs; ties go to the
    ///    earliest registered candidate
    /// 4. **No match**: report the positions no candidate can accept
    pub(crate) fn resolve(
        &self,
        operation: &str,
        args: &[TypeTag],
        conversions: &ConversionTable,
    ) -> DispatchResult<Resolution> {
        if !self.arities.contains(&args.len()) {
            return Err(DispatchError::Arity {
                operation: operation.to_string(),
                found: args.len(),
                expected: self.arities.to_vec(),
            });
        }

        if let Some(&candidate) = self.exact.get(args) {
            return Ok(Resolution::Exact { candidate });
        }

        let mut best: Option<(u64, usize, Vec<PlannedConversion>)> = None;
        for candidate in self.candidates.iter().filter(|c| c.arity() == args.len()) {
            let Some((cost, plan)) = price(candidate, args, conversions) else {
                continue;
            };
            // Strictly cheaper only: candidates are visited in registration
            // order, so the first of equally cheap candidates is kept.
            if best.as_ref().map_or(true, |(best_cost, ..)| cost < *best_cost) {
                best = Some((cost, candidate.index, plan));
            }
        }

        match best {
            Some((cost, candidate, conversions)) => Ok(Resolution::Converted {
                candidate,
                conversions,
                cost,
            }),
            None => Err(self.unsupported(operation, args, conversions)),
        }
    }

    /// Types accepted at `position` by candidates of the given arity, in
    /// registration order.
    fn expected_at(&self, arity: usize, position: usize) -> Vec<TypeTag> {
        let mut expected = Vec::new();
        for candidate in self.candidates.iter().filter(|c| c.arity() == arity) {
            let tag = candidate.params[position];
            if !expected.contains(&tag) {
                expected.push(tag);
            }
        }
        expected
    }

    fn unsupported(
        &self,
        operation: &str,
        args: &[TypeTag],
        conversions: &ConversionTable,
    ) -> DispatchError {
        let mismatch = |position: usize, actual: TypeTag| TypeMismatch {
            position,
            actual,
            expected: self.expected_at(args.len(), position),
        };

        let mut mismatches: Vec<TypeMismatch> = args
            .iter()
            .enumerate()
            .map(|(position, &actual)| mismatch(position, actual))
            .filter(|m| {
                !m.expected
                    .iter()
                    .any(|&to| to == m.actual || conversions.lookup(m.actual, to).is_some())
            })
            .collect();

        // Every argument is acceptable on its own; only the combination is
        // not. Report all positions.
        if mismatches.is_empty() {
            mismatches = args
                .iter()
                .enumerate()
                .map(|(position, &actual)| mismatch(position, actual))
                .collect();
        }

        DispatchError::UnsupportedType {
            operation: operation.to_string(),
            mismatches,
        }
    }
}

/// Total conversion cost to reach `candidate`, or `None` if some argument
/// has no conversion to the parameter type.
fn price(
    candidate: &Candidate,
    args: &[TypeTag],
    conversions: &ConversionTable,
) -> Option<(u64, Vec<PlannedConversion>)> {
    let mut cost = 0u64;
    let mut plan = Vec::new();
    for (position, (&from, &to)) in args.iter().zip(candidate.params()).enumerate() {
        if from == to {
            continue;
        }
        let conversion = conversions.lookup(from, to)?;
        cost += u64::from(conversion.cost());
        plan.push(PlannedConversion {
            position,
            from,
            to,
            cost: conversion.cost(),
        });
    }
    Some((cost, plan))
}

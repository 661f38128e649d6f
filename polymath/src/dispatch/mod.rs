//! Typed multiple dispatch over runtime values.
//!
//! An operation is a name plus an ordered list of signatures, each bound to
//! an implementation. A call inspects the type tags of all its arguments and
//! runs the implementation of the best matching signature.
//!
//! # Algorithm Overview
//!
//! 1. **Expand**: at definition time every union token is expanded, so each
//!    candidate is a concrete list of tags
//! 2. **Check arity**: the argument count must match some candidate
//! 3. **Exact match**: hash lookup on the argument tags
//! 4. **Convert**: otherwise pick the cheapest candidate reachable through
//!    the conversion table, earliest registered on ties
//! 5. **Fail**: report the positions and types nothing accepts
//!
//! # Module Structure
//!
//! - [`types`] - Implementations, candidates and resolutions
//! - [`resolver`] - Signature table and the resolution algorithm
//! - [`operation`] - The callable operation

mod operation;
mod resolver;
mod types;


pub use operation::Operation;

pub use types::{
    binary,
    implementation,
    unary,
    Candidate,
    ImplFn,
    Implementation,
    PlannedConversion,
    Resolution,
};

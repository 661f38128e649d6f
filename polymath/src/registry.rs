//! Operation registry.
//!
//! A [`Registry`] is an explicit context: it owns one conversion table and
//! the operations defined against it. Definition takes `&mut self` and is
//! expected to finish before the registry is shared; afterwards it is only
//! read, so an `Arc<Registry>` can serve any number of threads.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::conversion::ConversionTable;
use crate::dispatch::{Implementation, Operation};
use crate::error::{DispatchError, DispatchResult, SignatureError};
use crate::signature::Signature;
use crate::value::Value;

/// Named operations sharing one conversion table.
#[derive(Debug)]
pub struct Registry {
    conversions: Arc<ConversionTable>,
    operations: IndexMap<String, Arc<Operation>>,
}

impl Registry {
    pub fn new(conversions: ConversionTable) -> Self {
        Self {
            conversions: Arc::new(conversions),
            operations: IndexMap::new(),
        }
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Define an operation from `(signature, implementation)` pairs.
    ///
    /// Order matters: it is the tie-break when several signatures are
    /// reachable through conversions at the same cost.
    pub fn define<I, S>(
        &mut self,
        name: &str,
        signatures: I,
    ) -> Result<Arc<Operation>, SignatureError>
    where
        I: IntoIterator<Item = (S, Implementation)>,
        S: AsRef<str>,
    {
        if self.operations.contains_key(name) {
            return Err(SignatureError::AlreadyDefined {
                operation: name.to_string(),
            });
        }

        let parsed = signatures
            .into_iter()
            .map(|(source, implementation)| {
                Signature::parse(source.as_ref()).map(|signature| (signature, implementation))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let operation = Arc::new(Operation::new(name, parsed, Arc::clone(&self.conversions))?);
        self.operations
            .insert(name.to_string(), Arc::clone(&operation));
        Ok(operation)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Operation>> {
        self.operations.get(name)
    }

    /// Look up `name` and invoke it.
    pub fn call(&self, name: &str, args: &[Value]) -> DispatchResult<Value> {
        self.operations
            .get(name)
            .ok_or_else(|| DispatchError::UnknownOperation {
                name: name.to_string(),
            })?
            .call(args)
    }

    /// Operation names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ConversionTable::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::unary;
    use crate::error::ErrorKind;

    fn identity() -> Implementation {
        unary(|_, x| Ok(x.clone()))
    }

    #[test]
    fn test_define_and_call() {
        let mut registry = Registry::default();
        registry.define("id", [("number", identity())]).unwrap();

        assert_eq!(registry.call("id", &[Value::from(4)]), Ok(Value::from(4)));
        assert!(registry.get("id").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_operation() {
        let registry = Registry::default();
        let err = registry.call("missing", &[Value::from(1)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOperation);
        assert_eq!(err.to_string(), "undefined function missing");
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut registry = Registry::default();
        registry.define("id", [("number", identity())]).unwrap();
        let err = registry.define("id", [("boolean", identity())]).unwrap_err();
        assert_eq!(
            err,
            SignatureError::AlreadyDefined {
                operation: "id".to_string()
            }
        );
    }

    #[test]
    fn test_bad_signature_does_not_register() {
        let mut registry = Registry::default();
        let err = registry.define("id", [("number", identity()), ("Widget", identity())]);
        assert!(matches!(err, Err(SignatureError::UnknownType { .. })));
        assert!(registry.get("id").is_none());
    }

    #[test]
    fn test_names_in_definition_order() {
        let mut registry = Registry::default();
        registry.define("b", [("number", identity())]).unwrap();
        registry.define("a", [("number", identity())]).unwrap();
        registry.define("c", [("number", identity())]).unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = Registry::default();
        let mut second = Registry::default();
        first.define("id", [("number", identity())]).unwrap();
        second.define("id", [("boolean", identity())]).unwrap();

        assert!(first.call("id", &[Value::from(1)]).is_ok());
        assert!(second.call("id", &[Value::from(1)]).is_err());
        assert!(second.call("id", &[Value::from(true)]).is_ok());
    }
}

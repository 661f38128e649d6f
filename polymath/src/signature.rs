//! Signature parsing and union expansion.
//!
//! Signatures use the typed-function notation: parameters are separated by
//! commas and a parameter may accept a union of types separated by `|`.
//!
//! ```text
//! "number"
//! "Array | Matrix"
//! "Array | Matrix, number | BigNumber"
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::SignatureError;
use crate::value::TypeTag;

/// The type accepted at one parameter position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeToken {
    Concrete(TypeTag),
    /// Two or more distinct tags, in declaration order.
    Union(Vec<TypeTag>),
}

impl TypeToken {
    pub fn members(&self) -> &[TypeTag] {
        match self {
            TypeToken::Concrete(tag) => std::slice::from_ref(tag),
            TypeToken::Union(tags) => tags,
        }
    }

    pub fn accepts(&self, tag: TypeTag) -> bool {
        self.members().contains(&tag)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.members().iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

/// An ordered list of parameter tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    tokens: Vec<TypeToken>,
}

impl Signature {
    pub fn new(tokens: Vec<TypeToken>) -> Self {
        Self { tokens }
    }

    pub fn parse(source: &str) -> Result<Self, SignatureError> {
        if source.trim().is_empty() {
            return Ok(Self { tokens: Vec::new() });
        }

        let mut tokens = Vec::new();
        for (position, param) in source.split(',').enumerate() {
            let mut members: Vec<TypeTag> = Vec::new();
            for name in param.split('|').map(str::trim) {
                if name.is_empty() {
                    return Err(SignatureError::EmptyToken {
                        signature: source.to_string(),
                        position,
                    });
                }
                let tag = TypeTag::from_name(name).ok_or_else(|| SignatureError::UnknownType {
                    signature: source.to_string(),
                    name: name.to_string(),
                })?;
                if !members.contains(&tag) {
                    members.push(tag);
                }
            }

            let token = match members.as_slice() {
                [tag] => TypeToken::Concrete(*tag),
                _ => TypeToken::Union(members),
            };
            tokens.push(token);
        }

        Ok(Self { tokens })
    }

    pub fn arity(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[TypeToken] {
        &self.tokens
    }

    /// Expand unions into every concrete parameter list they stand for.
    ///
    /// The cartesian product is produced in declaration order, leftmost
    /// parameter varying slowest.
    pub fn expand(&self) -> Vec<Vec<TypeTag>> {
        let mut expanded: Vec<Vec<TypeTag>> = vec![Vec::with_capacity(self.arity())];
        for token in &self.tokens {
            expanded = expanded
                .into_iter()
                .flat_map(|prefix| {
                    token.members().iter().map(move |&tag| {
                        let mut params = prefix.clone();
                        params.push(tag);
                        params
                    })
                })
                .collect();
        }
        expanded
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Render a concrete parameter list the way signatures are written.
pub fn format_params(params: &[TypeTag]) -> String {
    params
        .iter()
        .map(|tag| tag.name())
        .collect::<Vec<_>>()
        .join(", ")
}

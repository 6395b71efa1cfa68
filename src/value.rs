//! Module: value
//! Responsibility: the leaf-literal type predicates compare against.
//! Does not own: document/BSON encoding — that lives entirely with the
//! caller (spec.md §1 lists it as an external collaborator).

use serde::{Deserialize, Serialize};

///
/// Value
///
/// Deliberately small: the oracle only ever inspects a literal to ask "is
/// this null" (§4.4.1's sparse/null rule); everything else just flows
/// through untouched. A real planner's value type is far richer than this.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

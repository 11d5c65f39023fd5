use super::BreadTypeId;
use serde::{Deserialize, Serialize};

/// A kind of bread the bakery offers, e.g. "Sourdough".
///
/// Names are unique (case-sensitive). Records are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadType {
    pub id: BreadTypeId,
    pub name: String,
}

impl BreadType {
    pub fn new(id: impl Into<BreadTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// DTO for bread type creation.
#[derive(Debug, Clone)]
pub struct BreadTypeCreate {
    pub name: String,
}

impl BreadTypeCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

//! Field iteration over schema properties.
//!
//! Emitters recurse through [`fields`] instead of touching [`Properties`]
//! directly, so every consumer sees fields in the same (document) order and
//! with the same optionality rule.

use crate::schema::{Properties, SchemaNode};

/// A property of the object being emitted.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub node: &'a SchemaNode,
}

impl<'a> Field<'a> {
    pub fn is_optional(&self) -> bool {
        self.node.is_optional()
    }

    pub fn description(&self) -> Option<&'a str> {
        self.node.description()
    }
}

/// Fields of `properties` in insertion order.
pub fn fields(properties: &Properties) -> impl Iterator<Item = Field<'_>> {
    properties.iter().map(|(name, node)| Field { name, node })
}

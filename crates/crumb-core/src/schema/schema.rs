use super::{Association, Attribute, SchemaBuilder};

use indexmap::IndexMap;

/// The compiled, immutable definition of an entity.
///
/// Built through [`SchemaBuilder`]; once published to the
/// [`Reflection`](super::Reflection) registry it is shared behind an `Arc`
/// and never mutated.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(super) name: String,
    pub(super) table_name: String,
    pub(super) attributes: IndexMap<String, Attribute>,
    pub(super) primary_key: String,
    pub(super) associations: IndexMap<String, Association>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Entity name the schema is registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn attributes(&self) -> impl ExactSizeIterator<Item = &Attribute> + '_ {
        self.attributes.values()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.attributes.keys().map(String::as_str)
    }

    pub fn primary_key(&self) -> &Attribute {
        &self.attributes[&self.primary_key]
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    pub fn associations(&self) -> impl Iterator<Item = &Association> + '_ {
        self.associations.values()
    }

    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.get(name)
    }
}

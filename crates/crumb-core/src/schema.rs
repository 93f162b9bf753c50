//! Entity schemas and the registry that resolves them by name.

mod association;
pub use association::{Association, AssociationKind};

mod attribute;
pub use attribute::Attribute;

mod builder;
pub use builder::{AssociationBuilder, AttributeBuilder, SchemaBuilder};

mod constraint;
pub use constraint::{Constraint, ConstraintLength, ConstraintPattern, ConstraintRange};

mod kind;
pub use kind::Kind;

mod name;
pub use name::Name;

mod reflection;
pub use reflection::Reflection;

#[allow(clippy::module_inception)]
mod schema;
pub use schema::Schema;

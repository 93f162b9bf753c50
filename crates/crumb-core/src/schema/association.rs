use super::{Name, Schema};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// The owner holds a foreign key to exactly one target record
    BelongsTo,

    /// Zero or more target records hold a foreign key to the owner
    HasMany,

    /// Like `HasMany`, resolving to the first matching record
    HasOne,
}

/// A declared relationship between two schemas.
///
/// The target is referenced by name and only resolved through the
/// [`Reflection`](super::Reflection) registry on first use, so the target
/// schema may be defined after the owner.
#[derive(Debug, Clone)]
pub struct Association {
    /// Name the association is accessed by
    pub name: String,

    pub kind: AssociationKind,

    /// Name of the target entity
    pub target: String,

    /// For `BelongsTo`, the foreign key attribute on the owner. For
    /// `HasMany`/`HasOne`, an explicit override of the target's inverse key.
    pub foreign_key: Option<String>,
}

impl Association {
    pub fn is_belongs_to(&self) -> bool {
        self.kind == AssociationKind::BelongsTo
    }

    pub fn is_has_many(&self) -> bool {
        self.kind == AssociationKind::HasMany
    }

    pub fn is_has_one(&self) -> bool {
        self.kind == AssociationKind::HasOne
    }

    /// The foreign key column relating `owner` to `target`.
    ///
    /// For `BelongsTo` this column lives on the owner; otherwise it lives on
    /// the target and is, in order of preference, the explicit override, the
    /// key of a `BelongsTo` on the target pointing back at the owner, or
    /// `singular(owner) + "_id"`.
    pub fn foreign_key(&self, owner: &Schema, target: &Schema) -> Result<String> {
        let (holder, foreign_key) = match self.kind {
            AssociationKind::BelongsTo => {
                let foreign_key = self
                    .foreign_key
                    .clone()
                    .unwrap_or_else(|| Name::new(&self.target).foreign_key());
                (owner, foreign_key)
            }
            AssociationKind::HasMany | AssociationKind::HasOne => {
                let foreign_key = match &self.foreign_key {
                    Some(foreign_key) => foreign_key.clone(),
                    None => target
                        .associations()
                        .find(|pair| pair.is_belongs_to() && pair.target == owner.name())
                        .and_then(|pair| pair.foreign_key.clone())
                        .unwrap_or_else(|| Name::new(owner.name()).foreign_key()),
                };
                (target, foreign_key)
            }
        };

        if holder.attribute(&foreign_key).is_none() {
            return Err(Error::invalid_schema(format!(
                "association `{}::{}` expects foreign key `{}` on `{}`",
                owner.name(),
                self.name,
                foreign_key,
                holder.name()
            )));
        }

        Ok(foreign_key)
    }
}

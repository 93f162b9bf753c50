use super::State;
use crate::{Db, Entity};

use crumb_core::{driver::Row, Result};

impl State {
    /// Builds the persisted entity for `row`, attaching one joined record per
    /// join under the join's association name.
    pub(super) fn hydrate(&self, db: &Db, row: Row) -> Result<Entity> {
        let mut entity = Entity::hydrate(db.clone(), self.schema.clone(), &row.values)?;

        for (join, record) in self.joins.iter().zip(&row.joins) {
            let target = Entity::hydrate(db.clone(), join.target.clone(), record)?;
            entity.assign_association(&join.association.name, target)?;
        }

        Ok(entity)
    }
}

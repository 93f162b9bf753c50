mod filter;
mod query;

use crumb_core::{
    async_trait,
    driver::{operation, Adapter, Connection, Record, RowVisitor},
    stmt::Stored,
    Context, Error, Result,
};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use url::Url;

/// Opens `memory://` connections. Every connection starts with an empty
/// store of its own.
#[derive(Debug, Default)]
pub struct Memory;

#[async_trait]
impl Adapter for Memory {
    fn scheme(&self) -> &str {
        "memory"
    }

    async fn connect(&self, url: &Url) -> Result<Arc<dyn Connection>> {
        tracing::debug!(%url, "opening in-memory database");
        Ok(Arc::new(MemoryConnection::new()))
    }
}

/// A connection executing operations against process-local tables.
///
/// Tables are created on first insert. Integer primary keys omitted from an
/// insert are generated from a per-table counter. Deleting a record that
/// does not exist succeeds.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    store: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    tables: HashMap<String, Table>,
}

#[derive(Debug)]
struct Table {
    rows: Vec<Record>,

    /// `None` once an explicit key of `i64::MAX` or generation has used up
    /// the key space
    next_id: Option<i64>,
}

impl Default for Table {
    fn default() -> Table {
        Table {
            rows: vec![],
            next_id: Some(1),
        }
    }
}

#[derive(Debug)]
struct DuplicateKey {
    table: String,
    key: Stored,
}

impl std::error::Error for DuplicateKey {}

impl std::fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate primary key {} in table `{}`",
            self.key, self.table
        )
    }
}

#[derive(Debug)]
struct KeysExhausted {
    table: String,
}

impl std::error::Error for KeysExhausted {}

impl std::fmt::Display for KeysExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no primary keys left to generate in table `{}`", self.table)
    }
}

impl MemoryConnection {
    pub fn new() -> MemoryConnection {
        MemoryConnection::default()
    }

    /// Raw stored rows of `table`, for inspecting what operations wrote.
    pub fn rows(&self, table: &str) -> Result<Vec<Record>> {
        Ok(self
            .lock()?
            .tables
            .get(table)
            .map(|table| table.rows.clone())
            .unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| crumb_core::err!("memory store lock poisoned"))
    }
}

fn key_matches(row: &Record, key: &operation::Key) -> bool {
    row.get(&key.column)
        .and_then(|value| value.compare(&key.value))
        .is_some_and(|ordering| ordering.is_eq())
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn exec_insert(&self, cx: &Context, op: operation::Insert) -> Result<Option<Stored>> {
        cx.check()?;

        let mut store = self.lock()?;
        let table = store.tables.entry(op.table.clone()).or_default();

        let mut row: Record = op.values.into_iter().collect();

        let supplied = row
            .get(&op.primary_key)
            .filter(|key| !key.is_null())
            .cloned();

        let generated = match supplied {
            None => {
                let id = table.next_id.ok_or_else(|| {
                    Error::driver_operation_failed(KeysExhausted { table: op.table })
                })?;
                table.next_id = id.checked_add(1);
                row.insert(op.primary_key.clone(), Stored::Integer(id));
                Some(Stored::Integer(id))
            }
            Some(key) => {
                let primary_key = operation::Key {
                    column: op.primary_key,
                    value: key,
                };
                if table.rows.iter().any(|existing| key_matches(existing, &primary_key)) {
                    return Err(Error::driver_operation_failed(DuplicateKey {
                        table: op.table,
                        key: primary_key.value,
                    }));
                }
                if let Stored::Integer(id) = primary_key.value {
                    table.next_id = table
                        .next_id
                        .zip(id.checked_add(1))
                        .map(|(next, after)| next.max(after));
                }
                None
            }
        };

        table.rows.push(row);
        Ok(generated)
    }

    async fn exec_update(&self, cx: &Context, op: operation::Update) -> Result<()> {
        cx.check()?;

        let mut store = self.lock()?;
        let row = store
            .tables
            .get_mut(&op.table)
            .and_then(|table| table.rows.iter_mut().find(|row| key_matches(row, &op.key)))
            .ok_or_else(|| {
                Error::record_not_found(format!("table={} key={}", op.table, op.key.value))
            })?;

        for (column, value) in op.values {
            row.insert(column, value);
        }

        Ok(())
    }

    async fn exec_delete(&self, cx: &Context, op: operation::Delete) -> Result<()> {
        cx.check()?;

        let mut store = self.lock()?;
        if let Some(table) = store.tables.get_mut(&op.table) {
            table.rows.retain(|row| !key_matches(row, &op.key));
        }

        Ok(())
    }

    async fn exec_query(
        &self,
        cx: &Context,
        op: operation::Query,
        visit: &mut RowVisitor<'_>,
    ) -> Result<()> {
        cx.check()?;

        let rows = {
            let store = self.lock()?;
            query::run(&store.tables, &op)?
        };

        for row in rows {
            cx.check()?;

            if !visit(row)? {
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

trait Tables {
    fn rows(&self, table: &str) -> &[Record];
}

impl Tables for HashMap<String, Table> {
    fn rows(&self, table: &str) -> &[Record] {
        self.get(table).map(|table| &table.rows[..]).unwrap_or(&[])
    }
}

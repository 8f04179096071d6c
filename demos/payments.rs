//! Payments bulk-load demo: inserts many rows through batched writes, then
//! reads a few back by primary key.
//!
//! ```bash
//! cargo run --release --example payments
//! ```

use anyhow::{bail, Result};
use qstorage::{queries, ColumnType, QueryableStorage, Row, Value};
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

const TOTAL_ROWS: i64 = 10_000;
const BATCH_SIZE: usize = 100;

#[derive(Debug)]
#[allow(dead_code)] // fields are shown via Debug
struct Payment {
    id: i64,
    counterparty: i64,
    amount: f64,
    paid_on: String,
    status: i64,
    account: String,
    kind: String,
}

impl Payment {
    fn sample(id: i64) -> Self {
        Self {
            id,
            counterparty: 1,
            amount: 100.0,
            paid_on: "2026-08-29".to_string(),
            status: 1,
            account: "000123456".to_string(),
            kind: "AAA".to_string(),
        }
    }

    fn params(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            Value::Integer(self.counterparty),
            Value::Real(self.amount),
            Value::Text(self.paid_on.clone()),
            Value::Integer(self.status),
            Value::Text(self.account.clone()),
            Value::Text(self.kind.clone()),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        match row.columns() {
            [Value::Integer(id), Value::Integer(counterparty), Value::Real(amount), Value::Text(paid_on), Value::Integer(status), Value::Text(account), Value::Text(kind)] => {
                Ok(Self {
                    id: *id,
                    counterparty: *counterparty,
                    amount: *amount,
                    paid_on: paid_on.clone(),
                    status: *status,
                    account: account.clone(),
                    kind: kind.clone(),
                })
            }
            other => bail!("unexpected payment row shape: {other:?}"),
        }
    }
}

const COLUMNS: [ColumnType; 7] = [
    ColumnType::Integer,
    ColumnType::Integer,
    ColumnType::Real,
    ColumnType::Text,
    ColumnType::Integer,
    ColumnType::Text,
    ColumnType::Text,
];

fn find_by_pk(storage: &mut QueryableStorage<'_>, id: i64) -> Result<Payment> {
    let rows = storage.read("payments.select.by.pk", &COLUMNS, &[Value::Integer(id)])?;
    match rows.first() {
        Some(row) => Payment::from_row(row),
        None => bail!("payment {id} not found"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE payments (
            id           INTEGER PRIMARY KEY,
            counterparty INTEGER NOT NULL,
            amount       REAL NOT NULL,
            paid_on      TEXT NOT NULL,
            status       INTEGER NOT NULL,
            account      TEXT NOT NULL,
            kind         TEXT NOT NULL
        )",
    )?;

    let query_map = queries::from_json_str(include_str!("payments.json"))?;
    let mut storage = QueryableStorage::create(&conn, query_map)?;

    let start = std::time::Instant::now();
    let mut written = 0;
    for id in 1..=TOTAL_ROWS {
        written += storage.write_batched(
            "payments.insert",
            &Payment::sample(id).params(),
            BATCH_SIZE,
        )?;
    }
    tracing::info!(
        rows = written,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "bulk load complete"
    );

    for id in [1, 100, 1_000, 10_000] {
        println!("{:?}", find_by_pk(&mut storage, id)?);
    }

    storage.close()?;
    Ok(())
}

//! Contract tests for batched writes: flush thresholds, counter resets, and
//! independence of batch state across query names.

use std::collections::HashMap;

use qstorage::{ColumnType, QueryableStorage, Value};
use rusqlite::Connection;

fn fixture() -> (Connection, HashMap<String, String>) {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch(
        "CREATE TABLE kv (k TEXT, v TEXT);
         CREATE TABLE log (line TEXT);",
    )
    .expect("create schema");

    let mut queries = HashMap::new();
    queries.insert(
        "write".to_string(),
        "INSERT INTO kv (k, v) VALUES (?1, ?2)".to_string(),
    );
    queries.insert(
        "log.append".to_string(),
        "INSERT INTO log (line) VALUES (?1)".to_string(),
    );
    queries.insert(
        "kv.count".to_string(),
        "SELECT COUNT(*) FROM kv".to_string(),
    );
    (conn, queries)
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn kv_count(storage: &mut QueryableStorage<'_>) -> i64 {
    let rows = storage
        .read("kv.count", &[ColumnType::Integer], &[])
        .unwrap();
    match rows[0].get(0) {
        Some(Value::Integer(n)) => *n,
        other => panic!("unexpected count column: {other:?}"),
    }
}

#[test]
fn test_batch_of_two_flushes_on_second_call() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    assert_eq!(
        storage
            .write_batched("write", &[text("foo"), text("bar")], 2)
            .unwrap(),
        0
    );
    assert_eq!(
        storage
            .write_batched("write", &[text("foo"), text("bar")], 2)
            .unwrap(),
        2
    );
    assert_eq!(kv_count(&mut storage), 2);
}

#[test]
fn test_pending_calls_have_no_visible_side_effects() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    storage
        .write_batched("write", &[text("k1"), text("v1")], 3)
        .unwrap();
    storage
        .write_batched("write", &[text("k2"), text("v2")], 3)
        .unwrap();

    assert_eq!(storage.pending_writes("write"), 2);
    assert_eq!(kv_count(&mut storage), 0);
}

#[test]
fn test_counter_resets_and_cycle_repeats() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    let batch_size = 3;
    for cycle in 0..4 {
        for call in 1..batch_size {
            let affected = storage
                .write_batched(
                    "write",
                    &[text(&format!("k{cycle}-{call}")), text("v")],
                    batch_size,
                )
                .unwrap();
            assert_eq!(affected, 0, "call {call} of cycle {cycle} should defer");
        }
        let affected = storage
            .write_batched(
                "write",
                &[text(&format!("k{cycle}-flush")), text("v")],
                batch_size,
            )
            .unwrap();
        assert_eq!(affected, batch_size, "cycle {cycle} should flush the batch");
        assert_eq!(storage.pending_writes("write"), 0);
    }
    assert_eq!(kv_count(&mut storage), 12);
}

#[test]
fn test_batch_size_one_executes_immediately() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    assert_eq!(
        storage
            .write_batched("write", &[text("k"), text("v")], 1)
            .unwrap(),
        1
    );
    assert_eq!(storage.pending_writes("write"), 0);
    assert_eq!(kv_count(&mut storage), 1);
}

#[test]
fn test_batch_size_zero_behaves_as_unbatched() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    assert_eq!(
        storage
            .write_batched("write", &[text("k"), text("v")], 0)
            .unwrap(),
        1
    );
}

#[test]
fn test_batch_states_are_independent_per_name() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    storage
        .write_batched("write", &[text("k"), text("v")], 2)
        .unwrap();
    storage
        .write_batched("log.append", &[text("line 1")], 2)
        .unwrap();

    assert_eq!(storage.pending_writes("write"), 1);
    assert_eq!(storage.pending_writes("log.append"), 1);

    // Flushing one name leaves the other pending.
    assert_eq!(
        storage
            .write_batched("write", &[text("k2"), text("v2")], 2)
            .unwrap(),
        2
    );
    assert_eq!(storage.pending_writes("write"), 0);
    assert_eq!(storage.pending_writes("log.append"), 1);
}

#[test]
fn test_pending_batch_is_dropped_on_close() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    storage
        .write_batched("write", &[text("k"), text("v")], 5)
        .unwrap();
    storage.close().unwrap();

    // Sub-threshold pending writes are discarded, not flushed.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_large_batched_load() {
    let (conn, queries) = fixture();
    let mut storage = QueryableStorage::create(&conn, queries).unwrap();

    let total = 1000;
    let batch_size = 100;
    let mut flushed = 0;
    for i in 0..total {
        flushed += storage
            .write_batched("write", &[text(&format!("k{i}")), text("v")], batch_size)
            .unwrap();
    }

    assert_eq!(flushed, total);
    assert_eq!(storage.pending_writes("write"), 0);
    assert_eq!(kv_count(&mut storage), total as i64);
}

//! Users CRUD demo: a plain DAO translating domain records to and from
//! ordered parameters and typed columns.
//!
//! One shared connection is used because this program is single threaded;
//! with multiple threads, use one storage instance (and connection) per
//! thread.
//!
//! ```bash
//! cargo run --example users
//! ```

use anyhow::{bail, Context, Result};
use qstorage::{queries, ColumnType, QueryableStorage, Row, Value};
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct User {
    userid: String,
    password: String,
    email: String,
}

impl User {
    fn new(userid: &str, password: &str, email: &str) -> Self {
        Self {
            userid: userid.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    fn from_row(row: &Row) -> Result<Self> {
        match row.columns() {
            [Value::Text(userid), Value::Text(password), Value::Text(email)] => Ok(Self {
                userid: userid.clone(),
                password: password.clone(),
                email: email.clone(),
            }),
            other => bail!("unexpected user row shape: {other:?}"),
        }
    }
}

/// Plain caller over the storage facade; pure glue, no query logic.
struct UsersDao<'s, 'conn> {
    storage: &'s mut QueryableStorage<'conn>,
}

impl UsersDao<'_, '_> {
    const COLUMNS: [ColumnType; 3] = [ColumnType::Text, ColumnType::Text, ColumnType::Text];

    fn insert(&mut self, user: &User) -> Result<usize> {
        Ok(self.storage.write(
            "users.insert",
            &[
                Value::Text(user.userid.clone()),
                Value::Text(user.password.clone()),
                Value::Text(user.email.clone()),
            ],
        )?)
    }

    fn find_by_pk(&mut self, userid: &str) -> Result<User> {
        let rows = self.storage.read(
            "users.select.by.pk",
            &Self::COLUMNS,
            &[Value::Text(userid.to_string())],
        )?;
        let row = rows
            .first()
            .with_context(|| format!("User {userid} not found"))?;
        User::from_row(row)
    }

    fn find_all(&mut self) -> Result<Vec<User>> {
        let rows = self.storage.read("users.select.all", &Self::COLUMNS, &[])?;
        rows.iter().map(User::from_row).collect()
    }

    fn update(&mut self, user: &User) -> Result<usize> {
        Ok(self.storage.write(
            "users.update",
            &[
                Value::Text(user.password.clone()),
                Value::Text(user.email.clone()),
                Value::Text(user.userid.clone()),
            ],
        )?)
    }

    fn delete(&mut self, userid: &str) -> Result<usize> {
        Ok(self
            .storage
            .write("users.delete", &[Value::Text(userid.to_string())])?)
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
        "CREATE TABLE users (
            userid   TEXT PRIMARY KEY,
            password TEXT NOT NULL,
            email    TEXT NOT NULL
        )",
    )?;

    let query_map = queries::from_json_str(include_str!("users.json"))?;
    let mut storage = QueryableStorage::create(&conn, query_map)?;
    let mut dao = UsersDao {
        storage: &mut storage,
    };

    let mut dylan = User::new("dylan", "changeit", "dylan@example.com");
    let groucho = User::new("groucho", "changeit", "groucho@example.com");
    let block = User::new("block", "changeit", "block@example.com");

    dao.insert(&dylan)?;
    println!("{:?}", dao.find_by_pk("dylan")?);

    dao.insert(&groucho)?;
    dao.insert(&block)?;
    println!("{:?}", dao.find_all()?);

    dylan.password = "secret".to_string();
    dao.update(&dylan)?;
    dao.delete("block")?;

    println!("{:?}", dao.find_all()?);

    storage.close()?;
    Ok(())
}

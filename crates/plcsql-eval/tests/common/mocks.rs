//! In-memory query capability for cursor tests
//!
//! `MockConnection` answers prepared statements from a table of canned
//! results keyed by SQL text and records what the runtime asked for.

#![allow(dead_code)]

use indexmap::IndexMap;
use parking_lot::{Mutex, MutexGuard};
use plcsql_eval::{Connection, Rowset, SqlFailure, Statement};
use plcsql_types::Value;
use std::sync::Arc;

pub type Row = IndexMap<String, Value>;

/// Build a row from `(column, value)` pairs, in column order
pub fn row(columns: &[(&str, Value)]) -> Row {
    columns.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect()
}

/// What the runtime did with the connection
#[derive(Debug, Default)]
pub struct Journal {
    pub prepared: Vec<String>,
    pub bound: Vec<(usize, Value)>,
    pub open_rowsets: usize,
}

#[derive(Debug, Default, Clone)]
pub struct MockConnection {
    results: IndexMap<String, Vec<Row>>,
    journal: Arc<Mutex<Journal>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, sql: &str, rows: Vec<Row>) -> Self {
        self.results.insert(sql.to_string(), rows);
        self
    }

    pub fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock()
    }
}

impl Connection for MockConnection {
    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement>, SqlFailure> {
        let rows = self
            .results
            .get(sql)
            .cloned()
            .ok_or_else(|| SqlFailure::new(format!("syntax error near '{sql}'")))?;
        self.journal.lock().prepared.push(sql.to_string());
        Ok(Box::new(MockStatement {
            rows,
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct MockStatement {
    rows: Vec<Row>,
    journal: Arc<Mutex<Journal>>,
}

impl Statement for MockStatement {
    fn bind(&mut self, position: usize, value: &Value) -> Result<(), SqlFailure> {
        if position == 0 {
            return Err(SqlFailure::new("parameter positions start at 1"));
        }
        self.journal.lock().bound.push((position, value.clone()));
        Ok(())
    }

    fn execute_query(&mut self) -> Result<Box<dyn Rowset>, SqlFailure> {
        self.journal.lock().open_rowsets += 1;
        Ok(Box::new(MockRowset {
            rows: std::mem::take(&mut self.rows),
            position: 0,
            closed: false,
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct MockRowset {
    rows: Vec<Row>,
    /// 1-based index of the current row; 0 before the first row
    position: usize,
    closed: bool,
    journal: Arc<Mutex<Journal>>,
}

impl MockRowset {
    fn current(&self) -> Result<&Row, SqlFailure> {
        if self.closed {
            return Err(SqlFailure::new("rowset is closed"));
        }
        self.position
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| SqlFailure::new("no current row"))
    }
}

impl Rowset for MockRowset {
    fn next(&mut self) -> Result<bool, SqlFailure> {
        if self.closed {
            return Err(SqlFailure::new("rowset is closed"));
        }
        if self.position <= self.rows.len() {
            self.position += 1;
        }
        Ok(self.position <= self.rows.len())
    }

    fn column(&self, index: usize) -> Result<Value, SqlFailure> {
        let row = self.current()?;
        index
            .checked_sub(1)
            .and_then(|i| row.get_index(i))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| SqlFailure::new(format!("column index {index} out of range")))
    }

    fn column_by_name(&self, name: &str) -> Result<Value, SqlFailure> {
        self.current()?
            .get(name)
            .cloned()
            .ok_or_else(|| SqlFailure::new(format!("no column named {name}")))
    }

    fn close(&mut self) -> Result<(), SqlFailure> {
        if !self.closed {
            self.closed = true;
            let mut journal = self.journal.lock();
            journal.open_rowsets = journal.open_rowsets.saturating_sub(1);
        }
        Ok(())
    }
}

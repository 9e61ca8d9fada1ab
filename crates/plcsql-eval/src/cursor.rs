//! Cursors and query plumbing
//!
//! The runtime never talks to a database directly. It sees a query as an
//! opaque capability: a [`Connection`] prepares a [`Statement`], which binds
//! parameters and executes into a [`Rowset`]. [`Cursor`] wraps that
//! capability in the explicit `Unopened -> Open -> Closed` state machine
//! that PL/CSQL cursor attributes (`%FOUND`, `%NOTFOUND`, `%ROWCOUNT`,
//! `%ISOPEN`) are defined against.

use crate::error::EvalResult;
use plcsql_diagnostics::RuntimeError;
use plcsql_types::Value;
use thiserror::Error;

/// Failure reported by the query capability
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SqlFailure {
    pub message: String,
}

impl SqlFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Log a capability failure and re-raise it as SQL_ERROR
fn sql_error(failure: SqlFailure) -> RuntimeError {
    log::error!("query execution failed: {failure}");
    RuntimeError::sql_error(failure.message)
}

// =========================================================================
// Capability Traits
// =========================================================================

/// Source of prepared statements
pub trait Connection {
    fn prepare(&self, sql: &str) -> Result<Box<dyn Statement>, SqlFailure>;
}

/// A prepared statement awaiting parameters
pub trait Statement {
    /// Bind a parameter; positions start at 1
    fn bind(&mut self, position: usize, value: &Value) -> Result<(), SqlFailure>;

    fn execute_query(&mut self) -> Result<Box<dyn Rowset>, SqlFailure>;
}

/// Forward-only stream of result rows
pub trait Rowset {
    /// Advance to the next row; `false` once the rows are exhausted
    fn next(&mut self) -> Result<bool, SqlFailure>;

    /// Column of the current row; indices start at 1
    fn column(&self, index: usize) -> Result<Value, SqlFailure>;

    fn column_by_name(&self, name: &str) -> Result<Value, SqlFailure>;

    fn close(&mut self) -> Result<(), SqlFailure>;
}

fn execute(conn: &dyn Connection, sql: &str, args: &[Value]) -> Result<Box<dyn Rowset>, SqlFailure> {
    let mut stmt = conn.prepare(sql)?;
    for (i, arg) in args.iter().enumerate() {
        stmt.bind(i + 1, arg)?;
    }
    stmt.execute_query()
}

// =========================================================================
// Cursor State Machine
// =========================================================================

#[derive(Default)]
enum CursorState {
    #[default]
    Unopened,
    Open {
        rowset: Box<dyn Rowset>,
        on_row: bool,
    },
    Closed,
}

/// A PL/CSQL cursor over one query
///
/// A closed cursor may be opened again; opening an open one fails with
/// CURSOR_ALREADY_OPEN. The underlying rowset is released on close, on
/// re-open and when the cursor is dropped.
pub struct Cursor {
    sql: String,
    state: CursorState,
    row_count: u64,
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            CursorState::Unopened => "unopened",
            CursorState::Open { .. } => "open",
            CursorState::Closed => "closed",
        };
        f.debug_struct("Cursor")
            .field("sql", &self.sql)
            .field("state", &state)
            .field("row_count", &self.row_count)
            .finish()
    }
}

impl Cursor {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            state: CursorState::Unopened,
            row_count: 0,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Execute the query with the given parameters
    pub fn open(&mut self, conn: &dyn Connection, args: &[Value]) -> EvalResult<()> {
        if self.is_open() {
            return Err(RuntimeError::cursor_already_open());
        }
        let rowset = execute(conn, &self.sql, args).map_err(sql_error)?;
        log::trace!("cursor opened: {}", self.sql);
        self.state = CursorState::Open { rowset, on_row: false };
        self.row_count = 0;
        Ok(())
    }

    pub fn close(&mut self) -> EvalResult<()> {
        if !self.is_open() {
            return Err(RuntimeError::invalid_cursor("attempted to close an unopened cursor"));
        }
        if let CursorState::Open { mut rowset, .. } = std::mem::replace(&mut self.state, CursorState::Closed) {
            rowset.close().map_err(sql_error)?;
        }
        Ok(())
    }

    /// `%ISOPEN`
    pub fn is_open(&self) -> bool {
        matches!(self.state, CursorState::Open { .. })
    }

    /// Advance to the next row; returns whether a row was fetched
    pub fn fetch(&mut self) -> EvalResult<bool> {
        let CursorState::Open { rowset, on_row } = &mut self.state else {
            return Err(RuntimeError::invalid_cursor("attempted to fetch from an unopened cursor"));
        };
        *on_row = rowset.next().map_err(sql_error)?;
        if *on_row {
            self.row_count += 1;
        }
        Ok(*on_row)
    }

    /// `%FOUND`: whether the last fetch produced a row
    pub fn found(&self) -> EvalResult<bool> {
        match &self.state {
            CursorState::Open { on_row, .. } => Ok(*on_row),
            _ => Err(unopened_attribute()),
        }
    }

    /// `%NOTFOUND`
    pub fn not_found(&self) -> EvalResult<bool> {
        self.found().map(|found| !found)
    }

    /// `%ROWCOUNT`: rows fetched since the last open
    ///
    /// Still readable after close; fails only on a never-opened cursor.
    pub fn row_count(&self) -> EvalResult<u64> {
        match self.state {
            CursorState::Unopened => Err(unopened_attribute()),
            _ => Ok(self.row_count),
        }
    }

    /// Column of the current row; indices start at 1
    pub fn column(&self, index: usize) -> EvalResult<Value> {
        self.current_row()?.column(index).map_err(sql_error)
    }

    pub fn column_by_name(&self, name: &str) -> EvalResult<Value> {
        self.current_row()?.column_by_name(name).map_err(sql_error)
    }

    fn current_row(&self) -> EvalResult<&dyn Rowset> {
        match &self.state {
            CursorState::Open { rowset, on_row: true } => Ok(rowset.as_ref()),
            CursorState::Open { .. } => Err(RuntimeError::invalid_cursor("the cursor is not positioned on a row")),
            _ => Err(RuntimeError::invalid_cursor("attempted to read a column of an unopened cursor")),
        }
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        if let CursorState::Open { rowset, .. } = &mut self.state {
            if let Err(e) = rowset.close() {
                log::warn!("failed to release cursor rowset: {e}");
            }
        }
    }
}

fn unopened_attribute() -> RuntimeError {
    RuntimeError::invalid_cursor("attempted to read an attribute of an unopened cursor")
}

// =========================================================================
// Single-Row Queries
// =========================================================================

/// `SELECT ... INTO`: the one row of `sql`, as `columns` values
///
/// No row raises NO_DATA_FOUND and a second row raises TOO_MANY_ROWS.
pub fn select_into_one(conn: &dyn Connection, sql: &str, args: &[Value], columns: usize) -> EvalResult<Vec<Value>> {
    let mut rowset = execute(conn, sql, args).map_err(sql_error)?;
    let result = read_single_row(rowset.as_mut(), columns);
    rowset.close().map_err(sql_error)?;
    result
}

fn read_single_row(rowset: &mut dyn Rowset, columns: usize) -> EvalResult<Vec<Value>> {
    if !rowset.next().map_err(sql_error)? {
        return Err(RuntimeError::no_data_found());
    }
    let row = (1..=columns)
        .map(|i| rowset.column(i))
        .collect::<Result<Vec<_>, _>>()
        .map_err(sql_error)?;
    if rowset.next().map_err(sql_error)? {
        return Err(RuntimeError::too_many_rows());
    }
    Ok(row)
}

/// Built-in functions called without a parenthesized argument list
pub const NO_PAREN_BUILTINS: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_DATETIME",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "SYS_DATE",
    "SYS_DATETIME",
    "SYS_TIME",
    "SYS_TIMESTAMP",
    "SYSDATE",
    "SYSDATETIME",
    "SYSTIME",
    "SYSTIMESTAMP",
];

/// The query that evaluates built-in function `name` over `argc` arguments
pub fn builtin_query(name: &str, argc: usize) -> String {
    if NO_PAREN_BUILTINS.iter().any(|b| b.eq_ignore_ascii_case(name)) {
        format!("select {name} from dual")
    } else {
        format!("select {name}({}) from dual", vec!["?"; argc].join(", "))
    }
}

/// Evaluate a SQL built-in function through the query capability
pub fn invoke_builtin_func(conn: &dyn Connection, name: &str, args: &[Value]) -> EvalResult<Value> {
    let sql = builtin_query(name, args.len());
    if !args.is_empty() && !sql.contains('?') {
        return Err(RuntimeError::program_error(format!("{name} takes no arguments")));
    }
    log::trace!("invoking built-in function: {sql}");
    let mut rowset = execute(conn, &sql, args).map_err(sql_error)?;
    let result = if rowset.next().map_err(sql_error)? {
        rowset.column(1).map_err(sql_error)
    } else {
        Err(RuntimeError::program_error(format!("built-in function {name} returned no row")))
    };
    rowset.close().map_err(sql_error)?;
    result
}

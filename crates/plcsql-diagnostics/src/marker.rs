//! Code range markers and source position remapping
//!
//! Generated code is annotated with a marker stream recording, for every
//! procedure statement, the generated line where it begins and ends and the
//! statement's line and column in the procedure source. When generated code
//! fails, the failing generated line is mapped back through the innermost
//! open range.
//!
//! Encoding: space separated tokens, starting with an empty token.
//! `(<generated-line>,<source-line>,<source-column>` begins a range and
//! `)<generated-line>` ends the innermost open range.

use crate::RuntimeError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Line and column in the procedure source (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: i32,
    pub column: i32,
}

impl SourcePosition {
    /// Position reported when a failure cannot be located
    pub const UNKNOWN: Self = Self { line: -1, column: -1 };

    pub const fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    pub const fn is_unknown(&self) -> bool {
        self.line < 0
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Whether a marker opens or closes a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Begin,
    End,
}

/// One event of the marker stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRangeMarker {
    pub kind: MarkerKind,
    /// Line in the generated code
    pub generated_line: u32,
    /// Source position of the statement; `UNKNOWN` for end markers
    pub source: SourcePosition,
}

impl CodeRangeMarker {
    pub const fn begin(generated_line: u32, source_line: i32, source_column: i32) -> Self {
        Self {
            kind: MarkerKind::Begin,
            generated_line,
            source: SourcePosition::new(source_line, source_column),
        }
    }

    pub const fn end(generated_line: u32) -> Self {
        Self { kind: MarkerKind::End, generated_line, source: SourcePosition::UNKNOWN }
    }
}

/// A frame of the host failure's stack trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub file_name: String,
    pub line: u32,
}

impl StackFrame {
    pub fn new(file_name: impl Into<String>, line: u32) -> Self {
        Self { file_name: file_name.into(), line }
    }
}

/// A validated, balanced marker stream for one compiled unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerList {
    markers: Vec<CodeRangeMarker>,
}

fn malformed(detail: impl fmt::Display) -> RuntimeError {
    RuntimeError::program_error(format!("malformed code range markers: {detail}"))
}

fn parse_number<T: FromStr>(text: &str, token: &str) -> Result<T, RuntimeError> {
    text.parse().map_err(|_| malformed(format_args!("invalid token '{token}'")))
}

impl MarkerList {
    /// Parse and validate an encoded marker stream
    pub fn parse(encoded: &str) -> Result<Self, RuntimeError> {
        let mut tokens: Vec<&str> = encoded.split(' ').collect();
        while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        match tokens.as_slice() {
            ["", first, ..] if first.starts_with('(') => {}
            _ => return Err(malformed("stream must start with a begin marker")),
        }

        let mut markers = Vec::with_capacity(tokens.len() - 1);
        let mut depth = 0usize;
        for token in &tokens[1..] {
            if let Some(body) = token.strip_prefix('(') {
                let parts: Vec<&str> = body.split(',').collect();
                let [generated, line, column] = parts.as_slice() else {
                    return Err(malformed(format_args!("invalid token '{token}'")));
                };
                markers.push(CodeRangeMarker::begin(
                    parse_number(generated, token)?,
                    parse_number(line, token)?,
                    parse_number(column, token)?,
                ));
                depth += 1;
            } else if let Some(body) = token.strip_prefix(')') {
                if depth == 0 {
                    return Err(malformed(format_args!("unbalanced end marker '{token}'")));
                }
                markers.push(CodeRangeMarker::end(parse_number(body, token)?));
                depth -= 1;
            } else {
                return Err(malformed(format_args!("invalid token '{token}'")));
            }
        }

        if depth != 0 {
            return Err(malformed(format_args!("{depth} range(s) left open")));
        }

        Ok(Self { markers })
    }

    pub fn markers(&self) -> &[CodeRangeMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Map a failure in `file_name` back to the procedure source
    ///
    /// The first stack frame from `file_name` gives the failing generated
    /// line; the innermost range open at that line gives the position.
    pub fn resolve(&self, frames: &[StackFrame], file_name: &str) -> SourcePosition {
        let Some(failed_line) = frames
            .iter()
            .find(|frame| frame.file_name == file_name)
            .map(|frame| frame.line)
            .filter(|line| *line > 0)
        else {
            log::debug!("no stack frame from {file_name}; source position unknown");
            return SourcePosition::UNKNOWN;
        };

        self.resolve_line(failed_line)
    }

    /// Map a generated line back to the procedure source
    pub fn resolve_line(&self, failed_line: u32) -> SourcePosition {
        let mut open: SmallVec<[&CodeRangeMarker; 16]> = SmallVec::new();
        for marker in &self.markers {
            if failed_line < marker.generated_line {
                return match open.last() {
                    Some(innermost) => innermost.source,
                    None => {
                        log::debug!("generated line {failed_line} precedes every code range");
                        SourcePosition::UNKNOWN
                    }
                };
            }
            match marker.kind {
                MarkerKind::Begin => open.push(marker),
                MarkerKind::End => {
                    open.pop();
                }
            }
        }

        log::debug!("generated line {failed_line} follows every code range");
        SourcePosition::UNKNOWN
    }
}

impl FromStr for MarkerList {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! String Operators
//!
//! Implements: Concatenate (||) and LIKE with an optional escape character.

use crate::engine::Runtime;
use crate::error::EvalResult;
use plcsql_diagnostics::RuntimeError;
use plcsql_types::Value;
use regex::Regex;

/// Translate a LIKE pattern into an anchored regular expression
///
/// `%` matches any sequence and `_` any single character. The escape
/// character makes the next character literal; at the very end of the
/// pattern it stands for itself.
pub fn like_to_regex(pattern: &str, escape: Option<char>) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push_str("(?s)^");
    let mut chars = pattern.chars();
    let mut literal = [0u8; 4];
    while let Some(c) = chars.next() {
        if Some(c) == escape {
            let escaped = chars.next().unwrap_or(c);
            out.push_str(&regex::escape(escaped.encode_utf8(&mut literal)));
        } else if c == '%' {
            out.push_str(".*");
        } else if c == '_' {
            out.push('.');
        } else {
            out.push_str(&regex::escape(c.encode_utf8(&mut literal)));
        }
    }
    out.push('$');
    out
}

impl Runtime {
    /// `||`; with empty-string mode on, a NULL operand reads as ''
    pub fn concat(&self, l: Option<&str>, r: Option<&str>) -> Option<String> {
        let (l, r) = if self.empty_string_is_null() {
            (l.or(Some("")), r.or(Some("")))
        } else {
            (l, r)
        };
        l.zip(r).map(|(l, r)| format!("{l}{r}"))
    }

    /// `||` on any values, each rendered as text
    pub fn concat_values(&self, l: &Value, r: &Value) -> EvalResult<Value> {
        let l = self.conv_value_to_string(l)?;
        let r = self.conv_value_to_string(r)?;
        Ok(self.concat(l.as_deref(), r.as_deref()).into())
    }

    /// `s LIKE pattern [ESCAPE escape]`
    ///
    /// NULL subject or pattern yields NULL. The escape must be exactly one
    /// character.
    pub fn like(&self, s: Option<&str>, pattern: Option<&str>, escape: Option<&str>) -> EvalResult<Option<bool>> {
        let escape = match escape {
            None => None,
            Some(e) => {
                let mut chars = e.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => return Err(RuntimeError::value_error("the escape must be a single character")),
                }
            }
        };
        let (Some(s), Some(pattern)) = (self.effective_str(s), self.effective_str(pattern)) else {
            return Ok(None);
        };
        let regex = Regex::new(&like_to_regex(pattern, escape)).map_err(|e| {
            RuntimeError::program_error(format!("invalid LIKE pattern '{pattern}': {e}"))
        })?;
        Ok(Some(regex.is_match(s)))
    }
}

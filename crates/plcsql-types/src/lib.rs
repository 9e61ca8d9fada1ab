//! PL/CSQL runtime value model
//!
//! This crate defines the values procedures compute with:
//! - `Value`, the tagged union of every runtime type plus NULL
//! - `Numeric`, an exact decimal with precision up to 38 digits
//! - DATE, TIME, DATETIME and TIMESTAMP with their zero values and valid ranges

pub mod numeric;
pub mod temporal;
pub mod value;

pub use numeric::*;
pub use temporal::*;
pub use value::*;

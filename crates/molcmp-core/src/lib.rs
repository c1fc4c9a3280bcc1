//! Molcmp Core - canonical comparison of molecular formula strings
//!
//! Two renderings of the same compound, such as `C6H8N2O2R2'` and
//! `A2C6H8N2O2'`, are compared by element multiset rather than as raw text.
//!
//! # Architecture
//!
//! ```text
//! formula → Normalizer → canonical string ─┐
//! formula → Normalizer → canonical string ─┴→ equality
//!                 ↑
//!   Table comparator (rows in, annotated rows out)
//! ```
//!
//! The normalizer is pure. Parsing never fails; rendering is bounded by
//! `try_normalize`, and only the table comparator performs I/O.

pub mod error;
pub mod normalizer;
pub mod table;

pub use error::{Error, Result};
pub use normalizer::{
    element_groups, is_equivalent, normalize, try_normalize, ElementGroup, IgnoreSet,
};
pub use table::{compare_pair, compare_rows, CompareOptions, Comparison, Summary};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Canonical normalizer — converts a formula string to its canonical form
//!
//! A formula such as `C6H8N2O2R2'` is read as a multiset of single-character
//! element symbols with integer counts. The canonical form expands every
//! group into its symbol repeated `count` times and concatenates the groups
//! in sorted order, so two formulas are equivalent iff their canonical forms
//! are equal strings.
//!
//! # Rules
//!
//! - Characters in the ignore set are dropped wherever they appear
//! - A symbol without trailing digits has an implicit count of 1
//! - `A` is an alias for the radical marker `R`
//! - A digit run with no symbol before it is dropped
//!
//! Parsing is total: every input, well-formed or not, yields element groups.
//! Rendering is bounded by the size of the expanded string; [`try_normalize`]
//! refuses anything longer than [`MAX_EXPANDED_LEN`].

use std::collections::HashSet;
use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Characters ignored when no other set is given: `)`, `(`, `n` and `'`
pub const DEFAULT_IGNORE: &str = ")(n'";

/// Symbol accepted in input as an alias for the radical
pub const RADICAL_ALIAS: char = 'A';

/// Canonical radical symbol
pub const RADICAL: char = 'R';

/// Longest canonical form [`try_normalize`] will render (1 MiB of symbols)
pub const MAX_EXPANDED_LEN: usize = 1_048_576;

// ── Ignore set ─────────────────────────────────────────────

/// Set of characters stripped from a formula before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    chars: HashSet<char>,
}

impl IgnoreSet {
    /// An ignore set that keeps every character
    pub fn empty() -> Self {
        Self {
            chars: HashSet::new(),
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::from(DEFAULT_IGNORE)
    }
}

/// Every character of the string joins the set
impl From<&str> for IgnoreSet {
    fn from(chars: &str) -> Self {
        chars.chars().collect()
    }
}

impl FromIterator<char> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

// ── Element groups ─────────────────────────────────────────

/// One element symbol with its expanded count
///
/// Ordering is by symbol, then count, which matches the string ordering of
/// the rendered groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementGroup {
    pub symbol: char,
    pub count: usize,
}

impl ElementGroup {
    pub fn new(symbol: char, count: usize) -> Self {
        Self { symbol, count }
    }

    /// Append `symbol` repeated `count` times
    fn render_into(&self, out: &mut String) {
        out.extend(std::iter::repeat(self.symbol).take(self.count));
    }
}

impl fmt::Display for ElementGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for _ in 0..self.count {
            f.write_char(self.symbol)?;
        }
        Ok(())
    }
}

// ── Public API ─────────────────────────────────────────────

/// Normalize a formula to its canonical string
///
/// The output holds one character per counted atom, so its length is the sum
/// of all counts. Use [`try_normalize`] for input that may carry huge counts.
///
/// ```
/// use molcmp_core::normalizer::{normalize, IgnoreSet};
///
/// let ignore = IgnoreSet::default();
/// assert_eq!(normalize("CO2", &ignore), "COO");
/// assert_eq!(normalize("A2C6'", &ignore), normalize("C6R2", &ignore));
/// ```
pub fn normalize(formula: &str, ignore: &IgnoreSet) -> String {
    let groups = element_groups(formula, ignore);
    render(&groups, expanded_len(&groups).min(MAX_EXPANDED_LEN))
}

/// Normalize a formula, refusing canonical forms longer than [`MAX_EXPANDED_LEN`]
///
/// # Errors
/// Returns `FormulaTooLong` with the (saturated) expanded length.
pub fn try_normalize(formula: &str, ignore: &IgnoreSet) -> Result<String> {
    let groups = element_groups(formula, ignore);
    let length = expanded_len(&groups);
    if length > MAX_EXPANDED_LEN {
        return Err(Error::FormulaTooLong {
            length,
            limit: MAX_EXPANDED_LEN,
        });
    }
    Ok(render(&groups, length))
}

/// Parse a formula into element groups, sorted in canonical order
///
/// Groups are not merged: `C2OC` yields `C×1`, `C×2`, `O×1`. Zero counts
/// (`C0`) render as nothing and are omitted.
pub fn element_groups(formula: &str, ignore: &IgnoreSet) -> Vec<ElementGroup> {
    let mut groups = scan(formula, ignore);
    groups.retain(|g| g.count > 0);
    groups.sort_unstable();
    groups
}

/// Whether two formulas have the same canonical form
///
/// Compares per-symbol totals, so nothing is rendered and any count works.
pub fn is_equivalent(a: &str, b: &str, ignore: &IgnoreSet) -> bool {
    element_totals(a, ignore) == element_totals(b, ignore)
}

// ── Rendering ──────────────────────────────────────────────

/// Sum of all counts, saturating
fn expanded_len(groups: &[ElementGroup]) -> usize {
    groups.iter().fold(0usize, |n, g| n.saturating_add(g.count))
}

fn render(groups: &[ElementGroup], reserve: usize) -> String {
    let mut out = String::with_capacity(reserve);
    for group in groups {
        group.render_into(&mut out);
    }
    out
}

/// Sorted groups with equal symbols merged; same information as the
/// canonical string
fn element_totals(formula: &str, ignore: &IgnoreSet) -> Vec<ElementGroup> {
    let mut totals: Vec<ElementGroup> = Vec::new();
    for group in element_groups(formula, ignore) {
        match totals.last_mut() {
            Some(last) if last.symbol == group.symbol => {
                last.count = last.count.saturating_add(group.count);
            }
            _ => totals.push(group),
        }
    }
    totals
}

// ── Scanner ────────────────────────────────────────────────

/// Right-to-left scan: a digit run belongs to the symbol on its left,
/// so digits are buffered until the next symbol is reached.
fn scan(formula: &str, ignore: &IgnoreSet) -> Vec<ElementGroup> {
    // Holds digits in reverse reading order
    let mut digits: Vec<u8> = Vec::new();
    let mut groups = Vec::new();

    for c in formula.chars().rev() {
        if ignore.contains(c) {
            continue;
        }
        if c.is_ascii_digit() {
            digits.push(c as u8 - b'0');
            continue;
        }
        let symbol = if c == RADICAL_ALIAS { RADICAL } else { c };
        groups.push(ElementGroup::new(symbol, take_count(&mut digits)));
    }

    // Anything left in `digits` had no symbol before it and is dropped
    groups
}

/// Drain the digit buffer into a count, defaulting to 1 when empty
fn take_count(digits: &mut Vec<u8>) -> usize {
    if digits.is_empty() {
        return 1;
    }
    let count = digits.iter().rev().fold(0usize, |acc, &d| {
        acc.saturating_mul(10).saturating_add(usize::from(d))
    });
    digits.clear();
    count
}

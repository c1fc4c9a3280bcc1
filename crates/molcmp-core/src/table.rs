//! Table comparator — pairwise formula comparison over delimited rows
//!
//! Each input line is split on a separator, two columns are normalized and
//! compared, and the line is re-emitted with the two canonical forms and the
//! verdict appended.
//!
//! ```text
//! a;b                 →  a;b;A Normalized;B normalized;Is Equal?
//! CO2;O2C             →  CO2;O2C;COO;COO;True
//! ```

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::normalizer::{try_normalize, IgnoreSet};
use crate::{Error, Result};

/// Header cells appended after the echoed columns; the mixed casing is part
/// of the table format
const HEADER_CELLS: [&str; 3] = ["A Normalized", "B normalized", "Is Equal?"];

/// Options for [`compare_rows`]
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub separator: String,
    /// 1-based column holding formula A
    pub column_a: usize,
    /// 1-based column holding formula B
    pub column_b: usize,
    pub ignore: IgnoreSet,
    /// Treat the first line as a header
    pub header: bool,
    /// Echo the whole line instead of just the two formula cells
    pub keep_columns: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            separator: ";".to_string(),
            column_a: 1,
            column_b: 2,
            ignore: IgnoreSet::default(),
            header: true,
            keep_columns: false,
        }
    }
}

impl CompareOptions {
    /// Reject options that can never produce a meaningful comparison
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(Error::EmptySeparator);
        }
        for column in [self.column_a, self.column_b] {
            if column == 0 {
                return Err(Error::InvalidColumn(column));
            }
        }
        if self.column_a == self.column_b {
            return Err(Error::SameColumns(self.column_a));
        }
        Ok(())
    }
}

/// Outcome of comparing one pair of formulas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub normalized_a: String,
    pub normalized_b: String,
    pub equal: bool,
}

/// Row counts for one run of [`compare_rows`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub equal: usize,
    pub different: usize,
}

/// Normalize both formulas with a shared ignore set and compare them
///
/// # Errors
/// `FormulaTooLong` when either canonical form exceeds the rendering limit.
pub fn compare_pair(a: &str, b: &str, ignore: &IgnoreSet) -> Result<Comparison> {
    let normalized_a = try_normalize(a, ignore)?;
    let normalized_b = try_normalize(b, ignore)?;
    let equal = normalized_a == normalized_b;
    Ok(Comparison {
        normalized_a,
        normalized_b,
        equal,
    })
}

/// Compare every row of `reader`, writing the annotated table to `writer`
///
/// # Errors
/// `EmptySeparator` / `InvalidColumn` / `SameColumns` for bad options,
/// `MissingColumn` when a row is too short, `Line` wrapping `FormulaTooLong`
/// when a formula expands past the limit, `Io` when reading or writing fails.
pub fn compare_rows<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    options: &CompareOptions,
) -> Result<Summary> {
    options.validate()?;

    let sep = options.separator.as_str();
    let mut summary = Summary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        let line_no = idx + 1;

        let fields: Vec<&str> = line.split(sep).collect();
        let a = cell(&fields, options.column_a, line_no)?;
        let b = cell(&fields, options.column_b, line_no)?;

        let comparison = if idx == 0 && options.header {
            None
        } else {
            let comparison = compare_pair(a, b, &options.ignore).map_err(|e| Error::Line {
                line: line_no,
                source: Box::new(e),
            })?;
            Some(comparison)
        };

        let appended = match &comparison {
            None => HEADER_CELLS,
            Some(c) => {
                summary.rows += 1;
                if c.equal {
                    summary.equal += 1;
                } else {
                    summary.different += 1;
                }
                [
                    c.normalized_a.as_str(),
                    c.normalized_b.as_str(),
                    verdict(c.equal),
                ]
            }
        };

        let mut out: Vec<&str> = if options.keep_columns {
            vec![line]
        } else {
            vec![a, b]
        };
        out.extend_from_slice(&appended);
        writeln!(writer, "{}", out.join(sep))?;
    }

    writer.flush()?;
    Ok(summary)
}

fn cell<'a>(fields: &[&'a str], column: usize, line: usize) -> Result<&'a str> {
    fields
        .get(column - 1)
        .copied()
        .ok_or(Error::MissingColumn {
            line,
            column,
            found: fields.len(),
        })
}

/// Verdict cell
fn verdict(equal: bool) -> &'static str {
    if equal {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, options: &CompareOptions) -> Result<(String, Summary)> {
        let mut out = Vec::new();
        let summary = compare_rows(input.as_bytes(), &mut out, options)?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    const TABLE: &str = "Formula A;Formula B\n\
                         C6H8N2O2R2';A2C6H8N2O2'\n\
                         C4H7N2O3R(C2H2NOR)n';A2C6H9N3O4'\n\
                         C5H8N2O2';A2C6H9N3O3'\n";

    #[test]
    fn test_compare_pair() {
        let c = compare_pair("CO2", "O2C", &IgnoreSet::default()).unwrap();
        assert_eq!(c.normalized_a, "COO");
        assert_eq!(c.normalized_b, "COO");
        assert!(c.equal);
    }

    #[test]
    fn test_header_and_verdicts() {
        let (out, summary) = run(TABLE, &CompareOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Formula A;Formula B;A Normalized;B normalized;Is Equal?"
        );
        assert!(lines[1].ends_with(";True"), "got {}", lines[1]);
        assert!(lines[2].ends_with(";True"), "got {}", lines[2]);
        assert!(lines[3].ends_with(";False"), "got {}", lines[3]);
        assert_eq!(
            summary,
            Summary {
                rows: 3,
                equal: 2,
                different: 1
            }
        );
    }

    #[test]
    fn test_row_layout() {
        let (out, _) = run("h1;h2\nCO2;O2C\n", &CompareOptions::default()).unwrap();
        assert_eq!(out.lines().nth(1), Some("CO2;O2C;COO;COO;True"));
    }

    #[test]
    fn test_no_header_compares_first_line() {
        let options = CompareOptions {
            header: false,
            ..CompareOptions::default()
        };
        let (out, summary) = run("CO2;O2C\n", &options).unwrap();
        assert_eq!(out, "CO2;O2C;COO;COO;True\n");
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn test_keep_columns() {
        let options = CompareOptions {
            keep_columns: true,
            column_a: 2,
            column_b: 3,
            ..CompareOptions::default()
        };
        let (out, _) = run("id;a;b\n7;H2;HH\n", &options).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id;a;b;A Normalized;B normalized;Is Equal?");
        assert_eq!(lines[1], "7;H2;HH;HH;HH;True");
    }

    #[test]
    fn test_custom_separator_and_ignore() {
        let options = CompareOptions {
            separator: "\t".to_string(),
            ignore: IgnoreSet::empty(),
            header: false,
            ..CompareOptions::default()
        };
        let (out, summary) = run("C'\tC\n", &options).unwrap();
        assert_eq!(out, "C'\tC\t'C\tC\tFalse\n");
        assert_eq!(summary.different, 1);
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let options = CompareOptions {
            header: false,
            ..CompareOptions::default()
        };
        let (out, _) = run("H;H  \r\n", &options).unwrap();
        assert_eq!(out, "H;H;H;H;True\n");
    }

    #[test]
    fn test_missing_column() {
        let err = run("a;b\nCO2\n", &CompareOptions::default()).unwrap_err();
        match err {
            Error::MissingColumn {
                line,
                column,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_same_columns_rejected() {
        let options = CompareOptions {
            column_b: 1,
            ..CompareOptions::default()
        };
        assert!(matches!(
            run("a;b\n", &options),
            Err(Error::SameColumns(1))
        ));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let options = CompareOptions {
            separator: String::new(),
            header: false,
            ..CompareOptions::default()
        };
        assert!(matches!(
            run("CO2;O2C\n", &options),
            Err(Error::EmptySeparator)
        ));
    }

    #[test]
    fn test_oversized_formula_reports_line() {
        let input = "a;b\nCO2;O2C\nC99999999999999999999;C\n";
        match run(input, &CompareOptions::default()) {
            Err(Error::Line { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::FormulaTooLong { .. }));
            }
            other => panic!("expected Line error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_column_rejected() {
        let options = CompareOptions {
            column_a: 0,
            ..CompareOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidColumn(0))));
    }

    #[test]
    fn test_empty_input() {
        let (out, summary) = run("", &CompareOptions::default()).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary, Summary::default());
    }
}

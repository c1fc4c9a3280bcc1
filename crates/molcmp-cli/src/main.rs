use clap::{Parser, Subcommand};
use colored::Colorize;
use molcmp_core::normalizer::DEFAULT_IGNORE;
use molcmp_core::{
    compare_pair, compare_rows, element_groups, try_normalize, CompareOptions, IgnoreSet,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Molecular Formulae Comparator
///
/// Checks whether two formula strings describe the same element multiset.
/// Counts may have several digits, element symbols are one letter, a letter
/// without a count counts once, and `A` is read as the radical `R`.
#[derive(Parser)]
#[command(name = "molcmp", version, about, long_about = None)]
struct Cli {
    /// Suppress status output (verdict text of `equal`, summary of `compare`)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of each formula
    Normalize {
        /// Formulas to normalize
        #[arg(required = true)]
        formulas: Vec<String>,
        /// Characters to ignore, given as one string
        #[arg(long, default_value = DEFAULT_IGNORE, allow_hyphen_values = true)]
        ignore: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two formulas (exit 1 when they differ)
    Equal {
        /// First formula
        a: String,
        /// Second formula
        b: String,
        /// Characters to ignore, given as one string
        #[arg(long, default_value = DEFAULT_IGNORE, allow_hyphen_values = true)]
        ignore: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two columns of a delimited table
    Compare {
        /// Input file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Field separator
        #[arg(short, long, default_value = ";")]
        separator: String,
        /// Column of formula A, starting at 1
        #[arg(short = 'a', long, default_value_t = 1)]
        column_a: usize,
        /// Column of formula B, starting at 1
        #[arg(short = 'b', long, default_value_t = 2)]
        column_b: usize,
        /// Characters to ignore, given as one string
        #[arg(long, default_value = DEFAULT_IGNORE, allow_hyphen_values = true)]
        ignore: String,
        /// Compare the first line instead of treating it as a header
        #[arg(long)]
        no_header: bool,
        /// Keep every input column and append the results on the right
        #[arg(long)]
        keep_columns: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let exit_code = match cli.command {
        Commands::Normalize {
            formulas,
            ignore,
            json,
        } => cmd_normalize(&formulas, &IgnoreSet::from(ignore.as_str()), json),
        Commands::Equal { a, b, ignore, json } => {
            cmd_equal(&a, &b, &IgnoreSet::from(ignore.as_str()), json, quiet)
        }
        Commands::Compare {
            input,
            output,
            separator,
            column_a,
            column_b,
            ignore,
            no_header,
            keep_columns,
            json,
        } => {
            let options = CompareOptions {
                separator,
                column_a,
                column_b,
                ignore: IgnoreSet::from(ignore.as_str()),
                header: !no_header,
                keep_columns,
            };
            cmd_compare(&input, output.as_deref(), &options, json, quiet)
        }
        Commands::Version => {
            println!(
                "molcmp {} (molcmp-core {})",
                env!("CARGO_PKG_VERSION"),
                molcmp_core::VERSION
            );
            0
        }
    };

    process::exit(exit_code);
}

// ── Commands ──────────────────────────────────────────────

fn cmd_normalize(formulas: &[String], ignore: &IgnoreSet, json: bool) -> i32 {
    let mut normalized = Vec::with_capacity(formulas.len());
    for formula in formulas {
        match try_normalize(formula, ignore) {
            Ok(n) => normalized.push(n),
            Err(e) => return report_error(&format!("{}: {}", formula, e)),
        }
    }

    if json {
        let items: Vec<serde_json::Value> = formulas
            .iter()
            .zip(&normalized)
            .map(|(f, n)| {
                serde_json::json!({
                    "formula": f,
                    "normalized": n,
                    "groups": element_groups(f, ignore),
                })
            })
            .collect();
        return print_json(&serde_json::Value::Array(items));
    }

    for n in &normalized {
        println!("{}", n);
    }
    0
}

fn cmd_equal(a: &str, b: &str, ignore: &IgnoreSet, json: bool, quiet: bool) -> i32 {
    let comparison = match compare_pair(a, b, ignore) {
        Ok(c) => c,
        Err(e) => return report_error(&e.to_string()),
    };
    let code = if comparison.equal { 0 } else { 1 };

    if json {
        let output = serde_json::json!({
            "a": a,
            "b": b,
            "normalized_a": comparison.normalized_a,
            "normalized_b": comparison.normalized_b,
            "equal": comparison.equal,
        });
        let json_code = print_json(&output);
        return if json_code != 0 { json_code } else { code };
    }

    if !quiet {
        println!("A: {} → {}", a, comparison.normalized_a);
        println!("B: {} → {}", b, comparison.normalized_b);
        if comparison.equal {
            println!("{} equivalent", "✓".green());
        } else {
            println!("{} not equivalent", "✗".red());
        }
    }
    code
}

fn cmd_compare(
    input: &str,
    output: Option<&Path>,
    options: &CompareOptions,
    json: bool,
    quiet: bool,
) -> i32 {
    let reader: Box<dyn BufRead> = if input == "-" {
        Box::new(io::stdin().lock())
    } else {
        match File::open(input) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => return report_error(&format!("cannot open {}: {}", input, e)),
        }
    };

    let writer: Box<dyn Write> = match output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                return report_error(&format!("cannot create {}: {}", path.display(), e))
            }
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = match compare_rows(reader, writer, options) {
        Ok(s) => s,
        Err(e) => return report_error(&e.to_string()),
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => eprintln!("{}", s),
            Err(e) => return report_error(&format!("JSON serialization failed: {}", e)),
        }
    } else if !quiet {
        eprintln!(
            "{} {} row(s) compared: {} equal, {} different",
            "✓".green(),
            summary.rows,
            summary.equal.to_string().green(),
            summary.different.to_string().yellow()
        );
    }
    0
}

// ── Helpers ───────────────────────────────────────────────

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            0
        }
        Err(e) => report_error(&format!("JSON serialization failed: {}", e)),
    }
}

fn report_error(msg: &str) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), msg);
    2
}

// Counterpoint checker — CLI entry point.
//
// Loads one MIDI file per voice, runs the parallel-motion analysis, and
// prints the verdict.
//
// Usage:
//   cargo run -p counterpoint_check --bin check -- <file.mid>...
//     [--no-loop] [--json] [--dump-matrices]
//
// Exit status: 0 valid, 1 violations or length mismatch, 2 load/usage error.

use colored::Colorize;
use counterpoint_check::composition::Composition;
use counterpoint_check::midi::load_composition;
use counterpoint_check::timeline::PairMatrix;
use counterpoint_check::validate::{AnalysisObserver, ValidationError, Violation, validate_with_observer};
use serde::Serialize;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let json = has_flag(&args, "--json");
    let dump = has_flag(&args, "--dump-matrices");
    let looped = !has_flag(&args, "--no-loop");
    let paths: Vec<PathBuf> = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .collect();

    if paths.is_empty() {
        eprintln!("usage: check <file.mid>... [--no-loop] [--json] [--dump-matrices]");
        std::process::exit(2);
    }

    let composition = match load_composition(&paths, looped) {
        Ok(composition) => composition,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            std::process::exit(2);
        }
    };

    if !json {
        print_voices(&composition);
    }

    let result = if dump {
        validate_with_observer(&composition, &mut MatrixDump)
    } else {
        composition.validate()
    };

    if json {
        print_json_report(&result);
    } else {
        match &result {
            Ok(()) => println!("{}", "ok: no parallel motion detected".green()),
            Err(e) => eprintln!("{}: {}", "error".red(), e),
        }
    }

    if result.is_err() {
        std::process::exit(1);
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn print_voices(composition: &Composition) {
    for (index, voice) in composition.voices().iter().enumerate() {
        println!("voice {} ({}): {} steps", index + 1, voice.name(), voice.len());
        println!("  {}", voice.render_line());
    }
}

/// Machine-readable verdict for `--json`.
#[derive(Serialize)]
struct JsonReport {
    valid: bool,
    violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_json_report(result: &Result<(), ValidationError>) {
    let report = match result {
        Ok(()) => JsonReport {
            valid: true,
            violations: Vec::new(),
            error: None,
        },
        Err(ValidationError::ParallelMotion { violations }) => JsonReport {
            valid: false,
            violations: violations.clone(),
            error: None,
        },
        Err(e @ ValidationError::LengthMismatch { .. }) => JsonReport {
            valid: false,
            violations: Vec::new(),
            error: Some(e.to_string()),
        },
    };

    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            std::process::exit(2);
        }
    }
}

/// Observer that prints the derived matrices under `--dump-matrices`.
struct MatrixDump;

impl AnalysisObserver for MatrixDump {
    fn on_timeline(&mut self, timeline: &[PairMatrix<u8>]) {
        println!("interval matrices ({} steps):", timeline.len());
        for (t, matrix) in timeline.iter().enumerate() {
            println!("  t={t}: {}", render_pairs(matrix, |iv| iv.to_string()));
        }
    }

    fn on_motion(&mut self, motion: &[PairMatrix<bool>]) {
        println!("motion flags:");
        for (t, matrix) in motion.iter().enumerate() {
            println!(
                "  t={t}: {}",
                render_pairs(matrix, |flag| if flag { "x" } else { "." }.to_string())
            );
        }
    }
}

fn render_pairs<T: Copy + Default>(
    matrix: &PairMatrix<T>,
    render: impl Fn(T) -> String,
) -> String {
    let num_voices = matrix.num_voices();
    if num_voices < 2 {
        return "(no pairs)".to_string();
    }
    let mut parts = Vec::new();
    for i in 0..num_voices {
        for j in (i + 1)..num_voices {
            parts.push(format!("{}-{}:{}", i + 1, j + 1, render(matrix.get(i, j))));
        }
    }
    parts.join(" ")
}

//! Instruction file reading and writing
//!
//! Plain text, one instruction per line:
//!
//! ```text
//! 2
//! 12.5000,-3.2500
//! 13.0000,-3.0000
//!
//! 40.0000,7.5000
//!
//! ```
//!
//! The first line holds the path count. Each path is a run of lines
//! followed by one blank line. Absolute instructions have two fields
//! (left and right degrees), timed instructions three (left speed, right
//! speed, duration). A file holds a single kind.
//!
//! Degrees are written with the configured precision. Durations are
//! always written in full: a timed replay adds every duration up, so a
//! rounded duration would drift by `rate * 0.5e-precision` mm per move.

use crate::instructions::{AbsoluteInstruction, InstructionPack, InstructionPath, TimedInstruction};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;
use wallplotter_core::{FileFormatError, Result};

/// Render `pack`, degrees with `precision` decimal places.
pub fn format_instructions(pack: &InstructionPack, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", pack.len());
    match pack {
        InstructionPack::Absolute(paths) => {
            for path in paths {
                for i in path.instructions() {
                    let _ = writeln!(
                        out,
                        "{:.*},{:.*}",
                        precision, i.left_degrees, precision, i.right_degrees
                    );
                }
                out.push('\n');
            }
        }
        InstructionPack::Timed(paths) => {
            for path in paths {
                for i in path.instructions() {
                    let _ = writeln!(
                        out,
                        "{},{},{}",
                        i.left_speed, i.right_speed, i.duration
                    );
                }
                out.push('\n');
            }
        }
    }
    out
}

enum Parsed {
    Absolute(AbsoluteInstruction),
    Timed(TimedInstruction),
}

fn parse_error(line: usize, reason: impl Into<String>) -> FileFormatError {
    FileFormatError::InstructionParse {
        line,
        reason: reason.into(),
    }
}

fn parse_line(line_no: usize, line: &str) -> std::result::Result<Parsed, FileFormatError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let float = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| parse_error(line_no, format!("'{s}' is not a number")))
    };
    let speed = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| parse_error(line_no, format!("'{s}' is not an integer speed")))
    };

    match fields.as_slice() {
        [left, right] => Ok(Parsed::Absolute(AbsoluteInstruction::new(
            float(left)?,
            float(right)?,
        ))),
        [left, right, duration] => {
            let duration = float(duration)?;
            if duration < 0.0 {
                return Err(parse_error(line_no, "negative duration"));
            }
            Ok(Parsed::Timed(TimedInstruction::new(
                speed(left)?,
                speed(right)?,
                duration,
            )))
        }
        other => Err(parse_error(
            line_no,
            format!("expected 2 or 3 fields, found {}", other.len()),
        )),
    }
}

/// Parse the text of an instruction file.
pub fn parse_instructions(text: &str) -> std::result::Result<InstructionPack, FileFormatError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (line_no, header) = lines
        .by_ref()
        .find(|(_, l)| !l.is_empty())
        .ok_or_else(|| FileFormatError::EmptyFile("instruction file".to_string()))?;
    let expected: usize = header
        .parse()
        .map_err(|_| parse_error(line_no, format!("'{header}' is not a path count")))?;

    let mut absolute: Vec<InstructionPath<AbsoluteInstruction>> = Vec::new();
    let mut timed: Vec<InstructionPath<TimedInstruction>> = Vec::new();
    let mut current_absolute = Vec::new();
    let mut current_timed = Vec::new();
    let mut timed_kind: Option<bool> = None;

    let mut close_path = |a: &mut Vec<AbsoluteInstruction>, t: &mut Vec<TimedInstruction>| {
        if !a.is_empty() {
            absolute.extend(InstructionPath::new(std::mem::take(a)));
        }
        if !t.is_empty() {
            timed.extend(InstructionPath::new(std::mem::take(t)));
        }
    };

    for (line_no, line) in lines {
        if line.is_empty() {
            close_path(&mut current_absolute, &mut current_timed);
            continue;
        }
        let parsed = parse_line(line_no, line)?;
        let is_timed = matches!(parsed, Parsed::Timed(_));
        match timed_kind {
            None => timed_kind = Some(is_timed),
            Some(kind) if kind != is_timed => {
                return Err(parse_error(
                    line_no,
                    "absolute and timed instructions cannot be mixed",
                ));
            }
            Some(_) => {}
        }
        match parsed {
            Parsed::Absolute(i) => current_absolute.push(i),
            Parsed::Timed(i) => current_timed.push(i),
        }
    }
    close_path(&mut current_absolute, &mut current_timed);

    let pack = if timed_kind == Some(true) {
        InstructionPack::Timed(timed)
    } else {
        InstructionPack::Absolute(absolute)
    };
    if pack.len() != expected {
        return Err(FileFormatError::PathCount {
            expected,
            found: pack.len(),
        });
    }
    Ok(pack)
}

/// Write `pack` to `path`.
pub fn save_instructions(path: &Path, pack: &InstructionPack, precision: usize) -> Result<()> {
    fs::write(path, format_instructions(pack, precision))?;
    info!(
        path = %path.display(),
        paths = pack.len(),
        policy = %pack.policy(),
        "Wrote motor instructions"
    );
    Ok(())
}

/// Read an instruction file from `path`.
pub fn load_instructions(path: &Path) -> Result<InstructionPack> {
    let text = fs::read_to_string(path)?;
    let pack = parse_instructions(&text)?;
    info!(path = %path.display(), paths = pack.len(), "Loaded motor instructions");
    Ok(pack)
}

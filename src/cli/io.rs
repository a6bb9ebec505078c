//! Terminal I/O for the CLI
//!
//! - Results go to stdout as a single pretty JSON object
//! - Questions go to the output stream, answers come one per line
//! - Logs stay on stderr

use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::{Number, Value};

use super::errors::{CliError, CliResult};
use crate::inference::Question;
use crate::knowledge::{Variable, VariableKind};

/// Write a serializable value to stdout as JSON
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json_to(&mut out, value)
}

/// Write a serializable value as JSON followed by a newline
pub fn write_json_to<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Print a question, with the allowed values when the variable has any
pub fn write_question<W: Write>(
    out: &mut W,
    question: &Question,
    variable: Option<&Variable>,
) -> CliResult<()> {
    writeln!(out, "{}", question.question)?;
    if !question.explanation.is_empty() {
        writeln!(out, "  ({})", question.explanation)?;
    }
    if let Some(var) = variable {
        if !var.allowed_values.is_empty() {
            writeln!(out, "  options: {}", var.allowed_values.join(", "))?;
        }
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Read one answer line. Errors when input ends before an answer arrives.
pub fn read_answer<R: BufRead>(input: &mut R, variable: &str) -> CliResult<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::input_error(format!(
            "input closed while waiting for '{}'",
            variable
        )));
    }
    Ok(line.trim().to_string())
}

/// Turns a typed answer into a fact value.
///
/// Numeric variables get a JSON number when the text parses as one.
/// Everything else stays a string, matching how rule files spell values.
pub fn parse_answer(raw: &str, variable: Option<&Variable>) -> Value {
    let numeric = variable.map_or(false, |v| v.kind == VariableKind::Numeric);
    if numeric {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(n.into());
        }
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(raw.to_string())
}

/// Parse the `--facts` argument into a JSON object
pub fn parse_facts(raw: &str) -> CliResult<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::input_error(format!(
            "facts must be a JSON object, got {}",
            other
        ))),
        Err(e) => Err(CliError::input_error(format!("invalid facts JSON: {}", e))),
    }
}

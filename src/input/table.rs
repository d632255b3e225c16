use std::io::BufRead;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::{open_maybe_gz, split_fields};

/// Reads a dense numeric table, one row per line.
///
/// Blank lines and `#` comments are skipped. A first data line in which no
/// field parses as a number is taken as a header; a partly numeric first line
/// is a parse error.
pub fn parse_numeric_table(path: &Path) -> Result<Vec<Vec<f64>>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut line_no = 0usize;
    let mut seen_first = false;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parsed: Result<Vec<f64>, _> = split_fields(line).map(parse_value).collect();
        match parsed {
            Ok(row) => rows.push(row),
            Err(_) if !seen_first && split_fields(line).all(|f| parse_value(f).is_err()) => {
                crate::info!("treating line {} of {} as header", line_no, path.display());
            }
            Err(field) => {
                return Err(InputError::Parse(format!(
                    "{}: non-numeric value '{}' on line {}",
                    path.display(),
                    field,
                    line_no
                )));
            }
        }
        seen_first = true;
    }

    if rows.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: no numeric rows",
            path.display()
        )));
    }

    Ok(rows)
}

fn parse_value(field: &str) -> Result<f64, String> {
    match field.to_ascii_lowercase().as_str() {
        "nan" | "na" => Ok(f64::NAN),
        "inf" | "+inf" | "infinity" => Ok(f64::INFINITY),
        "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
        _ => field.parse::<f64>().map_err(|_| field.to_string()),
    }
}

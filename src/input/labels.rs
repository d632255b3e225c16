use std::io::BufRead;
use std::path::Path;

use crate::input::InputError;
use crate::input::reader::open_maybe_gz;

const HEADER_NAMES: &[&str] = &["subject", "subject_id", "subjectid", "label", "sub"];

/// One subject label per scan, in file order.
///
/// A first line naming a subject column is a header; with tab-separated
/// columns the subject column is used, otherwise the first column.
pub fn parse_labels(path: &Path) -> Result<Vec<String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut labels = Vec::new();
    let mut column: Option<usize> = None;
    let mut seen_first = false;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if !seen_first {
            seen_first = true;
            if let Some(idx) = header_column(&fields) {
                column = Some(idx);
                continue;
            }
        }

        let idx = column.unwrap_or(0);
        match fields.get(idx) {
            Some(value) if !value.is_empty() => labels.push(value.to_string()),
            _ => {
                return Err(InputError::Parse(format!(
                    "{}: missing subject label on row {}",
                    path.display(),
                    labels.len() + 1
                )));
            }
        }
    }

    if labels.is_empty() {
        return Err(InputError::Parse("labels file is empty".to_string()));
    }

    Ok(labels)
}

fn header_column(fields: &[&str]) -> Option<usize> {
    fields.iter().position(|f| {
        let lower = f.to_ascii_lowercase();
        HEADER_NAMES.iter().any(|&h| h == lower)
    })
}

use crate::model::SizeStatus;
use std::io::{self, BufRead, Write};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{} {}", bytes, UNITS[0]);
    }

    let fixed = format!("{:.1}", value);
    let trimmed = fixed.strip_suffix(".0").unwrap_or(&fixed);
    format!("{} {}", trimmed, UNITS[unit])
}

pub fn format_size_status(size: SizeStatus, in_bytes: bool) -> String {
    match size {
        SizeStatus::Loading => "loading...".to_string(),
        SizeStatus::Unknown => "Unknown".to_string(),
        SizeStatus::Known(bytes) if in_bytes => format!("{} B", format_number(bytes)),
        SizeStatus::Known(bytes) => format_size(bytes),
    }
}

pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortens `text` to `max` chars by cutting out the middle.
pub fn truncate_middle(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max || max < 5 {
        return text.to_string();
    }
    let keep = max - 3;
    let head = keep / 2;
    let tail = keep - head;
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(count - tail).collect();
    format!("{}...{}", start, end)
}

/// Asks for a destination folder on stdin. An empty answer keeps `default`;
/// end of input (Ctrl-D) cancels. The prompt goes to stderr so stdout stays
/// clean for `--format json`.
pub fn prompt_folder(default: &str) -> io::Result<Option<String>> {
    let stdin = io::stdin();
    read_folder_answer(&mut stdin.lock(), &mut io::stderr(), default)
}

fn read_folder_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &str,
) -> io::Result<Option<String>> {
    if default.is_empty() {
        write!(output, "Destination folder (empty for downloads root): ")?;
    } else {
        write!(output, "Destination folder [{}]: ", default)?;
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.trim().is_empty() {
        Ok(Some(default.to_string()))
    } else {
        Ok(Some(answer.to_string()))
    }
}

//! Record splitting with RFC 4180 quoting

use super::Record;
use crate::error::{Error, Result};

/// Split text into records.
///
/// Quoted fields may contain commas, line breaks and doubled quotes.
/// `\n`, `\r\n` and a bare `\r` all end a record.
pub(super) fn split_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut record = Record::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut quote_line = 0usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
                quote_line = line;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                finish_record(&mut records, &mut record, &mut field, quoted);
                quoted = false;
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Decode(format!(
            "unterminated quoted field starting on line {}",
            quote_line
        )));
    }

    finish_record(&mut records, &mut record, &mut field, quoted);
    Ok(records)
}

fn finish_record(records: &mut Vec<Record>, record: &mut Record, field: &mut String, quoted: bool) {
    // Blank line
    if record.is_empty() && field.is_empty() && !quoted {
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

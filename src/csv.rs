// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::games::COLUMNS;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // "" escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing row without newline (also covers an unterminated quote).
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// First row is a header if it names the first game column, or if it has no
/// numeric cell at all (user-supplied regression input).
pub fn detect_headers(mut rows: Vec<Vec<String>>) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    let Some(first) = rows.first() else {
        return (None, rows);
    };
    let named = first.first().is_some_and(|c| c.trim().eq_ignore_ascii_case(COLUMNS[0]));
    let textual = !first.is_empty() && first.iter().all(|c| c.trim().parse::<f64>().is_err());
    if named || textual {
        let header = rows.remove(0);
        return (Some(header), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Full export text (Copy/Export/cache).
pub fn to_export_string(
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        if let Some(h) = headers {
            let _ = write_row(&mut buf, h, sep);
        }
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_commas_and_crlf() {
        let text = "Name,Owners\r\n\"Tzolk'in, The Mayan Calendar\",5\r\n\"Say \"\"hi\"\"\",7";
        let rows = parse_rows(text, ',');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0], "Tzolk'in, The Mayan Calendar");
        assert_eq!(rows[2], vec![s!("Say \"hi\""), s!("7")]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows("a\tb\n\n1\t2\n", '\t');
        assert_eq!(rows, vec![vec![s!("a"), s!("b")], vec![s!("1"), s!("2")]]);
    }

    #[test]
    fn header_detection() {
        let (h, rows) = detect_headers(parse_rows("Name,x\nA,1\n", ','));
        assert_eq!(h.unwrap()[0], "Name");
        assert_eq!(rows.len(), 1);

        let (h, rows) = detect_headers(parse_rows("x1,y\n1,2\n", ','));
        assert!(h.is_some());
        assert_eq!(rows, vec![vec![s!("1"), s!("2")]]);

        let (h, rows) = detect_headers(parse_rows("1,2\n3,4\n", ','));
        assert!(h.is_none());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn export_string_respects_header_toggle() {
        let headers = Some(vec![s!("Name"), s!("Min_Age")]);
        let rows = vec![vec![s!("A, B"), s!("12")]];
        assert_eq!(to_export_string(&headers, &rows, true, ','), "Name,Min_Age\n\"A, B\",12\n");
        assert_eq!(to_export_string(&headers, &rows, false, '\t'), "A, B\t12\n");
    }
}

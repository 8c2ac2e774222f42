//! Sitemap CSV tokenizer.
//!
//! A small character-level state machine:
//! - `,` separates fields and `\n` separates rows (outside quotes)
//! - `"` toggles quoted mode; `""` inside quotes is a literal quote
//! - `\r` outside quotes is dropped, so CRLF files parse like LF files
//!
//! Row widths are not checked; callers must tolerate ragged rows.

/// One CSV line split into fields.
pub type Row = Vec<String>;

/// Split CSV text into rows of fields.
///
/// Never fails: unterminated quotes simply run to the end of input.
pub fn parse(text: &str) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut quoted = false;

    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => quoted = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => quoted = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            _ => field.push(c),
        }
    }

    // Flush a final line without a trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Word-wraps `text` to `width` columns.
///
/// Breaks prefer whitespace and punctuation; a word wider than `width` is split hard. Explicit
/// newlines start a new line. A zero width returns the lines unwrapped.
pub fn wrap_words(text: &str, width: u16) -> Vec<String> {
    let max_cols = width as usize;
    let mut out = Vec::new();

    for raw in text.split('\n') {
        let raw = raw.replace('\t', "    ");
        if raw.is_empty() || max_cols == 0 {
            out.push(raw);
            continue;
        }

        let mut line = String::new();
        let mut soft_break: Option<usize> = None;

        for ch in raw.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if UnicodeWidthStr::width(line.as_str()) + w > max_cols {
                if ch.is_whitespace() {
                    out.push(std::mem::take(&mut line).trim_end().to_string());
                    soft_break = None;
                    continue;
                }
                match soft_break.take() {
                    Some(split) => {
                        let rest = line.split_off(split);
                        out.push(line.trim_end().to_string());
                        line = rest.trim_start().to_string();
                    }
                    None if !line.is_empty() => out.push(std::mem::take(&mut line)),
                    None => {}
                }
            }

            if line.is_empty() && ch.is_whitespace() {
                continue;
            }
            if ch.is_whitespace() || matches!(ch, ',' | ';' | '.' | ':' | '!' | '?' | '-' | '/') {
                soft_break = Some(line.len() + if ch.is_whitespace() { 0 } else { ch.len_utf8() });
            }
            line.push(ch);
        }

        if !line.is_empty() {
            out.push(line);
        }
    }
    out
}

use ratatui::text::Span;

/// Terminal columns taken by `text`; emoji count as two.
pub(super) fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Splits `text` into rows no wider than `width` columns.
///
/// A glyph wider than the whole row still gets a row of its own. Zero-width
/// marks stay with the glyph they modify.
pub(super) fn wrap_text_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut row = String::new();
        let mut glyph_start = 0usize;
        for ch in raw.chars() {
            let start = row.len();
            row.push(ch);
            if start == 0 || display_width(&row[start..]) > 0 {
                glyph_start = start;
            }
            if glyph_start > 0 && display_width(&row) > width {
                let glyph = row.split_off(glyph_start);
                lines.push(std::mem::replace(&mut row, glyph));
                glyph_start = 0;
            }
        }
        lines.push(row);
    }
    lines
}

/// Longest suffix of `text` that fits in `width` columns.
pub(super) fn tail_within_width(text: &str, width: usize) -> &str {
    let mut used = 0usize;
    let mut start = text.len();
    for (index, ch) in text.char_indices().rev() {
        let mut buf = [0u8; 4];
        used += display_width(ch.encode_utf8(&mut buf));
        if used > width {
            break;
        }
        start = index;
    }
    &text[start..]
}

/// Backend text is untrusted: drop escape sequences and control characters.
pub(super) fn sanitize_text_for_tui(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\u{1b}' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for seq_ch in chars.by_ref() {
                        if ('@'..='~').contains(&seq_ch) {
                            break;
                        }
                    }
                }
            }
            '\n' => out.push('\n'),
            '\r' => {}
            '\t' => out.push_str("    "),
            _ if ch.is_control() => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

pub(super) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let chars = text.chars();
    let count = chars.clone().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return chars.take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = chars.take(keep).collect();
    out.push_str("...");
    out
}

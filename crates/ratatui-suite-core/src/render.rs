use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Draws a one-column scrollbar for `state` into `area`: a `█` thumb over a blank track. The
/// column is left blank when all content fits.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.width == 0 || area.height == 0 {
        return;
    }
    let track = area.height as u32;
    let (thumb_top, thumb_len) = thumb_span(state, track).unwrap_or((0, 0));
    for dy in 0..area.height {
        let on_thumb = (dy as u32) >= thumb_top && (dy as u32) < thumb_top + thumb_len;
        buf.set_stringn(area.x, area.y + dy, if on_thumb { "█" } else { " " }, 1, style);
    }
}

/// Thumb offset and length within a track of `track` rows, or `None` when nothing scrolls.
fn thumb_span(state: &ViewportState, track: u32) -> Option<(u32, u32)> {
    let visible = state.viewport_h as u32;
    if track == 0 || state.content_h <= visible {
        return None;
    }
    let len = (visible * track).div_ceil(state.content_h).clamp(1, track);
    let max_y = state.content_h - visible;
    let room = track - len;
    let top = (state.y.min(max_y) * room + max_y / 2) / max_y;
    Some((top.min(room), len))
}

/// Writes characters into one row, skipping `start_col` columns and stopping at `max_cols`.
///
/// Tabs expand to four spaces. A wide character that straddles either edge is dropped rather
/// than split.
struct RowWriter {
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl RowWriter {
    fn new(x: u16, y: u16, start_col: u32, max_cols: u16) -> Self {
        Self {
            x,
            y,
            start_col: start_col as usize,
            max_cols: max_cols as usize,
            col: 0,
            out_cols: 0,
        }
    }

    /// Returns `false` once the row is full.
    fn push(&mut self, buf: &mut Buffer, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..4 {
                if !self.push(buf, ' ', style) {
                    return false;
                }
            }
            return true;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            return true;
        }
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }

        let mut tmp = [0u8; 4];
        let dx = self.out_cols as u16;
        if let Some(cell) = buf.cell_mut((self.x + dx, self.y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((self.x + dx + 1, self.y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        self.col += w;
        self.out_cols += w;
        true
    }
}

/// Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let mut w = RowWriter::new(x, y, start_col, max_cols);
    for ch in input.chars() {
        if !w.push(buf, ch, style) {
            break;
        }
    }
    w.out_cols as u16
}

/// Like [`render_str_clipped`], taking each span's own style unless it is the default.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) -> u16 {
    let mut w = RowWriter::new(x, y, start_col, max_cols);
    'spans: for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        for ch in span.content.chars() {
            if !w.push(buf, ch, style) {
                break 'spans;
            }
        }
    }
    w.out_cols as u16
}

pub fn display_width(input: &str) -> usize {
    input
        .chars()
        .map(|ch| match ch {
            '\t' => 4,
            _ => UnicodeWidthChar::width(ch).unwrap_or(0),
        })
        .sum()
}

/// Cuts `input` to at most `max_cols` columns, ending with `…` when something was dropped.
pub fn truncate_with_ellipsis(input: &str, max_cols: usize) -> String {
    if display_width(input) <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut cols = 0usize;
    for ch in input.chars() {
        let w = if ch == '\t' {
            4
        } else {
            UnicodeWidthChar::width(ch).unwrap_or(0)
        };
        if cols + w > max_cols - 1 {
            break;
        }
        out.push(ch);
        cols += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row(buf: &Buffer, w: u16) -> String {
        (0..w)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn render_spans_clipped_expands_tabs() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let spans = vec![Span::raw("\t1")];
        let n = render_spans_clipped(0, 0, 0, 6, &mut buf, &spans, Style::default());
        assert_eq!(n, 5);
        assert!(row(&buf, 6).starts_with("    1"));
    }

    #[test]
    fn render_str_clipped_skips_partial_wide_chars() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        render_str_clipped(0, 0, 1, 3, &mut buf, "你好", Style::default());
        assert_eq!(row(&buf, 3).trim_end(), "好");
    }

    #[test]
    fn render_str_clipped_stops_at_width() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let n = render_str_clipped(0, 0, 0, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(n, 3);
        assert_eq!(row(&buf, 4), "abc ");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_with_ellipsis("abc", 4), "abc");
        assert_eq!(display_width("你a"), 3);
    }

    #[test]
    fn scrollbar_thumb_tracks_the_offset() {
        let mut state = ViewportState::default();
        state.set_viewport(10, 5);
        state.set_content(10, 20);
        assert_eq!(thumb_span(&state, 5), Some((0, 2)));
        state.scroll_y_by(100);
        assert_eq!(thumb_span(&state, 5), Some((3, 2)));

        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
        let col: String = (0..5)
            .map(|y| buf.cell((0, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect();
        assert_eq!(col, "   ██");

        state.set_content(10, 5);
        assert_eq!(thumb_span(&state, 5), None);
    }
}

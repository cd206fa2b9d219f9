use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

/// Styles of the hint line. The separator goes between two bindings.
#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " · ".to_string(),
        }
    }
}

impl HelpBarOptions {
    /// Descriptions in the muted text style, keys in the accent style.
    pub fn themed(theme: &Theme) -> Self {
        Self {
            style: theme.text_muted,
            key_style: theme.accent,
            ..Default::default()
        }
    }
}

/// Key hints for whatever widget has focus, drawn as `key desc · key desc` on one row.
///
/// The picker hands its current bindings over through
/// [`CheckTreePicker::help_bindings`](crate::check_tree::CheckTreePicker::help_bindings); the
/// search hint is only listed while the picker is searchable.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    /// Swaps the hints, e.g. after the picker's options change.
    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    /// Fills the first row of `area` with the hint style. Hints that run past the right edge are
    /// cut off.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.options.style);
        render::render_spans_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &self.to_spans(),
            self.options.style,
        );
    }

    fn to_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, b) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.options.separator.clone(), self.options.style));
            }
            spans.push(Span::styled(b.help_key.clone(), self.options.key_style));
            spans.push(Span::styled(format!(" {}", b.help_desc), self.options.style));
        }
        spans
    }
}

use ratatui::text::Line;
use ratatui::text::Span;
use std::borrow::Cow;

/// Display label of a tree node or notification field.
///
/// `Line` labels are renderable (styled spans); searching flattens them to the concatenated span
/// contents. `None` marks a label that has no textual form: it renders empty and never matches a
/// non-blank search term.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Label {
    Text(String),
    Line(Line<'static>),
    #[default]
    None,
}

impl Label {
    /// Plain text of the label, or `None` when it cannot be textualized.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Label::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Label::Line(line) => Some(Cow::Owned(line_to_plain(line))),
            Label::None => None,
        }
    }

    pub fn to_spans(&self) -> Vec<Span<'static>> {
        match self {
            Label::Text(s) => vec![Span::raw(s.clone())],
            Label::Line(line) => line.spans.clone(),
            Label::None => Vec::new(),
        }
    }

    /// Case-insensitive substring search. A blank term matches every label; any other term is
    /// searched for as typed, surrounding spaces included.
    pub fn matches(&self, term: &str) -> bool {
        if term.trim().is_empty() {
            return true;
        }
        let Some(text) = self.text() else {
            return false;
        };
        text.to_lowercase().contains(&term.to_lowercase())
    }
}

pub fn line_to_plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<Line<'static>> for Label {
    fn from(line: Line<'static>) -> Self {
        Label::Line(line)
    }
}

impl From<Span<'static>> for Label {
    fn from(span: Span<'static>) -> Self {
        Label::Line(Line::from(span))
    }
}

macro_rules! label_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Label {
            fn from(n: $t) -> Self {
                Label::Text(n.to_string())
            }
        })*
    };
}

label_from_number!(i32, i64, u32, u64, usize, f32, f64);

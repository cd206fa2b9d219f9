use super::Notice;
use super::NotificationKind;
use super::NotificationRegistry;
use super::NotificationStack;
use crate::render;
use crate::text::Label;
use crate::theme::Theme;
use crate::wrapping;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

#[derive(Clone, Debug)]
pub struct NotificationsViewOptions {
    /// Outer width of each notice box, borders included.
    pub width: u16,
    /// Columns between the side edge and a stack.
    pub margin_x: u16,
    /// Blank rows between boxes of one stack.
    pub gap: u16,
    pub border_type: BorderType,
}

impl Default for NotificationsViewOptions {
    fn default() -> Self {
        Self {
            width: 36,
            margin_x: 2,
            gap: 0,
            border_type: BorderType::Rounded,
        }
    }
}

/// Draws every stack of a [`NotificationRegistry`] into its corner, on top of whatever is
/// already in the buffer. Boxes that do not fit are skipped.
#[derive(Clone, Debug, Default)]
pub struct NotificationsView {
    options: NotificationsViewOptions,
}

impl NotificationsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NotificationsViewOptions) -> Self {
        Self { options }
    }

    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        registry: &NotificationRegistry,
        theme: &Theme,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for stack in registry.stacks() {
            self.render_stack(area, buf, stack, theme);
        }
    }

    fn render_stack(&self, area: Rect, buf: &mut Buffer, stack: &NotificationStack, theme: &Theme) {
        let width = self
            .options
            .width
            .min(area.width.saturating_sub(self.options.margin_x * 2));
        if width < 3 {
            return;
        }
        let x = if stack.placement.is_left() {
            area.x + self.options.margin_x
        } else {
            area.x + area.width - self.options.margin_x - width
        };

        let top = area.y + stack.offset.min(area.height);
        let bottom = (area.y + area.height).saturating_sub(stack.offset);
        // Next free row: growing down from `top`, or up from `bottom`.
        let mut cursor = if stack.placement.is_top() { top } else { bottom };

        for notice in stack.notices() {
            let lines = notice_lines(notice, width - 2);
            let height = lines.len() as u16 + 2;
            let y = if stack.placement.is_top() {
                if cursor + height > area.y + area.height {
                    break;
                }
                cursor
            } else {
                if cursor < area.y + height {
                    break;
                }
                cursor - height
            };

            let rect = Rect::new(x, y, width, height);
            self.render_notice(rect, buf, notice, lines, theme);

            if stack.placement.is_top() {
                cursor = y + height + self.options.gap;
            } else {
                cursor = y.saturating_sub(self.options.gap);
            }
        }
    }

    fn render_notice(
        &self,
        rect: Rect,
        buf: &mut Buffer,
        notice: &Notice,
        lines: Vec<Vec<Span<'static>>>,
        theme: &Theme,
    ) {
        Clear.render(rect, buf);
        let block = Block::bordered()
            .border_type(self.options.border_type)
            .border_style(kind_style(notice.kind, theme))
            .style(theme.text_primary);
        let inner = block.inner(rect);
        block.render(rect, buf);

        for (dy, spans) in lines.iter().enumerate() {
            let y = inner.y + dy as u16;
            if y >= inner.y + inner.height {
                break;
            }
            render::render_spans_clipped(
                inner.x,
                y,
                0,
                inner.width,
                buf,
                spans,
                theme.text_primary,
            );
        }
    }
}

fn kind_style(kind: NotificationKind, theme: &Theme) -> Style {
    match kind {
        NotificationKind::Open => theme.border,
        NotificationKind::Info => theme.info,
        NotificationKind::Success => theme.success,
        NotificationKind::Warning => theme.warning,
        NotificationKind::Error => theme.danger,
        NotificationKind::Loading => theme.accent,
    }
}

/// Title row (with the kind's icon) followed by the wrapped description.
fn notice_lines(notice: &Notice, width: u16) -> Vec<Vec<Span<'static>>> {
    let mut out = Vec::new();

    let icon = notice.kind.icon();
    if notice.title.is_some() || icon.is_some() {
        let mut spans = Vec::new();
        if let Some(icon) = icon {
            spans.push(Span::raw(format!("{icon} ")));
        }
        if let Some(title) = &notice.title {
            spans.extend(title.to_spans().into_iter().map(|s| {
                let style = s.style.add_modifier(ratatui::style::Modifier::BOLD);
                s.style(style)
            }));
        }
        out.push(spans);
    }

    match &notice.description {
        Some(Label::Line(line)) => out.push(line.spans.clone()),
        Some(label) => {
            let text = label.text().unwrap_or_default();
            out.extend(
                wrapping::wrap_words(&text, width)
                    .into_iter()
                    .map(|l| vec![Span::raw(l)]),
            );
        }
        None => {}
    }

    if out.is_empty() {
        out.push(Vec::new());
    }
    out
}

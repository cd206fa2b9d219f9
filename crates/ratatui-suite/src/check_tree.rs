//! Multi-select picker over hierarchical data.
//!
//! [`CheckTreePicker`] owns the source data and an accessor, keeps the UI state (focus, expanded
//! containers, search keyword, open/closed), and re-runs [`tree::annotate`] on every event and
//! every render. The checked values are either owned by the picker or controlled by the app via
//! [`CheckTreePicker::set_value`].
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::render;
use crate::theme::Theme;
use crate::tree;
use crate::tree::AnnotatedNode;
use crate::tree::CheckStatus;
use crate::tree::ExpandState;
use crate::tree::FlatNode;
use crate::tree::FocusDirection;
use crate::tree::TreeAccessor;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

#[derive(Clone, Debug, PartialEq)]
pub enum CheckTreeAction<V> {
    None,
    Redraw,
    /// The checked values changed. Controlled pickers keep showing the old value until the app
    /// calls [`CheckTreePicker::set_value`].
    Changed(Vec<V>),
    Opened,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckTreeKey {
    Up,
    Down,
    Expand,
    Collapse,
    Check,
    Open,
    Close,
    ClearSearch,
    Clean,
    First,
    Last,
}

#[derive(Clone, Debug)]
pub struct CheckTreeBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub expand: Vec<KeyEvent>,
    pub collapse: Vec<KeyEvent>,
    pub check: Vec<KeyEvent>,
    pub open: Vec<KeyEvent>,
    pub close: Vec<KeyEvent>,
    pub clear_search: Vec<KeyEvent>,
    pub clean: Vec<KeyEvent>,
    pub first: Vec<KeyEvent>,
    pub last: Vec<KeyEvent>,
}

impl Default for CheckTreeBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up)],
            down: vec![keymap::key(KeyCode::Down)],
            expand: vec![keymap::key(KeyCode::Right)],
            collapse: vec![keymap::key(KeyCode::Left)],
            check: vec![keymap::key(KeyCode::Enter), keymap::key_char(' ')],
            open: vec![keymap::key(KeyCode::Enter), keymap::key(KeyCode::Down)],
            close: vec![keymap::key(KeyCode::Esc)],
            clear_search: vec![keymap::key_ctrl('u')],
            clean: vec![keymap::key(KeyCode::Delete)],
            first: vec![keymap::key(KeyCode::Home)],
            last: vec![keymap::key(KeyCode::End)],
        }
    }
}

impl CheckTreeBindings {
    /// Key meaning while the menu is open (or the picker is inline).
    pub fn action_for(&self, key: &KeyEvent) -> Option<CheckTreeKey> {
        let table = [
            (&self.up, CheckTreeKey::Up),
            (&self.down, CheckTreeKey::Down),
            (&self.expand, CheckTreeKey::Expand),
            (&self.collapse, CheckTreeKey::Collapse),
            (&self.check, CheckTreeKey::Check),
            (&self.close, CheckTreeKey::Close),
            (&self.clear_search, CheckTreeKey::ClearSearch),
            (&self.clean, CheckTreeKey::Clean),
            (&self.first, CheckTreeKey::First),
            (&self.last, CheckTreeKey::Last),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| keymap::key_event_matches(p, key)))
            .map(|(_, action)| action)
    }

    pub fn is_open(&self, key: &KeyEvent) -> bool {
        self.open.iter().any(|p| keymap::key_event_matches(p, key))
    }

    pub fn help(&self, searchable: bool) -> Vec<Binding> {
        let mut out = vec![
            Binding::new("↑/↓", "move", [self.up.clone(), self.down.clone()].concat()),
            Binding::new(
                "←/→",
                "fold",
                [self.collapse.clone(), self.expand.clone()].concat(),
            ),
            Binding::new("space", "check", self.check.clone()),
            Binding::new("del", "clear", self.clean.clone()),
        ];
        if searchable {
            out.push(Binding::new(
                "^u",
                "clear search",
                self.clear_search.clone(),
            ));
        }
        out.push(Binding::new("esc", "close", self.close.clone()));
        out
    }
}

#[derive(Clone, Debug)]
pub struct CheckTreePickerOptions {
    pub cascade: bool,
    pub searchable: bool,
    pub cleanable: bool,
    pub disabled: bool,
    /// Render only the tree, always open, without the toggle line.
    pub inline: bool,
    pub expand_all: Option<bool>,
    pub default_expand_all: bool,
    /// Maximum number of tree rows shown at once.
    pub max_height: u16,
    pub indent: u16,
    pub placeholder: String,
    pub search_placeholder: String,
    pub empty_text: String,
    pub show_scrollbar: bool,
    pub bindings: CheckTreeBindings,
}

impl Default for CheckTreePickerOptions {
    fn default() -> Self {
        Self {
            cascade: false,
            searchable: true,
            cleanable: true,
            disabled: false,
            inline: false,
            expand_all: None,
            default_expand_all: false,
            max_height: 12,
            indent: 2,
            placeholder: "Select".to_string(),
            search_placeholder: "Search".to_string(),
            empty_text: "No results found".to_string(),
            show_scrollbar: true,
            bindings: CheckTreeBindings::default(),
        }
    }
}

type RenderValue<V> = Box<dyn Fn(&[V]) -> String>;

pub struct CheckTreePicker<T, A: TreeAccessor<T>> {
    data: Vec<T>,
    accessor: A,
    options: CheckTreePickerOptions,

    controlled: Option<Vec<A::Value>>,
    inner: Vec<A::Value>,
    disabled_values: Vec<A::Value>,
    render_value: Option<RenderValue<A::Value>>,

    focus: Option<A::Value>,
    expand: ExpandState,
    search: String,
    open: bool,

    pub viewport: ViewportState,
    toggle_area: Rect,
    rows_area: Rect,
    rendered_rows: Vec<FlatNode<A::Value>>,
}

impl<T, A: TreeAccessor<T>> CheckTreePicker<T, A> {
    pub fn new(data: Vec<T>, accessor: A) -> Self {
        Self::with_options(data, accessor, CheckTreePickerOptions::default())
    }

    pub fn with_options(data: Vec<T>, accessor: A, options: CheckTreePickerOptions) -> Self {
        let mut expand = ExpandState::new(options.default_expand_all);
        expand.expand_all = options.expand_all;
        Self {
            data,
            accessor,
            controlled: None,
            inner: Vec::new(),
            disabled_values: Vec::new(),
            render_value: None,
            focus: None,
            expand,
            search: String::new(),
            open: options.inline,
            viewport: ViewportState::default(),
            toggle_area: Rect::default(),
            rows_area: Rect::default(),
            rendered_rows: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &CheckTreePickerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CheckTreePickerOptions) {
        self.expand.expand_all = options.expand_all;
        self.expand.default_expand_all = options.default_expand_all;
        if options.inline {
            self.open = true;
        }
        self.options = options;
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    /// Initial value of an uncontrolled picker; focus starts on its first entry.
    pub fn with_default_value(mut self, value: Vec<A::Value>) -> Self {
        self.focus = value.first().cloned();
        self.inner = value;
        self
    }

    /// `Some` makes the picker controlled: it shows exactly this value. `None` returns control
    /// to the picker's own state.
    pub fn set_value(&mut self, value: Option<Vec<A::Value>>) {
        self.controlled = value;
    }

    /// The checked values currently shown.
    pub fn value(&self) -> &[A::Value] {
        self.controlled.as_deref().unwrap_or(&self.inner)
    }

    pub fn set_disabled_values(&mut self, values: Vec<A::Value>) {
        self.disabled_values = values;
    }

    pub fn is_disabled_value(&self, value: &A::Value) -> bool {
        self.disabled_values.contains(value)
    }

    pub fn set_render_value(&mut self, f: impl Fn(&[A::Value]) -> String + 'static) {
        self.render_value = Some(Box::new(f));
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.viewport.to_top();
    }

    pub fn focused(&self) -> Option<&A::Value> {
        self.focus.as_ref()
    }

    pub fn set_focus(&mut self, value: Option<A::Value>) {
        self.focus = value;
    }

    pub fn expand_state(&self) -> &ExpandState {
        &self.expand
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> CheckTreeAction<A::Value> {
        if self.open || self.options.disabled {
            return CheckTreeAction::None;
        }
        self.open = true;
        if self.focus.is_none() {
            self.focus = self.value().first().cloned();
        }
        CheckTreeAction::Opened
    }

    pub fn close(&mut self) -> CheckTreeAction<A::Value> {
        if !self.open || self.options.inline {
            return CheckTreeAction::None;
        }
        self.open = false;
        CheckTreeAction::Closed
    }

    pub fn annotated(&self) -> Vec<AnnotatedNode<'_, T, A::Value>> {
        tree::annotate(
            &self.data,
            &self.accessor,
            self.value(),
            &self.search,
            self.options.cascade,
        )
    }

    /// Rows of the menu in display order.
    pub fn rows(&self) -> Vec<FlatNode<A::Value>> {
        tree::flatten(&self.annotated(), &self.expand)
    }

    /// Source records for the checked values, in value order.
    pub fn selected_items(&self) -> Vec<&T> {
        let annotated = self.annotated();
        tree::selected_nodes(&annotated, self.value())
            .into_iter()
            .map(|n| n.data)
            .collect()
    }

    /// Text of the closed picker: placeholder, `"{n} selected"`, or the custom renderer.
    pub fn toggle_label(&self) -> String {
        let value = self.value();
        if value.is_empty() {
            return self.options.placeholder.clone();
        }
        match &self.render_value {
            Some(f) => f(value),
            None => format!("{} selected", value.len()),
        }
    }

    /// Checks or unchecks `value` the way a click on its row would.
    pub fn check(&mut self, value: &A::Value, checked: bool) -> CheckTreeAction<A::Value> {
        if self.options.disabled || self.is_disabled_value(value) {
            return CheckTreeAction::None;
        }
        let next = {
            let annotated = self.annotated();
            let Some(node) = tree::find_node(&annotated, value) else {
                return CheckTreeAction::None;
            };
            tree::toggle(self.value(), node, checked, self.options.cascade)
        };
        self.focus = Some(value.clone());
        self.commit(next)
    }

    /// Flips the focused row: anything not fully checked becomes checked.
    pub fn activate_focused(&mut self) -> CheckTreeAction<A::Value> {
        let Some(focus) = self.focus.clone() else {
            return CheckTreeAction::None;
        };
        let status = self
            .rows()
            .into_iter()
            .find(|r| r.value == focus)
            .map(|r| r.status);
        match status {
            Some(status) => self.check(&focus, status != CheckStatus::Checked),
            None => CheckTreeAction::None,
        }
    }

    /// Unchecks everything.
    pub fn clean(&mut self) -> CheckTreeAction<A::Value> {
        if self.options.disabled || self.value().is_empty() {
            return CheckTreeAction::None;
        }
        self.commit(Vec::new())
    }

    fn commit(&mut self, next: Vec<A::Value>) -> CheckTreeAction<A::Value> {
        tracing::debug!(
            checked = next.len(),
            controlled = self.controlled.is_some(),
            "check tree value changed"
        );
        self.inner = next.clone();
        CheckTreeAction::Changed(next)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> CheckTreeAction<A::Value> {
        if self.options.disabled {
            return CheckTreeAction::None;
        }
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => {
                if !self.open || !self.options.searchable {
                    return CheckTreeAction::None;
                }
                let line = text.lines().next().unwrap_or_default().to_string();
                self.set_search(format!("{}{line}", self.search));
                CheckTreeAction::Redraw
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> CheckTreeAction<A::Value> {
        if !self.open {
            if self.options.bindings.is_open(&key) {
                return self.open();
            }
            return CheckTreeAction::None;
        }

        if let Some(action) = self.options.bindings.action_for(&key) {
            return match action {
                CheckTreeKey::Up => self.move_focus(FocusDirection::Backward),
                CheckTreeKey::Down => self.move_focus(FocusDirection::Forward),
                CheckTreeKey::Expand => self.expand_focused(),
                CheckTreeKey::Collapse => self.collapse_focused(),
                CheckTreeKey::Check => self.activate_focused(),
                CheckTreeKey::Close => self.close(),
                CheckTreeKey::ClearSearch => {
                    if self.search.is_empty() {
                        CheckTreeAction::None
                    } else {
                        self.set_search(String::new());
                        CheckTreeAction::Redraw
                    }
                }
                CheckTreeKey::Clean if self.options.cleanable => self.clean(),
                CheckTreeKey::Clean => CheckTreeAction::None,
                CheckTreeKey::First => self.focus_edge(false),
                CheckTreeKey::Last => self.focus_edge(true),
                CheckTreeKey::Open => CheckTreeAction::None,
            };
        }

        if !self.options.searchable {
            return CheckTreeAction::None;
        }
        if key.code == KeyCode::Backspace {
            if self.search.pop().is_some() {
                self.viewport.to_top();
                return CheckTreeAction::Redraw;
            }
            return CheckTreeAction::None;
        }
        match key.typed_char() {
            Some(c) => {
                self.search.push(c);
                self.viewport.to_top();
                CheckTreeAction::Redraw
            }
            None => CheckTreeAction::None,
        }
    }

    fn move_focus(&mut self, direction: FocusDirection) -> CheckTreeAction<A::Value> {
        let rows = self.rows();
        let next = tree::next_focusable(&rows, self.focus.as_ref(), direction);
        self.set_focus_if_changed(next)
    }

    fn focus_edge(&mut self, last: bool) -> CheckTreeAction<A::Value> {
        let rows = self.rows();
        let row = if last { rows.last() } else { rows.first() };
        self.set_focus_if_changed(row.map(|r| r.value.clone()))
    }

    fn set_focus_if_changed(&mut self, next: Option<A::Value>) -> CheckTreeAction<A::Value> {
        if next.is_none() || next == self.focus {
            return CheckTreeAction::None;
        }
        self.focus = next;
        CheckTreeAction::Redraw
    }

    fn expand_focused(&mut self) -> CheckTreeAction<A::Value> {
        let rows = self.rows();
        let Some(row) = self.focused_row(&rows) else {
            return self.set_focus_if_changed(rows.first().map(|r| r.value.clone()));
        };
        if !row.has_children {
            return CheckTreeAction::None;
        }
        if !row.expanded {
            let id = row.id.clone();
            self.expand.set_expanded(&id, true);
            return CheckTreeAction::Redraw;
        }
        let child = tree::first_child_of(&rows, &row.value);
        self.set_focus_if_changed(child)
    }

    fn collapse_focused(&mut self) -> CheckTreeAction<A::Value> {
        let rows = self.rows();
        let Some(row) = self.focused_row(&rows) else {
            return CheckTreeAction::None;
        };
        if row.expanded {
            let id = row.id.clone();
            self.expand.set_expanded(&id, false);
            return CheckTreeAction::Redraw;
        }
        let parent = tree::parent_of(&rows, &row.value);
        self.set_focus_if_changed(parent)
    }

    fn focused_row<'r>(&self, rows: &'r [FlatNode<A::Value>]) -> Option<&'r FlatNode<A::Value>> {
        let focus = self.focus.as_ref()?;
        rows.iter().find(|r| &r.value == focus)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> CheckTreeAction<A::Value> {
        match mouse.kind {
            MouseEventKind::ScrollUp if self.open => {
                self.viewport.scroll_y_by(-1);
                CheckTreeAction::Redraw
            }
            MouseEventKind::ScrollDown if self.open => {
                self.viewport.scroll_y_by(1);
                CheckTreeAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.x, mouse.y),
            _ => CheckTreeAction::None,
        }
    }

    fn click(&mut self, x: u16, y: u16) -> CheckTreeAction<A::Value> {
        if contains(self.toggle_area, x, y) {
            return if self.open { self.close() } else { self.open() };
        }
        if !self.open || !contains(self.rows_area, x, y) {
            return CheckTreeAction::None;
        }
        let Some(idx) = self.viewport.row_at(y - self.rows_area.y) else {
            return CheckTreeAction::None;
        };
        let Some(row) = self.rendered_rows.get(idx as usize).cloned() else {
            return CheckTreeAction::None;
        };

        let icon_x = self.rows_area.x + row.layer as u16 * self.options.indent;
        if row.has_children && x >= icon_x && x < icon_x + 2 {
            self.expand.toggle(&row.id);
            self.focus = Some(row.value);
            return CheckTreeAction::Redraw;
        }
        self.check(&row.value, row.status != CheckStatus::Checked)
    }

    pub fn help_bindings(&self) -> Vec<Binding> {
        self.options.bindings.help(self.options.searchable)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut y = area.y;
        let bottom = area.y + area.height;

        if self.options.inline {
            self.toggle_area = Rect::default();
        } else {
            self.toggle_area = Rect::new(area.x, y, area.width, 1);
            self.render_toggle(self.toggle_area, buf, theme);
            y += 1;
            if !self.open {
                self.rows_area = Rect::default();
                return;
            }
        }

        if self.options.searchable && y < bottom {
            let search_area = Rect::new(area.x, y, area.width, 1);
            self.render_search(search_area, buf, theme);
            y += 1;
        }
        if y >= bottom {
            self.rows_area = Rect::default();
            return;
        }

        let rows = self.rows();
        if self.focus.is_some() && self.focused_row(&rows).is_none() {
            self.focus = rows.first().map(|r| r.value.clone());
        }

        let height = (bottom - y).min(self.options.max_height.max(1));
        let list_area = Rect::new(area.x, y, area.width, height);
        let (rows_area, scrollbar_x) = if self.options.show_scrollbar
            && area.width >= 2
            && rows.len() > height as usize
        {
            (
                Rect::new(list_area.x, y, list_area.width - 1, height),
                Some(list_area.x + list_area.width - 1),
            )
        } else {
            (list_area, None)
        };

        self.rows_area = rows_area;
        self.viewport.set_viewport(rows_area.width, rows_area.height);
        self.viewport
            .set_content(rows_area.width as u32, rows.len() as u32);
        if let Some(idx) = self.focused_index(&rows) {
            self.viewport.ensure_visible(idx as u32);
        }

        buf.set_style(list_area, theme.text_primary);
        if rows.is_empty() {
            render::render_str_clipped(
                rows_area.x,
                rows_area.y,
                0,
                rows_area.width,
                buf,
                &self.options.empty_text,
                theme.text_muted,
            );
        }

        for dy in 0..rows_area.height {
            let Some(idx) = self.viewport.row_at(dy) else {
                break;
            };
            if let Some(row) = rows.get(idx as usize) {
                let row_area = Rect::new(rows_area.x, rows_area.y + dy, rows_area.width, 1);
                self.render_row(row_area, buf, theme, row);
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, y, 1, height),
                buf,
                &self.viewport,
                theme.text_muted,
            );
        }
        self.rendered_rows = rows;
    }

    fn focused_index(&self, rows: &[FlatNode<A::Value>]) -> Option<usize> {
        let focus = self.focus.as_ref()?;
        rows.iter().position(|r| &r.value == focus)
    }

    fn render_toggle(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let has_value = !self.value().is_empty();
        let (label_style, base) = if self.options.disabled {
            (theme.disabled, theme.disabled)
        } else if has_value {
            (theme.text_primary, theme.text_primary)
        } else {
            (theme.text_muted, theme.text_primary)
        };
        buf.set_style(area, base);

        let mut suffix = String::new();
        if self.options.cleanable && has_value && !self.options.disabled {
            suffix.push_str(" ×");
        }
        suffix.push_str(if self.open { " ▴" } else { " ▾" });

        let suffix_w = render::display_width(&suffix) as u16;
        let label_w = area.width.saturating_sub(suffix_w);
        let label = render::truncate_with_ellipsis(&self.toggle_label(), label_w as usize);
        render::render_str_clipped(area.x, area.y, 0, label_w, buf, &label, label_style);
        if suffix_w <= area.width {
            render::render_str_clipped(
                area.x + area.width - suffix_w,
                area.y,
                0,
                suffix_w,
                buf,
                &suffix,
                theme.text_muted,
            );
        }
    }

    fn render_search(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        buf.set_style(area, theme.text_primary);
        let spans = if self.search.is_empty() {
            vec![
                Span::styled("/ ", theme.accent),
                Span::styled(self.options.search_placeholder.clone(), theme.text_muted),
            ]
        } else {
            vec![
                Span::styled("/ ", theme.accent),
                Span::styled(self.search.clone(), theme.text_primary),
            ]
        };
        render::render_spans_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &spans,
            theme.text_primary,
        );
    }

    fn render_row(&self, area: Rect, buf: &mut Buffer, theme: &Theme, row: &FlatNode<A::Value>) {
        let is_focus = self.focus.as_ref() == Some(&row.value);
        let disabled = self.is_disabled_value(&row.value);
        let base = if disabled {
            theme.disabled
        } else {
            theme.text_primary
        };
        let style = if is_focus { base.patch(theme.focus) } else { base };
        buf.set_style(area, style);

        let indent = " ".repeat(row.layer * self.options.indent as usize);
        let fold = match (row.has_children, row.expanded) {
            (false, _) => "  ",
            (true, false) => "▸ ",
            (true, true) => "▾ ",
        };
        let (check, check_style) = match row.status {
            CheckStatus::Checked => ("[x] ", theme.check_on),
            CheckStatus::Indeterminate => ("[-] ", theme.check_mixed),
            CheckStatus::Unchecked => ("[ ] ", Style::default()),
        };

        let mut spans = vec![
            Span::raw(indent),
            Span::styled(fold, theme.text_muted),
            Span::styled(check, check_style),
        ];
        spans.extend(row.label.to_spans());
        render::render_spans_clipped(
            area.x,
            area.y,
            self.viewport.x,
            area.width,
            buf,
            &spans,
            style,
        );
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.width > 0
        && area.height > 0
        && x >= area.x
        && x < area.x + area.width
        && y >= area.y
        && y < area.y + area.height
}

impl<T, A> std::fmt::Debug for CheckTreePicker<T, A>
where
    A: TreeAccessor<T>,
    A::Value: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckTreePicker")
            .field("value", &self.value())
            .field("focus", &self.focus)
            .field("search", &self.search)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

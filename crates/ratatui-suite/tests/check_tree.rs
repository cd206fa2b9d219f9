use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_suite::check_tree::CheckTreeAction;
use ratatui_suite::check_tree::CheckTreePicker;
use ratatui_suite::check_tree::CheckTreePickerOptions;
use ratatui_suite::help::HelpBar;
use ratatui_suite::input::InputEvent;
use ratatui_suite::input::KeyCode;
use ratatui_suite::input::KeyEvent;
use ratatui_suite::input::MouseEvent;
use ratatui_suite::text::Label;
use ratatui_suite::theme::Theme;
use ratatui_suite::tree::CheckStatus;
use ratatui_suite::tree::FnAccessor;
use ratatui_suite::tree::TreeValue;

struct Dept {
    id: u32,
    name: &'static str,
    teams: Vec<Dept>,
}

fn dept(id: u32, name: &'static str, teams: Vec<Dept>) -> Dept {
    Dept { id, name, teams }
}

fn accessor() -> FnAccessor<Dept, u32> {
    FnAccessor::new(
        |d: &Dept| d.id,
        |d: &Dept| Label::from(d.name),
        |d: &Dept| (!d.teams.is_empty()).then_some(d.teams.as_slice()),
    )
}

fn departments() -> Vec<Dept> {
    vec![
        dept(
            1,
            "Fruit",
            vec![dept(2, "Apple", vec![]), dept(3, "Pear", vec![])],
        ),
        dept(4, "Nuts", vec![]),
    ]
}

fn picker() -> CheckTreePicker<Dept, FnAccessor<Dept, u32>> {
    CheckTreePicker::with_options(
        departments(),
        accessor(),
        CheckTreePickerOptions {
            cascade: true,
            default_expand_all: true,
            ..Default::default()
        },
    )
}

fn rows(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            let row: String = (0..area.width)
                .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

fn draw(p: &mut CheckTreePicker<Dept, FnAccessor<Dept, u32>>) -> Vec<String> {
    let area = Rect::new(0, 0, 24, 6);
    let mut buf = Buffer::empty(area);
    p.render(area, &mut buf, &Theme::default());
    rows(&buf)
}

#[test]
fn closed_picker_shows_only_the_toggle() {
    let mut p = picker();
    let rows = draw(&mut p);
    assert_eq!(rows[0], format!("Select{} ▾", " ".repeat(16)));
    assert!(rows[1..].iter().all(|r| r.is_empty()));
}

#[test]
fn open_picker_renders_search_and_tree() {
    let mut p = picker();
    assert_eq!(
        p.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Enter))),
        CheckTreeAction::Opened
    );
    let rows = draw(&mut p);
    assert_eq!(
        rows,
        vec![
            format!("Select{} ▴", " ".repeat(16)),
            "/ Search".to_string(),
            "▾ [ ] Fruit".to_string(),
            "    [ ] Apple".to_string(),
            "    [ ] Pear".to_string(),
            "  [ ] Nuts".to_string(),
        ]
    );
}

#[test]
fn clicking_rows_checks_and_cascades_upward() {
    let mut p = picker();
    p.open();
    draw(&mut p);

    assert_eq!(
        p.handle_event(InputEvent::Mouse(MouseEvent::left_click(8, 3))),
        CheckTreeAction::Changed(vec![2])
    );
    assert_eq!(draw(&mut p)[2], "▾ [-] Fruit");

    assert_eq!(
        p.handle_event(InputEvent::Mouse(MouseEvent::left_click(8, 4))),
        CheckTreeAction::Changed(vec![2, 3])
    );
    let rows = draw(&mut p);
    assert_eq!(rows[0], format!("2 selected{} × ▴", " ".repeat(10)));
    assert_eq!(rows[2], "▾ [x] Fruit");
    assert_eq!(
        p.selected_items().iter().map(|d| d.name).collect::<Vec<_>>(),
        vec!["Apple", "Pear"]
    );
}

#[test]
fn clicking_the_fold_icon_collapses_without_checking() {
    let mut p = picker();
    p.open();
    draw(&mut p);

    assert_eq!(
        p.handle_event(InputEvent::Mouse(MouseEvent::left_click(0, 2))),
        CheckTreeAction::Redraw
    );
    assert!(p.value().is_empty());
    let rows = draw(&mut p);
    assert_eq!(rows[2], "▸ [ ] Fruit");
    assert_eq!(rows[3], "  [ ] Nuts");
    assert!(rows[4].is_empty());
}

#[test]
fn search_without_matches_shows_empty_text() {
    let mut p = picker();
    p.open();
    for c in "kiwi".chars() {
        p.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Char(c))));
    }
    let rows = draw(&mut p);
    assert_eq!(rows[1], "/ kiwi");
    assert_eq!(rows[2], "No results found");
}

#[test]
fn help_bar_lists_picker_bindings() {
    let p = picker();
    let bar = HelpBar::new(p.help_bindings());
    let area = Rect::new(0, 0, 80, 1);
    let mut buf = Buffer::empty(area);
    bar.render(area, &mut buf);
    let line = &rows(&buf)[0];
    assert!(line.starts_with("↑/↓ move · ←/→ fold · space check"));
    assert!(line.ends_with("esc close"));
}

#[test]
fn help_bar_follows_picker_options() {
    let mut p = picker();
    let mut bar = HelpBar::new(p.help_bindings());
    let area = Rect::new(0, 0, 80, 1);
    let mut buf = Buffer::empty(area);
    bar.render(area, &mut buf);
    assert!(rows(&buf)[0].contains("^u clear search"));

    p.set_options(CheckTreePickerOptions {
        searchable: false,
        ..Default::default()
    });
    bar.set_bindings(p.help_bindings());
    let mut buf = Buffer::empty(area);
    bar.render(area, &mut buf);
    assert!(!rows(&buf)[0].contains("search"));
    assert!(rows(&buf)[0].ends_with("esc close"));
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ShelfId(u32);

impl TreeValue for ShelfId {}

struct Shelf {
    id: ShelfId,
    name: &'static str,
    items: Vec<Shelf>,
}

fn shelf(id: u32, name: &'static str, items: Vec<Shelf>) -> Shelf {
    Shelf {
        id: ShelfId(id),
        name,
        items,
    }
}

/// Two aisles, each with one shelf of two boxes. Ids are not usable as keys, so both shelves
/// sit on the same key.
fn aisles() -> CheckTreePicker<Shelf, FnAccessor<Shelf, ShelfId>> {
    let boxes = |a, b| vec![shelf(a, "Box", vec![]), shelf(b, "Box", vec![])];
    let data = vec![
        shelf(1, "Aisle 1", vec![shelf(2, "Shelf A", boxes(3, 4))]),
        shelf(5, "Aisle 2", vec![shelf(6, "Shelf B", boxes(7, 8))]),
    ];
    CheckTreePicker::with_options(
        data,
        FnAccessor::new(
            |s: &Shelf| s.id,
            |s: &Shelf| Label::from(s.name),
            |s: &Shelf| (!s.items.is_empty()).then_some(s.items.as_slice()),
        ),
        CheckTreePickerOptions {
            inline: true,
            default_expand_all: true,
            ..Default::default()
        },
    )
}

fn press<T, A>(p: &mut CheckTreePicker<T, A>, code: KeyCode)
where
    A: ratatui_suite::tree::TreeAccessor<T>,
{
    p.handle_event(InputEvent::Key(KeyEvent::new(code)));
}

#[test]
fn keyboard_focus_stays_inside_its_own_subtree() {
    let mut p = aisles();
    let rows = p.rows();
    assert_eq!(rows[1].key, rows[5].key);

    p.set_focus(Some(ShelfId(4)));
    press(&mut p, KeyCode::Down);
    assert_eq!(p.focused(), Some(&ShelfId(3)));

    p.set_focus(Some(ShelfId(7)));
    press(&mut p, KeyCode::Down);
    assert_eq!(p.focused(), Some(&ShelfId(8)));
    press(&mut p, KeyCode::Left);
    assert_eq!(p.focused(), Some(&ShelfId(6)));

    press(&mut p, KeyCode::Left);
    let values: Vec<_> = p.rows().iter().map(|r| r.value).collect();
    assert_eq!(
        values,
        vec![ShelfId(1), ShelfId(2), ShelfId(3), ShelfId(4), ShelfId(5), ShelfId(6)]
    );
}

#[test]
fn cascade_parent_with_an_empty_container_unchecks_from_the_keyboard() {
    let data = vec![
        dept(1, "Fruit", vec![dept(2, "Apple", vec![])]),
        dept(3, "Empty", vec![]),
    ];
    let mut p = CheckTreePicker::with_options(
        vec![dept(9, "All", data)],
        FnAccessor::new(
            |d: &Dept| d.id,
            |d: &Dept| Label::from(d.name),
            |d: &Dept| (d.id == 3 || !d.teams.is_empty()).then_some(d.teams.as_slice()),
        ),
        CheckTreePickerOptions {
            cascade: true,
            inline: true,
            ..Default::default()
        },
    );
    p.set_focus(Some(9));
    assert_eq!(
        p.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Char(' ')))),
        CheckTreeAction::Changed(vec![9, 2])
    );
    assert_eq!(p.rows()[0].status, CheckStatus::Checked);
    assert_eq!(
        p.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Char(' ')))),
        CheckTreeAction::Changed(Vec::new())
    );
    assert_eq!(p.rows()[0].status, CheckStatus::Unchecked);
}

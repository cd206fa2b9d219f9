use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui_suite::check_tree::CheckTreeAction;
use ratatui_suite::check_tree::CheckTreePicker;
use ratatui_suite::check_tree::CheckTreePickerOptions;
use ratatui_suite::crossterm_input::input_event_from_crossterm;
use ratatui_suite::help::HelpBar;
use ratatui_suite::help::HelpBarOptions;
use ratatui_suite::theme::Theme;
use ratatui_suite::tree::NodeAccessor;
use ratatui_suite::tree::TreeNode;
use std::io;
use std::time::Duration;

type Picker = CheckTreePicker<TreeNode<&'static str>, NodeAccessor>;

fn groceries() -> Vec<TreeNode<&'static str>> {
    vec![
        TreeNode::branch(
            "fruit",
            "Fruit",
            vec![
                TreeNode::leaf("apple", "Apple"),
                TreeNode::leaf("banana", "Banana"),
                TreeNode::leaf("cherry", "Cherry"),
            ],
        ),
        TreeNode::branch(
            "veg",
            "Vegetables",
            vec![
                TreeNode::leaf("carrot", "Carrot"),
                TreeNode::branch(
                    "leek",
                    "Leek",
                    vec![
                        TreeNode::leaf("baby-leek", "Baby leek"),
                        TreeNode::leaf("giant-leek", "Giant leek"),
                    ],
                ),
            ],
        ),
        TreeNode::branch("pantry", "Pantry (empty)", Vec::new()),
        TreeNode::leaf("bread", "Bread"),
    ]
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut picker = CheckTreePicker::with_options(
        groceries(),
        NodeAccessor,
        CheckTreePickerOptions {
            cascade: true,
            placeholder: "Pick groceries".to_string(),
            ..Default::default()
        },
    )
    .with_default_value(vec!["cherry"]);
    picker.set_disabled_values(vec!["bread"]);

    let res = run(&mut terminal, &Theme::default(), &mut picker);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
    picker: &mut Picker,
) -> io::Result<()> {
    let mut last = String::from("(nothing changed yet)");
    loop {
        terminal.draw(|f| {
            let [main, status, help] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(f.area());

            let block = Block::bordered().title("CheckTreePicker (Enter opens, Ctrl-c quits)");
            let inner = block.inner(main);
            f.render_widget(block, main);

            let buf = f.buffer_mut();
            picker.render(inner, buf, theme);

            let status_span = Span::styled(last.clone(), theme.text_muted);
            buf.set_span(status.x, status.y, &status_span, status.width);
            HelpBar::with_options(picker.help_bindings(), HelpBarOptions::themed(theme))
                .render(help, buf);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(());
        }
        let Some(ev) = input_event_from_crossterm(event) else {
            continue;
        };
        if let CheckTreeAction::Changed(value) = picker.handle_event(ev) {
            last = format!("value: [{}]", value.join(", "));
        }
    }
}

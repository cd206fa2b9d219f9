use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui_suite::notification::NoticeHandle;
use ratatui_suite::notification::NoticeOptions;
use ratatui_suite::notification::NotificationKind;
use ratatui_suite::notification::NotificationRegistry;
use ratatui_suite::notification::Placement;
use ratatui_suite::notification::view::NotificationsView;
use ratatui_suite::theme::Theme;
use std::io;
use std::time::Duration;
use std::time::Instant;

const HELP: &str = "\
o/i/s/w/e/l  open, info, success, warning, error, loading
1-4          switch placement (top-left, top-right, bottom-left, bottom-right)
x            close the newest notice
d            destroy every stack
q            quit";

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &Theme::default());

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, theme: &Theme) -> io::Result<()> {
    let mut registry = NotificationRegistry::default();
    let view = NotificationsView::new();
    let mut placement = Placement::TopRight;
    let mut opened: Vec<NoticeHandle> = Vec::new();
    let mut counter = 0u32;

    loop {
        registry.tick(Instant::now());
        opened.retain(|h| {
            registry
                .stack(h.placement)
                .is_some_and(|s| s.notices().iter().any(|n| n.key == h.key))
        });

        terminal.draw(|f| {
            let area = f.area();
            let block = Block::bordered().title(format!("Notifications ({placement})"));
            f.render_widget(Paragraph::new(HELP).block(block), area);
            view.render(area, f.buffer_mut(), &registry, theme);
        })?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = crossterm::event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let kind = match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('o') => NotificationKind::Open,
            KeyCode::Char('i') => NotificationKind::Info,
            KeyCode::Char('s') => NotificationKind::Success,
            KeyCode::Char('w') => NotificationKind::Warning,
            KeyCode::Char('e') => NotificationKind::Error,
            KeyCode::Char('l') => NotificationKind::Loading,
            KeyCode::Char(c @ '1'..='4') => {
                placement = Placement::ALL[c as usize - '1' as usize];
                continue;
            }
            KeyCode::Char('x') => {
                if let Some(h) = opened.pop() {
                    h.remove(&mut registry);
                }
                continue;
            }
            KeyCode::Char('d') => {
                registry.destroy(None);
                opened.clear();
                continue;
            }
            _ => continue,
        };

        counter += 1;
        let mut options = NoticeOptions::new(format!(
            "Notice #{counter} was raised from the keyboard and wraps inside its box."
        ))
        .title(format!("{kind:?}"))
        .placement(placement);
        if kind == NotificationKind::Loading {
            options = options.duration_ms(0);
        }
        opened.push(registry.notice(kind, options));
    }
}

use ratatui::style::Color;
use ratatui::style::Style;

#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub focus: Style,
    pub disabled: Style,
    pub check_on: Style,
    pub check_mixed: Style,
    pub border: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub danger: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            focus: Style::default().reversed(),
            disabled: Style::default().dark_gray().dim(),
            check_on: Style::default().fg(Color::Cyan).bold(),
            check_mixed: Style::default().fg(Color::Cyan),
            border: Style::default().dark_gray(),
            info: Style::default().blue(),
            success: Style::default().green(),
            warning: Style::default().yellow(),
            danger: Style::default().red(),
        }
    }
}

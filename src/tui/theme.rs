use ratatui::style::{Color, Modifier, Style};

/// Styles shared by every screen. Only the rendering code reads these.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Style,
    pub selected: Style,
    pub normal: Style,
    pub error: Style,
    pub success: Style,
    pub label: Style,
    pub value: Style,
    pub help: Style,
    pub pending: Style,
}

pub const THEME: Theme = Theme {
    title: Style::new()
        .fg(Color::Indexed(51))
        .add_modifier(Modifier::BOLD),
    selected: Style::new()
        .fg(Color::Indexed(15))
        .bg(Color::Indexed(39))
        .add_modifier(Modifier::BOLD),
    normal: Style::new().fg(Color::Indexed(231)),
    error: Style::new()
        .fg(Color::Indexed(196))
        .add_modifier(Modifier::BOLD),
    success: Style::new().fg(Color::Indexed(46)),
    label: Style::new()
        .fg(Color::Indexed(87))
        .add_modifier(Modifier::BOLD),
    value: Style::new().fg(Color::Indexed(231)),
    help: Style::new().fg(Color::Gray),
    pending: Style::new()
        .fg(Color::Yellow)
        .add_modifier(Modifier::ITALIC),
};

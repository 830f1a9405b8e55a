use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect, Size},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tui_scrollview::{ScrollView, ScrollViewState};

use crate::entities::{TranslationOutcome, WordInfo};
use crate::language::name_of;
use crate::tui::language_picker::LanguagePicker;
use crate::tui::session::{Screen, Session};
use crate::tui::theme::THEME;

const SELECT_SOURCE_HELP: &str = "↑/↓: Navigate | Enter: Select | Esc: Quit | Type to filter";
const SELECT_TARGET_HELP: &str = "↑/↓: Navigate | Enter: Select | Esc: Back | Type to filter";
const ENTER_SENTENCE_HELP: &str = "Enter: Translate | Esc: Back | Ctrl+C: Quit";
const SHOW_RESULT_HELP: &str = "↑/↓: Scroll | q or Ctrl+C: Translate another | Esc: Back";

pub fn render(f: &mut Frame, session: &Session, result_scroll: &mut ScrollViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let (title, help) = match &session.screen {
        Screen::SelectSource(_) => ("Select A Language You Know Well", SELECT_SOURCE_HELP),
        Screen::SelectTarget(_) => ("Select The Language You Want To Learn", SELECT_TARGET_HELP),
        Screen::EnterSentence => ("Enter Sentence in Either Language", ENTER_SENTENCE_HELP),
        Screen::ShowResult(_) => ("Translation Results", SHOW_RESULT_HELP),
    };

    let title = Paragraph::new(title)
        .style(THEME.title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    match &session.screen {
        Screen::SelectSource(picker) => render_picker(f, chunks[1], None, picker),
        Screen::SelectTarget(picker) => {
            let from = session.source_language.as_deref().map(name_of);
            render_picker(f, chunks[1], from, picker);
        }
        Screen::EnterSentence => render_sentence_entry(f, chunks[1], session),
        Screen::ShowResult(outcome) => {
            render_result(f, chunks[1], session, outcome, result_scroll);
        }
    }

    let help = Paragraph::new(help)
        .style(THEME.help)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn language_pair(session: &Session) -> String {
    format!(
        "{} ↔ {}",
        name_of(session.source_language.as_deref().unwrap_or_default()),
        name_of(session.target_language.as_deref().unwrap_or_default())
    )
}

fn render_picker(f: &mut Frame, area: Rect, from: Option<&str>, picker: &LanguagePicker) {
    let mut header = Vec::new();
    if let Some(from) = from {
        header.push(Line::from(vec![
            Span::styled("From: ", THEME.label),
            Span::styled(from.to_string(), THEME.value),
        ]));
    }
    if !picker.filter().is_empty() {
        header.push(Line::from(vec![
            Span::styled("Filter: ", THEME.label),
            Span::styled(picker.filter().to_string(), THEME.value),
        ]));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header.len() as u16), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let items: Vec<ListItem> = picker
        .filtered()
        .iter()
        .map(|lang| ListItem::new(format!("{} ({})", lang.name, lang.code)).style(THEME.normal))
        .collect();

    let title = if items.is_empty() {
        "No matching languages"
    } else {
        "Languages"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(THEME.selected)
        .highlight_symbol("> ");

    let mut state =
        ListState::default().with_selected(picker.selected().map(|_| picker.highlight()));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_sentence_entry(f: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Line::styled(language_pair(session), THEME.label)),
        chunks[0],
    );

    let input = Paragraph::new(format!("{}█", session.input))
        .style(THEME.value)
        .block(Block::default().borders(Borders::ALL).title("Sentence"));
    f.render_widget(input, chunks[1]);

    let mut status = Vec::new();
    if session.is_translating() {
        status.push(Line::styled("Translating...", THEME.pending));
    }
    if let Some(error) = &session.last_error {
        status.push(Line::styled(format!("Error: {error}"), THEME.error));
    }
    f.render_widget(
        Paragraph::new(status).wrap(Wrap { trim: false }),
        chunks[2],
    );
}

fn render_result(
    f: &mut Frame,
    area: Rect,
    session: &Session,
    outcome: &TranslationOutcome,
    scroll: &mut ScrollViewState,
) {
    let summary = vec![
        Line::styled(language_pair(session), THEME.label),
        Line::default(),
        Line::from(vec![
            Span::styled("Original: ", THEME.label),
            Span::styled(outcome.original_sentence.clone(), THEME.value),
        ]),
        Line::from(vec![
            Span::styled("Translation: ", THEME.label),
            Span::styled(outcome.translation.clone(), THEME.success),
        ]),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);
    f.render_widget(
        Paragraph::new(summary).wrap(Wrap { trim: false }),
        chunks[0],
    );

    if !outcome.word_analysis.is_empty() {
        render_word_analysis(f, chunks[1], &outcome.word_analysis, scroll);
    }
}

fn word_line(info: &WordInfo) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("  {}", info.word), THEME.value)];
    if !info.explanation.is_empty() {
        spans.push(Span::raw(" - "));
        spans.push(Span::styled(info.explanation.clone(), THEME.normal));
    }
    Line::from(spans)
}

fn render_word_analysis(
    f: &mut Frame,
    area: Rect,
    words: &[WordInfo],
    scroll: &mut ScrollViewState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Word-by-Word Analysis");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = words.iter().map(word_line).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Leave a column for the scrollbar
    let width = inner.width.saturating_sub(1);
    let height = paragraph.line_count(width).try_into().unwrap_or(u16::MAX);

    let mut scroll_view = ScrollView::new(Size::new(width, height));
    scroll_view.render_widget(paragraph, Rect::new(0, 0, width, height));
    f.render_stateful_widget(scroll_view, inner, scroll);
}

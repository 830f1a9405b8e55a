use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::sync::mpsc;
use tui_scrollview::ScrollViewState;

use crate::llm::Llm;
use crate::translation_service::TranslationService;

pub mod events;
pub mod language_picker;
pub mod session;
pub mod theme;
pub mod view;

use events::AppEvent;
use session::{Command, Screen, Session};

pub struct TuiApp<L: Llm + 'static> {
    pub session: Session,
    pub translation_service: TranslationService<L>,
    result_scroll: ScrollViewState,
    should_quit: bool,
}

impl<L: Llm + 'static> TuiApp<L> {
    pub fn new(translation_service: TranslationService<L>) -> Self {
        Self {
            session: Session::new(),
            translation_service,
            result_scroll: ScrollViewState::default(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key_event(key),
            AppEvent::Resize => {}
            AppEvent::TranslationFinished(response) => {
                if self.session.complete_translation(response)
                    && matches!(self.session.screen, Screen::ShowResult(_))
                {
                    self.result_scroll.scroll_to_top();
                }
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if matches!(self.session.screen, Screen::ShowResult(_)) {
            let scrolled = match key.code {
                KeyCode::Up => {
                    self.result_scroll.scroll_up();
                    true
                }
                KeyCode::Down => {
                    self.result_scroll.scroll_down();
                    true
                }
                KeyCode::PageUp => {
                    self.result_scroll.scroll_page_up();
                    true
                }
                KeyCode::PageDown => {
                    self.result_scroll.scroll_page_down();
                    true
                }
                _ => false,
            };
            if scrolled {
                return;
            }
        }

        match self.session.handle_key(key) {
            Some(Command::Quit) => self.should_quit = true,
            Some(Command::Translate(request)) => {
                let id = self.translation_service.dispatch(request);
                self.session.begin_request(id);
            }
            None => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        view::render(f, &self.session, &mut self.result_scroll);
    }

    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            let Some(event) = event_rx.recv().await else {
                break;
            };
            self.handle_event(event);

            if self.should_quit() {
                break;
            }
        }
        Ok(())
    }
}

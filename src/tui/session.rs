use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::entities::TranslationOutcome;
use crate::language::{KNOWN_LANGUAGES, learnable_targets};
use crate::translation::TranslationRequest;
use crate::translation_service::{RequestId, TranslationResponse};
use crate::tui::language_picker::LanguagePicker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    SelectSource(LanguagePicker),
    SelectTarget(LanguagePicker),
    EnterSentence,
    ShowResult(TranslationOutcome),
}

/// Side effects the event loop must carry out for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Translate(TranslationRequest),
}

/// The interactive state: current screen, chosen languages and the sentence buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub screen: Screen,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub input: String,
    pub last_error: Option<String>,
    pub in_flight: Option<RequestId>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            screen: Screen::SelectSource(known_picker()),
            source_language: None,
            target_language: None,
            input: String::new(),
            last_error: None,
            in_flight: None,
        }
    }
}

fn known_picker() -> LanguagePicker {
    LanguagePicker::new(KNOWN_LANGUAGES.to_vec())
}

/// A plain or shifted character, which edits text rather than triggering an action.
fn printable(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() && !c.is_control() =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_translating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if matches!(self.screen, Screen::ShowResult(_)) {
            return self.handle_result_key(key);
        }
        if is_interrupt(&key) {
            return Some(Command::Quit);
        }

        match self.screen {
            Screen::SelectSource(_) | Screen::SelectTarget(_) => self.handle_selection_key(key),
            Screen::EnterSentence => self.handle_sentence_key(key),
            Screen::ShowResult(_) => None,
        }
    }

    /// Remember the request the event loop just dispatched.
    pub fn begin_request(&mut self, id: RequestId) {
        self.in_flight = Some(id);
    }

    /// Apply a finished translation. Returns false when the result was stale and dropped.
    pub fn complete_translation(&mut self, response: TranslationResponse) -> bool {
        if self.in_flight != Some(response.id) {
            warn!("Discarding stale translation result {}", response.id);
            return false;
        }
        self.in_flight = None;

        match response.result {
            Ok(outcome) => {
                self.input.clear();
                self.last_error = None;
                self.screen = Screen::ShowResult(outcome);
            }
            Err(message) => {
                self.last_error = Some(message);
            }
        }
        true
    }

    fn handle_selection_key(&mut self, key: KeyEvent) -> Option<Command> {
        let (Screen::SelectSource(picker) | Screen::SelectTarget(picker)) = &mut self.screen
        else {
            return None;
        };

        if let Some(c) = printable(&key) {
            picker.push_filter(c);
            return None;
        }

        match key.code {
            KeyCode::Backspace => picker.pop_filter(),
            KeyCode::Up => picker.move_up(),
            KeyCode::Down => picker.move_down(),
            KeyCode::Enter => {
                let Some(code) = picker.selected().map(|lang| lang.code) else {
                    return None;
                };
                self.choose_language(code);
            }
            KeyCode::Esc => {
                if matches!(self.screen, Screen::SelectSource(_)) {
                    return Some(Command::Quit);
                }
                self.source_language = None;
                self.target_language = None;
                self.screen = Screen::SelectSource(known_picker());
            }
            _ => {}
        }
        None
    }

    fn choose_language(&mut self, code: &str) {
        match self.screen {
            Screen::SelectSource(_) => {
                debug!("Source language: {code}");
                self.source_language = Some(code.to_string());
                self.screen = Screen::SelectTarget(LanguagePicker::new(learnable_targets(code)));
            }
            Screen::SelectTarget(_) => {
                debug!("Target language: {code}");
                self.target_language = Some(code.to_string());
                self.screen = Screen::EnterSentence;
            }
            _ => {}
        }
    }

    fn handle_sentence_key(&mut self, key: KeyEvent) -> Option<Command> {
        if let Some(c) = printable(&key) {
            self.input.push(c);
            return None;
        }

        match key.code {
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.input.clear();
                self.last_error = None;
                self.in_flight = None;
                self.target_language = None;
                let source = self.source_language.as_deref().unwrap_or_default();
                self.screen = Screen::SelectTarget(LanguagePicker::new(learnable_targets(source)));
                None
            }
            _ => None,
        }
    }

    fn submit(&self) -> Option<Command> {
        if self.input.is_empty() || self.is_translating() {
            return None;
        }

        Some(Command::Translate(TranslationRequest {
            source_language: self.source_language.clone()?,
            target_language: self.target_language.clone()?,
            sentence: self.input.clone(),
        }))
    }

    fn handle_result_key(&mut self, key: KeyEvent) -> Option<Command> {
        let back = is_interrupt(&key)
            || key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('q') && printable(&key).is_some());

        if back {
            self.input.clear();
            self.last_error = None;
            self.screen = Screen::EnterSentence;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WordInfo;
    use crate::language::Language;
    use uuid::Uuid;

    fn press(session: &mut Session, code: KeyCode) -> Option<Command> {
        session.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            press(session, KeyCode::Char(c));
        }
    }

    fn picker(session: &Session) -> &LanguagePicker {
        match &session.screen {
            Screen::SelectSource(picker) | Screen::SelectTarget(picker) => picker,
            other => panic!("not a selection screen: {other:?}"),
        }
    }

    /// Swedish speaker learning German, ready to type.
    fn sentence_session() -> Session {
        let mut session = Session::new();
        type_text(&mut session, "sw");
        press(&mut session, KeyCode::Enter);
        type_text(&mut session, "german");
        press(&mut session, KeyCode::Enter);
        assert_eq!(session.screen, Screen::EnterSentence);
        session
    }

    fn outcome() -> TranslationOutcome {
        TranslationOutcome {
            original_sentence: "Wie spät ist es?".to_string(),
            translation: "What time is it?".to_string(),
            word_analysis: vec![WordInfo::new("spät", "late")],
        }
    }

    fn dispatch(session: &mut Session) -> RequestId {
        let command = press(session, KeyCode::Enter);
        assert!(matches!(command, Some(Command::Translate(_))));
        let id = Uuid::new_v4();
        session.begin_request(id);
        id
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert!(matches!(session.screen, Screen::SelectSource(_)));
        assert_eq!(picker(&session).filtered(), KNOWN_LANGUAGES);
        assert_eq!(picker(&session).highlight(), 0);
        assert!(session.last_error.is_none());
        assert!(!session.is_translating());
    }

    #[test]
    fn test_filter_then_select_source() {
        let mut session = Session::new();
        type_text(&mut session, "sw");
        assert_eq!(picker(&session).filtered(), &[Language::new("sv", "Swedish")]);

        press(&mut session, KeyCode::Enter);

        assert_eq!(session.source_language.as_deref(), Some("sv"));
        assert!(matches!(session.screen, Screen::SelectTarget(_)));
        let targets = picker(&session);
        assert_eq!(targets.filter(), "");
        assert_eq!(targets.highlight(), 0);
        assert!(targets.filtered().iter().all(|l| l.code != "sv"));
    }

    #[test]
    fn test_navigate_and_select_target() {
        let mut session = Session::new();
        type_text(&mut session, "sw");
        press(&mut session, KeyCode::Enter);

        press(&mut session, KeyCode::Down);
        press(&mut session, KeyCode::Down);
        press(&mut session, KeyCode::Enter);

        assert_eq!(session.target_language.as_deref(), Some("fr"));
        assert_eq!(session.screen, Screen::EnterSentence);
    }

    #[test]
    fn test_enter_on_empty_filter_is_noop() {
        let mut session = Session::new();
        type_text(&mut session, "xyz");
        let before = session.clone();

        assert_eq!(press(&mut session, KeyCode::Enter), None);
        assert_eq!(session, before);
    }

    #[test]
    fn test_escape_on_source_quits() {
        let mut session = Session::new();
        assert_eq!(press(&mut session, KeyCode::Esc), Some(Command::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_outside_results() {
        let mut session = sentence_session();
        let command = session.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(command, Some(Command::Quit));
        assert!(session.input.is_empty());
    }

    #[test]
    fn test_q_is_plain_text_while_typing() {
        let mut session = sentence_session();
        assert_eq!(press(&mut session, KeyCode::Char('q')), None);
        assert_eq!(session.input, "q");
    }

    #[test]
    fn test_escaping_twice_returns_to_initial_state() {
        let mut session = sentence_session();
        type_text(&mut session, "Hej");

        press(&mut session, KeyCode::Esc);
        assert!(matches!(session.screen, Screen::SelectTarget(_)));
        assert!(session.input.is_empty());
        assert!(picker(&session).filtered().iter().all(|l| l.code != "sv"));

        press(&mut session, KeyCode::Esc);
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_escape_from_target_selection_resets_filter() {
        let mut session = Session::new();
        press(&mut session, KeyCode::Enter);
        type_text(&mut session, "fr");

        press(&mut session, KeyCode::Esc);

        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_sentence_editing() {
        let mut session = sentence_session();
        press(&mut session, KeyCode::Backspace);
        assert!(session.input.is_empty());

        type_text(&mut session, "Wie spät");
        session.handle_key(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::SHIFT));
        assert_eq!(session.input, "Wie spät!");

        press(&mut session, KeyCode::Backspace);
        press(&mut session, KeyCode::Backspace);
        assert_eq!(session.input, "Wie spä");
    }

    #[test]
    fn test_enter_with_empty_sentence_does_nothing() {
        let mut session = sentence_session();
        assert_eq!(press(&mut session, KeyCode::Enter), None);
    }

    #[test]
    fn test_enter_dispatches_request_without_changing_screen() {
        let mut session = sentence_session();
        type_text(&mut session, "Wie spat ist es?");

        let command = press(&mut session, KeyCode::Enter);

        assert_eq!(
            command,
            Some(Command::Translate(TranslationRequest {
                source_language: "sv".to_string(),
                target_language: "de".to_string(),
                sentence: "Wie spat ist es?".to_string(),
            }))
        );
        assert_eq!(session.screen, Screen::EnterSentence);
        assert_eq!(session.input, "Wie spat ist es?");
    }

    #[test]
    fn test_enter_while_in_flight_is_ignored() {
        let mut session = sentence_session();
        type_text(&mut session, "Hallo");
        dispatch(&mut session);

        type_text(&mut session, " Welt");
        assert_eq!(press(&mut session, KeyCode::Enter), None);
        assert_eq!(session.input, "Hallo Welt");
    }

    #[test]
    fn test_success_shows_result() {
        let mut session = sentence_session();
        type_text(&mut session, "Wie spat ist es?");
        let id = dispatch(&mut session);

        let applied = session.complete_translation(TranslationResponse {
            id,
            result: Ok(outcome()),
        });

        assert!(applied);
        assert_eq!(session.screen, Screen::ShowResult(outcome()));
        assert!(session.input.is_empty());
        assert!(session.last_error.is_none());
        assert!(!session.is_translating());
    }

    #[test]
    fn test_failure_keeps_sentence_and_shows_error() {
        let mut session = sentence_session();
        type_text(&mut session, "Wie spat ist es?");
        let id = dispatch(&mut session);

        session.complete_translation(TranslationResponse {
            id,
            result: Err("translation API error: connection refused".to_string()),
        });

        assert_eq!(session.screen, Screen::EnterSentence);
        assert_eq!(session.input, "Wie spat ist es?");
        assert_eq!(
            session.last_error.as_deref(),
            Some("translation API error: connection refused")
        );
        assert!(!session.is_translating());

        // The user can resubmit
        assert!(matches!(
            press(&mut session, KeyCode::Enter),
            Some(Command::Translate(_))
        ));
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let mut session = sentence_session();
        type_text(&mut session, "Hallo");
        let id = dispatch(&mut session);
        session.complete_translation(TranslationResponse {
            id,
            result: Err("no response from translation API".to_string()),
        });

        let id = dispatch(&mut session);
        session.complete_translation(TranslationResponse {
            id,
            result: Ok(outcome()),
        });

        assert!(session.last_error.is_none());
        assert!(matches!(session.screen, Screen::ShowResult(_)));
    }

    #[test]
    fn test_result_arriving_after_navigating_away_is_discarded() {
        let mut session = sentence_session();
        type_text(&mut session, "Hallo");
        let id = dispatch(&mut session);

        press(&mut session, KeyCode::Esc);
        let before = session.clone();

        let applied = session.complete_translation(TranslationResponse {
            id,
            result: Ok(outcome()),
        });

        assert!(!applied);
        assert_eq!(session, before);
    }

    #[test]
    fn test_unknown_request_id_is_discarded() {
        let mut session = sentence_session();
        let before = session.clone();

        let applied = session.complete_translation(TranslationResponse {
            id: Uuid::new_v4(),
            result: Err("boom".to_string()),
        });

        assert!(!applied);
        assert_eq!(session, before);
    }

    fn result_session() -> Session {
        let mut session = sentence_session();
        type_text(&mut session, "Hallo");
        let id = dispatch(&mut session);
        session.complete_translation(TranslationResponse {
            id,
            result: Ok(outcome()),
        });
        session
    }

    #[test]
    fn test_q_returns_to_sentence_entry() {
        let mut session = result_session();
        assert_eq!(press(&mut session, KeyCode::Char('q')), None);
        assert_eq!(session.screen, Screen::EnterSentence);
        assert!(session.input.is_empty());
        assert_eq!(session.target_language.as_deref(), Some("de"));
    }

    #[test]
    fn test_ctrl_c_and_escape_on_results_go_back() {
        let mut session = result_session();
        let command = session.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(command, None);
        assert_eq!(session.screen, Screen::EnterSentence);

        let mut session = result_session();
        press(&mut session, KeyCode::Esc);
        assert_eq!(session.screen, Screen::EnterSentence);
    }

    #[test]
    fn test_other_keys_on_results_are_ignored() {
        let mut session = result_session();
        press(&mut session, KeyCode::Char('x'));
        press(&mut session, KeyCode::Down);
        assert_eq!(session.screen, Screen::ShowResult(outcome()));
    }
}

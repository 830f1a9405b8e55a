use crate::language::{Language, filter_languages};

/// A filterable list of languages with a keyboard highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePicker {
    catalog: Vec<Language>,
    filter: String,
    filtered: Vec<Language>,
    highlight: usize,
}

impl LanguagePicker {
    pub fn new(catalog: Vec<Language>) -> Self {
        Self {
            filtered: catalog.clone(),
            catalog,
            filter: String::new(),
            highlight: 0,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filtered(&self) -> &[Language] {
        &self.filtered
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// The highlighted language, if anything matches the filter.
    pub fn selected(&self) -> Option<&Language> {
        self.filtered.get(self.highlight)
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
        self.highlight = 0;
    }

    pub fn pop_filter(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
            self.clamp_highlight();
        }
    }

    pub fn move_up(&mut self) {
        self.highlight = self.highlight.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.highlight + 1 < self.filtered.len() {
            self.highlight += 1;
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_languages(&self.catalog, &self.filter);
    }

    fn clamp_highlight(&mut self) {
        self.highlight = self.highlight.min(self.filtered.len().saturating_sub(1));
    }
}

/// One analysed word of the foreign-language sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    pub word: String,
    pub explanation: String,
}

impl WordInfo {
    pub fn new(word: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            explanation: explanation.into(),
        }
    }
}

/// A completed translation with its word-by-word breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationOutcome {
    pub original_sentence: String,
    pub translation: String,
    pub word_analysis: Vec<WordInfo>,
}

/// Keep letters and numbers, collapse whitespace runs into one space, drop the rest.
pub fn strip_punctuation(word: &str) -> String {
    let mut cleaned = String::with_capacity(word.len());
    let mut prev_was_space = false;

    for c in word.chars() {
        if c.is_alphanumeric() {
            cleaned.push(c);
            prev_was_space = false;
        } else if c.is_whitespace() && !prev_was_space {
            cleaned.push(' ');
            prev_was_space = true;
        }
    }

    cleaned.trim().to_string()
}

/// Clean every word and drop entries that were punctuation only.
pub fn clean_word_analysis(words: impl IntoIterator<Item = WordInfo>) -> Vec<WordInfo> {
    words
        .into_iter()
        .filter_map(|info| {
            let word = strip_punctuation(&info.word);
            (!word.is_empty()).then(|| WordInfo {
                word,
                explanation: info.explanation,
            })
        })
        .collect()
}

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::entities::analysis::{TranslationOutcome, WordInfo, clean_word_analysis};
use crate::language::name_of;
use crate::llm::{Llm, StructuredTask};

/// What the user asked to translate, with languages as catalog codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_language: String,
    pub target_language: String,
    pub sentence: String,
}

/// Which of the two model calls a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Translation,
    WordAnalysis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Translation => write!(f, "translation"),
            Stage::WordAnalysis => write!(f, "word analysis"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{stage} API error: {source:#}")]
    Request {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    #[error("no response from {stage} API")]
    EmptyResponse { stage: Stage },

    #[error("failed to parse {stage} JSON: {source}")]
    MalformedOutput {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl TranslateError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Request { stage, .. }
            | Self::EmptyResponse { stage }
            | Self::MalformedOutput { stage, .. } => *stage,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslationStep {
    input_language: String,
    cleaned_sentence: String,
    translation: String,
}

impl TranslationStep {
    /// The one of the two sentences that is written in the language being learned.
    fn foreign_sentence(&self, target_name: &str) -> &str {
        if self.input_language.trim().eq_ignore_ascii_case(target_name) {
            &self.cleaned_sentence
        } else {
            &self.translation
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisItem {
    word: String,
    analysis: String,
}

#[derive(Debug, Deserialize)]
struct AnalysisStep {
    word_analysis: Vec<AnalysisItem>,
}

/// A Translator translates a sentence and explains the foreign one word by word.
pub struct Translator<L: Llm> {
    llm: L,
    translation_model: String,
    analysis_model: String,
    translation_temperature: f32,
    analysis_temperature: f32,
}

impl<L: Llm> Translator<L> {
    pub fn new(llm: L, config: &Config) -> Self {
        Self {
            llm,
            translation_model: config.translation_model.clone(),
            analysis_model: config.analysis_model.clone(),
            translation_temperature: config.translation_temperature,
            analysis_temperature: config.analysis_temperature,
        }
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslateError> {
        let user_lang = name_of(&request.source_language);
        let target_lang = name_of(&request.target_language);

        let step: TranslationStep = self
            .run(
                Stage::Translation,
                StructuredTask {
                    model: self.translation_model.clone(),
                    prompt: translation_prompt(&request.sentence, user_lang, target_lang),
                    schema: translation_schema(user_lang, target_lang),
                    temperature: self.translation_temperature,
                },
            )
            .await?;

        let foreign = step.foreign_sentence(target_lang);
        debug!("Input detected as {}, analysing {foreign:?}", step.input_language);

        let analysis: AnalysisStep = self
            .run(
                Stage::WordAnalysis,
                StructuredTask {
                    model: self.analysis_model.clone(),
                    prompt: analysis_prompt(foreign, user_lang, target_lang),
                    schema: analysis_schema(user_lang, target_lang),
                    temperature: self.analysis_temperature,
                },
            )
            .await?;

        let word_analysis = clean_word_analysis(
            analysis
                .word_analysis
                .into_iter()
                .map(|item| WordInfo::new(item.word, item.analysis)),
        );

        Ok(TranslationOutcome {
            original_sentence: step.cleaned_sentence,
            translation: step.translation,
            word_analysis,
        })
    }

    async fn run<T: DeserializeOwned>(
        &self,
        stage: Stage,
        task: StructuredTask,
    ) -> Result<T, TranslateError> {
        let text = self
            .llm
            .run_task(&task)
            .await
            .map_err(|source| TranslateError::Request { stage, source })?;

        if text.is_empty() {
            return Err(TranslateError::EmptyResponse { stage });
        }

        serde_json::from_str(&text)
            .map_err(|source| TranslateError::MalformedOutput { stage, source })
    }
}

fn translation_prompt(sentence: &str, user_lang: &str, target_lang: &str) -> String {
    format!(
        r#"You translate between {user_lang} and {target_lang}.

Sentence: "{sentence}"

1. Correct the sentence: spelling, grammar, punctuation and formatting. Keep its language, meaning and tone.
2. Decide whether the corrected sentence is {user_lang} or {target_lang}.
3. Translate it into the other of the two languages. Write natural, idiomatic text rather than a word-for-word rendering.

The corrected sentence and the translation must never be in the same language."#
    )
}

fn translation_schema(user_lang: &str, target_lang: &str) -> Value {
    let either = format!("Either '{user_lang}' or '{target_lang}'");
    json!({
        "type": "object",
        "properties": {
            "input_language": {
                "type": "string",
                "description": format!("Language of the input sentence. {either}")
            },
            "cleaned_sentence": {
                "type": "string",
                "description": "The corrected input sentence, in its original language"
            },
            "translation": {
                "type": "string",
                "description": "Natural translation into the other language"
            },
            "translation_language": {
                "type": "string",
                "description": format!("Language of the translation. {either}")
            }
        },
        "required": ["input_language", "cleaned_sentence", "translation", "translation_language"]
    })
}

fn analysis_prompt(foreign_sentence: &str, user_lang: &str, target_lang: &str) -> String {
    format!(
        r#"Explain the {target_lang} sentence "{foreign_sentence}" word by word to a {user_lang} speaker.

For every word give, in {user_lang}, its meaning and a short grammatical note about its role in this sentence.
Skip punctuation. Keep each explanation brief."#
    )
}

fn analysis_schema(user_lang: &str, target_lang: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "word_analysis": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "word": {
                            "type": "string",
                            "description": format!("A word exactly as written in the {target_lang} sentence")
                        },
                        "analysis": {
                            "type": "string",
                            "description": format!("Meaning and brief grammar note, in {user_lang}")
                        }
                    },
                    "required": ["word", "analysis"]
                }
            }
        },
        "required": ["word_analysis"]
    })
}

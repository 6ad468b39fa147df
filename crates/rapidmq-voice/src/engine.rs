//! Speech engine seam and a typed-text recognizer.
//!
//! A real speech engine matches audio against the grammar on its own and
//! reports the template id with its captures. [`TextRecognizer`] does the
//! same for typed text, which is what the CLI and the HTTP API feed it.

use std::sync::{Arc, Mutex, PoisonError};

use rapidmq_core::RecognizedUtterance;
use regex::Regex;
use tracing::debug;

use crate::grammar::CommandGrammar;

/// Invoked for every phrase the engine recognizes.
pub type UtteranceCallback = Arc<dyn Fn(RecognizedUtterance) + Send + Sync>;

pub trait SpeechEngine: Send + Sync {
    /// Register a callback for recognized phrases.
    fn on_utterance(&self, callback: UtteranceCallback);
}

/// Matches typed phrases against the grammar's templates.
///
/// Matching is case-insensitive; each `*slot` captures free text.
pub struct TextRecognizer {
    patterns: Vec<(String, Regex)>,
    callbacks: Mutex<Vec<UtteranceCallback>>,
}

impl TextRecognizer {
    pub fn new(grammar: &CommandGrammar) -> Result<Self, regex::Error> {
        let patterns = grammar
            .templates()
            .map(|t| Ok((t.id().to_string(), compile(t.id())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            patterns,
            callbacks: Mutex::new(Vec::new()),
        })
    }

    /// Match `text` against the templates, first match in table order wins.
    pub fn recognize(&self, text: &str) -> Option<RecognizedUtterance> {
        self.patterns.iter().find_map(|(id, re)| {
            re.captures(text).map(|caps| {
                let captures = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect();
                RecognizedUtterance::new(id.clone(), captures)
            })
        })
    }

    /// Recognize `text` and notify every registered callback.
    ///
    /// Returns `false` when nothing matched.
    pub fn feed(&self, text: &str) -> bool {
        let Some(utterance) = self.recognize(text) else {
            debug!(%text, "no template matched");
            return false;
        };

        let callbacks = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for cb in &callbacks {
            cb(utterance.clone());
        }
        true
    }
}

impl SpeechEngine for TextRecognizer {
    fn on_utterance(&self, callback: UtteranceCallback) {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }
}

/// `create queue *name` → `(?i)^\s*create\s+queue\s+(.+?)\s*$`
fn compile(phrase: &str) -> Result<Regex, regex::Error> {
    let body = phrase
        .split_whitespace()
        .map(|word| {
            if word.starts_with('*') {
                "(.+?)".to_string()
            } else {
                regex::escape(word)
            }
        })
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&format!(r"(?i)^\s*{body}\s*$"))
}

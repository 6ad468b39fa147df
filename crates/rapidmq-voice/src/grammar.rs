//! Phrase templates and the commands they build.

use std::collections::HashMap;

use rapidmq_core::{RecognizedUtterance, VoiceCommand};

use crate::error::DispatchError;

/// Builds a command from captures, already checked against the slot count.
pub type CommandBuilder = fn(&[String]) -> VoiceCommand;

/// A phrase with `*slot` wildcards, bound to a command builder.
#[derive(Debug, Clone)]
pub struct PhraseTemplate {
    phrase: &'static str,
    slots: Vec<&'static str>,
    build: CommandBuilder,
}

impl PhraseTemplate {
    pub fn new(phrase: &'static str, build: CommandBuilder) -> Self {
        let slots = phrase
            .split_whitespace()
            .filter_map(|word| word.strip_prefix('*'))
            .collect();
        Self {
            phrase,
            slots,
            build,
        }
    }

    /// The template id, which is the phrase itself.
    pub fn id(&self) -> &'static str {
        self.phrase
    }

    /// Wildcard slot names, in phrase order.
    pub fn slots(&self) -> &[&'static str] {
        &self.slots
    }
}

/// The fixed table of phrase templates. Read-only once built.
#[derive(Debug, Clone)]
pub struct CommandGrammar {
    templates: Vec<PhraseTemplate>,
    /// Normalized template id → index into `templates`.
    index: HashMap<String, usize>,
}

impl CommandGrammar {
    pub fn new(templates: Vec<PhraseTemplate>) -> Self {
        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (normalize(t.phrase), i))
            .collect();
        Self { templates, index }
    }

    /// The dashboard's five voice commands.
    pub fn standard() -> Self {
        Self::new(vec![
            PhraseTemplate::new("show system health", |_| VoiceCommand::ShowHealth),
            PhraseTemplate::new("show cluster status", |_| VoiceCommand::ShowCluster),
            PhraseTemplate::new("create queue *name", |c| VoiceCommand::CreateQueue {
                name: c[0].clone(),
            }),
            PhraseTemplate::new("publish message *message to queue *name", |c| {
                VoiceCommand::PublishMessage {
                    message: c[0].clone(),
                    queue_name: c[1].clone(),
                }
            }),
            PhraseTemplate::new("consume message from queue *name", |c| {
                VoiceCommand::ConsumeMessage {
                    queue_name: c[0].clone(),
                }
            }),
        ])
    }

    pub fn templates(&self) -> impl Iterator<Item = &PhraseTemplate> {
        self.templates.iter()
    }

    /// Find a template by id, ignoring case and extra whitespace.
    pub fn lookup(&self, template_id: &str) -> Option<&PhraseTemplate> {
        self.index
            .get(&normalize(template_id))
            .map(|&i| &self.templates[i])
    }

    /// Build the command for an utterance.
    pub fn construct(&self, utterance: &RecognizedUtterance) -> Result<VoiceCommand, DispatchError> {
        let template = self.lookup(&utterance.template_id).ok_or_else(|| {
            DispatchError::UnrecognizedCommand {
                template_id: utterance.template_id.clone(),
            }
        })?;

        if utterance.captures.len() != template.slots.len() {
            return Err(DispatchError::CaptureMismatch {
                template_id: template.phrase.to_string(),
                expected: template.slots.len(),
                got: utterance.captures.len(),
            });
        }

        let mut captures = Vec::with_capacity(template.slots.len());
        for (capture, slot) in utterance.captures.iter().zip(&template.slots) {
            let capture = capture.trim();
            if capture.is_empty() {
                return Err(DispatchError::EmptyCapture {
                    template_id: template.phrase.to_string(),
                    slot: slot.to_string(),
                });
            }
            captures.push(capture.to_string());
        }
        Ok((template.build)(&captures))
    }
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(id: &str) -> String {
    id.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(id: &str, captures: &[&str]) -> RecognizedUtterance {
        RecognizedUtterance::new(id, captures.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn standard_has_five_templates_in_order() {
        let grammar = CommandGrammar::standard();
        let ids: Vec<_> = grammar.templates().map(PhraseTemplate::id).collect();
        assert_eq!(
            ids,
            vec![
                "show system health",
                "show cluster status",
                "create queue *name",
                "publish message *message to queue *name",
                "consume message from queue *name",
            ]
        );
    }

    #[test]
    fn slots_follow_phrase_order() {
        let grammar = CommandGrammar::standard();
        let publish = grammar.lookup("publish message *message to queue *name").unwrap();
        assert_eq!(publish.slots(), &["message", "name"]);
        assert!(grammar.lookup("show system health").unwrap().slots().is_empty());
    }

    #[test]
    fn zero_capture_commands() {
        let grammar = CommandGrammar::standard();
        assert_eq!(
            grammar.construct(&utterance("show system health", &[])).unwrap(),
            VoiceCommand::ShowHealth
        );
        assert_eq!(
            grammar.construct(&utterance("show cluster status", &[])).unwrap(),
            VoiceCommand::ShowCluster
        );
    }

    #[test]
    fn create_queue_from_capture() {
        let grammar = CommandGrammar::standard();
        let cmd = grammar
            .construct(&utterance("create queue *name", &["orders"]))
            .unwrap();
        assert_eq!(cmd, VoiceCommand::CreateQueue { name: "orders".to_string() });
    }

    #[test]
    fn publish_binds_message_then_queue() {
        let grammar = CommandGrammar::standard();
        let cmd = grammar
            .construct(&utterance(
                "publish message *message to queue *name",
                &["hello", "orders"],
            ))
            .unwrap();
        assert_eq!(
            cmd,
            VoiceCommand::PublishMessage {
                queue_name: "orders".to_string(),
                message: "hello".to_string(),
            }
        );
    }

    #[test]
    fn consume_from_capture() {
        let grammar = CommandGrammar::standard();
        let cmd = grammar
            .construct(&utterance("consume message from queue *name", &[" orders "]))
            .unwrap();
        assert_eq!(cmd, VoiceCommand::ConsumeMessage { queue_name: "orders".to_string() });
    }

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let grammar = CommandGrammar::standard();
        assert!(grammar.lookup("Show  System HEALTH").is_some());
        assert!(grammar.lookup("  create queue *NAME ").is_some());
    }

    #[test]
    fn unknown_template_is_unrecognized() {
        let grammar = CommandGrammar::standard();
        let err = grammar
            .construct(&utterance("delete queue *name", &["orders"]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnrecognizedCommand {
                template_id: "delete queue *name".to_string(),
            }
        );
    }

    #[test]
    fn wrong_capture_count_is_rejected() {
        let grammar = CommandGrammar::standard();
        let err = grammar
            .construct(&utterance("publish message *message to queue *name", &["hello"]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::CaptureMismatch {
                template_id: "publish message *message to queue *name".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn blank_capture_is_rejected() {
        let grammar = CommandGrammar::standard();
        let err = grammar
            .construct(&utterance("consume message from queue *name", &["   "]))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::EmptyCapture {
                template_id: "consume message from queue *name".to_string(),
                slot: "name".to_string(),
            }
        );

        let err = grammar
            .construct(&utterance(
                "publish message *message to queue *name",
                &["hello", "\t"],
            ))
            .unwrap_err();
        assert!(matches!(err, DispatchError::EmptyCapture { ref slot, .. } if slot == "name"));
    }
}

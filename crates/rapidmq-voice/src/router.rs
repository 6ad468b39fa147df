//! Voice command router.
//!
//! Looks up the utterance's template, builds the command, and runs it on
//! the handler. A rejected utterance is reported and leaves the router
//! ready for the next one. Dispatches are independent of each other:
//! nothing orders or serializes concurrent commands.

use std::sync::Arc;

use rapidmq_core::{CommandOutcome, RecognizedUtterance};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::engine::SpeechEngine;
use crate::error::DispatchError;
use crate::grammar::CommandGrammar;
use crate::handler::CommandHandler;

/// An utterance together with what dispatching it produced.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub utterance: RecognizedUtterance,
    pub result: Result<CommandOutcome, DispatchError>,
}

#[derive(Clone)]
pub struct CommandRouter {
    grammar: Arc<CommandGrammar>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandRouter {
    pub fn new(grammar: Arc<CommandGrammar>, handler: Arc<dyn CommandHandler>) -> Self {
        Self { grammar, handler }
    }

    pub fn grammar(&self) -> &CommandGrammar {
        &self.grammar
    }

    /// Dispatch one utterance and wait for its outcome.
    pub async fn dispatch(
        &self,
        utterance: &RecognizedUtterance,
    ) -> Result<CommandOutcome, DispatchError> {
        let command = match self.grammar.construct(utterance) {
            Ok(command) => command,
            Err(e) => {
                warn!(template = %utterance.template_id, error = %e, "voice command rejected");
                return Err(e);
            }
        };

        let kind = command.kind();
        debug!(command = kind, "dispatching voice command");
        let outcome = self.handler.handle(command).await;

        match &outcome {
            CommandOutcome::Success { .. } => info!(command = kind, "voice command succeeded"),
            CommandOutcome::Empty => info!(command = kind, "voice command found nothing"),
            CommandOutcome::Failure { text } => {
                warn!(command = kind, error = %text, "voice command failed")
            }
        }
        Ok(outcome)
    }

    /// Dispatch on its own task. The handle is the command's result
    /// channel: await it, collect it, or abort it.
    pub fn spawn_dispatch(
        &self,
        utterance: RecognizedUtterance,
    ) -> JoinHandle<Result<CommandOutcome, DispatchError>> {
        let router = self.clone();
        tokio::spawn(async move { router.dispatch(&utterance).await })
    }

    /// Subscribe to `engine`: every recognized phrase is dispatched on its
    /// own task and its result sent on `results`.
    ///
    /// The engine must invoke its callbacks from within a tokio runtime.
    pub fn attach(&self, engine: &dyn SpeechEngine, results: mpsc::UnboundedSender<DispatchResult>) {
        let router = self.clone();
        engine.on_utterance(Arc::new(move |utterance| {
            let router = router.clone();
            let results = results.clone();
            tokio::spawn(async move {
                let result = router.dispatch(&utterance).await;
                if results.send(DispatchResult { utterance, result }).is_err() {
                    debug!("dispatch result receiver dropped");
                }
            });
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TextRecognizer;
    use crate::handler::OutcomeFuture;
    use rapidmq_core::VoiceCommand;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records commands and answers with a canned outcome per kind.
    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<VoiceCommand>>,
        delay_publish: Option<Duration>,
    }

    impl CommandHandler for RecordingHandler {
        fn handle(&self, command: VoiceCommand) -> OutcomeFuture<'_> {
            self.seen.lock().unwrap().push(command.clone());
            Box::pin(async move {
                match command {
                    VoiceCommand::ConsumeMessage { .. } => CommandOutcome::Empty,
                    VoiceCommand::PublishMessage { message, .. } => {
                        if let Some(delay) = self.delay_publish {
                            tokio::time::sleep(delay).await;
                        }
                        CommandOutcome::success(message)
                    }
                    other => CommandOutcome::success(other.kind()),
                }
            })
        }
    }

    fn router_with(handler: Arc<RecordingHandler>) -> CommandRouter {
        CommandRouter::new(Arc::new(CommandGrammar::standard()), handler)
    }

    fn utterance(id: &str, captures: &[&str]) -> RecognizedUtterance {
        RecognizedUtterance::new(id, captures.iter().map(|c| c.to_string()).collect())
    }

    #[tokio::test]
    async fn dispatch_runs_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let router = router_with(handler.clone());

        let outcome = router
            .dispatch(&utterance("create queue *name", &["orders"]))
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::success("create_queue"));
        assert_eq!(
            *handler.seen.lock().unwrap(),
            vec![VoiceCommand::CreateQueue { name: "orders".to_string() }]
        );
    }

    #[tokio::test]
    async fn blank_capture_never_reaches_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let router = router_with(handler.clone());

        let err = router
            .dispatch(&utterance("create queue *name", &[" "]))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::EmptyCapture { .. }));
        assert!(handler.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unrecognized_then_valid() {
        let handler = Arc::new(RecordingHandler::default());
        let router = router_with(handler.clone());

        let err = router
            .dispatch(&utterance("reboot the cluster", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnrecognizedCommand { .. }));
        assert!(handler.seen.lock().unwrap().is_empty());

        let outcome = router
            .dispatch(&utterance("show system health", &[]))
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::success("show_health"));
    }

    #[tokio::test]
    async fn empty_outcome_passes_through() {
        let router = router_with(Arc::new(RecordingHandler::default()));
        let outcome = router
            .dispatch(&utterance("consume message from queue *name", &["idle"]))
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Empty);
    }

    #[tokio::test]
    async fn spawned_dispatches_are_independent() {
        let handler = Arc::new(RecordingHandler {
            delay_publish: Some(Duration::from_millis(50)),
            ..Default::default()
        });
        let router = router_with(handler);

        let slow = router.spawn_dispatch(utterance(
            "publish message *message to queue *name",
            &["slow", "orders"],
        ));
        let fast = router.spawn_dispatch(utterance("show cluster status", &[]));

        // The fast command is not held up behind the slow one.
        let fast = tokio::time::timeout(Duration::from_millis(40), fast)
            .await
            .expect("fast dispatch should not wait for the slow one")
            .unwrap()
            .unwrap();
        assert_eq!(fast, CommandOutcome::success("show_cluster"));
        assert_eq!(slow.await.unwrap().unwrap(), CommandOutcome::success("slow"));
    }

    #[tokio::test]
    async fn attach_dispatches_engine_utterances() {
        let handler = Arc::new(RecordingHandler::default());
        let router = router_with(handler.clone());
        let recognizer = TextRecognizer::new(router.grammar()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        router.attach(&recognizer, tx);
        assert!(recognizer.feed("publish message hi to queue orders"));

        let result = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.utterance.captures, vec!["hi", "orders"]);
        assert_eq!(result.result.unwrap(), CommandOutcome::success("hi"));
        assert_eq!(
            *handler.seen.lock().unwrap(),
            vec![VoiceCommand::PublishMessage {
                queue_name: "orders".to_string(),
                message: "hi".to_string(),
            }]
        );
    }
}

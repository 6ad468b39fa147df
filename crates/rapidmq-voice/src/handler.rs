//! Command handlers.

use std::future::Future;
use std::pin::Pin;

use rapidmq_client::QueueServiceClient;
use rapidmq_core::config::PanelsConfig;
use rapidmq_core::{CommandOutcome, VoiceCommand};

/// Boxed future returned by [`CommandHandler::handle`].
pub type OutcomeFuture<'a> = Pin<Box<dyn Future<Output = CommandOutcome> + Send + 'a>>;

/// Runs a typed command. Injected into the router for testability.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, command: VoiceCommand) -> OutcomeFuture<'_>;
}

/// Answers panel commands locally and sends queue commands to the
/// queue service.
#[derive(Debug, Clone)]
pub struct QueueCommandHandler {
    client: QueueServiceClient,
    panels: PanelsConfig,
}

impl QueueCommandHandler {
    pub fn new(client: QueueServiceClient, panels: PanelsConfig) -> Self {
        Self { client, panels }
    }
}

impl CommandHandler for QueueCommandHandler {
    fn handle(&self, command: VoiceCommand) -> OutcomeFuture<'_> {
        Box::pin(async move {
            match command {
                VoiceCommand::ShowHealth => CommandOutcome::success(self.panels.health.summary()),
                VoiceCommand::ShowCluster => CommandOutcome::success(self.panels.cluster.summary()),
                VoiceCommand::CreateQueue { name } => self.client.create_queue(&name).await,
                VoiceCommand::PublishMessage {
                    queue_name,
                    message,
                } => self.client.publish_message(&queue_name, &message).await,
                VoiceCommand::ConsumeMessage { queue_name } => {
                    self.client.consume_message(&queue_name).await
                }
            }
        })
    }
}

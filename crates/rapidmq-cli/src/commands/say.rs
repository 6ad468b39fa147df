//! `rapidmq-dash say`: dispatch one typed phrase as a voice command.

use anyhow::{Result, bail};
use rapidmq_core::{CommandOutcome, DashConfig};
use rapidmq_voice::TextRecognizer;
use tracing::debug;

pub async fn say(config: &DashConfig, phrase: &str) -> Result<()> {
    let router = super::command_router(config)?;
    let recognizer = TextRecognizer::new(router.grammar())?;

    let Some(utterance) = recognizer.recognize(phrase) else {
        bail!("unrecognized command: {phrase}");
    };
    debug!(template = %utterance.template_id, captures = ?utterance.captures, "phrase recognized");

    match router.dispatch(&utterance).await? {
        CommandOutcome::Failure { text } => bail!("{text}"),
        outcome => {
            println!("{}", outcome.message());
            Ok(())
        }
    }
}

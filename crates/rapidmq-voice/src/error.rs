//! Error types for voice command dispatch.

use thiserror::Error;

/// Why an utterance did not produce a command. Never fatal to the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unrecognized command: {template_id}")]
    UnrecognizedCommand { template_id: String },

    #[error("template '{template_id}' expects {expected} captures, got {got}")]
    CaptureMismatch {
        template_id: String,
        expected: usize,
        got: usize,
    },

    #[error("template '{template_id}' got a blank {slot}")]
    EmptyCapture { template_id: String, slot: String },
}

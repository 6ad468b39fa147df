//! rapidmq-voice — voice command dispatch for the RapidMQ dashboard.
//!
//! The speech engine is an injected collaborator: it recognizes a phrase
//! against the grammar's templates and emits the template id plus its
//! wildcard captures. The router turns that into a typed command and runs
//! it on a handler.
//!
//! # Architecture
//!
//! ```text
//! SpeechEngine::on_utterance(cb)
//!   └── CommandRouter::dispatch(utterance)
//!         ├── CommandGrammar::construct() → VoiceCommand | UnrecognizedCommand
//!         └── CommandHandler::handle(command) → CommandOutcome
//!               ├── ShowHealth / ShowCluster → panel summaries
//!               └── queue commands → QueueServiceClient
//! ```
//!
//! # Grammar
//!
//! | Template | Command |
//! |---|---|
//! | `show system health` | `ShowHealth` |
//! | `show cluster status` | `ShowCluster` |
//! | `create queue *name` | `CreateQueue { name }` |
//! | `publish message *message to queue *name` | `PublishMessage { queue_name, message }` |
//! | `consume message from queue *name` | `ConsumeMessage { queue_name }` |

pub mod engine;
pub mod error;
pub mod grammar;
pub mod handler;
pub mod router;

pub use engine::{SpeechEngine, TextRecognizer, UtteranceCallback};
pub use error::DispatchError;
pub use grammar::{CommandGrammar, PhraseTemplate};
pub use handler::{CommandHandler, QueueCommandHandler};
pub use router::{CommandRouter, DispatchResult};

//! Tool-mediated agent.
//!
//! The agent turns a word into a final answer by calling the letter-counting
//! tool over a client transport and finalizing the result, either verbatim
//! or reworded by a chat model. An HTTP facade exposes the invocation to
//! outside callers.

pub mod config;
pub mod error;
pub mod facade;
pub mod model;
pub mod orchestrator;
pub mod session;

pub use config::{AgentConfig, FinalizePolicy, DEFAULT_DIRECTIVE};
pub use error::AgentError;
pub use model::{ChatModel, ModelError, TemplateChatModel};
pub use orchestrator::{Finalizer, LetterCountAgent};
pub use session::AgentSession;

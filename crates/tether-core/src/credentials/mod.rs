//! Credential prompts and the session credential cache.

pub mod errors;
pub mod flow;
pub mod types;

pub use errors::CredentialError;
pub use flow::{CredentialFlow, CredentialPrompt, PromptPhase};
pub use types::Credential;

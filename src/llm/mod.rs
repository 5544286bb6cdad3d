// LLM abstraction layer

pub mod provider;
pub mod azure;
pub mod mock;

pub use provider::*;
pub use mock::{MockLLMAdapter, MockReply};
pub use crate::types::*;

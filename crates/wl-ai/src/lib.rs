//! Natural-language-to-worklog parsing: prompt construction, strict
//! extraction of the model's JSON output, and the provider port.

pub mod error;
pub mod extract;
pub mod prompt;
pub mod provider;

pub use error::ParseError;
pub use extract::extract_entries;
pub use prompt::build_prompt;
pub use provider::{AnthropicParser, OpenAiParser, WorklogParser, create_parser};

pub mod content;
pub mod extract;
pub mod generator;
pub mod prompts;
pub mod providers;

pub use content::{parse_outline, ContentService};
pub use extract::{extract_json_array, extract_json_object};
pub use generator::TextGenerator;
pub use providers::mock::MockProvider;
pub use providers::openai::OpenAiProvider;

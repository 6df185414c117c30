mod client;
mod error;
mod language;
mod lines;
mod orchestrator;
mod provider;
mod retry;

pub use client::{Backend, DEFAULT_TIMEOUT, HttpBackend, extract_translation};
pub use error::AttemptError;
pub use language::{
    AUTO_DETECT, REGIONAL_LANGUAGES, SUPPORTED_LANGUAGES, normalize_language_code,
    print_languages, validate_language, validate_source_language,
};
pub use lines::{is_blank, join_lines, split_lines};
pub use orchestrator::{
    DEFAULT_LINE_DELAY, Discipline, TranslationRequest, TranslationResult, Translator,
    TranslatorConfig,
};
pub use provider::{Payload, PayloadFormat, Provider};
pub use retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy};

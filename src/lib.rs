//! # qtr - Line-by-line Translation CLI
//!
//! `qtr` translates text one line at a time through a chain of HTTP
//! translation providers. Each line gets a bounded number of attempts per
//! provider with exponential backoff, then falls back to the next provider.
//! Lines nobody could translate are kept as they were, and blank lines are
//! never sent anywhere, so the output always has the input's shape.
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a file to Hindi
//! qtr --to hi-IN ./notes.txt
//!
//! # Translate from stdin, Tamil to English
//! cat letter.txt | qtr --from ta-IN --to en
//!
//! # Send every line at once instead of one by one
//! qtr --to ja --discipline concurrent ./notes.txt
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/qtr/config.toml`:
//!
//! ```toml
//! [qtr]
//! to = "hi-IN"
//! discipline = "sequential"
//!
//! [[providers]]
//! name = "google"
//! endpoint = "https://deep-translator-api.azurewebsites.net/google/"
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use quicktranslate::translation::{
//!     PayloadFormat, Provider, TranslationRequest, Translator, TranslatorConfig,
//! };
//!
//! # async fn run() -> anyhow::Result<()> {
//! let provider = Provider::new("local", "http://localhost:5000/translate", PayloadFormat::Text);
//! let translator = Translator::new(TranslatorConfig::new(vec![provider]))?;
//! let result = translator
//!     .translate(&TranslationRequest::new("Hello\n\nWorld", "en", "hi-IN"))
//!     .await;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, diagnostics).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Line translation orchestrator and HTTP providers.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

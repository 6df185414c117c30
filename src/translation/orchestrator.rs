//! Line-by-line translation with retries and provider fallback.
//!
//! Input text is split on newlines. Blank lines are echoed untouched; every
//! other line goes through the provider chain, each provider getting a
//! bounded number of attempts with exponential backoff. A line that no
//! provider could translate is kept in its original form, so a call always
//! yields exactly as many lines as it was given.

use anyhow::{Result, bail};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::client::{Backend, DEFAULT_TIMEOUT, HttpBackend};
use super::language::normalize_language_code;
use super::lines::{is_blank, join_lines, split_lines};
use super::provider::Provider;
use super::retry::RetryPolicy;

/// Default pause between lines in the sequential discipline.
pub const DEFAULT_LINE_DELAY: Duration = Duration::from_millis(500);

/// How lines are scheduled against the backends.
///
/// `Sequential` keeps at most one request in flight and paces lines, which
/// protects provider rate limits. `Concurrent` sends every line at once:
/// lower latency, but the whole text hits the backend simultaneously.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    #[default]
    Sequential,
    Concurrent,
}

/// Everything a [`Translator`] needs, resolved up front.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Providers in fallback order.
    pub providers: Vec<Provider>,
    pub retry: RetryPolicy,
    pub discipline: Discipline,
    /// Pause between consecutive lines (sequential discipline only).
    pub line_delay: Duration,
    /// Per-request timeout of the HTTP backend.
    pub timeout: Duration,
}

impl TranslatorConfig {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self {
            providers,
            retry: RetryPolicy::default(),
            discipline: Discipline::default(),
            line_delay: DEFAULT_LINE_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// Output of one [`Translator::translate`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    /// Translated text, line for line with the input.
    pub text: String,
    /// Zero-based indices of lines every provider failed on.
    pub untranslated: Vec<usize>,
}

impl TranslationResult {
    pub const fn is_complete(&self) -> bool {
        self.untranslated.is_empty()
    }
}

enum LineOutcome {
    Translated(String),
    Blank,
    Untranslated,
}

/// Translates multi-line text through an ordered chain of providers.
pub struct Translator<B = HttpBackend> {
    backend: B,
    providers: Vec<Provider>,
    retry: RetryPolicy,
    discipline: Discipline,
    line_delay: Duration,
}

impl Translator<HttpBackend> {
    /// Creates a translator talking HTTP to the configured providers.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let backend = HttpBackend::new(config.timeout)?;
        Self::with_backend(backend, config)
    }
}

impl<B: Backend> Translator<B> {
    pub fn with_backend(backend: B, config: TranslatorConfig) -> Result<Self> {
        if config.providers.is_empty() {
            bail!("No translation providers configured");
        }
        if config.retry.max_attempts == 0 {
            bail!("max_attempts must be at least 1");
        }

        Ok(Self {
            backend,
            providers: config.providers,
            retry: config.retry,
            discipline: config.discipline,
            line_delay: config.line_delay,
        })
    }

    pub const fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Translates `request.text` line by line.
    ///
    /// Never fails: lines that cannot be translated come back unchanged and
    /// are listed in [`TranslationResult::untranslated`].
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        if is_blank(&request.text) {
            return TranslationResult::default();
        }

        let source = normalize_language_code(&request.source_lang);
        let target = normalize_language_code(&request.target_lang);
        let lines = split_lines(&request.text);

        tracing::debug!(
            lines = lines.len(),
            source,
            target,
            discipline = ?self.discipline,
            "translating"
        );

        let outcomes = match self.discipline {
            Discipline::Sequential => self.run_sequential(&lines, source, target).await,
            Discipline::Concurrent => self.run_concurrent(&lines, source, target).await,
        };

        let mut untranslated = Vec::new();
        let output: Vec<&str> = outcomes
            .iter()
            .zip(&lines)
            .enumerate()
            .map(|(index, (outcome, original))| match outcome {
                LineOutcome::Translated(text) => text.as_str(),
                LineOutcome::Blank => *original,
                LineOutcome::Untranslated => {
                    untranslated.push(index);
                    *original
                }
            })
            .collect();

        TranslationResult {
            text: join_lines(&output),
            untranslated,
        }
    }

    async fn run_sequential(
        &self,
        lines: &[&str],
        source: &str,
        target: &str,
    ) -> Vec<LineOutcome> {
        let mut outcomes = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            outcomes.push(self.translate_line(index, line, source, target).await);

            if index + 1 < lines.len() && !self.line_delay.is_zero() {
                tokio::time::sleep(self.line_delay).await;
            }
        }

        outcomes
    }

    async fn run_concurrent(
        &self,
        lines: &[&str],
        source: &str,
        target: &str,
    ) -> Vec<LineOutcome> {
        // join_all yields results in input order, whatever order they finish in
        join_all(
            lines
                .iter()
                .enumerate()
                .map(|(index, line)| self.translate_line(index, line, source, target)),
        )
        .await
    }

    async fn translate_line(
        &self,
        index: usize,
        line: &str,
        source: &str,
        target: &str,
    ) -> LineOutcome {
        if is_blank(line) {
            return LineOutcome::Blank;
        }

        for provider in &self.providers {
            if let Some(text) = self
                .try_provider(provider, index, line, source, target)
                .await
            {
                return LineOutcome::Translated(single_line(&text));
            }
            tracing::warn!(
                provider = %provider.name,
                line = index,
                "provider exhausted, switching provider"
            );
        }

        tracing::error!(line = index, "all providers failed, keeping original line");
        LineOutcome::Untranslated
    }

    async fn try_provider(
        &self,
        provider: &Provider,
        index: usize,
        line: &str,
        source: &str,
        target: &str,
    ) -> Option<String> {
        for attempt in 1..=self.retry.max_attempts {
            match self.backend.attempt(provider, line, source, target).await {
                Ok(text) => return Some(text),
                Err(error) => {
                    tracing::warn!(
                        provider = %provider.name,
                        line = index,
                        attempt,
                        %error,
                        "translation attempt failed"
                    );
                }
            }

            if let Some(delay) = self.retry.delay_after(attempt) {
                tokio::time::sleep(delay).await;
            }
        }

        None
    }
}

/// Folds a multi-line backend answer into one line so it cannot shift the
/// lines after it.
fn single_line(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

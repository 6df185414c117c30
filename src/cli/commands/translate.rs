use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::fs::atomic_write;
use crate::input::InputReader;
use crate::status;
use crate::translation::{
    Discipline, TranslationRequest, TranslationResult, Translator, is_blank, split_lines,
};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub file: Option<PathBuf>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub providers: Vec<String>,
    pub discipline: Option<Discipline>,
    pub output: Option<PathBuf>,
}

impl TranslateOptions {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            from: self.from.clone(),
            to: self.to.clone(),
            providers: self.providers.clone(),
            discipline: self.discipline,
        }
    }
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let resolved = resolve_config(&options.resolve_options(), &config_file)?;

    let source_text = InputReader::read(options.file.as_deref())?;
    let request = TranslationRequest::new(
        source_text,
        resolved.source_language,
        resolved.target_language,
    );

    let translator = Translator::new(resolved.translator).context("Could not translate")?;

    let result = if is_blank(&request.text) {
        TranslationResult::default()
    } else {
        translate_interruptibly(&translator, &request).await?
    };

    if !result.is_complete() {
        let line_numbers: Vec<String> = result
            .untranslated
            .iter()
            .map(|index| (index + 1).to_string())
            .collect();
        status!(
            "{} {} of {} lines could not be translated and were kept as is (lines {})",
            Style::warning("Warning:"),
            result.untranslated.len(),
            split_lines(&request.text).len(),
            line_numbers.join(", ")
        );
    }

    match options.output {
        Some(path) => {
            atomic_write(&path, &result.text)?;
            status!(
                "{} Wrote translation to {}",
                Style::success("✓"),
                Style::secondary(path.display())
            );
        }
        None => write_stdout(&result.text)?,
    }

    Ok(())
}

/// Runs the translation until it finishes or the user presses Ctrl-C.
///
/// On interrupt the partial work is dropped; nothing is written.
async fn translate_interruptibly(
    translator: &Translator,
    request: &TranslationRequest,
) -> Result<TranslationResult> {
    let line_count = split_lines(&request.text).len();
    let spinner = Spinner::new(&format!(
        "Translating {line_count} {} via {}...",
        if line_count == 1 { "line" } else { "lines" },
        translator
            .providers()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    ));

    let result = tokio::select! {
        result = translator.translate(request) => result,
        _ = tokio::signal::ctrl_c() => {
            spinner.stop();
            bail!("Interrupted; translation discarded");
        }
    };

    spinner.stop();
    Ok(result)
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

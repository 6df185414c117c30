//! Language code normalization, validation and supported languages.

use anyhow::Result;

use crate::ui::Style;

/// Source language sentinel meaning "let the backend detect it".
pub const AUTO_DETECT: &str = "auto";

/// Regional codes and the standard code backends expect for them.
const REGIONAL_TO_STANDARD: &[(&str, &str)] = &[
    (AUTO_DETECT, AUTO_DETECT),
    ("en-IN", "en"),
    ("hi-IN", "hi"),
    ("mr-IN", "mr"),
    ("bn-IN", "bn"),
    ("ta-IN", "ta"),
    ("te-IN", "te"),
    ("kn-IN", "kn"),
    ("ml-IN", "ml"),
    ("gu-IN", "gu"),
    ("pa-IN", "pa"),
    // Odia is `or` in ISO 639-1
    ("od-IN", "or"),
];

/// Regional language codes and their names.
pub const REGIONAL_LANGUAGES: &[(&str, &str)] = &[
    ("en-IN", "English"),
    ("hi-IN", "Hindi"),
    ("mr-IN", "Marathi"),
    ("bn-IN", "Bengali"),
    ("ta-IN", "Tamil"),
    ("te-IN", "Telugu"),
    ("kn-IN", "Kannada"),
    ("ml-IN", "Malayalam"),
    ("gu-IN", "Gujarati"),
    ("pa-IN", "Punjabi"),
    ("od-IN", "Odia"),
];

/// Supported language codes (ISO 639-1) and their names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Maps a regional or standard language code to the standard code.
///
/// Known regional codes are looked up in a fixed table. Anything else is cut
/// at the first hyphen (`pt-BR` becomes `pt`). If that leaves nothing, the
/// input is returned unchanged. `auto` is passed through as is.
pub fn normalize_language_code(code: &str) -> &str {
    if let Some(&(_, standard)) = REGIONAL_TO_STANDARD
        .iter()
        .find(|(regional, _)| *regional == code)
    {
        return standard;
    }

    match code.split('-').next() {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => code,
    }
}

fn is_known(lang: &str) -> bool {
    REGIONAL_LANGUAGES.iter().any(|(code, _)| *code == lang)
        || SUPPORTED_LANGUAGES
            .iter()
            .any(|(code, _)| *code == normalize_language_code(lang))
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Regional language codes"));
    for (code, name) in REGIONAL_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!(
        "{}",
        Style::hint("Use 'auto' as the source language to let the backend detect it.")
    );
}

/// Validates that the given target language code is supported.
///
/// # Errors
///
/// Returns an error if the code is neither a known regional code nor
/// normalizes to a supported ISO 639-1 code.
pub fn validate_language(lang: &str) -> Result<()> {
    if is_known(lang) {
        Ok(())
    } else {
        anyhow::bail!(
            "Invalid language code: '{lang}'\n\n\
             Valid language codes: hi-IN, en-IN, ta-IN, hi, en, ja, ...\n\
             Run 'qtr languages' to see all supported codes."
        )
    }
}

/// Validates a source language code. Unlike targets, `auto` is accepted.
///
/// # Errors
///
/// Returns an error if the code is not `auto` and fails [`validate_language`].
pub fn validate_source_language(lang: &str) -> Result<()> {
    if lang == AUTO_DETECT {
        return Ok(());
    }
    validate_language(lang)
}

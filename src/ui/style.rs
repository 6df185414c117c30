//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! falls back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Provider fallback chain")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().bold())
    }

    /// Style for labels/keys (e.g., "endpoint", "format")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().dimmed())
    }

    /// Style for primary values (e.g., provider names)
    pub fn value<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().cyan())
    }

    /// Style for secondary/supplementary info (e.g., endpoints, paths)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().dimmed())
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().green())
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().yellow())
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().yellow())
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        paint(text, owo_colors::Style::new().dimmed().italic())
    }

    /// 1-based position marker for ordered lists (e.g., "2.")
    pub fn position(index: usize) -> String {
        paint(format!("{}.", index + 1), owo_colors::Style::new().bold())
    }
}

fn paint<T: Display>(text: T, style: owo_colors::Style) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        format!("{}", text.style(style))
    }
}

//! Subcommand implementations.

/// Provider chain listing.
pub mod providers;

/// Translation command handler.
pub mod translate;

use anyhow::Result;
use clap::Parser;

use quicktranslate::cli::commands::{providers, translate};
use quicktranslate::cli::{Args, Command};
use quicktranslate::output::{self, OutputConfig};
use quicktranslate::translation::print_languages;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        ..OutputConfig::default()
    });

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers { provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                from: args.from,
                to: args.to,
                providers: args.providers,
                discipline: args.discipline,
                output: args.output,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}

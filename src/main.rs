//! Smelter - edit frontmatter data through an inferred form.

#![allow(dead_code)]

mod cli;
mod config;
mod form;
mod frontmatter;
mod history;
mod logger;
mod render;
mod schema;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SmelterConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SmelterConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Schema { file, pretty } => cli::schema::print_schema(&config, file, *pretty),
        Commands::Render { file, output } => {
            cli::render::render_file(&config, file, output.as_deref())
        }
        Commands::Apply { file, form, write } => cli::apply::apply_form(&config, file, form, write),
        Commands::Edit { args } => cli::edit::edit_file(&config, args),
        Commands::Check { files } => cli::check::check_files(&config, files),
    }
}

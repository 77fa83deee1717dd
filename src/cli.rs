use std::path::PathBuf;

use clap::Parser;

use crate::sources::rijks::PAGE_COUNT;

/// Paint a digital postcard from a random Rijksmuseum landscape.
#[derive(Parser, Debug)]
#[command(name = "postful", version, about)]
pub struct Args {
    /// Output format for the card's color bindings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
    pub format: OutputFormat,

    /// Write the bindings to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a colored terminal preview of the palette and roles
    #[arg(long)]
    pub preview: bool,

    /// Launch the interactive postcard
    #[arg(long, conflicts_with_all = ["output", "from"])]
    pub tui: bool,

    /// Search results page to draw from (random when omitted)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=PAGE_COUNT as i64))]
    pub page: Option<u8>,

    /// Palette model requested from the palette service
    #[arg(long, default_value = "default")]
    pub model: String,

    /// Sender email; with --to, stamps and sends the card
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Recipient email
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Message written on the card
    #[arg(long, default_value = "")]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Css,
    Json,
}

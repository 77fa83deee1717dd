use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postful::backends::css::CssBackend;
use postful::backends::json::JsonBackend;
use postful::backends::StyleBackend;
use postful::cli::{Args, OutputFormat};
use postful::config::PostfulConfig;
use postful::preview::print_preview;
use postful::send::{date_stamp, Cue, SendForm, SendSequence, SENT_ACK, STAMP_PLACEHOLDER};
use postful::session::Session;
use postful::sources::colormind::ColormindClient;
use postful::sources::rijks::RijksClient;
use postful::tui::{self, TuiApp};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.tui);

    let config = PostfulConfig::from_env();
    let rijks = RijksClient::new(&config).context("setting up the collection client")?;
    let colormind = ColormindClient::new(&config).context("setting up the palette client")?;

    let mut session = Session::new(args.model.clone());
    let mut rng = rand::rng();
    session
        .load_artwork(&rijks, args.page, &mut rng)
        .await
        .context("choosing an artwork")?;
    session
        .reroll(&colormind)
        .await
        .context("generating a palette")?;

    if args.tui {
        let runtime = Handle::current();
        let app = TuiApp::new(session);
        return tokio::task::spawn_blocking(move || tui::run(app, colormind, runtime))
            .await
            .context("postcard UI stopped unexpectedly")?;
    }

    let style = session
        .card_style()
        .context("palette service returned no palette")?;
    let title = session
        .artwork()
        .map_or("", |art| art.summary.long_title.as_str());

    let backend: &dyn StyleBackend = match args.format {
        OutputFormat::Css => &CssBackend,
        OutputFormat::Json => &JsonBackend,
    };
    match &args.output {
        Some(path) => {
            backend.write_to(&style, title, path)?;
            info!(path = %path.display(), format = backend.name(), "wrote card colors");
        }
        None => print!("{}", backend.serialize(&style, title)),
    }

    if args.preview {
        print_preview(&mut io::stderr().lock(), &style, title)?;
    }

    if let (Some(from), Some(to)) = (args.from, args.to) {
        send_card(SendForm::new(from, to, args.message)).await?;
    }

    Ok(())
}

/// Validate the form and narrate the stamp animation on stderr.
async fn send_card(form: SendForm) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let sequence = SendSequence::start(&form, today, &mut rand::rng())
        .context("postcard not sent")?;
    info!(
        recipient = %form.recipient,
        postmark = %date_stamp(today),
        "stamping postcard"
    );

    sequence
        .play(|cue| match cue {
            Cue::StampApplied => eprintln!("stamp applied at {:+}°", sequence.angle()),
            Cue::DateStampFadeIn => eprintln!("postmarked: {}", sequence.date_text()),
            Cue::Sent => eprintln!("{SENT_ACK}"),
            Cue::DateStampHidden | Cue::StampFadeOut => {}
            Cue::PlaceholderRestored => eprintln!("[{STAMP_PLACEHOLDER}]"),
        })
        .await;
    Ok(())
}

/// Structured logs go to stderr so stdout carries only the card colors.
fn init_tracing(tui: bool) {
    let default_filter = if tui { "off" } else { "postful=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

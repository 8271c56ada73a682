//! Play Akinator in the terminal
//!
//! # Usage
//!
//! ```bash
//! # English questions, English answers
//! cargo run --bin aki
//!
//! # Turkish questions and answers, 30 second reply window
//! cargo run --bin aki -- --region tr --locale tr --timeout 30
//! ```

mod terminal;

use aki_api::{AkiClient, Region};
use aki_game::chat::IncomingMessage;
use aki_game::{Akinator, GameConfig, Vocabulary};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use terminal::TerminalChannel;
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "aki")]
#[command(about = "Play Akinator in your terminal", long_about = None)]
struct Args {
    /// Region/language code for the guessing service (en, tr, fr, ...)
    #[arg(short, long, default_value = "en")]
    region: Region,

    /// Answer vocabulary: "en" or "tr"
    #[arg(short, long, default_value = "en")]
    locale: String,

    /// Reply window in seconds
    #[arg(short, long, default_value_t = 60)]
    timeout: u64,
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                         Akinator                             ║
║                                                              ║
║  Think of a real or fictional character and answer the       ║
║  questions. The genie will read your mind.                   ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .init();

    let args = Args::parse();

    let vocab = match args.locale.as_str() {
        "tr" => Vocabulary::turkish(),
        _ => Vocabulary::english(),
    };

    let config = GameConfig::builder()
        .region(args.region)
        .reply_timeout(Duration::from_secs(args.timeout))
        .build();
    config.validate()?;

    print_banner();
    info!(region = %config.region, "Starting terminal game");

    let akinator = Akinator::new(Arc::new(AkiClient::new()?))
        .with_config(config)
        .with_vocabulary(vocab);

    let player = std::env::var("USER").unwrap_or_else(|_| "player".to_string());
    let channel = TerminalChannel::new(player.clone());
    let trigger = IncomingMessage::new(
        Uuid::new_v4().to_string(),
        "terminal",
        channel.user().as_str(),
        "play",
    )
    .with_guild("terminal")
    .with_author_name(player);

    // The loop publishes every notice through the channel; only a refused
    // start needs reporting here.
    if akinator.play(&trigger, &channel, None).await.is_none() {
        println!("The game could not be started. See the logs for details.");
    }

    Ok(())
}

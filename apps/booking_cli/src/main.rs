use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use booking_core::{
    pricing::{compute_summary, format_rupiah},
    RandomBookingIds,
};
use clap::{Parser, Subcommand};
use shared::{
    domain::{RoomId, ROOM_CATALOG},
    protocol::BookingRequest,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod booking;
mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Hotel booking page, driven from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the rooms on offer.
    Catalog,
    /// Price summary for a room.
    Quote {
        #[arg(long)]
        room: RoomId,
    },
    /// Fill in and submit the booking page from a JSON request.
    Book {
        #[arg(long)]
        request: PathBuf,
        /// Page address; defaults to the booking page with the room preselected.
        #[arg(long)]
        url: Option<String>,
    },
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?;
    init_tracing(settings.debug);

    match cli.command {
        Command::Catalog => {
            for entry in ROOM_CATALOG.iter() {
                println!(
                    "{:<14} {:<20} {:>12}  {}",
                    entry.id.key(),
                    entry.name,
                    format_rupiah(entry.price),
                    entry.description
                );
            }
        }
        Command::Quote { room } => {
            let summary = compute_summary(room);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Book {
            request: request_path,
            url,
        } => {
            let raw = fs::read_to_string(&request_path)
                .with_context(|| format!("failed to read '{}'", request_path.display()))?;
            let request: BookingRequest = serde_json::from_str(&raw).with_context(|| {
                format!("invalid booking request in '{}'", request_path.display())
            })?;
            let page_url = booking::page_url(&request, url.as_deref())?;
            info!(url = %page_url, room = %request.room, "booking");

            let confirmation = booking::book(
                &request,
                page_url,
                settings.ui_options(None),
                Box::new(RandomBookingIds),
            )?;
            println!("{}", serde_json::to_string_pretty(&confirmation)?);
        }
    }

    Ok(())
}

//! Command-line interface and interactive driver.
//!
//! With no arguments the driver prompts for a track id, then - if that is
//! left empty - for a name and artist. The same inputs can be supplied
//! non-interactively via flags. Output is one labeled line per record field,
//! or pretty JSON with `--json`.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};

use crate::catalog::{CatalogClient, CatalogError, TrackRecord};
use crate::{aggregator, config, resolver};

/// Fetch track metadata and audio-descriptor attributes from the catalog
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Track id, spotify:track: URI, or open.spotify.com share URL
    #[arg(long)]
    pub id: Option<String>,

    /// Track name to search for (used when no id is given)
    #[arg(long)]
    pub name: Option<String>,

    /// Artist name to narrow the search
    #[arg(long)]
    pub artist: Option<String>,

    /// Print the record as pretty JSON instead of labeled lines
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify credentials and catalog reachability, then exit
    Check,
}

/// Run one fetch (or the connection check) to completion
pub async fn run(cli: &Cli) -> Result<(), CatalogError> {
    let credentials = config::load_credentials()?;
    let client = CatalogClient::new(credentials);

    if let Some(Commands::Check) = cli.command {
        return check_connection(&client).await;
    }

    let (id, name, artist) = if cli.id.is_some() || cli.name.is_some() {
        (cli.id.clone(), cli.name.clone(), cli.artist.clone())
    } else {
        prompt_inputs()?
    };

    let track_id = resolver::resolve(
        &client,
        id.as_deref(),
        name.as_deref(),
        artist.as_deref(),
    )
    .await?;

    tracing::info!(%track_id, "resolved track, fetching attributes");
    let record = aggregator::aggregate(&client, &track_id).await?;

    print_record(&record, cli.json)
}

/// Authenticate and run a trivial search to prove the API is reachable
async fn check_connection(client: &CatalogClient) -> Result<(), CatalogError> {
    client.authenticate().await?;
    println!("Authenticated with the catalog service.");

    client.search("test", None).await?;
    println!("Search endpoint reachable. Connection OK.");
    Ok(())
}

/// Prompt for a track id, then conditionally for name and artist
fn prompt_inputs() -> Result<(Option<String>, Option<String>, Option<String>), CatalogError> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock();

    let id = prompt(&mut lines, "Enter track id (or press Enter to search by name): ")?;
    if !id.is_empty() {
        return Ok((Some(id), None, None));
    }

    let name = prompt(&mut lines, "Enter track name: ")?;
    let artist = prompt(&mut lines, "Enter artist name (optional): ")?;

    Ok((
        None,
        (!name.is_empty()).then_some(name),
        (!artist.is_empty()).then_some(artist),
    ))
}

fn prompt(lines: &mut impl BufRead, label: &str) -> Result<String, CatalogError> {
    print!("{label}");
    std::io::stdout()
        .flush()
        .map_err(|e| CatalogError::Input(format!("failed to write prompt: {e}")))?;

    let mut line = String::new();
    lines
        .read_line(&mut line)
        .map_err(|e| CatalogError::Input(format!("failed to read input: {e}")))?;
    Ok(line.trim().to_string())
}

/// Print the record as labeled lines, or as pretty JSON when requested
fn print_record(record: &TrackRecord, json: bool) -> Result<(), CatalogError> {
    if json {
        let rendered = serde_json::to_string_pretty(record)
            .map_err(|e| CatalogError::Parse(format!("failed to render record: {e}")))?;
        println!("{rendered}");
    } else {
        for (label, value) in record.fields() {
            println!("{label}: {value}");
        }
    }
    Ok(())
}

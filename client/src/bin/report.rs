//! Print result cards for a saved lookup proxy response.
//!
//! Usage: `aqi-report [--json] <response.json> [city]`
//!
//! The city defaults to the one named in the first result. With `--json`,
//! the shaped records are printed as JSON instead of as cards.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use client::{
    atmosphere::{AqiResponse, StaticAirQualitySource},
    search::search,
    view::CardView,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args: Vec<_> = std::env::args_os().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    let mut args = args.into_iter();
    let path: PathBuf = args
        .next()
        .context("usage: aqi-report [--json] <response.json> [city]")?
        .into();
    let body = std::fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let response = AqiResponse::from_json(&body)?;

    let city = match args.next() {
        Some(city) => city.to_string_lossy().into_owned(),
        None => response
            .results
            .first()
            .map(|r| r.city.clone())
            .unwrap_or_default(),
    };
    tracing::info!("{} result(s) in {}", response.results.len(), path.display());

    let mut source = StaticAirQualitySource { response };
    let Some(outcome) = search(&mut source, &city, &Local::now())? else {
        anyhow::bail!("no city to report on");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }
    println!("{}\n", outcome.searched_at);
    for record in &outcome.records {
        println!("{}\n", CardView::from(record));
    }
    Ok(())
}

//! Check subscribed cities and print the alert emails that are due.
//!
//! Usage: `aqi-alerts <subscriptions.json> <readings.json> [config.json]`
//!
//! `subscriptions.json` is a list of `{"email", "city"}` objects;
//! `readings.json` maps each city to a saved lookup proxy response.

use std::path::{Path, PathBuf};

use anyhow::Context;
use client::{
    alerts::{check_alerts, CityReport, Subscription},
    atmosphere::table::CityTable,
    ClientConfig,
};

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    const USAGE: &str = "usage: aqi-alerts <subscriptions.json> <readings.json> [config.json]";
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let subscriptions = args.next().context(USAGE)?;
    let readings = args.next().context(USAGE)?;
    let config = match args.next() {
        Some(path) => ClientConfig::from_json(&read(&path)?)?,
        None => ClientConfig::default(),
    };

    let subscriptions: Vec<Subscription> = serde_json::from_str(&read(&subscriptions)?)
        .context("malformed subscriptions")?;
    let mut table = CityTable::load(&readings)?;

    tracing::info!("starting alert check");
    let reports = check_alerts(&mut table, &subscriptions, &config);
    let mut sent = 0;
    for report in &reports {
        match report {
            CityReport::Alert { email, .. } => {
                sent += 1;
                println!("To: {}", email.recipients.join(", "));
                println!("Subject: {}\n", email.subject);
                println!("{}\n", email.body);
            }
            other => println!("{other}\n"),
        }
    }
    tracing::info!("{sent} of {} cities need an alert", reports.len());
    Ok(())
}

//! The city search flow: input, proxy query, and outcome.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::{
    atmosphere::{AirQualitySource, AqiResponse},
    config::ClientConfig,
    shape::{shape_results, DisplayRecord},
    Error,
};

/// A city name ready to be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    city: String,
}

impl CityQuery {
    /// Trim the search box contents; blank input starts no search.
    pub fn parse(input: &str) -> Option<Self> {
        let city = input.trim();
        if city.is_empty() {
            None
        } else {
            Some(CityQuery {
                city: city.to_owned(),
            })
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// URL of the lookup proxy for this city.
    pub fn url(&self, config: &ClientConfig) -> String {
        format!(
            "{}?city={}",
            config.aqi_endpoint,
            urlencoding::encode(&self.city)
        )
    }
}

/// The result of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub city: String,
    /// e.g. `Searched "Delhi" at 15 Oct 2026, 3:04 pm`.
    pub searched_at: String,
    pub records: Vec<DisplayRecord>,
}

/// Label recording when a search was made.
pub fn searched_label<Tz>(city: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    format!(
        "Searched \"{}\" at {}",
        city,
        at.format("%-d %b %Y, %-I:%M %P")
    )
}

/// Shape a decoded proxy response, or report that the city had no data.
pub fn search_outcome<Tz>(
    query: &CityQuery,
    response: AqiResponse,
    now: &DateTime<Tz>,
) -> Result<SearchOutcome, Error>
where
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    if response.results.is_empty() {
        return Err(Error::NoData {
            city: query.city.clone(),
        });
    }
    let records = shape_results(&response.results);
    tracing::info!("{} result(s) for {}", records.len(), query.city);
    Ok(SearchOutcome {
        city: query.city.clone(),
        searched_at: searched_label(&query.city, now),
        records,
    })
}

/// Run a search against a synchronous source.
///
/// Returns `Ok(None)` when the input is blank.
pub fn search<S, Tz>(
    source: &mut S,
    input: &str,
    now: &DateTime<Tz>,
) -> Result<Option<SearchOutcome>, Error>
where
    S: AirQualitySource + ?Sized,
    Tz: TimeZone,
    Tz::Offset: core::fmt::Display,
{
    let Some(query) = CityQuery::parse(input) else {
        return Ok(None);
    };
    let response = source.lookup(query.city())?;
    search_outcome(&query, response, now).map(Some)
}

//! The event converter: turns the rows of an event listing CSV file into standalone JSON documents
//! for the web app.
//!
//! Each row is enriched with the bookkeeping fields the web app expects of a stored event
//! (`addedAt`, `lastEdited`, empty user lists, status flags), its tag columns are split into lists
//! and its separate date and time columns are combined into one ISO-8601 date-time. The result is
//! written to `data/events/<year>/<month>/<day>_<slug>.json` below the output directory.

use crate::io::{event_json, events_csv};
use crate::{Error, EventRecord};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Input format of the `date` column
pub const DATE_FORMAT: &str = "%Y/%m/%d";
/// Input format of the `time` column (24-hour clock)
pub const TIME_FORMAT: &str = "%H:%M";

/// Paths used by one run of the event converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsConfig {
    /// The event listing CSV file
    pub input: PathBuf,
    /// Directory below which the `data/events/` tree is written
    pub output_base: PathBuf,
}

impl EventsConfig {
    /// Default layout of the LocalMeet project: read `python/events.csv`, write to `data/events/`,
    /// both relative to the project root `base`.
    pub fn from_base(base: &Path) -> Self {
        EventsConfig {
            input: base.join("python").join("events.csv"),
            output_base: base.to_path_buf(),
        }
    }
}

/// Where an enriched event is stored, derived from its combined date and its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocation {
    pub year: String,
    pub month: String,
    pub day: String,
    pub file_name: String,
}

impl EventLocation {
    /// The event's directory relative to the output base: `data/events/<year>/<month>`
    pub fn relative_dir(&self) -> PathBuf {
        Path::new("data")
            .join("events")
            .join(&self.year)
            .join(&self.month)
    }
}

/// Split a comma separated list of tags into the trimmed, non-empty tags, keeping their order.
///
/// `"Music, Outdoors,  "` becomes `["Music", "Outdoors"]`.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse the separate `date` (`YYYY/MM/DD`) and `time` (`HH:MM`) values of an event row and
/// combine them into one date-time.
pub fn combine_date_time(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| {
        format!(
            "Date '{}' does not match the format YYYY/MM/DD: {}",
            date, e
        )
    })?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|e| format!("Time '{}' does not match the format HH:MM: {}", time, e))?;
    Ok(date.and_time(time))
}

/// ISO-8601 representation of a date-time with seconds precision, e.g. `2024-03-05T18:30:00`
pub fn iso_date_time(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// ISO-8601 representation of a timestamp with microseconds precision, used for `addedAt` and
/// `lastEdited`. The fraction is left out entirely if it is zero microseconds.
pub fn iso_timestamp(timestamp: NaiveDateTime) -> String {
    if timestamp.nanosecond() / 1000 == 0 {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Build the file name part of an event title: lower case, spaces replaced by underscores.
///
/// Path separators (`/` and `\`) are replaced by underscores as well, so the resulting file always
/// lands in the event's month directory. All other characters are kept as they are.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

/// File name of an event: `<day>_<slug>.json`
pub fn event_file_name(day: &str, title: &str) -> String {
    format!("{}_{}.json", day, slugify(title))
}

/// Enrich a freshly read event row in place and determine where it is stored.
///
/// The following modifications are made to the event:
/// * `addedAt` and `lastEdited` are set to `now` (the very same value)
/// * `registeredUsers` and `interestedUsers` are set to empty lists
/// * `isCancelled` and `isDeleted` are set to `false`
/// * `categoryTags` and `groupTags` are split into lists of tags (see [`split_tags`])
/// * `date` is replaced by the ISO-8601 combination of the `date` and `time` columns
/// * `originalFilePath` is set to the event's file name (without directory)
///
/// # Errors
///
/// Fails with a string error message, if
/// * one of the columns `title`, `date`, `time`, `categoryTags` or `groupTags` is missing
/// * the `date` or `time` value cannot be parsed
pub fn enrich_event(event: &mut EventRecord, now: NaiveDateTime) -> Result<EventLocation, String> {
    let timestamp = iso_timestamp(now);
    event.insert("addedAt".to_owned(), Value::String(timestamp.clone()));
    event.insert("lastEdited".to_owned(), Value::String(timestamp));
    event.insert("registeredUsers".to_owned(), Value::Array(Vec::new()));
    event.insert("interestedUsers".to_owned(), Value::Array(Vec::new()));
    event.insert("isCancelled".to_owned(), Value::Bool(false));
    event.insert("isDeleted".to_owned(), Value::Bool(false));

    for key in ["categoryTags", "groupTags"] {
        let tags = split_tags(get_str(event, key)?);
        event.insert(
            key.to_owned(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    let date_time = combine_date_time(get_str(event, "date")?, get_str(event, "time")?)?;
    let date = iso_date_time(date_time);
    let (year, month, day) = match (date.get(0..4), date.get(5..7), date.get(8..10)) {
        (Some(y), Some(m), Some(d)) => (y.to_owned(), m.to_owned(), d.to_owned()),
        _ => return Err(format!("Unexpected date representation '{}'", date)),
    };
    event.insert("date".to_owned(), Value::String(date));

    let title = get_str(event, "title")?;
    if title.contains(|c: char| c == '/' || c == '\\') {
        warn!(
            "Title '{}' contains path separators. They are replaced by '_' in the file name.",
            title
        );
    }
    let file_name = event_file_name(&day, title);
    event.insert(
        "originalFilePath".to_owned(),
        Value::String(file_name.clone()),
    );

    Ok(EventLocation {
        year,
        month,
        day,
        file_name,
    })
}

/// Run the event converter: read all events from the configured CSV file, enrich them and write
/// each one as JSON document into the `data/events/` tree.
///
/// `clock` is asked once per event for the current time. The first failing event aborts the run;
/// events before it have already been written at that point. Returns the number of written events.
pub fn convert_events<F>(config: &EventsConfig, mut clock: F) -> Result<usize, Error>
where
    F: FnMut() -> NaiveDateTime,
{
    let file = crate::io::open_input(&config.input).map_err(Error::NoInput)?;
    let mut events = events_csv::read(file).map_err(Error::Input)?;
    info!(
        "Read {} events from {}",
        events.len(),
        config.input.display()
    );

    for (i, event) in events.iter_mut().enumerate() {
        let location = enrich_event(event, clock())
            .map_err(|e| Error::Input(format!("Event {}: {}", i + 1, e)))?;
        let dir = config.output_base.join(location.relative_dir());
        let path =
            event_json::write_file(&dir, &location.file_name, event).map_err(Error::Output)?;
        info!("Saved event to {}", path.display());
    }

    Ok(events.len())
}

/// Get a string field of an event, failing with an error message if it is missing
fn get_str<'a>(event: &'a EventRecord, key: &str) -> Result<&'a str, String> {
    event
        .get(key)
        .ok_or(format!("No '{}' column found in event.", key))?
        .as_str()
        .ok_or(format!("Field '{}' of event is no string.", key))
}

//! Batch conversion of the LocalMeet source data into the static files served by the web app.
//!
//! Two independent pipelines live in this crate:
//! * [`events`] turns a CSV listing of events into one JSON document per event, sorted into a
//!   `data/events/<year>/<month>/` directory tree.
//! * [`postcodes`] filters a national postcode geodata dataset down to a list of postcode areas and
//!   emits the result as a PHP or JavaScript data literal plus a sorted CSV file.

pub mod error;
pub mod events;
pub mod io;
pub mod postcodes;

pub use error::Error;

/// One event, as read from a CSV row and enriched by [`events::enrich_event`].
///
/// Keys keep their insertion order (CSV header order first, then the bookkeeping fields), so the
/// serialized JSON documents list the fields in a stable order.
pub type EventRecord = serde_json::Map<String, serde_json::Value>;

/// A single postcode with its coordinates, as retained by the postcode filter.
///
/// Latitude and longitude are kept as the exact strings found in the dataset. They are copied
/// verbatim into the generated code literals, so no float formatting can change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcodeEntry {
    pub postcode: String,
    pub latitude: String,
    pub longitude: String,
}

impl PostcodeEntry {
    /// Plain `postcode,latitude,longitude` representation, as written to the subset CSV file.
    pub fn csv_line(&self) -> String {
        format!("{},{},{}", self.postcode, self.latitude, self.longitude)
    }
}

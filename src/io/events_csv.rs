//! Reading the event listing CSV file.

use crate::EventRecord;
use serde_json::Value;

/// Key of the list of fields beyond the last header column
pub const SURPLUS_FIELDS_KEY: &str = "null";

/// Read all event rows from a CSV file with a header row.
///
/// The header row defines the keys of the resulting records. Every cell is stored as a JSON
/// string, without any type inference, and columns unknown to the converter are passed through
/// unchanged.
///
/// Rows do not need to have as many fields as the header row. Header keys without a field in a row
/// are set to `null`. Surplus fields of a row are collected in a list under the key
/// [`SURPLUS_FIELDS_KEY`].
///
/// # Errors
///
/// Fails with a string error message to be displayed to the user, if the CSV data is malformed
/// (e.g. invalid UTF-8 or unbalanced quotes).
pub fn read<R: std::io::Read>(reader: R) -> Result<Vec<EventRecord>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| format!("Could not read CSV header: {}", e))?
        .clone();

    let mut events = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        // Row numbers as seen in a spreadsheet: header is row 1
        let row = row.map_err(|e| format!("Could not read CSV row {}: {}", i + 2, e))?;
        let mut event: EventRecord = headers
            .iter()
            .enumerate()
            .map(|(j, key)| {
                let value = row
                    .get(j)
                    .map_or(Value::Null, |v| Value::String(v.to_owned()));
                (key.to_owned(), value)
            })
            .collect();
        if row.len() > headers.len() {
            let surplus = row
                .iter()
                .skip(headers.len())
                .map(|v| Value::String(v.to_owned()))
                .collect();
            event.insert(SURPLUS_FIELDS_KEY.to_owned(), Value::Array(surplus));
        }
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    #[test]
    fn parse_events_file() {
        let data = include_bytes!("test_ressources/events.csv");
        let events = super::read(&data[..]).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["title"], json!("Summer Fête"));
        assert_eq!(events[0]["date"], json!("2024/07/13"));
        assert_eq!(events[0]["time"], json!("14:00"));
        assert_eq!(events[0]["categoryTags"], json!("Music, Outdoors,  "));
        // Quoted cells containing commas stay one field
        assert_eq!(events[1]["location"], json!("Village Hall, Church Lane"));
        // Pass-through columns are kept as strings, no number inference
        assert_eq!(events[2]["cost"], json!("5"));
    }

    #[test]
    fn keys_keep_header_order() {
        let data = "title,date,time,categoryTags,groupTags,cost\nA,2024/01/02,10:00,,,0\n";
        let events = super::read(data.as_bytes()).unwrap();

        let keys: Vec<&str> = events[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["title", "date", "time", "categoryTags", "groupTags", "cost"]
        );
    }

    #[test]
    fn header_only_gives_no_events() {
        let data = "title,date,time,categoryTags,groupTags\n";
        let events = super::read(data.as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn short_row_gives_null_fields() {
        let data = "title,date,time,categoryTags,groupTags,description\n\
                    A,2024/01/02,10:00,x,y,Desc\n\
                    B,2024/01/03,11:00,x,y\n";
        let events = super::read(data.as_bytes()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["description"], json!("Desc"));
        assert_eq!(events[1]["groupTags"], json!("y"));
        assert_eq!(events[1]["description"], Value::Null);
        assert_eq!(events[1].len(), 6);
    }

    #[test]
    fn long_row_keeps_surplus_fields() {
        let data = "title,date,time\nA,2024/01/02,10:00,extra,more\n";
        let events = super::read(data.as_bytes()).unwrap();

        assert_eq!(events[0]["time"], json!("10:00"));
        assert_eq!(events[0][super::SURPLUS_FIELDS_KEY], json!(["extra", "more"]));
        let keys: Vec<&str> = events[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "date", "time", "null"]);
    }

    #[test]
    fn malformed_utf8_error() {
        let data = b"title,date\nA,\xff\xfe\n";
        let result = super::read(&data[..]);
        assert!(result.is_err());
        assert!(result.err().unwrap().contains("row 2"));
    }
}

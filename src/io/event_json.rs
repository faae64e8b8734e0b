//! Writing enriched events as standalone JSON documents.

use crate::EventRecord;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write one event as a JSON document to a Writer (e.g. an output file).
///
/// The document is indented with four spaces. Non-ASCII characters are written literally (UTF-8),
/// not as `\u` escapes. No trailing newline is appended.
pub fn write<W: std::io::Write>(writer: W, event: &EventRecord) -> Result<(), String> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    event
        .serialize(&mut serializer)
        .map_err(|e| format!("{}", e))?;

    Ok(())
}

/// Write one event into the file `file_name` within `dir`.
///
/// `dir` is created recursively if it does not exist yet. An existing file of the same name is
/// overwritten. Returns the full path of the written file.
pub fn write_file(dir: &Path, file_name: &str, event: &EventRecord) -> Result<PathBuf, String> {
    if !dir.is_dir() {
        debug!("Creating directory {}", dir.display());
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Could not create directory {}: {}", dir.display(), e))?;

    let path = dir.join(file_name);
    let file = std::fs::File::create(&path)
        .map_err(|e| format!("Could not create file {}: {}", path.display(), e))?;
    let mut writer = std::io::BufWriter::new(file);
    write(&mut writer, event).map_err(|e| format!("Could not write {}: {}", path.display(), e))?;
    std::io::Write::flush(&mut writer)
        .map_err(|e| format!("Could not write {}: {}", path.display(), e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::EventRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn example_event() -> EventRecord {
        let value = json!({
            "title": "Summer Fête",
            "categoryTags": ["Music", "Outdoors"],
            "registeredUsers": [],
            "isCancelled": false,
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn write_indented_utf8() {
        let mut buffer = Vec::<u8>::new();
        super::write(&mut buffer, &example_event()).unwrap();

        let expected = "{\n    \"title\": \"Summer Fête\",\n    \"categoryTags\": [\n        \"Music\",\n        \"Outdoors\"\n    ],\n    \"registeredUsers\": [],\n    \"isCancelled\": false\n}";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn write_file_creates_directories_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data").join("events").join("2024").join("07");

        let path = super::write_file(&dir, "13_summer_fête.json", &example_event()).unwrap();
        assert_eq!(path, dir.join("13_summer_fête.json"));
        assert!(path.is_file());

        // Second write with other content replaces the file; existing directory is no error
        let mut event = example_event();
        event.insert("isCancelled".to_owned(), json!(true));
        super::write_file(&dir, "13_summer_fête.json", &event).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["isCancelled"], json!(true));
    }

    #[test]
    fn write_file_into_unwritable_location() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = tmp.path().join("data");
        std::fs::write(&blocker, "").unwrap();

        let result = super::write_file(&blocker.join("events"), "x.json", &example_event());
        assert!(result.is_err());
        assert!(result.err().unwrap().contains("Could not create directory"));
    }
}

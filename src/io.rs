//! Reading and writing of the file formats handled by the converters.

pub mod code_literal;
pub mod event_json;
pub mod events_csv;
pub mod postcodes_csv;

use std::fs::File;
use std::path::Path;

/// Open an input file for reading, with an error message naming the file.
pub fn open_input(path: &Path) -> Result<File, String> {
    File::open(path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Create (or truncate) an output file, with an error message naming the file.
pub fn create_output(path: &Path) -> Result<File, String> {
    File::create(path).map_err(|e| format!("{}: {}", path.display(), e))
}

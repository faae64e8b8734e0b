//! The postcode filter: reduces the national postcode geodata dataset (Open Postcode Geo) to the
//! postcodes of a few postcode areas, and emits them as a data literal for the web app's PHP or
//! JavaScript code and as a sorted CSV file.
//!
//! The dataset is processed line by line as plain comma separated text. Only the postcode (field
//! 0), the latitude (field 7) and the longitude (field 8) are used.

use crate::io::code_literal::{self, OutputLanguage};
use crate::io::postcodes_csv;
use crate::{Error, PostcodeEntry};
use log::{debug, info};
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Postcode areas kept by default: the area around Ware, Hertford and Harlow
pub const DEFAULT_AREAS: [&str; 10] = [
    "SG9", "SG10", "SG11", "SG12", "SG13", "SG14", "EN11", "CM20", "CM21", "CM23",
];

/// Index of the postcode field in a dataset line
const POSTCODE_FIELD: usize = 0;
/// Index of the latitude field in a dataset line
const LATITUDE_FIELD: usize = 7;
/// Index of the longitude field in a dataset line
const LONGITUDE_FIELD: usize = 8;

/// The default allow-list as owned strings
pub fn default_areas() -> Vec<String> {
    DEFAULT_AREAS.iter().map(|a| a.to_string()).collect()
}

/// Paths and filter settings of one run of the postcode filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcodesConfig {
    /// The Open Postcode Geo CSV file
    pub input: PathBuf,
    /// Language of the generated literal file
    pub language: OutputLanguage,
    /// Allow-list of postcode areas
    pub areas: Vec<String>,
    /// Path of the generated literal file
    pub literal_output: PathBuf,
    /// Path of the sorted subset CSV file
    pub csv_output: PathBuf,
}

impl PostcodesConfig {
    /// Default layout of the LocalMeet project relative to the project root `base`: read
    /// `.data/open_postcode_geo.csv`, write `data/location/postcodes.php` (or `postCodes.js`) and
    /// `.data/postcodes_subset.csv`.
    pub fn from_base(base: &Path, language: OutputLanguage) -> Self {
        PostcodesConfig {
            input: base.join(".data").join("open_postcode_geo.csv"),
            language,
            areas: default_areas(),
            literal_output: base
                .join("data")
                .join("location")
                .join(language.default_file_name()),
            csv_output: base.join(".data").join("postcodes_subset.csv"),
        }
    }
}

/// Result of a successful postcode filter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcodeSummary {
    /// Number of postcodes written to both output files
    pub kept: usize,
    pub literal_path: PathBuf,
    pub csv_path: PathBuf,
}

/// The postcode area part of a dataset line, used for matching against the allow-list.
///
/// This is the first four characters of the line (ignoring an opening quote), with trailing
/// whitespace removed, so that `SG9 1AA` yields `SG9` and `SG10 1AA` yields `SG10`.
pub fn area_prefix(line: &str) -> &str {
    let line = line.strip_prefix('"').unwrap_or(line);
    let end = line
        .char_indices()
        .nth(4)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    line[..end].trim_end()
}

/// Interpret a single line of the dataset.
///
/// Returns `Ok(None)` if the line is not in one of the `areas` or if one of its coordinates is not
/// available (the dataset uses `\N` for that). The area check happens before the line is split.
///
/// # Errors
///
/// Fails with a string error message if a line of a matching area has less than 9 fields.
pub fn parse_line(line: &str, areas: &[String]) -> Result<Option<PostcodeEntry>, String> {
    let prefix = area_prefix(line);
    if !areas.iter().any(|a| a == prefix) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() <= LONGITUDE_FIELD {
        return Err(format!(
            "Expected at least {} fields, found {}.",
            LONGITUDE_FIELD + 1,
            fields.len()
        ));
    }
    let postcode = fields[POSTCODE_FIELD].trim_matches('"');
    let latitude = fields[LATITUDE_FIELD].trim_matches('"');
    let longitude = fields[LONGITUDE_FIELD].trim_matches('"');

    if latitude.contains('N') || longitude.contains('N') {
        debug!("Skipping postcode {} without coordinates", postcode);
        return Ok(None);
    }

    Ok(Some(PostcodeEntry {
        postcode: postcode.to_owned(),
        latitude: latitude.to_owned(),
        longitude: longitude.to_owned(),
    }))
}

/// Read the dataset line by line from a Reader and keep all postcodes of the given areas which
/// have coordinates. The postcodes are returned in dataset order.
pub fn filter_postcodes<R: BufRead>(
    reader: R,
    areas: &[String],
) -> Result<Vec<PostcodeEntry>, String> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Could not read line {}: {}", i + 1, e))?;
        if let Some(entry) = parse_line(&line, areas).map_err(|e| format!("Line {}: {}", i + 1, e))?
        {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// The `postcode,latitude,longitude` lines of all entries, sorted lexicographically by the whole
/// line.
pub fn sorted_csv_lines(entries: &[PostcodeEntry]) -> Vec<String> {
    let mut lines: Vec<String> = entries.iter().map(PostcodeEntry::csv_line).collect();
    lines.sort();
    lines
}

/// Run the postcode filter with the given configuration: filter the dataset, write the literal
/// file and the sorted subset CSV file. Both output files are overwritten, their directories must
/// exist.
pub fn convert_postcodes(config: &PostcodesConfig) -> Result<PostcodeSummary, Error> {
    let file = crate::io::open_input(&config.input).map_err(Error::NoInput)?;
    let entries =
        filter_postcodes(BufReader::new(file), &config.areas).map_err(Error::Input)?;
    info!(
        "Kept {} postcodes of the areas {}",
        entries.len(),
        config.areas.join(", ")
    );

    let literal_file = crate::io::create_output(&config.literal_output).map_err(Error::Output)?;
    code_literal::write(
        BufWriter::new(literal_file),
        config.language,
        &config.areas,
        &entries,
    )
    .map_err(|e| Error::Output(format!("{}: {}", config.literal_output.display(), e)))?;

    let csv_file = crate::io::create_output(&config.csv_output).map_err(Error::Output)?;
    postcodes_csv::write(BufWriter::new(csv_file), &sorted_csv_lines(&entries))
        .map_err(|e| Error::Output(format!("{}: {}", config.csv_output.display(), e)))?;

    Ok(PostcodeSummary {
        kept: entries.len(),
        literal_path: config.literal_output.clone(),
        csv_path: config.csv_output.clone(),
    })
}

//! Writing the plain `postcode,latitude,longitude` subset CSV file.

/// Write the given lines as plain CSV file, each line terminated by `\n`.
///
/// The lines are written as they are, without quoting.
pub fn write<W: std::io::Write>(mut writer: W, lines: &[String]) -> Result<(), String> {
    for line in lines {
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| format!("{}", e))?;
    }
    writer.flush().map_err(|e| format!("{}", e))?;

    Ok(())
}

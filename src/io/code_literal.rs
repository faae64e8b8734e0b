//! IO functionality for emitting the filtered postcodes as a PHP or JavaScript source file.
//!
//! Both source languages are produced by the same emitter. The languages only differ in the
//! syntax tokens of [`LiteralSyntax`].

use crate::PostcodeEntry;
use std::fmt::Write;
use std::str::FromStr;

/// Target language of the generated code literal file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLanguage {
    Php,
    Js,
}

impl OutputLanguage {
    /// Syntax tokens used to render a literal file in this language
    pub fn syntax(self) -> &'static LiteralSyntax {
        match self {
            OutputLanguage::Php => &PHP_SYNTAX,
            OutputLanguage::Js => &JS_SYNTAX,
        }
    }

    /// File name of the literal file within `data/location/`, as expected by the web app
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputLanguage::Php => "postcodes.php",
            OutputLanguage::Js => "postCodes.js",
        }
    }
}

impl FromStr for OutputLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "php" => Ok(OutputLanguage::Php),
            "js" => Ok(OutputLanguage::Js),
            _ => Err(format!(
                "Unknown output language '{}'. Expected 'php' or 'js'.",
                s
            )),
        }
    }
}

/// The syntax tokens of one target language
#[derive(Debug)]
pub struct LiteralSyntax {
    /// Everything before the list of postcode areas
    pub areas_open: &'static str,
    /// Everything between the list of postcode areas and the first postcode entry
    pub areas_close: &'static str,
    /// Separator between the quoted postcode and its coordinate pair
    pub entry_separator: &'static str,
    /// Everything after the last postcode entry
    pub footer: &'static str,
}

pub static PHP_SYNTAX: LiteralSyntax = LiteralSyntax {
    areas_open: "<?php\n$postCodeAreas = [",
    areas_close: "];\n$postCodes = [\n",
    entry_separator: " => ",
    footer: "];\n?>\n",
};

pub static JS_SYNTAX: LiteralSyntax = LiteralSyntax {
    areas_open: "const postCodeAreas = [",
    areas_close: "];\nconst postCodes = {\n",
    entry_separator: ": ",
    footer: "};\n\nmodule.exports = { postCodeAreas, postCodes };\n",
};

impl LiteralSyntax {
    /// Render a single `'postcode' => [lat, lon],` (or `'postcode': [lat, lon],`) line, without
    /// indentation and newline.
    pub fn entry(&self, entry: &PostcodeEntry) -> String {
        format!(
            "'{}'{}[{}, {}],",
            entry.postcode, self.entry_separator, entry.latitude, entry.longitude
        )
    }
}

/// Render the complete literal file: the list of postcode areas followed by the mapping of each
/// postcode to its `[latitude, longitude]` pair. Entries are emitted in the given order.
pub fn render(syntax: &LiteralSyntax, areas: &[String], entries: &[PostcodeEntry]) -> String {
    let mut result = String::new();
    result.push_str(syntax.areas_open);
    result.push_str(
        &areas
            .iter()
            .map(|a| format!("'{}'", a))
            .collect::<Vec<String>>()
            .join(", "),
    );
    result.push_str(syntax.areas_close);
    for entry in entries {
        writeln!(result, "  {}", syntax.entry(entry)).unwrap();
    }
    result.push_str(syntax.footer);
    result
}

/// Write the literal file for `language` to a Writer (e.g. an output file).
pub fn write<W: std::io::Write>(
    mut writer: W,
    language: OutputLanguage,
    areas: &[String],
    entries: &[PostcodeEntry],
) -> Result<(), String> {
    writer
        .write_all(render(language.syntax(), areas, entries).as_bytes())
        .map_err(|e| format!("{}", e))?;
    writer.flush().map_err(|e| format!("{}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::OutputLanguage;
    use crate::PostcodeEntry;
    use pretty_assertions::assert_eq;

    fn entry(postcode: &str, latitude: &str, longitude: &str) -> PostcodeEntry {
        PostcodeEntry {
            postcode: postcode.to_owned(),
            latitude: latitude.to_owned(),
            longitude: longitude.to_owned(),
        }
    }

    fn areas() -> Vec<String> {
        vec!["SG9".to_owned(), "CM20".to_owned()]
    }

    #[test]
    fn entry_syntax() {
        let e = entry("CM20 1AA", "51.771744", "0.093959");
        assert_eq!(
            OutputLanguage::Php.syntax().entry(&e),
            "'CM20 1AA' => [51.771744, 0.093959],"
        );
        assert_eq!(
            OutputLanguage::Js.syntax().entry(&e),
            "'CM20 1AA': [51.771744, 0.093959],"
        );
    }

    #[test]
    fn render_php() {
        let entries = vec![
            entry("CM20 1AB", "51.76817", "0.095332"),
            entry("CM20 1AA", "51.771744", "0.093959"),
        ];
        let result = super::render(OutputLanguage::Php.syntax(), &areas(), &entries);
        assert_eq!(
            result,
            "<?php\n\
             $postCodeAreas = ['SG9', 'CM20'];\n\
             $postCodes = [\n  \
             'CM20 1AB' => [51.76817, 0.095332],\n  \
             'CM20 1AA' => [51.771744, 0.093959],\n\
             ];\n\
             ?>\n"
        );
    }

    #[test]
    fn render_js() {
        let entries = vec![entry("CM20 1AA", "51.771744", "0.093959")];
        let result = super::render(OutputLanguage::Js.syntax(), &areas(), &entries);
        assert_eq!(
            result,
            "const postCodeAreas = ['SG9', 'CM20'];\n\
             const postCodes = {\n  \
             'CM20 1AA': [51.771744, 0.093959],\n\
             };\n\
             \n\
             module.exports = { postCodeAreas, postCodes };\n"
        );
    }

    #[test]
    fn render_without_entries() {
        let result = super::render(OutputLanguage::Php.syntax(), &areas(), &[]);
        assert_eq!(
            result,
            "<?php\n$postCodeAreas = ['SG9', 'CM20'];\n$postCodes = [\n];\n?>\n"
        );
    }

    #[test]
    fn parse_language() {
        assert_eq!("php".parse::<OutputLanguage>(), Ok(OutputLanguage::Php));
        assert_eq!("js".parse::<OutputLanguage>(), Ok(OutputLanguage::Js));
        assert!("python".parse::<OutputLanguage>().is_err());
        assert_eq!(OutputLanguage::Js.default_file_name(), "postCodes.js");
    }
}

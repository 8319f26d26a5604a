//! File processing API
//!
//! Acquisition happens once, up front: the whole document is read into memory by
//! [`load_document`]. The extraction pass then runs over it and every match is written
//! to the sink as soon as it is found.
//!
//! ```rust,ignore
//! use pkfield::config::Settings;
//! use pkfield::processor::process_file;
//!
//! let stdout = std::io::stdout();
//! let written = process_file("records.txt", &Settings::default(), &mut stdout.lock())?;
//! ```

use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::extraction::{extractions, Markers};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// How extracted values are written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The value verbatim, one per line.
    #[default]
    Plain,
    /// One `{"line": N, "value": "..."}` object per line.
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
        }
    }

    pub fn available() -> &'static [OutputFormat] {
        &[OutputFormat::Plain, OutputFormat::Json]
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the whole document at `path`.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ProcessingError::DocumentUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded document");
    Ok(text)
}

/// Run the extraction pass over `text`, writing each match to `sink` in line order.
///
/// Returns the number of values written.
pub fn write_extractions<W: Write + ?Sized>(
    text: &str,
    markers: &Markers,
    format: OutputFormat,
    sink: &mut W,
) -> Result<usize> {
    let mut written = 0;
    for extraction in extractions(text, markers) {
        match format {
            OutputFormat::Plain => writeln!(sink, "{}", extraction.value)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *sink, &extraction)?;
                writeln!(sink)?;
            }
        }
        written += 1;
    }
    sink.flush()?;

    tracing::debug!(
        lines = text.split('\n').count(),
        extracted = written,
        format = %format,
        "Extraction finished"
    );
    Ok(written)
}

/// Load the document at `path` and write its fields to `sink` according to `settings`.
pub fn process_file<P: AsRef<Path>, W: Write + ?Sized>(
    path: P,
    settings: &Settings,
    sink: &mut W,
) -> Result<usize> {
    let text = load_document(path)?;
    write_extractions(&text, &settings.markers, settings.output.format, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_extractions(text, &Markers::default(), format, &mut out).expect("write to Vec");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ProcessingError::InvalidFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn test_output_format_round_trips_through_display() {
        for format in OutputFormat::available() {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_plain_output() {
        let out = render("1p: a k:b\nxp: c k:d\n2p: e k:f", OutputFormat::Plain);
        insta::assert_snapshot!(out.trim_end(), @r###"
        a
        e
        "###);
    }

    #[test]
    fn test_plain_output_keeps_empty_values() {
        let out = render("1p: k:\n2p: x k:", OutputFormat::Plain);
        assert_eq!(out, "\nx\n");
    }

    #[test]
    fn test_json_output() {
        let out = render("header\n1p: a \"q\" k:\n3p: b k:", OutputFormat::Json);
        insta::assert_snapshot!(out.trim_end(), @r###"
        {"line":2,"value":"a \"q\""}
        {"line":3,"value":"b"}
        "###);
    }

    #[test]
    fn test_no_matches_writes_nothing() {
        let mut out = Vec::new();
        let written =
            write_extractions("a\nb\n", &Markers::default(), OutputFormat::Plain, &mut out)
                .unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_process_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10p: ten k:\nskip\n20p: twenty k: end\n").unwrap();

        let mut out = Vec::new();
        let written = process_file(file.path(), &Settings::default(), &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "ten\ntwenty\n");
    }

    #[test]
    fn test_process_missing_file() {
        let mut out = Vec::new();
        let err = process_file("/nonexistent/input.txt", &Settings::default(), &mut out)
            .unwrap_err();
        assert!(matches!(err, ProcessingError::DocumentUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/input.txt"));
        assert!(out.is_empty());
    }
}

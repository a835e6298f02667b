//! The flat file format:
//!
//! ```text
//! Ciudad,Fecha,Temperatura
//! Madrid,01/06/2024,28.5
//! Sevilla,01/06/2024,33.2
//! ```
//!
//! There is no quoting: a city containing a `,` splits into too many fields
//! and its line gets skipped.

use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    num::ParseFloatError,
    path::{Path, PathBuf},
};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::record::Record;

pub const HEADER: &str = "Ciudad,Fecha,Temperatura";
pub const DELIMITER: char = ',';

/// A temperature that isn't a number aborts the whole load.
#[derive(Debug, Error, Diagnostic)]
#[error("Malformed temperature `{value}` on line {line}")]
#[diagnostic(
    code(temperaturas::csv::malformed),
    help("temperatures are decimal numbers with a `.` separator, like `28.5`")
)]
pub struct MalformedFile {
    /// 1-based
    pub line: usize,
    pub value: String,
    #[source]
    pub source: ParseFloatError,
    #[source_code]
    src: NamedSource<String>,
    #[label("not a number")]
    span: SourceSpan,
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileError {
    #[error("Could not read {}: {source}", path.display())]
    #[diagnostic(code(temperaturas::io::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not write {}: {source}", path.display())]
    #[diagnostic(code(temperaturas::io::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No file to save to")]
    #[diagnostic(code(temperaturas::io::no_path), help("save to an explicit path first"))]
    NoPath,
    #[error(transparent)]
    #[diagnostic(transparent)]
    Malformed(#[from] MalformedFile),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub records: Vec<Record>,
    /// Lines dropped for not holding exactly three fields, or for a blank
    /// city or date.
    pub skipped: usize,
}

pub fn parse(text: &str) -> Result<Parsed, MalformedFile> {
    parse_named("input", text)
}

fn parse_named(name: &str, text: &str) -> Result<Parsed, MalformedFile> {
    let mut lines = text.lines().enumerate().peekable();
    if lines
        .next_if(|(_, line)| line.trim().eq_ignore_ascii_case(HEADER))
        .is_some()
    {
        log::debug!("{name}: skipping header");
    }

    let mut parsed = Parsed::default();
    for (index, line) in lines {
        let fields = split(line);
        let [city, date, temperature] = fields.as_slice() else {
            log::debug!(
                "{name}:{}: expected 3 fields, found {}",
                index + 1,
                fields.len()
            );
            parsed.skipped += 1;
            continue;
        };

        let value = temperature.trim();
        let temperature = value.parse::<f64>().map_err(|source| MalformedFile {
            line: index + 1,
            value: value.to_string(),
            source,
            src: NamedSource::new(name, text.to_string()),
            span: (offset_in(text, value), value.len()).into(),
        })?;

        let (city, date) = (city.trim(), date.trim());
        if city.is_empty() || date.is_empty() {
            log::debug!("{name}:{}: blank city or date", index + 1);
            parsed.skipped += 1;
            continue;
        }

        parsed.records.push(Record::new(city, date, temperature));
    }

    Ok(parsed)
}

/// Splits on the delimiter and drops trailing empty fields, `a,b,` is two
/// fields.
fn split(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(DELIMITER).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

// `part` must be a subslice of `text`
fn offset_in(text: &str, part: &str) -> usize {
    part.as_ptr() as usize - text.as_ptr() as usize
}

/// Serialized form of a sequence of records, header included.
pub struct Csv<'a>(pub &'a [Record]);

impl fmt::Display for Csv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for record in self.0 {
            writeln!(
                f,
                "{}{DELIMITER}{}{DELIMITER}{}",
                record.city, record.date, record.temperature
            )?;
        }
        Ok(())
    }
}

pub fn serialize(records: &[Record]) -> String {
    Csv(records).to_string()
}

pub fn load(path: impl AsRef<Path>) -> Result<Parsed, FileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_named(&path.display().to_string(), &text)?;
    log::info!(
        "loaded {} records from {} ({} lines skipped)",
        parsed.records.len(),
        path.display(),
        parsed.skipped
    );
    Ok(parsed)
}

pub fn save(path: impl AsRef<Path>, records: &[Record]) -> Result<(), FileError> {
    let path = path.as_ref();
    let write_error = |source: io::Error| FileError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = BufWriter::new(File::create(path).map_err(write_error)?);
    write!(file, "{}", Csv(records)).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    log::info!("saved {} records to {}", records.len(), path.display());
    Ok(())
}

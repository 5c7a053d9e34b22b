//! Dataset loading from CSV, TSV and JSON record files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use clap::ValueEnum;
use csv::{ReaderBuilder, Trim};
use datasnap_core::{CellValue, Dataset};
use serde_json::Value;

/// Supported dataset file formats
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Tab-separated values with a header row
    Tsv,
    /// A JSON array of flat objects
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load a dataset, using `format` or the file extension to pick a parser.
pub fn load_dataset(path: &Path, format: Option<InputFormat>) -> Result<Dataset> {
    let format = match format.or_else(|| InputFormat::detect(path)) {
        Some(format) => format,
        None => bail!(
            "Cannot detect the format of {}; pass --input-format csv|tsv|json",
            path.display()
        ),
    };

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let dataset = match format {
        InputFormat::Csv => read_delimited(reader, b','),
        InputFormat::Tsv => read_delimited(reader, b'\t'),
        InputFormat::Json => read_json(reader),
    }
    .with_context(|| format!("Failed to load dataset from {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "dataset loaded"
    );

    Ok(dataset)
}

/// Parse delimited text with a header row. Cells are kept as raw text so the
/// engine's coercion rules apply uniformly.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(str::to_string)
        .collect();
    let mut dataset = Dataset::new(headers)?;

    for (index, record) in rdr.records().enumerate() {
        // header is line 1
        let record = record.with_context(|| format!("Malformed record at line {}", index + 2))?;
        dataset.push_row(record.iter().map(CellValue::from_raw))?;
    }

    Ok(dataset)
}

/// Parse a JSON array of objects into a dataset.
pub fn read_json<R: Read>(reader: R) -> Result<Dataset> {
    let value: Value = serde_json::from_reader(reader).context("Invalid JSON")?;

    let Value::Array(items) = value else {
        bail!("Expected a JSON array of records");
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            bail!("Record {} is not a JSON object", index);
        };
        records.push(
            map.into_iter()
                .map(|(key, value)| (key, json_cell(value)))
                .collect::<Vec<_>>(),
        );
    }

    Ok(Dataset::from_records(records)?)
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
        Value::String(s) => CellValue::from_raw(&s),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(nested.to_string()),
    }
}

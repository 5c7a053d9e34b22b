use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{AnalysisError, Result};

/// A single raw cell as handed over by the upload/parse layer.
///
/// Upstream typing is not trusted: a `Text` cell holding `"12.5"` is as
/// numeric as a `Number(12.5)` cell once it goes through [`CellValue::as_f64`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a cell from raw text, mapping the empty string to `Empty`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Numeric coercion shared by every extractor.
    ///
    /// Returns `None` for empty cells, blank text, text that does not parse
    /// as a float, and non-finite values (`NaN`, `inf`).
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Empty => return None,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };

        value.is_finite().then_some(value)
    }

    /// Empty cells and whitespace-only text count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Trimmed display text used as a category label, `None` when blank.
    pub fn label(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::Number(n) if n.is_nan() => return None,
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        };

        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_raw(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// In-memory tabular data: insertion-ordered column names plus rows whose
/// values are aligned with those columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(AnalysisError::Validation(format!(
                    "Duplicate column name '{}'",
                    column
                )));
            }
        }

        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a dataset from records of `(column, value)` pairs.
    ///
    /// Columns are the union of all record keys in order of first
    /// appearance; a record that lacks a column gets `Empty` there.
    pub fn from_records<R, K, V>(records: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut collected: Vec<Vec<(usize, CellValue)>> = Vec::new();

        for record in records {
            let mut cells = Vec::new();
            for (key, value) in record {
                let key = key.into();
                let index = match columns.iter().position(|c| *c == key) {
                    Some(index) => index,
                    None => {
                        columns.push(key);
                        columns.len() - 1
                    }
                };
                cells.push((index, value.into()));
            }
            collected.push(cells);
        }

        let width = columns.len();
        let mut dataset = Self::new(columns)?;
        for cells in collected {
            let mut row = vec![CellValue::Empty; width];
            for (index, value) in cells {
                row[index] = value;
            }
            dataset.rows.push(row);
        }

        Ok(dataset)
    }

    pub fn push_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let row: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(AnalysisError::Validation(format!(
                "Row has {} values but dataset has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column in row order.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a CellValue> + 'a> {
        let index = self
            .column_index(name)
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }
}

use datasnap_core::{Dataset, Result};

/// Numeric values of `column` in row order.
///
/// Cells that fail [`CellValue::as_f64`](datasnap_core::CellValue::as_f64)
/// are dropped, so the result may be shorter than the row count or empty.
/// Callers check the length against their own minimum.
pub fn extract_numeric(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    let values: Vec<f64> = dataset
        .column_values(column)?
        .filter_map(|cell| cell.as_f64())
        .collect();

    tracing::debug!(
        column,
        rows = dataset.row_count(),
        numeric = values.len(),
        "extracted numeric column"
    );

    Ok(values)
}

/// Like [`extract_numeric`] but keeps the originating row index.
pub fn extract_indexed(dataset: &Dataset, column: &str) -> Result<Vec<(usize, f64)>> {
    Ok(dataset
        .column_values(column)?
        .enumerate()
        .filter_map(|(row, cell)| cell.as_f64().map(|v| (row, v)))
        .collect())
}

/// Row-wise pairs where both cells coerce to numbers.
pub fn extract_pairs(dataset: &Dataset, first: &str, second: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = dataset
        .column_values(first)?
        .zip(dataset.column_values(second)?)
        .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
        .unzip();

    tracing::debug!(
        first,
        second,
        rows = dataset.row_count(),
        pairs = xs.len(),
        "extracted complete pairs"
    );

    Ok((xs, ys))
}

//! CSV dataset loading and coordinate round-tripping
//!
//! Expects one row per point with numeric `x` and `y` columns and a
//! categorical `Cell type` column. Every remaining column that parses as
//! numeric on all rows becomes a continuous marker attachment; other extra
//! columns are ignored.

use std::path::Path;

use crate::io::configuration::{COLUMN_CELL_TYPE, COLUMN_X, COLUMN_Y};
use crate::io::error::{AnalysisError, Result, data_format};
use crate::spatial::labels::{CategoricalLabel, ContinuousLabel, Domain, LabelAttachment};
use crate::spatial::points::PointSet;

/// Load a labelled domain from a CSV file
///
/// The domain is named after the file stem and its boundary is inferred as
/// the bounding box of the loaded points.
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read, `DataFormat` if a
/// required column is missing or holds an unparseable value, and
/// `InvalidSourceData` for empty or degenerate point sets
pub fn load_domain(path: &Path) -> Result<Domain> {
    let contents = std::fs::read_to_string(path).map_err(|e| AnalysisError::FileSystem {
        path: path.to_path_buf(),
        operation: "read CSV",
        source: e,
    })?;

    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
    let header_line = lines
        .next()
        .ok_or_else(|| data_format(&"<header>", &"file is empty"))?;
    let header = split_record(header_line);

    let x_column = column_index(&header, COLUMN_X)?;
    let y_column = column_index(&header, COLUMN_Y)?;
    let type_column = column_index(&header, COLUMN_CELL_TYPE)?;

    let mut coordinates = Vec::new();
    let mut cell_types = Vec::new();
    let mut extra_columns: Vec<(usize, String, Vec<f64>, bool)> = header
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != x_column && index != y_column && index != type_column)
        .map(|(index, name)| (index, name.clone(), Vec::new(), true))
        .collect();

    for (row_number, line) in lines.enumerate() {
        let record = split_record(line);

        let x = parse_coordinate(&record, x_column, COLUMN_X, row_number)?;
        let y = parse_coordinate(&record, y_column, COLUMN_Y, row_number)?;
        coordinates.push([x, y]);

        let cell_type = record.get(type_column).ok_or_else(|| {
            data_format(
                &COLUMN_CELL_TYPE,
                &format!("row {row_number} has no value in this column"),
            )
        })?;
        cell_types.push(cell_type.clone());

        for (index, _, values, parses) in &mut extra_columns {
            if !*parses {
                continue;
            }
            match record.get(*index).map(|value| value.trim().parse::<f64>()) {
                Some(Ok(value)) => values.push(value),
                _ => *parses = false,
            }
        }
    }

    let points = PointSet::new(coordinates)?;
    let mut domain = Domain::new(file_stem(path), points, None)?;

    domain.attach_label(
        COLUMN_CELL_TYPE,
        LabelAttachment::Categorical(CategoricalLabel::from_values(&cell_types)),
    )?;

    for (_, name, values, parses) in extra_columns {
        if parses {
            domain.attach_label(
                name,
                LabelAttachment::Continuous(ContinuousLabel::from_values(values)),
            )?;
        }
    }

    Ok(domain)
}

/// Write a domain's coordinates back out as CSV
///
/// Values are formatted with Rust's shortest round-trip representation, so
/// reloading reproduces the original `(x, y)` pairs exactly.
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_coordinates(domain: &Domain, path: &Path) -> Result<()> {
    let mut output = String::from("x,y\n");
    for &[x, y] in domain.points().coordinates() {
        output.push_str(&format!("{x},{y}\n"));
    }

    std::fs::write(path, output).map_err(|e| AnalysisError::FileSystem {
        path: path.to_path_buf(),
        operation: "write CSV",
        source: e,
    })
}

// Minimal CSV record splitting with double-quote support
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for character in line.chars() {
        match character {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(character),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

fn column_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| data_format(&name, &"column not present in header"))
}

fn parse_coordinate(
    record: &[String],
    index: usize,
    column: &str,
    row_number: usize,
) -> Result<f64> {
    let raw = record
        .get(index)
        .ok_or_else(|| data_format(&column, &format!("row {row_number} is missing this column")))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| data_format(&column, &format!("row {row_number}: {e}")))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}

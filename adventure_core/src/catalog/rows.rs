//! Delimited row files
//!
//! Every data file is a header row naming the columns followed by one record
//! per line. Fields are separated by `,`, tuple values inside a field by `|`.
//! Trailing commas are tolerated, blank lines and rows starting with `#` are
//! skipped, and rows with the wrong number of fields are skipped with a
//! warning.

use super::CatalogError;
use std::str::FromStr;

/// Field delimiter
pub const DELIMITER: char = ',';
/// Delimiter for tuple values inside a field (`3|5`, `12|-4`)
pub const TUPLE_DELIMITER: char = '|';

/// A parsed data file
#[derive(Debug, Clone)]
pub struct RowTable {
    file: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Row {
    /// 1-based line number in the source file
    line: usize,
    fields: Vec<String>,
}

fn split_line(line: &str) -> Vec<String> {
    line.trim_end()
        .trim_end_matches(DELIMITER)
        .split(DELIMITER)
        .map(|field| field.trim().to_string())
        .collect()
}

impl RowTable {
    /// Parse file content; `file` is only used for error messages
    pub fn parse(file: &str, content: &str) -> Result<Self, CatalogError> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines.next().ok_or_else(|| CatalogError::Empty {
            file: file.to_string(),
        })?;
        let columns = split_line(header);

        let mut rows = Vec::new();
        for (index, line) in lines {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let fields = split_line(line);
            if fields.len() != columns.len() {
                tracing::warn!(
                    "{} line {}: expected {} fields, found {}; skipping",
                    file,
                    index + 1,
                    columns.len(),
                    fields.len()
                );
                continue;
            }
            rows.push(Row {
                line: index + 1,
                fields,
            });
        }

        Ok(RowTable {
            file: file.to_string(),
            columns,
            rows,
        })
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail early if any required column is absent
    pub fn require_columns(&self, required: &[&str]) -> Result<(), CatalogError> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(CatalogError::MissingColumn {
                    file: self.file.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Iterate over the records in file order
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }
}

/// One row of a [`RowTable`], with typed accessors by column name
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a RowTable,
    row: &'a Row,
}

impl<'a> Record<'a> {
    pub fn line(&self) -> usize {
        self.row.line
    }

    pub fn file(&self) -> &'a str {
        &self.table.file
    }

    /// Raw text of a column, or `None` if the file has no such column
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.table
            .columns
            .iter()
            .position(|c| c == column)
            .map(|index| self.row.fields[index].as_str())
    }

    /// Raw text of a required column
    pub fn text(&self, column: &str) -> Result<&'a str, CatalogError> {
        self.get(column).ok_or_else(|| CatalogError::MissingColumn {
            file: self.table.file.clone(),
            column: column.to_string(),
        })
    }

    pub fn invalid(&self, column: &str, value: &str, reason: impl Into<String>) -> CatalogError {
        CatalogError::InvalidValue {
            file: self.table.file.clone(),
            line: self.row.line,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Parse a required column
    pub fn parse<T>(&self, column: &str) -> Result<T, CatalogError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        let value = self.text(column)?;
        value
            .parse::<T>()
            .map_err(|e| self.invalid(column, value, e.to_string()))
    }

    /// Parse an optional column, falling back to `default` when absent or empty
    pub fn parse_or<T>(&self, column: &str, default: T) -> Result<T, CatalogError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        match self.get(column) {
            None => Ok(default),
            Some("") => Ok(default),
            Some(_) => self.parse(column),
        }
    }

    /// Parse a required yes/no column
    pub fn flag(&self, column: &str) -> Result<bool, CatalogError> {
        let value = self.text(column)?;
        parse_flag(value).ok_or_else(|| self.invalid(column, value, "expected yes or no"))
    }

    /// Parse an optional yes/no column
    pub fn flag_or(&self, column: &str, default: bool) -> Result<bool, CatalogError> {
        match self.get(column) {
            None | Some("") => Ok(default),
            Some(_) => self.flag(column),
        }
    }

    /// Parse a `a|b` pair
    pub fn pair<T>(&self, column: &str) -> Result<(T, T), CatalogError>
    where
        T: FromStr,
    {
        let value = self.text(column)?;
        let mut parts = value.split(TUPLE_DELIMITER).map(str::trim);
        let parsed = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => a.parse::<T>().ok().zip(b.parse::<T>().ok()),
            _ => None,
        };
        parsed.ok_or_else(|| {
            self.invalid(
                column,
                value,
                format!("expected two values separated by '{}'", TUPLE_DELIMITER),
            )
        })
    }
}

/// Interpret a yes/no field
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

/// Render a flag the way data files spell it
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

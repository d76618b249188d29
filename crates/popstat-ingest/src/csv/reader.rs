//! CSV file reading for population tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Checks for:
/// - Empty DataFrame (no rows)
/// - Empty column names
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Reads a population CSV into a DataFrame of text columns.
///
/// Schema inference is disabled: sentinel tokens such as `-` must survive
/// until the normalizer decides what they mean, and a numeric column that
/// contains one would otherwise fail to parse.
pub fn read_population_csv(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    clean_header_names(&mut df)?;
    validate_dataframe_shape(&df, path)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded population table"
    );

    Ok(df)
}

/// Trims header names and drops a leading UTF-8 BOM from the first one.
fn clean_header_names(df: &mut DataFrame) -> Result<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    for name in names {
        let cleaned = name.strip_prefix('\u{feff}').unwrap_or(&name).trim();
        if cleaned != name {
            let cleaned = cleaned.to_string();
            df.rename(&name, cleaned.into())?;
        }
    }

    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

//! Pre-validation for bulk client/product uploads
//!
//! Files are checked before they are sent: the extension must be a
//! spreadsheet or CSV, and a CSV must carry every column the import
//! expects in its header row. Spreadsheet contents are left to the import
//! itself.

use crate::core::error::UploadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a bulk upload creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Clientes,
    Productos,
}

impl UploadKind {
    /// Columns the header row must contain
    pub fn required_headers(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Clientes => &["nombre", "cedula", "telefono", "direccion", "cupo_credito"],
            UploadKind::Productos => &["nombre", "precio", "costo", "es_servicio", "unidad_medida"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Clientes => "clientes",
            UploadKind::Productos => "productos",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadKind {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clientes" => Ok(UploadKind::Clientes),
            "productos" => Ok(UploadKind::Productos),
            other => Err(UploadError::UnknownUploadKind {
                name: other.to_string(),
            }),
        }
    }
}

/// Accepted upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xls,
    Xlsx,
    Csv,
}

impl FileKind {
    /// Classify a file by the extension after its last `.`
    pub fn from_file_name(file_name: &str) -> Result<Self, UploadError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(file_name)
            .to_lowercase();

        match extension.as_str() {
            "xls" => Ok(FileKind::Xls),
            "xlsx" => Ok(FileKind::Xlsx),
            "csv" => Ok(FileKind::Csv),
            _ => Err(UploadError::UnsupportedFileType { extension }),
        }
    }
}

/// Check the first line of a CSV against the required columns
///
/// The header row is read as CSV (quoted names included) and each name is
/// trimmed. Every missing column is reported, in the order the import lists
/// them. An unreadable header row counts as empty.
pub fn validate_csv_headers(kind: UploadKind, content: &str) -> Result<(), UploadError> {
    // Spreadsheet exports often start with a UTF-8 BOM
    let text = content.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::debug!(error = %e, "unreadable CSV header row");
            csv::StringRecord::new()
        }
    };

    let missing: Vec<String> = kind
        .required_headers()
        .iter()
        .filter(|required| !headers.iter().any(|header| header == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(UploadError::MissingColumns { columns: missing })
    }
}

/// Validate an upload before sending it
///
/// `content` is only read for CSV files.
pub fn validate_upload(
    kind: UploadKind,
    file_name: &str,
    content: &str,
) -> Result<FileKind, UploadError> {
    let file_kind = FileKind::from_file_name(file_name)?;
    if file_kind == FileKind::Csv {
        validate_csv_headers(kind, content)?;
    }
    tracing::debug!(kind = %kind, file = file_name, "upload passed pre-validation");
    Ok(file_kind)
}

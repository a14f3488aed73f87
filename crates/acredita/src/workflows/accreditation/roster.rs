use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// One row of the registrar's accreditation export, after parsing.
///
/// Date cells are lenient: an unparseable value reads as absent, the
/// same way half-filled historical rows do. The three name columns are
/// required and fail the import when blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub faculty: String,
    pub career: String,
    pub modality: String,
    pub process_start: Option<NaiveDate>,
    pub process_end: Option<NaiveDate>,
    pub approval_start: Option<NaiveDate>,
    pub approval_end: Option<NaiveDate>,
    pub accredited: bool,
}

/// Import failure for a registrar export.
#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid roster row at line {line}: {message}")]
    Row { line: usize, message: String },
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RosterRow>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RosterRow>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for (index, record) in csv_reader.deserialize::<ExportRow>().enumerate() {
            // header occupies line 1
            let line = index + 2;
            let row = record?;
            rows.push(row.into_roster_row(line)?);
        }

        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Facultad")]
    faculty: String,
    #[serde(rename = "Carrera")]
    career: String,
    #[serde(rename = "Modalidad")]
    modality: String,
    #[serde(
        rename = "Inicio Proceso",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    process_start: Option<String>,
    #[serde(
        rename = "Fin Proceso",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    process_end: Option<String>,
    #[serde(
        rename = "Inicio Aprobacion",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    approval_start: Option<String>,
    #[serde(
        rename = "Fin Aprobacion",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    approval_end: Option<String>,
    #[serde(rename = "Acreditada", default)]
    accredited: String,
}

impl ExportRow {
    fn into_roster_row(self, line: usize) -> Result<RosterRow, RosterImportError> {
        let faculty = required_name(&self.faculty, "Facultad", line)?;
        let career = required_name(&self.career, "Carrera", line)?;
        let modality = required_name(&self.modality, "Modalidad", line)?;

        Ok(RosterRow {
            faculty,
            career,
            modality,
            process_start: self.process_start.as_deref().and_then(parse_export_date),
            process_end: self.process_end.as_deref().and_then(parse_export_date),
            approval_start: self.approval_start.as_deref().and_then(parse_export_date),
            approval_end: self.approval_end.as_deref().and_then(parse_export_date),
            accredited: accredited_marker(&self.accredited),
        })
    }
}

fn required_name(value: &str, column: &str, line: usize) -> Result<String, RosterImportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RosterImportError::Row {
            line,
            message: format!("column '{column}' is empty"),
        });
    }
    Ok(trimmed.to_string())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Registrar exports mix ISO dates with the legacy day-first format.
fn parse_export_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    None
}

fn accredited_marker(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "si" | "sí" | "1" | "true" | "x"
    )
}

#[cfg(test)]
pub(crate) fn parse_export_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_export_date(value)
}

#[cfg(test)]
pub(crate) fn accredited_marker_for_tests(value: &str) -> bool {
    accredited_marker(value)
}

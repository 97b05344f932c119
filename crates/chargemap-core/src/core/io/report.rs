use super::traits::{ColorSink, SinkError};
use crate::core::color::Rgb;
use crate::core::models::record::AtomChargeRecord;
use crate::core::models::selector::AtomSelector;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    residue_name: &'a str,
    atom_name: &'a str,
    charge: Option<f64>,
    color: String,
}

/// Writes every color application as a CSV row.
///
/// Columns: `residue_name,atom_name,charge,color`. The charge column is empty when the sink is
/// driven through [`ColorSink::apply_color`] alone.
pub struct ChargeReport<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ChargeReport<File> {
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
            rows: 0,
        })
    }
}

impl<W: Write> ChargeReport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn write_row(&mut self, row: ReportRow<'_>) -> Result<(), SinkError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes all rows and returns the underlying writer.
    pub fn finish(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::from(e.into_error()))
    }
}

impl<W: Write> ColorSink for ChargeReport<W> {
    fn apply_color(&mut self, color: Rgb, selector: &AtomSelector) -> Result<(), SinkError> {
        self.write_row(ReportRow {
            residue_name: &selector.residue_name,
            atom_name: &selector.atom_name,
            charge: None,
            color: color.to_hex(),
        })
    }

    fn apply_record(&mut self, record: &AtomChargeRecord, color: Rgb) -> Result<(), SinkError> {
        self.write_row(ReportRow {
            residue_name: &record.residue_name,
            atom_name: &record.atom_name,
            charge: Some(record.charge),
            color: color.to_hex(),
        })
    }
}

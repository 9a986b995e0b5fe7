//! CSV export functionality.
//!
//! One header row with the record's column names, then one row per record.
//! UTF-8, no byte-order mark.

use csv::Writer;

use super::types::ExportError;
use crate::report::ReportRecord;

/// Renders records as CSV.
pub(super) fn render_csv<R: ReportRecord>(records: &[R]) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(R::columns())?;
    for record in records {
        writer.write_record(record.row())?;
    }
    writer.flush().map_err(|e| ExportError::Buffer(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

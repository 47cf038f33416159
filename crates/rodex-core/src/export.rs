//! Exporters for the deduplicated table.
//!
//! Both exporters take the retained records in their final order and write
//! the whole output in one shot, overwriting any existing file. An export
//! failure never touches the in-memory table; callers report it and may
//! still run the other exporter.

use crate::error::{Result, RodexError};
use crate::record::RepairRecord;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;

/// Column labels of the spreadsheet header row, fixed by the original
/// report template.
const HEADER: [&str; 4] = ["RO", "Date création doc.", "Reason for return", "MSN"];

/// Write the pipe-delimited text export.
///
/// One line per record — `identifier|date|reason|aircraft` — newline
/// terminated, UTF-8. An empty record set produces an empty file.
pub fn write_text<P: AsRef<Path>>(path: P, records: &[RepairRecord]) -> Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{}|{}|{}|{}\n",
            record.repair_order,
            record.modified_display(),
            record.reason,
            record.aircraft
        ));
    }

    fs::write(path.as_ref(), out).map_err(|e| {
        RodexError::ExportError(format!(
            "Failed to write {}: {e}",
            path.as_ref().display()
        ))
    })
}

/// Write the XLSX export: a single worksheet with the fixed header row and
/// one data row per record, in the same order as the text export. No index
/// column. Dates render as the same strings as the text export.
pub fn write_xlsx<P: AsRef<Path>>(path: P, records: &[RepairRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, HEADER[0]).map_err(xlsx_err)?;
    sheet.write_string(0, 1, HEADER[1]).map_err(xlsx_err)?;
    sheet.write_string(0, 2, HEADER[2]).map_err(xlsx_err)?;
    sheet.write_string(0, 3, HEADER[3]).map_err(xlsx_err)?;

    let mut row: u32 = 1;
    for record in records {
        let date = record.modified_display();
        sheet
            .write_string(row, 0, record.repair_order.as_str())
            .map_err(xlsx_err)?;
        sheet.write_string(row, 1, date.as_str()).map_err(xlsx_err)?;
        sheet
            .write_string(row, 2, record.reason.as_str())
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 3, record.aircraft.as_str())
            .map_err(xlsx_err)?;
        row += 1;
    }

    workbook.save(path.as_ref()).map_err(xlsx_err)
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> RodexError {
    RodexError::ExportError(e.to_string())
}

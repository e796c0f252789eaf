// Primitives for reading participant lists from Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::raffle::io_common::non_empty;
use crate::raffle::*;

pub fn read_xlsx_participants(path: String, cfs: &FileSource) -> RaffleResult<Vec<ParsedEntry>> {
    let name_idx = cfs.name_column_index()?;
    let id_idx = cfs.id_column_index()?;
    let phone_idx = cfs.phone_column_index()?;
    let first_row = cfs.first_row_index()?;

    let wrange = get_range(&path, cfs)?;

    let mut res: Vec<ParsedEntry> = Vec::new();
    for (idx, row) in wrange.rows().enumerate().skip(first_row - 1) {
        let lineno = idx + 1;
        debug!("read_xlsx_participants: lineno: {:?} row: {:?}", lineno, row);
        let entry = ParsedEntry {
            lineno,
            name: row.get(name_idx).and_then(cell_to_text),
            national_id: row.get(id_idx).and_then(cell_to_text),
            phone: row.get(phone_idx).and_then(cell_to_text),
        };
        res.push(entry);
    }
    Ok(res)
}

// National ids and phone numbers are frequently stored as numeric cells.
// Integral floats are printed without the decimal part so that a phone
// stored as a number round-trips to the same digit string.
fn cell_to_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => non_empty(s),
        DataType::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Int(i) => Some(i.to_string()),
        _ => None,
    }
}

fn get_range(path: &String, cfs: &FileSource) -> RaffleResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let p = path.clone();
    let mut workbook: Xlsx<_> =
        open_workbook(p).context(OpeningExcelSnafu { path: path.clone() })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(EmptyExcelSnafu { path: path.clone() })?
            .context(OpeningExcelSnafu { path: path.clone() })?;

        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path: path.clone() }.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "get_range: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => {
                whatever!(
                    "get_range: several worksheets in {}, the worksheet name must be provided",
                    path
                )
            }
        }
    }
}

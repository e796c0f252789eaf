// Primitives for reading participant lists from CSV files.

use std::fs::File;

use log::debug;
use snafu::prelude::*;

use crate::raffle::io_common::non_empty;
use crate::raffle::*;

pub fn read_csv_participants(path: String, cfs: &FileSource) -> RaffleResult<Vec<ParsedEntry>> {
    let name_idx = cfs.name_column_index()?;
    let id_idx = cfs.id_column_index()?;
    let phone_idx = cfs.phone_column_index()?;

    let mut res: Vec<ParsedEntry> = Vec::new();
    let (records, row_offset) = get_records(&path, cfs)?;

    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset;
        debug!("read_csv_participants: {:?} {:?}", lineno, line_r);
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        // Short lines simply yield missing fields and are dropped later.
        let entry = ParsedEntry {
            lineno,
            name: line.get(name_idx).and_then(non_empty),
            national_id: line.get(id_idx).and_then(non_empty),
            phone: line.get(phone_idx).and_then(non_empty),
        };
        res.push(entry);
    }
    Ok(res)
}

fn get_records(
    path: &String,
    cfs: &FileSource,
) -> RaffleResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = cfs.first_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();
    // The index starts at 1 to respect most conventions in the excel world
    for _ in 1..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}

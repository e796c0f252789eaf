// Writes winner rows to the tabular results file.

use std::fs::{File, OpenOptions};
use std::path::Path;

use chrono::Local;
use log::info;
use raffle_draw::{mask_phone, Participant};
use snafu::prelude::*;

use crate::raffle::*;

pub const DEFAULT_RESULTS_FILE: &str = "winners.csv";

const RESULTS_HEADER: [&str; 5] = ["row", "name", "national_id", "masked_phone", "drawn_at"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends one batch of winners to the results file.
///
/// The file is created with a header row when missing; otherwise the rows
/// land after the existing content. The row numbers are local to the batch
/// and restart at 1 on every call, not a running total over the file.
pub fn append_batch(winners: &[Participant], path: &str) -> RaffleResult<()> {
    let exists = Path::new(path).exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context(CreatingResultsSnafu { path })?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if !exists {
        wtr.write_record(&RESULTS_HEADER)
            .context(WritingResultsSnafu { path })?;
    }
    write_winner_rows(&mut wtr, winners, path)?;
    wtr.flush().context(FlushingResultsSnafu { path })?;
    info!("append_batch: wrote {} winner rows to {}", winners.len(), path);
    Ok(())
}

/// Writes the full cumulative winners log, replacing the destination.
///
/// Unlike [append_batch], this numbers the rows continuously from 1: it is
/// the explicit "save as" path, not the per-batch appender.
pub fn write_full_log(winners: &[Participant], path: &str) -> RaffleResult<()> {
    let file = File::create(path).context(CreatingResultsSnafu { path })?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    wtr.write_record(&RESULTS_HEADER)
        .context(WritingResultsSnafu { path })?;
    write_winner_rows(&mut wtr, winners, path)?;
    wtr.flush().context(FlushingResultsSnafu { path })?;
    info!(
        "write_full_log: wrote {} winner rows to {}",
        winners.len(),
        path
    );
    Ok(())
}

fn write_winner_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    winners: &[Participant],
    path: &str,
) -> RaffleResult<()> {
    // One timestamp per call: the batch was drawn at a single point in time.
    let drawn_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
    for (idx, w) in winners.iter().enumerate() {
        wtr.write_record(&[
            (idx + 1).to_string(),
            w.name.clone(),
            w.national_id.clone(),
            mask_phone(&w.phone),
            drawn_at.clone(),
        ])
        .context(WritingResultsSnafu { path })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_results_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kura-sink-{}-{}.csv", std::process::id(), name))
    }

    fn winner(name: &str, national_id: &str, phone: &str) -> Participant {
        Participant {
            name: name.to_string(),
            national_id: national_id.to_string(),
            phone: phone.to_string(),
        }
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        rdr.records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn append_creates_header_and_restarts_numbering() {
        let path = temp_results_file("append");
        let _ = std::fs::remove_file(&path);
        let p = path.display().to_string();

        append_batch(
            &[
                winner("Anna", "0011223344", "0912-345-6789"),
                winner("Bob", "0055667788", "09351112233"),
            ],
            &p,
        )
        .unwrap();
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RESULTS_HEADER.to_vec());
        assert_eq!(rows[1][0], "1");
        assert_eq!(rows[2][0], "2");
        // Phones are stored masked.
        assert_eq!(rows[1][3], "6789***0912");

        append_batch(&[winner("Clara", "0099887766", "09124445566")], &p).unwrap();
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        // No second header, and the numbering restarts for the new batch.
        assert_eq!(rows[3][0], "1");
        assert_eq!(rows[3][1], "Clara");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn full_log_replaces_and_numbers_continuously() {
        let path = temp_results_file("full");
        let _ = std::fs::remove_file(&path);
        let p = path.display().to_string();

        let winners = vec![
            winner("Anna", "0011223344", "09123456789"),
            winner("Bob", "0055667788", "09351112233"),
            winner("Clara", "0099887766", "09124445566"),
        ];
        write_full_log(&winners, &p).unwrap();
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1][0], "1");
        assert_eq!(rows[2][0], "2");
        assert_eq!(rows[3][0], "3");

        // Writing again replaces the content instead of appending.
        write_full_log(&winners[..1].to_vec(), &p).unwrap();
        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn timestamp_format_matches_convention() {
        let s = Local::now().format(TIMESTAMP_FORMAT).to_string();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
    }
}

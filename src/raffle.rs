use log::{debug, info, warn};

use raffle_draw::session::DrawSession;
use raffle_draw::*;
use snafu::{prelude::*, Snafu};

use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod sink;

pub use crate::raffle::config_reader::*;
pub use crate::raffle::sink::DEFAULT_RESULTS_FILE;

#[derive(Debug, Snafu)]
pub enum RaffleError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The participant file {path} has no readable content"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display(""))]
    ParsingJsonNumber {},
    #[snafu(display(""))]
    MissingParentDir {},
    #[snafu(display("Error opening the participant file"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error parsing line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("No valid participant rows in {path}"))]
    NoValidParticipants { path: String },
    #[snafu(display("Invalid draw request: {source}"))]
    InvalidDraw { source: DrawErrors },
    #[snafu(display("Error opening results file {path}"))]
    CreatingResults {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing results to {path}"))]
    WritingResults { source: csv::Error, path: String },
    #[snafu(display("Error writing results to {path}"))]
    FlushingResults {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RaffleResult<T> = Result<T, RaffleError>;

/// A participant row, as parsed by the readers.
/// This is before dropping the rows with missing fields.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedEntry {
    pub lineno: usize,
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub phone: Option<String>,
}

/// One completed draw batch, kept for the summary.
struct BatchRecord {
    batch: u32,
    winners: Vec<Participant>,
}

/// Drops the rows with any missing field. A file in which nothing survives
/// the filter is an error: the previous pool, if any, stays in place.
fn validate_entries(parsed: &[ParsedEntry], path: &str) -> RaffleResult<Vec<Participant>> {
    let mut res: Vec<Participant> = Vec::new();
    for pe in parsed.iter() {
        match (&pe.name, &pe.national_id, &pe.phone) {
            (Some(name), Some(national_id), Some(phone)) => {
                res.push(Participant {
                    name: name.clone(),
                    national_id: national_id.clone(),
                    phone: phone.clone(),
                });
            }
            _ => {
                debug!(
                    "validate_entries: skipping incomplete row {} in {}: {:?}",
                    pe.lineno, path, pe
                );
            }
        }
    }
    if res.is_empty() {
        return NoValidParticipantsSnafu { path }.fail();
    }
    Ok(res)
}

fn read_participant_data(root_path: String, cfs: &FileSource) -> RaffleResult<Vec<Participant>> {
    let p: PathBuf = [root_path, cfs.file_path.clone()].iter().collect();
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read participant file {:?}", p2);
    let parsed = match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_participants(p2.clone(), cfs),
        "xlsx" => io_xlsx::read_xlsx_participants(p2.clone(), cfs),
        x => whatever!("Provider not implemented {:?}", x),
    }?;
    validate_entries(&parsed, &p2)
}

fn validate_rules(
    raffle_rules: &RaffleRules,
    seed_override: Option<u64>,
) -> RaffleResult<DrawRules> {
    let seed = match (seed_override, raffle_rules.random_seed.clone()) {
        (Some(s), _) => Some(s),
        (None, Some(s)) => match s.parse::<u64>() {
            Result::Ok(x) => Some(x),
            Result::Err(_) => {
                whatever!("Failed to understand randomSeed option: {:?}", s)
            }
        },
        (None, None) => None,
    };
    Ok(DrawRules { seed })
}

fn build_summary_js(config: &RaffleConfig, pool_size: usize, batches: &[BatchRecord]) -> JSValue {
    let c = OutputConfig {
        event: config.output_settings.event_name.clone(),
        date: config.output_settings.event_date.clone(),
        pool_size: pool_size as u64,
    };
    let mut results: Vec<JSValue> = Vec::new();
    for br in batches.iter() {
        let winners: Vec<JSValue> = br
            .winners
            .iter()
            .map(|w| {
                json!({
                    "name": w.name,
                    "nationalId": w.national_id,
                    "phone": mask_phone(&w.phone),
                })
            })
            .collect();
        results.push(json!({"batch": br.batch, "winners": winners}));
    }
    json!({
        "config": c,
        "results": results })
}

pub fn run_raffle(args: &Args) -> RaffleResult<()> {
    let config: RaffleConfig = match &args.config {
        Some(p) => read_raffle_config(p.clone())?,
        None => RaffleConfig::default(),
    };
    info!("config: {:?}", config);

    // Participant sources: the --input flag overrides the config.
    let mut sources_root: String = match &args.config {
        Some(p) => Path::new(p.as_str())
            .parent()
            .context(MissingParentDirSnafu {})?
            .display()
            .to_string(),
        None => ".".to_string(),
    };
    let mut sources = config.participant_file_sources.clone();
    if let Some(input) = &args.input {
        sources = vec![FileSource::from_cli(
            input,
            args.input_type.clone(),
            args.excel_worksheet_name.clone(),
        )];
        sources_root = ".".to_string();
    }
    if sources.is_empty() {
        whatever!("No participant file provided: use --input or list participantFileSources in the config");
    }

    let mut pool: Vec<Participant> = Vec::new();
    for cfs in sources.iter() {
        let mut file_data = read_participant_data(sources_root.clone(), cfs)?;
        pool.append(&mut file_data);
    }
    info!("run_raffle: loaded {} participants", pool.len());

    // Validate the rules:
    let rules = validate_rules(&config.rules, args.seed)?;
    let request = DrawRequest {
        winner_count: args.winners.or(config.rules.winner_count).unwrap_or(1),
        countdown_seconds: args
            .countdown
            .or(config.rules.countdown_seconds)
            .unwrap_or(5),
    };
    let num_batches = args.batches.or(config.rules.batches).unwrap_or(1);
    if num_batches == 0 {
        whatever!("The number of batches must be a positive integer");
    }

    let out_path = args
        .out
        .clone()
        .or_else(|| config.output_settings.results_file.clone())
        .unwrap_or_else(|| DEFAULT_RESULTS_FILE.to_string());

    let mut session = DrawSession::new(&rules).participants(&pool);
    let mut batches: Vec<BatchRecord> = Vec::new();
    for batch_id in 1..=num_batches {
        let outcome = session.draw(&request).context(InvalidDrawSnafu {})?;
        info!(
            "run_raffle: batch {}: {} winners, {} participants remaining",
            batch_id,
            outcome.winners.len(),
            outcome.remaining
        );
        // Persist right away: a failure here must not lose the winners
        // already selected in memory.
        sink::append_batch(&outcome.winners, &out_path)?;
        batches.push(BatchRecord {
            batch: batch_id,
            winners: outcome.winners,
        });
    }

    if let Some(save_path) = &args.save_as {
        sink::write_full_log(session.winners(), save_path)?;
    }

    // Assemble the final json
    let result_js = build_summary_js(&config, pool.len(), &batches);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    println!("summary:{}", pretty_js_stats);

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_reference_summary(summary_p.clone())?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between the draw summary and the reference summary")
        }
    }

    Ok(())
}

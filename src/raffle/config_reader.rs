use crate::raffle::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;
use std::fs;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    #[serde(rename = "eventDate")]
    pub event_date: Option<String>,
    #[serde(rename = "resultsFile")]
    pub results_file: Option<String>,
}

/// The configuration echoed back in the summary output.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub event: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "poolSize")]
    pub pool_size: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "nameColumnIndex")]
    _name_column_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    _id_column_index: Option<JSValue>,
    #[serde(rename = "phoneColumnIndex")]
    _phone_column_index: Option<JSValue>,
    #[serde(rename = "firstRowIndex")]
    _first_row_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// Builds a source from the command line flags. The provider is taken
    /// from --input-type when given, otherwise guessed from the extension.
    pub fn from_cli(
        path: &str,
        input_type: Option<String>,
        excel_worksheet_name: Option<String>,
    ) -> FileSource {
        let provider = input_type.unwrap_or_else(|| {
            match std::path::Path::new(path).extension().and_then(|e| e.to_str()) {
                Some("xlsx") | Some("xls") => "xlsx".to_string(),
                _ => "csv".to_string(),
            }
        });
        FileSource {
            provider,
            file_path: path.to_string(),
            _name_column_index: None,
            _id_column_index: None,
            _phone_column_index: None,
            _first_row_index: None,
            excel_worksheet_name,
        }
    }

    pub fn name_column_index(&self) -> RaffleResult<usize> {
        let x = read_js_int_or(&self._name_column_index, 1)?;
        Ok(x - 1)
    }

    pub fn id_column_index(&self) -> RaffleResult<usize> {
        let x = read_js_int_or(&self._id_column_index, 2)?;
        Ok(x - 1)
    }

    pub fn phone_column_index(&self) -> RaffleResult<usize> {
        let x = read_js_int_or(&self._phone_column_index, 3)?;
        Ok(x - 1)
    }

    /// The first data row, 1-based. The default of 1 means every row is
    /// data; point it past the header row when the file has one.
    pub fn first_row_index(&self) -> RaffleResult<usize> {
        read_js_int_or(&self._first_row_index, 1)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RaffleRules {
    #[serde(rename = "winnerCount")]
    pub winner_count: Option<u32>,
    #[serde(rename = "countdownSeconds")]
    pub countdown_seconds: Option<u32>,
    #[serde(rename = "randomSeed")]
    pub random_seed: Option<String>,
    #[serde(rename = "batches")]
    pub batches: Option<u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RaffleConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "participantFileSources", default)]
    pub participant_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: RaffleRules,
}

pub fn read_raffle_config(path: String) -> RaffleResult<RaffleConfig> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let config: RaffleConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference_summary(path: String) -> RaffleResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int_or(x: &Option<JSValue>, default: usize) -> RaffleResult<usize> {
    match x {
        None => Ok(default),
        Some(_) => read_js_int(x),
    }
}

fn read_js_int(x: &Option<JSValue>) -> RaffleResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        // Parsing the Excel-style columns
        Some(JSValue::String(s)) if s.chars().all(|c| c.is_alphabetic()) => {
            // Just treating the simple case for now. It should be expanded to more than 26 columns.
            if s.chars().count() != 1 {
                return None.context(ParsingJsonNumberSnafu {});
            }
            let c1: char = s.to_lowercase().chars().next().unwrap();
            Ok((c1 as usize) - ('a' as usize) + 1)
        }
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

use clap::Parser;

/// This is a raffle drawing program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the raffle: event settings, participant
    /// file sources and draw rules. For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path or empty) The participant list to draw from. Setting this option overrides
    /// the file sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the participant file: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (optional) When using an Excel file, indicates the name of the worksheet to use.
    /// When not specified, the file must contain exactly one worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default 1) The number of winners to select in each batch.
    #[clap(short, long, value_parser)]
    pub winners: Option<u32>,

    /// (default 1) The number of consecutive draw batches to run. A participant can win
    /// in at most one batch.
    #[clap(long, value_parser)]
    pub batches: Option<u32>,

    /// (default 5) The countdown duration in seconds, forwarded to presentation layers.
    /// Must be a positive integer.
    #[clap(long, value_parser)]
    pub countdown: Option<u32>,

    /// (optional) Seed for the random number generator. With a fixed seed the whole
    /// sequence of batches is reproducible. Overrides the seed from the --config option.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// (file path, default winners.csv) The results file. Winner rows are appended after
    /// any existing content; the file is created with a header row when missing.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the full cumulative winners log of this run is
    /// also written to the given location, replacing its content.
    #[clap(long, value_parser)]
    pub save_as: Option<String>,

    /// (file path) A reference file containing the expected summary of the draw in JSON
    /// format. If provided, kura will check that the produced summary matches the
    /// reference. This is only meaningful together with --seed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

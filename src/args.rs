use clap::Parser;

/// This is an interactive lookup program for ward voter rolls.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON description of the ward and its roll files. For more
    /// information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The roll file to load. Setting this option overrides the sources that may
    /// be listed in the --config file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default inferred from the file extension) The type of the input: 'xlsx' or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (string or empty) When using an Excel file, indicates the name of the worksheet to use.
    /// The first worksheet is used when unspecified.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (string or empty) If specified, runs a single search and exits instead of starting the
    /// interactive prompt.
    #[clap(short, long, value_parser)]
    pub query: Option<String>,

    /// (file path or empty) If specified together with --query, the filtered view is written as
    /// comma-separated text to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference export. If provided together with --query, wardroll will check
    /// that the produced export matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed, the search looks at every column instead of only the name, door-number and
    /// EPIC columns.
    #[clap(long, takes_value = false)]
    pub all_fields: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

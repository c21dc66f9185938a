use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solar-dashboard")]
#[command(about = "Compare solar irradiance and ambient conditions across regions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Settings file (toml, json or yaml)")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Directory holding <region>_clean.csv files [default: <program dir>/../data]"
    )]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show ranking, distribution, summary statistics and daily averages
    Dashboard {
        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Regions to compare, by id or display name [default: all loaded]"
        )]
        regions: Option<Vec<String>>,

        #[arg(long, help = "Print the view as JSON")]
        json: bool,

        #[arg(short, long, help = "Also write the view as JSON to this file")]
        output: Option<PathBuf>,
    },

    /// List the regions present in the loaded data
    Regions,

    /// Write filtered rows and derived tables as CSV files
    Export {
        #[arg(short, long, help = "Output directory")]
        output_dir: PathBuf,

        #[arg(short, long, value_delimiter = ',')]
        regions: Option<Vec<String>>,
    },

    /// Read region selections from stdin and redraw the dashboard for each
    Explore,
}

impl Commands {
    /// Commands whose stdout must stay machine readable.
    pub fn wants_clean_output(&self) -> bool {
        matches!(self, Commands::Dashboard { json: true, .. })
    }
}

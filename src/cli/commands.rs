use crate::analyzers::{available_regions, filter, resolve_selection, DashboardAnalyzer};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{Region, UnifiedTable};
use crate::processors::{DatasetCache, DatasetLoader};
use crate::settings::DashboardSettings;
use crate::utils::progress::ProgressReporter;
use crate::writers::TableWriter;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one region to view the analysis.";

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = DashboardSettings::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }

    let loader = DatasetLoader::new(settings.resolve_data_dir()?)
        .with_timestamp_column(&settings.timestamp_column);
    info!("Reading region data from {}", loader.data_dir().display());

    let mut cache = DatasetCache::new(loader, settings.regions.clone());
    let analyzer = DashboardAnalyzer::from_settings(&settings);
    let silent = cli.quiet || cli.command.wants_clean_output();

    match cli.command {
        Commands::Dashboard {
            regions,
            json,
            output,
        } => {
            let table = load(&mut cache, silent)?;
            let selected = select(&table, regions.as_deref())?;

            let Some(view) = analyzer.analyze(&table, &selected)? else {
                if json {
                    println!("null");
                } else {
                    println!("{}", EMPTY_SELECTION_MESSAGE);
                }
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", view.render_text());
            }

            if let Some(path) = output {
                TableWriter::new().write_json(&view, &path)?;
                info!("Dashboard view written to {}", path.display());
            }
        }

        Commands::Regions => {
            let table = load(&mut cache, silent)?;
            for region in available_regions(&table) {
                println!("{:<14} {}", region.id(), region.display_name());
            }
        }

        Commands::Export {
            output_dir,
            regions,
        } => {
            let table = load(&mut cache, silent)?;
            let selected = select(&table, regions.as_deref())?;

            let Some(view) = analyzer.analyze(&table, &selected)? else {
                println!("{}", EMPTY_SELECTION_MESSAGE);
                return Ok(());
            };

            let written =
                TableWriter::new().export_all(&filter(&table, &selected), &view, &output_dir)?;

            println!("Exported {} rows:", view.rows);
            for path in written {
                println!("  {}", path.display());
            }
        }

        Commands::Explore => {
            let table = load(&mut cache, silent)?;
            let names: Vec<String> = available_regions(&table)
                .iter()
                .map(Region::display_name)
                .collect();
            println!("Available regions: {}", names.join(", "));
            println!("Enter regions separated by commas, 'all', 'reload' or 'quit'.");

            explore(&mut cache, &analyzer, silent, io::stdin().lock(), &mut io::stdout())?;
        }
    }

    Ok(())
}

fn load(cache: &mut DatasetCache, silent: bool) -> Result<Arc<UnifiedTable>> {
    let progress = ProgressReporter::new_spinner("Loading regional data...", silent);
    let table = cache.get_with_progress(Some(&progress))?;
    progress.finish_and_clear();
    Ok(table)
}

/// Resolve names given on the command line. `None` selects every loaded
/// region; regions without rows are dropped with a warning.
fn select(table: &UnifiedTable, names: Option<&[String]>) -> Result<Vec<Region>> {
    let available = available_regions(table);
    let Some(names) = names else {
        return Ok(available);
    };

    let mut selected = resolve_selection(names)?;
    selected.retain(|region| {
        let loaded = available.contains(region);
        if !loaded {
            warn!("{} has no loaded rows, ignoring", region.display_name());
        }
        loaded
    });
    Ok(selected)
}

/// Line-driven session: each line is a comma separated selection. The
/// dataset is reloaded only when a region file changes on disk. Load,
/// selection and analysis errors are reported and the session goes on.
fn explore<R: BufRead, W: Write>(
    cache: &mut DatasetCache,
    analyzer: &DashboardAnalyzer,
    silent: bool,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = line.trim();
        match command {
            "quit" | "exit" => break,
            "reload" => cache.clear(),
            _ => {}
        }

        let table = match load(cache, silent) {
            Ok(table) => table,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        if command == "reload" {
            writeln!(out, "Reloaded {} rows", table.len())?;
            continue;
        }

        let selected = if command.eq_ignore_ascii_case("all") {
            available_regions(&table)
        } else {
            let names: Vec<String> = command.split(',').map(str::to_string).collect();
            match select(&table, Some(&names)) {
                Ok(selected) => selected,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            }
        };

        match analyzer.analyze(&table, &selected) {
            Ok(Some(view)) => write!(out, "{}", view.render_text())?,
            Ok(None) => writeln!(out, "{}", EMPTY_SELECTION_MESSAGE)?,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }

    Ok(())
}

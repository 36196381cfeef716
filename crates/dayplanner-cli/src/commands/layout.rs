use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use dayplanner_core::layout::format_minutes;
use dayplanner_core::{Config, LayoutEngine, LayoutInput, PositionedInterval};

#[derive(Args)]
pub struct LayoutArgs {
    /// JSON file with `events` and `tasks` (reads stdin when omitted)
    file: Option<PathBuf>,
    /// Skip invalid items instead of failing
    #[arg(long)]
    lenient: bool,
    /// Print a text table instead of JSON
    #[arg(long)]
    table: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<LayoutInput, Box<dyn std::error::Error>> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&content)?)
}

fn print_table(layout: &[PositionedInterval]) {
    println!(
        "{:<24} {:>5} {:>5} {:>6} {:>7} {:>7}",
        "ID", "START", "END", "COLUMN", "LEFT", "WIDTH"
    );
    for p in layout {
        println!(
            "{:<24} {:>5} {:>5} {:>3}/{:<2} {:>6.2}% {:>6.2}%",
            p.id(),
            format_minutes(p.interval.start_minutes()),
            format_minutes(p.interval.end_minutes()),
            p.column_index,
            p.total_columns,
            p.left,
            p.width
        );
    }
}

pub fn run(args: LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(args.file.as_ref())?;
    tracing::debug!(
        "Read {} event(s) and {} task(s)",
        input.events.len(),
        input.tasks.len()
    );
    let engine = LayoutEngine::with_config(Config::load_or_default().layout);

    let layout = if args.lenient {
        let report = engine.compute_report(&input.events, &input.tasks);
        for rejected in &report.rejected {
            eprintln!(
                "skipped {} #{}: {}",
                rejected.item.kind.as_str(),
                rejected.item.index,
                rejected.error
            );
        }
        report.positioned
    } else {
        engine.compute(&input.events, &input.tasks)?
    };

    if args.table {
        print_table(&layout);
    } else {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    }
    Ok(())
}

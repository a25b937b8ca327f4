//! Output rendering for the final result set.
//!
//! The format is a tagged variant picked once at argument-parse time;
//! rendering never re-inspects strings.

use std::io::Write;

use clap::ValueEnum;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use sweepr_common::device::{Device, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render(format: OutputFormat, results: &ResultSet) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_table(results));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", render_json(results)?);
            Ok(())
        }
        OutputFormat::Csv => write_csv(results, std::io::stdout()),
    }
}

fn render_table(results: &ResultSet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ip", "mac"]);

    for device in results.iter() {
        table.add_row(vec![
            Cell::new(device.ip.to_string()),
            Cell::new(device.mac.to_string()),
        ]);
    }
    table
}

/// 2-space-indented array of `{"ip": ..., "mac": ...}` objects.
fn render_json(results: &ResultSet) -> anyhow::Result<String> {
    let devices: Vec<&Device> = results.iter().collect();
    Ok(serde_json::to_string_pretty(&devices)?)
}

/// `ip,mac` header row, then one row per device.
fn write_csv<W: Write>(results: &ResultSet, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for device in results.iter() {
        wtr.serialize(device)?;
    }
    wtr.flush()?;
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

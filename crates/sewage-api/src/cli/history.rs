//! History CLI commands: list, find, delete, update, add.

use anyhow::{Result, bail};
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use sewage_types::envelope::Envelope;
use sewage_types::history::{
    HistoryFilter, HistoryId, HistoryRecord, HistoryUpdate, NewHistoryRecord,
};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List every record, newest first.
    #[command(alias = "ls")]
    List,

    /// Find records matching all given fields.
    Find {
        /// Record id.
        #[arg(long)]
        id: Option<i64>,

        /// Analysis task id.
        #[arg(long)]
        task_id: Option<i64>,

        /// Detected object classes.
        #[arg(long = "type")]
        kind: Option<String>,

        /// Image path.
        #[arg(long)]
        src: Option<String>,
    },

    /// Delete a record by id.
    #[command(alias = "rm")]
    Delete {
        id: i64,
    },

    /// Rewrite fields of a record. createdTime is never changed.
    Update {
        id: i64,

        #[arg(long)]
        task_id: Option<i64>,

        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long)]
        src: Option<String>,
    },

    /// Add a record, as the detection process does.
    Add {
        #[arg(long = "type")]
        kind: String,

        #[arg(long)]
        src: String,

        #[arg(long)]
        task_id: Option<i64>,
    },
}

/// Handle a history subcommand.
pub async fn handle_history_command(cmd: HistoryCommand, state: &AppState, json: bool) -> Result<()> {
    match cmd {
        HistoryCommand::List => {
            let records = unwrap_envelope(state.history.list_all().await)?;
            print_records(&records, json)
        }
        HistoryCommand::Find {
            id,
            task_id,
            kind,
            src,
        } => {
            let filter = HistoryFilter {
                id: id.map(HistoryId),
                task_id,
                kind,
                src,
            };
            let records = unwrap_envelope(state.history.find_matching(&filter).await)?;
            print_records(&records, json)
        }
        HistoryCommand::Delete { id } => {
            let message = unwrap_envelope(state.history.delete_by_id(HistoryId(id)).await)?;
            print_message(&message, id, json)
        }
        HistoryCommand::Update {
            id,
            task_id,
            kind,
            src,
        } => {
            let update = HistoryUpdate {
                id: HistoryId(id),
                task_id,
                kind,
                src,
            };
            if update.is_noop() {
                bail!("nothing to update: pass at least one of --task-id, --type, --src");
            }
            let message = unwrap_envelope(state.history.update(&update).await)?;
            print_message(&message, id, json)
        }
        HistoryCommand::Add { kind, src, task_id } => {
            let record = NewHistoryRecord { task_id, kind, src };
            let saved = unwrap_envelope(state.history.insert(&record).await)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!(
                    "  {} Saved record {}",
                    style("✓").green().bold(),
                    style(saved.id).bold()
                );
            }
            Ok(())
        }
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T> {
    match envelope.data {
        Some(data) if envelope.is_success() => Ok(data),
        _ => bail!("history store error (run with -v for details)"),
    }
}

fn print_message(message: &str, id: i64, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({"status": "success", "id": id, "data": message}));
    } else {
        println!("  {} {} (id {})", style("✓").green().bold(), message, id);
    }
    Ok(())
}

fn print_records(records: &[HistoryRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!("  {} No history records.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Task").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Source").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for record in records {
        let task = record
            .task_id
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(record.id).fg(Color::Cyan),
            Cell::new(task).fg(Color::DarkGrey),
            Cell::new(&record.kind).fg(Color::Yellow),
            Cell::new(&record.src),
            Cell::new(record.created_time.format("%Y-%m-%d %H:%M:%S")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} record{}",
        style(records.len()).bold(),
        if records.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

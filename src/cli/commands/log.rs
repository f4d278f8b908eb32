use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{strip_ansi, truncate};
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "delete" => Colour::Red,
        "toggle" => Colour::Yellow,
        "profile" => Colour::Cyan,
        "login" | "logout" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "operation (target)", cut to the column limit with only the operation colored.
fn op_target_cell(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };
    let plain = truncate(&plain, OP_TARGET_MAX);
    let color = color_for_operation(&row.operation);
    match plain.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(plain.as_str()).to_string(),
    }
}

fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = open_db(&cfg.database)?;
    let rows = load_log(&pool.conn)?;

    header("Internal log");
    if rows.is_empty() {
        info("No log entries.");
        return Ok(());
    }

    let cells: Vec<(String, String)> = rows
        .iter()
        .map(|r| (display_date(&r.date), op_target_cell(r)))
        .collect();

    let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
    let date_w = cells.iter().map(|(d, _)| d.len()).max().unwrap_or(10);
    let op_w = cells
        .iter()
        .map(|(_, c)| strip_ansi(c).chars().count())
        .max()
        .unwrap_or(10);

    for (row, (date, op_target)) in rows.iter().zip(&cells) {
        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op_target).chars().count()));
        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            row.id, date, op_target, padding, row.message
        );
    }

    Ok(())
}

//! Console front-end for the minefield engine: prompts are clap arguments,
//! clicks are `r`/`f` commands, and the whole board is redrawn from the
//! engine's per-cell view query after every action.

use std::fmt::Write as _;
use std::io::{self, Write as _};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minefield_core::{Action, CellView, GameConfig, Session, SessionState};

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Console minesweeper", version)]
struct Args {
    /// Board rows
    #[arg(long, default_value_t = 9)]
    rows: u16,
    /// Board columns
    #[arg(long, default_value_t = 9)]
    cols: u16,
    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: u32,
    /// Seed for mine placement (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn glyph(view: CellView) -> char {
    match view {
        CellView::Unknown => '.',
        CellView::Flagged => 'F',
        CellView::Exploded => '*',
        CellView::Open(0) => ' ',
        CellView::Open(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

fn render(session: &Session) -> String {
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..session.cols() {
        let _ = write!(out, "{:>2} ", col + 1);
    }
    out.push('\n');
    out.push_str("   ");
    out.push_str(&"-".repeat(usize::from(session.cols()) * 3 + 1));
    out.push('\n');

    let mut current_row = u16::MAX;
    for ((row, _), view) in session.iter_views() {
        if row != current_row {
            if current_row != u16::MAX {
                out.push('\n');
            }
            let _ = write!(out, "{:>2} | ", row + 1);
            current_row = row;
        }
        let _ = write!(out, "{}  ", glyph(view));
    }
    out.push('\n');
    out
}

fn print_help() {
    println!("Commands:");
    println!("  r ROW COL   - reveal the cell (1-based)");
    println!("  f ROW COL   - toggle a flag (1-based)");
    println!("  q           - quit");
    println!("  h/help      - show this help");
}

fn parse_coords(parts: &[&str]) -> Option<(u16, u16)> {
    let row: u16 = parts.get(1)?.parse().ok()?;
    let col: u16 = parts.get(2)?.parse().ok()?;
    // 1-based on the prompt, 0-based in the engine.
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = GameConfig::new(args.rows, args.cols, args.mines)
        .context("invalid board configuration")?;
    let seed = if args.seed == 0 { rand::random() } else { args.seed };
    log::debug!("starting {}x{} game with {} mines, seed {}", args.rows, args.cols, args.mines, seed);

    let mut session = Session::new(config, seed);

    println!(
        "Minesweeper {}x{} with {} mines. Coordinates are 1-based; type 'h' for help.",
        args.rows, args.cols, args.mines
    );

    let mut input = String::new();
    loop {
        println!("\n{}", render(&session));
        match session.state() {
            SessionState::Lost => {
                println!("Boom! You hit a mine. Game over.");
                break;
            }
            SessionState::Won => {
                println!("Congratulations, you cleared the board!");
                break;
            }
            _ => {}
        }
        println!("mines left: {}", session.mines_left());

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        let action = match command.to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => {
                print_help();
                continue;
            }
            "r" | "reveal" => Action::Reveal,
            "f" | "flag" => Action::Flag,
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
                continue;
            }
        };

        let Some(coords) = parse_coords(&parts) else {
            println!("Usage: {} ROW COL (1-based)", command);
            continue;
        };

        match session.apply_click(coords, action) {
            Ok(result) => {
                if !result.changed {
                    log::debug!("no change at {:?}", coords);
                }
            }
            Err(err) => println!("{}", err),
        }
    }

    Ok(())
}

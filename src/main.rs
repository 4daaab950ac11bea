use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::info;

use roomboard::engine::Engine;
use roomboard::model::default_units;
use roomboard::repl::{self, Command, ParseError};
use roomboard::storage::Storage;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("ROOMBOARD_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let rooms: usize = std::env::var("ROOMBOARD_ROOMS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12);
    let studios: usize = std::env::var("ROOMBOARD_STUDIOS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4);

    let storage = Storage::open(&PathBuf::from(&data_dir))?;
    let units = default_units(rooms, studios);
    let mut engine = Engine::new(units, storage);

    let (year, month0) = engine.displayed_month();
    info!("roomboard: {} units, data_dir: {data_dir}", engine.units().len());
    info!("  loaded cells: {}", engine.store().cell_count());
    println!("roomboard — showing {year}-{:02}; type 'help' for commands", month0 + 1);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        match repl::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => {
                let output = repl::execute(&mut engine, cmd);
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Err(ParseError::Empty) => {}
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

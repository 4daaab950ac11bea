use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use crate::calendar::{days_in_month, month_date_keys};
use crate::engine::{Engine, KindFilter};
use crate::model::Status;

/// Parsed command from a console line. This layer is presentation only —
/// every command maps onto one engine call.
#[derive(Debug, PartialEq)]
pub enum Command {
    Show,
    Click { unit_id: String, day: DayRef },
    Deposit { unit_id: String, day: DayRef },
    Name { unit_id: String, day: DayRef, occupant: String, deposit: Option<bool> },
    Search { term: String },
    Kind { filter: KindFilter },
    View { year: i32, month1: u32 },
    Clear,
    Export { path: Option<PathBuf> },
    Import { path: PathBuf },
    Help,
    Quit,
}

/// A day argument: either a full `YYYY-MM-DD` key or a bare day-of-month
/// resolved against the displayed month.
#[derive(Debug, PartialEq)]
pub enum DayRef {
    Key(String),
    DayOfMonth(u32),
}

impl DayRef {
    fn parse(arg: &str) -> DayRef {
        match arg.parse::<u32>() {
            Ok(day) => DayRef::DayOfMonth(day),
            Err(_) => DayRef::Key(arg.to_string()),
        }
    }

    /// A bare day number must name a real day of the displayed month;
    /// otherwise it would fabricate a key no grid cell ever shows.
    fn resolve(&self, engine: &Engine) -> Result<String, String> {
        match self {
            DayRef::Key(key) => Ok(key.clone()),
            DayRef::DayOfMonth(day) => {
                let (year, month0) = engine.displayed_month();
                let days = days_in_month(year, month0);
                if *day == 0 || *day > days {
                    return Err(format!(
                        "day {day} is out of range for {year}-{:02} ({days} days)",
                        u64::from(month0) + 1
                    ));
                }
                Ok(format!("{year:04}-{:02}-{day:02}", month0 + 1))
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try 'help')"),
            ParseError::Usage(usage) => write!(f, "usage: {usage}"),
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let rest: Vec<&str> = words.collect();

    match head.to_lowercase().as_str() {
        "show" => Ok(Command::Show),
        "click" => match rest.as_slice() {
            [unit_id, day] => Ok(Command::Click {
                unit_id: unit_id.to_string(),
                day: DayRef::parse(day),
            }),
            _ => Err(ParseError::Usage("click <unit> <day|YYYY-MM-DD>")),
        },
        "deposit" => match rest.as_slice() {
            [unit_id, day] => Ok(Command::Deposit {
                unit_id: unit_id.to_string(),
                day: DayRef::parse(day),
            }),
            _ => Err(ParseError::Usage("deposit <unit> <day|YYYY-MM-DD>")),
        },
        "name" => match rest.as_slice() {
            [unit_id, day, tail @ ..] if !tail.is_empty() => {
                let (deposit, occupant_words) = match tail[0] {
                    "+d" => (Some(true), &tail[1..]),
                    "-d" => (Some(false), &tail[1..]),
                    _ => (None, tail),
                };
                Ok(Command::Name {
                    unit_id: unit_id.to_string(),
                    day: DayRef::parse(day),
                    occupant: occupant_words.join(" "),
                    deposit,
                })
            }
            _ => Err(ParseError::Usage("name <unit> <day> [+d|-d] <occupant>")),
        },
        "search" => Ok(Command::Search {
            term: rest.join(" "),
        }),
        "kind" => match rest.as_slice() {
            ["all"] => Ok(Command::Kind { filter: KindFilter::All }),
            ["rooms"] => Ok(Command::Kind { filter: KindFilter::Rooms }),
            ["studios"] => Ok(Command::Kind { filter: KindFilter::Studios }),
            _ => Err(ParseError::Usage("kind <all|rooms|studios>")),
        },
        "view" => match rest.as_slice() {
            [year, month] => {
                let (Ok(year), Ok(month1)) = (year.parse::<i32>(), month.parse::<u32>()) else {
                    return Err(ParseError::Usage("view <year> <month 1-12>"));
                };
                if !(1..=12).contains(&month1) {
                    return Err(ParseError::Usage("view <year> <month 1-12>"));
                }
                Ok(Command::View { year, month1 })
            }
            _ => Err(ParseError::Usage("view <year> <month 1-12>")),
        },
        "clear" => Ok(Command::Clear),
        "export" => match rest.as_slice() {
            [] => Ok(Command::Export { path: None }),
            [path] => Ok(Command::Export {
                path: Some(PathBuf::from(path)),
            }),
            _ => Err(ParseError::Usage("export [path]")),
        },
        "import" => match rest.as_slice() {
            [path] => Ok(Command::Import {
                path: PathBuf::from(path),
            }),
            _ => Err(ParseError::Usage("import <path>")),
        },
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

const HELP: &str = "\
commands:
  show                              occupancy of the displayed month
  click <unit> <day>                cycle empty -> reserved -> booked -> empty
  deposit <unit> <day>              toggle the deposit flag
  name <unit> <day> [+d|-d] <who>   set occupant name (and optionally deposit)
  search <term>                     filter units by occupant name
  kind <all|rooms|studios>          filter units by type
  view <year> <month 1-12>          change the displayed month
  clear                             clear the displayed month for all units
  export [path]                     write a snapshot file
  import <path>                     load a snapshot file
  quit";

fn status_mark(status: Status) -> char {
    match status {
        Status::Empty => '.',
        Status::Reserved => 'r',
        Status::Booked => 'B',
    }
}

fn render_month(engine: &Engine) -> String {
    let (year, month0) = engine.displayed_month();
    let keys = month_date_keys(year, month0);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{year}-{:02} ({} days), search: {:?}",
        u64::from(month0) + 1,
        days_in_month(year, month0),
        engine.search_term()
    );
    for unit in engine.filtered_units() {
        let row: String = keys
            .iter()
            .map(|key| {
                let cell = engine.get_cell(&unit.id, key);
                if cell.deposit && cell.status == Status::Empty {
                    'b'
                } else {
                    status_mark(cell.status)
                }
            })
            .collect();
        let _ = writeln!(out, "{:<12} {row}", unit.label);
        for key in &keys {
            let cell = engine.get_cell(&unit.id, key);
            if !cell.name.is_empty() {
                let deposit = if cell.deposit { ", deposit" } else { "" };
                let _ = writeln!(out, "    {key}: {} ({:?}{deposit})", cell.name, cell.status);
            }
        }
    }
    out
}

/// Run one command against the engine, returning the text to print.
/// `Quit` is the caller's concern.
pub fn execute(engine: &mut Engine, cmd: Command) -> String {
    match cmd {
        Command::Show => render_month(engine),
        Command::Click { unit_id, day } => {
            let date_key = match day.resolve(engine) {
                Ok(key) => key,
                Err(e) => return e,
            };
            let outcome = engine.click_cell(&unit_id, &date_key);
            let mut out = format!("{unit_id} {date_key}: {:?}", outcome.entry.status);
            if outcome.name_entry_requested {
                let _ = write!(
                    out,
                    "\nenter occupant with: name {unit_id} {date_key} <who>"
                );
            }
            out
        }
        Command::Deposit { unit_id, day } => {
            let date_key = match day.resolve(engine) {
                Ok(key) => key,
                Err(e) => return e,
            };
            let entry = engine.toggle_deposit(&unit_id, &date_key);
            format!("{unit_id} {date_key}: deposit {}", entry.deposit)
        }
        Command::Name { unit_id, day, occupant, deposit } => {
            let date_key = match day.resolve(engine) {
                Ok(key) => key,
                Err(e) => return e,
            };
            let deposit = deposit.unwrap_or_else(|| engine.get_cell(&unit_id, &date_key).deposit);
            let entry = engine.save_name(&unit_id, &date_key, &occupant, deposit);
            format!(
                "{unit_id} {date_key}: {} ({:?}, deposit {})",
                entry.name, entry.status, entry.deposit
            )
        }
        Command::Search { term } => {
            engine.set_search(&term);
            format!("{} unit(s) match", engine.filtered_units().len())
        }
        Command::Kind { filter } => {
            engine.set_kind_filter(filter);
            format!("{} unit(s) match", engine.filtered_units().len())
        }
        Command::View { year, month1 } => {
            engine.set_displayed_month(year, month1 - 1);
            format!("showing {year}-{month1:02}")
        }
        Command::Clear => {
            engine.clear_current_month();
            let (year, month0) = engine.displayed_month();
            format!("cleared {year}-{:02}", u64::from(month0) + 1)
        }
        Command::Export { path } => {
            let (filename, payload) = engine.export_current();
            let path = path.unwrap_or_else(|| PathBuf::from(&filename));
            match fs::write(&path, payload) {
                Ok(()) => format!("exported to {}", path.display()),
                Err(e) => format!("export failed: {e}"),
            }
        }
        Command::Import { path } => {
            // Read to completion first; the import itself is synchronous.
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => return format!("could not read {}: {e}", path.display()),
            };
            match engine.import_file(&raw) {
                Ok(()) => {
                    let (year, month0) = engine.displayed_month();
                    format!("imported; showing {year}-{:02}", month0 + 1)
                }
                Err(e) => format!("{e}"),
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_units;
    use crate::storage::Storage;

    fn test_engine(name: &str) -> Engine {
        let dir = std::env::temp_dir().join("roomboard_test_repl");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        Engine::new(default_units(12, 4), Storage::at_path(path))
    }

    #[test]
    fn day_number_out_of_range_is_rejected() {
        let mut engine = test_engine("day_range.json");
        engine.set_displayed_month(2024, 2); // March, 31 days

        let out = execute(&mut engine, parse_command("click R1 99").unwrap());
        assert!(out.contains("out of range"), "got: {out}");
        let out = execute(&mut engine, parse_command("deposit R1 0").unwrap());
        assert!(out.contains("out of range"), "got: {out}");
        let out = execute(&mut engine, parse_command("name R1 32 Ana").unwrap());
        assert!(out.contains("out of range"), "got: {out}");
        assert_eq!(engine.store().cell_count(), 0);

        // Last valid day still resolves.
        let out = execute(&mut engine, parse_command("click R1 31").unwrap());
        assert!(out.contains("R1 2024-03-31"), "got: {out}");
        assert_eq!(engine.store().cell_count(), 1);
    }

    #[test]
    fn full_date_key_is_used_verbatim() {
        let mut engine = test_engine("verbatim_key.json");
        engine.set_displayed_month(2024, 2);
        execute(
            &mut engine,
            parse_command("click R1 2024-07-14").unwrap(),
        );
        assert_eq!(engine.get_cell("R1", "2024-07-14").status, Status::Reserved);
    }

    #[test]
    fn parse_click_with_day_number() {
        let cmd = parse_command("click R1 5").unwrap();
        assert_eq!(
            cmd,
            Command::Click {
                unit_id: "R1".into(),
                day: DayRef::DayOfMonth(5),
            }
        );
    }

    #[test]
    fn parse_click_with_full_date_key() {
        let cmd = parse_command("click S2 2024-03-10").unwrap();
        assert_eq!(
            cmd,
            Command::Click {
                unit_id: "S2".into(),
                day: DayRef::Key("2024-03-10".into()),
            }
        );
    }

    #[test]
    fn parse_name_with_multiword_occupant_and_deposit() {
        let cmd = parse_command("name R1 5 +d Fatima El Amrani").unwrap();
        assert_eq!(
            cmd,
            Command::Name {
                unit_id: "R1".into(),
                day: DayRef::DayOfMonth(5),
                occupant: "Fatima El Amrani".into(),
                deposit: Some(true),
            }
        );
    }

    #[test]
    fn parse_name_without_deposit_flag() {
        let cmd = parse_command("name R1 5 Ana").unwrap();
        assert_eq!(
            cmd,
            Command::Name {
                unit_id: "R1".into(),
                day: DayRef::DayOfMonth(5),
                occupant: "Ana".into(),
                deposit: None,
            }
        );
    }

    #[test]
    fn parse_view_validates_month_range() {
        assert_eq!(
            parse_command("view 2024 3").unwrap(),
            Command::View { year: 2024, month1: 3 }
        );
        assert!(matches!(
            parse_command("view 2024 0"),
            Err(ParseError::Usage(_))
        ));
        assert!(matches!(
            parse_command("view 2024 13"),
            Err(ParseError::Usage(_))
        ));
    }

    #[test]
    fn parse_search_allows_empty_term() {
        assert_eq!(
            parse_command("search").unwrap(),
            Command::Search { term: String::new() }
        );
        assert_eq!(
            parse_command("search ana lima").unwrap(),
            Command::Search { term: "ana lima".into() }
        );
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(
            parse_command("frobnicate"),
            Err(ParseError::Unknown(_))
        ));
        assert_eq!(parse_command("   "), Err(ParseError::Empty));
    }

    #[test]
    fn parse_kind_variants() {
        assert_eq!(
            parse_command("kind studios").unwrap(),
            Command::Kind { filter: KindFilter::Studios }
        );
        assert!(matches!(
            parse_command("kind flats"),
            Err(ParseError::Usage(_))
        ));
    }
}

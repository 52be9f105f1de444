//! # CFee CLI Application
//!
//! Terminal front-end for the fee calculator.
//!
//! One-shot mode starts from the default inputs, applies any `--set`
//! overrides and prints the breakdown. Interactive mode (`-i`) keeps a
//! session open and accepts commands, including the two-step reset.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cfee_core::display::result_lines;
use cfee_core::input::Field;
use cfee_core::reset::ResetTransition;
use cfee_core::session::Session;
use cfee_core::settings::Settings;
use cfee_core::units::format_with_unit;
use cfee_core::CalcError;

/// Log level used when `RUST_LOG` is unset
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Meme coin fee calculator: round-trip fees, break-even sell and PnL needed.
#[derive(Parser, Debug)]
#[command(name = "cfee", version, about)]
struct Args {
    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override an input, e.g. --set buyAmount=1.5 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Start an interactive session
    #[arg(short, long)]
    interactive: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                report_error(&e);
                return ExitCode::from(2);
            }
        },
        None => Settings::default(),
    };

    let mut session = Session::new(settings);
    for (name, value) in &args.assignments {
        if let Err(e) = session.set_by_name(name, value) {
            report_error(&e);
            return ExitCode::from(2);
        }
    }

    if args.interactive {
        run_interactive(&mut session, args.json);
        return ExitCode::SUCCESS;
    }

    if let Err(e) = session.input().validate() {
        eprintln!("Warning: {}", e);
    }
    if args.json {
        print_json(&session);
    } else {
        print_breakdown(&session);
    }
    ExitCode::SUCCESS
}

/// `RUST_LOG` when set and parseable, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

fn report_error(error: &CalcError) {
    eprintln!("Error: {}", error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn run_interactive(session: &mut Session, json: bool) {
    println!("CFee - Meme Coin Fee Calculator");
    println!("===============================");
    println!("Type 'help' for commands.");
    println!();
    print_breakdown(session);

    let started = Instant::now();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("[{}] > ", session.label());
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };

        // Deliver any timer that expired while we waited for input
        let fired = session.advance(started.elapsed());
        if fired > 0 {
            debug!(fired, "timers delivered");
        }

        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(command) => command.to_ascii_lowercase(),
            None => continue,
        };

        match command.as_str() {
            "set" => {
                let Some((name, value)) = set_arguments(&mut words) else {
                    println!("usage: set <field> [value]");
                    continue;
                };
                match session.set_by_name(name, value) {
                    Ok(field) => {
                        println!("{} = {}", field.label(), session.input().get(field));
                        if let Err(e) = session.input().validate() {
                            println!("Warning: {}", e);
                        }
                        show(session, json);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "show" => show(session, json),
            "fields" => print_fields(session),
            "json" => print_json(session),
            "reset" => match session.request_reset() {
                ResetTransition::Armed => {
                    let window = session
                        .time_remaining()
                        .unwrap_or_else(|| session.settings().arming_window());
                    println!("{} (within {:.1} s)", session.label(), window.as_secs_f64());
                    show(session, json);
                }
                ResetTransition::Confirmed { message } => {
                    println!("{}", message);
                    show(session, json);
                }
            },
            "leave" | "cancel" => {
                if session.cancel_pending() {
                    println!("Reset cancelled.");
                }
            }
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }
}

/// Field name and raw value for `set`. A missing value is an empty field.
fn set_arguments<'a, I>(words: &mut I) -> Option<(&'a str, &'a str)>
where
    I: Iterator<Item = &'a str>,
{
    let name = words.next()?;
    Some((name, words.next().unwrap_or("")))
}

fn show(session: &Session, json: bool) {
    if json {
        print_json(session);
    } else {
        print_breakdown(session);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <field> [value]  Change an input (missing or invalid values count as 0)");
    println!("  show                 Show the breakdown");
    println!("  fields               List inputs and their current values");
    println!("  json                 Print inputs and results as JSON");
    println!("  reset                Reset to defaults (twice to confirm)");
    println!("  leave                Cancel a pending reset");
    println!("  quit                 Exit");
}

fn print_fields(session: &Session) {
    let settings = session.settings();
    let input = session.input();
    for field in Field::ALL {
        println!(
            "  {:<22} {:<20} {}",
            field.key(),
            field.label(),
            format_with_unit(
                input.get(field),
                field.unit(),
                settings.display_precision,
                &settings.currency
            )
        );
    }
}

fn print_breakdown(session: &Session) {
    let settings = session.settings();

    println!("═══════════════════════════════════════");
    println!("  FEE BREAKDOWN");
    println!("═══════════════════════════════════════");
    for line in result_lines(session.output()) {
        let marker = if line.is_total { "*" } else { " " };
        println!(
            " {} {:<26} {:>18}",
            marker,
            line.label,
            line.formatted(settings.display_precision, &settings.currency)
        );
    }
    println!("═══════════════════════════════════════");
}

fn print_json(session: &Session) {
    let payload = serde_json::json!({
        "input": session.input(),
        "output": session.output(),
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("buyAmount=1.5").unwrap(),
            ("buyAmount".to_string(), "1.5".to_string())
        );
        assert_eq!(
            parse_assignment(" gas_fee_buy = ").unwrap(),
            ("gas_fee_buy".to_string(), String::new())
        );
        assert!(parse_assignment("buyAmount").is_err());
    }

    #[test]
    fn test_set_without_value_stores_zero() {
        let mut words = "buyAmount".split_whitespace();
        let (name, value) = set_arguments(&mut words).unwrap();
        assert_eq!((name, value), ("buyAmount", ""));

        let mut session = Session::with_seed(Settings::default(), 3);
        session.set_by_name("buyAmount", "2").unwrap();
        session.set_by_name(name, value).unwrap();
        assert_eq!(session.input().buy_amount, 0.0);

        let mut words = "gas_fee_sell 0.5".split_whitespace();
        assert_eq!(set_arguments(&mut words), Some(("gas_fee_sell", "0.5")));

        let mut words = "".split_whitespace();
        assert_eq!(set_arguments(&mut words), None);
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).to_string(), "warn");
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(Some("cfee_core=trace")).to_string(),
            "cfee_core=trace"
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "cfee",
            "--set",
            "buyAmount=2",
            "--set",
            "rebate=0",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.assignments.len(), 2);
        assert!(args.json);
        assert!(!args.interactive);
        assert!(args.config.is_none());
    }
}

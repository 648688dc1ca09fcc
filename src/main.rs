use clap::{ArgAction, Parser};
use itertools::Itertools;
use krypto::{Deck, Hand, Report};
use miette::{miette, IntoDiagnostic};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing_subscriber::EnvFilter;

/// Finds every way to combine Krypto cards with + - × ÷ into the objective.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Card values. Without cards or --deal an interactive prompt is started.
    cards: Vec<String>,
    /// Objective to reach.
    #[arg(short, long, default_value_t = 24, allow_negative_numbers = true)]
    target: i64,
    /// Deal five cards and an objective from the Krypto deck.
    #[arg(short, long, conflicts_with = "cards")]
    deal: bool,
    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "krypto=debug",
        _ => "krypto=trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn print_report(report: &Report) {
    if report.is_empty() {
        println!("No solutions.");
        return;
    }
    for line in report.solutions.iter().map(ToString::to_string).sorted() {
        println!("{line}");
    }
    let n = report.solutions.len();
    println!("[{} solution{}]", n, if n > 1 { "s" } else { "" });
}

fn repl(target: i64) -> miette::Result<()> {
    let mut rl = DefaultEditor::new().into_diagnostic()?;
    println!("Enter 2 to 7 card values separated by spaces, optionally followed by '= objective' (default {target}):");
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line).into_diagnostic()?;
                match Hand::parse_line(line, target) {
                    Ok(hand) => print_report(&hand.solve()),
                    Err(error) => println!("error: {error}"),
                }
                println!();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error).into_diagnostic(),
        }
    }
    Ok(())
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.deal {
        let hand = Deck::default()
            .deal(&mut rand::thread_rng())
            .ok_or_else(|| miette!("not enough cards left to deal"))?;
        println!("{hand}");
        print_report(&hand.solve());
        return Ok(());
    }

    if args.cards.is_empty() {
        return repl(args.target);
    }

    let hand = Hand::parse(&args.cards.join(" "), &args.target.to_string()).into_diagnostic()?;
    print_report(&hand.solve());
    Ok(())
}

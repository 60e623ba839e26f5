use card_scanner::cli::{self, Args, Input};
use card_scanner::recognition::{pick_card_name, ScanThrottle};
use card_scanner::{Scanner, ScannerResult, ScannerSession, ScannerSnapshot, ScryfallClient};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=warn, RUST_LOG=card_scanner=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting card scanner");

    if let Err(e) = run(args).await {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> ScannerResult<()> {
    let config = args.to_config();
    let client = ScryfallClient::new(&config)?;
    let (handle, task) = Scanner::spawn(ScannerSession::new(&config), Arc::new(client));
    let interactive = std::io::stdin().is_terminal();
    let mut throttle = ScanThrottle::new(cli::frame_cooldown(&config, interactive));
    if !interactive {
        log::info!("Reading frames from a pipe, frame throttling disabled");
    }

    println!("{}", cli::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let input = match cli::parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match input {
            Input::Quit => break,
            Input::Help => println!("{}", cli::HELP),
            Input::Frame(candidates) => {
                if !throttle.try_begin(Instant::now()) {
                    log::info!("Dropping frame, recognition is cooling down");
                    println!("Frame skipped, still cooling down");
                    continue;
                }
                let name = pick_card_name(&candidates);
                throttle.finish();

                let Some(name) = name else {
                    println!("No card name recognized");
                    continue;
                };
                if handle.recognized_text(name.as_str()).await? {
                    handle.when_idle().await?;
                    print_status(&name, &handle.snapshot().await?);
                }
            }
            Input::List => print_collection(&handle.snapshot().await?),
            Input::Csv => print!("{}", handle.to_csv().await?),
            Input::Export => {
                let path = handle.export_to_file(&args.export_dir).await?;
                println!("Exported to {}", path.display());
            }
            Input::Update {
                index,
                condition,
                is_foil,
                quantity,
            } => {
                let snapshot = handle.snapshot().await?;
                match snapshot.entries.get(index) {
                    Some(entry) => {
                        handle
                            .update_card(entry.id, condition, is_foil, quantity)
                            .await?;
                        print_collection(&handle.snapshot().await?);
                    }
                    None => println!("No entry at index {index}"),
                }
            }
            Input::Delete(indices) => {
                let removed = handle.delete_at(indices).await?;
                println!("Removed {removed} entries");
            }
            Input::Clear => {
                handle.clear_all().await?;
                println!("Collection cleared");
            }
            Input::Dismiss => handle.dismiss_message().await?,
        }
    }

    handle.shutdown().await?;
    if let Err(e) = task.await {
        log::warn!("Scanner task ended abnormally: {e}");
    }
    Ok(())
}

fn print_status(scanned: &str, snapshot: &ScannerSnapshot) {
    match &snapshot.status.message {
        Some(message) => println!("! {message}"),
        None => {
            let entry = snapshot
                .entries
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(scanned));
            if let Some(entry) = entry {
                println!(
                    "{} x {} ({})  [{} cards total]",
                    entry.quantity,
                    entry.name,
                    entry.set_code.to_uppercase(),
                    snapshot.total_quantity()
                );
            }
        }
    }
}

fn print_collection(snapshot: &ScannerSnapshot) {
    if snapshot.entries.is_empty() {
        println!("Collection is empty");
        return;
    }
    for (index, entry) in snapshot.entries.iter().enumerate() {
        println!(
            "{:>3}  {:>2} x {} [{}] {} {}",
            index,
            entry.quantity,
            entry.name,
            entry.set_code.to_uppercase(),
            entry.condition.code(),
            entry.finish()
        );
    }
    println!(
        "{} entries, {} cards, {} cached lookups",
        snapshot.entries.len(),
        snapshot.total_quantity(),
        snapshot.cached_cards
    );
}

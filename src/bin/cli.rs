//! Nixie Pipe CLI
//!
//! Command-line interface for driving a Nixie Pipe array.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossbeam::channel;
use nixiepipe::transport::{available_candidates, PortCandidate, SerialTransport};
use nixiepipe::{Config, Pipe, PipeError, PortSelection, Result};
use rand::Rng;
use tracing_subscriber::{fmt, EnvFilter};

/// Nixie Pipe CLI
#[derive(Parser, Debug)]
#[command(name = "nixiepipe-cli")]
#[command(about = "Drive a Nixie Pipe display array over serial")]
#[command(version)]
struct Args {
    /// Serial port, or "auto" to find the Master by USB descriptor
    #[arg(short, long, default_value = "auto")]
    port: String,

    /// Read timeout for each reply in milliseconds
    #[arg(short, long, default_value = "1000")]
    timeout_ms: u64,

    /// USB descriptor used for auto-detection
    #[arg(long, default_value = nixiepipe::config::DEFAULT_DESCRIPTOR)]
    descriptor: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List ports matching the descriptor
    Ports,

    /// Connect and print the firmware version
    Version,

    /// Display a number across the array (rounded)
    Number {
        /// The number to display
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// Display a digit on one pipe
    PipeNumber {
        pipe: u8,
        /// Digit (< 10)
        value: u8,
    },

    /// Colour the whole array
    Colour {
        #[arg(allow_hyphen_values = true)]
        r: i64,
        #[arg(allow_hyphen_values = true)]
        g: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Colour one pipe
    PipeColour {
        pipe: u8,
        #[arg(allow_hyphen_values = true)]
        r: i64,
        #[arg(allow_hyphen_values = true)]
        g: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Set array brightness (0-255)
    Brightness { value: i64 },

    /// Blank the whole array
    Clear,

    /// Blank one pipe
    ClearPipe { pipe: i64 },

    /// Set the number of unit modules
    Units { count: i64 },

    /// Print the number currently displayed
    Get,

    /// Show a weather symbol or OpenWeatherMap icon code on a pipe
    Weather {
        pipe: u8,
        /// e.g. "Sunny", "Broken clouds", "01d"
        symbol: String,
    },

    /// Random numbers and colours until Ctrl-C
    Demo {
        /// Time between updates in milliseconds
        #[arg(short, long, default_value = "500")]
        interval_ms: u64,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nixiepipe=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::debug!("nixiepipe-cli v{}", nixiepipe::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .port(PortSelection::from_arg(&args.port))
        .read_timeout_ms(args.timeout_ms)
        .descriptor(&args.descriptor)
        .build();

    if let Commands::Ports = args.command {
        let candidates = available_candidates(&config.descriptor)?;
        if candidates.is_empty() {
            println!("No ports match {:?}", config.descriptor);
        }
        for candidate in candidates {
            println!("{}", candidate.describe());
        }
        return Ok(());
    }

    let mut pipe = Pipe::open_with(&config, &prompt_for_port)?;
    let result = execute(&mut pipe, args.command);
    pipe.close();
    result
}

/// Execute a command against a connected pipe, showing any changes
fn execute(pipe: &mut Pipe<SerialTransport>, command: Commands) -> Result<()> {
    match command {
        Commands::Ports => return Ok(()),
        Commands::Version => {
            println!("{}", pipe.firmware_version());
            return Ok(());
        }
        Commands::Get => {
            match pipe.get_number()? {
                Some(value) => println!("{}", value),
                None => println!("unavailable"),
            }
            return Ok(());
        }
        Commands::Demo { interval_ms } => return demo(pipe, Duration::from_millis(interval_ms)),
        Commands::Number { value } => pipe.set_number_rounded(value)?,
        Commands::PipeNumber { pipe: idx, value } => pipe.set_pipe_number(idx, value)?,
        Commands::Colour { r, g, b } => pipe.set_colour(r, g, b)?,
        Commands::PipeColour { pipe: idx, r, g, b } => pipe.set_pipe_colour(idx, r, g, b)?,
        Commands::Brightness { value } => pipe.set_brightness(value)?,
        Commands::Clear => pipe.clear()?,
        Commands::ClearPipe { pipe: idx } => pipe.clear_pipe(idx)?,
        Commands::Units { count } => pipe.set_number_units(count)?,
        Commands::Weather { pipe: idx, symbol } => pipe.set_weather(idx, &symbol)?,
    }

    pipe.show()
}

/// Random number/colour loop, stopped by Ctrl-C
fn demo(pipe: &mut Pipe<SerialTransport>, interval: Duration) -> Result<()> {
    let (stop_tx, stop_rx) = channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })
    .map_err(|e| PipeError::Config(format!("cannot install Ctrl-C handler: {}", e)))?;

    pipe.set_number_units(0)?;
    pipe.set_colour(255, 255, 255)?;
    pipe.set_pipe_colour(0, 255, 128, 0)?;

    let ticker = channel::tick(interval);
    let mut rng = rand::thread_rng();

    tracing::info!("Running demo every {:?}, press Ctrl-C to stop", interval);

    loop {
        crossbeam::select! {
            recv(stop_rx) -> _ => {
                tracing::info!("Ctrl-C detected, closing port...");
                return Ok(());
            }
            recv(ticker) -> _ => {
                pipe.set_number(rng.gen_range(0..=9999u32))?;
                pipe.set_colour(
                    rng.gen_range(0..=255i32),
                    rng.gen_range(0..=255i32),
                    rng.gen_range(0..=255i32),
                )?;
                pipe.show()?;
            }
        }
    }
}

/// Ask on stdin which of several matching ports to use
fn prompt_for_port(candidates: &[PortCandidate]) -> Option<usize> {
    for (idx, candidate) in candidates.iter().enumerate() {
        println!("{} : {}", idx, candidate.describe());
    }
    print!("Which Nixie Pipe Master port? Enter list number\n> ");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    line.trim().parse().ok()
}

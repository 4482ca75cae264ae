//! Wikispan - scan markdown text for wiki-style inline tokens.
//!
//! This binary plays the markdown engine around the scanner: it loads the
//! configuration, builds the registry once and hands every input line to
//! the scanner as an inline text span.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, trace, LevelFilter};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use wikispan_config::Config;
use wikispan_core::Result;
use wikispan_registry::builtin::builtin_definition_info;
use wikispan_scanner::{format_segments, Scanner};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("Wikispan v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    cli.apply_to(&mut config);

    let scanner = Scanner::from_config(&config)?;
    debug!(
        "Registry: {} definitions, options {:?}",
        scanner.registry().len(),
        scanner.options()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        let builtins = builtin_definition_info();
        for definition in scanner.registry().definitions() {
            writeln!(
                out,
                "{:<16} {:>5}  {}",
                definition.name(),
                definition.priority(),
                definition.pattern()
            )?;
            if let Some(info) = builtins.iter().find(|info| info.name == definition.name()) {
                writeln!(out, "{:<16} {:>5}  {}", "", "", info.description)?;
            }
        }
        return Ok(());
    }

    if cli.should_read_stdin() {
        info!("Reading from stdin");
        let stdin = io::stdin();
        scan_lines(stdin.lock(), &scanner, cli, &mut out)
    } else {
        for path in &cli.files {
            info!("Scanning {}", path.display());
            let file = File::open(path)?;
            scan_lines(BufReader::new(file), &scanner, cli, &mut out)?;
        }
        Ok(())
    }
}

/// Load configuration with an optional file or inline TOML override.
fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(ref config_arg) = cli.config {
        debug!("Merging config override: {}", config_arg);
    }
    Config::load_with_override(cli.config.as_deref())
}

/// Scan each line of `input` and write its listing.
fn scan_lines<R: BufRead, W: Write>(input: R, scanner: &Scanner, cli: &Cli, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        trace!("Input line: {}", line);

        let result = scanner.scan(&line);
        out.write_all(format_segments(result.segments(), cli.tokens_only).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

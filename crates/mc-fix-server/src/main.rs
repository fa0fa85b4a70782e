use std::io::{self, BufRead, Write};

use mc_fix_server::config::FixConfig;
use mc_fix_server::filter::PacketFilter;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "mc-fix.toml";

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match FixConfig::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    if !config.enabled {
        info!("Disabled via configuration. No components will be processed.");
        return;
    }

    info!("mc-fix v{} reading chat components from stdin", env!("CARGO_PKG_VERSION"));
    info!(
        "Hover event normalization: {} (int arrays: {}, uuid objects: {})",
        config.normalization.hover_event_uuid.enabled,
        config.normalization.hover_event_uuid.convert.int_array,
        config.normalization.hover_event_uuid.convert.uuid_object
    );

    let packet_filter = PacketFilter::new(&config);
    match run(&packet_filter, io::stdin().lock(), io::stdout().lock()) {
        Ok(stats) => info!(
            "Processed {} components, rewrote {}, normalized {} UUIDs",
            stats.lines, stats.rewritten, stats.conversions
        ),
        Err(e) => {
            warn!("Stopped on I/O error: {e}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunStats {
    lines: usize,
    rewritten: usize,
    conversions: usize,
}

/// Normalize one chat-component document per input line.
fn run(filter: &PacketFilter, input: impl BufRead, mut output: impl Write) -> io::Result<RunStats> {
    let mut stats = RunStats::default();
    for line in input.lines() {
        let line = line?;
        let (normalized, conversions) = filter.normalize_component(&line);
        stats.lines += 1;
        stats.conversions += conversions;
        if conversions > 0 {
            stats.rewritten += 1;
        }
        writeln!(output, "{normalized}")?;
    }
    output.flush()?;
    Ok(stats)
}

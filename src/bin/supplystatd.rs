//! supplystatd - power-supply metrics collector daemon.
//!
//! Collects power-supply gauges from the sysfs power_supply class on an
//! interval and writes them to stdout as Prometheus text exposition or
//! JSON lines. A host exporter framework would call the library directly;
//! this binary is the standalone harness.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use supplystat::collector::MockFs;
#[cfg(target_os = "linux")]
use supplystat::collector::RealFs;
use supplystat::collector::{DEFAULT_IGNORED_DEVICES, PowerSupplyCollector};
use supplystat::fmt::render_text;
use supplystat::model::{MetricKind, MetricRecord};

/// Power-supply metrics collector daemon.
#[derive(Parser)]
#[command(name = "supplystatd", about = "Power-supply metrics collector daemon", version)]
struct Args {
    /// Collection interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Collect one cycle and exit.
    #[arg(long)]
    once: bool,

    /// Base path of the sysfs tree (for testing/mocking).
    #[arg(long, default_value = "/sys")]
    sysfs_path: String,

    /// Regexp of devices to ignore, matched against the device path under
    /// class/power_supply.
    #[arg(long, default_value = DEFAULT_IGNORED_DEVICES)]
    ignored_devices: String,

    /// Write records as JSON lines instead of text exposition.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("supplystatd={}", level).parse().unwrap())
        .add_directive(format!("supplystat={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Writes one cycle's records to stdout.
fn emit(records: &[MetricRecord], json: bool) {
    if json {
        for record in records {
            match serde_json::to_string(record) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize record: {}", e),
            }
        }
    } else {
        print!("{}", render_text(records));
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    info!("supplystatd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, sysfs={}, ignored-devices={}",
        args.interval, args.sysfs_path, args.ignored_devices
    );

    // Create collector
    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    #[cfg(not(target_os = "linux"))]
    let fs = {
        debug!("Not on Linux, collecting from the built-in mock sysfs tree");
        MockFs::laptop()
    };

    let collector = match PowerSupplyCollector::new(fs, &args.sysfs_path, &args.ignored_devices) {
        Ok(collector) => collector,
        Err(e) => {
            error!("Failed to create collector: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Collector ready");

    if args.once {
        match collector.collect() {
            Ok(records) => emit(&records, args.json),
            Err(e) => {
                error!("Failed to collect power supplies: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let interval = Duration::from_secs(args.interval);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        error!("Failed to set Ctrl-C handler: {}", e);
    }

    info!("Starting collection loop");

    let mut cycle_count: u64 = 0;
    while running.load(Ordering::SeqCst) {
        match collector.collect() {
            Ok(records) => {
                cycle_count += 1;
                info!(
                    "Cycle #{}: {} supplies, {} records",
                    cycle_count,
                    records.len() / MetricKind::ALL.len(),
                    records.len()
                );
                emit(&records, args.json);
            }
            Err(e) => {
                error!("Failed to collect power supplies: {}", e);
            }
        }

        // Sleep in short steps so shutdown stays responsive.
        let mut remaining = interval;
        while running.load(Ordering::SeqCst) && !remaining.is_zero() {
            let step = remaining.min(Duration::from_millis(500));
            std::thread::sleep(step);
            remaining -= step;
        }
    }

    info!("Shutting down after {} cycles", cycle_count);
}

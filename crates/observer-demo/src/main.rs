// # observer-demo - Observer Demonstration
//
// Thin entry point over observer-core. All subject/observer logic lives in
// the library; this binary only reads configuration, installs logging and
// drives the fixed demonstration sequence.
//
// The demo:
// 1. Creates one subject
// 2. Attaches the configured number of observers (default 2)
// 3. Sets each configured state in turn (default 1, 2, 3)
//
// Each observer prints one line per state change to stdout:
//
// ```text
// Observer state updated to: 1
// ```
//
// Log records go to stderr.
//
// ## Configuration
//
// With nothing set, the defaults reproduce the reference sequence exactly.
//
// - `OBSERVER_CONFIG`: Path to a JSON config file (optional)
// - `OBSERVER_LOG_LEVEL`: trace, debug, info, warn, error
// - `OBSERVER_DEMO_STATES`: Comma-separated list of states to set
// - `OBSERVER_DEMO_OBSERVERS`: Number of observers to attach
//
// ## Example
//
// ```bash
// export OBSERVER_DEMO_STATES=10,20,30
// export OBSERVER_LOG_LEVEL=debug
//
// observer-demo
// ```

use anyhow::{Context, Result};
use observer_core::{ConcreteObserver, ConcreteSubject, ObserverConfig, Subject};
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Demonstration completed
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DemoExitCode {
    /// Normal exit
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DemoExitCode> for ExitCode {
    fn from(code: DemoExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Load configuration from an optional file, then apply environment overrides
fn load_config() -> Result<ObserverConfig> {
    let mut config = match env::var("OBSERVER_CONFIG") {
        Ok(path) => ObserverConfig::from_file(&path)
            .with_context(|| format!("failed to load OBSERVER_CONFIG from {}", path))?,
        Err(_) => ObserverConfig::default(),
    };

    if let Ok(level) = env::var("OBSERVER_LOG_LEVEL") {
        config.log_level = level;
    }

    if let Ok(states) = env::var("OBSERVER_DEMO_STATES") {
        config.demo.states = parse_states(&states)?;
    }

    if let Ok(observers) = env::var("OBSERVER_DEMO_OBSERVERS") {
        config.demo.observers = observers.trim().parse().with_context(|| {
            format!("OBSERVER_DEMO_OBSERVERS must be a number. Got: {}", observers)
        })?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a comma-separated list of integer states
fn parse_states(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("OBSERVER_DEMO_STATES entry '{}' is not an integer", s))
        })
        .collect()
}

fn log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return DemoExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DemoExitCode::ConfigError.into();
    }

    match run_demo(&config) {
        Ok(()) => DemoExitCode::Success.into(),
        Err(e) => {
            error!("Demo error: {:#}", e);
            DemoExitCode::RuntimeError.into()
        }
    }
}

/// Run the demonstration sequence
fn run_demo(config: &ObserverConfig) -> Result<()> {
    info!(
        observers = config.demo.observers,
        states = config.demo.states.len(),
        "Starting observer demo"
    );

    let subject = ConcreteSubject::shared();

    // Observers attach themselves on construction; keep them alive for the run
    let observers: Vec<_> = (1..=config.demo.observers)
        .map(|_| ConcreteObserver::new(&subject))
        .collect();
    debug!("Attached {} observer(s)", subject.observer_count());

    for &state in &config.demo.states {
        subject.set_state(state);
    }

    for observer in &observers {
        // Every observer saw the last change
        if observer.observer_state() != subject.state() {
            anyhow::bail!(
                "observer cached {} but subject holds {}",
                observer.observer_state(),
                subject.state()
            );
        }
    }

    info!("Observer demo finished");
    Ok(())
}

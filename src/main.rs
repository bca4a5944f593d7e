// SPDX-License-Identifier: MPL-2.0
use scholar_toast::config;
use scholar_toast::diagnostics::{resolve_report_path, DiagnosticsCollector};
use scholar_toast::error::{Error, Result};
use scholar_toast::notifications::{
    spawn, Coalescer, CoalescerSettings, DisplaySink, Level, NotifierHandle, NotifyOptions,
    ResolvedDisplay, ToastBoard, TokioClock,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
scholar_toast - replay notification bursts through the coalescer

USAGE:
  scholar_toast [OPTIONS]

OPTIONS:
  --config-dir DIR            Directory holding settings.toml
  --scenario NAME             burst | errors | suppressed | group | all (default)
  --export-diagnostics PATH   Write the coalescer activity report as JSON;
                              a directory gets a timestamped file name
  --verbose                   Log every coalescer decision
  -h, --help                  Print this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Burst,
    Errors,
    Suppressed,
    Group,
    All,
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "burst" => Ok(Self::Burst),
            "errors" => Ok(Self::Errors),
            "suppressed" => Ok(Self::Suppressed),
            "group" => Ok(Self::Group),
            "all" => Ok(Self::All),
            other => Err(format!("unknown scenario '{other}'")),
        }
    }
}

struct Flags {
    config_dir: Option<PathBuf>,
    scenario: Scenario,
    export_diagnostics: Option<PathBuf>,
    verbose: bool,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        verbose: args.contains("--verbose"),
        config_dir: args.opt_value_from_str("--config-dir")?,
        scenario: args
            .opt_value_from_str("--scenario")?
            .unwrap_or(Scenario::All),
        export_diagnostics: args.opt_value_from_str("--export-diagnostics")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("warning: ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(flags))
}

/// Prints every toast to stdout.
struct ConsoleSink;

impl ConsoleSink {
    fn print(level: Level, message: &str, display: ResolvedDisplay) {
        println!(
            "[{:>7}] {message}  ({:?}, {} ms)",
            level.as_str(),
            display.position,
            display.duration.as_millis()
        );
    }
}

impl DisplaySink for ConsoleSink {
    fn success(&mut self, message: &str, display: ResolvedDisplay) {
        Self::print(Level::Success, message, display);
    }
    fn error(&mut self, message: &str, display: ResolvedDisplay) {
        Self::print(Level::Error, message, display);
    }
    fn info(&mut self, message: &str, display: ResolvedDisplay) {
        Self::print(Level::Info, message, display);
    }
    fn warning(&mut self, message: &str, display: ResolvedDisplay) {
        Self::print(Level::Warning, message, display);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => return Err(Error::Config(err.to_string())),
    };

    let default_filter = if flags.verbose {
        "scholar_toast=debug"
    } else {
        "scholar_toast=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let (config, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(key) = warning {
        warn!(%key, "falling back to default settings");
    }
    let settings = CoalescerSettings::from(&config);
    let settle = settings.debounce.as_duration() + Duration::from_millis(100);

    let mut collector = DiagnosticsCollector::new(config.buffer_capacity());
    let board = Arc::new(Mutex::new(ToastBoard::new()));

    let mut coalescer =
        Coalescer::with_clock(settings, (ConsoleSink, Arc::clone(&board)), TokioClock);
    coalescer.set_diagnostics(collector.handle());
    let (notifier, task) = spawn(coalescer);

    let scenarios = match flags.scenario {
        Scenario::All => vec![
            Scenario::Burst,
            Scenario::Errors,
            Scenario::Suppressed,
            Scenario::Group,
        ],
        single => vec![single],
    };

    for scenario in scenarios {
        info!(?scenario, "running scenario");
        run_scenario(&notifier, scenario).await?;
        tokio::time::sleep(settle).await;
        collector.process_pending();

        let mut shown = board.lock().unwrap_or_else(PoisonError::into_inner);
        shown.tick();
        info!(
            visible = shown.visible_count(),
            queued = shown.queued_count(),
            "toast board"
        );
    }

    notifier.shutdown().await?;
    if let Err(err) = task.await {
        warn!(%err, "notification driver panicked");
    }
    collector.process_pending();

    for (kind, count) in collector.counts() {
        info!(kind, count, "coalescer activity");
    }
    if let Some(target) = flags.export_diagnostics {
        let path = resolve_report_path(&target);
        collector.export_to_path(&path)?;
        info!(path = %path.display(), "diagnostics report written");
    }
    Ok(())
}

async fn run_scenario(notifier: &NotifierHandle, scenario: Scenario) -> Result<()> {
    match scenario {
        Scenario::Burst => {
            for _ in 0..3 {
                notifier.success("Grade saved", NotifyOptions::new()).await?;
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
        Scenario::Errors => {
            for _ in 0..10 {
                notifier
                    .error("Could not reach the attendance service", NotifyOptions::new())
                    .await?;
            }
        }
        Scenario::Suppressed => {
            let outcome = notifier
                .success("Student selected", NotifyOptions::new().category("selection"))
                .await?;
            info!(?outcome, "selection notification");
        }
        Scenario::Group => {
            let subjects = ["Mathematics", "Physics", "Chemistry", "Biology"]
                .map(String::from)
                .to_vec();
            notifier
                .group(subjects, Level::Info, NotifyOptions::new().category("timetable"))
                .await?;
        }
        Scenario::All => {}
    }
    Ok(())
}

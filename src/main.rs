use std::path::Path;
use std::process;

use chrono::Local;
use colored::Colorize;

use plm_analyzer::codecs::movement::EventKind;
use plm_analyzer::codecs::timestamp;
use plm_analyzer::codecs::Parsed;
use plm_analyzer::config::{load_config, Config};
use plm_analyzer::local::demo::{demo_readings, DEMO_STEP_MS};
use plm_analyzer::local::process_file::{
    parse_movement_file, parse_sensor_file, trail_load, write_movement_file, write_sensor_file,
};
use plm_analyzer::processing::markers::annotate;
use plm_analyzer::processing::report::{log_span, series_span, NightlyReport};
use plm_analyzer::processing::viewport::ViewportController;
use plm_analyzer::utils::log::{log_csv, LOG_DIR};
use plm_analyzer::{compute_rate, PlmError};

const USAGE: &str = "\
Usage: plm-analyzer <command> [--config <file.yaml>]

  view <sensor.csv> <position> [events.txt]   show the samples on screen at a slider position
  report <events.txt> [sensor.csv]            nightly PLM events-per-hour report
  normalize <events.txt> <out.txt>            re-write a movement log in canonical form
  demo <out.csv> [count]                      write placeholder sensor data";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match take_config(&mut args) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if args.is_empty() {
        println!("{}", USAGE);
        return;
    }

    let rest = &args[1..];
    let result = match args[0].as_str() {
        "view" if rest.len() >= 2 => view(&config, &rest[0], &rest[1], rest.get(2)),
        "report" if !rest.is_empty() => report(&config, &rest[0], rest.get(1)),
        "normalize" if rest.len() == 2 => normalize(&config, &rest[0], &rest[1]),
        "demo" if !rest.is_empty() => demo(&rest[0], rest.get(1)),
        _ => {
            eprintln!("Invalid arguments\n\n{}", USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = result {
        fail(&e);
    }
}

fn fail(err: &PlmError) -> ! {
    log::error!("{}", err);
    eprintln!("{} {}", "error:".red().bold(), err.user_message());
    process::exit(1);
}

/// Removes `--config <path>` from the arguments and loads it.
fn take_config(args: &mut Vec<String>) -> Result<Config, PlmError> {
    let Some(at) = args.iter().position(|a| a == "--config") else {
        return Ok(Config::default());
    };
    if at + 1 >= args.len() {
        return Err(PlmError::Config("--config needs a file".to_string()));
    }
    let path = args.remove(at + 1);
    args.remove(at);
    load_config(path)
}

/// Prints the partial-parse warning, keeping whatever was decoded.
fn warn_partial<T>(config: &Config, path: &Path, parsed: &Parsed<T>) {
    trail_load(&config.logging, path, parsed);
    if let Some(err) = &parsed.error {
        println!(
            "{} {} ({}); showing the {} rows read before it",
            "warning:".yellow().bold(),
            PlmError::Format(err.clone()).user_message(),
            err,
            parsed.records.len()
        );
    } else if let Some(warning) = parsed.warning(path) {
        println!("{} {}", "warning:".yellow().bold(), warning.user_message());
    }
}

// -----------------------------------------------------------------------------
// COMMANDS
// -----------------------------------------------------------------------------

fn view(
    config: &Config,
    sensor_path: &str,
    position: &str,
    events_path: Option<&String>,
) -> Result<(), PlmError> {
    let position: f64 = position
        .parse()
        .map_err(|_| PlmError::Config(format!("position '{}' is not a number", position)))?;

    let series = parse_sensor_file(sensor_path)?;
    warn_partial(config, Path::new(sensor_path), &series);

    let events = match events_path {
        Some(path) => {
            let parsed = parse_movement_file(path)?;
            warn_partial(config, Path::new(path), &parsed);
            parsed.records
        }
        None => Vec::new(),
    };

    let controller = ViewportController::new(config.viewer.screen_capacity);
    let viewport = controller.scrub(series.records.len(), position);
    println!(
        "Window {}..{} of {} samples (capacity {})",
        viewport.lower_index,
        viewport.upper_index,
        series.records.len(),
        viewport.capacity
    );

    let Some((lower, upper)) = viewport.bounds(&series.records) else {
        println!("Nothing to show");
        return Ok(());
    };
    println!(
        "Time axis: {} -> {}",
        timestamp::encode(&lower),
        timestamp::encode(&upper)
    );

    for sample in viewport.visible(&series.records) {
        println!("  {}", annotate(sample, &events));
    }

    if !events.is_empty() {
        println!(
            "PLM events per hour on screen: {:.2}",
            compute_rate(&events, lower, upper)
        );
    }
    Ok(())
}

fn report(
    config: &Config,
    events_path: &str,
    sensor_path: Option<&String>,
) -> Result<(), PlmError> {
    let events = parse_movement_file(events_path)?;
    warn_partial(config, Path::new(events_path), &events);

    let span = match sensor_path {
        Some(path) => {
            let series = parse_sensor_file(path)?;
            warn_partial(config, Path::new(path), &series);
            series_span(&series.records)
        }
        None => log_span(&events.records),
    };
    let Some((start, end)) = span else {
        println!("Nothing to report");
        return Ok(());
    };

    let report = NightlyReport::build(&events.records, start, end, &config.report);

    println!(
        "Nightly report {} -> {}",
        timestamp::encode(&report.start),
        timestamp::encode(&report.end)
    );
    println!("  Recording: {:.2} h", report.hours);
    for kind in [
        EventKind::Plm,
        EventKind::Rejected,
        EventKind::Isolated,
        EventKind::UserAdded,
    ] {
        println!("  {:<10} {}", kind.to_string(), report.count(kind));
    }

    let rate_line = format!("PLM events per hour: {:.2}", report.plm_per_hour);
    if report.alert {
        println!("  {}", rate_line.red().bold());
    } else {
        println!("  {}", rate_line);
    }

    for (i, bin) in report.bins.iter().enumerate() {
        let row = format!(
            "  {} -> {}  {:.2}/h",
            timestamp::encode(&bin.start),
            timestamp::encode(&bin.end),
            bin.plm_per_hour
        );
        if bin.plm_per_hour >= config.report.eph_alert_threshold {
            println!("{}", row.red());
        } else {
            println!("{}", row);
        }

        if config.logging.enable_debug_logging {
            let start = timestamp::encode(&bin.start);
            let rate = format!("{:.3}", bin.plm_per_hour);
            let index = i.to_string();
            if let Err(e) = log_csv(
                Path::new(LOG_DIR),
                "nightly_bins.csv",
                &["bin", "start", "plm_per_hour"],
                &[index.as_str(), start.as_str(), rate.as_str()],
            ) {
                log::warn!("Failed to write bin row: {}", e);
            }
        }
    }
    Ok(())
}

fn normalize(config: &Config, events_path: &str, out_path: &str) -> Result<(), PlmError> {
    let parsed = parse_movement_file(events_path)?;
    trail_load(&config.logging, Path::new(events_path), &parsed);

    // A partial log is never written back over a good one.
    let events = parsed.into_complete()?;
    write_movement_file(out_path, &events)?;
    println!("Wrote {} events to {}", events.len(), out_path.green());
    Ok(())
}

fn demo(out_path: &str, count: Option<&String>) -> Result<(), PlmError> {
    let count = match count {
        Some(text) => text
            .parse()
            .map_err(|_| PlmError::Config(format!("count '{}' is not a number", text)))?,
        None => 50,
    };

    let mut rng = rand::thread_rng();
    let readings = demo_readings(&mut rng, count, Local::now().naive_local(), DEMO_STEP_MS);
    write_sensor_file(out_path, &readings)?;
    println!("Wrote {} demo readings to {}", readings.len(), out_path.green());
    Ok(())
}

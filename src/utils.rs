use crate::types::{Workout, WorkoutDetail};
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let level = log_level(verbose, quiet);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,mapty={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

pub fn log_level(verbose: u8, quiet: u8) -> &'static str {
    let net = i16::from(verbose) - i16::from(quiet);
    match net {
        i16::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i16::MAX => "trace",
    }
}

/// One decimal place, the way the sidebar shows metrics.
pub fn format_metric(v: f64) -> String {
    format!("{v:.1}")
}

/// Minutes as `HH:MM:SS`, rounded to the nearest second.
pub fn format_duration_min(minutes: f64) -> String {
    // Whole seconds stay in f64; negative or NaN input shows as zero.
    let secs = (minutes * 60.0).round().max(0.0);
    let h = (secs / 3600.0).floor();
    let m = ((secs % 3600.0) / 60.0).floor();
    let s = secs % 60.0;
    format!("{h:02.0}:{m:02.0}:{s:02.0}")
}

/// Sidebar entry for one workout.
pub fn summary_line(w: &Workout) -> String {
    let distance = format_metric(w.distance_km());
    let duration = format_duration_min(w.duration_min());
    match w.detail() {
        WorkoutDetail::Running {
            cadence_spm,
            pace_min_per_km,
        } => format!(
            "🏃 {}  {distance} km  ⏱ {duration}  ⚡ {} min/km  🦶 {} spm",
            w.description(),
            format_metric(pace_min_per_km),
            format_metric(cadence_spm),
        ),
        WorkoutDetail::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => format!(
            "🚴 {}  {distance} km  ⏱ {duration}  ⚡ {} km/h  ⛰ {} m",
            w.description(),
            format_metric(speed_km_per_h),
            format_metric(elevation_gain_m),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, WorkoutKind, create_workout};

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_level(0, 0), "info");
        assert_eq!(log_level(1, 0), "debug");
        assert_eq!(log_level(5, 0), "trace");
        assert_eq!(log_level(0, 1), "warn");
        assert_eq!(log_level(1, 3), "error");
    }

    #[test]
    fn metric_rounding() {
        assert_eq!(format_metric(4.615_384), "4.6");
        assert_eq!(format_metric(20.0), "20.0");
        assert_eq!(format_metric(-30.0), "-30.0");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration_min(24.0), "00:24:00");
        assert_eq!(format_duration_min(90.5), "01:30:30");
        assert_eq!(format_duration_min(0.01), "00:00:01");
        assert_eq!(format_duration_min(6000.0), "100:00:00");
        assert_eq!(format_duration_min(f64::NAN), "00:00:00");
    }

    #[test]
    fn running_line() {
        let w = create_workout(
            WorkoutKind::Running,
            Coordinates::new(51.5, -0.12),
            5.2,
            24.0,
            178.0,
        )
        .unwrap();
        let line = summary_line(&w);
        assert!(line.starts_with("🏃 Running on "));
        assert!(line.contains("5.2 km"));
        assert!(line.contains("4.6 min/km"));
        assert!(line.contains("178.0 spm"));
    }

    #[test]
    fn cycling_line() {
        let w = create_workout(
            WorkoutKind::Cycling,
            Coordinates::new(51.5, -0.12),
            20.0,
            60.0,
            -30.0,
        )
        .unwrap();
        let line = summary_line(&w);
        assert!(line.starts_with("🚴 Cycling on "));
        assert!(line.contains("01:00:00"));
        assert!(line.contains("20.0 km/h"));
        assert!(line.contains("-30.0 m"));
    }
}

use crate::session::SortKey;
use crate::types::{Coordinates, NewWorkout, WorkoutKind};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const DEFAULT_STORE: &str = "mapty.sqlite3";

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts at map coordinates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Snapshot store (SQLite file).
    #[arg(long, global = true, env = "MAPTY_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log a new workout.
    Add {
        #[command(subcommand)]
        workout: WorkoutArgs,
    },
    /// Replace a workout with corrected values (it gets a new id).
    Edit {
        id: String,
        #[command(subcommand)]
        workout: WorkoutArgs,
    },
    /// Print the workout list (default).
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
        /// Include id, timestamp and coordinates.
        #[arg(long)]
        details: bool,
    },
    /// Delete one workout.
    Remove { id: String },
    /// Delete every stored workout.
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum WorkoutArgs {
    Running {
        #[command(flatten)]
        base: BaseArgs,
        /// Steps per minute.
        #[arg(long, allow_negative_numbers = true)]
        cadence: f64,
    },
    Cycling {
        #[command(flatten)]
        base: BaseArgs,
        /// Elevation gain in meters; negative for a net descent.
        #[arg(long, allow_negative_numbers = true)]
        elevation: f64,
    },
}

#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
    /// Distance in km.
    #[arg(long, allow_negative_numbers = true)]
    pub distance: f64,
    /// Duration in minutes.
    #[arg(long, allow_negative_numbers = true)]
    pub duration: f64,
}

impl WorkoutArgs {
    pub const fn to_input(&self) -> NewWorkout {
        let (kind, base, extra) = match self {
            Self::Running { base, cadence } => (WorkoutKind::Running, base, *cadence),
            Self::Cycling { base, elevation } => (WorkoutKind::Cycling, base, *elevation),
        };
        NewWorkout {
            kind,
            coordinates: Coordinates::new(base.lat, base.lng),
            distance_km: base.distance,
            duration_min: base.duration,
            extra,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Date,
    Distance,
    Duration,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Date => Self::Date,
            SortArg::Distance => Self::Distance,
            SortArg::Duration => Self::Duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_running() {
        let cli = Cli::try_parse_from([
            "mapty", "add", "running", "--lat", "51.5", "--lng", "-0.12", "--distance", "5.2",
            "--duration", "24", "--cadence", "178",
        ])
        .unwrap();
        let Some(Cmd::Add { workout }) = cli.cmd else {
            panic!("expected add");
        };
        let input = workout.to_input();
        assert_eq!(input.kind, WorkoutKind::Running);
        assert_eq!(input.coordinates, Coordinates::new(51.5, -0.12));
        assert_eq!(input.extra, 178.0);
    }

    #[test]
    fn parses_cycling_with_descent() {
        let cli = Cli::try_parse_from([
            "mapty", "--store", "/tmp/x.db", "add", "cycling", "--lat", "0", "--lng", "0",
            "--distance", "20", "--duration", "60", "--elevation", "-30",
        ])
        .unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/x.db"));
        let Some(Cmd::Add { workout }) = cli.cmd else {
            panic!("expected add");
        };
        assert_eq!(workout.to_input().extra, -30.0);
    }

    #[test]
    fn no_subcommand_lists() {
        let cli = Cli::try_parse_from(["mapty", "-vv"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn list_sort_option() {
        let cli =
            Cli::try_parse_from(["mapty", "list", "--sort", "distance", "--details"]).unwrap();
        let Some(Cmd::List { sort, details }) = cli.cmd else {
            panic!("expected list");
        };
        assert_eq!(SortKey::from(sort), SortKey::Distance);
        assert!(details);
    }
}

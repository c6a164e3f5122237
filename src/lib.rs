//! Workout log: validated running/cycling records with derived pace and
//! speed, kept in a whole-blob snapshot store.

pub mod cli;
pub mod error;
pub mod id;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use error::ValidationError;
pub use session::{Session, SortKey};
pub use store::SnapshotStore;
pub use types::{
    Coordinates, NewWorkout, Workout, WorkoutDetail, WorkoutKind, WorkoutRecord, create_workout,
};

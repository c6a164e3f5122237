use crate::error::ValidationError;
use crate::store::SnapshotStore;
use crate::types::{NewWorkout, Workout};
use anyhow::Result;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Creation order.
    #[default]
    Date,
    /// Longest first.
    Distance,
    /// Longest first.
    Duration,
}

/// The workouts of one session, in creation order.
///
/// Owned by whichever controller drives the app; the model never reaches
/// into it.
#[derive(Debug, Default)]
pub struct Session {
    workouts: Vec<Workout>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(store: &SnapshotStore) -> Result<Self> {
        Ok(Self {
            workouts: store.load()?,
        })
    }

    pub fn persist(&self, store: &SnapshotStore) -> Result<()> {
        store.save(&self.workouts)
    }

    /// Clear both the stored snapshot and the in-memory list.
    pub fn reset(&mut self, store: &SnapshotStore) -> Result<()> {
        store.reset()?;
        self.workouts.clear();
        Ok(())
    }

    pub fn add(&mut self, input: &NewWorkout) -> Result<&Workout, ValidationError> {
        let workout = input.create()?;
        self.workouts.push(workout);
        Ok(self.workouts.last().expect("workout was just pushed"))
    }

    pub fn remove(&mut self, id: &str) -> Option<Workout> {
        let idx = self.workouts.iter().position(|w| w.id() == id)?;
        Some(self.workouts.remove(idx))
    }

    /// Correct a workout by building a replacement and dropping the original.
    ///
    /// The replacement is validated before anything is removed; it gets a new
    /// id and timestamp and goes to the end of the list. `Ok(None)` means no
    /// workout has that id.
    pub fn replace(
        &mut self,
        id: &str,
        input: &NewWorkout,
    ) -> Result<Option<&Workout>, ValidationError> {
        let Some(idx) = self.workouts.iter().position(|w| w.id() == id) else {
            return Ok(None);
        };
        let replacement = input.create()?;
        self.workouts.remove(idx);
        self.workouts.push(replacement);
        Ok(self.workouts.last())
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Workout> {
        let mut out: Vec<&Workout> = self.workouts.iter().collect();
        match key {
            SortKey::Date => {}
            SortKey::Distance => out.sort_by(|a, b| desc(a.distance_km(), b.distance_km())),
            SortKey::Duration => out.sort_by(|a, b| desc(a.duration_min(), b.duration_min())),
        }
        out
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, WorkoutKind};

    fn input(kind: WorkoutKind, distance_km: f64, duration_min: f64, extra: f64) -> NewWorkout {
        NewWorkout {
            kind,
            coordinates: Coordinates::new(45.0, 7.0),
            distance_km,
            duration_min,
            extra,
        }
    }

    fn filled() -> Session {
        let mut s = Session::new();
        s.add(&input(WorkoutKind::Running, 5.0, 30.0, 170.0)).unwrap();
        s.add(&input(WorkoutKind::Cycling, 40.0, 90.0, 300.0)).unwrap();
        s.add(&input(WorkoutKind::Running, 10.0, 20.0, 180.0)).unwrap();
        s
    }

    #[test]
    fn add_keeps_creation_order() {
        let s = filled();
        let kinds: Vec<_> = s.workouts().iter().map(Workout::kind).collect();
        assert_eq!(
            kinds,
            [WorkoutKind::Running, WorkoutKind::Cycling, WorkoutKind::Running]
        );
    }

    #[test]
    fn add_rejects_invalid_input_without_side_effects() {
        let mut s = filled();
        let err = s
            .add(&input(WorkoutKind::Running, 5.0, 30.0, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositive {
                field: "cadence_spm"
            }
        );
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn remove_by_id() {
        let mut s = filled();
        let id = s.workouts()[1].id().to_string();
        let removed = s.remove(&id).unwrap();
        assert_eq!(removed.id(), id);
        assert_eq!(s.len(), 2);
        assert!(s.get(&id).is_none());
        assert!(s.remove(&id).is_none());
    }

    #[test]
    fn replace_swaps_in_new_workout() {
        let mut s = filled();
        let old = s.workouts()[0].id().to_string();

        let new_id = s
            .replace(&old, &input(WorkoutKind::Cycling, 12.0, 30.0, 40.0))
            .unwrap()
            .unwrap()
            .id()
            .to_string();

        assert_ne!(new_id, old);
        assert!(s.get(&old).is_none());
        assert_eq!(s.workouts().last().unwrap().speed_km_per_h(), Some(24.0));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn replace_with_invalid_input_keeps_original() {
        let mut s = filled();
        let old = s.workouts()[0].id().to_string();
        let err = s
            .replace(&old, &input(WorkoutKind::Running, 0.0, 30.0, 170.0))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonPositive { .. }));
        assert!(s.get(&old).is_some());
    }

    #[test]
    fn replace_unknown_id() {
        let mut s = filled();
        let res = s
            .replace("nope", &input(WorkoutKind::Running, 1.0, 5.0, 150.0))
            .unwrap();
        assert!(res.is_none());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn sorted_views() {
        let s = filled();
        let by_dist: Vec<f64> = s
            .sorted(SortKey::Distance)
            .iter()
            .map(|w| w.distance_km())
            .collect();
        assert_eq!(by_dist, [40.0, 10.0, 5.0]);

        let by_dur: Vec<f64> = s
            .sorted(SortKey::Duration)
            .iter()
            .map(|w| w.duration_min())
            .collect();
        assert_eq!(by_dur, [90.0, 30.0, 20.0]);

        let by_date: Vec<&str> = s
            .sorted(SortKey::Date)
            .into_iter()
            .map(Workout::id)
            .collect();
        let ids: Vec<&str> = s.workouts().iter().map(Workout::id).collect();
        assert_eq!(by_date, ids);
    }

    #[test]
    fn persist_restore_reset() {
        let store = SnapshotStore::in_memory().unwrap();
        let mut s = filled();
        s.persist(&store).unwrap();

        let restored = Session::restore(&store).unwrap();
        assert_eq!(restored.workouts(), s.workouts());

        s.reset(&store).unwrap();
        assert!(s.is_empty());
        assert!(Session::restore(&store).unwrap().is_empty());
    }
}

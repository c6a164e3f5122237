use crate::error::ValidationError;
use crate::id::generate_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

/// Latitude/longitude in degrees, as delivered by the map click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Variant payload with its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetail {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

/// A logged workout.
///
/// Fields are private: a `Workout` only comes out of [`create_workout`] or
/// [`Workout::from_record`], both of which validate the inputs and compute the
/// derived metric and description. Nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    detail: WorkoutDetail,
}

/// Form values for a workout that does not exist yet.
///
/// `extra` is the cadence (steps/min) for running and the elevation gain (m)
/// for cycling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub extra: f64,
}

impl NewWorkout {
    pub fn create(&self) -> Result<Workout, ValidationError> {
        create_workout(
            self.kind,
            self.coordinates,
            self.distance_km,
            self.duration_min,
            self.extra,
        )
    }
}

/// Validate the inputs and build a workout stamped with a fresh id and `now()`.
pub fn create_workout(
    kind: WorkoutKind,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
) -> Result<Workout, ValidationError> {
    let workout = Workout::build(
        generate_id(),
        Utc::now(),
        kind,
        coordinates,
        distance_km,
        duration_min,
        extra,
    )?;
    tracing::debug!(
        id = %workout.id,
        kind = kind.label(),
        distance_km,
        duration_min,
        "workout created"
    );
    Ok(workout)
}

pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// "Running on October 18"
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}

fn ensure_finite(field: &'static str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn ensure_positive(field: &'static str, v: f64) -> Result<(), ValidationError> {
    if v > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field })
    }
}

fn ensure_within(field: &'static str, v: f64, limit: f64) -> Result<(), ValidationError> {
    if (-limit..=limit).contains(&v) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field })
    }
}

const fn extra_field(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "cadence_spm",
        WorkoutKind::Cycling => "elevation_gain_m",
    }
}

impl Workout {
    fn build(
        id: String,
        created_at: DateTime<Utc>,
        kind: WorkoutKind,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Result<Self, ValidationError> {
        // Finiteness first, for every input, then the range checks.
        ensure_finite("latitude", coordinates.lat)?;
        ensure_finite("longitude", coordinates.lng)?;
        ensure_finite("distance_km", distance_km)?;
        ensure_finite("duration_min", duration_min)?;
        ensure_finite(extra_field(kind), extra)?;

        ensure_within("latitude", coordinates.lat, 90.0)?;
        ensure_within("longitude", coordinates.lng, 180.0)?;
        ensure_positive("distance_km", distance_km)?;
        ensure_positive("duration_min", duration_min)?;

        let detail = match kind {
            WorkoutKind::Running => {
                ensure_positive("cadence_spm", extra)?;
                WorkoutDetail::Running {
                    cadence_spm: extra,
                    pace_min_per_km: pace_min_per_km(distance_km, duration_min),
                }
            }
            WorkoutKind::Cycling => WorkoutDetail::Cycling {
                elevation_gain_m: extra,
                speed_km_per_h: speed_km_per_h(distance_km, duration_min),
            },
        };

        Ok(Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description: describe(kind, created_at),
            detail,
        })
    }

    /// Rebuild a workout from a stored record.
    ///
    /// Base fields go through the same validation as [`create_workout`]; the
    /// stored pace/speed and description are ignored and recomputed.
    pub fn from_record(record: WorkoutRecord) -> Result<Self, ValidationError> {
        if record.id.is_empty() {
            return Err(ValidationError::MissingId);
        }

        let field = extra_field(record.kind);
        let extra = match record.kind {
            WorkoutKind::Running => record.cadence,
            WorkoutKind::Cycling => record.elevation_gain,
        }
        .ok_or(ValidationError::NonFinite { field })?;

        Self::build(
            record.id,
            record.created_at,
            record.kind,
            Coordinates::new(record.coords[0], record.coords[1]),
            record.distance,
            record.duration,
            extra,
        )
    }

    pub fn to_record(&self) -> WorkoutRecord {
        let (cadence, pace, elevation_gain, speed) = match self.detail {
            WorkoutDetail::Running {
                cadence_spm,
                pace_min_per_km,
            } => (Some(cadence_spm), Some(pace_min_per_km), None, None),
            WorkoutDetail::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (None, None, Some(elevation_gain_m), Some(speed_km_per_h)),
        };

        WorkoutRecord {
            kind: self.kind(),
            id: self.id.clone(),
            created_at: self.created_at,
            coords: [self.coordinates.lat, self.coordinates.lng],
            distance: self.distance_km,
            duration: self.duration_min,
            description: Some(self.description.clone()),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn detail(&self) -> WorkoutDetail {
        self.detail
    }

    pub const fn kind(&self) -> WorkoutKind {
        match self.detail {
            WorkoutDetail::Running { .. } => WorkoutKind::Running,
            WorkoutDetail::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub const fn pace_min_per_km(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub const fn speed_km_per_h(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetail::Running { .. } => None,
        }
    }
}

/// One element of the persisted snapshot array.
///
/// Flat, camelCase JSON so the blob stays readable by other front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coords: [f64; 2],
    pub distance: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

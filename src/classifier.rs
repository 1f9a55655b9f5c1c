use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Inclusive tempo window `[min, max]` in beats per minute.
///
/// Serializes as a two-element JSON array. Integral bounds are written as
/// integers so classifier bands read `[80, 120]` rather than `[80.0, 120.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpmRange {
    pub min: f64,
    pub max: f64,
}

impl BpmRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, tempo: f64) -> bool {
        self.min <= tempo && tempo <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl fmt::Display for BpmRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}

// Largest magnitude at which every integral f64 still fits an i64 exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

struct Bound(f64);

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Serialize for BpmRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&Bound(self.min))?;
        seq.serialize_element(&Bound(self.max))?;
        seq.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityZone {
    Resting,
    LightWorkout,
    Cardio,
    Intense,
}

impl ActivityZone {
    /// Thresholds are half-open: 60, 100 and 140 belong to the higher zone.
    /// Any value is accepted; NaN fails every comparison and lands in `Intense`.
    pub fn from_heart_rate(heart_rate: f64) -> Self {
        if heart_rate < 60.0 {
            ActivityZone::Resting
        } else if heart_rate < 100.0 {
            ActivityZone::LightWorkout
        } else if heart_rate < 140.0 {
            ActivityZone::Cardio
        } else {
            ActivityZone::Intense
        }
    }

    pub fn bpm_range(self) -> BpmRange {
        match self {
            ActivityZone::Resting => BpmRange::new(50.0, 80.0),
            ActivityZone::LightWorkout => BpmRange::new(80.0, 120.0),
            ActivityZone::Cardio => BpmRange::new(120.0, 150.0),
            ActivityZone::Intense => BpmRange::new(150.0, 180.0),
        }
    }
}

impl fmt::Display for ActivityZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActivityZone::Resting => write!(f, "resting"),
            ActivityZone::LightWorkout => write!(f, "light workout"),
            ActivityZone::Cardio => write!(f, "cardio"),
            ActivityZone::Intense => write!(f, "intense workout"),
        }
    }
}

/// Map a heart rate to the tempo band music should be picked from.
pub fn classify(heart_rate: f64) -> BpmRange {
    ActivityZone::from_heart_rate(heart_rate).bpm_range()
}

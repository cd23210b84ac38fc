use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Perceived effort of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Intensity {
    Low,
    #[default]
    Average,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Average, Intensity::High];

    /// Numeric level used for storage (1..=3).
    pub fn level(self) -> i64 {
        match self {
            Intensity::Low => 1,
            Intensity::Average => 2,
            Intensity::High => 3,
        }
    }

    pub fn from_level(level: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.level() == level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Average => "Average",
            Intensity::High => "High",
        }
    }
}

/// An entry that has not been persisted yet, so it carries no identifier.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub activity_id: i64,
    /// Minutes.
    pub duration: f64,
    pub distance: Option<f64>,
    #[serde(default)]
    pub intensity: Intensity,
    /// Excluded entries stay listed but do not count towards the total activity.
    #[serde(default)]
    pub exclude: bool,
    pub notes: Option<String>,
}

impl NewEntry {
    pub fn with_id(self, id: i64) -> Entry {
        Entry {
            id,
            date: self.date,
            activity_id: self.activity_id,
            duration: self.duration,
            distance: self.distance,
            intensity: self.intensity,
            exclude: self.exclude,
            notes: self.notes,
        }
    }
}

/// A persisted activity entry. `id` is assigned by the repository.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    pub id: i64,
    pub date: NaiveDate,
    pub activity_id: i64,
    pub duration: f64,
    pub distance: Option<f64>,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub exclude: bool,
    pub notes: Option<String>,
}

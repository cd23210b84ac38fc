use fitnessfrog_schema::Activity;
use std::collections::HashMap;
use std::sync::LazyLock;

const CATALOG: [(i64, &str); 11] = [
    (1, "Basketball"),
    (2, "Biking"),
    (3, "Hiking"),
    (4, "Kayaking"),
    (5, "Pole Vaulting"),
    (6, "Running"),
    (7, "Skiing"),
    (8, "Swimming"),
    (9, "Tennis"),
    (10, "Walking"),
    (11, "Weight Lifting"),
];

/// Immutable catalog of the activity types an entry can reference.
/// Order is the display order of the select list.
#[derive(Debug, Clone)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
    id_to_index: HashMap<i64, usize>,
}

impl ActivityCatalog {
    pub fn new<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a str)>,
    {
        let activities: Vec<Activity> = activities
            .into_iter()
            .map(|(id, name)| Activity::new(id, name))
            .collect();
        let id_to_index = activities
            .iter()
            .enumerate()
            .map(|(idx, activity)| (activity.id, idx))
            .collect();

        Self {
            activities,
            id_to_index,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Activity> {
        self.id_to_index.get(&id).map(|&idx| &self.activities[idx])
    }

    pub fn contains(&self, id: i64) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Display name for an id, tolerating rows that reference a retired activity.
    pub fn name(&self, id: i64) -> &str {
        self.get(id)
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown activity")
    }

    /// Options for the activity select list.
    pub fn select_list(&self) -> Vec<Activity> {
        self.activities.clone()
    }
}

pub static ACTIVITIES: LazyLock<ActivityCatalog> =
    LazyLock::new(|| ActivityCatalog::new(CATALOG));

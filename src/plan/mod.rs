//! Weekly plan - per-user schedule of workout snapshots

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::db::Storage;
use crate::session::Session;
use crate::workouts::Workout;

/// Prefix of the per-user plan key, followed by the user's email
pub const PLAN_KEY_PREFIX: &str = "treinofit_plan_";

pub fn plan_key(email: &str) -> String {
    format!("{}{}", PLAN_KEY_PREFIX, email)
}

/// Training days. Sunday is a rest day and has no slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    #[serde(rename = "Segunda")]
    Monday,
    #[serde(rename = "Terça")]
    Tuesday,
    #[serde(rename = "Quarta")]
    Wednesday,
    #[serde(rename = "Quinta")]
    Thursday,
    #[serde(rename = "Sexta")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
}

impl Day {
    pub fn all() -> &'static [Day] {
        &[Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday, Day::Saturday]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Monday => "Segunda",
            Day::Tuesday => "Terça",
            Day::Wednesday => "Quarta",
            Day::Thursday => "Quinta",
            Day::Friday => "Sexta",
            Day::Saturday => "Sábado",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Portuguese label or English weekday name, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let english = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];
        Day::all()
            .iter()
            .zip(english)
            .find(|(day, en)| day.label().to_lowercase() == s.to_lowercase() || en.eq_ignore_ascii_case(s))
            .map(|(day, _)| *day)
            .ok_or_else(|| format!("unknown day: {}", s))
    }
}

/// One occurrence of a workout on the plan. A copy: later catalog edits
/// do not reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledWorkout {
    #[serde(flatten)]
    pub workout: Workout,
    #[serde(rename = "plannedId")]
    pub planned_id: String,
}

/// Day -> scheduled workouts in display order. Every day is always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WeeklyPlan {
    days: BTreeMap<Day, Vec<ScheduledWorkout>>,
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self {
            days: Day::all().iter().map(|d| (*d, Vec::new())).collect(),
        }
    }
}

impl WeeklyPlan {
    pub fn day(&self, day: Day) -> &[ScheduledWorkout] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = (Day, &[ScheduledWorkout])> {
        self.days.iter().map(|(d, list)| (*d, list.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn contains_id(&self, planned_id: &str) -> bool {
        self.days.values().flatten().any(|s| s.planned_id == planned_id)
    }

    /// Restore missing day keys after loading an older record
    fn normalize(mut self) -> Self {
        for day in Day::all() {
            self.days.entry(*day).or_default();
        }
        self
    }

    fn push(&mut self, day: Day, item: ScheduledWorkout) {
        self.days.entry(day).or_default().push(item);
    }

    fn remove(&mut self, day: Day, planned_id: &str) -> bool {
        let Some(list) = self.days.get_mut(&day) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.planned_id != planned_id);
        list.len() != before
    }
}

/// Plan of the signed-in user, written back on every change
pub struct PlanStore {
    storage: Rc<dyn Storage>,
    user_key: Option<String>,
    plan: WeeklyPlan,
}

impl PlanStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            storage,
            user_key: None,
            plan: WeeklyPlan::default(),
        }
    }

    pub fn plan(&self) -> &WeeklyPlan {
        &self.plan
    }

    pub fn day(&self, day: Day) -> &[ScheduledWorkout] {
        self.plan.day(day)
    }

    pub fn total(&self) -> usize {
        self.plan.total()
    }

    /// Switch to `session`'s plan. Missing or unreadable records give an empty week.
    pub fn reload_for(&mut self, session: &Session) {
        let key = plan_key(&session.email);
        self.plan = match self.storage.get(&key) {
            Some(json) => match serde_json::from_str::<WeeklyPlan>(&json) {
                Ok(plan) => plan.normalize(),
                Err(e) => {
                    warn!("failed to load plan for {}: {}", session.email, e);
                    WeeklyPlan::default()
                }
            },
            None => WeeklyPlan::default(),
        };
        info!("plan loaded for {} ({} workouts)", session.email, self.plan.total());
        self.user_key = Some(key);
    }

    /// Forget the current user. The persisted record stays as it was.
    pub fn reset(&mut self) {
        self.user_key = None;
        self.plan = WeeklyPlan::default();
    }

    /// Append a snapshot of `workout` to `day`. Refused without a user.
    pub fn schedule(&mut self, workout: &Workout, day: Day) -> Option<ScheduledWorkout> {
        self.schedule_at(workout, day, Utc::now().timestamp_millis())
    }

    pub(crate) fn schedule_at(&mut self, workout: &Workout, day: Day, now_ms: i64) -> Option<ScheduledWorkout> {
        if self.user_key.is_none() {
            warn!("schedule refused: no active session");
            return None;
        }

        let mut stamp = now_ms;
        let planned_id = loop {
            let id = format!("{}-{}", workout.id, stamp);
            if !self.plan.contains_id(&id) {
                break id;
            }
            stamp += 1;
        };

        let scheduled = ScheduledWorkout {
            workout: workout.clone(),
            planned_id,
        };
        self.plan.push(day, scheduled.clone());
        info!("scheduled {} on {}", scheduled.planned_id, day);
        self.persist();
        Some(scheduled)
    }

    pub fn unschedule(&mut self, day: Day, planned_id: &str) -> bool {
        if self.user_key.is_none() {
            warn!("unschedule refused: no active session");
            return false;
        }
        let removed = self.plan.remove(day, planned_id);
        if removed {
            info!("unscheduled {} from {}", planned_id, day);
            self.persist();
        } else {
            debug!("unschedule: {} not on {}", planned_id, day);
        }
        removed
    }

    /// Empty every day. Callers gate this behind a confirmation.
    /// Returns false when there is no user to clear for.
    pub fn clear(&mut self) -> bool {
        if self.user_key.is_none() {
            warn!("clear refused: no active session");
            return false;
        }
        self.plan = WeeklyPlan::default();
        info!("plan cleared");
        self.persist();
        true
    }

    fn persist(&self) {
        let Some(key) = &self.user_key else {
            return;
        };
        match serde_json::to_string(&self.plan) {
            Ok(json) => self.storage.set(key, &json),
            Err(e) => warn!("failed to serialize plan: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;
    use crate::db::MemoryStorage;
    use std::collections::HashSet;

    fn create_session(email: &str) -> Session {
        Session {
            email: email.to_string(),
            name: "Atleta".to_string(),
            is_admin: false,
        }
    }

    fn signed_in(storage: Rc<MemoryStorage>, email: &str) -> PlanStore {
        let mut store = PlanStore::new(storage);
        store.reload_for(&create_session(email));
        store
    }

    #[test]
    fn test_default_has_all_days() {
        let plan = WeeklyPlan::default();
        assert_eq!(plan.days().count(), 6);
        assert_eq!(plan.total(), 0);
    }

    #[test]
    fn test_schedule_ids_unique_and_order_kept() {
        let mut store = signed_in(Rc::new(MemoryStorage::new()), "a@x.com");
        let seed = seed_catalog();

        // same millisecond on purpose
        store.schedule_at(&seed[0], Day::Monday, 5);
        store.schedule_at(&seed[1], Day::Monday, 5);
        store.schedule_at(&seed[0], Day::Monday, 5);
        store.schedule_at(&seed[0], Day::Friday, 5);

        assert_eq!(store.total(), 4);
        let ids: HashSet<String> = store.plan().days().flat_map(|(_, l)| l.iter().map(|s| s.planned_id.clone())).collect();
        assert_eq!(ids.len(), 4);

        let monday: Vec<&str> = store.day(Day::Monday).iter().map(|s| s.workout.id.as_str()).collect();
        assert_eq!(monday, vec!["chest-tri", "back-bi", "chest-tri"]);
        assert_eq!(store.day(Day::Friday)[0].planned_id, "chest-tri-7");
    }

    #[test]
    fn test_schedule_without_session_refused() {
        let mut store = PlanStore::new(Rc::new(MemoryStorage::new()));
        assert!(store.schedule(&seed_catalog()[0], Day::Monday).is_none());
        assert!(!store.clear());
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn test_unschedule_idempotent() {
        let mut store = signed_in(Rc::new(MemoryStorage::new()), "a@x.com");
        let seed = seed_catalog();
        let first = store.schedule(&seed[0], Day::Tuesday).unwrap();
        store.schedule(&seed[1], Day::Tuesday);

        assert!(store.unschedule(Day::Tuesday, &first.planned_id));
        let after_first = store.plan().clone();
        assert!(!store.unschedule(Day::Tuesday, &first.planned_id));
        assert_eq!(store.plan(), &after_first);
        assert_eq!(store.day(Day::Tuesday).len(), 1);
    }

    #[test]
    fn test_clear_empties_every_day() {
        let mut store = signed_in(Rc::new(MemoryStorage::new()), "a@x.com");
        for day in Day::all() {
            store.schedule(&seed_catalog()[2], *day);
        }
        assert!(store.clear());
        assert_eq!(store.plan(), &WeeklyPlan::default());
        assert!(Day::all().iter().all(|d| store.day(*d).is_empty()));
    }

    #[test]
    fn test_switch_users_keeps_plans_apart() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = signed_in(storage.clone(), "a@x.com");
        store.schedule(&seed_catalog()[0], Day::Wednesday);
        let plan_a = store.plan().clone();

        store.reload_for(&create_session("b@x.com"));
        assert_eq!(store.total(), 0);

        store.reload_for(&create_session("a@x.com"));
        assert_eq!(store.plan(), &plan_a);
    }

    #[test]
    fn test_reset_keeps_persisted_copy() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = signed_in(storage.clone(), "a@x.com");
        store.schedule(&seed_catalog()[0], Day::Saturday);
        store.reset();
        assert_eq!(store.total(), 0);
        assert!(store.schedule(&seed_catalog()[0], Day::Saturday).is_none());

        store.reload_for(&create_session("a@x.com"));
        assert_eq!(store.day(Day::Saturday).len(), 1);
    }

    #[test]
    fn test_corrupt_plan_resets_to_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(&plan_key("a@x.com"), "[oops");
        let store = signed_in(storage, "a@x.com");
        assert_eq!(store.plan(), &WeeklyPlan::default());
    }

    #[test]
    fn test_partial_record_gets_missing_days() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(&plan_key("a@x.com"), r#"{"Segunda":[]}"#);
        let store = signed_in(storage, "a@x.com");
        assert_eq!(store.plan().days().count(), 6);
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let mut store = signed_in(Rc::new(MemoryStorage::new()), "a@x.com");
        let scheduled = store.schedule_at(&seed_catalog()[1], Day::Thursday, 42).unwrap();
        let json = serde_json::to_value(&scheduled).unwrap();
        assert_eq!(json["plannedId"], "back-bi-42");
        assert_eq!(json["muscleGroup"], "Costas & Bíceps");
    }

    #[test]
    fn test_day_from_str() {
        assert_eq!("terça".parse::<Day>(), Ok(Day::Tuesday));
        assert_eq!("Saturday".parse::<Day>(), Ok(Day::Saturday));
        assert!("domingo".parse::<Day>().is_err());
    }
}

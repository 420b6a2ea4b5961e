//! Application controller - owns the stores and handles user events
//!
//! Front ends (TUI, CLI) only call into [`App`]; it keeps the catalog, the
//! signed-in user's plan, the session and the navigator consistent.

use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, info};

use crate::admin::WorkoutDraft;
use crate::catalog::{CatalogStore, SaveOutcome};
use crate::db::Storage;
use crate::nav::{Gender, Navigator, Screen, TrainingLevel};
use crate::plan::{Day, PlanStore, ScheduledWorkout};
use crate::session::{self, LoginError, Session};
use crate::workouts::{Exercise, MuscleGroup, Workout};

pub struct App {
    catalog: CatalogStore,
    plan: PlanStore,
    session: Option<Session>,
    nav: Navigator,
    admin_filters: BTreeSet<MuscleGroup>,
    notice: Option<String>,
}

impl App {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            catalog: CatalogStore::load(storage.clone()),
            plan: PlanStore::new(storage),
            session: None,
            nav: Navigator::new(),
            admin_filters: BTreeSet::new(),
            notice: None,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn plan(&self) -> &PlanStore {
        &self.plan
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn nav(&self) -> &Navigator {
        &self.nav
    }

    pub fn screen(&self) -> Screen {
        self.nav.current()
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_admin)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    // --- session ---

    pub fn login(&mut self, email: &str, password: &str, name: &str) -> Result<(), LoginError> {
        match session::login(email, password, name) {
            Ok(session) => {
                let message = if session.is_admin {
                    "Acesso Admin liberado.".to_string()
                } else {
                    format!("Bem-vindo, {}!", session.name)
                };
                self.start_session(session);
                self.notify(message);
                Ok(())
            }
            Err(e) => {
                self.notify(e.to_string());
                Err(e)
            }
        }
    }

    pub fn login_with_google(&mut self) {
        self.start_session(Session::google());
        self.notify("Logado com Google.");
    }

    fn start_session(&mut self, session: Session) {
        info!("login: {} (admin: {})", session.email, session.is_admin);
        self.plan.reload_for(&session);
        self.session = Some(session);
        self.nav.navigate_to(Screen::Home);
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("logout: {}", session.email);
        }
        self.plan.reset();
        self.nav.reset();
        self.admin_filters.clear();
        self.notify("Sessão encerrada.");
    }

    // --- navigation ---

    /// Forward navigation. Every screen but Login needs a session, and the
    /// admin panel needs an admin.
    pub fn navigate(&mut self, screen: Screen) -> bool {
        let allowed = match screen {
            Screen::Login => true,
            Screen::AdminPanel => self.is_admin(),
            _ => self.session.is_some(),
        };
        if !allowed {
            debug!("navigation to {:?} refused for current session", screen);
            return false;
        }
        self.nav.navigate_to(screen)
    }

    pub fn back(&mut self) -> bool {
        self.navigate(self.nav.previous())
    }

    pub fn select_gender(&mut self, gender: Gender) {
        self.nav.selections.gender = Some(gender);
        self.navigate(Screen::LevelSelect);
    }

    pub fn select_level(&mut self, level: TrainingLevel) {
        self.nav.selections.level = Some(level);
        self.navigate(Screen::WorkoutList);
    }

    pub fn open_workout_detail(&mut self, workout: Workout) {
        self.nav.selections.detail_workout = Some(workout);
        self.navigate(Screen::WorkoutDetail);
    }

    pub fn show_exercise(&mut self, exercise: Exercise) {
        self.nav.selections.detail_exercise = Some(exercise);
    }

    pub fn close_exercise(&mut self) {
        self.nav.selections.detail_exercise = None;
    }

    // --- weekly plan ---

    /// First half of "add to plan": remember the workout until a day is picked
    pub fn request_schedule(&mut self, workout: Workout) {
        self.nav.selections.pending_workout = Some(workout);
    }

    pub fn cancel_schedule(&mut self) {
        self.nav.selections.pending_workout = None;
    }

    /// Second half: put the pending workout on `day`. No-op without one.
    pub fn assign_pending(&mut self, day: Day) -> Option<ScheduledWorkout> {
        let Some(workout) = self.nav.selections.pending_workout.take() else {
            debug!("assign_pending: nothing pending");
            return None;
        };
        if self.session.is_none() {
            debug!("assign_pending: no session");
            return None;
        }
        let scheduled = self.plan.schedule(&workout, day)?;
        self.notify(format!("Adicionado à {}!", day));
        Some(scheduled)
    }

    pub fn unschedule(&mut self, day: Day, planned_id: &str) -> bool {
        let removed = self.plan.unschedule(day, planned_id);
        if removed {
            self.notify("Treino removido.");
        }
        removed
    }

    pub fn request_clear_week(&mut self) {
        if self.session.is_some() {
            self.nav.selections.clear_requested = true;
        }
    }

    pub fn cancel_clear_week(&mut self) {
        self.nav.selections.clear_requested = false;
    }

    /// Clears the week only after `request_clear_week`
    pub fn confirm_clear_week(&mut self) -> bool {
        if !std::mem::take(&mut self.nav.selections.clear_requested) {
            debug!("confirm_clear_week without request");
            return false;
        }
        if !self.plan.clear() {
            return false;
        }
        self.notify("Cronograma limpo.");
        true
    }

    // --- catalog administration ---

    pub fn filtered_workouts(&self) -> Vec<&Workout> {
        self.catalog.filter(&self.admin_filters)
    }

    pub fn admin_filters(&self) -> &BTreeSet<MuscleGroup> {
        &self.admin_filters
    }

    pub fn toggle_filter(&mut self, group: MuscleGroup) {
        if !self.admin_filters.remove(&group) {
            self.admin_filters.insert(group);
        }
    }

    pub fn new_workout_draft(&mut self) -> Option<WorkoutDraft> {
        if !self.is_admin() {
            return None;
        }
        self.nav.selections.editing_workout = None;
        Some(WorkoutDraft::new())
    }

    pub fn edit_workout(&mut self, id: &str) -> Option<WorkoutDraft> {
        if !self.is_admin() {
            return None;
        }
        let workout = self.catalog.get(id)?.clone();
        let draft = WorkoutDraft::from_workout(&workout);
        self.nav.selections.editing_workout = Some(workout);
        Some(draft)
    }

    /// Draft for a workout coming from outside the catalog (a JSON file).
    /// An id already in the catalog is edited in place, anything else is new.
    pub fn import_workout(&mut self, workout: &Workout) -> Option<WorkoutDraft> {
        if !self.is_admin() {
            return None;
        }
        self.nav.selections.editing_workout = self.catalog.get(&workout.id).cloned();
        Some(WorkoutDraft::from_workout(workout))
    }

    pub fn cancel_edit(&mut self) {
        self.nav.selections.editing_workout = None;
    }

    pub fn save_draft(&mut self, draft: WorkoutDraft) -> Option<SaveOutcome> {
        if !self.is_admin() {
            debug!("save_draft refused: not admin");
            return None;
        }
        let workout = draft.into_workout(Utc::now().timestamp_millis());
        let outcome = self.catalog.save(workout);
        self.notify(match outcome {
            SaveOutcome::Updated => "Treino atualizado!",
            SaveOutcome::Created => "Novo treino adicionado!",
        });
        self.nav.selections.editing_workout = None;
        Some(outcome)
    }

    pub fn request_delete(&mut self, id: &str) {
        if !self.is_admin() {
            return;
        }
        self.nav.selections.delete_target = self.catalog.get(id).cloned();
    }

    pub fn cancel_delete(&mut self) {
        self.nav.selections.delete_target = None;
    }

    /// Delete the workout chosen by `request_delete`. Plans keep their copies.
    pub fn confirm_delete(&mut self) -> bool {
        let Some(target) = self.nav.selections.delete_target.take() else {
            debug!("confirm_delete: no target");
            return false;
        };
        let removed = self.catalog.delete(&target.id);
        if removed {
            self.notify("Treino excluído.");
        }
        removed
    }
}

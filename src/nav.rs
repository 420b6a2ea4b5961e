//! Navigation - current screen, one-slot history and in-flight selections

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::workouts::{Exercise, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
    LevelSelect,
    WorkoutList,
    WeeklyPlan,
    AdminPanel,
    WorkoutDetail,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    #[serde(rename = "Masculino")]
    Male,
    #[serde(rename = "Feminino")]
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Masculino",
            Gender::Female => "Feminino",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrainingLevel {
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
    #[serde(rename = "Hardcore")]
    Hardcore,
}

impl TrainingLevel {
    pub fn label(&self) -> &'static str {
        match self {
            TrainingLevel::Beginner => "Iniciante",
            TrainingLevel::Intermediate => "Intermediário",
            TrainingLevel::Advanced => "Avançado",
            TrainingLevel::Hardcore => "Hardcore",
        }
    }

    pub fn all() -> &'static [TrainingLevel] {
        &[
            TrainingLevel::Beginner,
            TrainingLevel::Intermediate,
            TrainingLevel::Advanced,
            TrainingLevel::Hardcore,
        ]
    }
}

/// Transient UI choices carried between screens. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub gender: Option<Gender>,
    pub level: Option<TrainingLevel>,
    /// Waiting for a day to be picked
    pub pending_workout: Option<Workout>,
    pub editing_workout: Option<Workout>,
    /// Waiting for delete confirmation
    pub delete_target: Option<Workout>,
    pub detail_workout: Option<Workout>,
    pub detail_exercise: Option<Exercise>,
    pub clear_requested: bool,
}

/// Screen state machine.
///
/// History is a single slot: every forward move overwrites it, and `back`
/// is itself a forward move to the remembered screen. Two consecutive
/// `back` calls therefore bounce between the same two screens.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
    previous: Screen,
    pub selections: Selections,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Screen::Login,
            previous: Screen::Home,
            selections: Selections::default(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn previous(&self) -> Screen {
        self.previous
    }

    /// Whether the selections needed by `screen` are in place
    pub fn can_enter(&self, screen: Screen) -> bool {
        match screen {
            Screen::LevelSelect => self.selections.gender.is_some(),
            Screen::WorkoutList => self.selections.level.is_some(),
            Screen::WorkoutDetail => self.selections.detail_workout.is_some(),
            _ => true,
        }
    }

    pub fn navigate_to(&mut self, screen: Screen) -> bool {
        if !self.can_enter(screen) {
            debug!("navigation to {:?} refused: missing selection", screen);
            return false;
        }
        self.previous = self.current;
        self.current = screen;
        debug!("navigate {:?} -> {:?}", self.previous, self.current);
        true
    }

    pub fn back(&mut self) -> bool {
        self.navigate_to(self.previous)
    }

    /// Logout: back to the login screen with nothing selected
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

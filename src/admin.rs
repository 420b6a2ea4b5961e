//! Admin workout editor - draft of a workout being created or edited

use crate::media::{MediaTarget, MediaUpload, RowId};
use crate::workouts::{Exercise, MuscleGroup, Workout};

#[derive(Debug, Clone, PartialEq)]
pub struct DraftExercise {
    pub row: RowId,
    pub exercise: Exercise,
}

/// Editable form state. Rows carry a [`RowId`] so uploads started for a row
/// still find it after other rows are added or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    /// Id of the workout being edited; `None` for a new one
    original_id: Option<String>,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub description: String,
    pub duration: String,
    pub media_url: String,
    rows: Vec<DraftExercise>,
    next_row: u32,
}

impl Default for WorkoutDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutDraft {
    /// Blank form with a single empty exercise row
    pub fn new() -> Self {
        let mut draft = Self {
            original_id: None,
            name: String::new(),
            muscle_group: MuscleGroup::ChestTriceps,
            description: String::new(),
            duration: String::new(),
            media_url: String::new(),
            rows: Vec::new(),
            next_row: 0,
        };
        draft.add_exercise();
        draft
    }

    /// Form prefilled from `workout`. A blank id is treated as a new workout.
    pub fn from_workout(workout: &Workout) -> Self {
        let mut draft = Self {
            original_id: Some(workout.id.clone()).filter(|id| !id.trim().is_empty()),
            name: workout.name.clone(),
            muscle_group: workout.muscle_group,
            description: workout.description.clone(),
            duration: workout.duration.clone(),
            media_url: workout.media_url.clone().unwrap_or_default(),
            rows: Vec::new(),
            next_row: 0,
        };
        for exercise in &workout.exercises {
            draft.push_row(exercise.clone());
        }
        if draft.rows.is_empty() {
            draft.add_exercise();
        }
        draft
    }

    pub fn is_edit(&self) -> bool {
        self.original_id.is_some()
    }

    pub fn rows(&self) -> &[DraftExercise] {
        &self.rows
    }

    pub fn add_exercise(&mut self) -> RowId {
        self.push_row(Exercise::default())
    }

    /// Remove a row. The form always keeps at least one.
    pub fn remove_exercise(&mut self, row: RowId) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|r| r.row != row);
        self.rows.len() != before
    }

    pub fn exercise_mut(&mut self, row: RowId) -> Option<&mut Exercise> {
        self.rows.iter_mut().find(|r| r.row == row).map(|r| &mut r.exercise)
    }

    /// Store a finished upload in the slot it was started for.
    /// Returns false when that row has been removed meanwhile.
    pub fn apply_upload(&mut self, upload: MediaUpload) -> bool {
        match upload.target {
            MediaTarget::Cover => {
                self.media_url = upload.data_url;
                true
            }
            MediaTarget::Exercise(row) => match self.exercise_mut(row) {
                Some(exercise) => {
                    exercise.media_url = Some(upload.data_url);
                    true
                }
                None => false,
            },
        }
    }

    /// Finish the form. New workouts get a `custom-<millis>` id and rows
    /// without a name are dropped.
    pub fn into_workout(self, now_ms: i64) -> Workout {
        let id = self.original_id.unwrap_or_else(|| format!("custom-{}", now_ms));
        let exercises = self
            .rows
            .into_iter()
            .map(|r| r.exercise)
            .filter(|ex| !ex.name.trim().is_empty())
            .map(|mut ex| {
                ex.media_url = ex.media_url.filter(|u| !u.is_empty());
                ex.explanation = ex.explanation.filter(|e| !e.is_empty());
                ex
            })
            .collect();

        Workout {
            id,
            name: self.name,
            muscle_group: self.muscle_group,
            description: self.description,
            duration: self.duration,
            exercises,
            media_url: Some(self.media_url).filter(|u| !u.is_empty()),
        }
    }

    fn push_row(&mut self, exercise: Exercise) -> RowId {
        let row = RowId(self.next_row);
        self.next_row += 1;
        self.rows.push(DraftExercise { row, exercise });
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;

    #[test]
    fn test_new_draft_has_one_row() {
        let draft = WorkoutDraft::new();
        assert_eq!(draft.rows().len(), 1);
        assert!(!draft.is_edit());
    }

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut draft = WorkoutDraft::new();
        let only = draft.rows()[0].row;
        assert!(!draft.remove_exercise(only));
    }

    #[test]
    fn test_blank_rows_dropped_and_id_minted() {
        let mut draft = WorkoutDraft::new();
        draft.name = "Core Blindado".to_string();
        let first = draft.rows()[0].row;
        draft.exercise_mut(first).unwrap().name = "Prancha".to_string();
        draft.add_exercise();

        let workout = draft.into_workout(99);
        assert_eq!(workout.id, "custom-99");
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.media_url, None);
    }

    #[test]
    fn test_edit_keeps_id() {
        let source = seed_catalog()[0].clone();
        let workout = WorkoutDraft::from_workout(&source).into_workout(1);
        assert_eq!(workout, source);
    }

    #[test]
    fn test_upload_lands_in_requested_row_after_reorder() {
        let mut draft = WorkoutDraft::new();
        let a = draft.rows()[0].row;
        let b = draft.add_exercise();
        let c = draft.add_exercise();
        draft.exercise_mut(c).unwrap().name = "Remada".to_string();

        // row b goes away while its upload is in flight
        draft.remove_exercise(b);
        let late = MediaUpload {
            target: MediaTarget::Exercise(b),
            data_url: "data:video/mp4;base64,AA==".to_string(),
        };
        assert!(!draft.apply_upload(late));

        let upload = MediaUpload {
            target: MediaTarget::Exercise(c),
            data_url: "data:image/png;base64,AA==".to_string(),
        };
        assert!(draft.apply_upload(upload));
        assert_eq!(draft.exercise_mut(c).unwrap().media_url.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(draft.exercise_mut(a).unwrap().media_url, None);
    }

    #[test]
    fn test_cover_upload() {
        let mut draft = WorkoutDraft::new();
        draft.apply_upload(MediaUpload {
            target: MediaTarget::Cover,
            data_url: "data:image/jpeg;base64,AA==".to_string(),
        });
        assert_eq!(draft.media_url, "data:image/jpeg;base64,AA==");
    }
}

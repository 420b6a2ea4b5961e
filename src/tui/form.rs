//! Admin workout form - keyboard editing of a [`WorkoutDraft`]

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::admin::WorkoutDraft;
use crate::media::RowId;
use crate::workouts::MuscleGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Group,
    Description,
    Duration,
    Cover,
    ExerciseName(RowId),
    Sets(RowId),
    Media(RowId),
    Explanation(RowId),
}

impl Field {
    fn label(&self) -> &'static str {
        match self {
            Field::Name => "Nome do treino",
            Field::Group => "Grupo muscular",
            Field::Description => "Descrição",
            Field::Duration => "Duração",
            Field::Cover => "Capa (URL)",
            Field::ExerciseName(_) => "  Exercício",
            Field::Sets(_) => "  Séries",
            Field::Media(_) => "  Mídia (URL)",
            Field::Explanation(_) => "  Explicação",
        }
    }

    fn row(&self) -> Option<RowId> {
        match *self {
            Field::ExerciseName(row) | Field::Sets(row) | Field::Media(row) | Field::Explanation(row) => Some(row),
            _ => None,
        }
    }
}

/// Draft plus the focused field
pub struct DraftForm {
    pub draft: WorkoutDraft,
    focus: usize,
}

impl DraftForm {
    pub fn new(draft: WorkoutDraft) -> Self {
        Self { draft, focus: 0 }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Name, Field::Group, Field::Description, Field::Duration, Field::Cover];
        for r in self.draft.rows() {
            fields.extend([Field::ExerciseName(r.row), Field::Sets(r.row), Field::Media(r.row), Field::Explanation(r.row)]);
        }
        fields
    }

    fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    fn focus_on(&mut self, field: Field) {
        if let Some(i) = self.fields().iter().position(|f| *f == field) {
            self.focus = i;
        }
    }

    pub fn next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Step the muscle group when it has focus
    pub fn cycle_group(&mut self, forward: bool) {
        if self.focused() != Field::Group {
            return;
        }
        let all = MuscleGroup::all();
        let i = all.iter().position(|g| *g == self.draft.muscle_group).unwrap_or(0);
        let step = if forward { 1 } else { all.len() - 1 };
        self.draft.muscle_group = all[(i + step) % all.len()];
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focused() {
            Field::Name => Some(&mut self.draft.name),
            Field::Group => None,
            Field::Description => Some(&mut self.draft.description),
            Field::Duration => Some(&mut self.draft.duration),
            Field::Cover => Some(&mut self.draft.media_url),
            Field::ExerciseName(row) => self.draft.exercise_mut(row).map(|ex| &mut ex.name),
            Field::Sets(row) => self.draft.exercise_mut(row).map(|ex| &mut ex.sets),
            Field::Media(row) => self
                .draft
                .exercise_mut(row)
                .map(|ex| ex.media_url.get_or_insert_with(String::new)),
            Field::Explanation(row) => self
                .draft
                .exercise_mut(row)
                .map(|ex| ex.explanation.get_or_insert_with(String::new)),
        }
    }

    pub fn push(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
        }
    }

    pub fn pop(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Append an exercise row and focus its name
    pub fn add_row(&mut self) {
        let row = self.draft.add_exercise();
        self.focus_on(Field::ExerciseName(row));
    }

    /// Drop the row holding the focus. The last row stays.
    pub fn remove_row(&mut self) -> bool {
        let Some(row) = self.focused().row() else {
            return false;
        };
        let removed = self.draft.remove_exercise(row);
        if removed {
            self.focus = self.focus.min(self.fields().len() - 1);
        }
        removed
    }

    /// Move focus to the first required field left blank, if any
    pub fn check_required(&mut self) -> bool {
        let missing = if self.draft.name.trim().is_empty() {
            Some(Field::Name)
        } else if self.draft.duration.trim().is_empty() {
            Some(Field::Duration)
        } else {
            None
        };
        match missing {
            Some(field) => {
                self.focus_on(field);
                false
            }
            None => true,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focused();
        let mut lines = Vec::new();
        for field in self.fields() {
            if let Field::ExerciseName(row) = field {
                let n = self.draft.rows().iter().position(|r| r.row == row).unwrap_or(0);
                lines.push(Line::from(format!("Exercício {}", n + 1)).bold());
            }
            let text = format!("{:<16} {}", field.label(), self.value(field));
            let line = if field == focused {
                Line::from(format!("{}_", text)).style(Style::default().fg(Color::Black).bg(Color::Cyan))
            } else {
                Line::from(text)
            };
            lines.push(line);
        }

        let title = if self.draft.is_edit() { "Editar treino" } else { "Novo treino" };
        let form = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(form, area);
    }

    fn value(&self, field: Field) -> String {
        let exercise = field
            .row()
            .and_then(|row| self.draft.rows().iter().find(|r| r.row == row))
            .map(|r| &r.exercise);
        match (field, exercise) {
            (Field::Name, _) => self.draft.name.clone(),
            (Field::Group, _) => format!("< {} >", self.draft.muscle_group.label()),
            (Field::Description, _) => self.draft.description.clone(),
            (Field::Duration, _) => self.draft.duration.clone(),
            (Field::Cover, _) => self.draft.media_url.clone(),
            (Field::ExerciseName(_), Some(ex)) => ex.name.clone(),
            (Field::Sets(_), Some(ex)) => ex.sets.clone(),
            (Field::Media(_), Some(ex)) => ex.media_url.clone().unwrap_or_default(),
            (Field::Explanation(_), Some(ex)) => ex.explanation.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

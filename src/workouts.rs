//! Workout definitions - catalog data model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Muscle group a workout belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MuscleGroup {
    #[serde(rename = "Peito & Tríceps")]
    ChestTriceps,
    #[serde(rename = "Costas & Bíceps")]
    BackBiceps,
    #[serde(rename = "Ombros & Abs")]
    ShouldersAbs,
    #[serde(rename = "Pernas & Glúteos")]
    LegsGlutes,
    /// Catch-all for user-defined workouts and old records without a group
    #[default]
    #[serde(rename = "Personalizado")]
    Custom,
}

impl MuscleGroup {
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::ChestTriceps => "Peito & Tríceps",
            MuscleGroup::BackBiceps => "Costas & Bíceps",
            MuscleGroup::ShouldersAbs => "Ombros & Abs",
            MuscleGroup::LegsGlutes => "Pernas & Glúteos",
            MuscleGroup::Custom => "Personalizado",
        }
    }

    /// Short ascii prefix used when minting workout ids
    pub fn slug(&self) -> &'static str {
        match self {
            MuscleGroup::ChestTriceps => "chest-tri",
            MuscleGroup::BackBiceps => "back-bi",
            MuscleGroup::ShouldersAbs => "shoulders-abs",
            MuscleGroup::LegsGlutes => "legs-glute",
            MuscleGroup::Custom => "custom",
        }
    }

    /// All muscle groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::ChestTriceps,
            MuscleGroup::BackBiceps,
            MuscleGroup::ShouldersAbs,
            MuscleGroup::LegsGlutes,
            MuscleGroup::Custom,
        ]
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MuscleGroup {
    type Err = String;

    /// Accepts either the display label or the slug
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::all()
            .iter()
            .copied()
            .find(|g| g.label().eq_ignore_ascii_case(s) || g.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown muscle group: {}", s))
    }
}

/// Older records may carry no group, a null, an empty string or a label this
/// build does not know. All of them load as `Custom` so one odd record never
/// invalidates the whole catalog.
fn group_or_custom<'de, D>(deserializer: D) -> Result<MuscleGroup, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(match label.as_deref() {
        None | Some("") => MuscleGroup::Custom,
        Some(label) => label.parse().unwrap_or_else(|_| {
            warn!("unknown muscle group {:?}, using {}", label, MuscleGroup::Custom);
            MuscleGroup::Custom
        }),
    })
}

/// Single exercise inside a workout. Identified by its position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: String, // display label, e.g. "4x10"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Exercise {
    pub fn new(name: &str, sets: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: sets.to_string(),
            media_url: None,
            explanation: None,
        }
    }

    pub fn with_media(mut self, url: &str) -> Self {
        self.media_url = Some(url.to_string());
        self
    }

    pub fn with_explanation(mut self, text: &str) -> Self {
        self.explanation = Some(text.to_string());
        self
    }
}

/// Workout template from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "group_or_custom")]
    pub muscle_group: MuscleGroup,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_labels_roundtrip_through_json() {
        let json = serde_json::to_string(&MuscleGroup::LegsGlutes).unwrap();
        assert_eq!(json, "\"Pernas & Glúteos\"");
    }

    #[test]
    fn test_missing_group_defaults_to_custom() {
        let json = r#"{"id":"x","name":"Old","description":"","duration":"10 min","exercises":[]}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.muscle_group, MuscleGroup::Custom);
    }

    #[test]
    fn test_null_group_defaults_to_custom() {
        let json = r#"{"id":"x","name":"Old","muscleGroup":null}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.muscle_group, MuscleGroup::Custom);
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_empty_group_defaults_to_custom() {
        let json = r#"{"id":"x","name":"Old","muscleGroup":""}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.muscle_group, MuscleGroup::Custom);
    }

    #[test]
    fn test_unknown_group_defaults_to_custom() {
        let json = r#"{"id":"x","name":"Cardio","muscleGroup":"Cardio & HIIT"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.muscle_group, MuscleGroup::Custom);
    }

    #[test]
    fn test_known_label_still_parsed() {
        let json = r#"{"id":"x","name":"Ombro","muscleGroup":"Ombros & Abs"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.muscle_group, MuscleGroup::ShouldersAbs);
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("back-bi".parse::<MuscleGroup>(), Ok(MuscleGroup::BackBiceps));
        assert_eq!("Ombros & Abs".parse::<MuscleGroup>(), Ok(MuscleGroup::ShouldersAbs));
        assert!("cardio".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn test_exercise_optional_fields_skipped() {
        let json = serde_json::to_string(&Exercise::new("Stiff", "4x10")).unwrap();
        assert_eq!(json, r#"{"name":"Stiff","sets":"4x10"}"#);
    }
}

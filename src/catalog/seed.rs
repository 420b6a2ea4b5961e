//! Built-in catalog used when nothing usable is persisted

use crate::workouts::{Exercise, MuscleGroup, Workout};

/// Short demo clip attached to the seeded exercises
pub const DEMO_VIDEO: &str = "https://www.w3schools.com/html/mov_bbb.mp4";

pub fn seed_catalog() -> Vec<Workout> {
    vec![
        Workout {
            id: "chest-tri".to_string(),
            name: "Peito & Tríceps Pro".to_string(),
            muscle_group: MuscleGroup::ChestTriceps,
            description: "Foco total em hipertrofia do peitoral e força de tríceps.".to_string(),
            duration: "50 min".to_string(),
            media_url: Some(
                "https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            exercises: vec![
                Exercise::new("Supino Reto Barra", "4x10")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Desça a barra até o meio do peito. Mantenha os cotovelos a 45 graus e suba explodindo."),
                Exercise::new("Supino Inclinado Halter", "3x12")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Foco na parte superior do peito. Mantenha o controle na descida."),
                Exercise::new("Crucifixo Máquina", "3x15"),
                Exercise::new("Tríceps Corda", "4x12")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Mantenha os cotovelos colados ao corpo e abra a corda no final do movimento."),
                Exercise::new("Tríceps Testa", "3x10"),
            ],
        },
        Workout {
            id: "back-bi".to_string(),
            name: "Dorsal & Bíceps V-Shape".to_string(),
            muscle_group: MuscleGroup::BackBiceps,
            description: "Largura de costas e pico de bíceps para estética clássica.".to_string(),
            duration: "55 min".to_string(),
            media_url: Some(
                "https://images.unsplash.com/photo-1603287611837-f59f3f4d9c75?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            exercises: vec![
                Exercise::new("Puxada Aberta", "4x10")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Puxe a barra em direção ao peito, não ao pescoço. Sinta as escápulas fecharem."),
                Exercise::new("Remada Curvada", "4x12"),
                Exercise::new("Rosca Direta Barra W", "4x10")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Evite balançar o corpo. Foque totalmente no bíceps."),
                Exercise::new("Rosca Martelo", "3x12"),
            ],
        },
        Workout {
            id: "legs-glute".to_string(),
            name: "Pernas de Aço".to_string(),
            muscle_group: MuscleGroup::LegsGlutes,
            description: "O treino mais difícil da semana. Foco em força bruta.".to_string(),
            duration: "65 min".to_string(),
            media_url: Some(
                "https://images.unsplash.com/photo-1581009146145-b5ef050c2e1e?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            ),
            exercises: vec![
                Exercise::new("Agachamento Livre", "4x8")
                    .with_media(DEMO_VIDEO)
                    .with_explanation("Mantenha as costas retas e desça até os joelhos formarem 90 graus."),
                Exercise::new("Leg Press 45", "3x12").with_media(DEMO_VIDEO),
                Exercise::new("Cadeira Extensora", "4x15"),
                Exercise::new("Stiff", "4x10"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let seed = seed_catalog();
        let ids: HashSet<_> = seed.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids.len(), seed.len());
    }
}

use rand::Rng;

use crate::shot::{BLOCKED_SHOT_EVENT, ShotEvent};

const SAMPLE_SHOT_TYPES: &[&str] = &["Wrist Shot", "Slap Shot", "Snap Shot", "Backhand"];
const SAMPLE_TEAMS: &[&str] = &["DAL", "MIN", "COL", "NSH"];

/// Three hand-placed shots followed by `extra` random ones clustered in the
/// offensive zone.
pub fn sample_shots<R: Rng>(rng: &mut R, extra: usize) -> Vec<ShotEvent> {
    let mut shots = vec![
        ShotEvent {
            goal: Some(true),
            on_goal: true,
            shot_type: "Wrist Shot".to_string(),
            distance: 15.0,
            angle: 0.0,
            xg: 0.25,
            period: 1,
            team: "DAL".to_string(),
            shooter: "Tyler Seguin".to_string(),
            ..ShotEvent::at("1", 70.0, 0.0)
        },
        ShotEvent {
            goal: Some(false),
            on_goal: true,
            shot_type: "Slap Shot".to_string(),
            distance: 30.0,
            angle: 15.0,
            xg: 0.08,
            period: 2,
            team: "DAL".to_string(),
            shooter: "Jamie Benn".to_string(),
            ..ShotEvent::at("2", 60.0, 10.0)
        },
        ShotEvent {
            goal: Some(false),
            on_goal: false,
            event: Some(BLOCKED_SHOT_EVENT.to_string()),
            shot_type: "Wrist Shot".to_string(),
            distance: 12.0,
            angle: -8.0,
            xg: 0.15,
            period: 3,
            team: "DAL".to_string(),
            shooter: "Roope Hintz".to_string(),
            ..ShotEvent::at("3", 75.0, -5.0)
        },
    ];

    for i in 0..extra {
        let n = i + 4;
        // Half of the random shots land at the far end so normalization has work to do.
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let (home_skaters, away_skaters) = match rng.gen_range(0..10) {
            0 => (6, 5),
            1 => (5, 6),
            _ => (6, 6),
        };
        shots.push(ShotEvent {
            id: format!("sample-{n}"),
            x: Some(side * rng.gen_range(50.0..90.0)),
            y: Some(side * rng.gen_range(-20.0..20.0)),
            goal: Some(rng.gen_bool(0.1)),
            on_goal: rng.gen_bool(0.7),
            event: rng
                .gen_bool(0.3)
                .then(|| BLOCKED_SHOT_EVENT.to_string()),
            shot_type: SAMPLE_SHOT_TYPES[rng.gen_range(0..SAMPLE_SHOT_TYPES.len())].to_string(),
            distance: rng.gen_range(10.0..50.0),
            angle: rng.gen_range(-30.0..30.0),
            xg: rng.gen_range(0.0..0.4),
            period: rng.gen_range(1..=3),
            team: SAMPLE_TEAMS[rng.gen_range(0..SAMPLE_TEAMS.len())].to_string(),
            is_home_team: rng.gen_bool(0.5),
            home_skaters,
            away_skaters,
            shooter: format!("Player {n}"),
            ..ShotEvent::default()
        });
    }

    shots
}

use tracing::debug;

use crate::shot::{NormalizedShot, ShotEvent};

/// Rotate a rink point 180 degrees about center ice when it sits in the
/// negative-x half. Points on the center line stay where they are.
pub fn normalize_point(x: f64, y: f64) -> (f64, f64, bool) {
    if x < 0.0 { (-x, -y, true) } else { (x, y, false) }
}

// The flip is decided from the recorded sign alone; period and home/away are
// not consulted. Teams switch ends every period, and the sign already encodes
// which end was attacked.
pub fn normalize(shot: &ShotEvent) -> Option<NormalizedShot> {
    let (x, y) = shot.coordinates()?;
    let (x, y, flipped) = normalize_point(x, y);
    Some(NormalizedShot {
        shot: shot.clone(),
        x,
        y,
        flipped,
    })
}

pub fn normalize_all(shots: &[ShotEvent]) -> (Vec<NormalizedShot>, usize) {
    let mut out = Vec::with_capacity(shots.len());
    let mut skipped = 0usize;
    for shot in shots {
        match normalize(shot) {
            Some(n) => out.push(n),
            None => {
                skipped += 1;
                debug!(shot_id = %shot.id, "skipping shot without usable coordinates");
            }
        }
    }
    (out, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_line_is_not_flipped() {
        assert_eq!(normalize_point(0.0, -12.0), (0.0, -12.0, false));
    }

    #[test]
    fn missing_geometry_is_skipped() {
        let shots = vec![
            ShotEvent::at("a", -10.0, 4.0),
            ShotEvent {
                id: "b".to_string(),
                x: Some(20.0),
                y: None,
                ..ShotEvent::default()
            },
        ];
        let (normalized, skipped) = normalize_all(&shots);
        assert_eq!(normalized.len(), 1);
        assert_eq!(skipped, 1);
        assert!(normalized[0].flipped);
    }
}

use serde::{Deserialize, Serialize};

pub const RINK_HALF_LENGTH: f64 = 100.0;
pub const RINK_HALF_WIDTH: f64 = 42.5;

// Skaters on ice for one side at full strength, goalie included.
pub const EVEN_STRENGTH_SKATERS: u8 = 6;

pub const BLOCKED_SHOT_EVENT: &str = "BLOCKED_SHOT";

/// Coordinates are rink-centered feet. Rows without geometry pass the filter
/// but never reach a bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvent {
    pub id: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub team: String,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub is_home_team: bool,
    pub period: u8,
    pub shot_type: String,
    pub distance: f64,
    pub angle: f64,
    pub xg: f64,
    pub on_goal: bool,
    // Explicit outcome when the source carries one (CSV does, the live API does not).
    pub goal: Option<bool>,
    pub empty_net: bool,
    pub rebound: bool,
    pub rush: bool,
    pub event: Option<String>,
    pub game_id: Option<String>,
    pub time: Option<f64>,
    // 0 means the source did not report a count.
    pub home_skaters: u8,
    pub away_skaters: u8,
    pub shooter: String,
}

impl Default for ShotEvent {
    fn default() -> Self {
        Self {
            id: String::new(),
            x: None,
            y: None,
            team: String::new(),
            home_team: None,
            away_team: None,
            is_home_team: false,
            period: 1,
            shot_type: String::new(),
            distance: 0.0,
            angle: 0.0,
            xg: 0.0,
            on_goal: false,
            goal: None,
            empty_net: false,
            rebound: false,
            rush: false,
            event: None,
            game_id: None,
            time: None,
            home_skaters: EVEN_STRENGTH_SKATERS,
            away_skaters: EVEN_STRENGTH_SKATERS,
            shooter: String::new(),
        }
    }
}

impl ShotEvent {
    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Enforce the ingestion invariants: xG inside [0, 1], period at least 1
    /// and only finite coordinates.
    pub fn sanitized(mut self) -> Self {
        self.xg = if self.xg.is_finite() {
            self.xg.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.period = self.period.max(1);
        self.x = self.x.filter(|v| v.is_finite());
        self.y = self.y.filter(|v| v.is_finite());
        if !self.distance.is_finite() {
            self.distance = 0.0;
        }
        if !self.angle.is_finite() {
            self.angle = 0.0;
        }
        self
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }

    pub fn shooting_skaters(&self) -> u8 {
        if self.is_home_team {
            self.home_skaters
        } else {
            self.away_skaters
        }
    }

    pub fn opposing_skaters(&self) -> u8 {
        if self.is_home_team {
            self.away_skaters
        } else {
            self.home_skaters
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.event
            .as_deref()
            .is_some_and(|e| e.trim().eq_ignore_ascii_case(BLOCKED_SHOT_EVENT))
    }
}

/// A shot rotated so that it attacks the positive-x goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedShot {
    pub shot: ShotEvent,
    pub x: f64,
    pub y: f64,
    pub flipped: bool,
}

impl NormalizedShot {
    pub fn xg(&self) -> f64 {
        self.shot.xg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ShotSummary {
    pub total_shots: usize,
    pub total_xg: f64,
    pub avg_xg: f64,
}

impl ShotSummary {
    pub fn from_shots<'a>(shots: impl IntoIterator<Item = &'a NormalizedShot>) -> Self {
        let mut total_shots = 0usize;
        let mut total_xg = 0.0;
        for shot in shots {
            total_shots += 1;
            total_xg += shot.xg();
        }
        let avg_xg = if total_shots == 0 {
            0.0
        } else {
            total_xg / total_shots as f64
        };
        Self {
            total_shots,
            total_xg,
            avg_xg,
        }
    }
}

pub fn period_label(period: u8) -> String {
    match period {
        0 | 1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        4 => "OT".to_string(),
        _ => "SO".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_xg_and_period() {
        let shot = ShotEvent {
            xg: 1.7,
            period: 0,
            x: Some(f64::NAN),
            y: Some(3.0),
            ..ShotEvent::default()
        }
        .sanitized();
        assert_eq!(shot.xg, 1.0);
        assert_eq!(shot.period, 1);
        assert!(shot.x.is_none());
        assert!(shot.coordinates().is_none());
    }

    #[test]
    fn skater_sides_follow_home_flag() {
        let shot = ShotEvent {
            is_home_team: false,
            home_skaters: 5,
            away_skaters: 6,
            ..ShotEvent::default()
        };
        assert_eq!(shot.shooting_skaters(), 6);
        assert_eq!(shot.opposing_skaters(), 5);
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let summary = ShotSummary::from_shots(std::iter::empty::<&NormalizedShot>());
        assert_eq!(summary.total_shots, 0);
        assert_eq!(summary.avg_xg, 0.0);
    }
}

use serde::{Deserialize, Serialize};

use crate::shot::{EVEN_STRENGTH_SKATERS, ShotEvent};

pub const DEFAULT_GOAL_XG_THRESHOLD: f64 = 0.95;
pub const DEFAULT_HEX_RADIUS: f64 = 15.0;
pub const DEFAULT_FETCH_LIMIT: usize = 5000;
pub const MIN_HEX_RADIUS: f64 = 4.0;
pub const MAX_HEX_RADIUS: f64 = 40.0;
pub const HIGH_QUALITY_XG: f64 = 0.8;
pub const HIGH_DANGER_XG: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotResult {
    Goal,
    OnGoal,
    Miss,
    Block,
}

impl ShotResult {
    pub const ALL: [ShotResult; 4] = [
        ShotResult::Goal,
        ShotResult::OnGoal,
        ShotResult::Miss,
        ShotResult::Block,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            ShotResult::Goal => "goal",
            ShotResult::OnGoal => "shot",
            ShotResult::Miss => "miss",
            ShotResult::Block => "block",
        }
    }

    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "goal" | "goals" => Some(ShotResult::Goal),
            "shot" | "ongoal" | "on-goal" | "on_goal" | "sog" => Some(ShotResult::OnGoal),
            "miss" | "missed" => Some(ShotResult::Miss),
            "block" | "blocked" => Some(ShotResult::Block),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotResult::Goal => "Goals",
            ShotResult::OnGoal => "On goal",
            ShotResult::Miss => "Missed",
            ShotResult::Block => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Situation {
    EvenStrength,
    PowerPlay,
    ShortHanded,
    EmptyNet,
}

impl Situation {
    pub const ALL: [Situation; 4] = [
        Situation::EvenStrength,
        Situation::PowerPlay,
        Situation::ShortHanded,
        Situation::EmptyNet,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            Situation::EvenStrength => "even",
            Situation::PowerPlay => "powerplay",
            Situation::ShortHanded => "shorthanded",
            Situation::EmptyNet => "emptynet",
        }
    }

    pub fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "even" | "es" | "evenstrength" | "even-strength" => Some(Situation::EvenStrength),
            "powerplay" | "pp" | "power-play" => Some(Situation::PowerPlay),
            "shorthanded" | "sh" | "pk" | "penaltykill" | "short-handed" => {
                Some(Situation::ShortHanded)
            }
            "emptynet" | "en" | "empty-net" => Some(Situation::EmptyNet),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Situation::EvenStrength => "Even strength",
            Situation::PowerPlay => "Power play",
            Situation::ShortHanded => "Short handed",
            Situation::EmptyNet => "Empty net",
        }
    }
}

/// Decides whether a shot counts as a goal.
///
/// An explicit goal flag always wins. Sources without one fall back to an
/// xG threshold, which is only a proxy for the real outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRule {
    pub xg_threshold: f64,
}

impl Default for GoalRule {
    fn default() -> Self {
        Self {
            xg_threshold: DEFAULT_GOAL_XG_THRESHOLD,
        }
    }
}

impl GoalRule {
    pub fn is_goal(&self, shot: &ShotEvent) -> bool {
        shot.goal.unwrap_or_else(|| self.heuristic(shot))
    }

    pub fn heuristic(&self, shot: &ShotEvent) -> bool {
        shot.xg > self.xg_threshold
    }

    pub fn divergence_count(&self, shots: &[ShotEvent]) -> usize {
        shots
            .iter()
            .filter(|s| s.goal.is_some_and(|g| g != self.heuristic(s)))
            .count()
    }
}

fn skaters_known(shot: &ShotEvent) -> bool {
    shot.home_skaters > 0 && shot.away_skaters > 0
}

pub fn is_even_strength(shot: &ShotEvent) -> bool {
    shot.home_skaters == EVEN_STRENGTH_SKATERS && shot.away_skaters == EVEN_STRENGTH_SKATERS
}

// An extra attacker (pulled goalie) counts as a man advantage too.
pub fn is_power_play(shot: &ShotEvent) -> bool {
    if !skaters_known(shot) {
        return false;
    }
    let own = shot.shooting_skaters();
    own > shot.opposing_skaters() || own > EVEN_STRENGTH_SKATERS
}

pub fn is_short_handed(shot: &ShotEvent) -> bool {
    skaters_known(shot) && shot.shooting_skaters() < shot.opposing_skaters()
}

pub fn is_empty_net(shot: &ShotEvent) -> bool {
    shot.empty_net
}

pub fn matches_situation(shot: &ShotEvent, situation: Situation) -> bool {
    match situation {
        Situation::EvenStrength => is_even_strength(shot),
        Situation::PowerPlay => is_power_play(shot),
        Situation::ShortHanded => is_short_handed(shot),
        Situation::EmptyNet => is_empty_net(shot),
    }
}

pub fn matches_result(shot: &ShotEvent, result: ShotResult, rule: GoalRule) -> bool {
    match result {
        ShotResult::Goal => rule.is_goal(shot),
        ShotResult::OnGoal => shot.on_goal,
        ShotResult::Miss => !shot.on_goal,
        ShotResult::Block => shot.is_blocked(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub teams: Vec<String>,
    pub players: Vec<String>,
    pub periods: Vec<u8>,
    pub shot_types: Vec<String>,
    pub xg_min: Option<f64>,
    pub xg_max: Option<f64>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub game_id: Option<String>,
    pub shot_result: Option<ShotResult>,
    pub situation: Option<Situation>,
    pub goal_rule: GoalRule,
    pub show_hexagons: bool,
    pub show_individual_shots: bool,
    pub hex_radius: f64,
    pub limit: usize,
    pub offset: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            players: Vec::new(),
            periods: Vec::new(),
            shot_types: Vec::new(),
            xg_min: Some(0.0),
            xg_max: Some(1.0),
            distance_min: None,
            distance_max: None,
            home_team: None,
            away_team: None,
            game_id: None,
            shot_result: None,
            situation: None,
            goal_rule: GoalRule::default(),
            show_hexagons: true,
            show_individual_shots: true,
            hex_radius: DEFAULT_HEX_RADIUS,
            limit: DEFAULT_FETCH_LIMIT,
            offset: 0,
        }
    }
}

impl FilterState {
    pub fn pass_through() -> Self {
        Self {
            xg_min: None,
            xg_max: None,
            ..Self::default()
        }
    }

    pub fn matches(&self, shot: &ShotEvent) -> bool {
        if !self.teams.is_empty() && !self.teams.iter().any(|t| t == &shot.team) {
            return false;
        }
        if !self.players.is_empty() && !self.players.iter().any(|p| p == &shot.shooter) {
            return false;
        }
        if !self.periods.is_empty() && !self.periods.contains(&shot.period) {
            return false;
        }
        if !self.shot_types.is_empty()
            && !self
                .shot_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&shot.shot_type))
        {
            return false;
        }
        if let Some(min) = self.xg_min
            && shot.xg < min
        {
            return false;
        }
        if let Some(max) = self.xg_max
            && shot.xg > max
        {
            return false;
        }
        if let Some(min) = self.distance_min
            && shot.distance < min
        {
            return false;
        }
        if let Some(max) = self.distance_max
            && shot.distance > max
        {
            return false;
        }
        if let Some(home) = self.home_team.as_deref()
            && shot.home_team.as_deref() != Some(home)
        {
            return false;
        }
        if let Some(away) = self.away_team.as_deref()
            && shot.away_team.as_deref() != Some(away)
        {
            return false;
        }
        if let Some(game_id) = self.game_id.as_deref()
            && shot.game_id.as_deref() != Some(game_id)
        {
            return false;
        }
        if let Some(result) = self.shot_result
            && !matches_result(shot, result, self.goal_rule)
        {
            return false;
        }
        if let Some(situation) = self.situation
            && !matches_situation(shot, situation)
        {
            return false;
        }
        true
    }

    pub fn toggle_team(&mut self, team: &str) {
        toggle(&mut self.teams, team.to_string());
    }

    pub fn toggle_period(&mut self, period: u8) {
        toggle(&mut self.periods, period);
        self.periods.sort_unstable();
    }

    pub fn set_xg_range(&mut self, min: f64, max: f64) {
        let min = min.clamp(0.0, 1.0);
        let max = max.clamp(0.0, 1.0);
        self.xg_min = Some(min.min(max));
        self.xg_max = Some(max.max(min));
    }

    // Raising the floor past the ceiling lifts the ceiling with it.
    pub fn set_xg_floor(&mut self, min: f64) {
        let max = self.xg_max.unwrap_or(1.0);
        self.set_xg_range(min, max.max(min));
    }

    pub fn clear_selection(&mut self) {
        self.teams.clear();
        self.periods.clear();
        self.set_xg_range(0.0, 1.0);
    }

    pub fn cycle_shot_result(&mut self) {
        self.shot_result = cycle(self.shot_result, &ShotResult::ALL);
    }

    pub fn cycle_situation(&mut self) {
        self.situation = cycle(self.situation, &Situation::ALL);
    }

    pub fn set_hex_radius(&mut self, radius: f64) {
        self.hex_radius = radius.clamp(MIN_HEX_RADIUS, MAX_HEX_RADIUS);
    }

    /// True when a change between `self` and `next` has to go back to the
    /// shot-data source rather than only re-binning what is loaded.
    pub fn needs_refetch(&self, next: &FilterState) -> bool {
        self.teams != next.teams
            || self.players != next.players
            || self.periods != next.periods
            || self.shot_types != next.shot_types
            || self.xg_min != next.xg_min
            || self.xg_max != next.xg_max
            || self.distance_min != next.distance_min
            || self.distance_max != next.distance_max
            || self.home_team != next.home_team
            || self.away_team != next.away_team
            || self.game_id != next.game_id
            || self.shot_result != next.shot_result
            || self.situation != next.situation
            || self.limit != next.limit
            || self.offset != next.offset
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|v| *v == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}

fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|v| *v == value)?;
            all.get(idx + 1).copied()
        }
    }
}

pub fn apply(shots: &[ShotEvent], filter: &FilterState) -> Vec<ShotEvent> {
    shots.iter().filter(|s| filter.matches(s)).cloned().collect()
}

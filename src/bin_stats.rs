use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::filter::{GoalRule, is_empty_net, is_even_strength, is_power_play, is_short_handed};
use crate::hexbin::HexBin;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinStats {
    pub x: f64,
    pub y: f64,
    pub count: usize,
    pub avg_xg: f64,
    pub goals: usize,
    pub on_goal_count: usize,
    pub conversion_rate: f64,
    pub on_goal_rate: f64,
    pub avg_distance: f64,
    pub avg_angle: f64,
    pub shot_types: Vec<String>,
    pub power_play: usize,
    pub penalty_kill: usize,
    pub even_strength: usize,
    pub empty_net: usize,
    pub top_shooter: Option<String>,
    pub top_shooter_count: usize,
}

impl BinStats {
    pub fn shot_types_label(&self) -> String {
        self.shot_types.join(", ")
    }

    pub fn top_shooter_label(&self) -> &str {
        self.top_shooter.as_deref().unwrap_or("N/A")
    }
}

pub fn summarize(bin: &HexBin, rule: GoalRule) -> BinStats {
    let count = bin.shots.len();
    let mut xg_sum = 0.0;
    let mut distance_sum = 0.0;
    let mut angle_sum = 0.0;
    let mut goals = 0usize;
    let mut on_goal_count = 0usize;
    let mut power_play = 0usize;
    let mut penalty_kill = 0usize;
    let mut even_strength = 0usize;
    let mut empty_net = 0usize;
    let mut shot_types: Vec<String> = Vec::new();
    let mut shooter_counts: HashMap<&str, usize> = HashMap::new();
    let mut shooter_order: Vec<&str> = Vec::new();

    for n in &bin.shots {
        let shot = &n.shot;
        xg_sum += shot.xg;
        distance_sum += shot.distance;
        angle_sum += shot.angle.abs();
        if rule.is_goal(shot) {
            goals += 1;
        }
        if shot.on_goal {
            on_goal_count += 1;
        }
        if is_power_play(shot) {
            power_play += 1;
        }
        if is_short_handed(shot) {
            penalty_kill += 1;
        }
        if is_even_strength(shot) {
            even_strength += 1;
        }
        if is_empty_net(shot) {
            empty_net += 1;
        }
        let shot_type = shot.shot_type.trim();
        if !shot_type.is_empty() && !shot_types.iter().any(|t| t == shot_type) {
            shot_types.push(shot_type.to_string());
        }
        let shooter = shot.shooter.trim();
        if !shooter.is_empty() {
            let entry = shooter_counts.entry(shooter).or_insert(0);
            if *entry == 0 {
                shooter_order.push(shooter);
            }
            *entry += 1;
        }
    }

    // Strictly greater keeps the first-seen shooter on ties.
    let mut top_shooter: Option<&str> = None;
    let mut top_shooter_count = 0usize;
    for name in shooter_order {
        let c = shooter_counts.get(name).copied().unwrap_or(0);
        if c > top_shooter_count {
            top_shooter = Some(name);
            top_shooter_count = c;
        }
    }

    BinStats {
        x: bin.x,
        y: bin.y,
        count,
        avg_xg: mean(xg_sum, count),
        goals,
        on_goal_count,
        conversion_rate: rate(goals, count),
        on_goal_rate: rate(on_goal_count, count),
        avg_distance: mean(distance_sum, count),
        avg_angle: mean(angle_sum, count),
        shot_types,
        power_play,
        penalty_kill,
        even_strength,
        empty_net,
        top_shooter: top_shooter.map(str::to_string),
        top_shooter_count,
    }
}

pub fn summarize_all(bins: &[HexBin], rule: GoalRule) -> Vec<BinStats> {
    bins.par_iter().map(|bin| summarize(bin, rule)).collect()
}

pub fn max_count(stats: &[BinStats]) -> usize {
    stats.iter().map(|s| s.count).max().unwrap_or(0)
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn rate(part: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        part as f64 / count as f64 * 100.0
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_xg(value: f64) -> String {
    format!("{value:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::shot::ShotEvent;

    fn bin_of(shots: Vec<ShotEvent>) -> HexBin {
        HexBin {
            x: 0.0,
            y: 0.0,
            cell: crate::hexbin::HexCell { col: 0, row: 0 },
            shots: shots.iter().filter_map(normalize).collect(),
        }
    }

    #[test]
    fn top_shooter_tie_goes_to_first_seen() {
        let names = ["Benn", "Hintz", "Hintz", "Benn", "Seguin"];
        let shots = names
            .iter()
            .enumerate()
            .map(|(i, name)| ShotEvent {
                shooter: name.to_string(),
                ..ShotEvent::at(i.to_string(), 60.0, 0.0)
            })
            .collect();
        let stats = summarize(&bin_of(shots), GoalRule::default());
        assert_eq!(stats.top_shooter.as_deref(), Some("Benn"));
        assert_eq!(stats.top_shooter_count, 2);
    }

    #[test]
    fn angle_is_averaged_on_absolute_value() {
        let shots = vec![
            ShotEvent {
                angle: -30.0,
                distance: 10.0,
                ..ShotEvent::at("a", 60.0, 0.0)
            },
            ShotEvent {
                angle: 10.0,
                distance: 20.0,
                ..ShotEvent::at("b", 60.0, 0.0)
            },
        ];
        let stats = summarize(&bin_of(shots), GoalRule::default());
        assert_eq!(stats.avg_angle, 20.0);
        assert_eq!(stats.avg_distance, 15.0);
    }

    #[test]
    fn percentages_render_one_decimal() {
        assert_eq!(format_pct(33.333_333), "33.3%");
        assert_eq!(format_xg(0.05), "0.050");
    }
}

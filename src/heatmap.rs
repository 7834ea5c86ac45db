use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::bin_stats::{self, BinStats};
use crate::filter::{self, FilterState};
use crate::hexbin::{self, HexBin, RinkProjector};
use crate::normalize::normalize_all;
use crate::shot::{NormalizedShot, ShotEvent, ShotSummary};

pub const DEFAULT_HIGH_VALUE_XG: f64 = 0.15;

#[derive(Debug, Clone, Default, Serialize)]
pub struct HeatMapView {
    pub shots: Vec<NormalizedShot>,
    pub bins: Vec<HexBin>,
    pub stats: Vec<BinStats>,
    pub summary: ShotSummary,
    pub filtered_out: usize,
    pub skipped_geometry: usize,
}

impl HeatMapView {
    pub fn max_count(&self) -> usize {
        bin_stats::max_count(&self.stats)
    }

    pub fn high_value_shots(&self, threshold: f64) -> Vec<(usize, &NormalizedShot)> {
        high_value_shots(&self.shots, threshold)
    }

    pub fn bin_at(&self, radius: f64, px: f64, py: f64) -> Option<usize> {
        let grid = hexbin::HexGrid::new(radius).ok()?;
        let cell = grid.cell_of(px, py);
        self.bins.iter().position(|b| b.cell == cell)
    }
}

pub fn high_value_shots(shots: &[NormalizedShot], threshold: f64) -> Vec<(usize, &NormalizedShot)> {
    shots
        .iter()
        .filter(|s| s.xg() > threshold)
        .enumerate()
        .collect()
}

/// filter -> normalize -> bin -> summarize. Pure; the same inputs always give
/// the same view.
pub fn compute(
    shots: &[ShotEvent],
    filter: &FilterState,
    projector: &RinkProjector,
) -> Result<HeatMapView> {
    let filtered = filter::apply(shots, filter);
    let filtered_out = shots.len() - filtered.len();
    let (normalized, skipped_geometry) = normalize_all(&filtered);
    let bins = hexbin::bin_on_rink(&normalized, filter.hex_radius, projector)
        .context("bin shots")?;
    let stats = bin_stats::summarize_all(&bins, filter.goal_rule);
    let summary = ShotSummary::from_shots(&normalized);
    debug!(
        input = shots.len(),
        kept = normalized.len(),
        bins = bins.len(),
        "heat map recomputed"
    );
    Ok(HeatMapView {
        shots: normalized,
        bins,
        stats,
        summary,
        filtered_out,
        skipped_geometry,
    })
}

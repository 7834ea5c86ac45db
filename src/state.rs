use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::filter::{FilterState, GoalRule};
use crate::heatmap::{self, HeatMapView};
use crate::hexbin::RinkProjector;
use crate::render::marker_radius;
use crate::shot::ShotEvent;
use crate::shots_fetch::ShotQuery;
use crate::tooltip::{self, ElementId, Tooltip, TooltipEvent, TooltipPayload, TooltipState};

// Extra pixels around a shot marker that still count as a hit.
const MARKER_HIT_SLOP: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Csv(PathBuf),
    Sample,
}

impl DataSource {
    pub fn label(&self) -> String {
        match self {
            DataSource::Live => "live".to_string(),
            DataSource::Csv(path) => format!("csv {}", path.display()),
            DataSource::Sample => "sample".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub filter: FilterState,
    pub source: DataSource,
    pub shots: Vec<ShotEvent>,
    pub total_count: usize,
    pub status: LoadStatus,
    pub loaded_at: Option<String>,
    pub view: HeatMapView,
    pub projector: RinkProjector,
    pub tooltip: TooltipState,
    pub selected_bin: Option<usize>,
    pub available_teams: Vec<String>,
    pub team_cursor: usize,
    pub goal_divergence: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let filter = FilterState {
            hex_radius: config.hex_radius,
            limit: config.fetch_limit,
            goal_rule: GoalRule {
                xg_threshold: config.goal_xg_threshold,
            },
            ..FilterState::default()
        };
        let source = if config.api.is_some() {
            DataSource::Live
        } else {
            DataSource::Sample
        };
        let projector = RinkProjector::for_canvas(config.canvas_width, config.canvas_height);
        Self {
            config,
            filter,
            source,
            shots: Vec::new(),
            total_count: 0,
            status: LoadStatus::Idle,
            loaded_at: None,
            view: HeatMapView::default(),
            projector,
            tooltip: TooltipState::Hidden,
            selected_bin: None,
            available_teams: Vec::new(),
            team_cursor: 0,
            goal_divergence: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn recompute(&mut self) {
        match heatmap::compute(&self.shots, &self.filter, &self.projector) {
            Ok(view) => self.view = view,
            Err(err) => {
                self.push_log(format!("[WARN] Heat map rebuild failed: {err:#}"));
                self.view = HeatMapView::default();
            }
        }
        self.goal_divergence = self.filter.goal_rule.divergence_count(&self.shots);

        let bins = self.view.bins.len();
        let markers = self.high_value_count();
        let tooltip = std::mem::take(&mut self.tooltip);
        self.tooltip = tooltip.retain_if(|element| match element {
            ElementId::Hexagon(i) => i < bins,
            ElementId::Shot(i) => i < markers,
        });
        if self.selected_bin.is_some_and(|i| i >= bins) {
            self.selected_bin = None;
        }
    }

    pub fn set_filter(&mut self, next: FilterState) -> Option<ProviderCommand> {
        let refetch = self.source == DataSource::Live && self.filter.needs_refetch(&next);
        self.filter = next;
        if refetch {
            return self.request_reload();
        }
        self.recompute();
        None
    }

    pub fn request_reload(&mut self) -> Option<ProviderCommand> {
        match self.source.clone() {
            DataSource::Live => {
                let query = ShotQuery::from_filter(&self.filter);
                if query.selects_nothing() {
                    self.shots.clear();
                    self.total_count = 0;
                    self.status = LoadStatus::Ready;
                    self.recompute();
                    return None;
                }
                self.status = LoadStatus::Loading;
                Some(ProviderCommand::FetchShots(query))
            }
            DataSource::Csv(path) => {
                self.status = LoadStatus::Loading;
                Some(ProviderCommand::LoadCsv(path))
            }
            DataSource::Sample => {
                self.status = LoadStatus::Loading;
                Some(ProviderCommand::LoadSample {
                    count: SAMPLE_SHOT_COUNT,
                })
            }
        }
    }

    pub fn switch_source(&mut self, source: DataSource) -> Option<ProviderCommand> {
        self.source = source;
        self.tooltip = TooltipState::Hidden;
        self.selected_bin = None;
        self.request_reload()
    }

    pub fn cursor_team(&self) -> Option<&str> {
        self.available_teams.get(self.team_cursor).map(String::as_str)
    }

    pub fn move_team_cursor(&mut self, forward: bool) {
        let len = self.available_teams.len();
        if len == 0 {
            self.team_cursor = 0;
            return;
        }
        self.team_cursor = if forward {
            (self.team_cursor + 1) % len
        } else {
            (self.team_cursor + len - 1) % len
        };
    }

    pub fn select_next_bin(&mut self, forward: bool) {
        let len = self.view.bins.len();
        if len == 0 {
            self.selected_bin = None;
            return;
        }
        self.selected_bin = Some(match self.selected_bin {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        });
    }

    fn high_value_count(&self) -> usize {
        if !self.filter.show_individual_shots {
            return 0;
        }
        self.view.high_value_shots(self.config.high_value_xg).len()
    }

    // Shot markers sit above hexagons.
    pub fn element_at(&self, px: f64, py: f64) -> Option<ElementId> {
        if self.filter.show_individual_shots {
            let hit = self
                .view
                .high_value_shots(self.config.high_value_xg)
                .into_iter()
                .rev()
                .find(|(_, shot)| {
                    let (sx, sy) = self.projector.project_shot(shot);
                    let r = marker_radius(shot.xg()) + MARKER_HIT_SLOP;
                    (sx - px).powi(2) + (sy - py).powi(2) <= r * r
                });
            if let Some((i, _)) = hit {
                return Some(ElementId::Shot(i));
            }
        }
        if self.filter.show_hexagons {
            return self
                .view
                .bin_at(self.filter.hex_radius, px, py)
                .map(ElementId::Hexagon);
        }
        None
    }

    pub fn tooltip_for(&self, element: ElementId, px: f64, py: f64) -> Option<Tooltip> {
        let payload = match element {
            ElementId::Hexagon(i) => TooltipPayload::Hexagon(self.view.stats.get(i)?.clone()),
            ElementId::Shot(i) => {
                let shots = self.view.high_value_shots(self.config.high_value_xg);
                let (_, shot) = shots.get(i)?;
                TooltipPayload::Shot((*shot).clone())
            }
        };
        let (x, y) = tooltip::place(px, py, self.config.canvas_width, self.config.canvas_height);
        Some(Tooltip {
            element,
            payload,
            x,
            y,
        })
    }

    pub fn tooltip_event(&mut self, event: TooltipEvent) {
        let current = std::mem::take(&mut self.tooltip);
        self.tooltip = current.apply(event);
    }

    pub fn hover(&mut self, px: f64, py: f64) {
        let under = self.element_at(px, py);
        let shown = self.tooltip.element();
        if under == shown {
            return;
        }
        if let Some(prev) = shown {
            self.tooltip_event(TooltipEvent::PointerLeave(prev));
        }
        if let Some(element) = under
            && let Some(tip) = self.tooltip_for(element, px, py)
        {
            self.tooltip_event(TooltipEvent::PointerEnter(tip));
        }
    }

    pub fn click(&mut self, px: f64, py: f64) {
        match self
            .element_at(px, py)
            .and_then(|element| self.tooltip_for(element, px, py))
        {
            Some(tip) => {
                if let ElementId::Hexagon(i) = tip.element {
                    self.selected_bin = Some(i);
                }
                self.tooltip_event(TooltipEvent::Click(tip));
            }
            None => self.tooltip_event(TooltipEvent::ClickOutside),
        }
    }

    pub fn toggle_pin_selected(&mut self) {
        let Some(i) = self.selected_bin else {
            return;
        };
        let Some(bin) = self.view.bins.get(i) else {
            return;
        };
        let (px, py) = (bin.x, bin.y);
        if let Some(tip) = self.tooltip_for(ElementId::Hexagon(i), px, py) {
            self.tooltip_event(TooltipEvent::Tap(tip));
        }
    }
}

pub const SAMPLE_SHOT_COUNT: usize = 400;

#[derive(Debug, Clone)]
pub enum Delta {
    ShotsLoaded {
        source: DataSource,
        shots: Vec<ShotEvent>,
        total_count: usize,
        skipped: usize,
    },
    FetchFailed {
        message: String,
    },
    TeamsLoaded(Vec<String>),
    Log(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCommand {
    FetchShots(ShotQuery),
    FetchTeams,
    LoadCsv(PathBuf),
    LoadSample { count: usize },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::ShotsLoaded {
            source,
            shots,
            total_count,
            skipped,
        } => {
            let loaded = shots.len();
            if source != DataSource::Live {
                state.available_teams = teams_in(&shots);
                if state.team_cursor >= state.available_teams.len() {
                    state.team_cursor = 0;
                }
            }
            state.shots = shots;
            state.total_count = total_count.max(loaded);
            state.status = LoadStatus::Ready;
            state.loaded_at = Some(chrono::Local::now().format("%H:%M:%S").to_string());
            state.push_log(format!(
                "[INFO] Loaded {loaded} shots from {} ({} total)",
                source.label(),
                state.total_count
            ));
            if skipped > 0 {
                state.push_log(format!("[WARN] Skipped {skipped} rows without usable geometry"));
            }
            state.source = source;
            state.recompute();
        }
        Delta::FetchFailed { message } => {
            state.push_log(format!("[WARN] Shot load failed: {message}"));
            state.shots.clear();
            state.total_count = 0;
            state.status = LoadStatus::Failed(message);
            state.recompute();
        }
        Delta::TeamsLoaded(teams) => {
            state.push_log(format!("[INFO] {} teams available", teams.len()));
            state.available_teams = teams;
            if state.team_cursor >= state.available_teams.len() {
                state.team_cursor = 0;
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

fn teams_in(shots: &[ShotEvent]) -> Vec<String> {
    shots
        .iter()
        .map(|s| s.team.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::filter::{FilterState, ShotResult, Situation};
use crate::http_client::build_http_client;
use crate::shot::ShotEvent;

const SHOTS_PATH: &str = "/api/shots";
const TEAMS_PATH: &str = "/api/teams";

/// Parameters sent to the live shot endpoint, named the way the endpoint
/// expects them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ShotQuery {
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
    pub limit: usize,
    pub offset: usize,
}

impl ShotQuery {
    pub fn from_filter(filter: &FilterState) -> Self {
        Self {
            teams: filter.teams.clone(),
            players: filter.players.clone(),
            periods: filter.periods.clone(),
            shot_types: filter.shot_types.clone(),
            xg_min: filter.xg_min,
            xg_max: filter.xg_max,
            distance_min: filter.distance_min,
            distance_max: filter.distance_max,
            home_team: filter.home_team.clone(),
            away_team: filter.away_team.clone(),
            game_id: filter.game_id.clone(),
            shot_result: filter.shot_result,
            situation: filter.situation,
            limit: filter.limit,
            offset: filter.offset,
        }
    }

    /// No team selected means nothing is requested at all.
    pub fn selects_nothing(&self) -> bool {
        self.teams.iter().all(|t| t.trim().is_empty())
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_list(&mut params, "teams", &self.teams);
        push_list(&mut params, "players", &self.players);
        if !self.periods.is_empty() {
            let joined = self
                .periods
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("periods", joined));
        }
        push_list(&mut params, "shotTypes", &self.shot_types);
        push_opt(&mut params, "xGoalMin", self.xg_min);
        push_opt(&mut params, "xGoalMax", self.xg_max);
        push_opt(&mut params, "minDistance", self.distance_min);
        push_opt(&mut params, "maxDistance", self.distance_max);
        if let Some(home) = self.home_team.as_deref().and_then(non_empty) {
            params.push(("homeTeam", home.to_string()));
        }
        if let Some(away) = self.away_team.as_deref().and_then(non_empty) {
            params.push(("awayTeam", away.to_string()));
        }
        if let Some(game_id) = self.game_id.as_deref().and_then(non_empty) {
            params.push(("gameId", game_id.to_string()));
        }
        if let Some(result) = self.shot_result {
            params.push(("shotResult", result.as_param().to_string()));
        }
        if let Some(situation) = self.situation {
            params.push(("situationCode", situation.as_param().to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("offset", self.offset.to_string()));
        params
    }
}

fn push_list(params: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    let joined = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if !joined.is_empty() {
        params.push((key, joined));
    }
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<f64>) {
    if let Some(v) = value
        && v.is_finite()
    {
        params.push((key, v.to_string()));
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShotPage {
    pub shots: Vec<ShotEvent>,
    pub count: usize,
    pub total_count: usize,
}

#[derive(Debug, Clone)]
pub struct ShotDataClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ShotDataClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(cfg.timeout)?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_shots(&self, query: &ShotQuery) -> Result<ShotPage> {
        if query.selects_nothing() {
            debug!("no team selected, skipping shot fetch");
            return Ok(ShotPage::default());
        }
        let url = format!("{}{}", self.base_url, SHOTS_PATH);
        let body = self.get(&url, &query.to_params())?;
        parse_shots_response_json(&body)
    }

    pub fn fetch_teams(&self) -> Result<Vec<String>> {
        let url = format!("{}{}", self.base_url, TEAMS_PATH);
        let body = self.get(&url, &[])?;
        parse_teams_response_json(&body)
    }

    fn get(&self, url: &str, params: &[(&'static str, String)]) -> Result<String> {
        let mut req = self.client.get(url).query(params);
        if let Some(key) = self.api_key.as_deref() {
            req = req.bearer_auth(key);
        }
        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            warn!(%status, url, "shot source returned an error");
            return Err(error_from_response(status, &body));
        }
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

fn error_from_response(status: StatusCode, body: &str) -> anyhow::Error {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let error = parsed.as_ref().and_then(|b| b.error.clone());
    let details = parsed.as_ref().and_then(|b| b.details.clone());

    let misconfigured = status == StatusCode::SERVICE_UNAVAILABLE
        || error
            .as_deref()
            .is_some_and(|e| e.contains("not configured") || e.contains("supabaseUrl is required"))
        || details.as_deref().is_some_and(|d| d.contains("Invalid API key"));
    if misconfigured {
        return anyhow!(
            "shot database is not configured on the server (http {status}); check its credentials"
        );
    }

    match (error, details) {
        (Some(error), Some(details)) => anyhow!("http {status}: {error} ({details})"),
        (Some(error), None) => anyhow!("http {status}: {error}"),
        _ => anyhow!("http {status}: failed to fetch shot data"),
    }
}

#[derive(Debug, Deserialize)]
struct ShotsResponse {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    count: Option<Value>,
    #[serde(rename = "totalCount", default)]
    total_count: Option<Value>,
}

pub fn parse_shots_response_json(raw: &str) -> Result<ShotPage> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ShotPage::default());
    }
    let resp: ShotsResponse = serde_json::from_str(trimmed).context("invalid shots json")?;
    let shots: Vec<ShotEvent> = resp.data.iter().filter_map(shot_from_row).collect();
    let count = resp
        .count
        .as_ref()
        .and_then(as_f64)
        .map(|v| v as usize)
        .unwrap_or(shots.len());
    let total_count = resp
        .total_count
        .as_ref()
        .and_then(as_f64)
        .map(|v| v as usize)
        .unwrap_or(count);
    Ok(ShotPage {
        shots,
        count,
        total_count,
    })
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<Value>,
}

pub fn parse_teams_response_json(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let resp: TeamsResponse = serde_json::from_str(trimmed).context("invalid teams json")?;
    let mut teams: Vec<String> = resp
        .teams
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => non_empty(s).map(str::to_string),
            Value::Object(_) => pick_string(v, &["code", "team_code", "abbreviation", "id"]),
            _ => None,
        })
        .collect();
    teams.sort();
    teams.dedup();
    Ok(teams)
}

fn shot_from_row(row: &Value) -> Option<ShotEvent> {
    if !row.is_object() {
        return None;
    }
    let id = pick_string(row, &["shot_id", "id"]).unwrap_or_default();
    let period = pick_f64(row, &["period"])
        .filter(|p| *p >= 1.0)
        .map(|p| p.min(u8::MAX as f64) as u8)
        .unwrap_or(1);
    let shot = ShotEvent {
        id,
        x: pick_f64(row, &["x_cord", "xCord"]),
        y: pick_f64(row, &["y_cord", "yCord"]),
        team: pick_string(row, &["team_code", "teamCode", "team"]).unwrap_or_default(),
        home_team: pick_string(row, &["home_team_code", "homeTeamCode"]),
        away_team: pick_string(row, &["away_team_code", "awayTeamCode"]),
        is_home_team: pick_bool(row, &["is_home_team", "isHomeTeam"]).unwrap_or(false),
        period,
        shot_type: pick_string(row, &["shot_type", "shotType"]).unwrap_or_default(),
        distance: pick_f64(row, &["shot_distance", "shotDistance"]).unwrap_or(0.0),
        angle: pick_f64(row, &["shot_angle", "shotAngle"]).unwrap_or(0.0),
        xg: pick_f64(row, &["x_goal", "xGoal"]).unwrap_or(0.0),
        on_goal: pick_bool(row, &["shot_was_on_goal", "shotWasOnGoal"]).unwrap_or(false),
        goal: pick_bool(row, &["goal", "is_goal"]),
        empty_net: pick_bool(row, &["shot_on_empty_net", "shotOnEmptyNet"]).unwrap_or(false),
        rebound: pick_bool(row, &["shot_rebound", "shotRebound"]).unwrap_or(false),
        rush: pick_bool(row, &["shot_rush", "shotRush"]).unwrap_or(false),
        event: pick_string(row, &["event"]),
        game_id: pick_string(row, &["game_id", "gameId"]),
        time: pick_f64(row, &["time_left", "time"]),
        home_skaters: pick_count(row, &["home_skaters_on_ice", "homeSkatersOnIce"]),
        away_skaters: pick_count(row, &["away_skaters_on_ice", "awaySkatersOnIce"]),
        shooter: pick_string(row, &["shooter_name", "shooterName"]).unwrap_or_default(),
    };
    Some(shot.sanitized())
}

fn pick<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| v.get(*k))
        .find(|value| !value.is_null())
}

fn pick_string(v: &Value, keys: &[&str]) -> Option<String> {
    match pick(v, keys)? {
        Value::String(s) => non_empty(s).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_f64(v: &Value, keys: &[&str]) -> Option<f64> {
    pick(v, keys).and_then(as_f64)
}

fn pick_bool(v: &Value, keys: &[&str]) -> Option<bool> {
    match pick(v, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => crate::shots_csv::parse_flag(s),
        _ => None,
    }
}

fn pick_count(v: &Value, keys: &[&str]) -> u8 {
    pick_f64(v, keys)
        .filter(|n| *n >= 0.0)
        .map(|n| n.min(u8::MAX as f64) as u8)
        .unwrap_or(0)
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_surfaced() {
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to fetch shot data","details":"timeout"}"#,
        );
        let msg = err.to_string();
        assert!(msg.contains("Failed to fetch shot data"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn unavailable_maps_to_configuration_hint() {
        let err = error_from_response(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":"Database not configured","data":[]}"#,
        );
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn non_object_rows_are_dropped() {
        assert!(shot_from_row(&Value::from(3)).is_none());
    }
}

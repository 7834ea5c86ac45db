use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use rink_heatmap::config::ApiConfig;
use rink_heatmap::filter::{FilterState, ShotResult, Situation, is_power_play};
use rink_heatmap::heatmap;
use rink_heatmap::hexbin::RinkProjector;
use rink_heatmap::shots_fetch::{
    ShotDataClient, ShotQuery, parse_shots_response_json, parse_teams_response_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn unreachable_client() -> ShotDataClient {
    ShotDataClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        api_key: None,
        timeout: Duration::from_millis(200),
    })
    .expect("client builds")
}

#[test]
fn query_uses_endpoint_parameter_names() {
    let filter = FilterState {
        teams: vec!["DAL".to_string(), " COL ".to_string()],
        periods: vec![1, 3],
        shot_result: Some(ShotResult::OnGoal),
        situation: Some(Situation::PowerPlay),
        distance_max: Some(40.0),
        game_id: Some("2023020204".to_string()),
        home_team: Some("  ".to_string()),
        offset: 100,
        ..FilterState::default()
    };
    let params = ShotQuery::from_filter(&filter).to_params();
    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("teams"), Some("DAL,COL"));
    assert_eq!(get("periods"), Some("1,3"));
    assert_eq!(get("xGoalMin"), Some("0"));
    assert_eq!(get("xGoalMax"), Some("1"));
    assert_eq!(get("maxDistance"), Some("40"));
    assert_eq!(get("minDistance"), None);
    assert_eq!(get("shotResult"), Some("shot"));
    assert_eq!(get("situationCode"), Some("powerplay"));
    assert_eq!(get("gameId"), Some("2023020204"));
    assert_eq!(get("homeTeam"), None);
    assert_eq!(get("limit"), Some("5000"));
    assert_eq!(get("offset"), Some("100"));
}

#[test]
fn empty_team_selection_fetches_nothing() {
    let filter = FilterState::default();
    let query = ShotQuery::from_filter(&filter);
    assert!(query.selects_nothing());

    // No request leaves the process, so an unreachable server is fine.
    let page = unreachable_client().fetch_shots(&query).expect("empty page");
    assert!(page.shots.is_empty());
    assert_eq!(page.total_count, 0);

    let projector = RinkProjector::for_canvas(800.0, 400.0);
    let view = heatmap::compute(&page.shots, &filter, &projector).expect("view");
    assert!(view.bins.is_empty());
    assert_eq!(view.summary.total_shots, 0);
    assert_eq!(view.summary.total_xg, 0.0);
}

#[test]
fn transport_errors_surface_as_errors() {
    let query = ShotQuery {
        teams: vec!["DAL".to_string()],
        ..ShotQuery::default()
    };
    assert!(unreachable_client().fetch_shots(&query).is_err());
}

#[test]
fn parses_shots_fixture_leniently() {
    let page = parse_shots_response_json(&read_fixture("shots_response.json")).expect("parses");
    assert_eq!(page.count, 2);
    assert_eq!(page.total_count, 1450);
    assert_eq!(page.shots.len(), 2);

    let first = &page.shots[0];
    assert_eq!(first.id, "101");
    assert_eq!((first.x, first.y), (Some(-62.0), Some(8.5)));
    assert_eq!(first.period, 2);
    assert_eq!(first.team, "DAL");
    assert_eq!(first.away_team.as_deref(), Some("COL"));
    assert!(first.on_goal);
    assert_eq!(first.goal, None);
    assert!(is_power_play(first));

    let second = &page.shots[1];
    assert_eq!(second.period, 1);
    assert_eq!(second.xg, 0.0);
    assert!(second.on_goal);
    assert_eq!(second.shooter, "");
}

#[test]
fn null_and_empty_bodies_are_empty_pages() {
    for raw in ["", "null", "  "] {
        let page = parse_shots_response_json(raw).expect("empty");
        assert!(page.shots.is_empty());
    }
    assert!(parse_teams_response_json("null").expect("empty").is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(parse_shots_response_json("{not json").is_err());
}

#[test]
fn team_list_accepts_strings_and_objects() {
    let raw = r#"{"teams":["MIN","DAL",{"code":"COL"},"DAL",""]}"#;
    let teams = parse_teams_response_json(raw).expect("parses");
    assert_eq!(teams, vec!["COL", "DAL", "MIN"]);
}

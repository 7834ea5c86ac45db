use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::info;

use rink_heatmap::bin_stats::{BinStats, format_pct, format_xg};
use rink_heatmap::config::{AppConfig, ApiConfig};
use rink_heatmap::filter::{FilterState, GoalRule, ShotResult, Situation};
use rink_heatmap::heatmap;
use rink_heatmap::hexbin::RinkProjector;
use rink_heatmap::render::Scene;
use rink_heatmap::sample_data::sample_shots;
use rink_heatmap::shot::{ShotEvent, ShotSummary};
use rink_heatmap::shots_csv::load_shots_csv;
use rink_heatmap::shots_fetch::{ShotDataClient, ShotQuery};
use rink_heatmap::state::SAMPLE_SHOT_COUNT;

const DEFAULT_TOP: usize = 10;

#[derive(Debug, Default)]
struct Args {
    csv: Option<PathBuf>,
    sample: bool,
    teams: Vec<String>,
    periods: Vec<u8>,
    xg_min: Option<f64>,
    xg_max: Option<f64>,
    result: Option<ShotResult>,
    situation: Option<Situation>,
    radius: Option<f64>,
    svg: Option<PathBuf>,
    top: Option<usize>,
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    source: String,
    loaded: usize,
    filtered_out: usize,
    skipped_geometry: usize,
    goal_rule_divergence: usize,
    summary: ShotSummary,
    bins: usize,
    top_bins: Vec<&'a BinStats>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = AppConfig::load();

    let mut filter = FilterState {
        teams: args.teams.clone(),
        periods: args.periods.clone(),
        shot_result: args.result,
        situation: args.situation,
        hex_radius: config.hex_radius,
        limit: config.fetch_limit,
        goal_rule: GoalRule {
            xg_threshold: config.goal_xg_threshold,
        },
        ..FilterState::default()
    };
    if args.xg_min.is_some() || args.xg_max.is_some() {
        filter.set_xg_range(args.xg_min.unwrap_or(0.0), args.xg_max.unwrap_or(1.0));
    }
    if let Some(radius) = args.radius {
        filter.set_hex_radius(radius);
    }

    let (source, shots) = load(&args, &filter, config.api.as_ref())?;
    let projector = RinkProjector::for_canvas(config.canvas_width, config.canvas_height);
    let view = heatmap::compute(&shots, &filter, &projector)?;
    info!(source = %source, shots = shots.len(), bins = view.bins.len(), "report computed");

    if let Some(path) = &args.svg {
        let scene = Scene::build(&view, &filter, &projector, config.high_value_xg);
        fs::write(path, scene.to_svg())
            .with_context(|| format!("failed to write svg: {}", path.display()))?;
        info!(path = %path.display(), "wrote svg");
    }

    let mut ranked: Vec<&BinStats> = view.stats.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(args.top.unwrap_or(DEFAULT_TOP));

    let report = Report {
        source,
        loaded: shots.len(),
        filtered_out: view.filtered_out,
        skipped_geometry: view.skipped_geometry,
        goal_rule_divergence: filter.goal_rule.divergence_count(&shots),
        summary: view.summary,
        bins: view.bins.len(),
        top_bins: ranked,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Source: {}", report.source);
    println!(
        "Shots loaded: {} (filtered out {}, no geometry {})",
        report.loaded, report.filtered_out, report.skipped_geometry
    );
    println!("Total Shots: {}", report.summary.total_shots);
    println!("Total xG: {:.2}", report.summary.total_xg);
    println!("Avg xG/Shot: {}", format_xg(report.summary.avg_xg));
    println!("Bins: {}", report.bins);
    if report.goal_rule_divergence > 0 {
        println!(
            "Goal flag vs xG heuristic disagree on {} shots",
            report.goal_rule_divergence
        );
    }
    for (rank, s) in report.top_bins.iter().enumerate() {
        println!(
            "{:>2}. ({:.0},{:.0}) shots {} | avg xG {} | goals {} ({}) | on goal {} | top {}",
            rank + 1,
            s.x,
            s.y,
            s.count,
            format_xg(s.avg_xg),
            s.goals,
            format_pct(s.conversion_rate),
            format_pct(s.on_goal_rate),
            s.top_shooter_label()
        );
    }
    Ok(())
}

fn load(
    args: &Args,
    filter: &FilterState,
    api: Option<&ApiConfig>,
) -> Result<(String, Vec<ShotEvent>)> {
    if let Some(path) = &args.csv {
        let (shots, stats) = load_shots_csv(path)?;
        if stats.missing_geometry + stats.malformed > 0 {
            info!(
                missing_geometry = stats.missing_geometry,
                malformed = stats.malformed,
                "dropped CSV rows"
            );
        }
        return Ok((format!("csv {}", path.display()), shots));
    }
    if !args.sample
        && let Some(api) = api
    {
        let client = ShotDataClient::new(api)?;
        let page = client.fetch_shots(&ShotQuery::from_filter(filter))?;
        return Ok((format!("live {}", client.base_url()), page.shots));
    }
    let mut rng = rand::thread_rng();
    Ok(("sample".to_string(), sample_shots(&mut rng, SAMPLE_SHOT_COUNT)))
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    for arg in raw {
        let (key, value) = match arg.split_once('=') {
            Some((k, v)) => (k.to_string(), v.trim().to_string()),
            None => (arg.clone(), String::new()),
        };
        match key.as_str() {
            "--csv" => args.csv = Some(PathBuf::from(value)),
            "--sample" => args.sample = true,
            "--json" => args.json = true,
            "--teams" => args.teams = split_list(&value),
            "--periods" => {
                args.periods = split_list(&value)
                    .iter()
                    .map(|p| p.parse::<u8>().with_context(|| format!("bad period: {p}")))
                    .collect::<Result<Vec<_>>>()?;
            }
            "--xg-min" => args.xg_min = Some(parse_num(&key, &value)?),
            "--xg-max" => args.xg_max = Some(parse_num(&key, &value)?),
            "--radius" => args.radius = Some(parse_num(&key, &value)?),
            "--top" => {
                args.top = Some(
                    value
                        .parse::<usize>()
                        .with_context(|| format!("bad --top: {value}"))?,
                )
            }
            "--result" => {
                args.result = Some(
                    ShotResult::from_param(&value)
                        .ok_or_else(|| anyhow!("unknown shot result: {value}"))?,
                )
            }
            "--situation" => {
                args.situation = Some(
                    Situation::from_param(&value)
                        .ok_or_else(|| anyhow!("unknown situation: {value}"))?,
                )
            }
            "--svg" => args.svg = Some(PathBuf::from(value)),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_num(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("bad {key}: {value}"))
}

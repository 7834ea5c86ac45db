use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ByteRecord, StringRecord};
use tracing::{debug, info};

use crate::shot::ShotEvent;

const DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

// Most adjusted variant first.
const X_COLUMNS: &[&str] = &["arenaAdjustedXCord", "xCordAdjusted", "xCord", "x_cord"];
const Y_COLUMNS: &[&str] = &["arenaAdjustedYCord", "yCordAdjusted", "yCord", "y_cord"];
const DISTANCE_COLUMNS: &[&str] = &["arenaAdjustedShotDistance", "shotDistance", "shot_distance"];
const ANGLE_COLUMNS: &[&str] = &["shotAngleAdjusted", "shotAngle", "shot_angle"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    pub rows: usize,
    pub parsed: usize,
    pub missing_geometry: usize,
    pub malformed: usize,
    pub recoded: usize,
    pub delimiter: u8,
    pub x_column: String,
    pub y_column: String,
}

#[derive(Debug)]
struct Columns {
    x: usize,
    y: usize,
    x_name: String,
    y_name: String,
    by_name: HashMap<String, usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_string(), i))
            .collect();
        let x = first_present(&by_name, X_COLUMNS);
        let y = first_present(&by_name, Y_COLUMNS);
        let (Some((x_name, x)), Some((y_name, y))) = (x, y) else {
            bail!("CSV file does not appear to contain shot coordinate data (xCord/yCord columns)");
        };
        Ok(Self {
            x,
            y,
            x_name: x_name.to_string(),
            y_name: y_name.to_string(),
            by_name,
        })
    }

    fn idx(&self, names: &[&str]) -> Option<usize> {
        first_present(&self.by_name, names).map(|(_, i)| i)
    }
}

fn first_present<'a>(
    by_name: &HashMap<String, usize>,
    names: &[&'a str],
) -> Option<(&'a str, usize)> {
    names
        .iter()
        .find_map(|name| by_name.get(*name).map(|i| (*name, *i)))
}

pub fn load_shots_csv(path: &Path) -> Result<(Vec<ShotEvent>, ParseStats)> {
    let raw =
        fs::read(path).with_context(|| format!("failed to read CSV file: {}", path.display()))?;
    let out = parse_shots_bytes(&raw).with_context(|| format!("parse {}", path.display()))?;
    info!(
        path = %path.display(),
        shots = out.0.len(),
        skipped = out.1.missing_geometry + out.1.malformed,
        recoded = out.1.recoded,
        "loaded shot CSV"
    );
    Ok(out)
}

pub fn parse_shots_csv(raw: &str) -> Result<(Vec<ShotEvent>, ParseStats)> {
    parse_shots_bytes(raw.as_bytes())
}

/// Exports are not always UTF-8. Rows that fail to decode are read as
/// Latin-1 instead of failing the whole file.
pub fn parse_shots_bytes(raw: &[u8]) -> Result<(Vec<ShotEvent>, ParseStats)> {
    let delimiter = sniff_delimiter(raw);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw);

    let (headers, _) = decode_record(reader.byte_headers().context("read CSV header")?);
    let cols = Columns::resolve(&headers)?;

    let mut stats = ParseStats {
        delimiter,
        x_column: cols.x_name.clone(),
        y_column: cols.y_name.clone(),
        ..ParseStats::default()
    };
    let mut shots = Vec::new();

    for (row, record) in reader.byte_records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(err) => {
                stats.malformed += 1;
                debug!(row, %err, "skipping malformed CSV row");
                continue;
            }
        };
        let (record, recoded) = decode_record(&record);
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        stats.rows += 1;
        if recoded {
            stats.recoded += 1;
            debug!(row, "CSV row is not UTF-8, read as Latin-1");
        }
        let shot = shot_from_record(&record, &cols, row);
        if shot.coordinates().is_none() {
            stats.missing_geometry += 1;
            continue;
        }
        shots.push(shot);
        stats.parsed += 1;
    }

    if shots.is_empty() {
        bail!("No valid data found in CSV file");
    }
    Ok((shots, stats))
}

fn decode_record(record: &ByteRecord) -> (StringRecord, bool) {
    let mut recoded = false;
    let fields: Vec<Cow<'_, str>> = record
        .iter()
        .map(|field| match std::str::from_utf8(field) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => {
                recoded = true;
                Cow::Owned(field.iter().map(|&b| char::from(b)).collect())
            }
        })
        .collect();
    (StringRecord::from(fields), recoded)
}

struct Row<'a> {
    record: &'a StringRecord,
    cols: &'a Columns,
}

impl Row<'_> {
    fn text(&self, names: &[&str]) -> Option<String> {
        self.cols
            .idx(names)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn number(&self, names: &[&str]) -> Option<f64> {
        self.text(names).and_then(|s| s.parse::<f64>().ok())
    }

    fn flag(&self, names: &[&str]) -> Option<bool> {
        self.text(names).as_deref().and_then(parse_flag)
    }

    fn at(&self, i: usize) -> Option<f64> {
        self.record
            .get(i)
            .map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
    }
}

fn shot_from_record(record: &StringRecord, cols: &Columns, row: usize) -> ShotEvent {
    let r = Row { record, cols };

    let team = r.text(&["teamCode", "team_code", "team"]).unwrap_or_default();
    let home_team = r.text(&["homeTeamCode", "home_team_code"]);
    let away_team = r.text(&["awayTeamCode", "away_team_code"]);
    // Older exports only carry "team" as HOME/AWAY.
    let is_home_team = r
        .flag(&["isHomeTeam", "is_home_team"])
        .or_else(|| home_team.as_deref().map(|h| h == team))
        .or_else(|| r.text(&["team"]).map(|t| t.eq_ignore_ascii_case("home")))
        .unwrap_or(false);

    ShotEvent {
        id: r
            .text(&["shotID", "shot_id", "id"])
            .unwrap_or_else(|| format!("row-{}", row + 1)),
        x: r.at(cols.x),
        y: r.at(cols.y),
        team,
        home_team,
        away_team,
        is_home_team,
        period: r
            .number(&["period"])
            .filter(|p| *p >= 1.0)
            .map(|p| p.min(u8::MAX as f64) as u8)
            .unwrap_or(1),
        shot_type: r.text(&["shotType", "shot_type"]).unwrap_or_default(),
        distance: r.number(DISTANCE_COLUMNS).unwrap_or(0.0),
        angle: r.number(ANGLE_COLUMNS).unwrap_or(0.0),
        xg: r.number(&["xGoal", "x_goal"]).unwrap_or(0.0),
        on_goal: r
            .flag(&["shotWasOnGoal", "shot_was_on_goal"])
            .unwrap_or(false),
        goal: r.flag(&["goal"]),
        empty_net: r
            .flag(&["shotOnEmptyNet", "shot_on_empty_net"])
            .unwrap_or(false),
        rebound: r
            .flag(&["shotRebound", "shot_rebound"])
            .unwrap_or(false),
        rush: r.flag(&["shotRush"]).unwrap_or(false),
        event: r.text(&["event"]),
        game_id: r.text(&["game_id", "gameId"]),
        time: r.number(&["time", "time_left"]),
        home_skaters: count(r.number(&["homeSkatersOnIce", "home_skaters_on_ice"])),
        away_skaters: count(r.number(&["awaySkatersOnIce", "away_skaters_on_ice"])),
        shooter: r.text(&["shooterName", "shooter_name"]).unwrap_or_default(),
    }
    .sanitized()
}

fn count(v: Option<f64>) -> u8 {
    v.filter(|n| *n >= 0.0)
        .map(|n| n.min(u8::MAX as f64) as u8)
        .unwrap_or(0)
}

/// Boolean cells show up as 1/0, true/false or yes/no depending on the export.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "t" | "y" => Some(true),
        "false" | "no" | "f" | "n" => Some(false),
        other => other.parse::<f64>().ok().map(|v| v != 0.0),
    }
}

// Candidate that splits the header line most often.
fn sniff_delimiter(raw: &[u8]) -> u8 {
    let header = raw
        .split(|b| *b == b'\n')
        .find(|l| l.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or(&[]);
    let mut best = b',';
    let mut best_count = 0usize;
    for d in DELIMITERS {
        let n = header.iter().filter(|b| **b == d).count();
        if n > best_count {
            best = d;
            best_count = n;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_tab_and_semicolon() {
        assert_eq!(sniff_delimiter(b"xCord\tyCord\txGoal\n1\t2\t0.1"), b'\t');
        assert_eq!(sniff_delimiter(b"xCord;yCord\n1;2"), b';');
        assert_eq!(sniff_delimiter(b"\nxCord,yCord\n1,2"), b',');
    }

    #[test]
    fn flags_accept_common_encodings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("1.0"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}

use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::sample_data::sample_shots;
use crate::shots_csv::load_shots_csv;
use crate::shots_fetch::ShotDataClient;
use crate::state::{DataSource, Delta, ProviderCommand};

const NOT_CONFIGURED: &str = "live shot source is not configured (set SHOTS_API_URL)";

/// Runs loads on a worker thread. Commands are served in order; every
/// completed load is reported, so the newest response is the one that sticks.
pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    client: Option<ShotDataClient>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            for delta in handle_command(cmd, client.as_ref()) {
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    });
}

pub fn handle_command(cmd: ProviderCommand, client: Option<&ShotDataClient>) -> Vec<Delta> {
    match cmd {
        ProviderCommand::FetchShots(query) => {
            let Some(client) = client else {
                return vec![Delta::FetchFailed {
                    message: NOT_CONFIGURED.to_string(),
                }];
            };
            match client.fetch_shots(&query) {
                Ok(page) => vec![Delta::ShotsLoaded {
                    source: DataSource::Live,
                    total_count: page.total_count,
                    shots: page.shots,
                    skipped: 0,
                }],
                Err(err) => vec![Delta::FetchFailed {
                    message: format!("{err:#}"),
                }],
            }
        }
        ProviderCommand::FetchTeams => {
            let Some(client) = client else {
                return vec![Delta::Log(format!("[INFO] Team list unavailable: {NOT_CONFIGURED}"))];
            };
            match client.fetch_teams() {
                Ok(teams) => vec![Delta::TeamsLoaded(teams)],
                Err(err) => vec![Delta::Log(format!("[WARN] Team list fetch error: {err:#}"))],
            }
        }
        ProviderCommand::LoadCsv(path) => match load_shots_csv(&path) {
            Ok((shots, stats)) => {
                let mut out = vec![Delta::Log(format!(
                    "[INFO] CSV columns {}/{} (delimiter {:?})",
                    stats.x_column, stats.y_column, stats.delimiter as char
                ))];
                out.push(Delta::ShotsLoaded {
                    source: DataSource::Csv(path),
                    total_count: shots.len(),
                    shots,
                    skipped: stats.missing_geometry + stats.malformed,
                });
                out
            }
            Err(err) => vec![Delta::FetchFailed {
                message: format!("{err:#}"),
            }],
        },
        ProviderCommand::LoadSample { count } => {
            let mut rng = rand::thread_rng();
            let shots = sample_shots(&mut rng, count);
            vec![Delta::ShotsLoaded {
                source: DataSource::Sample,
                total_count: shots.len(),
                shots,
                skipped: 0,
            }]
        }
    }
}

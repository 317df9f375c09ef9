use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::dashboard::Dashboard;
use crate::league::League;
use crate::source::StandingsSource;
use crate::state::{Delta, ProviderCommand};

/// Runs the pipeline on a worker thread. Queued commands are coalesced so
/// only the newest selection is fetched.
pub fn spawn_provider<S>(
    dashboard: Dashboard<S>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()>
where
    S: StandingsSource + 'static,
{
    thread::spawn(move || {
        while let Ok(first) = cmd_rx.recv() {
            let mut cmd = first;
            let mut skipped = 0usize;
            while let Ok(next) = cmd_rx.try_recv() {
                cmd = next;
                skipped += 1;
            }
            if skipped > 0 {
                let _ = tx.send(Delta::Log(format!(
                    "[INFO] Skipped {skipped} superseded request(s)"
                )));
            }
            if !handle_command(&dashboard, cmd, &tx) {
                break;
            }
        }
    })
}

/// Returns false once the UI side has hung up.
pub fn handle_command<S: StandingsSource>(
    dashboard: &Dashboard<S>,
    cmd: ProviderCommand,
    tx: &Sender<Delta>,
) -> bool {
    match cmd {
        ProviderCommand::FetchLeague { token, league } => {
            let _ = tx.send(Delta::Log(format!(
                "[INFO] Fetching {league} from {} source (#{token})",
                dashboard.source_name()
            )));
            let started = Instant::now();
            let result = League::from_label(&league).and_then(|l| dashboard.view_for(l));
            if result.is_ok() {
                let _ = tx.send(Delta::Log(format!(
                    "[INFO] {league} ready in {} ms",
                    started.elapsed().as_millis()
                )));
            }
            tx.send(Delta::Charts { token, result }).is_ok()
        }
    }
}

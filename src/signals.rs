use std::thread;
use anyhow::Result;
use crossbeam_channel::Sender;
use log::debug;
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

/// Bridges OS signals to the writer's trigger channels: SIGHUP asks
/// for a log rotation, SIGINT and SIGTERM ask for shutdown. The writer
/// only ever sees the channels.
pub fn watch(rotate: Sender<()>, shutdown: Sender<()>) -> Result<()> {
    let mut signals = Signals::new(&[SIGHUP, SIGINT, SIGTERM])?;

    thread::spawn(move || {
        for signal in signals.forever() {
            debug!("received signal {}", signal);

            let sent = match signal {
                SIGHUP => rotate.send(()),
                _      => shutdown.send(()),
            };

            if sent.is_err() {
                break;
            }
        }
    });

    Ok(())
}

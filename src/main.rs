use std::path::PathBuf;
use std::thread;
use anyhow::Result;
use clap::{App, load_yaml, value_t};
use crossbeam_channel::{bounded, unbounded};
use env_logger::Builder;
use log::{debug, error, info, warn};
use log::LevelFilter::*;
use tikv_jemallocator::Jemalloc;
use pacct::os;
use pacct::server::Server;
use pacct::signals;
use pacct::ticks::Clock;
use pacct::writer::Writer;

#[global_allocator]
static ALLOC: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let output = value_t!(args, "output", PathBuf)?;
    let listen = value_t!(args, "listen", String)?;

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing pacct {}", ver);

    if os::getuid() != 0 {
        warn!("not running as root, some processes may be invisible");
    }

    let clock  = Clock::new()?;
    let server = Server::bind(&listen)?;
    let writer = Writer::open(&output)?;

    info!("listening on {}", listen);

    let (tx, rx) = unbounded();
    let (rotate_tx,   rotate_rx)   = bounded(1);
    let (shutdown_tx, shutdown_rx) = bounded(1);

    signals::watch(rotate_tx, shutdown_tx)?;

    thread::spawn(move || match server.run(clock, tx) {
        Ok(()) => debug!("server finished"),
        Err(e) => error!("server failed: {:?}", e),
    });

    writer.run(rx, rotate_rx, shutdown_rx)
}

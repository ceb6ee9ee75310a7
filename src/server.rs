use std::io::{prelude::*, BufReader};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::SystemTime;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::Sender;
use log::{debug, warn};
use crate::proc::Snapshot;
use crate::record::Record;
use crate::ticks::Clock;

/// Maximum notifications processed concurrently. Connections arriving
/// at or over the cap are shed immediately rather than queued, and the
/// accept loop never blocks waiting for capacity.
pub const MAX_OUTSTANDING: usize = 5;

pub struct Server {
    listener:    TcpListener,
    outstanding: Arc<AtomicUsize>,
}

impl Server {
    pub fn bind(addr: &str) -> Result<Self> {
        Ok(Self {
            listener:    TcpListener::bind(addr).with_context(|| format!("bind {}", addr))?,
            outstanding: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn run(self, clock: Clock, tx: Sender<Record>) -> Result<()> {
        loop {
            let (conn, peer) = self.listener.accept()?;

            if self.outstanding.load(Ordering::Acquire) >= MAX_OUTSTANDING {
                drop(conn);
                warn!("{} outstanding connections, shedding {}", MAX_OUTSTANDING, peer);
                continue;
            }

            let guard = Guard::acquire(self.outstanding.clone());
            let tx    = tx.clone();

            thread::spawn(move || {
                let _guard = guard;
                match serve(conn, &clock, &tx) {
                    Ok(pid) => debug!("recorded pid {}", pid),
                    Err(e)  => warn!("connection from {} failed: {:?}", peer, e),
                }
            });
        }
    }
}

/// One slot under the outstanding-connection cap, released on every
/// exit path of the worker that holds it.
struct Guard(Arc<AtomicUsize>);

impl Guard {
    fn acquire(count: Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Guard(count)
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

fn serve(conn: TcpStream, clock: &Clock, tx: &Sender<Record>) -> Result<u64> {
    // Best guess: the notifier connects from its exit hook, so receipt
    // time stands in for the actual exit instant.
    let end_time = SystemTime::now();

    let mut line = String::new();
    BufReader::new(&conn).read_line(&mut line)?;

    let (pid, exit_code) = request(&line)?;
    debug!("notification for pid {} status {}", pid, exit_code);

    let snapshot = Snapshot::capture(pid).with_context(|| format!("snapshot of pid {}", pid))?;

    // Local reads are done: release the notifier now. The record is
    // not durable yet, the hand-off below happens after the close.
    drop(conn);

    let record = Record::new(snapshot, exit_code, end_time, clock)?;
    tx.send(record).map_err(|_| anyhow!("record channel closed"))?;

    Ok(pid)
}

fn request(line: &str) -> Result<(u64, i32)> {
    let mut parts = line.split_whitespace();
    let pid  = parts.next().ok_or_else(|| anyhow!("empty request"))?;
    let code = parts.next().ok_or_else(|| anyhow!("missing exit status"))?;
    Ok((pid.parse()?, code.parse()?))
}

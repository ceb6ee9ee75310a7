use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use anyhow::Result;
use serde::{Serialize, Deserialize};
use crate::os;
use crate::proc::{Io, Snapshot, Stat, Status};
use crate::ticks::Clock;

pub const UNKNOWN_USER: &str = "<unknown>";

/// One accounting record, fully constructed before anyone else sees it
/// and serialized as a single JSON line.
#[derive(Debug, Serialize, Deserialize)]
pub struct Record {
    pub cmdline:   Vec<String>,
    pub pwd:       PathBuf,
    pub exe:       PathBuf,
    pub uid:       u32,
    pub username:  String,
    pub exit_code: i32,

    // start_time is always an estimate: it is derived from ticks since
    // boot, and end_time stands in for the actual exit instant.
    pub start_time: SystemTime,
    pub end_time:   SystemTime,

    pub run_time:      f64,
    pub user_time:     f64,
    pub system_time:   f64,
    pub block_io_wait: f64,

    pub memory: Memory,
    pub io:     Io,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Memory {
    pub maxrss: u64,
}

impl Record {
    /// Parses a snapshot into a record. A structurally bad stat line
    /// fails the whole record; the key-value blocks degrade per field,
    /// and a failed username lookup yields the unknown marker.
    pub fn new(snapshot: Snapshot, exit_code: i32, end_time: SystemTime, clock: &Clock) -> Result<Self> {
        let stat   = Stat::parse(&snapshot.stat)?;
        let status = Status::parse(&snapshot.status);
        let io     = Io::parse(&snapshot.io);

        let run_time = clock.since_boot(stat.starttime)?;
        let username = os::username(status.uid).unwrap_or_else(|| UNKNOWN_USER.to_owned());

        Ok(Self {
            cmdline:   cmdline(&snapshot.cmdline),
            pwd:       snapshot.pwd,
            exe:       snapshot.exe,
            uid:       status.uid,
            username:  username,
            exit_code: exit_code,

            start_time: end_time.checked_sub(run_time).unwrap_or(UNIX_EPOCH),
            end_time:   end_time,

            run_time:      run_time.as_secs_f64(),
            user_time:     clock.duration(stat.utime).as_secs_f64(),
            system_time:   clock.duration(stat.stime).as_secs_f64(),
            block_io_wait: clock.duration(stat.blkio).as_secs_f64(),

            memory: Memory { maxrss: status.vm_hwm },
            io:     io,
        })
    }
}

fn cmdline(raw: &[u8]) -> Vec<String> {
    raw.split(|&b| b == 0)
       .filter(|part| !part.is_empty())
       .map(|part| String::from_utf8_lossy(part).into_owned())
       .collect()
}

use std::fs;
use std::path::PathBuf;
use anyhow::Result;

/// Raw contents of a process's /proc accounting files, captured while
/// the entry is still resident. Any single read failure aborts the
/// whole capture, with no retries: a vanished entry will not return.
#[derive(Debug)]
pub struct Snapshot {
    pub pwd:     PathBuf,
    pub exe:     PathBuf,
    pub cmdline: Vec<u8>,
    pub stat:    String,
    pub status:  String,
    pub io:      String,
}

impl Snapshot {
    pub fn capture(pid: u64) -> Result<Self> {
        let proc = PathBuf::from(format!("/proc/{}", pid));
        Ok(Self {
            pwd:     fs::read_link(proc.join("cwd"))?,
            exe:     fs::read_link(proc.join("exe"))?,
            cmdline: fs::read(proc.join("cmdline"))?,
            stat:    fs::read_to_string(proc.join("stat"))?,
            status:  fs::read_to_string(proc.join("status"))?,
            io:      fs::read_to_string(proc.join("io"))?,
        })
    }
}

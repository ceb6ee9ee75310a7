use anyhow::{anyhow, Result};

// Indexes are relative to the first field after the command, which is
// field 3 (state) in proc(5). The command may contain spaces and is
// bounded by the last ')'.
const UTIME:     usize = 11;
const STIME:     usize = 12;
const STARTTIME: usize = 19;
const BLKIO:     usize = 39;

/// Scheduler counters from /proc/<pid>/stat, all in ticks.
#[derive(Debug, Eq, PartialEq)]
pub struct Stat {
    pub utime:     u64,
    pub stime:     u64,
    pub starttime: u64,
    pub blkio:     u64,
}

impl Stat {
    pub fn parse(line: &str) -> Result<Self> {
        let end = line.rfind(')').ok_or_else(|| anyhow!("stat line has no command"))?;
        let fields: Vec<&str> = line[end + 1..].split_whitespace().collect();

        if fields.len() <= BLKIO {
            return Err(anyhow!("stat line has {} fields, need {}", fields.len(), BLKIO + 1));
        }

        Ok(Self {
            utime:     fields[UTIME].parse()?,
            stime:     fields[STIME].parse()?,
            starttime: fields[STARTTIME].parse()?,
            blkio:     fields[BLKIO].parse()?,
        })
    }
}

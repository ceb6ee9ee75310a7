use std::fs::{File, OpenOptions};
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crossbeam_channel::{select, Receiver};
use log::{debug, info};
use crate::record::Record;

/// Sole owner of the accounting log: nothing else opens, writes, or
/// rotates the file, so appends need no external synchronization.
pub struct Writer {
    path: PathBuf,
    file: File,
}

impl Writer {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_owned(),
            file: open(path)?,
        })
    }

    /// Appends records until a shutdown trigger arrives or every
    /// sender is gone. Consumes the writer: there is no state after
    /// shutdown. Records land in hand-off arrival order, which may
    /// differ from notification order across concurrent connections.
    pub fn run(mut self, records: Receiver<Record>, rotate: Receiver<()>, shutdown: Receiver<()>) -> Result<()> {
        loop {
            select! {
                recv(records) -> record => match record {
                    Ok(record) => self.append(&record)?,
                    Err(_)     => break,
                },
                recv(rotate) -> msg => match msg {
                    Ok(()) => self.rotate()?,
                    Err(_) => break,
                },
                recv(shutdown) -> _ => break,
            }
        }

        debug!("writer finished");

        Ok(())
    }

    /// One complete serialized line per record, issued as a single
    /// write: a record is either fully on disk or absent.
    fn append(&mut self, record: &Record) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        Ok(self.file.write_all(&line)?)
    }

    /// Reopens the configured path, pairing with rotation tools that
    /// rename the old file out of the way and then send the trigger.
    fn rotate(&mut self) -> Result<()> {
        info!("rotating {}", self.path.display());
        self.file = open(&self.path)?;
        Ok(())
    }
}

fn open(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

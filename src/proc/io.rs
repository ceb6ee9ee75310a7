use serde::{Serialize, Deserialize};
use super::kv;

/// I/O accounting from /proc/<pid>/io: rchar/wchar count all I/O done
/// through read- and write-like syscalls, read_bytes/write_bytes only
/// what reached a block device. Missing counters read as zero.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Io {
    pub rchar:                 u64,
    pub wchar:                 u64,
    pub syscr:                 u64,
    pub syscw:                 u64,
    pub read_bytes:            u64,
    pub write_bytes:           u64,
    pub cancelled_write_bytes: u64,
}

impl Io {
    pub fn parse(text: &str) -> Self {
        let map = kv::dict(text);
        let count = |key: &str| map.get(key).and_then(|v| v.parse().ok()).unwrap_or(0);

        Self {
            rchar:                 count("rchar"),
            wchar:                 count("wchar"),
            syscr:                 count("syscr"),
            syscw:                 count("syscw"),
            read_bytes:            count("read_bytes"),
            write_bytes:           count("write_bytes"),
            cancelled_write_bytes: count("cancelled_write_bytes"),
        }
    }
}

use super::kv;

/// Fields of interest from the human-readable /proc/<pid>/status
/// block. Keys vary across kernel versions, so anything missing or
/// unparsable reads as zero rather than failing the record.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub uid:    u32,
    pub vm_hwm: u64,
}

impl Status {
    pub fn parse(text: &str) -> Self {
        let map = kv::dict(text);

        // Uid is "real effective saved fs", only the real uid is used.
        let uid = map.get("Uid")
            .and_then(|v| v.split_whitespace().next())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        // VmHWM carries a unit suffix ("N kB"), reported in kB.
        let vm_hwm = map.get("VmHWM")
            .and_then(|v| v.split_whitespace().next())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self { uid, vm_hwm }
    }
}

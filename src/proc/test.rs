use anyhow::Result;
use super::kv::dict;
use super::{Io, Snapshot, Stat, Status};

fn stat_line(utime: u64, stime: u64, starttime: u64, blkio: u64) -> String {
    // distinct junk everywhere else so extraction is by position only
    let mut fields: Vec<String> = (100..144).map(|n| n.to_string()).collect();
    fields[0]  = "S".to_owned();
    fields[11] = utime.to_string();
    fields[12] = stime.to_string();
    fields[19] = starttime.to_string();
    fields[39] = blkio.to_string();
    format!("4242 (some command) {}", fields.join(" "))
}

#[test]
fn stat_extracts_fields_by_position() -> Result<()> {
    let stat = Stat::parse(&stat_line(17, 23, 8125, 3))?;
    assert_eq!(stat, Stat { utime: 17, stime: 23, starttime: 8125, blkio: 3 });
    Ok(())
}

#[test]
fn stat_command_may_contain_spaces_and_parens() -> Result<()> {
    let line = stat_line(1, 2, 3, 4).replace("(some command)", "((mis) matched)");
    let stat = Stat::parse(&line)?;
    assert_eq!(stat.utime, 1);
    assert_eq!(stat.blkio, 4);
    Ok(())
}

#[test]
fn short_stat_line_fails_loudly() {
    assert!(Stat::parse("").is_err());
    assert!(Stat::parse("1 (cat) S 0 0 0 0").is_err());
}

#[test]
fn dict_splits_on_first_colon_and_trims() {
    let map = dict("Name:\tbash\nState:  S (sleeping)\nEnv: a:b\nDup: one\nDup: two\nno colon here\n");
    assert_eq!(map.get("Name"),  Some(&"bash"));
    assert_eq!(map.get("State"), Some(&"S (sleeping)"));
    assert_eq!(map.get("Env"),   Some(&"a:b"));
    assert_eq!(map.get("Dup"),   Some(&"two"));
    assert!(!map.contains_key("no colon here"));
}

#[test]
fn status_takes_the_real_uid_and_hwm() {
    let status = Status::parse("Name:\tbash\nUid:\t1000\t1001\t1002\t1003\nVmHWM:\t2048 kB\n");
    assert_eq!(status, Status { uid: 1000, vm_hwm: 2048 });
}

#[test]
fn status_missing_keys_read_as_zero() {
    assert_eq!(Status::parse("Name:\tbash\n"), Status::default());
    assert_eq!(Status::parse(""), Status::default());
}

#[test]
fn io_extracts_all_counters() {
    let text = "rchar: 100\nwchar: 50\nsyscr: 3\nsyscw: 2\n\
                read_bytes: 10\nwrite_bytes: 5\ncancelled_write_bytes: 1\n";
    assert_eq!(Io::parse(text), Io {
        rchar:                 100,
        wchar:                 50,
        syscr:                 3,
        syscw:                 2,
        read_bytes:            10,
        write_bytes:           5,
        cancelled_write_bytes: 1,
    });
}

#[test]
fn io_missing_counters_read_as_zero() {
    let io = Io::parse("rchar: 100\nnonsense\n");
    assert_eq!(io.rchar, 100);
    assert_eq!(io.wchar, 0);
    assert_eq!(io.write_bytes, 0);
}

#[test]
fn snapshot_captures_a_live_process() -> Result<()> {
    let snapshot = Snapshot::capture(std::process::id() as u64)?;
    assert!(snapshot.stat.contains('('));
    assert!(!snapshot.cmdline.is_empty());
    assert!(snapshot.pwd.is_absolute());
    Ok(())
}

#[test]
fn snapshot_of_a_vanished_process_fails() {
    assert!(Snapshot::capture(u64::MAX).is_err());
}

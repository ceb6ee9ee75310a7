use std::fs;
use std::time::Duration;
use anyhow::{anyhow, Result};

const NS_PER_S: u64 = 1_000_000_000;

/// Converts kernel scheduler ticks to wall-clock durations. The tick
/// frequency is queried once and held for the life of the process.
#[derive(Copy, Clone, Debug)]
pub struct Clock {
    hz: u64,
}

impl Clock {
    pub fn new() -> Result<Self> {
        match unsafe { libc::sysconf(libc::_SC_CLK_TCK) } {
            hz if hz > 0 => Ok(Self { hz: hz as u64 }),
            hz           => Err(anyhow!("invalid clock tick rate {}", hz)),
        }
    }

    pub fn with_hz(hz: u64) -> Self {
        Self { hz: hz }
    }

    pub fn duration(&self, ticks: u64) -> Duration {
        Duration::from_nanos((ticks as u128 * NS_PER_S as u128 / self.hz as u128) as u64)
    }

    pub fn ticks(&self, duration: Duration) -> u64 {
        (duration.as_nanos() * self.hz as u128 / NS_PER_S as u128) as u64
    }

    /// Elapsed run time of a process started at `start` ticks since
    /// boot. The subtraction happens in tick units, so sub-tick
    /// precision is lost: ticks are the unit of kernel accounting.
    pub fn run_time(&self, start: u64, uptime: Duration) -> Duration {
        self.duration(self.ticks(uptime).saturating_sub(start))
    }

    pub fn since_boot(&self, start: u64) -> Result<Duration> {
        Ok(self.run_time(start, uptime()?))
    }
}

pub fn uptime() -> Result<Duration> {
    parse(&fs::read_to_string("/proc/uptime")?)
}

fn parse(text: &str) -> Result<Duration> {
    let seconds = text.split_whitespace().next()
        .ok_or_else(|| anyhow!("empty uptime"))?
        .parse::<f64>()?;
    Ok(Duration::from_nanos((seconds * NS_PER_S as f64) as u64))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ticks_scale_linearly() {
        let clock = Clock::with_hz(100);
        assert_eq!(clock.duration(0),   Duration::from_secs(0));
        assert_eq!(clock.duration(1),   Duration::from_millis(10));
        assert_eq!(clock.duration(250), Duration::from_millis(2500));

        for n in 1..1000 {
            assert!(clock.duration(n) >= clock.duration(n - 1));
            assert_eq!(clock.duration(n * 2), clock.duration(n) * 2);
        }
    }

    #[test]
    fn durations_round_trip_to_ticks() {
        let clock = Clock::with_hz(100);
        assert_eq!(clock.ticks(Duration::from_secs(1)),      100);
        assert_eq!(clock.ticks(Duration::from_millis(1005)), 100);
    }

    #[test]
    fn run_time_subtracts_in_tick_units() {
        let clock = Clock::with_hz(100);

        let uptime = Duration::from_secs(100);
        assert_eq!(clock.run_time(5000,  uptime), Duration::from_secs(50));
        assert_eq!(clock.run_time(20000, uptime), Duration::from_secs(0));

        let uptime = Duration::from_nanos(1_005_000_000);
        assert_eq!(clock.run_time(0, uptime), Duration::from_secs(1));
    }

    #[test]
    fn uptime_parses_float_seconds() -> Result<()> {
        assert_eq!(parse("3600.25 7200.50\n")?, Duration::from_millis(3_600_250));
        assert!(parse("").is_err());
        assert!(parse("sideways").is_err());
        Ok(())
    }
}

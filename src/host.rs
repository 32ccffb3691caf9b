//! Host-wide perf settings exposed through procfs and sysfs.
//!
//! None of these are needed to register an event, but they explain most
//! rejections: `perf_event_paranoid` decides what unprivileged callers may
//! measure, and `perf_event_max_sample_rate` caps [`SampleOn::Freq`][crate::config::SampleOn::Freq].

#[cfg(test)]
mod test;

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::Result;

const SYSCTL_PATH: &str = "/proc/sys/kernel";

/// Reads `/proc/sys/kernel/perf_event_paranoid`.
///
/// | level | unprivileged callers may use |
/// |---|---|
/// | `-1` | everything, including raw tracepoints |
/// | `0` | CPU-wide events, no raw tracepoints |
/// | `1` | user and kernel measurements of their own processes |
/// | `2` | user-space measurements of their own processes only |
/// | `3+` | nothing (distribution patch, not in mainline) |
///
/// Fails with [`ErrorKind::Unsupported`][crate::ErrorKind::Unsupported]
/// if the kernel has no perf events support.
pub fn paranoid() -> Result<i32> {
    sysctl("perf_event_paranoid")
}

/// Reads `/proc/sys/kernel/perf_event_max_sample_rate`, in samples per second.
pub fn max_sample_rate() -> Result<u64> {
    sysctl("perf_event_max_sample_rate")
}

/// Reads `/proc/sys/kernel/perf_event_max_stack`, the default call chain depth.
pub fn max_stack() -> Result<u16> {
    sysctl("perf_event_max_stack")
}

/// Resolves the dynamic type of the PMU named `pmu` from
/// `/sys/bus/event_source/devices/<pmu>/type`.
///
/// ```rust, no_run
/// use perf_event_register::host;
///
/// let ty = host::pmu_type("cpu").unwrap();
/// println!("core PMU type: {}", ty);
/// ```
pub fn pmu_type(pmu: &str) -> Result<u32> {
    crate::event::dp::pmu_type(Path::new(crate::event::dp::PMU_DEVICES_PATH).join(pmu).join("type"))
}

fn sysctl<T>(name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let content = fs::read_to_string(Path::new(SYSCTL_PATH).join(name))?;
    let val = content.trim().parse::<T>().map_err(io::Error::other)?;
    log::debug!("{}: {}", name, content.trim());
    Ok(val)
}

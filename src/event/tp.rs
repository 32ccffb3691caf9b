use std::fs;
use std::io;
use std::path::Path;

use super::EventConfig;
use crate::ffi::bindings as b;
use crate::Result;

const TRACEFS_PATHS: [&str; 2] = ["/sys/kernel/tracing/events", "/sys/kernel/debug/tracing/events"];

/// Tracepoint event provided by the kernel tracepoint infrastructure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tracepoint {
    /// Tracepoint ID from under tracefs `events/*/*/id` if ftrace is enabled in the kernel.
    pub id: u64,
}

impl Tracepoint {
    /// Looks up the tracepoint ID of `category:name` (e.g. `sched:sched_switch`)
    /// from tracefs.
    ///
    /// Reading tracefs usually requires root.
    pub fn by_name(category: &str, name: &str) -> Result<Self> {
        let mut id = Err(io::ErrorKind::NotFound.into());
        for root in TRACEFS_PATHS {
            id = fs::read_to_string(Path::new(root).join(category).join(name).join("id"));
            if id.is_ok() {
                break;
            }
        }
        let id = id?.trim().parse::<u64>().map_err(io::Error::other)?;
        Ok(Self { id })
    }
}

super::try_from!(Tracepoint, value, {
    let event_config = EventConfig {
        ty: b::PERF_TYPE_TRACEPOINT,
        config: value.id,
        ..Default::default()
    };
    Ok(Self(event_config))
});

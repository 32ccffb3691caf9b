use std::io;

use crate::ffi::bindings as b;
use crate::Result;

/// Counter statistics, decoded from a `read` on the event descriptor.
///
/// The optional fields are present only if enabled in
/// [`StatFormat`][crate::config::StatFormat].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stat {
    /// Event count.
    pub count: u64,
    /// Event ID, see [`Counter::id`][super::Counter::id].
    pub id: Option<u64>,
    /// Time (ns) the event was enabled.
    pub time_enabled: Option<u64>,
    /// Time (ns) the event was actually on the PMU.
    ///
    /// Less than [`time_enabled`][Self::time_enabled] when counters were multiplexed.
    pub time_running: Option<u64>,
    /// Number of lost records.
    pub lost_records: Option<u64>,
    /// Sibling counts, in the order the siblings were added to the group.
    pub siblings: Vec<SiblingStat>,
}

/// Sibling statistics in a group read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiblingStat {
    /// Event count.
    pub count: u64,
    /// Event ID.
    pub id: Option<u64>,
    /// Number of lost records.
    pub lost_records: Option<u64>,
}

impl Stat {
    // https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L344
    // struct read_format {
    //     {
    //         u64 value;
    //         { u64 time_enabled; } && PERF_FORMAT_TOTAL_TIME_ENABLED
    //         { u64 time_running; } && PERF_FORMAT_TOTAL_TIME_RUNNING
    //         { u64 id;           } && PERF_FORMAT_ID
    //         { u64 lost;         } && PERF_FORMAT_LOST
    //     } && !PERF_FORMAT_GROUP
    //     {
    //         u64 nr;
    //         { u64 time_enabled; } && PERF_FORMAT_TOTAL_TIME_ENABLED
    //         { u64 time_running; } && PERF_FORMAT_TOTAL_TIME_RUNNING
    //         {
    //             u64 value;
    //             { u64 id;   } && PERF_FORMAT_ID
    //             { u64 lost; } && PERF_FORMAT_LOST
    //         } cntr[nr];
    //     } && PERF_FORMAT_GROUP
    // };
    pub(crate) fn from_bytes(buf: &[u8], read_format: u64) -> Result<Self> {
        let mut words = buf.chunks_exact(size_of::<u64>()).map(|chunk| {
            let mut word = [0; size_of::<u64>()];
            word.copy_from_slice(chunk);
            u64::from_ne_bytes(word)
        });
        let mut next = || words.next().ok_or(io::ErrorKind::UnexpectedEof);

        macro_rules! when {
            ($flag:ident) => {
                if read_format & b::$flag > 0 {
                    Some(next()?)
                } else {
                    None
                }
            };
        }

        if read_format & b::PERF_FORMAT_GROUP == 0 {
            let count = next()?;
            let time_enabled = when!(PERF_FORMAT_TOTAL_TIME_ENABLED);
            let time_running = when!(PERF_FORMAT_TOTAL_TIME_RUNNING);
            let id = when!(PERF_FORMAT_ID);
            let lost_records = when!(PERF_FORMAT_LOST);

            Ok(Self {
                count,
                id,
                time_enabled,
                time_running,
                lost_records,
                siblings: vec![],
            })
        } else {
            let nr = next()?;
            let time_enabled = when!(PERF_FORMAT_TOTAL_TIME_ENABLED);
            let time_running = when!(PERF_FORMAT_TOTAL_TIME_RUNNING);

            let count = next()?;
            let id = when!(PERF_FORMAT_ID);
            let lost_records = when!(PERF_FORMAT_LOST);

            let mut siblings = vec![];
            for _ in 1..nr {
                let count = next()?;
                let id = when!(PERF_FORMAT_ID);
                let lost_records = when!(PERF_FORMAT_LOST);
                siblings.push(SiblingStat {
                    count,
                    id,
                    lost_records,
                });
            }

            Ok(Self {
                count,
                id,
                time_enabled,
                time_running,
                lost_records,
                siblings,
            })
        }
    }

    pub(crate) fn read_buf_size(group_size: usize, read_format: u64) -> usize {
        let mut size = size_of::<u64>();

        macro_rules! when {
            ($flag:ident, $size:expr) => {
                if read_format & b::$flag > 0 {
                    size += $size;
                }
            };
        }

        when!(PERF_FORMAT_TOTAL_TIME_ENABLED, size_of::<u64>());
        when!(PERF_FORMAT_TOTAL_TIME_RUNNING, size_of::<u64>());
        when!(PERF_FORMAT_GROUP, group_size * size_of::<u64>());
        when!(PERF_FORMAT_ID, group_size * size_of::<u64>());
        when!(PERF_FORMAT_LOST, group_size * size_of::<u64>());

        size
    }
}

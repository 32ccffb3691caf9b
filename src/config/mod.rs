//! Options that shape the event descriptor, and the call-time arguments
//! ([`Target`], [`Group`], [`Flags`]) of a registration.

#[cfg(test)]
mod test;

pub(crate) mod attr;
mod flags;
mod group;
mod target;

pub use flags::*;
pub use group::*;
pub use target::*;

use crate::ffi::bindings as b;

// Rejects options that the kernel selected by the `linux-*` features does not know.
#[allow(unused_macros)]
macro_rules! unsupported {
    () => {
        Err(std::io::ErrorKind::Unsupported)?
    };
    ($bool:expr) => {
        if $bool {
            Err(std::io::ErrorKind::Unsupported)?
        }
    };
}
#[allow(unused_imports)]
pub(crate) use unsupported;

/// Descriptor options.
///
/// Together with an [`Event`][crate::event::Event] this is everything the kernel
/// needs to know about what to measure and how. The defaults describe a
/// disabled, counting-only event that counts at every privilege level.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opts {
    /// Exclude events with privilege levels.
    ///
    /// With `/proc/sys/kernel/perf_event_paranoid` at 2 (the usual default),
    /// unprivileged callers must exclude the kernel.
    pub exclude: Priv,

    // Only a group leader can be exclusive or pinned:
    // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12982
    /// The group must be the only one on the PMU when scheduled.
    pub only_group: bool,

    /// The group must always be on the PMU, or go into error state.
    pub pin_on_pmu: bool,

    /// Controls the inherit behavior.
    pub inherit: Option<Inherit>,

    /// Counter behavior when calling [`execve`](https://man7.org/linux/man-pages/man2/execve.2.html).
    pub on_execve: Option<OnExecve>,

    /// Controls the format of [`Stat`][crate::count::Stat].
    pub stat_format: StatFormat,

    /// Enable the event as soon as it is registered.
    pub enable: bool,

    /// Period or frequency of samples.
    pub sample_on: SampleOn,

    /// Controls the amount of sample skid.
    pub sample_skid: SampleSkid,

    /// Fields included in every sample record.
    pub sample_format: SampleFormat,

    /// Generate extra record types.
    pub extra_record: ExtraRecord,

    /// Attach the [`RecordIdFormat`] fields to all non-sample records too.
    pub record_id_all: bool,

    /// Identification fields included in records.
    pub record_id_format: RecordIdFormat,

    /// When the sampling buffer signals readiness.
    pub wake_up: WakeUp,

    // Must be used together with `remove_on_exec`:
    // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12582
    /// Send a synchronous `SIGTRAP` to the target task on every sample.
    ///
    /// Since `linux-5.13`: <https://github.com/torvalds/linux/commit/97ba62b278674293762c3d91f724f1bb922f04e0>
    pub sigtrap_on_sample: Option<SigData>,

    /// Clock used for time fields in records.
    ///
    /// Since `linux-4.1`: <https://github.com/torvalds/linux/commit/34f439278cef7b1177f8ce24f9fc81dfc6221d3b>
    pub timer: Option<Clock>,
}

/// Privilege levels.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priv {
    /// User space.
    pub user: bool,

    /// Kernel space.
    pub kernel: bool,

    /// Hypervisor.
    pub hv: bool,

    /// Host mode.
    pub host: bool,

    /// Guest mode.
    pub guest: bool,

    /// Idle task.
    pub idle: bool,
}

/// Controls the inherit behavior.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inherit {
    /// Tasks created by the target after registration are counted too.
    ///
    /// Existing children are not affected.
    NewChild,

    /// Same as [`NewChild`][Self::NewChild], but only for new threads.
    ///
    /// Since `linux-5.13`: <https://github.com/torvalds/linux/commit/2b26f0aa004995f49f7b6f4100dd0e4c39a9ed5f>
    NewThread,
}

/// Counter behavior when calling [`execve`](https://man7.org/linux/man-pages/man2/execve.2.html).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnExecve {
    /// Enable counter.
    Enable,

    /// Remove counter.
    ///
    /// Since `linux-5.13`: <https://github.com/torvalds/linux/commit/2e498d0a74e5b88a6689ae1b811f247f91ff188e>
    Remove,
}

/// Controls the format of [`Stat`][crate::count::Stat] (`read_format`).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatFormat {
    /// Contains the [event ID][crate::count::Stat::id].
    pub id: bool,

    /// Contains the [enabled time][crate::count::Stat::time_enabled] of the counter.
    pub time_enabled: bool,

    /// Contains the [running time][crate::count::Stat::time_running] of the counter.
    pub time_running: bool,

    /// Contains the [number of lost records][crate::count::Stat::lost_records].
    ///
    /// Since `linux-6.0`: <https://github.com/torvalds/linux/commit/119a784c81270eb88e573174ed2209225d646656>
    pub lost_records: bool,

    /// Contains [sibling event counts][crate::count::Stat::siblings].
    ///
    /// Only meaningful on a group leader.
    pub siblings: bool,
}

impl StatFormat {
    pub(crate) fn as_read_format(&self) -> crate::Result<u64> {
        let mut val = 0;
        macro_rules! when {
            ($field:ident, $flag:ident) => {
                if self.$field {
                    val |= b::$flag;
                }
            };
        }
        when!(id, PERF_FORMAT_ID);
        when!(time_enabled, PERF_FORMAT_TOTAL_TIME_ENABLED);
        when!(time_running, PERF_FORMAT_TOTAL_TIME_RUNNING);
        #[cfg(feature = "linux-6.0")]
        when!(lost_records, PERF_FORMAT_LOST);
        #[cfg(not(feature = "linux-6.0"))]
        crate::config::unsupported!(self.lost_records);
        when!(siblings, PERF_FORMAT_GROUP);
        Ok(val)
    }
}

/// Controls when to generate a sample: either every N events (period)
/// or at a target rate (frequency). Exactly one mode is active.
///
/// Defaults to `Freq(0)`, which never samples; the event only counts.
///
/// The maximum rate is capped by `/proc/sys/kernel/perf_event_max_sample_rate`,
/// see [`host::max_sample_rate`][crate::host::max_sample_rate].
///
/// # Examples
///
/// ```rust
/// use perf_event_register::config::{Opts, SampleOn};
/// use perf_event_register::event::sw::Software;
/// use perf_event_register::EventDescriptor;
///
/// let mut opts = Opts::default();
/// opts.sample_on = SampleOn::Count(1_000_000);
///
/// let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
/// assert!(!desc.is_freq());
/// assert_eq!(desc.sample_period(), Some(1_000_000));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleOn {
    /// Sample on frequency (Hz).
    ///
    /// The kernel adjusts the period dynamically to approach this rate.
    Freq(u64),

    /// Sample on every N event counts (the sample period).
    Count(u64),
}

impl Default for SampleOn {
    fn default() -> Self {
        Self::Freq(0)
    }
}

/// Controls the amount of sample skid, i.e. how many instructions execute between
/// the event and the moment the kernel records it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleSkid {
    /// Can have arbitrary skid.
    #[default]
    Arbitrary,
    /// Must have constant skid.
    Const,
    /// Requested to have 0 skid.
    ReqZero,
    /// Must have 0 skid.
    Zero,
}

impl SampleSkid {
    pub(crate) fn as_precise_ip(&self) -> u8 {
        match self {
            Self::Arbitrary => 0,
            Self::Const => 1,
            Self::ReqZero => 2,
            Self::Zero => 3,
        }
    }
}

/// Fields included in sample records (`sample_type`).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleFormat {
    // PERF_SAMPLE_READ
    /// Counter values, formatted by [`StatFormat`].
    pub stat: bool,
    // PERF_SAMPLE_PERIOD
    /// Current sample period.
    pub period: bool,
    // PERF_SAMPLE_CGROUP
    /// Cgroup ID of the sampled task.
    ///
    /// Since `linux-5.7`: <https://github.com/torvalds/linux/commit/6546b19f95acc986807de981402bbac6b3a94b0f>
    pub cgroup: bool,
    // PERF_SAMPLE_CALLCHAIN
    /// Stack backtrace.
    pub call_chain: Option<CallChain>,
    // PERF_SAMPLE_STACK_USER
    /// Dump of the user stack, of the given size.
    pub user_stack: Option<Size>,

    // PERF_SAMPLE_ADDR
    /// Data address.
    pub data_addr: bool,
    // PERF_SAMPLE_PHYS_ADDR
    /// Physical data address.
    ///
    /// Since `linux-4.14`: <https://github.com/torvalds/linux/commit/fc7ce9c74c3ad232b084d80148654f926d01ece7>
    pub data_phys_addr: bool,
    // PERF_SAMPLE_DATA_PAGE_SIZE
    /// Since `linux-5.11`: <https://github.com/torvalds/linux/commit/8d97e71811aaafe4abf611dc24822fd6e73df1a1>
    pub data_page_size: bool,
    // PERF_SAMPLE_DATA_SRC
    /// Source of the data associated with the sampled instruction.
    pub data_source: bool,

    // PERF_SAMPLE_IP
    /// Instruction pointer.
    pub code_addr: bool,
    // PERF_SAMPLE_CODE_PAGE_SIZE
    /// Since `linux-5.11`: <https://github.com/torvalds/linux/commit/995f088efebe1eba0282a6ffa12411b37f8990c2>
    pub code_page_size: bool,

    // PERF_SAMPLE_REGS_USER
    /// User level registers.
    pub user_regs: Option<RegsMask>,
    // PERF_SAMPLE_REGS_INTR
    /// Registers at interrupt (event overflow).
    pub intr_regs: Option<RegsMask>,

    // PERF_SAMPLE_RAW
    /// Raw tracepoint or PMU data.
    pub raw: bool,
    // PERF_SAMPLE_TRANSACTION
    /// Sources of transactional memory aborts.
    pub txn: bool,
    // PERF_SAMPLE_WEIGHT / PERF_SAMPLE_WEIGHT_STRUCT
    /// Hardware-provided cost of the sampled event.
    pub weight: Option<Repr>,
}

/// Size in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size(pub u32);

/// Controls how weight values are represented.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Repr {
    // PERF_SAMPLE_WEIGHT
    /// One 64-bit value.
    Full,

    // PERF_SAMPLE_WEIGHT_STRUCT
    /// Several smaller values packed in 64 bits.
    ///
    /// Since `linux-5.12`: <https://github.com/torvalds/linux/commit/2a6c6b7d7ad346f0679d0963cb19b3f0ea7ef32c>
    Vars,
}

/// Call chain options.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallChain {
    /// Exclude user call chains.
    pub exclude_user: bool,

    /// Exclude kernel call chains.
    pub exclude_kernel: bool,

    /// How many stack frames to report, `0` means the system default
    /// (`/proc/sys/kernel/perf_event_max_stack`).
    ///
    /// Since `linux-4.8`: <https://github.com/torvalds/linux/commit/97c79a38cd454602645f0470ffb444b3b75ce574>
    pub max_stack_frames: u16,
}

/// Register mask that defines the set of CPU registers to dump on samples.
///
/// The layout is architecture-specific, see `arch/<arch>/include/uapi/asm/perf_regs.h`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegsMask(pub u64);

/// Generate extra record types.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraRecord {
    /// Fork and exit records.
    pub task: bool,

    /// Per-task read records, only meaningful with [`Opts::inherit`].
    pub read: bool,

    // This also enables `task`:
    // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L8389
    /// Comm (task rename) records.
    pub comm: bool,

    /// Mmap record options.
    pub mmap: Mmap,

    /// Since `linux-5.7`: <https://github.com/torvalds/linux/commit/96aaab686505c449e24d76e76507290dcc30e008>
    pub cgroup: bool,

    /// Since `linux-5.1`: <https://github.com/torvalds/linux/commit/76193a94522f1d4edf2447a536f3f796ce56343b>
    pub ksymbol: bool,

    /// Since `linux-5.1`: <https://github.com/torvalds/linux/commit/6ee52e2a3fe4ea35520720736e6791df1fb67106>
    pub bpf_event: bool,

    /// Since `linux-5.9`: <https://github.com/torvalds/linux/commit/e17d43b93e544f5016c0251d2074c15568d5d963>
    pub text_poke: bool,

    /// Since `linux-4.3`: <https://github.com/torvalds/linux/commit/45ac1403f564f411c6a383a2448688ba8dd705a4>
    pub ctx_switch: bool,

    /// Since `linux-4.12`: <https://github.com/torvalds/linux/commit/e422267322cd319e2695a535e47c5b1feeac45eb>
    pub namespaces: bool,
}

/// Mmap record options.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mmap {
    /// Executable mappings (with `PROT_EXEC`).
    pub code: bool,

    /// Non-executable mappings.
    pub data: bool,

    /// Extended records with inode data (`mmap2`), optionally carrying
    /// a build ID instead of device info.
    ///
    /// This also enables [`Self::code`].
    pub ext: Option<UseBuildId>,
}

/// Prefer the ELF build ID over device info in extended mmap records.
///
/// Since `linux-5.12`: <https://github.com/torvalds/linux/commit/88a16a1309333e43d328621ece3e9fa37027e8eb>
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseBuildId(pub bool);

/// Identification fields included in records.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordIdFormat {
    // PERF_SAMPLE_ID
    pub id: bool,
    // PERF_SAMPLE_STREAM_ID
    pub stream_id: bool,
    // PERF_SAMPLE_CPU
    pub cpu: bool,
    // PERF_SAMPLE_TID
    pub task: bool,
    // PERF_SAMPLE_TIME
    pub time: bool,
}

/// Wake up options for readers of the sampling buffer.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WakeUp {
    /// When to signal readiness.
    pub on: WakeUpOn,

    /// Signal readiness on every N bytes available in the AUX area.
    ///
    /// Since `linux-4.1`: <https://github.com/torvalds/linux/commit/1a5941312414c71dece6717da9a0fa1303127afa>
    pub on_aux_bytes: u32,
}

/// When the sampling buffer signals readiness (poll/epoll `POLLIN`).
/// Exactly one mode is active.
///
/// `Bytes(0)` and `Samples(0)` both mean "never" unless the target exits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WakeUpOn {
    /// Wake up once N bytes are available (watermark).
    Bytes(u32),

    /// Wake up on every N samples.
    Samples(u32),
}

impl Default for WakeUpOn {
    fn default() -> Self {
        Self::Samples(0)
    }
}

/// Signal data passed to the `SIGTRAP` handler through `si_perf_data`.
///
/// Since `linux-5.13`: <https://github.com/torvalds/linux/commit/97ba62b278674293762c3d91f724f1bb922f04e0>
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SigData(pub u64);

/// Clock sources for time fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clock {
    // CLOCK_TAI
    /// International Atomic Time, wall-clock without leap seconds.
    Tai,

    // CLOCK_REALTIME
    /// Settable wall-clock time.
    RealTime,

    // CLOCK_BOOTTIME
    /// Like [`Monotonic`][Self::Monotonic], but includes suspended time.
    BootTime,

    // CLOCK_MONOTONIC
    /// Time since boot, NTP-adjusted, excluding suspend.
    Monotonic,

    // CLOCK_MONOTONIC_RAW
    /// Like [`Monotonic`][Self::Monotonic], without NTP adjustments.
    MonotonicRaw,
}

impl Clock {
    pub(crate) fn as_clockid(&self) -> i32 {
        match self {
            Self::Tai => libc::CLOCK_TAI,
            Self::RealTime => libc::CLOCK_REALTIME,
            Self::BootTime => libc::CLOCK_BOOTTIME,
            Self::Monotonic => libc::CLOCK_MONOTONIC,
            Self::MonotonicRaw => libc::CLOCK_MONOTONIC_RAW,
        }
    }
}

use super::EventConfig;
use crate::ffi::bindings as b;

/// Software events provided by the kernel.
///
/// These are available on every machine and are the safest choice
/// when hardware counters are not exposed (e.g. inside most VMs).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Software {
    /// A high-resolution per-CPU timer.
    CpuClock,
    /// A clock count specific to the task that is running.
    TaskClock,

    PageFault,
    MinorPageFault,
    MajorPageFault,

    /// Unaligned accesses the kernel had to fix up.
    AlignFault,
    /// Unimplemented instructions the kernel had to emulate.
    EmuFault,

    CtxSwitch,
    /// Context switches to a task in a different cgroup.
    ///
    /// Since `linux-5.13`: <https://github.com/torvalds/linux/commit/d0d1dd628527c77db2391ce0293c1ed344b2365f>
    CgroupSwitch,
    CpuMigration,

    /// A placeholder event that counts nothing.
    ///
    /// Useful for collecting side-band records without counting anything.
    Dummy,
    /// Output channel for BPF programs.
    ///
    /// Since `linux-4.4`: <https://github.com/torvalds/linux/commit/a43eec304259a6c637f4014a6d4767159b6a3aa3>
    BpfOutput,
}

super::try_from!(Software, value, {
    let config = match value {
        Software::CpuClock => b::PERF_COUNT_SW_CPU_CLOCK,
        Software::TaskClock => b::PERF_COUNT_SW_TASK_CLOCK,

        Software::PageFault => b::PERF_COUNT_SW_PAGE_FAULTS,
        Software::MinorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MIN,
        Software::MajorPageFault => b::PERF_COUNT_SW_PAGE_FAULTS_MAJ,

        Software::AlignFault => b::PERF_COUNT_SW_ALIGNMENT_FAULTS,
        Software::EmuFault => b::PERF_COUNT_SW_EMULATION_FAULTS,

        Software::CtxSwitch => b::PERF_COUNT_SW_CONTEXT_SWITCHES,
        #[cfg(feature = "linux-5.13")]
        Software::CgroupSwitch => b::PERF_COUNT_SW_CGROUP_SWITCHES,
        #[cfg(not(feature = "linux-5.13"))]
        Software::CgroupSwitch => crate::config::unsupported!(),
        Software::CpuMigration => b::PERF_COUNT_SW_CPU_MIGRATIONS,

        Software::Dummy => b::PERF_COUNT_SW_DUMMY,
        #[cfg(feature = "linux-4.4")]
        Software::BpfOutput => b::PERF_COUNT_SW_BPF_OUTPUT,
        #[cfg(not(feature = "linux-4.4"))]
        Software::BpfOutput => crate::config::unsupported!(),
    };

    let event_config = EventConfig {
        ty: b::PERF_TYPE_SOFTWARE,
        config,
        ..Default::default()
    };

    Ok(Self(event_config))
});

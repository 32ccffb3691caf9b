use super::EventConfig;
use crate::ffi::bindings as b;

/// Generalized hardware events, mapped by the kernel to the CPU's own counters.
///
/// Not every CPU provides every event, unsupported ones are rejected by the
/// kernel with [`ErrorKind::Unsupported`][crate::ErrorKind::Unsupported].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hardware {
    CpuCycle,
    BusCycle,
    RefCpuCycle,

    /// Hardware cache event, see [`Type`], [`Op`] and [`OpResult`].
    Cache(Type, Op, OpResult),
    CacheMiss,
    CacheAccess,

    BranchMiss,
    BranchInstr,

    BackendStalledCycle,
    FrontendStalledCycle,

    Instr,
}

/// Cache level or unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    L1d,
    L1i,
    Ll,
    Dtlb,
    Itlb,
    Bpu,
    Node,
}

/// Cache operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    Read,
    Write,
    Prefetch,
}

/// Cache operation result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpResult {
    Miss,
    Access,
}

// `PERF_TYPE_HW_CACHE` config layout:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L66
pub(crate) fn cache_config(ty: &Type, op: &Op, result: &OpResult) -> u64 {
    let id = match ty {
        Type::L1d => b::PERF_COUNT_HW_CACHE_L1D,
        Type::L1i => b::PERF_COUNT_HW_CACHE_L1I,
        Type::Ll => b::PERF_COUNT_HW_CACHE_LL,
        Type::Dtlb => b::PERF_COUNT_HW_CACHE_DTLB,
        Type::Itlb => b::PERF_COUNT_HW_CACHE_ITLB,
        Type::Bpu => b::PERF_COUNT_HW_CACHE_BPU,
        Type::Node => b::PERF_COUNT_HW_CACHE_NODE,
    };
    let op = match op {
        Op::Read => b::PERF_COUNT_HW_CACHE_OP_READ,
        Op::Write => b::PERF_COUNT_HW_CACHE_OP_WRITE,
        Op::Prefetch => b::PERF_COUNT_HW_CACHE_OP_PREFETCH,
    };
    let result = match result {
        OpResult::Miss => b::PERF_COUNT_HW_CACHE_RESULT_MISS,
        OpResult::Access => b::PERF_COUNT_HW_CACHE_RESULT_ACCESS,
    };
    id | (op << 8) | (result << 16)
}

super::try_from!(Hardware, value, {
    let hw = |config| (b::PERF_TYPE_HARDWARE, config);
    let (ty, config) = match value {
        Hardware::CpuCycle => hw(b::PERF_COUNT_HW_CPU_CYCLES),
        Hardware::BusCycle => hw(b::PERF_COUNT_HW_BUS_CYCLES),
        Hardware::RefCpuCycle => hw(b::PERF_COUNT_HW_REF_CPU_CYCLES),

        Hardware::Cache(ty, op, result) => (b::PERF_TYPE_HW_CACHE, cache_config(ty, op, result)),
        Hardware::CacheMiss => hw(b::PERF_COUNT_HW_CACHE_MISSES),
        Hardware::CacheAccess => hw(b::PERF_COUNT_HW_CACHE_REFERENCES),

        Hardware::BranchMiss => hw(b::PERF_COUNT_HW_BRANCH_MISSES),
        Hardware::BranchInstr => hw(b::PERF_COUNT_HW_BRANCH_INSTRUCTIONS),

        Hardware::BackendStalledCycle => hw(b::PERF_COUNT_HW_STALLED_CYCLES_BACKEND),
        Hardware::FrontendStalledCycle => hw(b::PERF_COUNT_HW_STALLED_CYCLES_FRONTEND),

        Hardware::Instr => hw(b::PERF_COUNT_HW_INSTRUCTIONS),
    };

    let event_config = EventConfig {
        ty,
        config,
        ..Default::default()
    };

    Ok(Self(event_config))
});

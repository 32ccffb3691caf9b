// Layout and constants from `include/uapi/linux/perf_event.h`:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h
//
// The layout is the `PERF_ATTR_SIZE_VER8` one. Older kernels accept it as long as
// every byte past their own `perf_event_attr` is zero, so fields introduced after
// the configured `linux-*` feature must stay zero (see `config::unsupported`).

#![allow(dead_code)]

use static_assertions::const_assert_eq;

/// `struct perf_event_attr`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    // union { sample_period; sample_freq; }, selected by `ATTR_FREQ`.
    pub sample_period_or_freq: u64,
    pub sample_type: u64,
    pub read_format: u64,
    // See `ATTR_*` bits below.
    pub flags: u64,
    // union { wakeup_events; wakeup_watermark; }, selected by `ATTR_WATERMARK`.
    pub wakeup_events_or_watermark: u32,
    pub bp_type: u32,
    // union { bp_addr; kprobe_func; uprobe_path; config1; }
    pub config1: u64,
    // union { bp_len; kprobe_addr; probe_offset; config2; }
    pub config2: u64,
    pub branch_sample_type: u64,
    pub sample_regs_user: u64,
    pub sample_stack_user: u32,
    pub clockid: i32,
    pub sample_regs_intr: u64,
    pub aux_watermark: u32,
    pub sample_max_stack: u16,
    pub __reserved_2: u16,
    pub aux_sample_size: u32,
    // `aux_start_paused`, `aux_pause`, `aux_resume` since `linux-6.13`,
    // `__reserved_3` before.
    pub aux_action: u32,
    pub sig_data: u64,
    pub config3: u64,
}

pub const PERF_ATTR_SIZE_VER0: u32 = 64;
pub const PERF_ATTR_SIZE_VER8: u32 = 136;

const_assert_eq!(size_of::<Attr>(), PERF_ATTR_SIZE_VER8 as usize);

impl Attr {
    pub fn set(&mut self, bit: u64, on: bool) {
        if on {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }

    pub fn has(&self, bit: u64) -> bool {
        self.flags & bit == bit
    }

    pub fn precise_ip(&self) -> u8 {
        ((self.flags & ATTR_PRECISE_IP_MASK) >> ATTR_PRECISE_IP_SHIFT) as _
    }

    pub fn set_precise_ip(&mut self, level: u8) {
        self.flags &= !ATTR_PRECISE_IP_MASK;
        self.flags |= ((level as u64) << ATTR_PRECISE_IP_SHIFT) & ATTR_PRECISE_IP_MASK;
    }
}

// Attr bitfield.
pub const ATTR_DISABLED: u64 = 1 << 0;
pub const ATTR_INHERIT: u64 = 1 << 1;
pub const ATTR_PINNED: u64 = 1 << 2;
pub const ATTR_EXCLUSIVE: u64 = 1 << 3;
pub const ATTR_EXCLUDE_USER: u64 = 1 << 4;
pub const ATTR_EXCLUDE_KERNEL: u64 = 1 << 5;
pub const ATTR_EXCLUDE_HV: u64 = 1 << 6;
pub const ATTR_EXCLUDE_IDLE: u64 = 1 << 7;
pub const ATTR_MMAP: u64 = 1 << 8;
pub const ATTR_COMM: u64 = 1 << 9;
pub const ATTR_FREQ: u64 = 1 << 10;
pub const ATTR_INHERIT_STAT: u64 = 1 << 11;
pub const ATTR_ENABLE_ON_EXEC: u64 = 1 << 12;
pub const ATTR_TASK: u64 = 1 << 13;
pub const ATTR_WATERMARK: u64 = 1 << 14;
pub const ATTR_PRECISE_IP_SHIFT: u64 = 15;
pub const ATTR_PRECISE_IP_MASK: u64 = 0b11 << ATTR_PRECISE_IP_SHIFT;
pub const ATTR_MMAP_DATA: u64 = 1 << 17;
pub const ATTR_SAMPLE_ID_ALL: u64 = 1 << 18;
pub const ATTR_EXCLUDE_HOST: u64 = 1 << 19;
pub const ATTR_EXCLUDE_GUEST: u64 = 1 << 20;
pub const ATTR_EXCLUDE_CALLCHAIN_KERNEL: u64 = 1 << 21;
pub const ATTR_EXCLUDE_CALLCHAIN_USER: u64 = 1 << 22;
pub const ATTR_MMAP2: u64 = 1 << 23;
pub const ATTR_COMM_EXEC: u64 = 1 << 24;
pub const ATTR_USE_CLOCKID: u64 = 1 << 25;
pub const ATTR_CONTEXT_SWITCH: u64 = 1 << 26;
pub const ATTR_WRITE_BACKWARD: u64 = 1 << 27;
pub const ATTR_NAMESPACES: u64 = 1 << 28;
pub const ATTR_KSYMBOL: u64 = 1 << 29;
pub const ATTR_BPF_EVENT: u64 = 1 << 30;
pub const ATTR_AUX_OUTPUT: u64 = 1 << 31;
pub const ATTR_CGROUP: u64 = 1 << 32;
pub const ATTR_TEXT_POKE: u64 = 1 << 33;
pub const ATTR_BUILD_ID: u64 = 1 << 34;
pub const ATTR_INHERIT_THREAD: u64 = 1 << 35;
pub const ATTR_REMOVE_ON_EXEC: u64 = 1 << 36;
pub const ATTR_SIGTRAP: u64 = 1 << 37;

// enum perf_type_id
pub const PERF_TYPE_HARDWARE: u32 = 0;
pub const PERF_TYPE_SOFTWARE: u32 = 1;
pub const PERF_TYPE_TRACEPOINT: u32 = 2;
pub const PERF_TYPE_HW_CACHE: u32 = 3;
pub const PERF_TYPE_RAW: u32 = 4;
pub const PERF_TYPE_BREAKPOINT: u32 = 5;

// enum perf_hw_id
pub const PERF_COUNT_HW_CPU_CYCLES: u64 = 0;
pub const PERF_COUNT_HW_INSTRUCTIONS: u64 = 1;
pub const PERF_COUNT_HW_CACHE_REFERENCES: u64 = 2;
pub const PERF_COUNT_HW_CACHE_MISSES: u64 = 3;
pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u64 = 4;
pub const PERF_COUNT_HW_BRANCH_MISSES: u64 = 5;
pub const PERF_COUNT_HW_BUS_CYCLES: u64 = 6;
pub const PERF_COUNT_HW_STALLED_CYCLES_FRONTEND: u64 = 7;
pub const PERF_COUNT_HW_STALLED_CYCLES_BACKEND: u64 = 8;
pub const PERF_COUNT_HW_REF_CPU_CYCLES: u64 = 9;

// enum perf_hw_cache_id
pub const PERF_COUNT_HW_CACHE_L1D: u64 = 0;
pub const PERF_COUNT_HW_CACHE_L1I: u64 = 1;
pub const PERF_COUNT_HW_CACHE_LL: u64 = 2;
pub const PERF_COUNT_HW_CACHE_DTLB: u64 = 3;
pub const PERF_COUNT_HW_CACHE_ITLB: u64 = 4;
pub const PERF_COUNT_HW_CACHE_BPU: u64 = 5;
pub const PERF_COUNT_HW_CACHE_NODE: u64 = 6;

// enum perf_hw_cache_op_id
pub const PERF_COUNT_HW_CACHE_OP_READ: u64 = 0;
pub const PERF_COUNT_HW_CACHE_OP_WRITE: u64 = 1;
pub const PERF_COUNT_HW_CACHE_OP_PREFETCH: u64 = 2;

// enum perf_hw_cache_op_result_id
pub const PERF_COUNT_HW_CACHE_RESULT_ACCESS: u64 = 0;
pub const PERF_COUNT_HW_CACHE_RESULT_MISS: u64 = 1;

// enum perf_sw_ids
pub const PERF_COUNT_SW_CPU_CLOCK: u64 = 0;
pub const PERF_COUNT_SW_TASK_CLOCK: u64 = 1;
pub const PERF_COUNT_SW_PAGE_FAULTS: u64 = 2;
pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u64 = 3;
pub const PERF_COUNT_SW_CPU_MIGRATIONS: u64 = 4;
pub const PERF_COUNT_SW_PAGE_FAULTS_MIN: u64 = 5;
pub const PERF_COUNT_SW_PAGE_FAULTS_MAJ: u64 = 6;
pub const PERF_COUNT_SW_ALIGNMENT_FAULTS: u64 = 7;
pub const PERF_COUNT_SW_EMULATION_FAULTS: u64 = 8;
pub const PERF_COUNT_SW_DUMMY: u64 = 9;
pub const PERF_COUNT_SW_BPF_OUTPUT: u64 = 10;
pub const PERF_COUNT_SW_CGROUP_SWITCHES: u64 = 11;

// enum perf_event_sample_format
pub const PERF_SAMPLE_IP: u64 = 1 << 0;
pub const PERF_SAMPLE_TID: u64 = 1 << 1;
pub const PERF_SAMPLE_TIME: u64 = 1 << 2;
pub const PERF_SAMPLE_ADDR: u64 = 1 << 3;
pub const PERF_SAMPLE_READ: u64 = 1 << 4;
pub const PERF_SAMPLE_CALLCHAIN: u64 = 1 << 5;
pub const PERF_SAMPLE_ID: u64 = 1 << 6;
pub const PERF_SAMPLE_CPU: u64 = 1 << 7;
pub const PERF_SAMPLE_PERIOD: u64 = 1 << 8;
pub const PERF_SAMPLE_STREAM_ID: u64 = 1 << 9;
pub const PERF_SAMPLE_RAW: u64 = 1 << 10;
pub const PERF_SAMPLE_BRANCH_STACK: u64 = 1 << 11;
pub const PERF_SAMPLE_REGS_USER: u64 = 1 << 12;
pub const PERF_SAMPLE_STACK_USER: u64 = 1 << 13;
pub const PERF_SAMPLE_WEIGHT: u64 = 1 << 14;
pub const PERF_SAMPLE_DATA_SRC: u64 = 1 << 15;
pub const PERF_SAMPLE_IDENTIFIER: u64 = 1 << 16;
pub const PERF_SAMPLE_TRANSACTION: u64 = 1 << 17;
pub const PERF_SAMPLE_REGS_INTR: u64 = 1 << 18;
pub const PERF_SAMPLE_PHYS_ADDR: u64 = 1 << 19;
pub const PERF_SAMPLE_AUX: u64 = 1 << 20;
pub const PERF_SAMPLE_CGROUP: u64 = 1 << 21;
pub const PERF_SAMPLE_DATA_PAGE_SIZE: u64 = 1 << 22;
pub const PERF_SAMPLE_CODE_PAGE_SIZE: u64 = 1 << 23;
pub const PERF_SAMPLE_WEIGHT_STRUCT: u64 = 1 << 24;

// enum perf_event_read_format
pub const PERF_FORMAT_TOTAL_TIME_ENABLED: u64 = 1 << 0;
pub const PERF_FORMAT_TOTAL_TIME_RUNNING: u64 = 1 << 1;
pub const PERF_FORMAT_ID: u64 = 1 << 2;
pub const PERF_FORMAT_GROUP: u64 = 1 << 3;
pub const PERF_FORMAT_LOST: u64 = 1 << 4;

// perf_event_open flags
pub const PERF_FLAG_FD_NO_GROUP: u64 = 1 << 0;
pub const PERF_FLAG_FD_OUTPUT: u64 = 1 << 1;
pub const PERF_FLAG_PID_CGROUP: u64 = 1 << 2;
pub const PERF_FLAG_FD_CLOEXEC: u64 = 1 << 3;

// enum perf_event_ioc_flags
pub const PERF_IOC_FLAG_GROUP: u64 = 1 << 0;

// include/uapi/linux/hw_breakpoint.h
pub const HW_BREAKPOINT_EMPTY: u32 = 0;
pub const HW_BREAKPOINT_R: u32 = 1;
pub const HW_BREAKPOINT_W: u32 = 2;
pub const HW_BREAKPOINT_RW: u32 = HW_BREAKPOINT_R | HW_BREAKPOINT_W;
pub const HW_BREAKPOINT_X: u32 = 4;

// The `_IOC` encoding is architecture specific:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/asm-generic/ioctl.h
#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
mod ioc {
    pub const SIZEBITS: u64 = 13;
    pub const NONE: u64 = 1;
    pub const READ: u64 = 2;
    pub const WRITE: u64 = 4;
}
#[cfg(not(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
mod ioc {
    pub const SIZEBITS: u64 = 14;
    pub const NONE: u64 = 0;
    pub const READ: u64 = 2;
    pub const WRITE: u64 = 1;
}

const fn ioc(dir: u64, nr: u64, size: usize) -> u64 {
    const NRSHIFT: u64 = 0;
    const TYPESHIFT: u64 = 8;
    const SIZESHIFT: u64 = 16;
    const DIRSHIFT: u64 = SIZESHIFT + ioc::SIZEBITS;
    (dir << DIRSHIFT) | ((b'$' as u64) << TYPESHIFT) | (nr << NRSHIFT) | ((size as u64) << SIZESHIFT)
}

pub const PERF_EVENT_IOC_ENABLE: u64 = ioc(ioc::NONE, 0, 0);
pub const PERF_EVENT_IOC_DISABLE: u64 = ioc(ioc::NONE, 1, 0);
pub const PERF_EVENT_IOC_REFRESH: u64 = ioc(ioc::NONE, 2, 0);
pub const PERF_EVENT_IOC_RESET: u64 = ioc(ioc::NONE, 3, 0);
pub const PERF_EVENT_IOC_PERIOD: u64 = ioc(ioc::WRITE, 4, size_of::<u64>());
pub const PERF_EVENT_IOC_ID: u64 = ioc(ioc::READ, 7, size_of::<*mut u64>());

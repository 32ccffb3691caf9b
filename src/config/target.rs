use std::fs::File;
use std::os::fd::AsRawFd;

use super::Flags;

/// Any process, or any CPU, depending on its position in the tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct All;

/// A CPU index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cpu(pub u32);

impl Cpu {
    pub const ALL: All = All;
}

/// A process (or thread) ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proc(pub u32);

impl Proc {
    pub const ALL: All = All;
    /// The calling process.
    pub const CURRENT: Proc = Proc(0);
}

/// An open cgroup directory (in cgroupfs) to monitor.
#[derive(Clone, Copy, Debug)]
pub struct Cgroup<'a>(pub &'a File);

/// Where an event is measured: which process (or cgroup) and which CPU.
///
/// Built from tuples of [`Proc`], [`Cpu`], [`Cgroup`] and [`All`], in either order:
///
/// ```rust
/// use perf_event_register::config::{Cpu, Proc, Target};
///
/// let this_proc_any_cpu: Target = (Proc::CURRENT, Cpu::ALL).into();
/// let any_proc_cpu_0: Target = (Cpu(0), Proc::ALL).into();
/// assert_eq!(this_proc_any_cpu.pid(), 0);
/// assert_eq!(any_proc_cpu_0.cpu(), 0);
/// ```
///
/// There is no typed form of "any process on any CPU", the kernel rejects it.
/// [`Proc`] and [`Cpu`] values above `i32::MAX` saturate to `i32::MAX`, so a
/// concrete process or CPU never turns into the `-1` wildcard.
// https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12835
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub(crate) pid: i32,
    pub(crate) cpu: i32,
    pub(crate) flags: Flags,
}

impl Target {
    /// Builds a target from the raw `pid` and `cpu` arguments of `perf_event_open`.
    ///
    /// Nothing is checked here, `-1` means "any" and the kernel decides the rest.
    ///
    /// ```rust
    /// use perf_event_register::config::Target;
    ///
    /// let target = Target::raw(-1, -1);
    /// assert!(!target.is_concrete());
    /// ```
    pub fn raw(pid: i32, cpu: i32) -> Self {
        Self {
            pid,
            cpu,
            flags: Flags::empty(),
        }
    }

    /// The `pid` argument (a cgroup fd for cgroup targets).
    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// The `cpu` argument.
    pub fn cpu(&self) -> i32 {
        self.cpu
    }

    /// Flags this target contributes to the call.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether at least one of process or CPU is concrete and neither is out of range.
    pub fn is_concrete(&self) -> bool {
        self.pid >= -1 && self.cpu >= -1 && !(self.pid == -1 && self.cpu == -1)
    }
}

macro_rules! into_target {
    ($ty: ty, $destruct: tt, $pid: expr, $cpu: expr, $flags: expr) => {
        impl From<$ty> for Target {
            fn from($destruct: $ty) -> Self {
                Target {
                    pid: $pid,
                    cpu: $cpu,
                    flags: $flags,
                }
            }
        }
    };
}

// Out of range ids stay out of range for the kernel instead of wrapping to -1.
fn saturate(id: u32) -> i32 {
    i32::try_from(id).unwrap_or(i32::MAX)
}

into_target!((Proc, Cpu), (Proc(pid), Cpu(cpu)), saturate(pid), saturate(cpu), Flags::empty());
into_target!((Cpu, Proc), (Cpu(cpu), Proc(pid)), saturate(pid), saturate(cpu), Flags::empty());

into_target!((Proc, All), (Proc(pid), _), saturate(pid), -1, Flags::empty());
into_target!((All, Proc), (_, Proc(pid)), saturate(pid), -1, Flags::empty());

into_target!((Cpu, All), (Cpu(cpu), _), -1, saturate(cpu), Flags::empty());
into_target!((All, Cpu), (_, Cpu(cpu)), -1, saturate(cpu), Flags::empty());

// Cgroup monitoring is per-CPU only, `(Cgroup, All)` is rejected by the kernel.
into_target!(
    (Cgroup<'_>, Cpu),
    (Cgroup(file), Cpu(cpu)),
    file.as_raw_fd(),
    saturate(cpu),
    Flags::PID_CGROUP
);
into_target!(
    (Cpu, Cgroup<'_>),
    (Cpu(cpu), Cgroup(file)),
    file.as_raw_fd(),
    saturate(cpu),
    Flags::PID_CGROUP
);

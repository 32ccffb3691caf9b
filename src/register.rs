//! The registration primitive.

#[cfg(test)]
mod test;

use std::borrow::Borrow;
use std::os::fd::OwnedFd;

use crate::config::{attr, Flags, Group, Opts, Target};
use crate::error::{Error, ErrorKind};
use crate::event::Event;
use crate::ffi::{bindings as b, syscall, Attr};
use crate::Result;

/// A fully lowered `perf_event_attr`, ready to be registered.
///
/// Built once from an [`Event`] and [`Opts`], then immutable. The same
/// descriptor can be registered any number of times.
///
/// # Examples
///
/// ```rust
/// use perf_event_register::config::{Opts, WakeUpOn};
/// use perf_event_register::event::hw::Hardware;
/// use perf_event_register::EventDescriptor;
///
/// let mut opts = Opts::default();
/// opts.wake_up.on = WakeUpOn::Bytes(4096);
///
/// let desc = EventDescriptor::new(Hardware::Instr, &opts).unwrap();
/// assert!(desc.is_disabled());
/// assert!(desc.is_watermark());
/// assert_eq!(desc.wakeup_watermark(), Some(4096));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDescriptor {
    attr: Attr,
}

impl EventDescriptor {
    /// Lowers `event` and `opts` into a descriptor.
    ///
    /// Fails with [`ErrorKind::Unsupported`] if an option needs a newer kernel
    /// than the enabled `linux-*` feature, without touching the kernel.
    pub fn new<E>(event: E, opts: impl Borrow<Opts>) -> Result<Self>
    where
        E: TryInto<Event, Error = Error>,
    {
        let Event(event_cfg) = event.try_into()?;
        let attr = attr::from(event_cfg, opts.borrow())?;
        Ok(Self { attr })
    }

    /// The raw `perf_event_attr`.
    pub fn as_attr(&self) -> &Attr {
        &self.attr
    }

    pub fn event_type(&self) -> u32 {
        self.attr.type_
    }

    pub fn config(&self) -> u64 {
        self.attr.config
    }

    pub fn sample_type(&self) -> u64 {
        self.attr.sample_type
    }

    pub fn read_format(&self) -> u64 {
        self.attr.read_format
    }

    /// Whether samples are triggered by frequency rather than by period.
    pub fn is_freq(&self) -> bool {
        self.attr.has(b::ATTR_FREQ)
    }

    /// Whether wake ups are triggered by a byte watermark rather than by a sample count.
    pub fn is_watermark(&self) -> bool {
        self.attr.has(b::ATTR_WATERMARK)
    }

    /// Whether the event starts disabled.
    pub fn is_disabled(&self) -> bool {
        self.attr.has(b::ATTR_DISABLED)
    }

    pub fn sample_period(&self) -> Option<u64> {
        (!self.is_freq()).then_some(self.attr.sample_period_or_freq)
    }

    pub fn sample_freq(&self) -> Option<u64> {
        self.is_freq().then_some(self.attr.sample_period_or_freq)
    }

    pub fn wakeup_events(&self) -> Option<u32> {
        (!self.is_watermark()).then_some(self.attr.wakeup_events_or_watermark)
    }

    pub fn wakeup_watermark(&self) -> Option<u32> {
        self.is_watermark().then_some(self.attr.wakeup_events_or_watermark)
    }
}

/// Registers `descriptor` with the kernel and returns the new event descriptor.
///
/// Exactly one `perf_event_open` call is made. The target is not checked
/// beforehand; whatever the kernel rejects comes back as an [`Error`]
/// holding the `errno` and its [`ErrorKind`].
///
/// # Examples
///
/// ```rust, no_run
/// use perf_event_register::config::{Cpu, Flags, Group, Opts, Proc, SampleOn};
/// use perf_event_register::event::sw::Software;
/// use perf_event_register::{register, EventDescriptor};
///
/// let mut opts = Opts::default();
/// opts.sample_on = SampleOn::Count(1_000_000);
/// opts.exclude.kernel = true;
/// opts.exclude.hv = true;
///
/// let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
/// let fd = register(&desc, (Proc::CURRENT, Cpu::ALL), Group::Leader, Flags::CLOEXEC).unwrap();
/// ```
pub fn register(
    descriptor: &EventDescriptor,
    target: impl Into<Target>,
    group: Group<'_>,
    flags: Flags,
) -> Result<OwnedFd> {
    let target = target.into();
    let flags = flags | target.flags;

    match open(&descriptor.attr, target.pid, target.cpu, group.as_raw_fd(), flags.bits()) {
        Err(e) if e.raw_os_error() == Some(libc::EINVAL) && !target.is_concrete() => {
            Err(Error::new(ErrorKind::InvalidTarget, e.into()))
        }
        result => result,
    }
}

/// Raw-integer form of [`register`].
///
/// `pid`, `cpu`, `group_fd` and `flags` are passed to the kernel verbatim.
pub fn register_raw(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<OwnedFd> {
    open(attr, pid, cpu, group_fd, flags)
}

fn open(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<OwnedFd> {
    log::debug!(
        "perf_event_open: type={} config={:#x} pid={} cpu={} group_fd={} flags={:#x}",
        attr.type_,
        attr.config,
        pid,
        cpu,
        group_fd,
        flags
    );

    syscall!(perf_event_open, attr, pid, cpu, group_fd, flags).map_err(|e| {
        let e = Error::from(e);
        log::debug!(
            "perf_event_open failed: errno={:?} kind={:?}",
            e.raw_os_error(),
            e.kind()
        );
        if e.kind() == ErrorKind::PermissionDenied {
            if let Ok(level) = crate::host::paranoid() {
                log::warn!(
                    "perf_event_open: permission denied with perf_event_paranoid={}, \
                     excluding the kernel or raising privileges may help",
                    level
                );
            }
        }
        e
    })
}

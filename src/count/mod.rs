//! Counting on top of [`register`][crate::register()].
//!
//! A [`Counter`] owns one registered event and drives it with the basic
//! descriptor ioctls. [`CounterGroup`][group::CounterGroup] schedules
//! several counters as a unit.


use std::borrow::Borrow;
use std::cell::RefCell;
use std::io;
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use crate::config::{Flags, Group, Opts, Target};
use crate::event::Event;
use crate::ffi::{bindings as b, syscall};
use crate::{register, Error, EventDescriptor, Result};

pub mod group;
mod stat;

pub use stat::*;

/// Event counter.
///
/// The event is registered with close-on-exec set, and is closed when the
/// counter is dropped.
///
/// # Examples
///
/// ```rust, no_run
/// use perf_event_register::config::{Cpu, Opts, Proc};
/// use perf_event_register::count::Counter;
/// use perf_event_register::event::sw::Software;
///
/// let mut opts = Opts::default();
/// opts.exclude.kernel = true;
/// opts.exclude.hv = true;
///
/// let counter = Counter::new(Software::TaskClock, (Proc::CURRENT, Cpu::ALL), opts).unwrap();
///
/// counter.enable().unwrap();
/// std::hint::black_box((0..1_000_000).sum::<u64>());
/// counter.disable().unwrap();
///
/// println!("{} ns on CPU", counter.stat().unwrap().count);
/// ```
pub struct Counter {
    pub(crate) target: Target,
    pub(crate) desc: EventDescriptor,
    pub(crate) perf: OwnedFd,
    // `RefCell` keeps `Counter` out of `Sync`, reads never overlap.
    pub(crate) read_buf: RefCell<Vec<u8>>,
}

impl Counter {
    /// Registers `event` on `target` as a new group leader.
    pub fn new<E>(event: E, target: impl Into<Target>, opts: impl Borrow<Opts>) -> Result<Self>
    where
        E: TryInto<Event, Error = Error>,
    {
        let target = target.into();
        let desc = EventDescriptor::new(event, opts)?;
        let perf = register(&desc, target.clone(), Group::Leader, Flags::CLOEXEC)?;
        Ok(Self::from_parts(target, desc, perf))
    }

    pub(crate) fn from_parts(target: Target, desc: EventDescriptor, perf: OwnedFd) -> Self {
        // Only one event for now, `CounterGroup::add` grows the buffer
        // if this counter becomes a group leader.
        let read_buf = vec![0; Stat::read_buf_size(1, desc.read_format())];
        Self {
            target,
            desc,
            perf,
            read_buf: RefCell::new(read_buf),
        }
    }

    /// The target this counter was registered on.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The descriptor this counter was registered with.
    pub fn descriptor(&self) -> &EventDescriptor {
        &self.desc
    }

    /// Returns the unique ID the kernel assigned to this event.
    ///
    /// Matches [`Stat::id`] and the IDs in sample records.
    pub fn id(&self) -> Result<u64> {
        let mut id = 0_u64;
        syscall!(ioctl_argp, &self.perf, b::PERF_EVENT_IOC_ID, &mut id)?;
        Ok(id)
    }

    /// Starts counting.
    pub fn enable(&self) -> Result<()> {
        syscall!(ioctl, &self.perf, b::PERF_EVENT_IOC_ENABLE)?;
        Ok(())
    }

    /// Stops counting, the count is kept.
    pub fn disable(&self) -> Result<()> {
        syscall!(ioctl, &self.perf, b::PERF_EVENT_IOC_DISABLE)?;
        Ok(())
    }

    /// Resets the count to zero.
    pub fn reset(&self) -> Result<()> {
        syscall!(ioctl, &self.perf, b::PERF_EVENT_IOC_RESET)?;
        Ok(())
    }

    /// Enables the event for `n` more overflows, after which it is disabled again.
    ///
    /// Only meaningful for sampling events. `n` must not be zero.
    pub fn refresh(&self, n: u32) -> Result<()> {
        if n == 0 {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "refresh count must not be zero",
            ))?;
        }
        syscall!(ioctl_arg, &self.perf, b::PERF_EVENT_IOC_REFRESH, n as u64)?;
        Ok(())
    }

    /// Updates the sample period (or frequency, for [`SampleOn::Freq`][crate::config::SampleOn::Freq] events).
    ///
    /// Since `linux-3.7`, the new value takes effect after the next overflow.
    pub fn set_period(&self, period: u64) -> Result<()> {
        let mut period = period;
        syscall!(ioctl_argp, &self.perf, b::PERF_EVENT_IOC_PERIOD, &mut period)?;
        Ok(())
    }

    /// Reads the counter statistics, formatted by [`StatFormat`][crate::config::StatFormat].
    pub fn stat(&self) -> Result<Stat> {
        let mut buf = self.read_buf.borrow_mut();
        let len = syscall!(read, &self.perf, buf.as_mut_slice())?;
        Stat::from_bytes(&buf[..len], self.desc.read_format())
    }
}

impl AsFd for Counter {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.perf.as_fd()
    }
}

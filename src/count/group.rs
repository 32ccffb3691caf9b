use std::borrow::Borrow;
use std::os::fd::AsFd;
use std::rc::Rc;

use super::{Counter, Stat};
use crate::config::{Flags, Group, Opts};
use crate::event::Event;
use crate::ffi::{bindings as b, syscall};
use crate::{register, Error, EventDescriptor, Result};

/// Counter group.
///
/// A group is scheduled onto the PMU as a unit: either all of its members
/// are counting or none are. Their values can therefore be compared and
/// combined, since they cover the same stretch of execution.
///
/// Only the leader may be [pinned][crate::config::Opts::pin_on_pmu] or
/// [exclusive][crate::config::Opts::only_group], and every member must use
/// the same [`timer`][crate::config::Opts::timer]. The kernel rejects
/// siblings that break these rules.
///
/// # Examples
///
/// ```rust, no_run
/// use perf_event_register::config::{Cpu, Opts, Proc};
/// use perf_event_register::count::group::CounterGroup;
/// use perf_event_register::count::Counter;
/// use perf_event_register::event::sw::Software;
///
/// let mut opts = Opts::default();
/// opts.exclude.kernel = true;
/// opts.stat_format.siblings = true;
///
/// let leader = Counter::new(Software::TaskClock, (Proc::CURRENT, Cpu::ALL), &opts).unwrap();
///
/// let mut group = CounterGroup::from(leader);
/// group.add(Software::PageFault, &opts).unwrap();
///
/// group.enable().unwrap();
/// let v = std::hint::black_box(vec![0_u8; 1 << 20]);
/// group.disable().unwrap();
///
/// let stat = group.leader().stat().unwrap();
/// println!("{} ns, {} page faults", stat.count, stat.siblings[0].count);
/// # drop(v);
/// ```
pub struct CounterGroup {
    leader: Counter,

    // `Rc` keeps the group on one thread, `Counter` is not `Sync`.
    siblings: Vec<Rc<Counter>>,
}

impl CounterGroup {
    /// Creates a group led by `leader`.
    pub fn from(leader: Counter) -> Self {
        Self {
            leader,
            siblings: vec![],
        }
    }

    pub fn leader(&self) -> &Counter {
        &self.leader
    }

    /// Returns the siblings in the order they were added.
    pub fn siblings(&self) -> &[Rc<Counter>] {
        self.siblings.as_slice()
    }

    /// Registers `event` as a member of this group.
    ///
    /// Members share the leader's [target][crate::config::Target].
    ///
    /// [`StatFormat::siblings`][crate::config::StatFormat::siblings] is
    /// ignored for members: the group is read through the leader, and each
    /// member's [`Counter::stat`] reports that member alone.
    pub fn add<E>(&mut self, event: E, opts: impl Borrow<Opts>) -> Result<Rc<Counter>>
    where
        E: TryInto<Event, Error = Error>,
    {
        let leader = &self.leader;

        // All events in a group must monitor the same task (or cgroup) and CPU:
        // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12932
        let target = leader.target.clone();
        let mut opts = opts.borrow().clone();
        opts.stat_format.siblings = false;
        let desc = EventDescriptor::new(event, &opts)?;
        let group = Group::Member(leader.perf.as_fd());
        let perf = register(&desc, target.clone(), group, Flags::CLOEXEC)?;

        let sibling = Rc::new(Counter::from_parts(target, desc, perf));
        self.siblings.push(Rc::clone(&sibling));

        let group_size = self.siblings.len() + 1;
        let len = Stat::read_buf_size(group_size, leader.desc.read_format());
        let mut buf = leader.read_buf.borrow_mut();
        if len > buf.len() {
            buf.resize(len, 0);
        }

        Ok(sibling)
    }

    /// Enables all counters in the group.
    pub fn enable(&self) -> Result<()> {
        self.ioctl_group(b::PERF_EVENT_IOC_ENABLE)
    }

    /// Disables all counters in the group.
    pub fn disable(&self) -> Result<()> {
        self.ioctl_group(b::PERF_EVENT_IOC_DISABLE)
    }

    /// Resets the counts of all counters in the group.
    pub fn reset(&self) -> Result<()> {
        self.ioctl_group(b::PERF_EVENT_IOC_RESET)
    }

    fn ioctl_group(&self, op: u64) -> Result<()> {
        syscall!(ioctl_arg, &self.leader.perf, op, b::PERF_IOC_FLAG_GROUP)?;
        Ok(())
    }
}

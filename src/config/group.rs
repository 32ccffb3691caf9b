use std::os::fd::{AsRawFd, BorrowedFd};

/// The group an event is registered into.
///
/// Events in one group are scheduled onto the PMU together and can be
/// enabled, disabled and read as a unit through the leader.
#[derive(Clone, Copy, Debug, Default)]
pub enum Group<'a> {
    /// Start a new group with this event as its leader.
    #[default]
    Leader,

    /// Join the group led by this descriptor.
    Member(BorrowedFd<'a>),
}

impl Group<'_> {
    /// The `group_fd` argument of `perf_event_open`.
    pub fn as_raw_fd(&self) -> i32 {
        match self {
            Self::Leader => -1,
            Self::Member(fd) => fd.as_raw_fd(),
        }
    }
}

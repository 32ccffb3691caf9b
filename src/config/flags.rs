use bitflags::bitflags;

use crate::ffi::bindings as b;

bitflags! {
    /// Call-time modifiers of `perf_event_open` (the `flags` argument).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u64 {
        /// Set close-on-exec on the returned descriptor.
        ///
        /// Since `linux-3.14`.
        const CLOEXEC = b::PERF_FLAG_FD_CLOEXEC;

        /// Ignore the group descriptor, except for output redirection
        /// with [`FD_OUTPUT`][Self::FD_OUTPUT].
        const NO_GROUP = b::PERF_FLAG_FD_NO_GROUP;

        /// Redirect output to the ring buffer of the group descriptor.
        ///
        /// Broken since `linux-2.6.35`, prefer `PERF_EVENT_IOC_SET_OUTPUT`.
        const FD_OUTPUT = b::PERF_FLAG_FD_OUTPUT;

        /// The `pid` argument is a cgroup directory descriptor.
        ///
        /// Set automatically for [`Cgroup`][super::Cgroup] targets.
        const PID_CGROUP = b::PERF_FLAG_PID_CGROUP;
    }
}

//! Typed event descriptors and a single-call registration primitive for the
//! `perf_event_open` system call.
//!
//! An [`EventDescriptor`] is built from an [event][event] and its
//! [options][config::Opts], then handed to [`register`] together with a
//! [target][config::Target], a [group][config::Group] and call-time
//! [flags][config::Flags]. The result is the kernel's event descriptor as an
//! [`OwnedFd`][std::os::fd::OwnedFd], or an [`Error`] classifying the `errno`.
//!
//! ## Example
//!
//! Sample the CPU clock of the current process every millisecond.
//!
//! ```rust, no_run
//! use perf_event_register::config::{Cpu, Flags, Group, Opts, Proc, SampleOn};
//! use perf_event_register::event::sw::Software;
//! use perf_event_register::{register, EventDescriptor, ErrorKind};
//!
//! let mut opts = Opts::default();
//! opts.sample_on = SampleOn::Count(1_000_000); // CPU clock counts in ns.
//! opts.exclude.kernel = true; // Required with `perf_event_paranoid` >= 2.
//! opts.exclude.hv = true;
//!
//! let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
//!
//! match register(&desc, (Proc::CURRENT, Cpu::ALL), Group::Leader, Flags::CLOEXEC) {
//!     Ok(fd) => println!("registered as {:?}", fd),
//!     Err(e) if e.kind() == ErrorKind::PermissionDenied => eprintln!("not allowed: {}", e),
//!     Err(e) => panic!("{}", e),
//! }
//! ```
//!
//! For plain counting, see [`count::Counter`].
//!
//! ## Kernel compatibility
//!
//! Any Linux kernel since 4.0 is supported.
//!
//! Use the Linux version features to make sure your binary matches the
//! target host kernel. These features are backwards compatible, e.g.
//! `linux-6.11` works with Linux 6.12 but may not work with Linux 6.10.
//! Options newer than the enabled feature fail with [`ErrorKind::Unsupported`]
//! before the kernel is called.
//!
//! The `legacy` feature matches the oldest LTS kernel still maintained,
//! `latest` enables everything.

pub mod config;
pub mod count;
mod error;
pub mod event;
pub mod ffi;
pub mod host;
mod register;

pub use error::*;
pub use register::*;

#[cfg(test)]
mod test;

use std::io;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The reason a registration (or a follow-up operation) was rejected.
///
/// `perf_event_open` reports failures via `errno` only, and the same errno
/// can mean different things depending on the request. The classification
/// here is a best-effort reading of the kernel's documented behavior,
/// [`Error::raw_os_error`] still gives access to the original value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Malformed descriptor or incompatible type/config pairing
    /// (`EINVAL`, `E2BIG`, `EOVERFLOW`).
    #[error("invalid event configuration")]
    InvalidConfig,

    /// Insufficient privilege for the event type or exclusion flags
    /// (`EACCES`, `EPERM`). Also reported when a seccomp policy blocks the syscall.
    #[error("permission denied")]
    PermissionDenied,

    /// The hardware, kernel build, or enabled `linux-*` feature
    /// lacks the requested event or option (`ENOENT`, `ENODEV`, `EOPNOTSUPP`, `ENOSYS`).
    #[error("unsupported event or option")]
    Unsupported,

    /// No such process, bad CPU index, or a target with neither a
    /// concrete process nor a concrete CPU (`ESRCH`, or `EINVAL` for such targets).
    #[error("invalid target")]
    InvalidTarget,

    /// The group descriptor is not a valid perf event (`EBADF`).
    #[error("invalid group descriptor")]
    InvalidGroup,

    /// Descriptor or counter limits reached
    /// (`EMFILE`, `ENFILE`, `ENOSPC`, `EBUSY`, `ENOMEM`).
    #[error("resource exhausted")]
    ResourceExhausted,

    /// Interrupted by a signal (`EINTR`).
    #[error("interrupted")]
    Interrupted,

    /// Anything not covered above.
    #[error("other error")]
    Other,
}

impl ErrorKind {
    pub(crate) fn from_io(e: &io::Error) -> Self {
        let Some(errno) = e.raw_os_error() else {
            return match e.kind() {
                io::ErrorKind::Unsupported => Self::Unsupported,
                io::ErrorKind::InvalidInput => Self::InvalidConfig,
                io::ErrorKind::PermissionDenied => Self::PermissionDenied,
                io::ErrorKind::NotFound => Self::Unsupported,
                io::ErrorKind::Interrupted => Self::Interrupted,
                _ => Self::Other,
            };
        };
        match errno {
            libc::EINVAL | libc::E2BIG | libc::EOVERFLOW => Self::InvalidConfig,
            libc::EACCES | libc::EPERM => Self::PermissionDenied,
            libc::ENOENT | libc::ENODEV | libc::EOPNOTSUPP | libc::ENOSYS => Self::Unsupported,
            libc::ESRCH => Self::InvalidTarget,
            libc::EBADF => Self::InvalidGroup,
            libc::EMFILE | libc::ENFILE | libc::ENOSPC | libc::EBUSY | libc::ENOMEM => {
                Self::ResourceExhausted
            }
            libc::EINTR => Self::Interrupted,
            _ => Self::Other,
        }
    }
}

/// Error returned by registration and by the counting facade.
#[derive(Debug, Error)]
#[error("{kind}: {source}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    source: io::Error,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, source: io::Error) -> Self {
        Self { kind, source }
    }

    /// Returns the classified reason.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the errno reported by the kernel, if the error came from a syscall.
    pub fn raw_os_error(&self) -> Option<i32> {
        self.source.raw_os_error()
    }

    /// Returns the underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        let kind = ErrorKind::from_io(&source);
        Self { kind, source }
    }
}

impl From<io::ErrorKind> for Error {
    fn from(kind: io::ErrorKind) -> Self {
        io::Error::from(kind).into()
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        e.source
    }
}


use std::io;

use super::{Error, ErrorKind};

fn kind_of(errno: i32) -> ErrorKind {
    Error::from(io::Error::from_raw_os_error(errno)).kind()
}

#[test]
fn test_classify_errno() {
    assert_eq!(kind_of(libc::EINVAL), ErrorKind::InvalidConfig);
    assert_eq!(kind_of(libc::E2BIG), ErrorKind::InvalidConfig);
    assert_eq!(kind_of(libc::EACCES), ErrorKind::PermissionDenied);
    assert_eq!(kind_of(libc::EPERM), ErrorKind::PermissionDenied);
    assert_eq!(kind_of(libc::ENOENT), ErrorKind::Unsupported);
    assert_eq!(kind_of(libc::ENODEV), ErrorKind::Unsupported);
    assert_eq!(kind_of(libc::EOPNOTSUPP), ErrorKind::Unsupported);
    assert_eq!(kind_of(libc::ESRCH), ErrorKind::InvalidTarget);
    assert_eq!(kind_of(libc::EBADF), ErrorKind::InvalidGroup);
    assert_eq!(kind_of(libc::EMFILE), ErrorKind::ResourceExhausted);
    assert_eq!(kind_of(libc::EBUSY), ErrorKind::ResourceExhausted);
    assert_eq!(kind_of(libc::EINTR), ErrorKind::Interrupted);
    assert_eq!(kind_of(libc::EXDEV), ErrorKind::Other);
}

#[test]
fn test_keep_errno() {
    let e = Error::from(io::Error::from_raw_os_error(libc::ESRCH));
    assert_eq!(e.raw_os_error(), Some(libc::ESRCH));
    let e = io::Error::from(e);
    assert_eq!(e.raw_os_error(), Some(libc::ESRCH));
}

#[test]
fn test_from_unsupported_kind() {
    let e = Error::from(io::ErrorKind::Unsupported);
    assert_eq!(e.kind(), ErrorKind::Unsupported);
    assert_eq!(e.raw_os_error(), None);
}

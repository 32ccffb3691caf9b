use std::io::{Error, Result};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use super::Attr;

pub fn perf_event_open(attr: &Attr, pid: i32, cpu: i32, group_fd: i32, flags: u64) -> Result<OwnedFd> {
    let num = libc::SYS_perf_event_open;
    let fd = unsafe { libc::syscall(num, attr as *const Attr, pid, cpu, group_fd, flags as libc::c_ulong) };
    if fd != -1 {
        Ok(unsafe { OwnedFd::from_raw_fd(fd as _) })
    } else {
        // Must be captured before anything else can touch `errno`.
        Err(Error::last_os_error())
    }
}

pub fn ioctl(fd: &impl AsRawFd, op: u64) -> Result<i32> {
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), op as _) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn ioctl_arg(fd: &impl AsRawFd, op: u64, arg: u64) -> Result<i32> {
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), op as _, arg as libc::c_ulong) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn ioctl_argp<T>(fd: &impl AsRawFd, op: u64, argp: &mut T) -> Result<i32> {
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), op as _, argp as *mut T) };
    if result != -1 {
        Ok(result)
    } else {
        Err(Error::last_os_error())
    }
}

pub fn read(fd: &impl AsRawFd, buf: &mut [u8]) -> Result<usize> {
    let count = buf.len();
    let buf = buf.as_mut_ptr() as _;
    let bytes = unsafe { libc::read(fd.as_raw_fd(), buf, count) };
    if bytes != -1 {
        Ok(bytes as _)
    } else {
        Err(Error::last_os_error())
    }
}

use std::fs::File;

use super::{Cgroup, Cpu, Flags, Group, Proc, SampleSkid, StatFormat, Target};
use crate::ffi::bindings as b;

#[test]
fn test_target_from_tuples() {
    let target: Target = (Proc(42), Cpu(3)).into();
    assert_eq!((target.pid(), target.cpu()), (42, 3));
    assert_eq!(target, (Cpu(3), Proc(42)).into());

    let target: Target = (Proc::CURRENT, Cpu::ALL).into();
    assert_eq!((target.pid(), target.cpu()), (0, -1));
    assert_eq!(target, (Cpu::ALL, Proc::CURRENT).into());

    let target: Target = (Proc::ALL, Cpu(1)).into();
    assert_eq!((target.pid(), target.cpu()), (-1, 1));
    assert_eq!(target.flags(), Flags::empty());
    assert!(target.is_concrete());
}

#[test]
fn test_target_cgroup() {
    let dir = File::open("/").unwrap();
    let target: Target = (Cgroup(&dir), Cpu(0)).into();
    assert!(target.flags().contains(Flags::PID_CGROUP));
    assert!(target.pid() >= 0);
    assert_eq!(target.cpu(), 0);
}

#[test]
fn test_target_raw() {
    assert!(!Target::raw(-1, -1).is_concrete());
    assert!(!Target::raw(-2, 0).is_concrete());
    assert!(!Target::raw(0, -7).is_concrete());
    assert!(Target::raw(0, -1).is_concrete());
    assert!(Target::raw(-1, 0).is_concrete());
    assert_eq!(Target::raw(-1, -1).flags(), Flags::empty());
}

#[test]
fn test_target_out_of_range_ids_saturate() {
    let target: Target = (Proc(u32::MAX), Cpu(0)).into();
    assert_eq!((target.pid(), target.cpu()), (i32::MAX, 0));
    assert!(target.is_concrete());

    let target: Target = (Proc(1), Cpu(u32::MAX)).into();
    assert_eq!((target.pid(), target.cpu()), (1, i32::MAX));

    let target: Target = (Cpu(u32::MAX), Proc::ALL).into();
    assert_eq!((target.pid(), target.cpu()), (-1, i32::MAX));
    assert!(target.is_concrete());

    let target: Target = (Proc(1 << 31), Cpu::ALL).into();
    assert_eq!((target.pid(), target.cpu()), (i32::MAX, -1));
    assert!(target.is_concrete());
}

#[test]
fn test_group_fd() {
    assert_eq!(Group::Leader.as_raw_fd(), -1);
    assert_eq!(Group::default().as_raw_fd(), -1);

    let file = File::open("/").unwrap();
    let fd = std::os::fd::AsFd::as_fd(&file);
    let raw = std::os::fd::AsRawFd::as_raw_fd(&file);
    assert_eq!(Group::Member(fd).as_raw_fd(), raw);
}

#[test]
fn test_flags() {
    assert_eq!(Flags::CLOEXEC.bits(), b::PERF_FLAG_FD_CLOEXEC);
    assert_eq!(Flags::NO_GROUP.bits(), 1);
    assert_eq!(Flags::FD_OUTPUT.bits(), 2);
    assert_eq!(Flags::PID_CGROUP.bits(), 4);
    assert_eq!((Flags::CLOEXEC | Flags::PID_CGROUP).bits(), 0b1100);
}

#[test]
fn test_stat_format_bits() {
    let format = StatFormat {
        time_enabled: true,
        time_running: true,
        ..Default::default()
    };
    assert_eq!(
        format.as_read_format().unwrap(),
        b::PERF_FORMAT_TOTAL_TIME_ENABLED | b::PERF_FORMAT_TOTAL_TIME_RUNNING
    );
    assert_eq!(StatFormat::default().as_read_format().unwrap(), 0);
}

#[test]
fn test_sample_skid_levels() {
    assert_eq!(SampleSkid::default(), SampleSkid::Arbitrary);
    assert_eq!(SampleSkid::Zero.as_precise_ip(), 3);
}

use std::fs::File;
use std::io::Read;
use std::os::fd::{AsFd, AsRawFd};

use perf_event_register::config::{Cpu, Flags, Group, Opts, Proc, SampleOn, Target};
use perf_event_register::count::group::CounterGroup;
use perf_event_register::count::Counter;
use perf_event_register::event::sw::Software;
use perf_event_register::ffi::bindings;
use perf_event_register::{register, register_raw, ErrorKind, EventDescriptor};

// Unprivileged callers must exclude the kernel with `perf_event_paranoid` at 2.
fn user_opts() -> Opts {
    let mut opts = Opts::default();
    opts.exclude.kernel = true;
    opts.exclude.hv = true;
    opts
}

// Containers and CI sandboxes often block the syscall (seccomp, paranoid 3+).
fn perf_available() -> bool {
    let desc = EventDescriptor::new(Software::Dummy, user_opts()).unwrap();
    match register(&desc, (Proc::CURRENT, Cpu::ALL), Group::Leader, Flags::CLOEXEC) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("perf_event_open is not available, skipping: {}", e);
            false
        }
    }
}

macro_rules! require_perf {
    () => {
        if !perf_available() {
            return;
        }
    };
}

#[test]
fn test_cpu_clock_on_current_process() {
    require_perf!();

    let mut opts = user_opts();
    opts.sample_on = SampleOn::Count(1_000_000);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();

    let fd = register(&desc, (Proc::CURRENT, Cpu::ALL), Group::Leader, Flags::empty()).unwrap();
    assert!(fd.as_raw_fd() >= 0);

    let fd = register_raw(desc.as_attr(), 0, -1, -1, 0).unwrap();
    assert!(fd.as_raw_fd() >= 0);
}

#[test]
fn test_both_wildcards_rejected() {
    let desc = EventDescriptor::new(Software::CpuClock, user_opts()).unwrap();

    let err = register(&desc, Target::raw(-1, -1), Group::Leader, Flags::CLOEXEC).unwrap_err();
    let raw_err = register_raw(desc.as_attr(), -1, -1, -1, 0).unwrap_err();

    if perf_available() {
        assert_eq!(err.kind(), ErrorKind::InvalidTarget);
        assert_eq!(err.raw_os_error(), Some(libc::EINVAL));
        assert_eq!(raw_err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(raw_err.raw_os_error(), Some(libc::EINVAL));
    }
}

#[test]
fn test_failure_is_repeatable() {
    let desc = EventDescriptor::new(Software::CpuClock, user_opts()).unwrap();

    let kinds: Vec<_> = (0..4)
        .map(|_| {
            let result = register(&desc, Target::raw(-1, -1), Group::Leader, Flags::CLOEXEC);
            result.unwrap_err().kind()
        })
        .collect();
    assert!(kinds.windows(2).all(|it| it[0] == it[1]));
}

#[test]
fn test_distinct_descriptors() {
    require_perf!();

    let target = (Proc::CURRENT, Cpu::ALL);
    let a = Counter::new(Software::TaskClock, target, user_opts()).unwrap();
    let b = Counter::new(Software::TaskClock, target, user_opts()).unwrap();
    assert_ne!(a.as_fd().as_raw_fd(), b.as_fd().as_raw_fd());
    assert_ne!(a.id().unwrap(), b.id().unwrap());

    a.enable().unwrap();
    std::hint::black_box((0..1_000_000_u64).fold(0, |acc, it| acc ^ it.wrapping_mul(31)));
    a.disable().unwrap();

    assert!(a.stat().unwrap().count > 0);
    assert_eq!(b.stat().unwrap().count, 0);

    a.reset().unwrap();
    assert_eq!(a.stat().unwrap().count, 0);
}

#[test]
fn test_group_member_reads_with_leader() {
    require_perf!();

    let mut leader_opts = user_opts();
    leader_opts.stat_format.siblings = true;
    let leader_desc = EventDescriptor::new(Software::TaskClock, &leader_opts).unwrap();
    let member_desc = EventDescriptor::new(Software::PageFault, user_opts()).unwrap();

    let target = (Proc::CURRENT, Cpu::ALL);
    let leader = register(&leader_desc, target, Group::Leader, Flags::CLOEXEC).unwrap();
    let member = register(
        &member_desc,
        target,
        Group::Member(leader.as_fd()),
        Flags::CLOEXEC,
    )
    .unwrap();
    assert_ne!(leader.as_raw_fd(), member.as_raw_fd());

    // PERF_FORMAT_GROUP: { nr, value[nr] }
    let mut buf = [0; 3 * 8];
    let len = File::from(leader).read(&mut buf).unwrap();
    assert_eq!(len, buf.len());
    let nr = u64::from_ne_bytes(buf[..8].try_into().unwrap());
    assert_eq!(nr, 2);
}

#[test]
fn test_counter_group() {
    require_perf!();

    let mut opts = user_opts();
    opts.stat_format.siblings = true;
    opts.stat_format.id = true;

    let leader = Counter::new(Software::TaskClock, (Proc::CURRENT, Cpu::ALL), &opts).unwrap();
    let mut group = CounterGroup::from(leader);
    let first = group.add(Software::PageFault, &opts).unwrap();
    let second = group.add(Software::CtxSwitch, &opts).unwrap();
    assert_eq!(group.siblings().len(), 2);

    group.enable().unwrap();
    std::hint::black_box(vec![1_u8; 1 << 20]);
    group.disable().unwrap();

    let stat = group.leader().stat().unwrap();
    assert_eq!(stat.id, Some(group.leader().id().unwrap()));
    assert_eq!(stat.siblings.len(), 2);
    assert_eq!(stat.siblings[0].id, Some(first.id().unwrap()));
    assert_eq!(stat.siblings[1].id, Some(second.id().unwrap()));
    assert!(stat.count > 0);

    group.reset().unwrap();
    assert_eq!(group.leader().stat().unwrap().count, 0);
}

#[test]
fn test_counter_group_sibling_stat() {
    require_perf!();

    let mut opts = user_opts();
    opts.stat_format.siblings = true;
    opts.stat_format.id = true;

    let leader = Counter::new(Software::TaskClock, (Proc::CURRENT, Cpu::ALL), &opts).unwrap();
    let mut group = CounterGroup::from(leader);
    let first = group.add(Software::PageFault, &opts).unwrap();
    let second = group.add(Software::CtxSwitch, &opts).unwrap();
    assert_eq!(first.descriptor().read_format() & bindings::PERF_FORMAT_GROUP, 0);

    group.enable().unwrap();
    std::hint::black_box(vec![1_u8; 1 << 20]);
    group.disable().unwrap();

    for sibling in [&first, &second] {
        let stat = sibling.stat().unwrap();
        assert!(stat.siblings.is_empty());
        assert_eq!(stat.id, Some(sibling.id().unwrap()));
    }
    assert_eq!(group.leader().stat().unwrap().siblings.len(), 2);
}

#[test]
fn test_invalid_group() {
    require_perf!();

    let desc = EventDescriptor::new(Software::TaskClock, user_opts()).unwrap();
    let not_perf = File::open("/").unwrap();

    let err = register(
        &desc,
        (Proc::CURRENT, Cpu::ALL),
        Group::Member(not_perf.as_fd()),
        Flags::CLOEXEC,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidGroup);
}

#[test]
fn test_no_such_process() {
    require_perf!();

    let desc = EventDescriptor::new(Software::TaskClock, user_opts()).unwrap();
    // Above the default `pid_max`.
    let err = register(&desc, (Proc(i32::MAX as _), Cpu::ALL), Group::Leader, Flags::CLOEXEC).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTarget);
}

#[test]
fn test_counter_refresh_zero() {
    require_perf!();

    let counter = Counter::new(Software::TaskClock, (Proc::CURRENT, Cpu::ALL), user_opts()).unwrap();
    let err = counter.refresh(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert_eq!(err.raw_os_error(), None);
}

use super::EventDescriptor;
use crate::config::{Opts, SampleOn, SampleSkid, StatFormat, WakeUpOn};
use crate::event::hw::Hardware;
use crate::event::sw::Software;
use crate::ffi::bindings as b;

#[test]
fn test_default_opts() {
    let desc = EventDescriptor::new(Software::TaskClock, Opts::default()).unwrap();
    let attr = desc.as_attr();

    assert_eq!(attr.size, b::PERF_ATTR_SIZE_VER8);
    assert_eq!(desc.event_type(), b::PERF_TYPE_SOFTWARE);
    assert_eq!(desc.config(), b::PERF_COUNT_SW_TASK_CLOCK);
    assert!(desc.is_disabled());
    assert!(desc.is_freq());
    assert_eq!(desc.sample_freq(), Some(0));
    assert!(!desc.is_watermark());
    assert_eq!(desc.wakeup_events(), Some(0));
    assert_eq!(desc.sample_type(), 0);
    assert_eq!(desc.read_format(), 0);
    assert!(!attr.has(b::ATTR_EXCLUDE_USER));
    assert!(!attr.has(b::ATTR_EXCLUDE_KERNEL));
    assert!(!attr.has(b::ATTR_EXCLUDE_HV));
}

#[test]
fn test_sample_on() {
    let mut opts = Opts::default();

    opts.sample_on = SampleOn::Count(1_000_000);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert!(!desc.is_freq());
    assert_eq!(desc.sample_period(), Some(1_000_000));
    assert_eq!(desc.sample_freq(), None);

    opts.sample_on = SampleOn::Freq(4000);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert!(desc.is_freq());
    assert_eq!(desc.sample_freq(), Some(4000));
    assert_eq!(desc.sample_period(), None);
}

#[test]
fn test_wake_up_on() {
    let mut opts = Opts::default();

    opts.wake_up.on = WakeUpOn::Samples(16);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert!(!desc.is_watermark());
    assert_eq!(desc.wakeup_events(), Some(16));
    assert_eq!(desc.wakeup_watermark(), None);

    opts.wake_up.on = WakeUpOn::Bytes(8192);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert!(desc.is_watermark());
    assert_eq!(desc.wakeup_watermark(), Some(8192));
    assert_eq!(desc.wakeup_events(), None);
}

#[test]
fn test_wake_up_on_full_range() {
    let mut opts = Opts::default();

    opts.wake_up.on = WakeUpOn::Bytes(u32::MAX);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert_eq!(desc.wakeup_watermark(), Some(u32::MAX));

    opts.wake_up.on = WakeUpOn::Samples(u32::MAX);
    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert_eq!(desc.wakeup_events(), Some(u32::MAX));
}

#[test]
fn test_enable_and_exclude() {
    let mut opts = Opts::default();
    opts.enable = true;
    opts.exclude.kernel = true;
    opts.exclude.hv = true;
    opts.pin_on_pmu = true;

    let desc = EventDescriptor::new(Hardware::CpuCycle, &opts).unwrap();
    let attr = desc.as_attr();
    assert!(!desc.is_disabled());
    assert!(attr.has(b::ATTR_EXCLUDE_KERNEL));
    assert!(attr.has(b::ATTR_EXCLUDE_HV));
    assert!(!attr.has(b::ATTR_EXCLUDE_USER));
    assert!(attr.has(b::ATTR_PINNED));
    assert!(!attr.has(b::ATTR_EXCLUSIVE));
}

#[test]
fn test_stat_format() {
    let mut opts = Opts::default();
    opts.stat_format = StatFormat {
        id: true,
        time_enabled: true,
        time_running: true,
        lost_records: false,
        siblings: true,
    };

    let desc = EventDescriptor::new(Hardware::Instr, &opts).unwrap();
    assert_eq!(
        desc.read_format(),
        b::PERF_FORMAT_ID
            | b::PERF_FORMAT_TOTAL_TIME_ENABLED
            | b::PERF_FORMAT_TOTAL_TIME_RUNNING
            | b::PERF_FORMAT_GROUP
    );
}

#[cfg(feature = "linux-6.0")]
#[test]
fn test_stat_format_lost_records() {
    let mut opts = Opts::default();
    opts.stat_format.lost_records = true;

    let desc = EventDescriptor::new(Hardware::Instr, &opts).unwrap();
    assert_eq!(desc.read_format(), b::PERF_FORMAT_LOST);
}

#[cfg(not(feature = "linux-6.0"))]
#[test]
fn test_stat_format_lost_records_unsupported() {
    let mut opts = Opts::default();
    opts.stat_format.lost_records = true;

    let err = EventDescriptor::new(Hardware::Instr, &opts).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Unsupported);
}

#[test]
fn test_sample_format() {
    let mut opts = Opts::default();
    opts.sample_format.code_addr = true;
    opts.sample_format.period = true;
    opts.sample_format.call_chain = Some(Default::default());
    opts.record_id_format.task = true;
    opts.record_id_format.time = true;

    let desc = EventDescriptor::new(Software::CpuClock, &opts).unwrap();
    assert_eq!(
        desc.sample_type(),
        b::PERF_SAMPLE_IP
            | b::PERF_SAMPLE_PERIOD
            | b::PERF_SAMPLE_CALLCHAIN
            | b::PERF_SAMPLE_TID
            | b::PERF_SAMPLE_TIME
    );
}

#[test]
fn test_sample_skid() {
    let mut opts = Opts::default();
    for (skid, level) in [
        (SampleSkid::Arbitrary, 0),
        (SampleSkid::Const, 1),
        (SampleSkid::ReqZero, 2),
        (SampleSkid::Zero, 3),
    ] {
        opts.sample_skid = skid;
        let desc = EventDescriptor::new(Hardware::Instr, &opts).unwrap();
        assert_eq!(desc.as_attr().precise_ip(), level);
        assert!(desc.is_disabled());
    }
}

#[test]
fn test_mmap_ext_implies_mmap() {
    let mut opts = Opts::default();
    opts.extra_record.mmap.ext = Some(Default::default());

    let desc = EventDescriptor::new(Software::Dummy, &opts).unwrap();
    let attr = desc.as_attr();
    assert!(attr.has(b::ATTR_MMAP));
    assert!(attr.has(b::ATTR_MMAP2));
    assert!(!attr.has(b::ATTR_MMAP_DATA));
}

#[cfg(feature = "linux-4.1")]
#[test]
fn test_timer() {
    let mut opts = Opts::default();
    opts.timer = Some(crate::config::Clock::Monotonic);

    let desc = EventDescriptor::new(Software::Dummy, &opts).unwrap();
    let attr = desc.as_attr();
    assert!(attr.has(b::ATTR_USE_CLOCKID));
    assert_eq!(attr.clockid, libc::CLOCK_MONOTONIC);
}

#[test]
fn test_cache_event_type() {
    use crate::event::hw::{Op, OpResult, Type};

    let event = Hardware::Cache(Type::L1d, Op::Read, OpResult::Miss);
    let desc = EventDescriptor::new(event, Opts::default()).unwrap();
    assert_eq!(desc.event_type(), b::PERF_TYPE_HW_CACHE);
    assert_eq!(desc.config(), 0x10000);
}

#[cfg(not(feature = "linux-6.3"))]
#[test]
fn test_config3_unsupported() {
    use crate::event::raw::Raw;

    let event = Raw {
        config: 0x3c,
        config3: 1,
        ..Default::default()
    };
    let err = EventDescriptor::new(event, Opts::default()).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Unsupported);
    assert_eq!(err.raw_os_error(), None);
}

#[test]
fn test_descriptor_is_send_sync() {
    fn check<T: Send + Sync>() {}
    check::<EventDescriptor>();
}

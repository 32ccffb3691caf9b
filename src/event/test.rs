use super::bp::{Breakpoint, Len, Type as BpType};
use super::dp::{pmu_type, DynamicPmu};
use super::hw::{Hardware, Op, OpResult, Type};
use super::raw::Raw;
use super::sw::Software;
use super::tp::Tracepoint;
use super::Event;
use crate::ffi::bindings as b;

#[test]
fn test_hardware() {
    let ev = Event::try_from(Hardware::Instr).unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_HARDWARE);
    assert_eq!(ev.config(), b::PERF_COUNT_HW_INSTRUCTIONS);

    let ev = Event::try_from(Hardware::RefCpuCycle).unwrap();
    assert_eq!(ev.config(), b::PERF_COUNT_HW_REF_CPU_CYCLES);
}

#[test]
fn test_hardware_cache() {
    let ev = Event::try_from(Hardware::Cache(Type::L1d, Op::Read, OpResult::Miss)).unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_HW_CACHE);
    assert_eq!(ev.config(), 0x10000);

    let ev = Event::try_from(Hardware::Cache(Type::Dtlb, Op::Prefetch, OpResult::Access)).unwrap();
    assert_eq!(ev.config(), 0x0203);
}

#[test]
fn test_software() {
    let ev = Event::try_from(Software::CpuClock).unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_SOFTWARE);
    assert_eq!(ev.config(), b::PERF_COUNT_SW_CPU_CLOCK);

    let ev = Event::try_from(&Software::MajorPageFault).unwrap();
    assert_eq!(ev.config(), b::PERF_COUNT_SW_PAGE_FAULTS_MAJ);
}

#[cfg(not(feature = "linux-5.13"))]
#[test]
fn test_software_cgroup_switch_unsupported() {
    let e = Event::try_from(Software::CgroupSwitch).unwrap_err();
    assert_eq!(e.kind(), crate::ErrorKind::Unsupported);
}

#[test]
fn test_tracepoint() {
    let ev = Event::try_from(Tracepoint { id: 42 }).unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_TRACEPOINT);
    assert_eq!(ev.config(), 42);
}

#[test]
fn test_breakpoint() {
    let ev = Event::try_from(Breakpoint {
        ty: BpType::Rw(Len::_4),
        addr: 0x1000,
    })
    .unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_BREAKPOINT);
    assert_eq!(ev.0.bp_type, b::HW_BREAKPOINT_RW);
    assert_eq!(ev.0.config1, 0x1000);
    assert_eq!(ev.0.config2, 4);

    let ev = Event::try_from(Breakpoint {
        ty: BpType::X,
        addr: 0,
    })
    .unwrap();
    assert_eq!(ev.0.bp_type, b::HW_BREAKPOINT_X);
    assert_eq!(ev.0.config2, size_of::<libc::c_long>() as u64);
}

#[test]
fn test_raw() {
    let raw = Raw {
        config: 0x04_20,
        config1: 1,
        config2: 2,
        config3: 3,
    };
    let ev = Event::try_from(raw).unwrap();
    assert_eq!(ev.ty(), b::PERF_TYPE_RAW);
    assert_eq!(ev.0.config, 0x04_20);
    assert_eq!(ev.0.config3, 3);
}

#[test]
fn test_dynamic_pmu() {
    let ev = Event::try_from(DynamicPmu {
        ty: 11,
        config: 7,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(ev.ty(), 11);
    assert_eq!(ev.config(), 7);
}

#[test]
fn test_pmu_type_parse() {
    let path = std::env::temp_dir().join(format!("pmu-type-{}", std::process::id()));
    std::fs::write(&path, "9\n").unwrap();
    assert_eq!(pmu_type(&path).unwrap(), 9);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_dynamic_pmu_missing() {
    let e = DynamicPmu::by_name("no-such-pmu", 0).unwrap_err();
    assert_eq!(e.kind(), crate::ErrorKind::Unsupported);
}

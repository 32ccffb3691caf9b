use super::*;

#[test]
fn test_sysctl_missing() {
    let err = sysctl::<i32>("perf_event_no_such_knob").unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Unsupported);
}

#[test]
fn test_paranoid_in_range() {
    // Missing on kernels without perf events support.
    if let Ok(level) = paranoid() {
        assert!(level >= -1);
    }
}

#[test]
fn test_max_sample_rate() {
    if let Ok(rate) = max_sample_rate() {
        assert!(rate > 0);
    }
}

use super::{Inherit, OnExecve, Opts, Repr, SampleOn, SigData, UseBuildId, WakeUpOn};
use crate::event::EventConfig;
use crate::ffi::{bindings as b, Attr};
use crate::Result;

pub(crate) fn from(event_cfg: EventConfig, opts: &Opts) -> Result<Attr> {
    let mut attr = Attr {
        size: size_of::<Attr>() as _,
        ..Default::default()
    };

    // event:

    attr.type_ = event_cfg.ty;
    attr.config = event_cfg.config;
    attr.config1 = event_cfg.config1;
    attr.config2 = event_cfg.config2;
    #[cfg(feature = "linux-6.3")]
    (attr.config3 = event_cfg.config3);
    #[cfg(not(feature = "linux-6.3"))]
    crate::config::unsupported!(event_cfg.config3 > 0);
    attr.bp_type = event_cfg.bp_type;

    // counting:

    let exclude = &opts.exclude;
    attr.set(b::ATTR_EXCLUDE_USER, exclude.user);
    attr.set(b::ATTR_EXCLUDE_KERNEL, exclude.kernel);
    attr.set(b::ATTR_EXCLUDE_HV, exclude.hv);
    attr.set(b::ATTR_EXCLUDE_HOST, exclude.host);
    attr.set(b::ATTR_EXCLUDE_GUEST, exclude.guest);
    attr.set(b::ATTR_EXCLUDE_IDLE, exclude.idle);

    attr.set(b::ATTR_EXCLUSIVE, opts.only_group);
    attr.set(b::ATTR_PINNED, opts.pin_on_pmu);

    match opts.inherit {
        Some(Inherit::NewChild) => attr.set(b::ATTR_INHERIT, true),
        #[cfg(feature = "linux-5.13")]
        Some(Inherit::NewThread) => {
            attr.set(b::ATTR_INHERIT, true);
            attr.set(b::ATTR_INHERIT_THREAD, true);
        }
        #[cfg(not(feature = "linux-5.13"))]
        Some(Inherit::NewThread) => crate::config::unsupported!(),
        None => (),
    }

    match opts.on_execve {
        Some(OnExecve::Enable) => attr.set(b::ATTR_ENABLE_ON_EXEC, true),
        #[cfg(feature = "linux-5.13")]
        Some(OnExecve::Remove) => attr.set(b::ATTR_REMOVE_ON_EXEC, true),
        #[cfg(not(feature = "linux-5.13"))]
        Some(OnExecve::Remove) => crate::config::unsupported!(),
        None => (),
    }

    attr.read_format = opts.stat_format.as_read_format()?;
    attr.set(b::ATTR_DISABLED, !opts.enable);

    // sampling:

    match opts.sample_on {
        SampleOn::Freq(val) => {
            attr.set(b::ATTR_FREQ, true);
            attr.sample_period_or_freq = val;
        }
        SampleOn::Count(val) => attr.sample_period_or_freq = val,
    }

    attr.set_precise_ip(opts.sample_skid.as_precise_ip());

    let format = &opts.sample_format;
    let mut sample_type = 0;
    macro_rules! when {
        ($($feature:literal,)? $bool:ident, $flag:ident) => {
            if format.$bool {
                $(#[cfg(feature = $feature)])?
                (sample_type |= b::$flag);
                $(
                #[cfg(not(feature = $feature))]
                crate::config::unsupported!();
                )?
            }
        };
    }
    when!(stat, PERF_SAMPLE_READ);
    when!(period, PERF_SAMPLE_PERIOD);
    when!("linux-5.7", cgroup, PERF_SAMPLE_CGROUP);
    when!(data_addr, PERF_SAMPLE_ADDR);
    when!("linux-4.14", data_phys_addr, PERF_SAMPLE_PHYS_ADDR);
    when!("linux-5.11", data_page_size, PERF_SAMPLE_DATA_PAGE_SIZE);
    when!(data_source, PERF_SAMPLE_DATA_SRC);
    when!(code_addr, PERF_SAMPLE_IP);
    when!("linux-5.11", code_page_size, PERF_SAMPLE_CODE_PAGE_SIZE);
    when!(raw, PERF_SAMPLE_RAW);
    when!(txn, PERF_SAMPLE_TRANSACTION);

    if let Some(size) = &format.user_stack {
        attr.sample_stack_user = size.0;
        sample_type |= b::PERF_SAMPLE_STACK_USER;
    }
    if let Some(chain) = &format.call_chain {
        attr.set(b::ATTR_EXCLUDE_CALLCHAIN_USER, chain.exclude_user);
        attr.set(b::ATTR_EXCLUDE_CALLCHAIN_KERNEL, chain.exclude_kernel);
        #[cfg(feature = "linux-4.8")]
        (attr.sample_max_stack = chain.max_stack_frames);
        #[cfg(not(feature = "linux-4.8"))]
        crate::config::unsupported!(chain.max_stack_frames > 0);
        sample_type |= b::PERF_SAMPLE_CALLCHAIN;
    }
    if let Some(mask) = &format.user_regs {
        attr.sample_regs_user = mask.0;
        sample_type |= b::PERF_SAMPLE_REGS_USER;
    }
    if let Some(mask) = &format.intr_regs {
        attr.sample_regs_intr = mask.0;
        sample_type |= b::PERF_SAMPLE_REGS_INTR;
    }
    match format.weight {
        Some(Repr::Full) => sample_type |= b::PERF_SAMPLE_WEIGHT,
        #[cfg(feature = "linux-5.12")]
        Some(Repr::Vars) => sample_type |= b::PERF_SAMPLE_WEIGHT_STRUCT,
        #[cfg(not(feature = "linux-5.12"))]
        Some(Repr::Vars) => crate::config::unsupported!(),
        None => (),
    }

    let ids = &opts.record_id_format;
    macro_rules! when {
        ($bool:ident, $flag:ident) => {
            if ids.$bool {
                sample_type |= b::$flag;
            }
        };
    }
    when!(id, PERF_SAMPLE_ID);
    when!(stream_id, PERF_SAMPLE_STREAM_ID);
    when!(cpu, PERF_SAMPLE_CPU);
    when!(task, PERF_SAMPLE_TID);
    when!(time, PERF_SAMPLE_TIME);
    attr.sample_type = sample_type;

    // extra records:

    let extra = &opts.extra_record;
    macro_rules! when {
        ($($feature:literal,)? $bool:ident, $bit:ident) => {
            if extra.$bool {
                $(#[cfg(feature = $feature)])?
                attr.set(b::$bit, true);
                $(
                #[cfg(not(feature = $feature))]
                crate::config::unsupported!();
                )?
            }
        };
    }
    when!(task, ATTR_TASK);
    when!(read, ATTR_INHERIT_STAT);
    when!(comm, ATTR_COMM);
    when!("linux-5.7", cgroup, ATTR_CGROUP);
    when!("linux-5.1", ksymbol, ATTR_KSYMBOL);
    when!("linux-5.1", bpf_event, ATTR_BPF_EVENT);
    when!("linux-5.9", text_poke, ATTR_TEXT_POKE);
    when!("linux-4.3", ctx_switch, ATTR_CONTEXT_SWITCH);
    when!("linux-4.12", namespaces, ATTR_NAMESPACES);

    let mmap = &extra.mmap;
    attr.set(b::ATTR_MMAP, mmap.code);
    attr.set(b::ATTR_MMAP_DATA, mmap.data);
    if let Some(UseBuildId(build_id)) = &mmap.ext {
        attr.set(b::ATTR_MMAP, true);
        attr.set(b::ATTR_MMAP2, true);
        #[cfg(feature = "linux-5.12")]
        attr.set(b::ATTR_BUILD_ID, *build_id);
        #[cfg(not(feature = "linux-5.12"))]
        crate::config::unsupported!(*build_id);
    }

    attr.set(b::ATTR_SAMPLE_ID_ALL, opts.record_id_all);

    // wake up:

    match opts.wake_up.on {
        WakeUpOn::Bytes(n) => {
            attr.set(b::ATTR_WATERMARK, true);
            attr.wakeup_events_or_watermark = n;
        }
        WakeUpOn::Samples(n) => attr.wakeup_events_or_watermark = n,
    }

    #[cfg(feature = "linux-4.1")]
    (attr.aux_watermark = opts.wake_up.on_aux_bytes);
    #[cfg(not(feature = "linux-4.1"))]
    crate::config::unsupported!(opts.wake_up.on_aux_bytes > 0);

    #[cfg(feature = "linux-5.13")]
    if let Some(SigData(data)) = &opts.sigtrap_on_sample {
        attr.set(b::ATTR_SIGTRAP, true);
        attr.sig_data = *data;
    }
    #[cfg(not(feature = "linux-5.13"))]
    if let Some(SigData(_)) = &opts.sigtrap_on_sample {
        crate::config::unsupported!();
    }

    if let Some(clock) = &opts.timer {
        #[cfg(feature = "linux-4.1")]
        {
            attr.set(b::ATTR_USE_CLOCKID, true);
            attr.clockid = clock.as_clockid();
        }
        #[cfg(not(feature = "linux-4.1"))]
        {
            let _ = clock;
            crate::config::unsupported!();
        }
    }

    Ok(attr)
}

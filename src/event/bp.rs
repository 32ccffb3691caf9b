use super::EventConfig;
use crate::ffi::bindings as b;

/// Hardware breakpoint event.
///
/// Counts (or samples) every access of the given type to `addr`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakpoint {
    pub ty: Type,
    pub addr: u64,
}

/// Access type to trap on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Data read.
    R(Len),
    /// Data write.
    W(Len),
    /// Data read or write.
    Rw(Len),
    /// Instruction execution.
    ///
    /// The length is always `sizeof(long)` as the kernel requires.
    X,
}

/// Watched length in bytes.
///
/// Most architectures only accept aligned lengths of 1, 2, 4 and 8.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Len {
    _1,
    _2,
    _3,
    _4,
    _5,
    _6,
    _7,
    _8,
}

impl Len {
    fn as_bp_len(&self) -> u64 {
        match self {
            Self::_1 => 1,
            Self::_2 => 2,
            Self::_3 => 3,
            Self::_4 => 4,
            Self::_5 => 5,
            Self::_6 => 6,
            Self::_7 => 7,
            Self::_8 => 8,
        }
    }
}

super::try_from!(Breakpoint, value, {
    // https://github.com/torvalds/linux/blob/v6.13/kernel/events/hw_breakpoint.c#L849
    let (bp_type, bp_len) = match &value.ty {
        Type::R(len) => (b::HW_BREAKPOINT_R, len.as_bp_len()),
        Type::W(len) => (b::HW_BREAKPOINT_W, len.as_bp_len()),
        Type::Rw(len) => (b::HW_BREAKPOINT_RW, len.as_bp_len()),
        Type::X => (b::HW_BREAKPOINT_X, size_of::<libc::c_long>() as u64),
    };

    let event_config = EventConfig {
        ty: b::PERF_TYPE_BREAKPOINT,
        config: 0,
        config1: value.addr,
        config2: bp_len,
        config3: 0,
        bp_type,
    };
    Ok(Self(event_config))
});

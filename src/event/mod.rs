//! Event classes understood by `perf_event_open`.
//!
//! Every event type here converts into an [`Event`], which carries the
//! `type`/`config*`/`bp_type` part of the descriptor. The remaining fields
//! come from [`Opts`][crate::config::Opts].

#[cfg(test)]
mod test;

pub mod bp;
pub mod dp;
pub mod hw;
pub mod raw;
pub mod sw;
pub mod tp;

/// An event lowered to its kernel selector fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event(pub(crate) EventConfig);

impl Event {
    /// The `perf_event_attr::type` value of this event.
    pub fn ty(&self) -> u32 {
        self.0.ty
    }

    /// The `perf_event_attr::config` value of this event.
    pub fn config(&self) -> u64 {
        self.0.config
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EventConfig {
    pub ty: u32,
    pub config: u64,
    pub config1: u64,
    pub config2: u64,
    pub config3: u64,
    pub bp_type: u32,
}

macro_rules! try_from {
    ($ty:ty, $value:ident, $impl: expr) => {
        impl TryFrom<&$ty> for crate::event::Event {
            type Error = crate::Error;

            fn try_from($value: &$ty) -> std::result::Result<Self, Self::Error> {
                $impl
            }
        }

        impl TryFrom<$ty> for crate::event::Event {
            type Error = crate::Error;

            fn try_from(value: $ty) -> std::result::Result<Self, Self::Error> {
                (&value).try_into()
            }
        }
    };
}
use try_from;

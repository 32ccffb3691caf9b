use std::fs;
use std::io;
use std::path::Path;

use super::EventConfig;
use crate::Result;

pub(crate) const PMU_DEVICES_PATH: &str = "/sys/bus/event_source/devices";

/// Dynamic PMU event
///
/// Covers uncore PMUs and every other PMU the kernel registers at runtime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicPmu {
    /// The type value to use can be found in the sysfs filesystem: there is a subdirectory per
    /// PMU instance under `/sys/bus/event_source/devices`. In each subdirectory there is a
    /// type file whose content is an integer that can be used in the this field.
    ///
    /// For instance, `/sys/bus/event_source/devices/cpu/type` contains the value for
    /// the core CPU PMU, which is usually 4.
    pub ty: u32,
    /// Event config.
    pub config: u64,
    /// Event config1.
    pub config1: u64,
    /// Event config2.
    pub config2: u64,
    /// Event config3.
    ///
    /// Since `linux-6.3`: <https://github.com/torvalds/linux/commit/09519ec3b19e4144b5f6e269c54fbb9c294a9fcb>
    pub config3: u64,
}

impl DynamicPmu {
    /// Builds an event for the PMU named `pmu` (e.g. `uncore_imc_0`, `msr`, `power`),
    /// resolving its type from sysfs.
    ///
    /// Fails with [`ErrorKind::Unsupported`][crate::ErrorKind::Unsupported]
    /// if there is no such PMU on this machine.
    pub fn by_name(pmu: &str, config: u64) -> Result<Self> {
        let ty = pmu_type(Path::new(PMU_DEVICES_PATH).join(pmu).join("type"))?;
        Ok(Self {
            ty,
            config,
            ..Default::default()
        })
    }
}

pub(crate) fn pmu_type<P>(path: P) -> Result<u32>
where
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    let ty = content.trim().parse::<u32>().map_err(io::Error::other)?;
    Ok(ty)
}

super::try_from!(DynamicPmu, value, {
    let event_cfg = EventConfig {
        ty: value.ty,
        config: value.config,
        config1: value.config1,
        config2: value.config2,
        config3: value.config3,
        bp_type: 0,
    };
    Ok(Self(event_cfg))
});

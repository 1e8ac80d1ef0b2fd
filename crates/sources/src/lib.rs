//! w1temp-sources: Sensor discovery, raw reads and decoding for DS18x20 sensors.

mod decoder;
mod driver;
mod enrichment;
mod registry;
mod snapshot_cache;
mod sysfs;

#[cfg(test)]
mod testing;

pub use decoder::{is_ready, parse_temperature, read_temperature, Decoded, PollPolicy};
pub use driver::{DriverSettings, Ds18x20};
pub use enrichment::{enrich, EnrichedSet};
pub use registry::DeviceRegistry;
pub use snapshot_cache::SnapshotCache;
pub use sysfs::SysfsReader;

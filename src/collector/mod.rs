//! Power-supply metrics collector for Linux.
//!
//! This module provides infrastructure for collecting power-supply gauges
//! from the Linux sysfs `power_supply` device class, with support for
//! mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  PowerSupplyCollector                      │
//! │   enumerate ──► filter ──► read attributes ──► records     │
//! │  ┌────────────────────┐   ┌────────────────────────────┐  │
//! │  │   sysfs::reader    │   │       sysfs::vocab         │  │
//! │  │  - list_supplies   │   │  - charge_type codes       │  │
//! │  │  - read_attribute  │   │  - health codes            │  │
//! │  └─────────┬──────────┘   │  - status codes            │  │
//! │            │              └────────────────────────────┘  │
//! │     ┌──────▼──────┐                                       │
//! │     │  FileSystem │ (trait)                               │
//! │     └──────┬──────┘                                       │
//! └────────────┼───────────────────────────────────────────────┘
//!              │
//!      ┌───────┴───────┐
//!      │               │
//! ┌────▼─────┐   ┌─────▼─────┐
//! │  RealFs  │   │  MockFs   │
//! │ (Linux)  │   │ (Testing) │
//! └──────────┘   └───────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use supplystat::collector::{DEFAULT_IGNORED_DEVICES, PowerSupplyCollector, RealFs};
//!
//! let collector =
//!     PowerSupplyCollector::new(RealFs::new(), "/sys", DEFAULT_IGNORED_DEVICES).unwrap();
//! let records = collector.collect().unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use supplystat::collector::{MockFs, PowerSupplyCollector};
//!
//! let fs = MockFs::laptop();
//! let collector = PowerSupplyCollector::new(fs, "/sys", "^$").unwrap();
//! let records = collector.collect().unwrap();
//! assert!(!records.is_empty());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod sysfs;
pub mod traits;

pub use collector::{CollectError, DEFAULT_IGNORED_DEVICES, PowerSupplyCollector};
pub use mock::MockFs;
pub use sysfs::{ReadError, Vocabularies, Vocabulary};
pub use traits::{FileSystem, RealFs};

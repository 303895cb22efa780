//! supplystat - power-supply telemetry collection library.
//!
//! Reads the Linux sysfs `power_supply` device class and turns each
//! supply's attribute files into labeled gauge records.
//!
//! This library provides the core functionality used by:
//! - `supplystatd` - daemon that collects on an interval and writes records
//!   to stdout as text exposition or JSON lines

pub mod collector;
pub mod fmt;
pub mod model;

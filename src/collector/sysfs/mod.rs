//! Readers for the Linux sysfs `power_supply` device class.
//!
//! This module provides the attribute-file reader and device enumerator
//! for `<root>/class/power_supply/`, plus the categorical vocabularies
//! that map string-valued attributes to stable numeric codes.

pub mod reader;
pub mod vocab;

pub use reader::{ReadError, list_supplies, read_attribute, read_attribute_f64};
pub use vocab::{Vocabularies, Vocabulary};

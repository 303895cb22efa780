//! Power-supply collector: one collection cycle over the sysfs class tree.
//!
//! The collector ties enumeration, filtering, attribute reads, and
//! categorical encoding together and emits one record per (device,
//! metric kind) pair.

use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};

use crate::collector::sysfs::{
    Vocabularies, Vocabulary, list_supplies, read_attribute, read_attribute_f64,
};
use crate::collector::traits::FileSystem;
use crate::model::{MetricKind, MetricRecord, SupplyLabels};

/// Default exclusion pattern: conventional battery and AC-adapter units.
pub const DEFAULT_IGNORED_DEVICES: &str = r"^(BAT|AC)\d+$";

/// Subdirectory of the sysfs root holding the power_supply class.
const CLASS_SUBDIR: &str = "class/power_supply";

/// Error aborting a whole collection cycle.
#[derive(Debug)]
pub enum CollectError {
    /// Device enumeration failed; no devices can be discovered at all.
    Enumeration { path: PathBuf, source: io::Error },
    /// The configured exclusion pattern does not compile.
    Pattern(regex::Error),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Enumeration { path, source } => {
                write!(f, "couldn't list power supplies in {:?}: {}", path, source)
            }
            CollectError::Pattern(e) => write!(f, "invalid ignored-devices pattern: {}", e),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Enumeration { source, .. } => Some(source),
            CollectError::Pattern(e) => Some(e),
        }
    }
}

/// Collects power-supply gauges from `<root>/class/power_supply/`.
///
/// Holds no state across cycles: devices are re-discovered on every
/// [`collect`](Self::collect) call. The compiled exclusion pattern and the
/// categorical vocabularies are built once here and immutable afterwards,
/// so a collector is safe to reuse (read-only) across cycles.
pub struct PowerSupplyCollector<F: FileSystem> {
    fs: F,
    class_dir: PathBuf,
    ignored: Regex,
    vocab: Vocabularies,
}

impl<F: FileSystem> PowerSupplyCollector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `sysfs_root` - Base path of the sysfs tree (usually "/sys")
    /// * `ignored_devices` - Exclusion pattern, matched against each
    ///   device's path under the power_supply class directory
    ///
    /// Fails only if the pattern does not compile.
    pub fn new(
        fs: F,
        sysfs_root: impl AsRef<Path>,
        ignored_devices: &str,
    ) -> Result<Self, CollectError> {
        let ignored = Regex::new(ignored_devices).map_err(CollectError::Pattern)?;
        Ok(Self {
            fs,
            class_dir: sysfs_root.as_ref().join(CLASS_SUBDIR),
            ignored,
            vocab: Vocabularies::new(),
        })
    }

    /// Runs one collection cycle.
    ///
    /// Emits eleven gauge records per retained device, each carrying the
    /// device's six-field label set. Individual attribute read failures
    /// degrade to 0 (or an empty label) and never surface; the only
    /// reportable failure is being unable to enumerate devices at all.
    pub fn collect(&self) -> Result<Vec<MetricRecord>, CollectError> {
        let supplies =
            list_supplies(&self.fs, &self.class_dir).map_err(|source| CollectError::Enumeration {
                path: self.class_dir.clone(),
                source,
            })?;

        let mut records = Vec::with_capacity(supplies.len() * MetricKind::ALL.len());
        for supply in &supplies {
            if self.is_ignored(supply) {
                debug!("ignoring power supply {}", supply.display());
                continue;
            }

            let labels = self.read_labels(supply);
            for kind in MetricKind::ALL {
                records.push(MetricRecord {
                    kind,
                    value: self.read_value(supply, kind),
                    labels: labels.clone(),
                });
            }
            trace!(
                "collected {} records from {}",
                MetricKind::ALL.len(),
                supply.display()
            );
        }

        Ok(records)
    }

    /// Whether the exclusion pattern matches this device.
    ///
    /// The pattern sees the device's path under the class directory, not
    /// just its final component, so nested device paths stay excludable
    /// in full.
    fn is_ignored(&self, supply: &Path) -> bool {
        let relative = supply.strip_prefix(&self.class_dir).unwrap_or(supply);
        self.ignored.is_match(&relative.to_string_lossy())
    }

    /// Reads the six descriptor attributes of a device.
    fn read_labels(&self, supply: &Path) -> SupplyLabels {
        SupplyLabels {
            charge_full_design: self.label_or_empty(supply, "charge_full_design"),
            model_name: self.label_or_empty(supply, "model_name"),
            technology: self.label_or_empty(supply, "technology"),
            supply_type: self.label_or_empty(supply, "type"),
            serial_number: self.label_or_empty(supply, "serial_number"),
            voltage_min_design: self.label_or_empty(supply, "voltage_min_design"),
        }
    }

    /// Reads one gauge value, routing categorical attributes through their
    /// vocabulary.
    fn read_value(&self, supply: &Path, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::ChargeType => {
                self.encoded_or_zero(supply, kind.attribute(), &self.vocab.charge_type)
            }
            MetricKind::Health => {
                self.encoded_or_zero(supply, kind.attribute(), &self.vocab.health)
            }
            MetricKind::Status => {
                self.encoded_or_zero(supply, kind.attribute(), &self.vocab.status)
            }
            _ => self.value_or_zero(supply, kind.attribute()),
        }
    }

    // Tolerant-degrade helpers. This is the single place where attribute
    // read failures become defaults: a supply missing an attribute file
    // still reports every other attribute, with the missing one read as 0
    // or an empty label. A genuine zero reading is indistinguishable from
    // a failed read in the output; that ambiguity is part of the contract.

    fn label_or_empty(&self, supply: &Path, attribute: &str) -> String {
        read_attribute(&self.fs, supply, attribute).unwrap_or_default()
    }

    fn value_or_zero(&self, supply: &Path, attribute: &str) -> f64 {
        read_attribute_f64(&self.fs, supply, attribute).unwrap_or(0.0)
    }

    fn encoded_or_zero(&self, supply: &Path, attribute: &str, vocab: &Vocabulary) -> f64 {
        read_attribute(&self.fs, supply, attribute)
            .map(|token| vocab.encode(&token))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::traits::RealFs;

    /// Pattern that matches no device name.
    const KEEP_ALL: &str = "^$";

    fn collector(fs: MockFs, pattern: &str) -> PowerSupplyCollector<MockFs> {
        PowerSupplyCollector::new(fs, "/sys", pattern).unwrap()
    }

    fn value_of(records: &[MetricRecord], model: &str, kind: MetricKind) -> f64 {
        records
            .iter()
            .find(|r| r.labels.model_name == model && r.kind == kind)
            .map(|r| r.value)
            .unwrap()
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = PowerSupplyCollector::new(MockFs::new(), "/sys", "(unclosed");
        assert!(matches!(result, Err(CollectError::Pattern(_))));
    }

    #[test]
    fn test_collect_laptop() {
        let c = collector(MockFs::laptop(), KEEP_ALL);
        let records = c.collect().unwrap();

        // Three devices, eleven gauges each.
        assert_eq!(records.len(), 33);

        assert_eq!(value_of(&records, "DELL XVJNP1", MetricKind::Status), 2.0);
        assert_eq!(value_of(&records, "DELL XVJNP1", MetricKind::Health), 1.0);
        assert_eq!(
            value_of(&records, "DELL XVJNP1", MetricKind::ChargeNow),
            4886000.0
        );
        assert_eq!(
            value_of(&records, "DELL XVJNP1", MetricKind::CycleCount),
            87.0
        );

        let bat0 = records
            .iter()
            .find(|r| r.labels.model_name == "DELL XVJNP1")
            .unwrap();
        assert_eq!(bat0.labels.charge_full_design, "7545000");
        assert_eq!(bat0.labels.technology, "Li-ion");
        assert_eq!(bat0.labels.supply_type, "Battery");
        assert_eq!(bat0.labels.serial_number, "1131");
        assert_eq!(bat0.labels.voltage_min_design, "11400000");
    }

    #[test]
    fn test_records_ordered_by_device_then_table() {
        let c = collector(MockFs::laptop(), KEEP_ALL);
        let records = c.collect().unwrap();

        // AC0 sorts before BAT0 before hidpp_battery_0.
        assert_eq!(records[0].labels.supply_type, "Mains");
        assert_eq!(records[11].labels.model_name, "DELL XVJNP1");
        assert_eq!(records[22].labels.model_name, "MX Master 3");

        for device in records.chunks(11) {
            let kinds: Vec<_> = device.iter().map(|r| r.kind).collect();
            assert_eq!(kinds, MetricKind::ALL);
        }
    }

    #[test]
    fn test_default_pattern_excludes_bat_and_ac() {
        let c = collector(MockFs::laptop(), DEFAULT_IGNORED_DEVICES);
        let records = c.collect().unwrap();

        // Only the hid mouse battery survives; siblings are unaffected.
        assert_eq!(records.len(), 11);
        assert!(records.iter().all(|r| r.labels.model_name == "MX Master 3"));
        assert_eq!(value_of(&records, "MX Master 3", MetricKind::Online), 1.0);
    }

    #[test]
    fn test_default_pattern_excludes_lone_battery() {
        let c = collector(MockFs::single_battery(), DEFAULT_IGNORED_DEVICES);
        let records = c.collect().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_nonmatching_pattern_keeps_battery() {
        let c = collector(MockFs::single_battery(), "^dock\\d+$");
        let records = c.collect().unwrap();

        assert_eq!(records.len(), 11);
        // "Discharging" is position 2 of the status vocabulary.
        assert_eq!(
            value_of(&records, "PA5283U-1BRS", MetricKind::Status),
            2.0
        );
    }

    #[test]
    fn test_missing_attribute_reads_as_zero() {
        let mut fs = MockFs::new();
        fs.add_supply(
            "/sys/class/power_supply/wacom_battery_0",
            &[("status", "Full"), ("charge_now", "150000")],
        );

        let c = collector(fs, KEEP_ALL);
        let records = c.collect().unwrap();

        let by_kind = |kind| {
            records
                .iter()
                .find(|r| r.kind == kind)
                .map(|r| r.value)
                .unwrap()
        };

        // cycle_count has no attribute file: 0, siblings unaffected.
        assert_eq!(by_kind(MetricKind::CycleCount), 0.0);
        assert_eq!(by_kind(MetricKind::ChargeNow), 150000.0);
        assert_eq!(by_kind(MetricKind::Status), 4.0);
    }

    #[test]
    fn test_missing_descriptor_field_is_empty_string() {
        let mut fs = MockFs::single_battery();
        // A second battery without charge_full_design or serial_number.
        fs.add_supply(
            "/sys/class/power_supply/BAT1",
            &[
                ("type", "Battery"),
                ("model_name", "45N1023"),
                ("technology", "Li-ion"),
                ("status", "Charging"),
            ],
        );

        let c = collector(fs, "^dock\\d+$");
        let records = c.collect().unwrap();
        assert_eq!(records.len(), 22);

        let bat1 = records
            .iter()
            .find(|r| r.labels.model_name == "45N1023")
            .unwrap();
        assert_eq!(bat1.labels.charge_full_design, "");
        assert_eq!(bat1.labels.serial_number, "");
        assert_eq!(bat1.labels.technology, "Li-ion");
        assert_eq!(value_of(&records, "45N1023", MetricKind::Status), 1.0);

        // The fully-described sibling is untouched.
        let bat0 = records
            .iter()
            .find(|r| r.labels.model_name == "PA5283U-1BRS")
            .unwrap();
        assert_eq!(bat0.labels.charge_full_design, "5000000");
    }

    #[test]
    fn test_unparsable_numeric_attribute_reads_as_zero() {
        let mut fs = MockFs::new();
        fs.add_supply(
            "/sys/class/power_supply/BAT9",
            &[("charge_now", "not-a-number"), ("present", "1")],
        );

        let c = collector(fs, KEEP_ALL);
        let records = c.collect().unwrap();

        let charge = records
            .iter()
            .find(|r| r.kind == MetricKind::ChargeNow)
            .unwrap();
        assert_eq!(charge.value, 0.0);
        let present = records
            .iter()
            .find(|r| r.kind == MetricKind::Present)
            .unwrap();
        assert_eq!(present.value, 1.0);
    }

    #[test]
    fn test_two_cycles_are_identical() {
        let c = collector(MockFs::laptop(), KEEP_ALL);
        let first = c.collect().unwrap();
        let second = c.collect().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_class_dir_aborts_cycle() {
        let c = collector(MockFs::new(), KEEP_ALL);
        let err = c.collect().unwrap_err();
        assert!(matches!(err, CollectError::Enumeration { .. }));
        assert!(err.to_string().contains("power_supply"));
    }

    #[test]
    fn test_real_fs_end_to_end() {
        let root = tempfile::tempdir().unwrap();
        let bat0 = root.path().join("class/power_supply/BAT0");
        std::fs::create_dir_all(&bat0).unwrap();
        std::fs::write(bat0.join("status"), "Charging\n").unwrap();
        std::fs::write(bat0.join("model_name"), "OEM pack\n").unwrap();
        std::fs::write(bat0.join("voltage_now"), "12600000\n").unwrap();

        let c = PowerSupplyCollector::new(RealFs::new(), root.path(), "^dock\\d+$").unwrap();
        let records = c.collect().unwrap();

        assert_eq!(records.len(), 11);
        assert_eq!(value_of(&records, "OEM pack", MetricKind::Status), 1.0);
        assert_eq!(
            value_of(&records, "OEM pack", MetricKind::VoltageNow),
            12600000.0
        );

        // And the default pattern drops the same device.
        let c = PowerSupplyCollector::new(RealFs::new(), root.path(), DEFAULT_IGNORED_DEVICES)
            .unwrap();
        assert!(c.collect().unwrap().is_empty());
    }
}

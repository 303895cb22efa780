//! Metric records emitted by the power-supply collector.
//!
//! One collection cycle produces one `MetricRecord` per (device, metric
//! kind) pair. Records are built fresh each cycle and handed to whatever
//! sink the host wires up; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// The fixed set of gauges collected for every power-supply device.
///
/// Attribute names follow the kernel power_supply class ABI
/// (Documentation/power/power_supply_class.txt). The declaration order of
/// the variants is the emission order within a device.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Alarm,
    ChargeFull,
    ChargeNow,
    ChargeType,
    CurrentNow,
    CycleCount,
    Health,
    Online,
    Present,
    Status,
    VoltageNow,
}

impl MetricKind {
    /// All metric kinds, in emission order.
    pub const ALL: [MetricKind; 11] = [
        MetricKind::Alarm,
        MetricKind::ChargeFull,
        MetricKind::ChargeNow,
        MetricKind::ChargeType,
        MetricKind::CurrentNow,
        MetricKind::CycleCount,
        MetricKind::Health,
        MetricKind::Online,
        MetricKind::Present,
        MetricKind::Status,
        MetricKind::VoltageNow,
    ];

    /// The sysfs attribute file this gauge is read from.
    pub fn attribute(self) -> &'static str {
        match self {
            MetricKind::Alarm => "alarm",
            MetricKind::ChargeFull => "charge_full",
            MetricKind::ChargeNow => "charge_now",
            MetricKind::ChargeType => "charge_type",
            MetricKind::CurrentNow => "current_now",
            MetricKind::CycleCount => "cycle_count",
            MetricKind::Health => "health",
            MetricKind::Online => "online",
            MetricKind::Present => "present",
            MetricKind::Status => "status",
            MetricKind::VoltageNow => "voltage_now",
        }
    }

    /// The exposed metric name, namespaced under `power_supply`.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Alarm => "power_supply_alarm",
            MetricKind::ChargeFull => "power_supply_charge_full",
            MetricKind::ChargeNow => "power_supply_charge_now",
            MetricKind::ChargeType => "power_supply_charge_type",
            MetricKind::CurrentNow => "power_supply_current_now",
            MetricKind::CycleCount => "power_supply_cycle_count",
            MetricKind::Health => "power_supply_health",
            MetricKind::Online => "power_supply_online",
            MetricKind::Present => "power_supply_present",
            MetricKind::Status => "power_supply_status",
            MetricKind::VoltageNow => "power_supply_voltage_now",
        }
    }

    /// Help string for the exposition format.
    pub fn help(self) -> &'static str {
        match self {
            MetricKind::Alarm => "Alarm state.",
            MetricKind::ChargeFull => "Maximum charge in uAh.",
            MetricKind::ChargeNow => "Charge in uAh.",
            MetricKind::ChargeType => "Charge category code.",
            MetricKind::CurrentNow => "Current in uA.",
            MetricKind::CycleCount => "Charge cycles on supply.",
            MetricKind::Health => "Supply health code.",
            MetricKind::Online => "Device is online.",
            MetricKind::Present => "Device is present.",
            MetricKind::Status => "Supply status code.",
            MetricKind::VoltageNow => "Supply voltage in uV.",
        }
    }

    /// Whether the backing attribute is categorical (string-valued,
    /// mapped through a vocabulary) rather than numeric.
    pub fn is_categorical(self) -> bool {
        matches!(
            self,
            MetricKind::ChargeType | MetricKind::Health | MetricKind::Status
        )
    }
}

/// The label set attached to every metric of one device.
///
/// All six fields are read once per device per cycle and reused unchanged
/// across every record emitted for that device. A field whose attribute
/// file is unreadable stays an empty string; the device is never skipped
/// over it.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct SupplyLabels {
    /// Design charge capacity, raw attribute text.
    /// Source: `charge_full_design`
    pub charge_full_design: String,

    /// Model name reported by the device.
    /// Source: `model_name`
    pub model_name: String,

    /// Battery technology (Li-ion, Li-poly, NiMH, ...).
    /// Source: `technology`
    pub technology: String,

    /// Supply type (Battery, Mains, USB, ...), raw attribute text.
    /// Source: `type`
    pub supply_type: String,

    /// Serial number reported by the device.
    /// Source: `serial_number`
    pub serial_number: String,

    /// Minimum design voltage, raw attribute text.
    /// Source: `voltage_min_design`
    pub voltage_min_design: String,
}

impl SupplyLabels {
    /// Label name/value pairs in exposition order.
    pub fn pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("charge_full_design", &self.charge_full_design),
            ("model_name", &self.model_name),
            ("technology", &self.technology),
            ("type", &self.supply_type),
            ("serial_number", &self.serial_number),
            ("voltage_min_design", &self.voltage_min_design),
        ]
    }
}

/// One gauge sample: metric kind, value, and the device's label set.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct MetricRecord {
    pub kind: MetricKind,
    pub value: f64,
    pub labels: SupplyLabels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_carry_namespace() {
        for kind in MetricKind::ALL {
            assert!(kind.name().starts_with("power_supply_"));
            assert!(kind.name().ends_with(kind.attribute()));
            assert!(!kind.help().is_empty());
        }
    }

    #[test]
    fn test_emission_order_is_table_order() {
        let attributes: Vec<_> = MetricKind::ALL.iter().map(|k| k.attribute()).collect();
        let mut sorted = attributes.clone();
        sorted.sort_unstable();
        assert_eq!(attributes, sorted);
    }

    #[test]
    fn test_categorical_kinds() {
        let categorical: Vec<_> = MetricKind::ALL
            .into_iter()
            .filter(|k| k.is_categorical())
            .collect();
        assert_eq!(
            categorical,
            [MetricKind::ChargeType, MetricKind::Health, MetricKind::Status]
        );
    }

    #[test]
    fn test_kind_serializes_as_attribute_name() {
        let json = serde_json::to_string(&MetricKind::VoltageNow).unwrap();
        assert_eq!(json, "\"voltage_now\"");
    }

    #[test]
    fn test_label_pairs_order() {
        let labels = SupplyLabels {
            supply_type: "Battery".to_string(),
            ..Default::default()
        };
        let pairs = labels.pairs();
        assert_eq!(pairs[0].0, "charge_full_design");
        assert_eq!(pairs[3], ("type", "Battery"));
        assert_eq!(pairs[5].0, "voltage_min_design");
    }
}

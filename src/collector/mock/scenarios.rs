//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic sysfs power_supply states for testing
//! various device mixes.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical laptop sysfs tree.
    ///
    /// Includes: an internal battery (BAT0), an AC adapter (AC0), and a
    /// wireless mouse battery reported through hid (hidpp_battery_0).
    pub fn laptop() -> Self {
        let mut fs = Self::new();

        fs.add_supply(
            "/sys/class/power_supply/AC0",
            &[("type", "Mains"), ("online", "1")],
        );

        fs.add_supply(
            "/sys/class/power_supply/BAT0",
            &[
                ("type", "Battery"),
                ("status", "Discharging"),
                ("health", "Good"),
                ("present", "1"),
                ("technology", "Li-ion"),
                ("model_name", "DELL XVJNP1"),
                ("serial_number", "1131"),
                ("cycle_count", "87"),
                ("charge_full_design", "7545000"),
                ("charge_full", "6959000"),
                ("charge_now", "4886000"),
                ("current_now", "1342000"),
                ("voltage_min_design", "11400000"),
                ("voltage_now", "12061000"),
                ("alarm", "0"),
            ],
        );

        // hid devices expose a reduced attribute set
        fs.add_supply(
            "/sys/class/power_supply/hidpp_battery_0",
            &[
                ("type", "Battery"),
                ("status", "Discharging"),
                ("model_name", "MX Master 3"),
                ("serial_number", "406f-ec-ba-1f-21"),
                ("online", "1"),
                ("present", "1"),
            ],
        );

        fs
    }

    /// Creates a sysfs tree with only a battery, no adapter.
    ///
    /// Useful for exclusion-pattern tests where a single device either
    /// survives or is dropped.
    pub fn single_battery() -> Self {
        let mut fs = Self::new();

        fs.add_supply(
            "/sys/class/power_supply/BAT0",
            &[
                ("type", "Battery"),
                ("status", "Discharging"),
                ("health", "Good"),
                ("charge_full_design", "5000000"),
                ("model_name", "PA5283U-1BRS"),
                ("technology", "Li-poly"),
                ("serial_number", "0001"),
                ("voltage_min_design", "11400000"),
            ],
        );

        fs
    }
}

//! Static sensor specification registry
//!
//! Every canonical sensor the pipeline requires is described by a
//! [`SensorSpec`]: the aliases collectors are known to use for it, a soft
//! operating range whose breach is only a warning, a hard physical range
//! whose breach rejects the whole request, and a unit label. The table is
//! fixed at construction and never mutated.

/// Specification for one canonical sensor
#[derive(Debug, Clone)]
pub struct SensorSpec {
    /// Canonical field name used in normalized output
    pub canonical: &'static str,
    /// Accepted payload keys in resolution-priority order; the canonical
    /// name is always first
    pub aliases: &'static [&'static str],
    /// Soft operating range lower bound (breach warns)
    pub min_value: f64,
    /// Soft operating range upper bound (breach warns)
    pub max_value: f64,
    /// Hard physical range lower bound (breach rejects)
    pub hard_min: f64,
    /// Hard physical range upper bound (breach rejects)
    pub hard_max: f64,
    /// Unit of the normalized value
    pub unit: &'static str,
}

impl SensorSpec {
    pub fn in_soft_range(&self, value: f64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    pub fn in_hard_range(&self, value: f64) -> bool {
        (self.hard_min..=self.hard_max).contains(&value)
    }
}

/// Immutable table of sensor specifications, keyed by canonical name
#[derive(Debug, Clone)]
pub struct SensorRegistry {
    specs: Vec<SensorSpec>,
}

impl SensorRegistry {
    /// Creates the registry with the five canonical sensors.
    pub fn with_defaults() -> Self {
        Self {
            specs: vec![
                SensorSpec {
                    canonical: "pm25",
                    aliases: &["pm25", "pm2_5", "pm25_ugm3"],
                    min_value: 0.0,
                    max_value: 60.0,
                    hard_min: 0.0,
                    hard_max: 1000.0,
                    unit: "µg/m³",
                },
                SensorSpec {
                    canonical: "pm10",
                    aliases: &["pm10", "pm10_ugm3"],
                    min_value: 0.0,
                    max_value: 100.0,
                    hard_min: 0.0,
                    hard_max: 2000.0,
                    unit: "µg/m³",
                },
                SensorSpec {
                    canonical: "no2",
                    aliases: &["no2", "no2_ugm3", "no2_ppb"],
                    min_value: 0.0,
                    max_value: 120.0,
                    hard_min: 0.0,
                    hard_max: 1500.0,
                    unit: "µg/m³",
                },
                SensorSpec {
                    canonical: "ph",
                    aliases: &["ph", "ph_level"],
                    min_value: 6.5,
                    max_value: 8.5,
                    hard_min: 0.0,
                    hard_max: 14.0,
                    unit: "pH",
                },
                SensorSpec {
                    canonical: "temperature_c",
                    aliases: &["temperature_c", "temp_c", "temperature"],
                    min_value: -40.0,
                    max_value: 55.0,
                    hard_min: -90.0,
                    hard_max: 60.0,
                    unit: "°C",
                },
            ],
        }
    }

    /// Specifications in declaration order.
    pub fn specs(&self) -> &[SensorSpec] {
        &self.specs
    }

    /// Number of required canonical sensors.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Looks up a specification by canonical name.
    pub fn get(&self, canonical: &str) -> Option<&SensorSpec> {
        self.specs.iter().find(|spec| spec.canonical == canonical)
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

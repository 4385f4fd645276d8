use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Identifies a metric in weight tables and rating payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
pub enum MetricName {
    RampUp,
    Correctness,
    BusFactor,
    ResponsiveMaintainer,
    #[strum(serialize = "LicenseScore")]
    License,
}

impl MetricName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Serialize for MetricName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

use serde::Serialize;
use strum::{Display, EnumIter};

/// The quality dimension a metric speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
pub enum MetricCategory {
    Documentation,
    Quality,
    Community,
    Maintenance,
    Compliance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_report_order() {
        let order: Vec<String> = MetricCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(order, ["Documentation", "Quality", "Community", "Maintenance", "Compliance"]);
    }
}

use super::{BusFactor, Correctness, License, Metric, MetricCategory, MetricInfo, MetricName, MetricSettings, RampUp, Responsiveness};
use crate::source::{MetricSource, RepoSpec};
use std::sync::Arc;

/// Provenance tag recorded on every built-in metric.
const OWNER_TAG: &str = "pkgrate-core";

type Factory = fn(MetricInfo, Arc<dyn MetricSource>, &MetricSettings) -> Box<dyn Metric>;

#[derive(Debug)]
pub struct MetricDef {
    pub name: MetricName,
    pub description: &'static str,
    pub category: MetricCategory,
    pub create: Factory,
}

macro_rules! metric_def {
    ($name:ident, $description:expr, $category:ident, $create:expr) => {
        MetricDef {
            name: MetricName::$name,
            description: $description,
            category: MetricCategory::$category,
            create: $create,
        }
    };
}

pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    metric_def!(
        RampUp,
        "How quickly a newcomer can get started, from the size of the README",
        Documentation,
        |info, source, _| Box::new(RampUp::new(info, source))
    ),
    metric_def!(
        Correctness,
        "Share of recent issues that have been closed",
        Quality,
        |info, source, settings| Box::new(Correctness::new(info, source, settings))
    ),
    metric_def!(
        BusFactor,
        "Number of top contributors accounting for half of all contributions",
        Community,
        |info, source, settings| Box::new(BusFactor::new(info, source, settings))
    ),
    metric_def!(
        ResponsiveMaintainer,
        "Time to first response on issues and pull requests, and time to merge",
        Maintenance,
        |info, source, settings| Box::new(Responsiveness::new(info, source, settings))
    ),
    metric_def!(
        License,
        "Whether the license can be combined with LGPL-2.1 code",
        Compliance,
        |info, source, _| Box::new(License::new(info, source))
    ),
];

impl MetricDef {
    /// Look up the definition for a metric name.
    #[must_use]
    pub fn find(name: MetricName) -> Option<&'static Self> {
        METRIC_DEFINITIONS.iter().find(|def| def.name == name)
    }

    /// Instantiate a fresh metric for one repository.
    #[must_use]
    pub fn instantiate(&self, repo: RepoSpec, source: Arc<dyn MetricSource>, settings: &MetricSettings) -> Box<dyn Metric> {
        let info = MetricInfo::new(self.name, self.category, OWNER_TAG, repo);
        (self.create)(info, source, settings)
    }
}

/// Build one fresh metric per enabled name, in registry order.
#[must_use]
pub fn create_metrics(
    repo: &RepoSpec,
    source: &Arc<dyn MetricSource>,
    settings: &MetricSettings,
    enabled: impl Fn(MetricName) -> bool,
) -> Vec<Box<dyn Metric>> {
    METRIC_DEFINITIONS
        .iter()
        .filter(|def| enabled(def.name))
        .map(|def| def.instantiate(repo.clone(), Arc::clone(source), settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake_source::FakeSource;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_name_has_exactly_one_definition() {
        let names: HashSet<_> = METRIC_DEFINITIONS.iter().map(|def| def.name).collect();
        assert_eq!(names.len(), METRIC_DEFINITIONS.len());

        for name in MetricName::iter() {
            assert!(MetricDef::find(name).is_some(), "no definition for {name}");
        }
    }

    #[test]
    fn test_create_metrics_carries_identity() {
        let source: Arc<dyn MetricSource> = Arc::new(FakeSource::default());
        let repo = RepoSpec::new("owner", "repo").unwrap();

        let metrics = create_metrics(&repo, &source, &MetricSettings::default(), |_| true);

        assert_eq!(metrics.len(), METRIC_DEFINITIONS.len());
        for (metric, def) in metrics.iter().zip(METRIC_DEFINITIONS) {
            assert_eq!(metric.info().name(), def.name);
            assert_eq!(metric.info().category(), def.category);
            assert_eq!(metric.info().owner_tag(), OWNER_TAG);
            assert_eq!(metric.info().repo(), &repo);
        }
    }

    #[test]
    fn test_create_metrics_honors_filter() {
        let source: Arc<dyn MetricSource> = Arc::new(FakeSource::default());
        let repo = RepoSpec::new("owner", "repo").unwrap();

        let metrics = create_metrics(&repo, &source, &MetricSettings::default(), |name| name == MetricName::License);

        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].info().name(), MetricName::License);
    }
}

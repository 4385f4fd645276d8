use super::{Metric, MetricInfo, MetricSettings};
use crate::source::{ContributorRecord, MetricSource, SourceResult};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Number of key contributors at which the score saturates.
const SATURATION: usize = 5;

/// How many people the project depends on: the smallest group of top
/// contributors that together account for at least half of all contributions.
#[derive(Debug)]
pub struct BusFactor {
    info: MetricInfo,
    source: Arc<dyn MetricSource>,
    sample_size: u8,
    key_contributors: Option<usize>,
}

impl BusFactor {
    #[must_use]
    pub fn new(info: MetricInfo, source: Arc<dyn MetricSource>, settings: &MetricSettings) -> Self {
        Self {
            info,
            source,
            sample_size: settings.sample_size,
            key_contributors: None,
        }
    }

    #[must_use]
    pub const fn key_contributors(&self) -> Option<usize> {
        self.key_contributors
    }
}

impl Metric for BusFactor {
    fn info(&self) -> &MetricInfo {
        &self.info
    }

    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async move {
            if !self.info.begin_fetch() {
                return Ok(());
            }

            let contributors = self.source.contributors(self.info.repo(), self.sample_size).await?;
            self.key_contributors = key_contributors(contributors);
            Ok(())
        })
    }

    #[expect(clippy::cast_precision_loss, reason = "values are at most SATURATION")]
    fn calculate_metric(&self) -> f64 {
        self.key_contributors
            .map_or(0.0, |k| k.min(SATURATION) as f64 / SATURATION as f64)
    }
}

fn key_contributors(mut contributors: Vec<ContributorRecord>) -> Option<usize> {
    contributors.sort_by(|a, b| b.contributions.cmp(&a.contributions));

    let total: u64 = contributors.iter().map(|c| c.contributions).sum();
    if total == 0 {
        return None;
    }

    let mut covered = 0_u64;
    for (i, c) in contributors.iter().enumerate() {
        covered += c.contributions;
        if covered * 2 >= total {
            return Some(i + 1);
        }
    }

    Some(contributors.len())
}

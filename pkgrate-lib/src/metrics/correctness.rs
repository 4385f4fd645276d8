use super::{Metric, MetricInfo, MetricSettings};
use crate::source::{IssueRecord, IssueState, MetricSource, SourceResult};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Share of recent issues that have been resolved.
#[derive(Debug)]
pub struct Correctness {
    info: MetricInfo,
    source: Arc<dyn MetricSource>,
    sample_size: u8,
    issue_counts: Option<IssueCounts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueCounts {
    pub closed: u32,
    pub total: u32,
}

impl Correctness {
    #[must_use]
    pub fn new(info: MetricInfo, source: Arc<dyn MetricSource>, settings: &MetricSettings) -> Self {
        Self {
            info,
            source,
            sample_size: settings.sample_size,
            issue_counts: None,
        }
    }

    #[must_use]
    pub const fn issue_counts(&self) -> Option<IssueCounts> {
        self.issue_counts
    }
}

impl Metric for Correctness {
    fn info(&self) -> &MetricInfo {
        &self.info
    }

    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async move {
            if !self.info.begin_fetch() {
                return Ok(());
            }

            let issues = self.source.issues(self.info.repo(), self.sample_size).await?;
            self.issue_counts = count_issues(&issues);
            Ok(())
        })
    }

    fn calculate_metric(&self) -> f64 {
        self.issue_counts
            .map_or(0.0, |c| f64::from(c.closed) / f64::from(c.total))
    }
}

/// Count issues, skipping pull requests. `None` when there are none.
fn count_issues(issues: &[IssueRecord]) -> Option<IssueCounts> {
    let (closed, total) = issues
        .iter()
        .filter(|i| !i.is_pull_request())
        .fold((0_u32, 0_u32), |(closed, total), i| (closed + u32::from(i.state == IssueState::Closed), total + 1));

    (total > 0).then_some(IssueCounts { closed, total })
}

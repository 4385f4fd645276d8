use super::{Metric, MetricInfo, MetricSettings};
use crate::source::{CommentRecord, MetricSource, SourceError, SourceResult};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::sync::Arc;

/// How quickly maintainers react: time to first response on the newest issue
/// and pull request, and time to merge for the newest merged pull request.
#[derive(Debug)]
pub struct Responsiveness {
    info: MetricInfo,
    source: Arc<dyn MetricSource>,
    result_count: u8,
    half_life_minutes: f64,
    issue_response_minutes: Option<f64>,
    pr_response_minutes: Option<f64>,
    merge_minutes: Option<f64>,
    collected_any: bool,
}

impl Responsiveness {
    #[must_use]
    pub fn new(info: MetricInfo, source: Arc<dyn MetricSource>, settings: &MetricSettings) -> Self {
        Self {
            info,
            source,
            result_count: settings.result_count,
            half_life_minutes: settings.response_half_life_minutes,
            issue_response_minutes: None,
            pr_response_minutes: None,
            merge_minutes: None,
            collected_any: false,
        }
    }

    #[must_use]
    pub const fn issue_response_minutes(&self) -> Option<f64> {
        self.issue_response_minutes
    }

    #[must_use]
    pub const fn pr_response_minutes(&self) -> Option<f64> {
        self.pr_response_minutes
    }

    #[must_use]
    pub const fn merge_minutes(&self) -> Option<f64> {
        self.merge_minutes
    }

    fn durations(&self) -> impl Iterator<Item = f64> {
        [self.issue_response_minutes, self.pr_response_minutes, self.merge_minutes]
            .into_iter()
            .flatten()
    }
}

impl Metric for Responsiveness {
    fn info(&self) -> &MetricInfo {
        &self.info
    }

    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async move {
            if !self.info.begin_fetch() {
                return Ok(());
            }

            let source = Arc::clone(&self.source);
            let repo = self.info.repo().clone();
            let count = self.result_count;

            let (issue_comments, pr_comments, merge) = tokio::join!(
                source.issue_comments(&repo, count),
                source.pull_request_comments(&repo, count),
                source.latest_merged_pull(&repo, count),
            );

            let collected_any = issue_comments.is_ok() || pr_comments.is_ok() || merge.is_ok();

            let mut first_error: Option<SourceError> = None;
            let mut keep = |result: SourceResult<Option<f64>>| match result {
                Ok(minutes) => minutes,
                Err(e) => {
                    let _ = first_error.get_or_insert(e);
                    None
                }
            };

            let issue_response = keep(issue_comments.map(|c| first_response_minutes(&c)));
            let pr_response = keep(pr_comments.map(|c| first_response_minutes(&c)));
            let merge_time = keep(merge.map(|m| m.map(|m| minutes_between(m.created_at, m.merged_at))));

            self.issue_response_minutes = issue_response;
            self.pr_response_minutes = pr_response;
            self.merge_minutes = merge_time;
            self.collected_any = collected_any;

            first_error.map_or(Ok(()), Err)
        })
    }

    fn collected_any(&self) -> bool {
        self.collected_any
    }

    /// Mean of the known durations, in minutes.
    fn calculate_metric(&self) -> f64 {
        let (total, count) = self.durations().fold((0.0, 0_u32), |(total, count), d| (total + d, count + 1));

        if count == 0 { 0.0 } else { total / f64::from(count) }
    }

    /// Saturating transform of the mean duration: 1 for an instant response,
    /// 0.5 at the configured half-life, approaching 0 as responses slow down.
    fn score(&self) -> f64 {
        if self.durations().next().is_none() || self.half_life_minutes <= 0.0 {
            return 0.0;
        }

        super::clamp_score(1.0 / (1.0 + self.calculate_metric() / self.half_life_minutes))
    }
}

fn first_response_minutes(comments: &[CommentRecord]) -> Option<f64> {
    comments.first().map(|c| minutes_between(c.created_at, c.updated_at))
}

/// Whole-millisecond precision, negative spans clamped to 0.
#[expect(clippy::cast_precision_loss, reason = "minute-scale durations fit comfortably in an f64 mantissa")]
fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds().max(0) as f64 / 60_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricCategory, MetricName};
    use crate::source::RepoSpec;
    use crate::source::fake_source::{FakeSource, comment_after, http_500, merge_after, t0};

    fn metric(source: FakeSource) -> Responsiveness {
        let info = MetricInfo::new(
            MetricName::ResponsiveMaintainer,
            MetricCategory::Maintenance,
            "test",
            RepoSpec::new("owner", "repo").unwrap(),
        );
        Responsiveness::new(info, Arc::new(source), &MetricSettings::default())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[tokio::test]
    async fn test_issue_only() {
        let mut m = metric(FakeSource {
            issue_comments: Ok(vec![comment_after(30)]),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        assert_eq!(m.issue_response_minutes(), Some(30.0));
        assert_eq!(m.pr_response_minutes(), None);
        assert_eq!(m.merge_minutes(), None);
        assert_close(m.calculate_metric(), 30.0);
    }

    #[tokio::test]
    async fn test_no_data_at_all() {
        let mut m = metric(FakeSource::default());

        m.fetch_data().await.unwrap();

        assert!(m.calculate_metric().abs() < f64::EPSILON);
        assert!(m.score().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_mean_of_three() {
        let mut m = metric(FakeSource {
            issue_comments: Ok(vec![comment_after(10)]),
            pull_request_comments: Ok(vec![comment_after(20)]),
            latest_merged_pull: Ok(Some(merge_after(30))),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        assert_close(m.calculate_metric(), 20.0);
    }

    #[tokio::test]
    async fn test_issue_failure_keeps_other_durations() {
        let mut m = metric(FakeSource {
            issue_comments: Err(http_500()),
            pull_request_comments: Ok(vec![comment_after(20)]),
            latest_merged_pull: Ok(Some(merge_after(40))),
            ..FakeSource::default()
        });

        let err = m.fetch_data().await.unwrap_err();

        assert!(matches!(err, SourceError::Unavailable(_)));
        assert_eq!(m.issue_response_minutes(), None);
        assert_close(m.calculate_metric(), 30.0);
        assert!(m.collected_any());
    }

    #[tokio::test]
    async fn test_every_read_failing_collects_nothing() {
        let mut m = metric(FakeSource {
            issue_comments: Err(http_500()),
            pull_request_comments: Err(http_500()),
            latest_merged_pull: Err(http_500()),
            ..FakeSource::default()
        });

        let _ = m.fetch_data().await.unwrap_err();

        assert!(!m.collected_any());
    }

    #[tokio::test]
    async fn test_instant_response_is_distinct_from_unknown() {
        let mut m = metric(FakeSource {
            issue_comments: Ok(vec![comment_after(0)]),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        assert_eq!(m.issue_response_minutes(), Some(0.0));
        assert_close(m.score(), 1.0);
    }

    #[tokio::test]
    async fn test_negative_span_clamped() {
        let mut m = metric(FakeSource {
            issue_comments: Ok(vec![CommentRecord {
                created_at: t0(),
                updated_at: t0() - chrono::Duration::minutes(5),
            }]),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        assert_eq!(m.issue_response_minutes(), Some(0.0));
    }

    #[tokio::test]
    async fn test_score_at_half_life() {
        let mut m = metric(FakeSource {
            issue_comments: Ok(vec![comment_after(1440)]),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        assert_close(m.score(), 0.5);
    }

    #[tokio::test]
    async fn test_fetch_runs_once() {
        let source = Arc::new(FakeSource::default());
        let info = MetricInfo::new(
            MetricName::ResponsiveMaintainer,
            MetricCategory::Maintenance,
            "test",
            RepoSpec::new("owner", "repo").unwrap(),
        );
        let mut m = Responsiveness::new(info, Arc::clone(&source) as Arc<dyn MetricSource>, &MetricSettings::default());

        m.fetch_data().await.unwrap();
        m.fetch_data().await.unwrap();

        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_calculate_is_idempotent() {
        let mut m = metric(FakeSource {
            pull_request_comments: Ok(vec![comment_after(12)]),
            latest_merged_pull: Ok(Some(merge_after(7))),
            ..FakeSource::default()
        });

        m.fetch_data().await.unwrap();

        let first = m.calculate_metric();
        let second = m.calculate_metric();
        assert!((first - second).abs() < f64::EPSILON);
        assert!((m.score() - m.score()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calculate_without_fetch_is_zero() {
        let m = metric(FakeSource::default());
        assert!(m.calculate_metric().abs() < f64::EPSILON);
    }
}

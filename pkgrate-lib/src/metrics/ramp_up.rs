use super::{Metric, MetricInfo};
use crate::source::{MetricSource, SourceResult};
use futures::future::BoxFuture;
use std::sync::Arc;

/// README size, in bytes, at which the score saturates.
const README_SATURATION_BYTES: u64 = 8 * 1024;

/// How easy it is for a newcomer to get started, judged by README depth.
#[derive(Debug)]
pub struct RampUp {
    info: MetricInfo,
    source: Arc<dyn MetricSource>,
    readme_bytes: Option<u64>,
}

impl RampUp {
    #[must_use]
    pub fn new(info: MetricInfo, source: Arc<dyn MetricSource>) -> Self {
        Self {
            info,
            source,
            readme_bytes: None,
        }
    }

    #[must_use]
    pub const fn readme_bytes(&self) -> Option<u64> {
        self.readme_bytes
    }
}

impl Metric for RampUp {
    fn info(&self) -> &MetricInfo {
        &self.info
    }

    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async move {
            if !self.info.begin_fetch() {
                return Ok(());
            }

            let readme = self.source.readme(self.info.repo()).await?;
            self.readme_bytes = readme.map(|r| r.size);
            Ok(())
        })
    }

    #[expect(clippy::cast_precision_loss, reason = "value is capped at README_SATURATION_BYTES")]
    fn calculate_metric(&self) -> f64 {
        self.readme_bytes
            .map_or(0.0, |size| size.min(README_SATURATION_BYTES) as f64 / README_SATURATION_BYTES as f64)
    }
}

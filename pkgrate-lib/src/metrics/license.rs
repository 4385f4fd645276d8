use super::{Metric, MetricInfo};
use crate::source::{MetricSource, SourceResult};
use futures::future::BoxFuture;
use spdx::{Expression, ParseMode};
use std::sync::Arc;

const LOG_TARGET: &str = "   metrics";

/// Licenses that can be combined with an LGPL-2.1 work.
const COMPATIBLE_LICENSES: &[&str] = &[
    "0BSD",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "BSL-1.0",
    "CC0-1.0",
    "ISC",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "MIT",
    "MIT-0",
    "MPL-2.0",
    "Unlicense",
    "X11",
    "Zlib",
];

/// Whether the repository's license lets the package be redistributed
/// alongside LGPL-2.1 code.
#[derive(Debug)]
pub struct License {
    info: MetricInfo,
    source: Arc<dyn MetricSource>,
    compatible: Option<bool>,
}

impl License {
    #[must_use]
    pub fn new(info: MetricInfo, source: Arc<dyn MetricSource>) -> Self {
        Self {
            info,
            source,
            compatible: None,
        }
    }

    #[must_use]
    pub const fn compatible(&self) -> Option<bool> {
        self.compatible
    }
}

impl Metric for License {
    fn info(&self) -> &MetricInfo {
        &self.info
    }

    fn fetch_data(&mut self) -> BoxFuture<'_, SourceResult<()>> {
        Box::pin(async move {
            if !self.info.begin_fetch() {
                return Ok(());
            }

            let license = self.source.license(self.info.repo()).await?;
            self.compatible = license.map(|l| is_compatible(&l.spdx_id));
            Ok(())
        })
    }

    fn calculate_metric(&self) -> f64 {
        if self.compatible == Some(true) { 1.0 } else { 0.0 }
    }
}

/// Evaluate an SPDX expression against the compatible set.
///
/// `A OR B` passes if either side does, `A AND B` only if both do. Parsing is
/// lax because the hosting API reports deprecated ids such as `LGPL-2.1`.
fn is_compatible(spdx_id: &str) -> bool {
    match Expression::parse_mode(spdx_id, ParseMode::LAX) {
        Ok(expr) => expr.evaluate(|req| {
            req.license
                .id()
                .is_some_and(|id| COMPATIBLE_LICENSES.contains(&id.name))
        }),
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Could not parse license expression '{spdx_id}': {e}");
            false
        }
    }
}

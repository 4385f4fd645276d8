use crate::engine::{EvaluateError, NetScoreResult};

/// The outcome of rating one requested package.
#[derive(Debug)]
pub struct RatedPackage {
    pub identifier: String,
    pub outcome: Result<NetScoreResult, EvaluateError>,
}

impl RatedPackage {
    #[must_use]
    pub const fn new(identifier: String, outcome: Result<NetScoreResult, EvaluateError>) -> Self {
        Self { identifier, outcome }
    }

    #[must_use]
    pub fn rating(&self) -> Option<&NetScoreResult> {
        self.outcome.as_ref().ok()
    }
}

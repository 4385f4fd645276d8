use super::RatedPackage;
use crate::Result;
use crate::engine::NetScoreResult;
use core::fmt::Write;
use serde::Serialize;

#[derive(Serialize)]
struct RatingLine<'a> {
    #[serde(rename = "URL")]
    url: &'a str,

    #[serde(flatten)]
    rating: &'a NetScoreResult,
}

/// Write one JSON object per rated package. Packages without a rating are skipped.
pub fn generate<W: Write>(packages: &[RatedPackage], writer: &mut W) -> Result<()> {
    for package in packages {
        if let Some(rating) = package.rating() {
            let line = RatingLine {
                url: &package.identifier,
                rating,
            };
            writeln!(writer, "{}", serde_json::to_string(&line)?)?;
        }
    }

    Ok(())
}

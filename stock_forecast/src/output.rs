//! JSON encoding of forecast rows

use crate::error::Result;
use crate::models::ForecastPoint;
use std::io::Write;

/// Encode `points` as a JSON array
pub fn to_json(points: &[ForecastPoint]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(points)?)
}

/// Write `points` as a JSON array and flush
///
/// The array is encoded in memory first, so an encoding failure leaves the
/// writer untouched.
pub fn write_json<W: Write>(points: &[ForecastPoint], mut writer: W) -> Result<()> {
    let bytes = to_json(points)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

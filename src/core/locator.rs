use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Returns the first index whose `date` is `>= query`.
///
/// `points` must be sorted ascending by `date`. The result lies in
/// `0..=points.len()`.
#[must_use]
pub fn lower_bound(points: &[DataPoint], query: f64) -> usize {
    points.partition_point(|point| point.date < query)
}

/// Resolves the index of the sample nearest to `query`.
///
/// The bisection index is clamped to `[1, len - 1]` so queries before the
/// first or after the last sample resolve to that endpoint. On an exact tie
/// the earlier neighbour wins.
pub fn locate_index(points: &[DataPoint], query: f64) -> ChartResult<usize> {
    if !query.is_finite() {
        return Err(ChartError::InvalidData(
            "locate query must be finite".to_owned(),
        ));
    }

    match points.len() {
        0 => Err(ChartError::EmptyDataset),
        1 => Ok(0),
        len => {
            let index = lower_bound(points, query).clamp(1, len - 1);
            let before = points[index - 1];
            let after = points[index];
            if query - before.date > after.date - query {
                Ok(index)
            } else {
                Ok(index - 1)
            }
        }
    }
}

/// Returns the sample nearest to `query`. See [`locate_index`].
pub fn locate(points: &[DataPoint], query: f64) -> ChartResult<&DataPoint> {
    let index = locate_index(points, query)?;
    Ok(&points[index])
}

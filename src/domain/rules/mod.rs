// Domain rules - Pure range folding and filtering

use crate::domain::errors::*;
use crate::domain::model::*;

/// Folds sorted candidate ranges into maximal merged ranges
pub struct RangeMerger;

impl RangeMerger {
    /// Merge consecutive ranges left to right.
    ///
    /// The accumulator absorbs every candidate it `can_merge` with and is
    /// emitted on the first one it cannot; the last accumulator is emitted
    /// once the candidates run out. Input order is significant.
    pub fn merge_sorted(candidates: &[FrameRange], offset: u64) -> Result<Vec<FrameRange>, DomainError> {
        let mut merged = Vec::new();
        let mut current: Option<FrameRange> = None;

        for candidate in candidates {
            current = Some(match current.take() {
                Some(acc) if acc.can_merge(candidate, offset) => acc.merge(candidate, offset)?,
                Some(acc) => {
                    merged.push(acc);
                    candidate.clone()
                }
                None => candidate.clone(),
            });
        }

        if let Some(last) = current {
            merged.push(last);
        }
        Ok(merged)
    }
}

/// Drops ranges that are too short to matter
pub struct LengthFilter;

impl LengthFilter {
    /// Keep ranges with `length >= limit`, preserving order. A limit of 0 keeps all.
    pub fn apply(ranges: Vec<FrameRange>, limit: u64) -> Vec<FrameRange> {
        if limit == 0 {
            return ranges;
        }
        ranges
            .into_iter()
            .filter(|range| range.length() >= limit)
            .collect()
    }
}

#[cfg(test)]
mod tests;

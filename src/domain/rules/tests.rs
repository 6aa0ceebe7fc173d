// Unit tests for range rules

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn range(start: FrameId, end: FrameId, score: f64) -> FrameRange {
        FrameRange::new(
            VideoId::new("rules.mp4"),
            start,
            end,
            vec![score],
            start as f64 / 10.0,
            end as f64 / 10.0,
        )
    }

    fn bounds(ranges: &[FrameRange]) -> Vec<(FrameId, FrameId)> {
        ranges.iter().map(|r| (r.start(), r.end())).collect()
    }

    #[test]
    fn test_merge_sorted_empty() {
        let merged = RangeMerger::merge_sorted(&[], 0).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_sorted_single_candidate_is_emitted() {
        let merged = RangeMerger::merge_sorted(&[range(5, 6, 0.1)], 0).unwrap();
        assert_eq!(bounds(&merged), vec![(5, 6)]);
    }

    #[test]
    fn test_merge_sorted_touching_chain() {
        let candidates = vec![range(1, 2, 0.1), range(2, 3, 0.2), range(3, 4, 0.3)];
        let merged = RangeMerger::merge_sorted(&candidates, 0).unwrap();

        assert_eq!(bounds(&merged), vec![(1, 4)]);
        assert_eq!(merged[0].scores(), &[0.1, 0.2, 0.3]);
        assert_eq!(merged[0].start_time(), 0.1);
        assert_eq!(merged[0].end_time(), 0.4);
    }

    #[test]
    fn test_merge_sorted_trailing_singleton_not_dropped() {
        let candidates = vec![range(1, 2, 0.1), range(2, 3, 0.1), range(7, 8, 0.1)];
        let merged = RangeMerger::merge_sorted(&candidates, 0).unwrap();
        assert_eq!(bounds(&merged), vec![(1, 3), (7, 8)]);
    }

    #[test]
    fn test_merge_sorted_all_disjoint() {
        let candidates = vec![range(1, 2, 0.1), range(4, 5, 0.1), range(7, 8, 0.1)];
        let merged = RangeMerger::merge_sorted(&candidates, 0).unwrap();
        assert_eq!(bounds(&merged), vec![(1, 2), (4, 5), (7, 8)]);
    }

    #[test]
    fn test_merge_sorted_offset_bridges_gap() {
        let candidates = vec![range(1, 2, 0.1), range(4, 5, 0.1), range(9, 10, 0.1)];

        let merged = RangeMerger::merge_sorted(&candidates, 2).unwrap();
        assert_eq!(bounds(&merged), vec![(1, 5), (9, 10)]);

        let merged = RangeMerger::merge_sorted(&candidates, 4).unwrap();
        assert_eq!(bounds(&merged), vec![(1, 10)]);
    }

    #[test]
    fn test_merge_sorted_keeps_videos_apart() {
        let other = FrameRange::new(VideoId::new("other.mp4"), 2, 3, vec![0.1], 0.2, 0.3);
        let candidates = vec![range(1, 2, 0.1), other];
        let merged = RangeMerger::merge_sorted(&candidates, 0).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].video_id(), &VideoId::new("other.mp4"));
    }

    #[test]
    fn test_merge_sorted_is_repeatable() {
        let candidates = vec![range(1, 2, 0.1), range(2, 3, 0.2), range(6, 7, 0.3)];
        let first = RangeMerger::merge_sorted(&candidates, 0).unwrap();
        let second = RangeMerger::merge_sorted(&candidates, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(candidates[0].end(), 2);
    }

    #[test]
    fn test_length_filter_zero_keeps_everything() {
        let ranges = vec![range(1, 1, 0.1), range(2, 9, 0.1)];
        assert_eq!(LengthFilter::apply(ranges.clone(), 0), ranges);
    }

    #[test]
    fn test_length_filter_removes_short_ranges_in_order() {
        let ranges = vec![
            range(0, 1, 0.1),
            range(2, 9, 0.1),
            range(10, 12, 0.1),
            range(13, 20, 0.1),
        ];
        let kept = LengthFilter::apply(ranges, 3);
        assert_eq!(bounds(&kept), vec![(2, 9), (10, 12), (13, 20)]);
    }

    #[test]
    fn test_merge_error_is_range_mismatch() {
        let err = range(1, 2, 0.1).merge(&range(5, 6, 0.1), 0).unwrap_err();
        assert!(matches!(err, DomainError::RangeMismatch(_)));
    }
}

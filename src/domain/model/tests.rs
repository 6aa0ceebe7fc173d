// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::ports::{MatchResult, TemplateMatcher};
    use crate::adapters::{MemoryFrameSource, SsimMetric};
    use image::{DynamicImage, GrayImage, Luma};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn video() -> VideoId {
        VideoId::new("demo.mp4")
    }

    fn range(start: FrameId, end: FrameId, scores: Vec<f64>) -> FrameRange {
        FrameRange::new(video(), start, end, scores, start as f64, end as f64)
    }

    #[test]
    fn test_frame_range_normalizes_reversed_bounds() {
        let r = FrameRange::new(video(), 12, 7, vec![1.0], 1.2, 0.7);
        assert_eq!(r.start(), 7);
        assert_eq!(r.end(), 12);
        assert_eq!(r.start_time(), 0.7);
        assert_eq!(r.end_time(), 1.2);
        assert_eq!(r.length(), 6);
    }

    #[test]
    fn test_frame_range_single_frame_length() {
        let r = range(4, 4, vec![1.0]);
        assert_eq!(r.length(), 1);
    }

    #[test]
    fn test_can_merge_touching_and_gaps() {
        let a = range(0, 10, vec![0.5]);
        let b = range(10, 20, vec![0.5]);
        let c = range(13, 20, vec![0.5]);

        assert!(a.can_merge(&b, 0));
        assert!(!a.can_merge(&c, 0));
        assert!(!a.can_merge(&c, 2));
        assert!(a.can_merge(&c, 3));
    }

    #[test]
    fn test_can_merge_rejects_other_video() {
        let a = range(0, 10, vec![0.5]);
        let b = FrameRange::new(VideoId::new("other.mp4"), 10, 20, vec![0.5], 1.0, 2.0);
        assert!(!a.can_merge(&b, 0));
        assert!(!a.can_merge(&b, 100));
        assert!(a.merge(&b, 0).is_err());
    }

    #[test]
    fn test_merge_builds_new_range() {
        let a = range(0, 10, vec![0.1, 0.2]);
        let b = range(10, 20, vec![0.3]);
        let merged = a.merge(&b, 0).unwrap();

        assert_eq!(merged.start(), 0);
        assert_eq!(merged.end(), 20);
        assert_eq!(merged.start_time(), 0.0);
        assert_eq!(merged.end_time(), 20.0);
        assert_eq!(merged.scores(), &[0.1, 0.2, 0.3]);

        // operands untouched
        assert_eq!(a.scores(), &[0.1, 0.2]);
        assert_eq!(b.start(), 10);
    }

    #[test]
    fn test_merge_rejects_non_adjacent() {
        let a = range(0, 10, vec![0.1]);
        let b = range(15, 20, vec![0.1]);
        match a.merge(&b, 0) {
            Err(DomainError::RangeMismatch(msg)) => assert!(msg.contains("[0-10]")),
            other => panic!("unexpected merge result: {:?}", other),
        }
    }

    #[test]
    fn test_merge_chain_keeps_outer_bounds() {
        let a = range(0, 5, vec![0.1]);
        let b = range(5, 9, vec![0.2]);
        let c = range(9, 14, vec![0.3]);

        assert!(a.can_merge(&b, 0) && b.can_merge(&c, 0));
        let ab = a.merge(&b, 0).unwrap();
        assert!(ab.can_merge(&c, 0));
        let abc = ab.merge(&c, 0).unwrap();
        assert_eq!(abc.start(), a.start());
        assert_eq!(abc.end(), c.end());
    }

    #[test]
    fn test_contains_frame_is_inclusive() {
        let r = range(3, 6, vec![1.0]);
        assert!(!r.contains_frame(2));
        assert!(r.contains_frame(3));
        assert!(r.contains_frame(6));
        assert!(!r.contains_frame(7));
    }

    #[test]
    fn test_is_stable_threshold_is_strict() {
        assert!(!range(0, 1, vec![0.95]).is_stable(DEFAULT_STABLE_THRESHOLD));
        assert!(range(0, 1, vec![0.951]).is_stable(DEFAULT_STABLE_THRESHOLD));
        assert!(range(0, 1, vec![0.99, 0.93]).is_stable(0.95));
        assert!(!range(0, 1, vec![0.99, 0.90]).is_stable(0.95));
    }

    #[test]
    fn test_is_stable_without_scores() {
        assert!(!range(0, 1, vec![]).is_stable(0.0));
    }

    #[test]
    fn test_pick_evenly_skips_end() {
        let r = range(10, 19, vec![1.0]);
        assert_eq!(r.pick(3, false), vec![10, 13, 16]);
        assert_eq!(r.pick(1, false), vec![10]);
        assert_eq!(r.pick(0, false), vec![10]);
    }

    #[test]
    fn test_pick_evenly_repeats_when_count_exceeds_length() {
        let r = range(0, 2, vec![1.0]);
        assert_eq!(r.pick_evenly(5), vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_pick_random_distinct_and_half_open() {
        let r = range(10, 19, vec![1.0]);
        let mut rng = StdRng::seed_from_u64(7);
        let picked = r.pick_random(4, &mut rng);

        assert_eq!(picked.len(), 4);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert!(picked.iter().all(|id| (10..19).contains(id)));
    }

    #[test]
    fn test_pick_random_clamps_to_population() {
        let r = range(10, 13, vec![1.0]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(r.pick_random(10, &mut rng), vec![10, 11, 12]);
    }

    #[test]
    fn test_compress_options_resize_and_gray() {
        let image = DynamicImage::new_rgb8(100, 50);
        let gray = CompressOptions::with_rate(0.2).apply(&image);
        assert_eq!(gray.dimensions(), (20, 10));

        let fixed = CompressOptions {
            compress_rate: 0.5,
            target_size: Some((8, 8)),
        };
        assert_eq!(fixed.apply(&image).dimensions(), (8, 8));
    }

    #[test]
    fn test_range_options_defaults() {
        let options = RangeOptions::default();
        assert_eq!(options.threshold, 0.95);
        assert_eq!(options.range_threshold, None);
        assert_eq!(options.offset, 0);
        assert_eq!(options.limit, 0);
    }

    struct FixedMatcher(f64);

    impl TemplateMatcher for FixedMatcher {
        fn find(&self, _template: &GrayImage, _target: &GrayImage) -> Result<MatchResult, DomainError> {
            Ok(MatchResult {
                position: (0, 0),
                similarity: self.0,
            })
        }
    }

    #[test]
    fn test_contain_image_uses_threshold() {
        let frames = (0..5)
            .map(|_| DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([90]))))
            .collect();
        let mut source = MemoryFrameSource::new(video(), frames, 10.0);
        let template = GrayImage::from_pixel(2, 2, Luma([90]));
        let r = range(1, 5, vec![1.0]);
        let options = ContainOptions::default();

        assert!(r
            .contain_image(&template, &options, &mut source, &FixedMatcher(0.995))
            .unwrap());
        assert!(!r
            .contain_image(&template, &options, &mut source, &FixedMatcher(0.99))
            .unwrap());
    }

    #[test]
    fn test_is_loop_reads_first_frame_for_video_start() {
        let frames = [10u8, 200, 10]
            .iter()
            .map(|&v| DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 16, Luma([v]))))
            .collect();
        let mut source = MemoryFrameSource::new(video(), frames, 10.0);
        let metric = SsimMetric::new();
        let compress = CompressOptions::with_rate(1.0);

        assert!(range(0, 3, vec![0.5])
            .is_loop(0.95, &mut source, &metric, &compress)
            .unwrap());
        assert!(!range(0, 2, vec![0.5])
            .is_loop(0.95, &mut source, &metric, &compress)
            .unwrap());
    }

    #[test]
    fn test_display_shows_bounds() {
        let r = range(1, 4, vec![0.5]);
        assert_eq!(r.to_string(), "<FrameRange [1-4] scores=[0.5]>");
    }
}

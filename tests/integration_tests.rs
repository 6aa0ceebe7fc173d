use std::path::Path;

use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stagecut::adapters::{ImageSequenceSource, PngExporter, SsimMetric};
use stagecut::app::{CutInteractor, ExportInteractor, PickOptions};
use stagecut::*;
use tempfile::TempDir;

/// Test utilities for synthetic frame sequences
mod test_utils {
    use super::*;

    pub const FPS: f64 = 5.0;

    pub fn horizontal_ramp() -> GrayImage {
        GrayImage::from_fn(64, 64, |x, _| Luma([(x * 4) as u8]))
    }

    pub fn vertical_ramp() -> GrayImage {
        GrayImage::from_fn(64, 64, |_, y| Luma([255 - (y * 4) as u8]))
    }

    pub fn noise(rng: &mut StdRng) -> GrayImage {
        GrayImage::from_fn(64, 64, |_, _| Luma([rng.gen()]))
    }

    /// Write frames as `00001.png`, `00002.png`, ...
    pub fn write_frames(dir: &Path, frames: &[GrayImage]) {
        for (index, frame) in frames.iter().enumerate() {
            frame
                .save(dir.join(format!("{:05}.png", index + 1)))
                .unwrap();
        }
    }

    /// 10 frames of one picture, 5 noisy frames, then `tail` frames of `end`
    pub fn three_stage_video(dir: &Path, end: GrayImage, tail: usize) {
        let mut rng = StdRng::seed_from_u64(7);
        let mut frames = vec![horizontal_ramp(); 10];
        frames.extend((0..5).map(|_| noise(&mut rng)));
        frames.extend(std::iter::repeat(end).take(tail));
        write_frames(dir, &frames);
    }

    pub fn interactor(options: RangeOptions) -> CutInteractor {
        let cutter = VideoCutter::new(CutterConfig::default()).unwrap();
        CutInteractor::new(cutter, Box::new(SsimMetric::new()), options)
    }

    pub fn bounds(ranges: &[FrameRange]) -> Vec<(FrameId, FrameId)> {
        ranges.iter().map(|r| (r.start(), r.end())).collect()
    }
}

use test_utils::*;

#[test]
fn test_end_to_end_three_stages() {
    let temp = TempDir::new().unwrap();
    three_stage_video(temp.path(), vertical_ramp(), 10);

    let mut source = ImageSequenceSource::open(temp.path(), FPS).unwrap();
    let report = interactor(RangeOptions::default())
        .execute(&mut source)
        .unwrap();

    assert_eq!(report.frame_count, 25);
    assert_eq!(bounds(&report.unstable), vec![(10, 16)]);
    assert_eq!(bounds(&report.stable), vec![(0, 9), (16, 25)]);

    let unstable = &report.unstable[0];
    assert_eq!(unstable.scores().len(), 6);
    assert!(unstable.scores().iter().all(|score| *score < 0.95));
    assert_eq!(unstable.start_time(), 2.0);
    assert_eq!(unstable.end_time(), 16.0 / FPS);
    assert_eq!(report.stable[1].end_time(), 5.0);
}

#[test]
fn test_loop_filter_removes_return_to_start() {
    let temp = TempDir::new().unwrap();
    three_stage_video(temp.path(), horizontal_ramp(), 10);

    let mut source = ImageSequenceSource::open(temp.path(), FPS).unwrap();
    let without_filter = interactor(RangeOptions::default())
        .execute(&mut source)
        .unwrap();
    assert_eq!(bounds(&without_filter.unstable), vec![(10, 16)]);

    let options = RangeOptions {
        range_threshold: Some(0.95),
        ..RangeOptions::default()
    };
    let with_filter = interactor(options).execute(&mut source).unwrap();
    assert!(with_filter.unstable.is_empty());
    assert_eq!(bounds(&with_filter.stable), vec![(0, 25)]);
}

#[test]
fn test_one_cut_many_classifications() {
    let temp = TempDir::new().unwrap();
    three_stage_video(temp.path(), vertical_ramp(), 10);

    let mut source = ImageSequenceSource::open(temp.path(), FPS).unwrap();
    let interactor = interactor(RangeOptions::default());
    let result = interactor.cut(&mut source).unwrap();
    assert_eq!(result.ranges().len(), 24);

    let limited = RangeOptions {
        limit: 8,
        ..RangeOptions::default()
    };
    let (stable, unstable) = result.get_range(&limited, None).unwrap();
    assert!(unstable.is_empty());
    assert_eq!(bounds(&stable), vec![(0, 25)]);

    let (stable, unstable) = result.get_range(&RangeOptions::default(), None).unwrap();
    assert_eq!(bounds(&unstable), vec![(10, 16)]);
    assert_eq!(bounds(&stable), vec![(0, 9), (16, 25)]);
    assert_eq!(result.ranges().len(), 24);
}

#[test]
fn test_pick_every_stage() {
    let temp = TempDir::new().unwrap();
    let frames_dir = temp.path().join("frames");
    let out = temp.path().join("picked");
    std::fs::create_dir(&frames_dir).unwrap();
    three_stage_video(&frames_dir, vertical_ramp(), 10);

    let mut source = ImageSequenceSource::open(&frames_dir, FPS).unwrap();
    let report = interactor(RangeOptions::default())
        .execute(&mut source)
        .unwrap();
    let stages: Vec<FrameRange> = report
        .stages()
        .into_iter()
        .map(|(_, range)| range.clone())
        .collect();
    assert_eq!(stages.len(), 3);

    let exporter = ExportInteractor::new(Box::new(PngExporter::new()));
    exporter
        .pick_and_save(&stages, &PickOptions::default(), Some(&out), &mut source)
        .unwrap();

    for stage_id in 0..3 {
        let count = std::fs::read_dir(out.join(stage_id.to_string()))
            .unwrap()
            .count();
        assert_eq!(count, 3, "stage {}", stage_id);
    }
}

#[test]
fn test_empty_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("notes.txt"), "not a frame").unwrap();

    let err = ImageSequenceSource::open(temp.path(), FPS).err().unwrap();
    assert!(matches!(err, StageCutError::EmptyInput { .. }));
}

mod test_signals;

use approx::assert_abs_diff_eq;
use eegstream::signal_processing::BandpassFilter;
use eegstream::{EegError, FilterMode, MultiChannelProcessor, ProcessedRecord, ProcessorConfig};

fn new_processor() -> MultiChannelProcessor {
    MultiChannelProcessor::new(&ProcessorConfig::default()).expect("default config is valid")
}

fn run(
    processor: &mut MultiChannelProcessor,
    frames: &[Vec<f32>],
    mode: FilterMode,
) -> Vec<Vec<ProcessedRecord>> {
    frames
        .iter()
        .map(|frame| processor.process_frame(frame, mode).unwrap())
        .collect()
}

#[test]
fn test_identical_input_gives_identical_output() {
    let frames = test_signals::sine_frames(&[3.0, 10.0, 22.0, 45.0], 50.0, 256.0, 2048);

    let mut a = new_processor();
    let mut b = new_processor();
    let out_a = run(&mut a, &frames, FilterMode::Bandpass);
    let out_b = run(&mut b, &frames, FilterMode::Bandpass);

    assert_eq!(out_a, out_b);
}

#[test]
fn test_outlier_does_not_leak_into_other_channels() {
    let frames = test_signals::sine_frames(&[5.0, 8.0, 12.0, 20.0], 20.0, 256.0, 300);
    let mut with_outlier = frames.clone();
    with_outlier[150][0] = 1.0e6;

    for mode in [FilterMode::Bypass, FilterMode::Bandpass] {
        let clean = run(&mut new_processor(), &frames, mode);
        let spiked = run(&mut new_processor(), &with_outlier, mode);

        assert_ne!(clean[150][0], spiked[150][0]);
        for (clean_frame, spiked_frame) in clean.iter().zip(&spiked) {
            assert_eq!(&clean_frame[1..], &spiked_frame[1..]);
        }
    }
}

#[test]
fn test_filter_toggle_resumes_from_frozen_state() {
    let frames = test_signals::sine_frames(&[6.0, 9.0, 15.0, 25.0], 30.0, 256.0, 40);
    let mut processor = new_processor();

    for (i, frame) in frames.iter().enumerate() {
        let mode = if (5..=10).contains(&i) {
            FilterMode::Bypass
        } else {
            FilterMode::Bandpass
        };
        let records = processor.process_frame(frame, mode).unwrap();
        if mode == FilterMode::Bypass {
            let raw: Vec<f32> = records.iter().map(|r| r.filtered_amplitude).collect();
            assert_eq!(&raw, frame);
        }
    }

    // The filters look as if frames 5-10 had never been fed to them
    for channel in 0..4 {
        let mut expected = BandpassFilter::new(256.0, 1.0, 30.0).unwrap();
        for (i, frame) in frames.iter().enumerate() {
            if !(5..=10).contains(&i) {
                expected.process(frame[channel]);
            }
        }
        assert_eq!(processor.channel(channel).unwrap().filter(), &expected);
    }
}

#[test]
fn test_nan_poisons_only_its_channel() {
    let mut processor = new_processor();
    processor
        .process_frame(&[1.0, 2.0, 3.0, 4.0], FilterMode::Bypass)
        .unwrap();
    let records = processor
        .process_frame(&[1.0, f32::NAN, 3.0, 4.0], FilterMode::Bypass)
        .unwrap();

    assert!(records[1].mean.is_nan() && records[1].rms.is_nan());
    for _ in 0..100 {
        let records = processor
            .process_frame(&[1.0, 2.0, 3.0, 4.0], FilterMode::Bandpass)
            .unwrap();
        assert!(records[1].mean.is_nan() && records[1].rms.is_nan());
        for i in [0, 2, 3] {
            assert!(records[i].mean.is_finite() && records[i].rms.is_finite());
        }
    }
}

#[test]
fn test_malformed_frames_leave_state_untouched() {
    let frames = test_signals::sine_frames(&[4.0, 7.0, 11.0, 17.0], 25.0, 256.0, 100);
    let mut processor = new_processor();
    let mut reference = new_processor();

    run(&mut processor, &frames[..50], FilterMode::Bandpass);
    run(&mut reference, &frames[..50], FilterMode::Bandpass);

    for bad in [vec![1.0; 3], vec![1.0; 5], Vec::new()] {
        let err = processor.process_frame(&bad, FilterMode::Bandpass).unwrap_err();
        assert!(matches!(err, EegError::FrameShape { expected: 4, .. }));
    }

    let after = run(&mut processor, &frames[50..], FilterMode::Bandpass);
    let expected = run(&mut reference, &frames[50..], FilterMode::Bandpass);
    assert_eq!(after, expected);
}

#[test]
fn test_bandpass_removes_electrode_offset() {
    let sample_rate = 256.0;
    let config = ProcessorConfig {
        channel_count: 1,
        ..ProcessorConfig::default()
    };
    let signal = test_signals::tone_with_offset(10.0, 40.0, 800.0, sample_rate, 2560);

    let mut filtered = MultiChannelProcessor::new(&config).unwrap();
    let mut raw = MultiChannelProcessor::new(&config).unwrap();
    let mut last_filtered = ProcessedRecord::default();
    let mut last_raw = ProcessedRecord::default();
    for &x in &signal {
        last_filtered = filtered.process_frame(&[x], FilterMode::Bandpass).unwrap()[0];
        last_raw = raw.process_frame(&[x], FilterMode::Bypass).unwrap()[0];
    }

    // The cascade passes 10 Hz at a gain of ~0.0055 and removes the offset
    assert_abs_diff_eq!(last_filtered.mean, 0.0, epsilon = 0.02);
    assert_abs_diff_eq!(last_filtered.rms, 40.0 * 0.0055 / 2.0f32.sqrt(), epsilon = 0.01);

    assert_abs_diff_eq!(last_raw.mean, 800.0, epsilon = 2.0);
    assert_abs_diff_eq!(last_raw.rms, 40.0 / 2.0f32.sqrt(), epsilon = 3.0);
}

#[test]
fn test_constant_stream_statistics_converge() {
    let frames = test_signals::constant_frames(10.0, 4, 2000);
    let mut processor = new_processor();
    let out = run(&mut processor, &frames, FilterMode::Bypass);

    for record in out.last().unwrap() {
        assert_abs_diff_eq!(record.mean, 10.0, epsilon = 0.01);
        assert!(record.rms < 0.1, "rms should approach 0, got {}", record.rms);
    }
}

#[test]
fn test_channels_can_run_on_separate_threads() {
    let frames = test_signals::sine_frames(&[2.0, 9.0, 14.0, 33.0], 60.0, 256.0, 1024);
    let expected = run(&mut new_processor(), &frames, FilterMode::Bandpass);

    let channels = new_processor().into_channels();
    let per_channel: Vec<Vec<ProcessedRecord>> = std::thread::scope(|scope| {
        let handles: Vec<_> = channels
            .into_iter()
            .enumerate()
            .map(|(index, mut channel)| {
                let frames = &frames;
                scope.spawn(move || {
                    frames
                        .iter()
                        .map(|frame| channel.process(frame[index], FilterMode::Bandpass))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (frame_index, frame_records) in expected.iter().enumerate() {
        for (channel, record) in frame_records.iter().enumerate() {
            assert_eq!(*record, per_channel[channel][frame_index]);
        }
    }
}

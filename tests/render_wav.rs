use std::path::PathBuf;

use sine_rs::Parameters;
use sine_rs::audio::render::render_to_wav;
use sine_rs::ui::progress::RenderProgress;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("sine-rs-{}", std::process::id()))
        .join(name)
}

#[test]
fn renders_requested_duration_to_s32_wav() {
    let path = scratch_path("tone.wav");
    let params = Parameters {
        frequency: 1000.0,
        volume: 0.5,
    };
    let progress = RenderProgress::hidden(4800).unwrap();

    // 4800 frames in 1000-frame cycles: four full cycles and one of 800
    let summary = render_to_wav(&path, params, 0.1, 1000, &progress).unwrap();
    assert_eq!(summary.frames, 4800);
    assert_eq!(summary.cycles, 5);
    assert_eq!(progress.position(), 4800);

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i32> = reader.into_samples::<i32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 4800);

    // the tone repeats every 48 samples
    for (a, b) in samples.iter().zip(samples.iter().skip(48)).take(1000) {
        assert!((a - b).abs() <= 64, "{a} vs {b}");
    }
    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
    assert!((peak as f64 - 0.5 * i32::MAX as f64).abs() < 2.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn render_matches_live_stream_samples() {
    let path = scratch_path("match.wav");
    let params = Parameters {
        frequency: 440.0,
        volume: 0.25,
    };
    let progress = RenderProgress::hidden(480).unwrap();
    render_to_wav(&path, params, 0.01, 128, &progress).unwrap();

    let mut osc = sine_rs::SignalGenerator::new(params, 48000);
    let expected: Vec<i32> = (0..480).map(|_| osc.next_sample()).collect();

    let rendered: Vec<i32> = hound::WavReader::open(&path)
        .unwrap()
        .into_samples::<i32>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(rendered, expected);

    std::fs::remove_file(&path).ok();
}

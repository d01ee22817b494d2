// tests/integration_tests.rs
// End-to-end rendering tests: text in, WAV file out, read back and checked

use anyhow::Result;
use hound::{SampleFormat, WavReader};
use morsetone::sequencer::{self, SequencerStep};
use morsetone::{RenderConfig, Tuning, render_text, write_wav};
use rustfft::{FftPlanner, num_complex::Complex};
use std::path::PathBuf;

#[derive(Debug)]
struct TestCase {
    name: &'static str,
    text: &'static str,
    tempo: f64,
    sample_rate: u32,
    trailing_gaps: usize,
    motif: &'static str,
    expected_dits: u64,
}

const TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "simple_sos",
        text: "SOS",
        tempo: 160.0,
        sample_rate: 44100,
        trailing_gaps: 2,
        motif: "1:A5",
        expected_dits: 32,
    },
    TestCase {
        name: "hello_world",
        text: "HELLO WORLD",
        tempo: 120.0,
        sample_rate: 22050,
        trailing_gaps: 0,
        motif: "8:C5 8:D5 8:E5 8:G5 8:C6",
        expected_dits: 94,
    },
    TestCase {
        name: "numbers",
        text: "12345",
        tempo: 150.0,
        sample_rate: 8000,
        trailing_gaps: 1,
        motif: "4:440 4:880 4:660",
        expected_dits: 74,
    },
    TestCase {
        name: "unmapped_dropped",
        text: "a#b",
        tempo: 160.0,
        sample_rate: 48000,
        trailing_gaps: 0,
        motif: "1:F#4",
        expected_dits: 16,
    },
    TestCase {
        name: "empty_text",
        text: "",
        tempo: 160.0,
        sample_rate: 44100,
        trailing_gaps: 0,
        motif: "1:A4",
        expected_dits: 0,
    },
];

fn scratch_path(name: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("morsetone_test_outputs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{name}.wav")))
}

fn run_single_test(test_case: &TestCase) -> Result<()> {
    let tuning = Tuning::default();
    let config = RenderConfig {
        trailing_word_gaps: test_case.trailing_gaps,
        ..RenderConfig::from_tempo(test_case.sample_rate, test_case.tempo, &tuning)
    };
    let motif = sequencer::parse_motif(test_case.motif, &tuning)?;

    let samples = render_text(test_case.text, motif, &config)?;
    assert_eq!(
        samples.len(),
        config.samples_at(test_case.expected_dits),
        "{}: sample count",
        test_case.name
    );

    let wav_path = scratch_path(test_case.name)?;
    write_wav(&wav_path, config.sample_rate, &samples)?;

    let mut reader = WavReader::open(&wav_path)?;
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, test_case.sample_rate);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);

    let read_back: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;
    assert_eq!(read_back, samples, "{}: samples round-trip", test_case.name);

    let file_len = std::fs::metadata(&wav_path)?.len();
    assert_eq!(file_len, 44 + 2 * samples.len() as u64);

    std::fs::remove_file(&wav_path).ok();
    Ok(())
}

#[test]
fn run_rendering_test_suite() -> Result<()> {
    env_logger::try_init().ok();

    for test_case in TEST_CASES {
        println!("Running test: {}", test_case.name);
        run_single_test(test_case)?;
    }
    Ok(())
}

fn dominant_frequency(samples: &[i16], sample_rate: u32) -> f64 {
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);

    let (peak_bin, _) = buffer[1..buffer.len() / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm_sqr()))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
    peak_bin as f64 * sample_rate as f64 / samples.len() as f64
}

#[test]
fn test_pitch_follows_motif() -> Result<()> {
    let sample_rate = 8000;
    let config = RenderConfig {
        trailing_word_gaps: 0,
        fade_seconds: 0.0,
        ..RenderConfig::from_tempo(sample_rate, 150.0, &Tuning::default())
    };
    let motif = vec![
        SequencerStep::new(8, 500.0),
        SequencerStep::new(8, 1000.0),
        SequencerStep::hold(800.0),
    ];

    // Six dashes, two per step; each dash is 4 dits = 1600 samples apart.
    let samples = render_text("TTTTTT", motif, &config)?;
    assert_eq!(samples.len(), 6 * 1600);

    let dash_len = 1200;
    for (dash, expected_hz) in [500.0, 500.0, 1000.0, 1000.0, 800.0, 800.0]
        .into_iter()
        .enumerate()
    {
        let start = dash * 1600;
        let tone = &samples[start..start + dash_len];
        let measured = dominant_frequency(tone, sample_rate);
        let resolution = sample_rate as f64 / dash_len as f64;
        assert!(
            (measured - expected_hz).abs() <= resolution,
            "dash {dash}: expected {expected_hz} Hz, measured {measured:.1} Hz"
        );
        assert!(samples[start + dash_len..start + 1600].iter().all(|&s| s == 0));
    }
    Ok(())
}

#[test]
fn test_long_message_does_not_drift() -> Result<()> {
    let config = RenderConfig::default();
    let text = "stop radioactivity ".repeat(8);
    let motif = sequencer::arpeggio();

    let samples = render_text(&text, motif, &config)?;
    let symbols = morsetone::from_morse_string(&morsetone::text_to_morse(
        &text,
        config.trailing_word_gaps,
    ));
    let dits = morsetone::morse::total_dits(&symbols);
    assert_eq!(samples.len(), config.samples_at(dits));
    Ok(())
}

#[test]
fn test_invalid_note_in_motif() {
    let result = sequencer::parse_motif("8:C5 8:Q5", &Tuning::default());
    assert!(matches!(result, Err(morsetone::RenderError::InvalidNote(_))));
}

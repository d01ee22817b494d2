// src/wav.rs
// 16-bit mono PCM WAV output

use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{Cursor, Seek, Write};
use std::path::Path;

pub const BITS_PER_SAMPLE: u16 = 16;
pub const CHANNELS: u16 = 1;
pub const HEADER_LEN: usize = 44;

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(mut writer: WavWriter<W>, samples: &[i16]) -> Result<()> {
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write `samples` to a WAV file at `path`.
pub fn write_wav<P: AsRef<Path>>(path: P, sample_rate: u32, samples: &[i16]) -> Result<()> {
    let writer = WavWriter::create(path.as_ref(), wav_spec(sample_rate))?;
    write_samples(writer, samples)?;
    log::info!("Wrote {} samples to {:?}", samples.len(), path.as_ref());
    Ok(())
}

/// Encode `samples` as an in-memory WAV file.
pub fn encode_wav(sample_rate: u32, samples: &[i16]) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::with_capacity(HEADER_LEN + samples.len() * 2));
    write_samples(WavWriter::new(&mut buf, wav_spec(sample_rate))?, samples)?;
    Ok(buf.into_inner())
}

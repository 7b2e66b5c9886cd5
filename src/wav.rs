use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::Result;

/// Read the first channel of a WAV file as `f64` samples
///
/// Integer formats are scaled to `[-1, 1)`. Returns the samples and the
/// file's sample rate.
pub fn read_wav_mono<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, u32)> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_f64.powi(spec.bits_per_sample as i32 - 1);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    if channels > 1 {
        log::info!(
            "{}: using first of {} channels",
            path.as_ref().display(),
            channels
        );
    }

    let samples = interleaved.into_iter().step_by(channels).collect();
    Ok((samples, spec.sample_rate))
}

/// Write mono 32-bit float samples to a WAV file
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}

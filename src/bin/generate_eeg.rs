use anyhow::{Context, Result};
use clap::Parser;
use eegstream::save_wav;
use eegstream::simulation::{Rhythm, SyntheticEegConfig, generate_noisy_eeg};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_eeg")]
#[command(about = "Generate synthetic multichannel EEG WAV files for pipeline testing")]
struct Args {
    /// TOML signal configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output WAV file
    #[arg(short, long, default_value = "synthetic_eeg.wav")]
    output: PathBuf,

    /// Rhythms as comma-separated "freq_hz:amplitude_uv" pairs (e.g., "10:40,20:10")
    #[arg(short, long)]
    rhythms: Option<String>,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Signal duration in seconds (CLI override)
    #[arg(short, long)]
    duration: Option<f32>,

    /// Number of channels (CLI override)
    #[arg(long)]
    channels: Option<usize>,

    /// Sample rate in Hz (CLI override)
    #[arg(long)]
    sample_rate: Option<f32>,

    /// Gaussian noise standard deviation in microvolts (CLI override)
    #[arg(long)]
    noise: Option<f32>,

    /// Write the effective configuration next to the WAV file as JSON
    #[arg(long)]
    manifest: bool,
}

fn parse_rhythms(s: &str) -> Result<Vec<Rhythm>> {
    s.split(',')
        .map(|pair| {
            let (freq, amplitude) = pair
                .trim()
                .split_once(':')
                .context("Invalid rhythm format. Use 'freq_hz:amplitude_uv'")?;
            Ok(Rhythm {
                frequency_hz: freq.trim().parse().context("Invalid rhythm frequency")?,
                amplitude_uv: amplitude.trim().parse().context("Invalid rhythm amplitude")?,
            })
        })
        .collect()
}

fn load_toml_config(path: &PathBuf) -> Result<SyntheticEegConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_config(args: &Args) -> Result<SyntheticEegConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        SyntheticEegConfig::default()
    };

    if let Some(ref rhythms) = args.rhythms {
        config.rhythms = parse_rhythms(rhythms)?;
    }
    if let Some(duration) = args.duration {
        config.duration_secs = duration;
    }
    if let Some(channels) = args.channels {
        config.channel_count = channels;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate_hz = sample_rate;
    }
    if let Some(noise) = args.noise {
        config.noise_std_uv = noise;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if config.channel_count == 0 || config.channel_count > u16::MAX as usize {
        anyhow::bail!("Channel count must be between 1 and {}", u16::MAX);
    }
    if config.sample_rate_hz.is_nan() || config.sample_rate_hz < 1.0 {
        anyhow::bail!("Sample rate must be at least 1 Hz");
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = build_config(&args)?;

    let signal = generate_noisy_eeg(&config);
    let output = args
        .output
        .to_str()
        .context("Output path is not valid UTF-8")?;

    save_wav(
        output,
        &signal,
        config.channel_count as u16,
        config.sample_rate_hz.round() as u32,
    )
    .context("Failed to write WAV file")?;

    if args.manifest {
        let manifest_path = args.output.with_extension("json");
        let manifest_json =
            serde_json::to_string_pretty(&config).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} frames x {} channels in {}",
        config.frame_count(),
        config.channel_count,
        args.output.display()
    );
    Ok(())
}

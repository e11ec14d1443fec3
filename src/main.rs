use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use eegstream::output::{Formatter, FrameOutput, OutputFormat, create_formatter};
use eegstream::source::{DelimitedSource, SampleSource, WavFileSource};
use eegstream::{FilterMode, MultiChannelProcessor, ProcessorConfig, save_wav};

#[derive(Parser, Debug)]
#[command(name = "eegstream")]
#[command(about = "Bandpass filter EEG sample streams and track running mean/RMS per channel", long_about = None)]
struct Args {
    /// Input files: WAV recordings or delimited text, "-" for stdin
    #[arg(default_value = "-")]
    inputs: Vec<PathBuf>,

    /// TOML processor configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter mode: bypass, bandpass
    #[arg(long, value_enum)]
    filter: Option<FilterMode>,

    /// Number of channels per frame
    #[arg(long)]
    channels: Option<usize>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<f32>,

    /// Bandpass lower corner in Hz
    #[arg(long)]
    low_corner: Option<f32>,

    /// Bandpass upper corner in Hz
    #[arg(long)]
    high_corner: Option<f32>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print every Nth frame
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Print per-channel amplitude summary to stderr
    #[arg(long)]
    summary: bool,

    /// Write filtered amplitudes to a multichannel WAV file
    #[arg(long)]
    dump_filtered: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_config(args: &Args) -> anyhow::Result<ProcessorConfig> {
    let mut config = match args.config {
        Some(ref path) => ProcessorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ProcessorConfig::default(),
    };

    if let Some(filter) = args.filter {
        config.filter_mode = filter;
    }
    if let Some(channels) = args.channels {
        config.channel_count = channels;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate_hz = sample_rate;
    }
    if let Some(low) = args.low_corner {
        config.low_corner_hz = low;
    }
    if let Some(high) = args.high_corner {
        config.high_corner_hz = high;
    }

    config.validate()?;
    Ok(config)
}

fn open_source(path: &Path, config: &ProcessorConfig) -> anyhow::Result<Box<dyn SampleSource>> {
    if path == Path::new("-") {
        let stdin = io::BufReader::new(io::stdin());
        return Ok(Box::new(DelimitedSource::new(stdin, config.channel_count)));
    }

    let is_wav = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if is_wav {
        let source = WavFileSource::new(path, config.channel_count)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        if (source.sample_rate() as f32 - config.sample_rate_hz).abs() > 0.5 {
            log::warn!(
                "{} is sampled at {} Hz but the filter is designed for {} Hz",
                path.display(),
                source.sample_rate(),
                config.sample_rate_hz
            );
        }
        Ok(Box::new(source))
    } else {
        let source = DelimitedSource::open(path, config.channel_count)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Box::new(source))
    }
}

struct RunState {
    frame_index: u64,
    summaries: Vec<Stats<f32>>,
    filtered: Vec<f32>,
}

fn process_input(
    path: &Path,
    args: &Args,
    config: &ProcessorConfig,
    processor: &mut MultiChannelProcessor,
    formatter: &dyn Formatter,
    state: &mut RunState,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut source = open_source(path, config)?;
    let mode = processor.default_mode();
    let every = args.every.max(1);

    while let Some(frame) = source
        .next_frame()
        .with_context(|| format!("Failed to read {}", path.display()))?
    {
        let records = processor.process_frame(&frame, mode)?;

        for (stats, record) in state.summaries.iter_mut().zip(&records) {
            if record.filtered_amplitude.is_finite() {
                stats.update(record.filtered_amplitude);
            }
        }
        if args.dump_filtered.is_some() {
            state
                .filtered
                .extend(records.iter().map(|r| r.filtered_amplitude));
        }

        if state.frame_index % every == 0 {
            let line = formatter.format(&FrameOutput {
                frame_index: state.frame_index,
                records: &records,
            });
            writeln!(out, "{}", line)?;
        }
        state.frame_index += 1;
    }

    for (i, channel) in processor.channels().iter().enumerate() {
        if channel.statistics().is_poisoned() {
            log::warn!(
                "{}: statistics for {} poisoned by a non-finite sample",
                path.display(),
                config.channel_label(i)
            );
        }
    }

    Ok(())
}

/// WAV headers store the channel count as `u16`
fn wav_channel_count(channel_count: usize) -> anyhow::Result<u16> {
    u16::try_from(channel_count).with_context(|| {
        format!(
            "{} channels cannot be written to a WAV file (limit {})",
            channel_count,
            u16::MAX
        )
    })
}

fn print_summary(labels: &[String], summaries: &[Stats<f32>]) {
    eprintln!();
    eprintln!("Filtered amplitude summary:");
    for (label, stats) in labels.iter().zip(summaries) {
        if stats.count == 0 {
            eprintln!("  {:>6}: no finite samples", label);
            continue;
        }
        eprintln!(
            "  {:>6}: n={} mean={:.2} std={:.2} min={:.2} max={:.2}",
            label, stats.count, stats.mean, stats.std_dev, stats.min, stats.max
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = build_config(&args)?;
    let wav_channels = match args.dump_filtered {
        Some(_) => wav_channel_count(config.channel_count)?,
        None => 0,
    };
    let labels = config.channel_labels();
    let mut processor = MultiChannelProcessor::new(&config)?;
    let formatter = create_formatter(args.format, labels.clone());

    log::info!(
        "Processing {} channels at {} Hz, filter {} ({}-{} Hz)",
        config.channel_count,
        config.sample_rate_hz,
        config.filter_mode,
        config.low_corner_hz,
        config.high_corner_hz
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Some(header) = formatter.header() {
        writeln!(out, "{}", header)?;
    }

    let mut state = RunState {
        frame_index: 0,
        summaries: (0..config.channel_count).map(|_| Stats::new()).collect(),
        filtered: Vec::new(),
    };

    for path in &args.inputs {
        log::info!("Reading {}", path.display());
        // Each input is a separate recording
        processor.reset();
        process_input(
            path,
            &args,
            &config,
            &mut processor,
            formatter.as_ref(),
            &mut state,
            &mut out,
        )?;
    }
    out.flush()?;

    if args.summary {
        print_summary(&labels, &state.summaries);
    }

    if let Some(ref dump_path) = args.dump_filtered {
        let filename = dump_path
            .to_str()
            .context("Dump path is not valid UTF-8")?;
        save_wav(
            filename,
            &state.filtered,
            wav_channels,
            config.sample_rate_hz.round() as u32,
        )
        .context("Failed to write filtered WAV")?;
        log::info!("Filtered amplitudes written to {}", dump_path.display());
    }

    Ok(())
}

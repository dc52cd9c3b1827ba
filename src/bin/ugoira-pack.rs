use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use ugoira_pack::{
    DEFAULT_FRAME_TARGET, FfmpegLogLevel, FrameArchive, OperationType, PackOptions,
    ProgressCallback, ProgressInfo, SamplePlan, VideoSource, set_ffmpeg_log_level,
};

const CLI_AFTER_HELP: &str = "Examples:\n  ugoira-pack pack input.mp4 --size 960 --quality 3 --out archives\n  ugoira-pack pack input.mp4 --progress --json\n  ugoira-pack probe input.mp4 --json\n  ugoira-pack completions zsh > _ugoira-pack";

#[derive(Debug, Parser)]
#[command(
    name = "ugoira-pack",
    version,
    about = "Split a video into JPEG frames and pack them into a ZIP archive",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long)]
    progress: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pack sampled video frames into a ZIP archive.
    #[command(
        about = "Pack sampled video frames into a ZIP archive",
        after_help = "Examples:\n  ugoira-pack pack input.mp4\n  ugoira-pack pack input.mp4 --size 1280 --quality 5 --out archives --progress"
    )]
    Pack {
        /// Input video path.
        input: String,

        /// Target size in pixels for the long edge of each frame.
        #[arg(long, default_value_t = 960)]
        size: u32,

        /// Quality code (FFmpeg-style qscale: 2 is best, 31 is worst).
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=31))]
        quality: u8,

        /// Output directory for the archive.
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Frame budget (sample-rate target and hard cap on output count).
        #[arg(long, default_value_t = DEFAULT_FRAME_TARGET)]
        frames: u32,

        /// Print the summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print source metadata and the computed sampling plan (alias: info).
    #[command(
        about = "Print source metadata and the sampling plan",
        visible_alias = "info",
        after_help = "Examples:\n  ugoira-pack probe input.mp4\n  ugoira-pack probe input.mp4 --json"
    )]
    Probe {
        /// Input video path.
        input: String,

        /// Output as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = &global.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        set_ffmpeg_log_level(parsed);
    }
    Ok(())
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            if self.bar.length() != Some(total) {
                self.bar.set_length(total);
            }
        }
        self.bar.set_message(match info.operation {
            OperationType::FrameSampling => "sampling",
            OperationType::ArchiveAssembly => "packing",
            _ => "working",
        });
        self.bar.set_position(info.current);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global)?;

    match cli.command {
        Commands::Pack {
            input,
            size,
            quality,
            out,
            frames,
            json,
        } => {
            let mut options = PackOptions::new()
                .with_long_edge(size)
                .with_quality_code(quality)
                .with_frame_target(frames);

            let progress = if cli.global.progress {
                let progress = Arc::new(TerminalProgress::new()?);
                options = options.with_progress(progress.clone());
                Some(progress)
            } else {
                None
            };

            let mut source = VideoSource::open(&input)?;

            if cli.global.verbose {
                let metadata = source.metadata();
                eprintln!(
                    "source: {} ({:.2}s)",
                    metadata.format,
                    metadata.duration.as_secs_f64()
                );
                if let Some(video) = &metadata.video {
                    eprintln!(
                        "video: {}x{} @ {:.2} fps [{}]",
                        video.width, video.height, video.frames_per_second, video.codec,
                    );
                }
            }

            let frame_set = source.sampler().collect(&options)?;
            let archive = FrameArchive::assemble(&frame_set, &options)?;

            if let Some(progress) = progress {
                progress.bar.finish_and_clear();
            }

            if frame_set.truncated() {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    format!(
                        "sampling produced {} outputs; kept the first {}",
                        frame_set.plan.raw_count,
                        frame_set.len()
                    )
                    .yellow()
                );
            }

            let target_path = out.join(&archive.summary.archive_name);
            ensure_writable_path(&target_path, cli.global.overwrite)?;
            std::fs::create_dir_all(&out)?;
            std::fs::write(&target_path, &archive.bytes)?;

            let summary = &archive.summary;
            if json {
                let payload = json!({
                    "frame_count": summary.frame_count,
                    "width": summary.width,
                    "height": summary.height,
                    "quality": summary.quality_label,
                    "total_bytes": summary.total_bytes,
                    "size_mb": format!("{:.2}", summary.size_megabytes()),
                    "truncated": summary.truncated,
                    "archive": summary.archive_name,
                    "path": target_path.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!(
                        "Packed {} frame(s) into {}",
                        summary.frame_count,
                        target_path.display()
                    )
                    .green()
                );
                println!("Image size: {}x{}px", summary.width, summary.height);
                println!("Quality: {}", summary.quality_label);
                println!("Archive size: {:.2}MB", summary.size_megabytes());
                println!("File name: {}", summary.archive_name);
            }
        }
        Commands::Probe { input, json } => {
            let source = VideoSource::open(&input)?;
            let metadata = source.metadata();
            let plan = SamplePlan::for_duration(metadata.duration, DEFAULT_FRAME_TARGET).ok();

            if json {
                let payload = json!({
                    "format": metadata.format,
                    "duration_seconds": metadata.duration.as_secs_f64(),
                    "video": metadata.video.as_ref().map(|video| json!({
                        "width": video.width,
                        "height": video.height,
                        "fps": video.frames_per_second,
                        "frame_count": video.frame_count,
                        "codec": video.codec,
                    })),
                    "plan": plan.map(|plan| json!({
                        "sample_rate": plan.sample_rate,
                        "raw_count": plan.raw_count,
                        "emit_count": plan.emit_count,
                        "truncated": plan.truncated,
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Format: {}", metadata.format);
                println!("Duration: {:.2}s", metadata.duration.as_secs_f64());
                if let Some(video) = &metadata.video {
                    println!(
                        "Video: {}x{} @ {:.2} fps [{}]",
                        video.width, video.height, video.frames_per_second, video.codec,
                    );
                }
                match plan {
                    Some(plan) => println!(
                        "Plan: {} fps -> {} output(s), {} emitted{}",
                        plan.sample_rate,
                        plan.raw_count,
                        plan.emit_count,
                        if plan.truncated { " (truncated)" } else { "" },
                    ),
                    None => println!("Plan: unavailable (zero or unknown duration)"),
                }
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use image_to_palette_wasm::{PaletteConfig, PaletteEntry, extract_palette_bytes, save_strip};
use serde::Serialize;
use tracing::{Level, info, warn};

/// Print the dominant colors of images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Side of the square analysis raster
    #[arg(short = 's', long)]
    analysis_size: Option<u32>,

    /// JSON file with extraction and strip settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report per input instead of hex lists
    #[arg(long)]
    json: bool,

    /// Save a `<stem>_palette.png` strip for each input into this directory
    #[arg(short = 'd', long)]
    strip_dir: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a Path,
    colors: Vec<ReportColor>,
}

#[derive(Serialize)]
struct ReportColor {
    hex: String,
    rgb: [f32; 3],
    bucket: u16,
    count: u64,
}

impl From<&PaletteEntry> for ReportColor {
    fn from(entry: &PaletteEntry) -> Self {
        let c = entry.color();
        Self {
            hex: entry.hex(),
            rgb: [c.red, c.green, c.blue],
            bucket: entry.bucket.key(),
            count: entry.count,
        }
    }
}

fn load_config(args: &Args) -> Result<PaletteConfig> {
    let mut config = match &args.config {
        Some(path) => PaletteConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PaletteConfig::default(),
    };
    if let Some(k) = args.top_k {
        config.top_k = k;
    }
    if let Some(size) = args.analysis_size {
        config.analysis_width = size;
        config.analysis_height = size;
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn strip_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{stem}_palette.png"))
}

fn process(input: &Path, args: &Args, config: &PaletteConfig, out: &mut impl Write) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let entries = extract_palette_bytes(&bytes, config).context("palette extraction failed")?;

    if args.json {
        let report = Report {
            source: input,
            colors: entries.iter().map(ReportColor::from).collect(),
        };
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        let hex: Vec<String> = entries.iter().map(PaletteEntry::hex).collect();
        writeln!(out, "{}: {}", input.display(), hex.join(" "))?;
    }

    if let Some(dir) = &args.strip_dir {
        if entries.is_empty() {
            warn!("{}: empty palette, no strip saved", input.display());
            return Ok(());
        }
        fs::create_dir_all(dir)?;
        let out_path = strip_path(dir, input);
        let (w, h) = config.strip_size();
        save_strip(&entries, &out_path, w, h)?;
        info!("Saved → {}", out_path.display());
    }

    Ok(())
}

/// Process every input, logging failures. Returns the number that failed.
fn run(args: &Args, config: &PaletteConfig, out: &mut impl Write) -> usize {
    let mut failed = 0usize;
    for input in &args.inputs {
        if let Err(e) = process(input, args, config, out) {
            warn!("{}: {e:#}", input.display());
            failed += 1;
        }
    }
    failed
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;

    let failed = run(&args, &config, &mut io::stdout().lock());
    if failed > 0 {
        warn!("{failed} of {} inputs failed", args.inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

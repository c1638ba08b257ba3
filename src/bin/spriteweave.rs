use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use spriteweave::RenderOptions;

#[derive(Parser, Debug)]
#[command(name = "spriteweave", version)]
struct Cli {
    /// Unit id whose assets to reassemble.
    unit_id: u32,

    /// Animation name; omit to process every sequence found for the unit.
    #[arg(short = 'a', long = "anim")]
    anim: Option<String>,

    /// Columns in the output sheet (0 = single-row strip).
    #[arg(short = 'c', long, default_value_t = 0)]
    columns: u32,

    /// Keep steps that render no visible content.
    #[arg(short = 'e', long = "include-empty")]
    include_empty: bool,

    /// Input directory holding the atlas and metadata files.
    #[arg(short = 'i', long = "input", default_value = ".")]
    input: PathBuf,

    /// Output directory.
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,

    /// Also write a JSON sidecar with layout metadata.
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Also write an animated GIF.
    #[arg(short = 'g', long = "gif")]
    gif: bool,

    /// Verbose diagnostics.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "spriteweave=debug" } else { "spriteweave=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let frames_path = cli.input.join(format!("unit_cgg_{}.csv", cli.unit_id));
    let frame_text = fs::read_to_string(&frames_path)
        .with_context(|| format!("read frame list '{}'", frames_path.display()))?;
    let frames = spriteweave::decode_frames(&frame_text)?;

    let atlas_path = cli.input.join(format!("unit_anime_{}.png", cli.unit_id));
    let atlas = image::open(&atlas_path)
        .with_context(|| format!("read atlas '{}'", atlas_path.display()))?
        .to_rgba8();

    let sequence_paths = match &cli.anim {
        Some(name) => vec![
            cli.input
                .join(format!("unit_{name}_cgs_{}.csv", cli.unit_id)),
        ],
        None => discover_sequences(&cli.input, cli.unit_id)?,
    };
    if sequence_paths.is_empty() {
        anyhow::bail!(
            "no sequence files found for unit {} in '{}'",
            cli.unit_id,
            cli.input.display()
        );
    }

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("create output dir '{}'", cli.output.display()))?;

    let options = RenderOptions {
        columns: cli.columns,
        include_empty: cli.include_empty,
    };

    for path in &sequence_paths {
        process_sequence(path, &atlas, &frames, &options, &cli)?;
    }
    Ok(())
}

/// Find every `unit_<anim>_cgs_<id>.csv` in the input directory, sorted for
/// deterministic processing order.
fn discover_sequences(dir: &Path, unit_id: u32) -> anyhow::Result<Vec<PathBuf>> {
    let suffix = format!("_cgs_{unit_id}.csv");
    let mut paths = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("scan input dir '{}'", dir.display()))?
    {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with("unit_") && name.ends_with(&suffix) {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Output stem for a sequence file: `unit_idle_cgs_123.csv` becomes
/// `unit_idle_123`.
fn output_stem(sequence_path: &Path) -> anyhow::Result<String> {
    let stem = sequence_path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("sequence path '{}' has no stem", sequence_path.display()))?;
    let (action, uid) = stem.split_once("_cgs_").with_context(|| {
        format!("sequence file name '{stem}' does not contain '_cgs_'")
    })?;
    Ok(format!("{action}_{uid}"))
}

fn process_sequence(
    sequence_path: &Path,
    atlas: &image::RgbaImage,
    frames: &[Option<spriteweave::Frame>],
    options: &RenderOptions,
    cli: &Cli,
) -> anyhow::Result<()> {
    let sequence_text = fs::read_to_string(sequence_path)
        .with_context(|| format!("read sequence '{}'", sequence_path.display()))?;

    let rendered = spriteweave::render_animation(atlas, frames, &sequence_text, options)
        .with_context(|| format!("render '{}'", sequence_path.display()))?;

    let stem = output_stem(sequence_path)?;

    let png_path = cli.output.join(format!("{stem}.png"));
    image::save_buffer_with_format(
        &png_path,
        rendered.sheet.as_raw(),
        rendered.sheet.width(),
        rendered.sheet.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", png_path.display()))?;
    eprintln!("wrote {}", png_path.display());

    if cli.json {
        let json_path = cli.output.join(format!("{stem}.json"));
        fs::write(&json_path, rendered.sidecar().to_json()?)
            .with_context(|| format!("write json '{}'", json_path.display()))?;
        eprintln!("wrote {}", json_path.display());
    }

    if cli.gif {
        let gif_path = cli.output.join(format!("{stem}.gif"));
        spriteweave::write_animated_gif(&gif_path, &rendered.frames, &rendered.frame_delays)
            .with_context(|| format!("write gif '{}'", gif_path.display()))?;
        eprintln!("wrote {}", gif_path.display());
    }

    Ok(())
}

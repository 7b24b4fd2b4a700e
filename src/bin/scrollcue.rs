use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scrollcue::{ElementBounds, Millis, Scene};

#[derive(Parser, Debug)]
#[command(name = "scrollcue", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a scene description.
    Validate(ValidateArgs),
    /// Replay a scene against a synthetic scroll sweep and dump every frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (array of frame outputs).
    #[arg(long)]
    out: PathBuf,

    /// Viewport height in px.
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,

    /// Scroll advance per tick in px.
    #[arg(long = "step-px", default_value_t = 40.0)]
    step_px: f64,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Milliseconds per tick.
    #[arg(long = "tick-ms", default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<Scene> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scene: Scene = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(scene)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    scene.validate()?;

    let steps: usize = scene.sections.iter().map(|s| s.steps.len()).sum();
    let parallax: usize = scene.sections.iter().map(|s| s.parallax.len()).sum();
    eprintln!(
        "ok: {} sections, {} steps, {} parallax layers, {} extra targets",
        scene.sections.len(),
        steps,
        parallax,
        scene.targets.len()
    );
    Ok(())
}

/// Fraction of the section intersecting the viewport at `offset_y`.
fn intersection_ratio(offset_y: f64, viewport_height: f64, bounds: ElementBounds) -> f64 {
    let view_top = offset_y;
    let view_bottom = offset_y + viewport_height;
    let overlap = bounds.bottom().min(view_bottom) - bounds.top.max(view_top);
    (overlap / bounds.height).clamp(0.0, 1.0)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let mut stage = scene.build_stage(args.viewport)?;

    let mut outputs = Vec::with_capacity(args.frames as usize);
    for i in 0..args.frames {
        let now = Millis(i * args.tick_ms);
        let offset_y = i as f64 * args.step_px;

        stage.on_scroll(offset_y, args.viewport);
        for section in &scene.sections {
            let ratio = intersection_ratio(offset_y, args.viewport, section.bounds);
            stage.on_intersection(&section.id, ratio, now);
        }
        outputs.push(stage.frame(now));
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("write frames '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(f, &outputs).with_context(|| "serialize frame outputs")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

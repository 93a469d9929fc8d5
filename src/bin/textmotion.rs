use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use textmotion::{
    GridLayout, MotionConfig, MotionRenderer, MotionValidator, QUAD_VERTS, TextLayoutHost,
    VisibleWindow, parse_markup,
};

#[derive(Parser, Debug)]
#[command(name = "textmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve markup and print the clean text, ranges and actions as JSON.
    Parse(ParseArgs),
    /// Drive a renderer over a grid layout and print one JSON line per pass.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TextInput {
    /// Marked-up text.
    #[arg(long)]
    text: Option<String>,

    /// File holding marked-up text.
    #[arg(long)]
    text_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    #[command(flatten)]
    input: TextInput,

    /// Renderer config JSON (profile, frame rate, window).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: TextInput,

    /// Renderer config JSON (profile, frame rate, window).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of `tick` calls.
    #[arg(long, default_value_t = 24)]
    frames: u64,

    /// Real seconds fed per tick.
    #[arg(long, default_value_t = 1.0 / 24.0)]
    dt: f64,

    /// Reveal characters at this many per second instead of the configured window.
    #[arg(long)]
    reveal_rate: Option<f64>,

    /// Include presented glyph quads in each line.
    #[arg(long)]
    dump_glyphs: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Parse(args) => cmd_parse(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_text(input: &TextInput) -> anyhow::Result<String> {
    match (&input.text, &input.text_file) {
        (Some(t), _) => Ok(t.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read text file '{}'", path.display())),
        (None, None) => anyhow::bail!("one of --text or --text-file is required"),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MotionConfig> {
    let Some(path) = path else {
        return Ok(MotionConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    MotionConfig::from_reader(BufReader::new(f))
        .with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let text = read_text(&args.input)?;
    let cfg = load_config(args.config.as_deref())?;
    let profile = cfg.build_profile()?;

    let result = parse_markup(&text, &MotionValidator::new(Some(&profile)));
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !args.dt.is_finite() || args.dt <= 0.0 {
        anyhow::bail!("--dt must be finite and > 0");
    }
    if let Some(r) = args.reveal_rate
        && (!r.is_finite() || r <= 0.0)
    {
        anyhow::bail!("--reveal-rate must be finite and > 0");
    }

    let text = read_text(&args.input)?;
    let cfg = load_config(args.config.as_deref())?;
    let mut renderer = MotionRenderer::new(GridLayout::new(), cfg.renderer_opts()?);
    renderer.set_profile(Some(cfg.build_profile()?));
    if args.reveal_rate.is_some() {
        renderer.set_visible_window(VisibleWindow::NONE);
    }
    renderer.set_text(&text);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut real_time = 0.0f64;
    for frame in 0..args.frames {
        real_time += args.dt;
        if let Some(rate) = args.reveal_rate {
            let count = (real_time * rate).floor() as usize;
            renderer.set_visible_window(VisibleWindow::first(count).unwrap_or(VisibleWindow::NONE));
        }
        let Some(report) = renderer.tick(args.dt) else {
            continue;
        };

        let mut line = serde_json::json!({
            "frame": frame,
            "report": report,
            "triggered": renderer.drain_triggered_actions(),
        });
        if args.dump_glyphs {
            line["glyphs"] = dump_glyphs(renderer.host());
        }
        writeln!(out, "{line}").context("write pass line")?;
    }
    Ok(())
}

fn dump_glyphs(host: &GridLayout) -> serde_json::Value {
    let mesh = host.presented();
    let glyphs: Vec<serde_json::Value> = host
        .glyphs()
        .iter()
        .filter(|g| g.visible)
        .filter_map(|g| {
            let corners = mesh.positions.get(g.vertex_index..g.vertex_index + QUAD_VERTS)?;
            let color = mesh.colors.get(g.vertex_index)?;
            Some(serde_json::json!({
                "index": g.index,
                "ch": g.ch.to_string(),
                "corners": corners,
                "color": color,
            }))
        })
        .collect();
    serde_json::Value::Array(glyphs)
}

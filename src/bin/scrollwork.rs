use std::{
    cell::RefCell,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    /// Log engine diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived visual state for one scroll offset.
    Frame(FrameArgs),
    /// Replay a scripted page view on a virtual clock.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Smoothed scroll offset (px).
    #[arg(long)]
    y: f64,

    /// Viewport width (px).
    #[arg(long)]
    width: f64,

    /// Viewport height (px).
    #[arg(long)]
    height: f64,

    /// Measured tagline block height (px).
    #[arg(long, default_value_t = 0.0)]
    tagline_height: f64,

    /// Configuration JSON overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Configuration JSON overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// A scripted page view.
#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Script {
    viewport: ViewportDims,
    #[serde(default)]
    tagline_height: f64,
    /// Document load time; `0` means already loaded at mount, absent means never.
    #[serde(default)]
    dom_ready_ms: Option<u64>,
    /// Media playable time; same convention as `dom_ready_ms`.
    #[serde(default)]
    media_ready_ms: Option<u64>,
    #[serde(default)]
    scroll: Vec<ScrollStep>,
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    until_ms: u64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewportDims {
    width: f64,
    height: f64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ScrollStep {
    at_ms: u64,
    y: f64,
}

fn default_frame_ms() -> u64 {
    16
}

#[derive(serde::Serialize)]
struct FrameReport<'a> {
    metrics: scrollwork::ViewportMetrics,
    top_text_visible: bool,
    letter_css: Vec<String>,
    #[serde(flatten)]
    state: &'a scrollwork::DerivedVisualState,
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SimLine<'a> {
    Phase {
        at_ms: u64,
        phase: scrollwork::IntroPhase,
        caption: scrollwork::CaptionTone,
    },
    Frame {
        at_ms: u64,
        #[serde(flatten)]
        state: &'a scrollwork::DerivedVisualState,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<scrollwork::ScrollworkConfig> {
    match path {
        Some(p) => scrollwork::ScrollworkConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(scrollwork::ScrollworkConfig::default()),
    }
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: Script = serde_json::from_reader(r).with_context(|| "parse script JSON")?;
    if script.frame_ms == 0 {
        anyhow::bail!("script frame_ms must be > 0");
    }
    Ok(script)
}

#[tracing::instrument(skip_all)]
fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let metrics = scrollwork::ViewportMetrics::new(
        args.width,
        args.height,
        args.tagline_height,
        &cfg,
    );
    let offset = scrollwork::ScrollOffset::new(args.y);
    let state = scrollwork::Calculator::derive(&cfg, offset, &metrics);

    let report = FrameReport {
        metrics,
        top_text_visible: scrollwork::top_text_visible(state.scale, &cfg.hero),
        letter_css: state.letter_css(),
        state: &state,
    };
    let out = serde_json::to_string_pretty(&report).with_context(|| "serialize frame report")?;
    println!("{out}");
    Ok(())
}

#[tracing::instrument(skip_all)]
fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut script = read_script(&args.in_path)?;
    script.scroll.sort_by_key(|s| s.at_ms);

    let mut engine = scrollwork::Choreographer::new(
        cfg,
        scrollwork::ManualScrollSource::new(0.0),
        scrollwork::VirtualClock::new(),
    )?;

    let phases = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&phases);
    engine.subscribe_phase(move |p| sink.borrow_mut().push(p));

    let block = script.tagline_height;
    engine.on_resize(
        scrollwork::Size::new(script.viewport.width, script.viewport.height),
        &|| Some(block),
    );

    let ready = scrollwork::StaticReadiness {
        loaded: script.dom_ready_ms == Some(0),
        playable: script.media_ready_ms == Some(0),
    };
    engine.mount(scrollwork::TimeMs::ZERO, &ready, &ready);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut dom_pending = script.dom_ready_ms.filter(|t| *t > 0);
    let mut media_pending = script.media_ready_ms.filter(|t| *t > 0);
    let mut steps = script.scroll.iter().peekable();

    let mut t = 0;
    loop {
        if let Some(at) = dom_pending.filter(|at| *at <= t) {
            engine.on_document_loaded(scrollwork::TimeMs(at));
            dom_pending = None;
        }
        if let Some(at) = media_pending.filter(|at| *at <= t) {
            engine.notify_media_ready(scrollwork::TimeMs(at));
            media_pending = None;
        }
        while let Some(step) = steps.next_if(|s| s.at_ms <= t) {
            engine.on_scroll(step.y, scrollwork::TimeMs(step.at_ms));
        }

        // Timers fire before the frame samples, so phase lines precede the frame they unblock.
        engine.pump_timers(scrollwork::TimeMs(t));
        flush_phases(&mut out, &engine, &phases)?;

        if let Some(state) = engine.on_frame(scrollwork::TimeMs(t)) {
            let line = SimLine::Frame { at_ms: t, state };
            writeln!(out, "{}", serde_json::to_string(&line)?)
                .with_context(|| "write frame line")?;
        }

        if t >= script.until_ms {
            break;
        }
        t = t.saturating_add(script.frame_ms).min(script.until_ms);
    }

    engine.teardown();
    Ok(())
}

fn flush_phases(
    out: &mut impl std::io::Write,
    engine: &scrollwork::Choreographer<scrollwork::ManualScrollSource, scrollwork::VirtualClock>,
    phases: &RefCell<Vec<scrollwork::IntroPhase>>,
) -> anyhow::Result<()> {
    for phase in phases.borrow_mut().drain(..) {
        let at_ms = engine.intro().entered_at(phase).map(|t| t.0).unwrap_or_default();
        let line = SimLine::Phase {
            at_ms,
            phase,
            caption: phase.caption(),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)
            .with_context(|| "write phase line")?;
    }
    Ok(())
}

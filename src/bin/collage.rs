use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use collage::{
    ArtDirection, ChunkTier, CollageGenerator, CollageLayout, Density, HtmlBackend, PaintOptions,
    TextureCatalog, compile_layout, execute_plan, fingerprint_layout,
};

#[derive(Parser, Debug)]
#[command(name = "collage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the layout for a seed as JSON.
    Layout(LayoutArgs),
    /// Render static HTML markup for a seed.
    Html(HtmlArgs),
    /// Print the layout fingerprint for a seed.
    Fingerprint(LayoutArgs),
    /// Summarize tier counts and pixelation rates over many seeds.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct GeneratorArgs {
    /// Density label: full, medium or sparse.
    #[arg(long, default_value = "full")]
    density: Density,

    /// Art direction JSON (defaults to the built-in constants).
    #[arg(long)]
    art: Option<PathBuf>,

    /// Texture catalog JSON (defaults to the built-in catalog).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Seed string, typically a route name.
    #[arg(long, default_value = "")]
    seed: String,

    #[command(flatten)]
    gen_args: GeneratorArgs,

    /// Output path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct HtmlArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Paint options JSON.
    #[arg(long)]
    paint: Option<PathBuf>,

    /// Extra class for the container element.
    #[arg(long)]
    class: Option<String>,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    gen_args: GeneratorArgs,

    /// Number of seeds.
    #[arg(long, default_value_t = 1000)]
    seeds: usize,

    /// Seed prefix; seeds are `<prefix><i>`.
    #[arg(long, default_value = "seed-")]
    prefix: String,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(serde::Serialize, Debug)]
struct Stats {
    seeds: usize,
    density: Density,
    mean_large: f64,
    mean_medium: f64,
    mean_small: f64,
    mean_bands: f64,
    pixelated_rate_medium: f64,
    pixelated_rate_small: f64,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Html(args) => cmd_html(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

struct Inputs {
    catalog: TextureCatalog,
    art: ArtDirection,
}

impl Inputs {
    fn load(args: &GeneratorArgs) -> anyhow::Result<Self> {
        let catalog = match &args.catalog {
            Some(p) => TextureCatalog::from_path(p)
                .with_context(|| format!("load catalog '{}'", p.display()))?,
            None => TextureCatalog::builtin().clone(),
        };
        let art = match &args.art {
            Some(p) => ArtDirection::from_path(p)
                .with_context(|| format!("load art direction '{}'", p.display()))?,
            None => ArtDirection::default(),
        };
        Ok(Self { catalog, art })
    }

    fn generator(&self) -> anyhow::Result<CollageGenerator<'_>> {
        Ok(CollageGenerator::new(&self.catalog, &self.art)?)
    }
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let inputs = Inputs::load(&args.gen_args)?;
    let layout = inputs
        .generator()?
        .generate(&args.seed, args.gen_args.density);
    let json = layout.to_json_pretty()?;
    emit(args.out.as_deref(), &json)
}

fn cmd_html(args: HtmlArgs) -> anyhow::Result<()> {
    let inputs = Inputs::load(&args.layout.gen_args)?;
    let layout = inputs
        .generator()?
        .generate(&args.layout.seed, args.layout.gen_args.density);
    let opts = match &args.paint {
        Some(p) => PaintOptions::from_path(p)
            .with_context(|| format!("load paint options '{}'", p.display()))?,
        None => PaintOptions::default(),
    };
    let plan = compile_layout(&layout, &inputs.catalog, &opts)?;

    let mut backend = match args.class {
        Some(class) => HtmlBackend::with_class(class),
        None => HtmlBackend::default(),
    };
    execute_plan(&mut backend, &plan)?;
    emit(args.layout.out.as_deref(), backend.html())
}

fn cmd_fingerprint(args: LayoutArgs) -> anyhow::Result<()> {
    let inputs = Inputs::load(&args.gen_args)?;
    let layout = inputs
        .generator()?
        .generate(&args.seed, args.gen_args.density);
    emit(
        args.out.as_deref(),
        &format!("{}\n", fingerprint_layout(&layout)),
    )
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    if args.seeds == 0 {
        anyhow::bail!("--seeds must be > 0");
    }
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configure rayon thread pool")?;
    }

    let inputs = Inputs::load(&args.gen_args)?;
    let generator = inputs.generator()?;
    let seeds: Vec<String> = (0..args.seeds)
        .map(|i| format!("{}{i}", args.prefix))
        .collect();
    let layouts = generator.generate_batch(&seeds, args.gen_args.density);

    let stats = summarize(&layouts, args.gen_args.density);
    let json = serde_json::to_string_pretty(&stats).context("serialize stats")?;
    emit(None, &format!("{json}\n"))
}

fn summarize(layouts: &[CollageLayout], density: Density) -> Stats {
    let n = layouts.len() as f64;
    let total = |tier| layouts.iter().map(|l| l.tier_count(tier)).sum::<usize>();
    let rate = |tier| {
        let (pix, all) = layouts
            .iter()
            .flat_map(|l| l.chunks_in(tier))
            .fold((0usize, 0usize), |(p, a), c| (p + usize::from(c.pixelated), a + 1));
        if all == 0 { 0.0 } else { pix as f64 / all as f64 }
    };
    Stats {
        seeds: layouts.len(),
        density,
        mean_large: total(ChunkTier::Large) as f64 / n,
        mean_medium: total(ChunkTier::Medium) as f64 / n,
        mean_small: total(ChunkTier::Small) as f64 / n,
        mean_bands: layouts.iter().map(|l| l.glitch_bands.len()).sum::<usize>() as f64 / n,
        pixelated_rate_medium: rate(ChunkTier::Medium),
        pixelated_rate_small: rate(ChunkTier::Small),
    }
}

fn emit(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("write stdout")?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n").context("write stdout")?;
            }
        }
    }
    Ok(())
}

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    seeds: usize,
    prefix: String,
    density: collage::Density,
    warmup: u32,
    repeats: u32,
    parallel: bool,
    no_paint: bool,
    out: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    generate_total: Duration,
    compile_total: Duration,
    paint_total: Duration,
    wall_total: Duration,
    digest: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.seeds == 0 {
        anyhow::bail!("--seeds must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be > 0");
    }

    let seeds: Vec<String> = (0..args.seeds)
        .map(|i| format!("{}{i}", args.prefix))
        .collect();

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for i in 0..args.warmup {
            let _ = run_once(&args, &seeds, i, /*is_warmup=*/ true)?;
        }
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {seeds} seeds/run, density={density}, mode={mode}, paint={paint}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        seeds = args.seeds,
        density = args.density,
        mode = if args.parallel {
            "parallel"
        } else {
            "sequential"
        },
        paint = if args.no_paint { "no" } else { "yes" },
    );

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    for i in 0..args.repeats {
        runs.push(run_once(&args, &seeds, i, /*is_warmup=*/ false)?);
    }

    let digest = runs[0].digest.clone();
    if let Some(bad) = runs.iter().position(|r| r.digest != digest) {
        anyhow::bail!(
            "run {bad:03} produced digest {} (expected {digest}); output is not deterministic",
            runs[bad].digest
        );
    }
    eprintln!("digest: {digest} (identical across {} runs)", runs.len());

    report_percentiles(&runs);

    if let Some(out) = &args.out {
        let summary = json!({
            "seeds": args.seeds,
            "density": args.density.as_str(),
            "repeats": args.repeats,
            "parallel": args.parallel,
            "digest": digest,
            "wall_ms": runs.iter().map(|r| r.wall_total.as_secs_f64() * 1000.0).collect::<Vec<_>>(),
        });
        let text = serde_json::to_string_pretty(&summary).context("serialize summary")?;
        std::fs::write(out, text).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        seeds: 10_000,
        prefix: "seed-".to_string(),
        density: collage::Density::Full,
        warmup: 1,
        repeats: 20,
        parallel: false,
        no_paint: false,
        out: None,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--seeds" => out.seeds = parse_usize(args.next(), "--seeds")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--prefix" => {
                out.prefix = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --prefix"))?
            }
            "--density" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --density (full|medium|sparse)")
                })?;
                out.density = collage::Density::parse(&v)?;
            }
            "--out" => {
                out.out = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --out (expected a path)")
                })?))
            }
            "--parallel" => out.parallel = true,
            "--no-paint" => out.no_paint = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        "collage-bench

USAGE:
  cargo run --manifest-path bench/Cargo.toml --release -- [options]

OPTIONS:
  --seeds <n>          Seeds per run (default 10000)
  --prefix <s>         Seed prefix; seeds are <prefix><i> (default seed-)
  --density <label>    full|medium|sparse (default full)
  --warmup <n>         Warmup runs, not reported (default 1)
  --repeats <n>        Measured runs (default 20)
  --parallel           Generate with rayon batch generation
  --no-paint           Skip compile and HTML paint
  --out <path>         Write a JSON summary
"
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("invalid value for {flag}: '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("invalid value for {flag}: '{v}'"))
}

fn run_once(
    args: &BenchArgs,
    seeds: &[String],
    run_idx: u32,
    is_warmup: bool,
) -> anyhow::Result<RunMetrics> {
    let wall = Instant::now();
    let generator = collage::CollageGenerator::builtin();
    let catalog = collage::TextureCatalog::builtin();
    let opts = collage::PaintOptions::default();
    let mut m = RunMetrics::default();

    let t0 = Instant::now();
    let layouts = if args.parallel {
        generator.generate_batch(seeds, args.density)
    } else {
        seeds
            .iter()
            .map(|s| generator.generate(s, args.density))
            .collect()
    };
    m.generate_total = t0.elapsed();

    let mut hasher = sha2::Sha256::new();
    for layout in &layouts {
        hasher.update(collage::fingerprint_layout(layout).to_string().as_bytes());

        if args.no_paint {
            continue;
        }
        let t1 = Instant::now();
        let plan = collage::compile_layout(layout, catalog, &opts)?;
        m.compile_total += t1.elapsed();

        let t2 = Instant::now();
        let mut backend = collage::HtmlBackend::default();
        collage::execute_plan(&mut backend, &plan)?;
        m.paint_total += t2.elapsed();
        hasher.update(backend.html().as_bytes());
    }
    m.digest = hex(&hasher.finalize());
    m.wall_total = wall.elapsed();

    if !is_warmup {
        eprintln!(
            "run {run_idx:03}: wall={wall:.3}s generate={ge:.3}s compile={co:.3}s paint={pa:.3}s",
            wall = m.wall_total.as_secs_f64(),
            ge = m.generate_total.as_secs_f64(),
            co = m.compile_total.as_secs_f64(),
            pa = m.paint_total.as_secs_f64(),
        );
    }

    Ok(m)
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut out, "{b:02x}");
    }
    out
}

fn report_percentiles(runs: &[RunMetrics]) {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: Getter) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("generate_total", |m| m.generate_total),
        ("compile_total", |m| m.compile_total),
        ("paint_total", |m| m.paint_total),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:16} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99)),
        );
    }
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sp_core::{Point2, Profile};
use sp_steps::{PipelineConfig, PipelineOutput, StepResult, demo_staircase, run_pipeline};

#[derive(Parser, Debug)]
#[command(name = "sp_steps")]
#[command(about = "Detect and measure flat platforms in a synthetic height profile")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline and print one line per step
    #[command(name = "run")]
    Run(RunArgs),
    /// Print the effective pipeline configuration as JSON
    #[command(name = "dump-config")]
    DumpConfig(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON pipeline config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Samples per millimeter along X
    #[arg(long)]
    resolution: Option<usize>,
    /// Re-sample the built profile to exactly this many points
    #[arg(long)]
    resample: Option<usize>,
    /// Symmetric noise half-width in mm
    #[arg(long)]
    noise: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = false)]
    no_noise: bool,
    #[arg(long, default_value_t = false)]
    no_smooth: bool,
    #[arg(long)]
    smooth_kernel: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,
    /// JSON array of vertices, `[[x, y], ...]` or `[{"x": .., "y": ..}, ...]`
    #[arg(long)]
    polygon: Option<PathBuf>,
    /// Directory for report.json and per-profile CSV files
    #[arg(long)]
    out: Option<PathBuf>,
    /// Re-sample exported profiles to this many points
    #[arg(long)]
    plot_samples: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VertexDto {
    Pair([f64; 2]),
    Point(Point2),
}

impl From<VertexDto> for Point2 {
    fn from(v: VertexDto) -> Self {
        match v {
            VertexDto::Pair([x, y]) => Point2::new(x, y),
            VertexDto::Point(p) => p,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Report<'a> {
    config: &'a PipelineConfig,
    polygon: &'a [Point2],
    sample_count: usize,
    edges: &'a [usize],
    steps: &'a [StepResult],
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Run(args) => run(args),
        Command::DumpConfig(args) => {
            let cfg = load_config(&args)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&cfg).context("serializing config")?
            );
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let cfg = load_config(&args.config)?;
    let polygon = match &args.polygon {
        Some(path) => load_polygon(path)?,
        None => demo_staircase(),
    };
    info!(
        "running pipeline on {} vertices at {} samples/mm",
        polygon.len(),
        cfg.sample_resolution
    );

    let out = run_pipeline(&polygon, &cfg).context("step pipeline failed")?;
    for w in &out.warnings {
        warn!("{w}");
    }
    if out.median_steps.is_empty() {
        println!("no steps detected");
    } else {
        println!("{}", out.report());
    }

    if let Some(dir) = &args.out {
        write_outputs(dir, &cfg, &polygon, &out, args.plot_samples)?;
        info!("results written to {}", dir.display());
    }
    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_json::<PipelineConfig>(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(r) = args.resolution {
        cfg.sample_resolution = r;
    }
    if args.resample.is_some() {
        cfg.resample_count = args.resample;
    }
    if let Some(n) = args.noise {
        if !(n.is_finite() && n >= 0.0) {
            bail!("--noise must be a non-negative number, got {n}");
        }
        cfg.noise_range = (-n, n);
    }
    if args.seed.is_some() {
        cfg.noise_seed = args.seed;
    }
    if args.no_noise {
        cfg.enable_noise = false;
    }
    if args.no_smooth {
        cfg.smooth_profile = false;
    }
    if let Some(k) = args.smooth_kernel {
        cfg.smoothing_kernel_size = k;
    }
    Ok(cfg)
}

fn load_polygon(path: &Path) -> Result<Vec<Point2>> {
    let vertices: Vec<VertexDto> = read_json(path)?;
    if vertices.len() < 2 {
        bail!(
            "polygon {} has {} vertices, need at least 2",
            path.display(),
            vertices.len()
        );
    }
    Ok(vertices.into_iter().map(Point2::from).collect())
}

fn write_outputs(
    dir: &Path,
    cfg: &PipelineConfig,
    polygon: &[Point2],
    out: &PipelineOutput,
    plot_samples: Option<usize>,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let named = [
        ("scanned", &out.scanned_profile),
        ("first_derivative", &out.first_derivative),
        ("binarized", &out.binarized_derivative),
        ("curvature", &out.curvature),
    ];
    for (name, profile) in named {
        write_profile_csv(dir.join(format!("{name}.csv")), profile, plot_samples)?;
    }
    for (i, raw) in out.raw_steps.iter().enumerate() {
        write_profile_csv(dir.join(format!("step_{}.csv", i + 1)), raw, None)?;
    }

    write_json(
        dir.join("report.json"),
        &Report {
            config: cfg,
            polygon,
            sample_count: out.scanned_profile.len(),
            edges: &out.edges,
            steps: &out.median_steps,
            warnings: out.warnings.iter().map(ToString::to_string).collect(),
        },
    )
}

fn write_profile_csv(path: PathBuf, profile: &Profile, plot_samples: Option<usize>) -> Result<()> {
    let resampled;
    let profile = match plot_samples {
        Some(n) if n < profile.len() => {
            resampled = profile
                .resample(n)
                .with_context(|| format!("re-sampling {} to {n} points", path.display()))?;
            &resampled
        }
        _ => profile,
    };

    let mut file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "position,value").context("writing csv header")?;
    for (x, y) in profile.samples() {
        writeln!(file, "{x},{y}").context("writing csv row")?;
    }
    Ok(())
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

#[cfg(test)]
mod tests {
    use sp_core::Point2;

    use super::{ConfigArgs, VertexDto, load_config};

    fn no_overrides() -> ConfigArgs {
        ConfigArgs {
            config: None,
            resolution: None,
            resample: None,
            noise: None,
            seed: None,
            no_noise: false,
            no_smooth: false,
            smooth_kernel: None,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = ConfigArgs {
            resolution: Some(20),
            resample: Some(500),
            noise: Some(0.05),
            seed: Some(9),
            no_smooth: true,
            ..no_overrides()
        };
        let cfg = load_config(&args).expect("valid overrides");
        assert_eq!(cfg.sample_resolution, 20);
        assert_eq!(cfg.resample_count, Some(500));
        assert_eq!(cfg.noise_range, (-0.05, 0.05));
        assert_eq!(cfg.noise_seed, Some(9));
        assert!(cfg.enable_noise);
        assert!(!cfg.smooth_profile);

        let bad = ConfigArgs {
            noise: Some(-1.0),
            ..no_overrides()
        };
        assert!(load_config(&bad).is_err());
    }

    #[test]
    fn polygon_accepts_pairs_and_points() {
        let v: Vec<VertexDto> =
            serde_json::from_str(r#"[[0, 0], {"x": 15.0, "y": 0.5}]"#).expect("vertices");
        let pts: Vec<Point2> = v.into_iter().map(Point2::from).collect();
        assert_eq!(pts, vec![Point2::new(0.0, 0.0), Point2::new(15.0, 0.5)]);
    }
}

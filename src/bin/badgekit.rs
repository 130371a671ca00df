use std::path::{Path, PathBuf};

use anyhow::Context as _;
use badgekit::PdfSink;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "badgekit", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one badge as a PNG.
    Cell(CellArgs),
    /// Run an export job and write the page preview as a PNG.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct CellArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Badge side in pixels. Defaults to print resolution (779).
    #[arg(long)]
    size: Option<u32>,

    /// Margin between badge edge and image area.
    #[arg(long, default_value_t = badgekit::RenderParameters::DEFAULT_MARGIN_MM)]
    margin_mm: f64,

    /// Optional render parameters JSON (transform and adjustments).
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Export job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path for the rendered page.
    #[arg(long)]
    out: PathBuf,

    /// Also write the page operations as JSON for an external PDF writer.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Page preview resolution.
    #[arg(long, default_value_t = badgekit::PX_PER_MM)]
    px_per_mm: f64,

    /// Render grid cells in parallel.
    #[arg(long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Cell(args) => cmd_cell(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_params(path: &Path) -> anyhow::Result<badgekit::RenderParameters> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read render parameters '{}'", path.display()))?;
    let params: badgekit::RenderParameters =
        serde_json::from_str(&s).with_context(|| "parse render parameters JSON")?;
    Ok(params)
}

fn cmd_cell(args: CellArgs) -> anyhow::Result<()> {
    let image = badgekit::load_image(&args.image)?;

    let mut params = match &args.params {
        Some(path) => read_params(path)?,
        None => badgekit::RenderParameters::default(),
    };
    params.margin_mm = args.margin_mm;
    params.validate()?;

    let frame = match args.size {
        Some(n) => badgekit::BadgeFrame::with_size_px(n),
        None => badgekit::BadgeFrame::print(),
    };

    let compositor = badgekit::SlotCompositor::new(badgekit::CompositorOpts::print());
    let raster = compositor.render(&image, &params, &frame)?;
    raster.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let job = badgekit::ExportJob::from_path(&args.in_path)?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let snapshot = job.load(base_dir)?;

    let mut opts = job.export_opts();
    opts.parallel = args.parallel;
    let pipeline = badgekit::ExportPipeline::new(opts);

    let timestamp = badgekit::file_timestamp(chrono::Utc::now());

    let mut page = badgekit::PageRasterSink::new(args.px_per_mm);
    let mut recorder = badgekit::RecordingSink::new();
    let outcome = pipeline.run(
        &snapshot,
        &mut Tee(&mut page, &mut recorder),
        &mut badgekit::NoopObserver,
        &timestamp,
    )?;
    let badgekit::ExportOutcome::Written { file_name, rasters } = outcome else {
        anyhow::bail!("nothing to export: the job has no images");
    };

    page.raster()
        .context("page sink produced no raster")?
        .save_png(&args.out)?;
    eprintln!("wrote {} ({rasters} badges, {file_name})", args.out.display());

    if let Some(path) = &args.manifest {
        std::fs::write(path, recorder.to_manifest_json()?)
            .with_context(|| format!("write manifest '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

/// Forwards every call to two sinks.
struct Tee<'a>(&'a mut dyn PdfSink, &'a mut dyn PdfSink);

impl PdfSink for Tee<'_> {
    fn begin_page(&mut self, cfg: badgekit::PageConfig) -> badgekit::BadgeResult<()> {
        self.0.begin_page(cfg.clone())?;
        self.1.begin_page(cfg)
    }

    fn place_raster(
        &mut self,
        raster: &badgekit::Raster,
        rect_mm: badgekit::Rect,
    ) -> badgekit::BadgeResult<()> {
        self.0.place_raster(raster, rect_mm)?;
        self.1.place_raster(raster, rect_mm)
    }

    fn stroke_rect(
        &mut self,
        rect_mm: badgekit::Rect,
        stroke: badgekit::Stroke,
    ) -> badgekit::BadgeResult<()> {
        self.0.stroke_rect(rect_mm, stroke)?;
        self.1.stroke_rect(rect_mm, stroke)
    }

    fn finish(&mut self) -> badgekit::BadgeResult<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

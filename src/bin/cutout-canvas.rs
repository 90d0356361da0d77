use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cutout-canvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the template designs and how many variants each offers.
    List(ListArgs),
    /// Compose a cutout into a template variant and write it as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Directory holding template JSON files (defaults to the built-in catalog).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Variant plan JSON (defaults to the built-in plan).
    #[arg(long)]
    plan: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image. Its alpha channel is used as the cutout mask.
    #[arg(long)]
    cutout: PathBuf,

    /// Template design, e.g. `full-circle-frame` or `02.full-circle-frame`.
    #[arg(long)]
    design: String,

    /// Variant index (0-based) within the design.
    #[arg(long, default_value_t = 0)]
    variant: usize,

    /// Side of the square canvas in pixels.
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the canvas snapshot JSON here.
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Directory holding template JSON files (defaults to the built-in catalog).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Directory with local mask and overlay images (defaults to the built-in assets).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Variant plan JSON (defaults to the built-in plan).
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Segmentation mode.
    #[arg(long, value_enum, default_value_t = ModeChoice::People)]
    mode: ModeChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Foreground,
    People,
}

impl From<ModeChoice> for cutout_canvas::SegmentationMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Foreground => Self::Foreground,
            ModeChoice::People => Self::People,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_catalog(dir: Option<&Path>) -> cutout_canvas::Catalog {
    match dir {
        Some(dir) => cutout_canvas::Catalog::from_dir(dir),
        None => cutout_canvas::Catalog::builtin(),
    }
}

fn load_plan(path: Option<&Path>) -> anyhow::Result<cutout_canvas::VariantPlan> {
    let Some(path) = path else {
        return Ok(cutout_canvas::VariantPlan::default());
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("read plan '{}'", path.display()))?;
    Ok(cutout_canvas::VariantPlan::from_json(&bytes)?)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.templates.as_deref());
    let plan = load_plan(args.plan.as_deref())?;

    for design in cutout_canvas::TemplateDesign::all() {
        if catalog.template(design).is_none() {
            println!("{design}\tmissing");
            continue;
        }
        let count = plan
            .specs_for(design)
            .map(|spec| catalog.variant_count(spec))
            .sum::<usize>()
            .max(1);
        println!("{design}\t{count}");
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let design: cutout_canvas::TemplateDesign = args.design.parse()?;
    let catalog = load_catalog(args.templates.as_deref());
    let plan = load_plan(args.plan.as_deref())?;
    let assets = match &args.assets {
        Some(dir) => cutout_canvas::AssetStore::from_dir(dir),
        None => cutout_canvas::AssetStore::builtin(),
    };

    let template = catalog
        .template(design)
        .with_context(|| format!("template '{design}' is not in the catalog"))?
        .clone();

    let photo = image::open(&args.cutout)
        .with_context(|| format!("read image '{}'", args.cutout.display()))?
        .to_rgba8();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start runtime")?;
    let segmenter =
        cutout_canvas::SegmentationCache::new(cutout_canvas::MaskedSegmenter::from_alpha());
    let cache_key = args.cutout.display().to_string();
    let result = runtime
        .block_on(segmenter.segment(Arc::new(photo), args.mode.into(), &cache_key))
        .with_context(|| format!("segment '{}'", args.cutout.display()))?;

    let base = cutout_canvas::ImageTemplate::from_result(template, &result);
    let mut variants: Vec<_> = plan
        .specs_for(design)
        .flat_map(|spec| catalog.variants(spec, &base))
        .collect();
    if variants.is_empty() {
        variants.push(base);
    }
    let count = variants.len();
    let Some(chosen) = variants.into_iter().nth(args.variant) else {
        anyhow::bail!(
            "variant {} out of range; '{design}' has {count} variant(s)",
            args.variant
        );
    };

    let side = f64::from(args.size);
    let mut canvas = cutout_canvas::Canvas::new(cutout_canvas::Rect::new(0.0, 0.0, side, side));
    canvas.add_template_layers(&chosen.template, &chosen.cutout, &assets);

    let frame = cutout_canvas::flatten(&canvas, None)
        .with_context(|| format!("canvas of {} px cannot be flattened", args.size))?;
    let rgba = frame
        .to_rgba_image()
        .context("flattened frame has an unexpected buffer size")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        rgba.as_raw(),
        rgba.width(),
        rgba.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = &args.snapshot_out {
        let json = canvas.encode_snapshot()?;
        std::fs::write(path, json)
            .with_context(|| format!("write snapshot '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

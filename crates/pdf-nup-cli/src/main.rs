use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "Tile PDF pages N-up", version)]
struct Cli {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long, required_unless_present_any = ["stats_only", "save_config"])]
    output: Option<PathBuf>,

    /// Load options from a JSON file (flags given on the command line win)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Rows per output page
    #[arg(long)]
    rows: Option<usize>,

    /// Columns per output page
    #[arg(long)]
    columns: Option<usize>,

    /// Order in which cells are filled
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Page box used as the visible area of each source page
    #[arg(long = "box", value_enum)]
    box_type: Option<BoxArg>,

    /// When to re-render rotated pages upright before tiling
    #[arg(long, value_enum)]
    normalize: Option<NormalizeArg>,

    /// Worker threads for normalization (0 = one per CPU)
    #[arg(long)]
    threads: Option<usize>,

    /// Only produce the first N output pages
    #[arg(long)]
    preview: Option<usize>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    HorizontalL2r,
    HorizontalR2l,
    VerticalL2r,
    VerticalR2l,
}

#[derive(Clone, Copy, ValueEnum)]
enum BoxArg {
    Media,
    Crop,
    Bleed,
    Trim,
    Art,
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalizeArg {
    Auto,
    Always,
}

impl From<DirectionArg> for pdf_nup::Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::HorizontalL2r => Self::HorizontalL2R,
            DirectionArg::HorizontalR2l => Self::HorizontalR2L,
            DirectionArg::VerticalL2r => Self::VerticalL2R,
            DirectionArg::VerticalR2l => Self::VerticalR2L,
        }
    }
}

impl From<BoxArg> for pdf_nup::BoxType {
    fn from(arg: BoxArg) -> Self {
        match arg {
            BoxArg::Media => Self::MediaBox,
            BoxArg::Crop => Self::CropBox,
            BoxArg::Bleed => Self::BleedBox,
            BoxArg::Trim => Self::TrimBox,
            BoxArg::Art => Self::ArtBox,
        }
    }
}

impl From<NormalizeArg> for pdf_nup::NormalizeMode {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::Auto => Self::Auto,
            NormalizeArg::Always => Self::Always,
        }
    }
}

impl Cli {
    /// Options from the config file (or defaults) overridden by flags
    async fn options(&self) -> Result<pdf_nup::NupOptions> {
        let mut options = match &self.config {
            Some(path) => pdf_nup::NupOptions::load(path).await?,
            None => pdf_nup::NupOptions::default(),
        };

        if let Some(rows) = self.rows {
            options.grid.rows = rows;
        }
        if let Some(columns) = self.columns {
            options.grid.columns = columns;
        }
        if let Some(direction) = self.direction {
            options.grid.direction = direction.into();
        }
        if let Some(box_type) = self.box_type {
            options.box_type = box_type.into();
        }
        if let Some(normalize) = self.normalize {
            options.normalize = normalize.into();
        }
        if let Some(threads) = self.threads {
            options.threads = threads;
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.options().await?;

    if let Some(path) = &cli.save_config {
        options.save(path).await?;
        println!("Saved options → {}", path.display());
    }

    let document = pdf_nup::load_pdf(&cli.input).await?;

    // Calculate and show statistics
    let stats = pdf_nup::calculate_statistics(&document, &options)?;
    println!("N-up Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Pages per sheet: {}", stats.cells_per_page);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank cells: {}", stats.blank_cells);
    println!("  Rotated pages: {}", stats.rotated_pages);
    println!("  Normalize: {}", stats.needs_normalization);

    if cli.stats_only {
        return Ok(());
    }

    let Some(output) = cli.output else {
        return Ok(());
    };

    let result = match cli.preview {
        Some(max_pages) => pdf_nup::generate_preview(&document, &options, max_pages).await?,
        None => pdf_nup::transform(document, &options).await?,
    };
    log::debug!("Output has {} pages", result.get_pages().len());

    pdf_nup::save_pdf(result, &output).await?;
    println!("N-up → {}", output.display());

    Ok(())
}

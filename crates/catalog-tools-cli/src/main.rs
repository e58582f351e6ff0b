mod blocks;
mod items;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use blocks::{BlockItem, BlockPage};
use catalog_compose::{CompositeOptions, PageRender};
use catalog_paginate::{
    CatalogOptions, CatalogSession, PageGroup, calculate_statistics,
};

#[derive(Parser)]
#[command(name = "catpdf", about = "Catalogue pagination tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the computed page plan for a catalogue
    Plan {
        /// Input CSV file (columns: identifier, title, href)
        #[arg(short, long)]
        items: PathBuf,

        /// Pagination config JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Default layout when no config is given
        #[arg(long, default_value = "four-up", value_enum)]
        layout: LayoutArg,
    },

    /// Export a catalogue as a composited PDF with live links
    Export {
        /// Input CSV file (columns: identifier, title, href)
        #[arg(short, long)]
        items: PathBuf,

        /// Pagination config JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Default layout when no config is given
        #[arg(long, default_value = "four-up", value_enum)]
        layout: LayoutArg,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Output paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Output orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,

        /// Capture upscaling factor
        #[arg(long, default_value = "2.0")]
        raster_scale: f32,

        /// Concurrent page captures (1 = strictly sequential)
        #[arg(long, default_value = "1")]
        capture_concurrency: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Single,
    TwoUp,
    FourUp,
    EightUp,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<LayoutArg> for catalog_paginate::LayoutTag {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Single => Self::Single,
            LayoutArg::TwoUp => Self::TwoUp,
            LayoutArg::FourUp => Self::FourUp,
            LayoutArg::EightUp => Self::EightUp,
        }
    }
}

impl From<PaperArg> for catalog_compose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<OrientationArg> for catalog_compose::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

async fn load_options(config: Option<&PathBuf>, layout: LayoutArg) -> Result<CatalogOptions> {
    match config {
        Some(path) => Ok(CatalogOptions::load(path).await?),
        None => Ok(CatalogOptions {
            default_layout: layout.into(),
            ..Default::default()
        }),
    }
}

fn print_plan(session: &CatalogSession) {
    for (position, group) in session.sequence().iter().enumerate() {
        match group {
            PageGroup::Items { indices, layout } => {
                let titles: Vec<&str> = indices
                    .iter()
                    .map(|&index| session.items()[index].identifier.as_str())
                    .collect();
                println!(
                    "Page {}: {} item(s), {}: {}",
                    position + 1,
                    indices.len(),
                    layout.name(),
                    titles.join(", ")
                );
            }
            PageGroup::ExternalUrl { url, title, .. } => {
                let label = title.as_deref().unwrap_or("external URL page");
                println!("Page {}: {} -> {}", position + 1, label, url);
            }
            PageGroup::Summary => println!("Page {}: summary", position + 1),
        }
    }

    let stats = calculate_statistics(session.sequence());
    println!("Pagination Statistics:");
    println!("  Items: {}", stats.item_count);
    println!("  Item pages: {}", stats.item_pages);
    println!("  URL pages: {}", stats.url_pages);
    println!("  Summary pages: {}", stats.summary_pages);
    println!("  Total pages: {}", stats.total_pages);
    println!("  Unused slots: {}", stats.unused_slots);
}

fn build_pages(session: &CatalogSession) -> Vec<Box<dyn PageRender>> {
    session
        .sequence()
        .iter()
        .map(|group| -> Box<dyn PageRender> {
            match group {
                PageGroup::Items { indices, layout } => {
                    let overrides = session.overrides();
                    let items = indices
                        .iter()
                        .map(|&index| {
                            let item = &session.items()[index];
                            BlockItem {
                                identifier: item.identifier.clone(),
                                href: item.href.clone(),
                                barcode: overrides
                                    .barcode
                                    .get(&index)
                                    .copied()
                                    .unwrap_or_default(),
                                show_bio: overrides
                                    .show_bio
                                    .get(&index)
                                    .copied()
                                    .unwrap_or(false),
                                has_footer_note: overrides.footer_note.contains_key(&index),
                            }
                        })
                        .collect();
                    Box::new(BlockPage::Items {
                        items,
                        layout: *layout,
                    })
                }
                PageGroup::ExternalUrl { url, .. } => Box::new(BlockPage::ExternalUrl {
                    url: url.clone(),
                }),
                PageGroup::Summary => Box::new(BlockPage::Summary {
                    item_count: session.items().len(),
                }),
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            items,
            config,
            layout,
        } => {
            let catalogue = items::load_from_csv(&items).await?;
            let options = load_options(config.as_ref(), layout).await?;
            let session = CatalogSession::new(catalogue, &options)?;
            print_plan(&session);
        }

        Commands::Export {
            items,
            config,
            layout,
            output,
            paper,
            orientation,
            raster_scale,
            capture_concurrency,
        } => {
            let catalogue = items::load_from_csv(&items).await?;
            let options = load_options(config.as_ref(), layout).await?;
            let session = CatalogSession::new(catalogue, &options)?;
            print_plan(&session);

            let composite_options = CompositeOptions {
                paper_size: paper.into(),
                orientation: orientation.into(),
                raster_scale,
                capture_concurrency,
                ..Default::default()
            };

            let pages = build_pages(&session);
            let document = catalog_compose::composite(pages, &composite_options).await?;
            catalog_compose::save_pdf(document, &output).await?;
            println!("Exported → {}", output.display());
        }
    }

    Ok(())
}

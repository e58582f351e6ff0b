//! Built-in block renderer
//!
//! A minimal stand-in for the real per-item content renderer: each item
//! becomes a flat-colour tile in the page grid, with a title bar, a barcode
//! strip, and optional bio/footer bands driven by the override tables.
//! Tiles with an href report a clickable region over their full extent, in
//! the captured bitmap's pixel space, which is what the compositor expects.

use catalog_compose::{CapturedPage, LinkRegion, PageRender, Result};
use catalog_paginate::{BarcodeKind, LayoutTag};
use image::{Rgba, RgbaImage};

/// Logical page size in pixels before the capture upscale (A4-ish ratio)
const PAGE_WIDTH_PX: u32 = 620;
const PAGE_HEIGHT_PX: u32 = 877;
const MARGIN_PX: u32 = 24;
const GAP_PX: u32 = 12;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([40, 40, 48, 255]);
const BAND: Rgba<u8> = Rgba([210, 210, 216, 255]);

const TILE_COLOURS: [Rgba<u8>; 6] = [
    Rgba([221, 132, 82, 255]),
    Rgba([85, 130, 169, 255]),
    Rgba([106, 159, 88, 255]),
    Rgba([196, 120, 160, 255]),
    Rgba([204, 185, 116, 255]),
    Rgba([129, 114, 179, 255]),
];

/// One item tile's inputs, resolved from the item and its overrides
#[derive(Debug, Clone)]
pub struct BlockItem {
    pub identifier: String,
    pub href: Option<String>,
    pub barcode: BarcodeKind,
    pub show_bio: bool,
    pub has_footer_note: bool,
}

/// One logical page the block renderer can capture
#[derive(Debug, Clone)]
pub enum BlockPage {
    Items {
        items: Vec<BlockItem>,
        layout: LayoutTag,
    },
    ExternalUrl {
        url: String,
    },
    Summary {
        item_count: usize,
    },
}

impl PageRender for BlockPage {
    fn describe(&self) -> String {
        match self {
            BlockPage::Items { items, layout } => {
                format!("{} items ({})", items.len(), layout.name())
            }
            BlockPage::ExternalUrl { url } => format!("external url {}", url),
            BlockPage::Summary { .. } => "summary".to_string(),
        }
    }

    fn capture(&self, raster_scale: f32) -> Result<CapturedPage> {
        let width = px(PAGE_WIDTH_PX, raster_scale);
        let height = px(PAGE_HEIGHT_PX, raster_scale);
        let mut image = RgbaImage::from_pixel(width, height, WHITE);
        let mut links = Vec::new();

        match self {
            BlockPage::Items { items, layout } => {
                draw_item_grid(&mut image, &mut links, items, *layout, raster_scale);
            }
            BlockPage::ExternalUrl { url } => {
                // Banner across the middle; the whole page is the link target
                let banner_top = height / 3;
                fill_rect(&mut image, 0, banner_top, width, height / 3, BAND);
                let inset = px(MARGIN_PX, raster_scale);
                fill_rect(
                    &mut image,
                    inset,
                    banner_top + inset,
                    width.saturating_sub(2 * inset),
                    px(8, raster_scale),
                    INK,
                );
                links.push(LinkRegion {
                    href: url.clone(),
                    x: 0.0,
                    y: 0.0,
                    width: width as f32,
                    height: height as f32,
                });
            }
            BlockPage::Summary { item_count } => {
                draw_summary_rows(&mut image, *item_count, raster_scale);
            }
        }

        Ok(CapturedPage { image, links })
    }
}

fn draw_item_grid(
    image: &mut RgbaImage,
    links: &mut Vec<LinkRegion>,
    items: &[BlockItem],
    layout: LayoutTag,
    scale: f32,
) {
    let (cols, rows) = layout.grid_dimensions();
    let margin = px(MARGIN_PX, scale);
    let gap = px(GAP_PX, scale);

    let inner_width = image.width().saturating_sub(2 * margin);
    let inner_height = image.height().saturating_sub(2 * margin);
    let cell_width = (inner_width.saturating_sub(gap * (cols as u32 - 1))) / cols as u32;
    let cell_height = (inner_height.saturating_sub(gap * (rows as u32 - 1))) / rows as u32;

    for (slot, item) in items.iter().enumerate() {
        let col = (slot % cols) as u32;
        let row = (slot / cols) as u32;
        let x = margin + col * (cell_width + gap);
        let y = margin + row * (cell_height + gap);

        fill_rect(image, x, y, cell_width, cell_height, tile_colour(item));

        // Title bar
        let bar_height = px(18, scale);
        fill_rect(image, x, y, cell_width, bar_height, INK);

        // Barcode strip along the bottom of the tile
        let strip_height = px(22, scale);
        draw_barcode_strip(
            image,
            x + px(6, scale),
            (y + cell_height).saturating_sub(strip_height + px(6, scale)),
            cell_width.saturating_sub(px(12, scale)),
            strip_height,
            item,
        );

        if item.show_bio {
            let band_width = px(10, scale);
            fill_rect(
                image,
                (x + cell_width).saturating_sub(band_width),
                y + bar_height,
                band_width,
                cell_height.saturating_sub(bar_height + strip_height),
                BAND,
            );
        }

        if item.has_footer_note {
            fill_rect(
                image,
                x,
                (y + cell_height).saturating_sub(px(4, scale)),
                cell_width,
                px(4, scale),
                INK,
            );
        }

        if let Some(href) = &item.href {
            links.push(LinkRegion {
                href: href.clone(),
                x: x as f32,
                y: y as f32,
                width: cell_width as f32,
                height: cell_height as f32,
            });
        }
    }
}

/// Placeholder barcode: stripe cadence keyed to the symbology and the
/// identifier bytes. The real generator is an external collaborator.
fn draw_barcode_strip(
    image: &mut RgbaImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    item: &BlockItem,
) {
    fill_rect(image, x, y, width, height, WHITE);

    let module = match item.barcode {
        BarcodeKind::Ean13 => 3,
        BarcodeKind::Code128 => 2,
        BarcodeKind::QrCode => 5,
    };

    let mut cursor = 0u32;
    for (i, byte) in item.identifier.bytes().cycle().enumerate() {
        if cursor >= width {
            break;
        }
        let bar_width = module + (byte as u32 % module.max(1));
        if i % 2 == 0 {
            let bar_height = if item.barcode == BarcodeKind::QrCode {
                // Blocky, half-height modules to hint at a 2D code
                height / 2 + (byte as u32 % (height / 2).max(1))
            } else {
                height
            };
            fill_rect(image, x + cursor, y, bar_width.min(width - cursor), bar_height, INK);
        }
        cursor += bar_width;
    }
}

fn draw_summary_rows(image: &mut RgbaImage, item_count: usize, scale: f32) {
    let margin = px(MARGIN_PX, scale);
    let row_height = px(14, scale);
    let row_gap = px(8, scale);
    let width = image.width().saturating_sub(2 * margin);

    // Heading block
    fill_rect(image, margin, margin, width / 2, px(24, scale), INK);

    let mut y = margin + px(24, scale) + row_gap * 2;
    for _ in 0..item_count {
        if y + row_height > image.height().saturating_sub(margin) {
            break;
        }
        fill_rect(image, margin, y, width, row_height, BAND);
        y += row_height + row_gap;
    }
}

fn tile_colour(item: &BlockItem) -> Rgba<u8> {
    let hash = item
        .identifier
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    TILE_COLOURS[hash % TILE_COLOURS.len()]
}

fn px(value: u32, scale: f32) -> u32 {
    (value as f32 * scale).round().max(1.0) as u32
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, colour: Rgba<u8>) {
    let x_end = (x + width).min(image.width());
    let y_end = (y + height).min(image.height());
    for cy in y.min(image.height())..y_end {
        for cx in x.min(image.width())..x_end {
            image.put_pixel(cx, cy, colour);
        }
    }
}

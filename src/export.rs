//! Writing generated diagrams to disk.

use std::fs;
use std::path::Path;

use log::info;
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

/// Output format, chosen from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The PlantUML text itself; no rendering involved.
    Source,
    Svg,
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or("Output file has no extension")?
            .to_ascii_lowercase();

        match ext.as_str() {
            "puml" | "plantuml" | "txt" => Ok(ExportFormat::Source),
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(format!(
                "Unsupported output format: .{} (use .puml, .svg, .png or .pdf)",
                ext
            )),
        }
    }

    pub fn needs_render(self) -> bool {
        self != ExportFormat::Source
    }
}

/// Writes rendered SVG bytes to `path`, converting to PNG or PDF when asked.
pub fn write_rendered(
    svg: &[u8],
    path: &Path,
    format: ExportFormat,
    png_scale: f32,
) -> Result<(), String> {
    let data = match format {
        ExportFormat::Source | ExportFormat::Svg => svg.to_vec(),
        ExportFormat::Png => svg_to_png(svg, png_scale)?,
        ExportFormat::Pdf => svg_to_pdf(svg)?,
    };
    fs::write(path, data).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    info!("saved {}", path.display());
    Ok(())
}

fn svg_to_png(svg: &[u8], scale: f32) -> Result<Vec<u8>, String> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("Invalid --png-scale value: {}", scale));
    }

    let mut opts = usvg::Options::default();
    opts.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_data(svg, &opts).map_err(|e| format!("Failed to parse SVG: {}", e))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or("Failed to create pixmap")?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| format!("Failed to encode PNG: {}", e))
}

fn svg_to_pdf(svg: &[u8]) -> Result<Vec<u8>, String> {
    let mut fontdb = svg2pdf::usvg::fontdb::Database::new();
    fontdb.load_system_fonts();

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(fontdb),
        ..Default::default()
    };
    let tree = svg2pdf::usvg::Tree::from_data(svg, &opts)
        .map_err(|e| format!("Failed to parse SVG: {}", e))?;

    // Text as paths; PlantUML output names fonts that are rarely embeddable.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };
    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| format!("Failed to convert SVG to PDF: {}", e))
}

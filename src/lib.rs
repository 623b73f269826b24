mod block;
pub mod codigo;
mod config;
mod error;
mod filename;
mod inline;
mod oficio;
mod parser;
mod render;
mod sanitize;
mod typst;

pub use block::{Block, Document, ListMarker, Segment};
pub use config::{BodyConfig, Config, FontConfig, FooterConfig, LetterheadConfig, PageConfig, TextLine};
pub use error::{Error, Result};
pub use filename::filename;
pub use inline::{SUPPORTED_TAGS, segment};
pub use oficio::Oficio;
pub use parser::extract;
pub use render::{StyledSpan, TextBlock, render};
pub use sanitize::{REMOVABLE_TAGS, sanitize, strip};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Sanitize rich-text content and extract its blocks.
pub fn parse(content: &str) -> Document {
    extract(&sanitize(content))
}

/// Layout instructions for a record's content; empty when it has none.
pub fn render_content(oficio: &Oficio) -> Vec<TextBlock> {
    match oficio.contenido.as_deref() {
        Some(content) if !content.trim().is_empty() => render(&parse(content)),
        _ => Vec::new(),
    }
}

/// Output filename of a record, derived from its `Codigo`.
pub fn oficio_filename(oficio: &Oficio) -> Result<String> {
    if oficio.codigo.trim().is_empty() {
        return Err(Error::MissingCode);
    }
    Ok(filename(&oficio.codigo))
}

/// Convert a record to Typst markup using default config.
pub fn oficio_to_typst(oficio: &Oficio) -> String {
    oficio_to_typst_with_config(oficio, &Config::compiled_default())
}

/// Convert a record to Typst markup with custom config.
pub fn oficio_to_typst_with_config(oficio: &Oficio, config: &Config) -> String {
    let body = render_content(oficio);
    tracing::debug!(blocks = body.len(), "rendered letter body");
    typst::oficio_to_typst(oficio, &body, config)
}

/// Convert a record to PDF bytes using default config.
pub fn oficio_to_pdf(oficio: &Oficio) -> Result<Vec<u8>> {
    oficio_to_pdf_with_config(oficio, &Config::compiled_default())
}

/// Compile a record to a Typst document.
fn compile_document(oficio: &Oficio, config: &Config) -> Result<PagedDocument> {
    let typst_content = oficio_to_typst_with_config(oficio, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font.system_fonts);

    let mut builder = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options);
    if config.letterhead.seal.is_some() {
        builder = builder.with_file_system_resolver(config.letterhead.assets_dir.clone());
    }
    let engine = builder.build();

    let compiled = engine.compile();
    for warning in &compiled.warnings {
        tracing::warn!("typst: {}", warning.message);
    }

    compiled
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))
}

/// Convert a record to PDF bytes with custom config.
pub fn oficio_to_pdf_with_config(oficio: &Oficio, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(oficio, config)?;

    let bytes = typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Pdf(format!("{:?}", e)))?;
    tracing::info!(pages = doc.pages.len(), bytes = bytes.len(), "generated PDF");
    Ok(bytes)
}

/// Result of rendering a record to SVG pages.
pub struct SvgDocument {
    pub pages: Vec<String>,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// Render a record to SVG pages for previewing.
pub fn oficio_to_svg(oficio: &Oficio, config: &Config) -> Result<SvgDocument> {
    let doc = compile_document(oficio, config)?;

    let pages: Vec<String> = doc.pages.iter().map(typst_svg::svg).collect();

    // US Letter when nothing was laid out
    let (width_pt, height_pt) = match doc.pages.first() {
        Some(page) => {
            let size = page.frame.size();
            (size.x.to_pt(), size.y.to_pt())
        }
        None => (612.0, 792.0),
    };

    Ok(SvgDocument {
        pages,
        width_pt,
        height_pt,
    })
}

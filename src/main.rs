use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oficio::{Config, Oficio};

#[derive(Parser)]
#[command(name = "oficio")]
#[command(about = "Generate institutional letters (oficios) as PDF")]
struct Cli {
    /// Log parsing and layout details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a letter record (TOML) to PDF
    Render {
        /// Input record file
        input: PathBuf,

        /// Output file (defaults to the filename derived from Codigo, next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Letterhead config file
        #[arg(short, long, default_value = "oficio.toml")]
        config: PathBuf,

        /// Write the generated Typst markup instead of a PDF
        #[arg(long, conflicts_with = "svg")]
        typst: bool,

        /// Write one SVG per page instead of a PDF (preview)
        #[arg(long)]
        svg: bool,
    },

    /// Print the output filename for a document code
    Filename { code: String },

    /// Compose a document code
    Code {
        area: String,
        departamento: String,
        division: String,
        /// Sequence number within the issuing unit
        number: u32,

        /// Issue date (yyyy-mm-dd), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the blocks extracted from a record's content
    Inspect { input: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "oficio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            input,
            output,
            config,
            typst,
            svg,
        } => {
            let format = if typst {
                Format::Typst
            } else if svg {
                Format::Svg
            } else {
                Format::Pdf
            };
            render(&input, output, &config, format)
        }
        Command::Filename { code } => {
            println!("{}", oficio::filename(&code));
            Ok(())
        }
        Command::Code {
            area,
            departamento,
            division,
            number,
            date,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            println!(
                "{}",
                oficio::codigo::compose(&area, &departamento, &division, date, number)
            );
            Ok(())
        }
        Command::Inspect { input } => {
            let record = Oficio::load(&input)?;
            let document = oficio::parse(record.contenido.as_deref().unwrap_or(""));
            for block in &document {
                println!("{block:?}");
            }
            Ok(())
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Pdf,
    Typst,
    Svg,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Typst => "typ",
            Format::Svg => "svg",
        }
    }
}

fn render(input: &Path, output: Option<PathBuf>, config: &Path, format: Format) -> anyhow::Result<()> {
    let record = Oficio::load(input)?;
    let config = Config::load(config)?;

    if let Some(seal) = config.seal_path() {
        if !seal.exists() {
            tracing::warn!("seal image {} not found", seal.display());
        }
    }

    let output = match output {
        Some(path) => path,
        None => {
            let name = oficio::oficio_filename(&record)?;
            input.with_file_name(name).with_extension(format.extension())
        }
    };

    let files = match format {
        Format::Pdf => vec![(
            output,
            oficio::oficio_to_pdf_with_config(&record, &config)?,
        )],
        Format::Typst => vec![(
            output,
            oficio::oficio_to_typst_with_config(&record, &config).into_bytes(),
        )],
        Format::Svg => {
            let document = oficio::oficio_to_svg(&record, &config)?;
            let total = document.pages.len();
            document
                .pages
                .into_iter()
                .enumerate()
                .map(|(index, page)| (svg_page_path(&output, index, total), page.into_bytes()))
                .collect()
        }
    };

    for (path, bytes) in files {
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

/// Path of one SVG page: the output path itself for a single page,
/// `<stem>-<n>.svg` (1-based) otherwise.
fn svg_page_path(output: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}-{}.svg", index + 1))
}

#[cfg(test)]
mod tests {
    use super::{Format, svg_page_path};
    use std::path::{Path, PathBuf};

    #[test]
    fn single_page_svg_keeps_output_path() {
        assert_eq!(
            svg_page_path(Path::new("out/DG-001.svg"), 0, 1),
            PathBuf::from("out/DG-001.svg")
        );
    }

    #[test]
    fn multi_page_svg_numbers_pages_from_one() {
        let output = Path::new("out/DG-001.svg");
        assert_eq!(svg_page_path(output, 0, 3), PathBuf::from("out/DG-001-1.svg"));
        assert_eq!(svg_page_path(output, 2, 3), PathBuf::from("out/DG-001-3.svg"));
    }

    #[test]
    fn default_output_extension_follows_format() {
        let base = Path::new("records/Codigo_01-2024.pdf");
        assert_eq!(
            base.with_extension(Format::Svg.extension()),
            PathBuf::from("records/Codigo_01-2024.svg")
        );
        assert_eq!(Format::Typst.extension(), "typ");
        assert_eq!(Format::Pdf.extension(), "pdf");
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error};

use specidx::card::FormulaCard;
use specidx::document::IndexDefinition;
use specidx::mathml::Translator;
use specidx::render::Renderer;
use specidx::renderers::AsciiRenderer;
use specidx::table::{IndexRow, IndexTable};

#[derive(Parser)]
#[command(name = "specidx", version = specidx::VERSION, about = "Spectral index definition processing")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one annotated PNG image per definition file.
    Images {
        /// Directory containing `*.xml` definition files.
        xml_dir: PathBuf,

        /// Directory the images are written into.
        #[arg(short, long, default_value = "images")]
        out_dir: PathBuf,

        /// Print each formula as a character grid instead of writing PNGs.
        #[arg(long)]
        ascii: bool,
    },

    /// Export all definitions as a single CSV table.
    Table {
        /// Directory containing `*.xml` definition files.
        xml_dir: PathBuf,

        /// Path of the CSV file to write.
        #[arg(short, long, default_value = "spectral_indices_table.csv")]
        out_file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Images { xml_dir, out_dir, ascii } => {
            if ascii {
                run_ascii(&xml_dir)
            } else {
                run_images(&xml_dir, &out_dir)
            }
        }
        Command::Table { xml_dir, out_file } => run_table(&xml_dir, &out_file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// The `*.xml` files of a directory, sorted by path.
fn definition_files(xml_dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(xml_dir)
        .map_err(|e| format!("cannot read {}: {}", xml_dir.display(), e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("xml"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(format!("no XML definition files in {}", xml_dir.display()));
    }
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn run_images(xml_dir: &Path, out_dir: &Path) -> Result<(), String> {
    let files = definition_files(xml_dir)?;
    fs::create_dir_all(out_dir)
        .map_err(|e| format!("cannot create {}: {}", out_dir.display(), e))?;

    let mut processed = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let stem = file_stem(path);
        let card = match IndexDefinition::load(path) {
            Ok(definition) => {
                processed += 1;
                FormulaCard::render(&definition)
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
                FormulaCard::error(&e.to_string())
            }
        };

        let out_path = out_dir.join(format!("{}.png", stem));
        if let Err(e) = card.save(&out_path) {
            error!("{}: {}", out_path.display(), e);
        } else {
            debug!("wrote {}", out_path.display());
        }
    }

    println!("{} images written, {} errors", processed, failed);
    Ok(())
}

fn run_ascii(xml_dir: &Path) -> Result<(), String> {
    let files = definition_files(xml_dir)?;

    let mut processed = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let stem = file_stem(path);
        match IndexDefinition::load(path) {
            Ok(definition) => {
                processed += 1;
                println!("{}:", definition.name);
                match Translator::parse_expression(definition.formula.as_ref()) {
                    Some(expr) => {
                        let mut renderer = AsciiRenderer::default();
                        renderer.draw_all(&expr);
                        println!("{}", renderer.to_string());
                    }
                    None => println!("(no formula)"),
                }
                println!();
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
                println!("{}: error: {}", stem, e);
                println!();
            }
        }
    }

    println!("{} formulas rendered, {} errors", processed, failed);
    Ok(())
}

fn run_table(xml_dir: &Path, out_file: &Path) -> Result<(), String> {
    let files = definition_files(xml_dir)?;

    let mut table = IndexTable::new();
    let mut processed = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let stem = file_stem(path);
        match IndexDefinition::load(path) {
            Ok(definition) => {
                processed += 1;
                table.push(IndexRow::from_definition(&definition));
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
                table.push(IndexRow::error(&stem, &e.to_string()));
            }
        }
    }

    table.sort();
    table
        .write_csv(out_file)
        .map_err(|e| format!("cannot write {}: {}", out_file.display(), e))?;

    println!(
        "{} definitions processed, {} errors; {} rows written to {}",
        processed,
        failed,
        table.len(),
        out_file.display()
    );
    Ok(())
}

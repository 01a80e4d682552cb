//! Drafter CLI
//!
//! Renders one of the built-in scenes as SVG on stdout. Diagnostics go to
//! stderr; the process exits non-zero when the scene's constraints are
//! unsatisfiable.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use drafter::{scenes, Document, DocumentError, RenderConfig, Stylesheet, SvgConfig};

#[derive(Parser)]
#[command(name = "drafter")]
#[command(about = "Declarative constraint-based drawing engine")]
struct Cli {
    /// Scene to render
    #[arg(value_enum, default_value_t = Scene::Tiers)]
    scene: Scene,

    /// Stylesheet file for fill color resolution (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Emit compact single-line SVG
    #[arg(short, long)]
    compact: bool,

    /// Include the XML declaration
    #[arg(long)]
    standalone: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scene {
    /// Tiered rectangles separated by a pairwise rule
    Tiers,
    /// An unpinned rectangle held inside a pinned frame
    Inset,
    /// A square and a circle sharing a width
    Squircle,
    /// A fizzbuzz-colored grid chained by relative constraints
    Mosaic,
}

fn build(scene: Scene) -> Result<Document, DocumentError> {
    match scene {
        Scene::Tiers => scenes::tiers(),
        Scene::Inset => scenes::inset(),
        Scene::Squircle => scenes::squircle(),
        Scene::Mosaic => scenes::mosaic(),
    }
}

fn main() {
    let cli = Cli::parse();

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let doc = match build(cli.scene) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let config = RenderConfig::new().with_stylesheet(stylesheet).with_svg(
        SvgConfig::new()
            .with_pretty_print(!cli.compact)
            .with_standalone(cli.standalone),
    );
    match doc.render_with(&config) {
        Ok(svg) => println!("{svg}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

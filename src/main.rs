use clap::Parser;
use std::path::PathBuf;

use docxside_reflow::ReflowOptions;

#[derive(Parser)]
#[command(name = "docxside-reflow", about = "Lay out a paragraph into lines")]
struct Args {
    /// Input paragraph block (JSON)
    input: PathBuf,
    /// Output file for the measured lines (defaults to stdout)
    output: Option<PathBuf>,
    /// Available width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: f32,
    /// First-line indent in pixels, replacing the paragraph's own
    #[arg(long, allow_negative_numbers = true)]
    first_line_indent: Option<f32>,
    /// Measure with installed fonts (see DOCXSIDE_FONTS)
    #[arg(long)]
    font_metrics: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: file not found: {}", args.input.display());
        std::process::exit(1);
    }
    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let options = ReflowOptions {
        max_width: args.width,
        first_line_indent: args.first_line_indent,
        font_metrics: args.font_metrics,
    };

    let measure = match docxside_reflow::reflow_paragraph_file(&args.input, &options) {
        Ok(measure) => measure,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let json = match serde_json::to_string_pretty(&measure) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, json) {
                eprintln!("Error: cannot write {}: {e}", path.display());
                std::process::exit(1);
            }
        }
        None => println!("{json}"),
    }
}

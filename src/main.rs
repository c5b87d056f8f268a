//! # chatpairs CLI
//!
//! Command-line interface for the chatpairs library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatpairs::ChatpairsError;
use chatpairs::cli::Args;
use chatpairs::config::{WhatsAppConfig, WhatsAppMode};
use chatpairs::parser::{Converter, Source};
use chatpairs::parsers::{
    MovieScriptConverter, NestedJsonlConverter, UtteranceConverter, WhatsAppPlainParser,
    WhatsAppReconstructor,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatpairsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let output_path = args.output_path();

    println!("📦 chatpairs v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", args.source);
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path.display());
    if args.source == Source::WhatsApp {
        if args.plain {
            println!("📄 Mode:    Plain");
        } else {
            println!("⏱️  Window:  {} min", args.window);
        }
    }
    println!();

    let input = Path::new(&args.input);
    match args.source {
        Source::WhatsApp => {
            let mode = if args.plain {
                WhatsAppMode::Plain
            } else {
                WhatsAppMode::Linked
            };
            let config = WhatsAppConfig::new()
                .with_mode(mode)
                .with_response_window(args.window);
            match config.mode {
                WhatsAppMode::Linked => {
                    run_converter(&WhatsAppReconstructor::with_config(config), input, &output_path)?;
                }
                WhatsAppMode::Plain => {
                    run_converter(&WhatsAppPlainParser::with_config(config), input, &output_path)?;
                }
            }
        }
        Source::Utterances => run_converter(&UtteranceConverter::new(), input, &output_path)?,
        Source::MovieScript => run_converter(&MovieScriptConverter::new(), input, &output_path)?,
        Source::NestedJsonl => run_converter(&NestedJsonlConverter::new(), input, &output_path)?,
    }

    println!();
    println!("⚡ Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

/// Converts `input` and writes the table to `output`.
fn run_converter<C: Converter>(converter: &C, input: &Path, output: &Path) -> Result<(), ChatpairsError> {
    println!("⏳ Converting {}...", converter.name());
    let start = Instant::now();
    let conversion = converter.convert(input)?;
    println!(
        "   Parsed {} of {} lines ({:.2}s)",
        conversion.stats.parsed,
        conversion.stats.input_lines,
        start.elapsed().as_secs_f64()
    );

    if conversion.is_empty() && !converter.write_when_empty() {
        println!();
        println!("⚠️  Nothing to write, no output created");
        return Ok(());
    }

    println!("💾 Writing {} rows...", conversion.len());
    let write_start = Instant::now();
    converter.write(&conversion.records, output)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output.display());

    let stats = &conversion.stats;
    println!();
    println!("📊 Summary:");
    println!("   Input lines:  {}", stats.input_lines);
    println!("   Parsed:       {}", stats.parsed);
    println!("   Skipped:      {}", stats.skipped);
    println!("   Written:      {} rows ({:.1}% of parsed)", stats.written, stats.yield_ratio());

    Ok(())
}

use std::path::Path;
use std::sync::Arc;

use specimen::config::Config;
use specimen::glyphs;
use specimen::loader::{CollectingSink, FileFetcher, FontLoadManager, SharedRegistry};
use specimen::typeface::{Typeface, TypefaceRecord};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        match toml::to_string_pretty(&Config::default()) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("specimen {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.len() < 3 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let result = match args[1].as_str() {
        "load" => cmd_load(&args[2]),
        "glyphs" => cmd_glyphs(&args[2], &args[3..]),
        other => {
            eprintln!("error: unknown command {other:?}");
            print_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_help() {
    println!("specimen {}", env!("CARGO_PKG_VERSION"));
    println!("Interactive typeface preview engine\n");
    println!("USAGE:");
    println!("    specimen load <manifest.toml>");
    println!("    specimen glyphs <manifest.toml> [--style NAME] [--svg DIR]\n");
    println!("OPTIONS:");
    println!("    --print-config    Print the default configuration to stdout");
    println!("    --version, -V     Print version information");
    println!("    --help, -h        Print this help message");
}

fn read_typeface(manifest: &str) -> Result<(Typeface, FileFetcher), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(manifest)?;
    let record: TypefaceRecord = toml::from_str(&text)?;
    let root = Path::new(manifest).parent().unwrap_or(Path::new("."));
    Ok((Typeface::from_record(&record), FileFetcher::new(root)))
}

/// Load every style of the manifest's typeface and report final states.
fn cmd_load(manifest: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (typeface, fetcher) = read_typeface(manifest)?;
    println!("typeface: {} ({} styles)", typeface.family, typeface.styles.len());

    let registry = Arc::new(SharedRegistry::new());
    let hints = Arc::new(CollectingSink::new());
    let (manager, _events) = FontLoadManager::new(registry.clone(), Arc::new(fetcher));
    let manager = manager.with_preload_sink(hints.clone());

    manager.load_all(&typeface.styles).wait();

    for url in hints.hinted() {
        println!("preload: {url}");
    }
    let snapshot = manager.snapshot();
    let mut ids: Vec<&String> = snapshot.keys().collect();
    ids.sort();
    for id in ids {
        println!("{id}: {:?}", snapshot[id]);
    }
    println!(
        "family {:?} loaded: {}",
        typeface.family,
        manager.is_loaded(&typeface.family)
    );
    Ok(())
}

/// Extract the glyph gallery for one style of the manifest's typeface.
fn cmd_glyphs(manifest: &str, rest: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let (typeface, fetcher) = read_typeface(manifest)?;

    let style_name = flag_value(rest, "--style");
    let descriptor = match style_name {
        Some(name) => typeface
            .style(name)
            .ok_or_else(|| format!("no style named {name:?}"))?,
        None => typeface.primary().ok_or("typeface has no styles")?,
    };
    let Some(source_url) = descriptor.source_url.clone() else {
        println!("{}: no source font, glyph inspector unavailable", descriptor.id);
        return Ok(());
    };

    let glyphs = glyphs::extract(&fetcher, &source_url)?;
    println!("{}: {} glyphs", descriptor.id, glyphs.len());
    for glyph in &glyphs {
        match glyph.unicode {
            Some(cp) => println!("U+{cp:04X}  {}  adv {}", glyph.name, glyph.advance_width),
            None => println!("......  {}  adv {}", glyph.name, glyph.advance_width),
        }
    }

    if let Some(dir) = flag_value(rest, "--svg") {
        let config = Config::default();
        let size = config.preview.effective_font_size() * config.preview.glyph_cell_scale;
        std::fs::create_dir_all(dir)?;
        for glyph in &glyphs {
            let file = Path::new(dir).join(format!("{}.svg", sanitize(&glyph.name)));
            std::fs::write(&file, glyphs::svg_document(glyph, size))?;
        }
        println!("wrote {} svg files to {dir}", glyphs.len());
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

//! papyrus-lex - print Papyrus scripts with lexer styles, folds and matches

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use papyrus_lex::error::{LexError, Result};
use papyrus_lex::host::Host;
use papyrus_lex::render::Renderer;
use papyrus_lex::syntax::LineEndState;
use papyrus_lex::{Buffer, Config, DocumentLexer};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    folds: bool,
    /// 1-based line and display column
    caret: Option<(usize, usize)>,
    profile: Option<String>,
    file: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --help and --version
    if let Some(first) = args.first() {
        match first.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    let options = parse_args(&args)?;
    let Some(file) = &options.file else {
        print_usage();
        return Err(LexError::InvalidArgument("no input file".to_string()));
    };

    let mut config = match &options.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(name) = &options.profile {
        config.select_profile(name)?;
    }

    let mut buffer = Buffer::from_file(file)?;
    let mut lexer = DocumentLexer::new(config);
    let last = buffer.line_count() - 1;
    lexer.restyle(&mut buffer, 0..=last, LineEndState::Default);

    let mut renderer = Renderer::new(io::stdout());
    if options.folds {
        lexer.fold_lines(&mut buffer, 0..=last);
        renderer.show_folds = true;
    }
    renderer.render(&buffer)?;

    if let Some((line, col)) = options.caret {
        let caret = caret_offset(&buffer, line, col)?;
        let result = lexer.match_at(&mut buffer, caret);
        renderer.render_match(&buffer, &result)?;
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => options.config = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--folds" => options.folds = true,
            "--match" => options.caret = Some(parse_caret(value(&mut iter, arg)?)?),
            "--profile" => options.profile = Some(value(&mut iter, arg)?.to_string()),
            _ if arg.starts_with('-') => {
                return Err(LexError::InvalidArgument(format!("unknown option {}", arg)));
            }
            _ => options.file = Some(PathBuf::from(arg)),
        }
    }
    Ok(options)
}

fn value<'a>(iter: &mut std::slice::Iter<'a, String>, option: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| LexError::InvalidArgument(format!("{} needs a value", option)))
}

/// Parse `LINE:COL`, both 1-based
fn parse_caret(spec: &str) -> Result<(usize, usize)> {
    let invalid = || LexError::InvalidArgument(format!("expected LINE:COL, got {}", spec));
    let (line, col) = spec.split_once(':').ok_or_else(invalid)?;
    let line: usize = line.parse().map_err(|_| invalid())?;
    let col: usize = col.parse().map_err(|_| invalid())?;
    if line == 0 || col == 0 {
        return Err(invalid());
    }
    Ok((line, col))
}

/// Document offset of a 1-based line and display column
fn caret_offset(buffer: &Buffer, line: usize, col: usize) -> Result<usize> {
    let text = buffer
        .line(line - 1)
        .ok_or_else(|| LexError::InvalidArgument(format!("no line {}", line)))?;
    let byte = text
        .col_to_byte(col - 1)
        .ok_or_else(|| LexError::InvalidArgument(format!("no column {} on line {}", col, line)))?;
    Ok(buffer.line_start(line - 1) + byte)
}

fn print_usage() {
    println!("papyrus-lex {} - Papyrus script lexer", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: papyrus-lex [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  --config PATH     Read settings from PATH instead of ~/.papyrus-lex.toml");
    println!("  --folds           Show fold levels ('+' marks a fold header)");
    println!("  --match LINE:COL  Match the block keyword at LINE:COL");
    println!("  --profile NAME    Resolve class names with profile NAME");
    println!("  -h, --help        Show this help message");
    println!("  -V, --version     Show version information");
    println!();
    println!("Set RUST_LOG=debug to trace lexer passes.");
}

fn print_version() {
    println!("papyrus-lex {}", env!("CARGO_PKG_VERSION"));
}

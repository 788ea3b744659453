//! Command-line interface for Metaphor
//! This binary compiles a Metaphor file, with everything it includes and embeds, into a prompt.
//!
//! Usage:
//!   m6rc `<path>` [-o `<output>`] [-I `<dir>`]...             - Compile to prompt text
//!   m6rc `<path>` --format treeviz|json|yaml|tokens          - Inspect the parsed tree or tokens
//!   m6rc `<path>` --config `<metaphor.toml>`                   - Layer settings over the defaults
//!
//! Exit codes: 0 on success, 1 for unusable arguments or files, 255 when the document has
//! syntax errors.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;
use metaphor_config::{ConfigError, Loader, MetaphorConfig, OutputFormat};
use metaphor_parser::metaphor::formats::{tokens_to_json_str, FormatRegistry, PromptFormatter};
use metaphor_parser::metaphor::lexing::IndentationLexer;
use metaphor_parser::metaphor::parsing::{parse_document, ParseErrors, ParseOptions};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

const LOCAL_CONFIG: &str = "metaphor.toml";
const EXIT_FAILURE: i32 = 1;
const EXIT_SYNTAX_ERRORS: i32 = 255;
const SEPARATOR: &str = "----------------";

fn build_cli() -> Command {
    Command::new("m6rc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile Metaphor files into prompts")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file to parse")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("outputFile")
                .visible_alias("output")
                .short('o')
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .short('I')
                .help("Specify an include path, searched in the order given")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from config: prompt)")
                .value_parser(PossibleValuesParser::new(
                    OutputFormat::ALL.map(|format| format.as_str()),
                )),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("indent-spaces")
                .long("indent-spaces")
                .help("Spaces per indentation level")
                .value_parser(value_parser!(u8).range(1..)),
        )
        .arg(
            Arg::new("no-preamble")
                .long("no-preamble")
                .help("Omit the explanation of Metaphor from prompt output")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: no input file given");
        process::exit(EXIT_FAILURE);
    };

    if !Path::new(input).exists() {
        eprintln!("Error: File {} not found", input);
        process::exit(EXIT_FAILURE);
    }

    let mut search_paths: Vec<PathBuf> = matches
        .get_many::<String>("include")
        .into_iter()
        .flatten()
        .map(PathBuf::from)
        .collect();
    check_directories(&search_paths);

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    });
    check_directories(&config.parser.search_paths);
    search_paths.extend(config.parser.search_paths.iter().cloned());
    debug!("search paths: {:?}", search_paths);
    debug!("output format: {}", config.output.format);

    let mut out = open_output(matches.get_one::<String>("output"));

    let rendered = match config.output.format {
        OutputFormat::Tokens => render_tokens(input, config.parser.indent_spaces),
        format => {
            let options = ParseOptions::default()
                .with_indent_spaces(config.parser.indent_spaces)
                .with_search_paths(search_paths);
            let doc = parse_document(input, &options).unwrap_or_else(|errors| {
                report_syntax_errors(&errors);
                process::exit(EXIT_SYNTAX_ERRORS);
            });

            let mut registry = FormatRegistry::with_defaults();
            registry.register(PromptFormatter {
                preamble: config.output.preamble,
            });
            registry
                .serialize(&doc, format.as_str())
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(EXIT_FAILURE);
                })
        }
    };

    if let Err(e) = out.write_all(rendered.as_bytes()).and_then(|_| out.flush()) {
        eprintln!("Error: Could not write output: {}", e);
        process::exit(EXIT_FAILURE);
    }
}

fn check_directories(dirs: &[PathBuf]) {
    for dir in dirs {
        if !dir.is_dir() {
            eprintln!("Error: {}: is not a valid directory", dir.display());
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Defaults, then `./metaphor.toml` if present, then `--config`, then the individual
/// command-line flags.
fn load_config(matches: &ArgMatches) -> Result<MetaphorConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(spaces) = matches.get_one::<u8>("indent-spaces") {
        loader = loader.set_override("parser.indent_spaces", i64::from(*spaces))?;
    }
    if matches.get_flag("no-preamble") {
        loader = loader.set_override("output.preamble", false)?;
    }
    loader.build()
}

fn open_output(path: Option<&String>) -> Box<dyn Write> {
    match path {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(io::BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error: Could not open output file {}: {}", path, e);
                process::exit(EXIT_FAILURE);
            }
        },
        None => Box::new(io::stdout().lock()),
    }
}

/// The entry file's own tokens, without following `Include:` or `Embed:`.
fn render_tokens(input: &str, indent_spaces: usize) -> String {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error: Could not read {}: {}", input, e);
        process::exit(EXIT_FAILURE);
    });
    let tokens = IndentationLexer::tokenize_all(&source, input, indent_spaces);
    let mut json = tokens_to_json_str(&tokens).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    });
    json.push('\n');
    json
}

fn report_syntax_errors(errors: &ParseErrors) {
    for error in errors.iter() {
        eprintln!("{}\n{}", SEPARATOR, error);
    }
    eprintln!("{}\n", SEPARATOR);
}

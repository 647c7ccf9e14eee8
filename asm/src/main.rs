use std::path::Path;
use std::process::ExitCode;

use asm65::{Assembler, Config, Error};
use clap::Parser;
use color_print::cprintln;
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file [default: input with a `.bin` extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Initial origin (`$hex`, `0xhex` or decimal), overrides the config file
    #[clap(long, value_parser = parse_origin)]
    origin: Option<u16>,

    /// YAML config with `origin` and predefined `symbols`
    #[clap(short, long)]
    config: Option<String>,

    /// Dump assembled listing
    #[clap(short, long)]
    dump: bool,

    /// Print a hex dump of the image
    #[clap(short = 'x', long)]
    hex: bool,

    /// Write the symbol table as YAML
    #[clap(long)]
    symbols: Option<String>,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn parse_origin(s: &str) -> Result<u16, String> {
    match s.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => asm65::operand::parse_number(s).map_err(|e| e.to_string()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, Error> {
    println!("6502 Assembler");

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(origin) = args.origin {
        config.origin = origin;
    }
    tracing::debug!(?config, "configuration");

    println!("1. Read File and Assemble");
    println!("  < {}", args.input);
    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?;
    let lines: Vec<&str> = source.lines().collect();

    let program = match Assembler::new(&config).assemble(&source) {
        Ok(program) => program,
        Err(diag) => {
            diag.print_diag(&args.input, &lines);
            return Ok(ExitCode::FAILURE);
        }
    };

    let output = match &args.output {
        Some(output) => output.clone(),
        None => Path::new(&args.input)
            .with_extension("bin")
            .to_string_lossy()
            .into_owned(),
    };
    println!("2. Write Binary");
    println!(
        "  > {} ({} bytes from ${:04X})",
        output,
        program.bytes.len(),
        program.origin
    );
    std::fs::write(&output, &program.bytes).map_err(|e| Error::FileWrite(output.clone(), e))?;

    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        let yaml = serde_yaml::to_string(&program.symbols)
            .map_err(|e| Error::SymbolDump(path.clone(), e))?;
        std::fs::write(path, yaml).map_err(|e| Error::FileWrite(path.clone(), e))?;
    }

    if args.dump {
        asm65::util::print_dump(&args.input, &lines, &program);
    }
    if args.hex {
        asm65::util::print_hex(&program);
    }

    Ok(ExitCode::SUCCESS)
}

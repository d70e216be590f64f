use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use labxml::decoders::DxMode;

mod config;
mod convert;
mod run;

/// labxml - Chromatography vendor file to XML and text report converter
#[derive(Parser)]
#[command(name = "labxml-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output detail of the `.dx` extraction script.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DxModeArg {
    /// Signals and results only
    Clean,
    /// Everything the container holds
    Full,
}

impl From<DxModeArg> for DxMode {
    fn from(arg: DxModeArg) -> Self {
        match arg {
            DxModeArg::Clean => DxMode::Clean,
            DxModeArg::Full => DxMode::Full,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a data tree and convert every supported file in it
    Run {
        /// Directory scanned for instrument data (never modified)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Directory receiving the converted copy
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Detail level passed to the .dx script
        #[arg(long, value_enum)]
        mode: Option<DxModeArg>,

        /// Interpreter used to run the .dx script
        #[arg(long, value_name = "PATH")]
        interpreter: Option<PathBuf>,

        /// Path of the .dx extraction script
        #[arg(long, value_name = "PATH")]
        script: Option<PathBuf>,

        /// Leave .dx files untouched
        #[arg(long)]
        skip_dx: bool,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode the embedded XmlContent blocks of an .scml file
    Scml {
        /// Input .scml file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output XML path (defaults to <base>_scml.xml)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Copy an .acaml, .acmd or .mfx file to an .xml name
    Rename {
        /// Input file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file name (defaults to <base>.xml)
        #[arg(long)]
        name: Option<String>,

        /// Directory for the output (defaults to the input's directory)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Render a text report for an XML file
    Report {
        /// Input XML file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output text path (prints to stdout when omitted)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Extract a .dx container through the external interpreter
    Dx {
        /// Input .dx file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Detail level passed to the script
        #[arg(long, value_enum, default_value = "clean")]
        mode: DxModeArg,

        /// Interpreter used to run the script
        #[arg(long, value_name = "PATH")]
        interpreter: Option<PathBuf>,

        /// Path of the extraction script
        #[arg(long, value_name = "PATH")]
        script: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            input,
            output,
            config,
            mode,
            interpreter,
            script,
            skip_dx,
            json,
        } => run::run(run::RunArgs {
            input,
            output,
            config,
            mode: mode.map(DxMode::from),
            interpreter,
            script,
            skip_dx,
            json,
        }),
        Commands::Scml { input, output } => convert::scml(input, output),
        Commands::Rename {
            input,
            name,
            output_dir,
        } => convert::rename(input, name, output_dir),
        Commands::Report { input, output } => convert::report(input, output),
        Commands::Dx {
            input,
            mode,
            interpreter,
            script,
        } => convert::dx(input, DxMode::from(mode), interpreter, script),
    }
}

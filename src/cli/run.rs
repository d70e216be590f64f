use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use labxml::decoders::{DxConverter, DxMode};
use labxml::pipeline::{Pipeline, PipelineConfig, PipelineSummary};

use super::config::Config;

/// Arguments of the `run` command
pub struct RunArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub mode: Option<DxMode>,
    pub interpreter: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub skip_dx: bool,
    pub json: bool,
}

/// Copy the input tree and convert everything in it
pub fn run(args: RunArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let json = args.json;
    let config = resolve_config(args, file_config);

    info!("labxml - batch conversion");
    info!("=========================");
    info!("Input:  {}", config.input_dir.display());
    info!("Output: {}", config.output_dir.display());
    if config.skip_dx {
        info!(".dx stage: skipped");
    } else {
        info!(".dx mode: {}", config.dx.mode());
    }

    let pipeline = Pipeline::new(config);
    let summary = pipeline.run().context("Pipeline run aborted")?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", rendered);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// CLI flags win over file values, file values over defaults
fn resolve_config(args: RunArgs, file: Config) -> PipelineConfig {
    let defaults = PipelineConfig::default();

    let mut dx = DxConverter::new();
    if let Some(interpreter) = args.interpreter.or(file.dx.interpreter) {
        dx = dx.with_interpreter(interpreter);
    }
    if let Some(interpreter_args) = file.dx.interpreter_args {
        dx = dx.with_interpreter_args(interpreter_args);
    }
    if let Some(script) = args.script.or(file.dx.script) {
        dx = dx.with_script(script);
    }
    if let Some(mode) = args.mode.or(file.dx.mode) {
        dx = dx.with_mode(mode);
    }

    PipelineConfig {
        input_dir: args
            .input
            .or(file.pipeline.input_dir)
            .unwrap_or(defaults.input_dir),
        output_dir: args
            .output
            .or(file.pipeline.output_dir)
            .unwrap_or(defaults.output_dir),
        dx,
        skip_dx: args.skip_dx || file.pipeline.skip_dx.unwrap_or(false),
    }
}

fn print_summary(summary: &PipelineSummary) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;

        println!("{}", style("Conversion Summary").bold().cyan());
        println!("{}", style("==================").cyan());
        println!("{}: {}\n", style("Output").bold(), summary.output_root.display());
        for stats in &summary.stages {
            println!(
                "{:<34} {:>4} found, {} converted, {} skipped, {} failed, {} removed",
                style(stats.stage.title()).bold(),
                stats.discovered,
                style(stats.converted).green(),
                style(stats.skipped).yellow(),
                style(stats.failed).red(),
                stats.removed
            );
        }
        println!();
        if summary.total_failed() > 0 {
            println!(
                "{}",
                style(format!("Completed with {} failures", summary.total_failed()))
                    .red()
                    .bold()
            );
        } else {
            println!("{}", style("Completed successfully").green().bold());
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("Conversion Summary");
        println!("==================");
        println!("Output: {}\n", summary.output_root.display());
        for stats in &summary.stages {
            println!(
                "{:<34} {:>4} found, {} converted, {} skipped, {} failed, {} removed",
                stats.stage.title(),
                stats.discovered,
                stats.converted,
                stats.skipped,
                stats.failed,
                stats.removed
            );
        }
        println!();
        if summary.total_failed() > 0 {
            println!("Completed with {} failures", summary.total_failed());
        } else {
            println!("Completed successfully");
        }
    }
}

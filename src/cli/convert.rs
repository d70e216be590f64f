use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use labxml::decoders::{copy_rename, scml_to_xml, DxConverter, DxMode};
use labxml::report::render_file;

fn require_input(input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    Ok(())
}

/// Decode one .scml file
pub fn scml(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    require_input(&input)?;
    let written = scml_to_xml(&input, output.as_deref())
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    println!("{}", written.display());
    Ok(())
}

/// Copy one vendor file to an .xml name
pub fn rename(input: PathBuf, name: Option<String>, output_dir: Option<PathBuf>) -> Result<()> {
    require_input(&input)?;
    let dir = match output_dir {
        Some(dir) => dir,
        None => input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let written = copy_rename(&input, &dir, name.as_deref())
        .with_context(|| format!("Failed to rename {}", input.display()))?;
    println!("{}", written.display());
    Ok(())
}

/// Render one XML file to a report
pub fn report(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    require_input(&input)?;
    let report = render_file(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    match report.schema {
        Some(schema) => info!("Detected schema: {}", schema),
        None => info!("Not well-formed XML, dumping raw content"),
    }

    match output {
        Some(path) => {
            fs::write(&path, report.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{}", report.text),
    }
    Ok(())
}

/// Run the external interpreter on one .dx file
pub fn dx(
    input: PathBuf,
    mode: DxMode,
    interpreter: Option<PathBuf>,
    script: Option<PathBuf>,
) -> Result<()> {
    require_input(&input)?;
    let mut converter = DxConverter::new().with_mode(mode);
    if let Some(interpreter) = interpreter {
        converter = converter.with_interpreter(interpreter);
    }
    if let Some(script) = script {
        converter = converter.with_script(script);
    }

    let written = converter
        .convert(&input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    println!("{}", written.display());
    Ok(())
}

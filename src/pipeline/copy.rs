use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use walkdir::WalkDir;

use super::PipelineError;

fn copy_error(path: &Path) -> impl FnOnce(io::Error) -> PipelineError + '_ {
    move |source| PipelineError::Copy {
        path: path.to_path_buf(),
        source,
    }
}

/// Copy every entry of `input` into `output`, replacing stale copies
///
/// The input tree is only read. Returns the number of top-level entries
/// copied.
pub fn copy_tree(input: &Path, output: &Path) -> Result<usize, PipelineError> {
    if !input.is_dir() {
        return Err(PipelineError::InputDirMissing(input.to_path_buf()));
    }

    let input_abs = input.canonicalize().map_err(copy_error(input))?;
    let output_abs = resolve(output).map_err(copy_error(output))?;
    if output_abs.starts_with(&input_abs) || input_abs.starts_with(&output_abs) {
        return Err(PipelineError::NestedOutput {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
    }
    fs::create_dir_all(output).map_err(copy_error(output))?;

    let mut entries: Vec<PathBuf> = fs::read_dir(input)
        .map_err(copy_error(input))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(copy_error(input))?;
    entries.sort();

    for source in &entries {
        let Some(name) = source.file_name() else {
            continue;
        };
        let dest = output.join(name);

        if dest.exists() {
            remove_entry(&dest).map_err(copy_error(&dest))?;
            info!("Cleaned existing: {}", dest.display());
        }

        copy_entry(source, &dest)?;
        info!("Copied: {} -> {}", source.display(), dest.display());
    }

    Ok(entries.len())
}

/// Canonicalize a path that may not exist yet
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    let mut resolved = existing.canonicalize()?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Copy a file, or a directory recursively
fn copy_entry(source: &Path, dest: &Path) -> Result<(), PipelineError> {
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::Copy {
            path: source.to_path_buf(),
            source: io::Error::from(e),
        })?;
        let target = match entry.path().strip_prefix(source) {
            Ok(relative) if !relative.as_os_str().is_empty() => dest.join(relative),
            _ => dest.to_path_buf(),
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(copy_error(&target))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(copy_error(parent))?;
            }
            fs::copy(entry.path(), &target).map_err(copy_error(entry.path()))?;
        }
    }
    Ok(())
}

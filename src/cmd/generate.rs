//! Generate command implementation.

use crate::catalog::SnapshotFile;
use crate::config::{OptionOverrides, RenderOptions};
use crate::pipeline::generate;
use crate::render::DiagramStyle;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File extensions accepted for diagram output
const DIAGRAM_EXTENSIONS: [&str; 3] = ["puml", "plantuml", "pu"];

pub struct GenerateArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub diagram_type: String,
    pub config: Option<PathBuf>,
    pub overrides: OptionOverrides,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let style: DiagramStyle = args.diagram_type.parse()?;

    if let Some(ref out) = args.output {
        check_output_extension(out)?;
    }

    if !args.file.exists() {
        bail!("input file does not exist: {}", args.file.display());
    }

    let mut options = match args.config {
        Some(ref path) => {
            if !path.exists() {
                bail!("config file does not exist: {}", path.display());
            }
            RenderOptions::load(path)?
        }
        None => RenderOptions::default(),
    };
    options.apply(&args.overrides);

    let source = SnapshotFile::new(&args.file);
    let generated = generate(&source, &options, style, Utc::now())?;

    match args.output {
        Some(ref out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(out, &generated.text)
                .with_context(|| format!("failed to write diagram: {}", out.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(generated.text.as_bytes())?;
            handle.flush()?;
        }
    }

    for warning in &generated.warnings {
        eprintln!("⚠ {}", warning);
    }

    let stats = generated.stats;
    eprintln!(
        "Diagram: {} tables, {} columns, {} relationships",
        stats.tables, stats.columns, stats.relationships
    );
    if let Some(ref out) = args.output {
        eprintln!("Written to {} [{}]", out.display(), style);
    }

    Ok(())
}

/// Reject output paths without a PlantUML extension
fn check_output_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some(e) if DIAGRAM_EXTENSIONS.contains(&e) => Ok(()),
        _ => bail!(
            "output file must have a .puml, .plantuml or .pu extension: {}",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_extension() {
        assert!(check_output_extension(Path::new("erd.puml")).is_ok());
        assert!(check_output_extension(Path::new("out/erd.PlantUML")).is_ok());
        assert!(check_output_extension(Path::new("erd.pu")).is_ok());
        assert!(check_output_extension(Path::new("erd.png")).is_err());
        assert!(check_output_extension(Path::new("erd")).is_err());
    }
}

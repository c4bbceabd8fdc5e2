//! Writing PNG, SVG and JSON outputs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use domeshed::drawing::{build_sheet, render_svg, save_png};
use domeshed::StructureGeometry;
use tracing::info;

/// Where the PNG for `pitch` goes when no path is given.
#[must_use]
pub fn default_png_path(pitch_degrees: f64) -> PathBuf {
    PathBuf::from(format!("hideout-{pitch_degrees:.0}deg.png"))
}

/// Requested output files and canvas size.
#[derive(Debug, Clone)]
pub struct ExportTargets {
    /// Raster drawing.
    pub png: PathBuf,
    /// Optional vector drawing.
    pub svg: Option<PathBuf>,
    /// Optional geometry dump.
    pub json: Option<PathBuf>,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Write every requested file and return the paths written, PNG first.
///
/// # Errors
///
/// Fails when a drawing cannot be rendered or a file cannot be written.
pub fn export(geometry: &StructureGeometry, targets: &ExportTargets) -> Result<Vec<PathBuf>> {
    let sheet = build_sheet(geometry);
    let mut written = Vec::new();

    save_png(&sheet, targets.width, targets.height, &targets.png)
        .with_context(|| format!("failed to write {}", targets.png.display()))?;
    written.push(targets.png.clone());

    if let Some(path) = &targets.svg {
        write_file(path, &render_svg(&sheet, targets.width, targets.height))?;
        written.push(path.clone());
    }
    if let Some(path) = &targets.json {
        let json = geometry
            .to_json()
            .context("failed to serialise the solved geometry")?;
        write_file(path, &json)?;
        written.push(path.clone());
    }
    Ok(written)
}

/// Write a text file and log it.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domeshed::{solve, StructureParameters};

    #[test]
    fn default_path_names_the_pitch() {
        assert_eq!(default_png_path(30.0), PathBuf::from("hideout-30deg.png"));
        assert_eq!(default_png_path(25.0), PathBuf::from("hideout-25deg.png"));
    }

    #[test]
    fn writes_every_requested_file() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let targets = ExportTargets {
            png: directory.path().join("shed.png"),
            svg: Some(directory.path().join("shed.svg")),
            json: Some(directory.path().join("shed.json")),
            width: 440,
            height: 200,
        };
        let written = export(&geometry, &targets).expect("export succeeds");
        assert_eq!(written.len(), 3);
        assert_eq!(written[0], targets.png);
        for path in &written {
            assert!(fs::metadata(path).expect("file exists").len() > 0);
        }
        let json = fs::read_to_string(directory.path().join("shed.json")).expect("json");
        assert!(json.contains("horizontal_span"));
    }

    #[test]
    fn unwritable_path_reports_context() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let targets = ExportTargets {
            png: directory.path().join("missing").join("shed.png"),
            svg: None,
            json: None,
            width: 440,
            height: 200,
        };
        let error = export(&geometry, &targets).expect_err("parent directory is missing");
        assert!(error.to_string().contains("failed to write"));
    }
}

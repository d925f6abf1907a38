//! Build dependency file output
//!
//! Writes a Makefile-style depfile so the surrounding build system re-runs
//! generation when any source file changes:
//!
//! ```text
//! gen/param_cfg.h: etc/param/system.para vendor/param/vendor.para
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during depfile operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DepfileError {
    /// Depfile would overwrite the generated output
    #[error("depfile {} must differ from the output path", .0.display())]
    SameAsOutput(PathBuf),
    /// Depfile path looks like a stamp file
    #[error("depfile {} must not be a .stamp file", .0.display())]
    StampPath(PathBuf),
    /// IO error
    #[error("Failed to write depfile {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn escape_path(path: &Path) -> String {
    path.to_string_lossy().replace(' ', "\\ ")
}

/// Render the depfile text for `output` depending on `inputs`.
pub fn render_depfile(output: &Path, inputs: &[PathBuf]) -> String {
    let deps: Vec<String> = inputs.iter().map(|p| escape_path(p)).collect();
    format!("{}: {}\n", escape_path(output), deps.join(" "))
}

/// Write the depfile, creating its parent directory if needed.
///
/// Inputs are recorded even when they don't exist, so adding a previously
/// missing source file triggers regeneration.
pub fn write_depfile(
    depfile: &Path,
    output: &Path,
    inputs: &[PathBuf],
) -> Result<(), DepfileError> {
    if depfile == output {
        return Err(DepfileError::SameAsOutput(depfile.to_path_buf()));
    }
    if depfile.extension().is_some_and(|ext| ext == "stamp") {
        return Err(DepfileError::StampPath(depfile.to_path_buf()));
    }

    let io_err = |source| DepfileError::Io { path: depfile.to_path_buf(), source };
    if let Some(parent) = depfile.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    fs::write(depfile, render_depfile(output, inputs)).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_depfile() {
        let text = render_depfile(
            Path::new("gen/param_cfg.h"),
            &[PathBuf::from("a/system.para"), PathBuf::from("b/vendor.para")],
        );
        assert_eq!(text, "gen/param_cfg.h: a/system.para b/vendor.para\n");
    }

    #[test]
    fn test_render_depfile_escapes_spaces() {
        let text =
            render_depfile(Path::new("out dir/cfg.h"), &[PathBuf::from("my params/a.para")]);
        assert_eq!(text, "out\\ dir/cfg.h: my\\ params/a.para\n");
    }

    #[test]
    fn test_render_depfile_no_inputs() {
        assert_eq!(render_depfile(Path::new("cfg.h"), &[]), "cfg.h: \n");
    }

    #[test]
    fn test_write_depfile_creates_parent() {
        let temp = TempDir::new().expect("should create temp dir");
        let depfile = temp.path().join("deps/param_cfg.d");

        write_depfile(&depfile, Path::new("param_cfg.h"), &[PathBuf::from("missing.para")])
            .expect("should write depfile");

        let text = fs::read_to_string(&depfile).expect("depfile readable");
        assert_eq!(text, "param_cfg.h: missing.para\n");
    }

    #[test]
    fn test_write_depfile_rejects_output_path() {
        let err = write_depfile(Path::new("cfg.h"), Path::new("cfg.h"), &[]).unwrap_err();
        assert!(matches!(err, DepfileError::SameAsOutput(_)));
    }

    #[test]
    fn test_write_depfile_rejects_stamp() {
        let err = write_depfile(Path::new("gen/cfg.stamp"), Path::new("cfg.h"), &[]).unwrap_err();
        assert!(matches!(err, DepfileError::StampPath(_)));
    }
}

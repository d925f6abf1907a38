//! Generated parameter header output
//!
//! Renders a [`ParamDict`] as a C header holding a static array of
//! `{name, value}` string pairs:
//!
//! ```c
//! typedef struct Node_ {
//!     const char *name;
//!     const char *value;
//! } Node;
//!
//! #define PARAM_MAP(name, value) {(const char *)#name, (const char *)#value},
//!
//! static Node g_paramDefCfgNodes[] = {
//!     PARAM_MAP(const.product.name, phone)
//! };
//! ```
//!
//! Both macro arguments are stringized by the preprocessor, so names and
//! values are written unquoted and verbatim.

use crate::config::HeaderConfig;
use crate::params::{parse_header, ParamDict, PARAM_MACRO};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for header operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HeaderError {
    /// Output directory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Header file could not be written
    #[error("Failed to open or write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Existing header could not be read
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the complete header text.
pub fn render_header(params: &ParamDict, layout: &HeaderConfig) -> String {
    let guard = &layout.guard;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "#ifndef {guard}");
    let _ = writeln!(out, "#define {guard}");
    out.push_str("#include <stdint.h>\n\n");
    out.push_str("#ifdef __cplusplus\n#if __cplusplus\nextern \"C\" {\n#endif\n#endif\n\n");

    out.push_str("typedef struct Node_ {\n");
    out.push_str("    const char *name;\n");
    out.push_str("    const char *value;\n");
    out.push_str("} Node;\n\n");
    let _ = writeln!(
        out,
        "#define {PARAM_MACRO}(name, value) {{(const char *)#name, (const char *)#value}},\n"
    );

    let _ = writeln!(out, "static Node {}[] = {{", layout.array_name);
    for (name, value) in params.iter() {
        let _ = writeln!(out, "    {PARAM_MACRO}({name}, {value})");
    }
    out.push_str("};\n\n");

    out.push_str("#ifdef __cplusplus\n#if __cplusplus\n}\n#endif\n#endif\n");
    let _ = writeln!(out, "#endif // {guard}");
    out.push('\n');
    out
}

/// Write the header to `path`, replacing any existing file.
///
/// The full text is rendered before the file is opened, so a failure never
/// leaves a partially rendered table behind from this process. Missing parent
/// directories are created.
pub fn write_header(
    path: &Path,
    params: &ParamDict,
    layout: &HeaderConfig,
) -> Result<(), HeaderError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|source| HeaderError::CreateDir { path: parent.to_path_buf(), source })?;
        }
    }

    let text = render_header(params, layout);
    fs::write(path, text).map_err(|source| HeaderError::Write { path: path.to_path_buf(), source })
}

/// Read the entries of a previously generated header.
///
/// Returns `Ok(None)` if the file doesn't exist. The file is left untouched.
pub fn read_header(path: &Path) -> Result<Option<ParamDict>, HeaderError> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes =
        fs::read(path).map_err(|source| HeaderError::Read { path: path.to_path_buf(), source })?;
    Ok(Some(parse_header(&String::from_utf8_lossy(&bytes))))
}

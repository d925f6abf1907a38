//! Line decoders for parameter config files and generated headers
//!
//! Config files hold one `name=value` pair per line; blank lines and lines
//! starting with `#` are ignored. Generated headers hold one
//! `PARAM_MAP(name, value)` invocation per entry.

use super::{ParamDict, ParamEntry};
use std::fs;
use std::io;
use std::path::Path;

/// Macro invoked once per entry in the generated header.
pub const PARAM_MACRO: &str = "PARAM_MAP";

/// Decode one config line.
///
/// Returns `None` for blank lines, comments, lines without `=`, and lines
/// whose name or value is empty after trimming. The line is split on the
/// first `=`, so the value may itself contain `=`.
pub fn decode_cfg_line(line: &str) -> Option<ParamEntry> {
    let line = line.trim_end_matches(['\n', '\r']).trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, value) = line.split_once('=')?;
    non_empty_entry(name, value)
}

/// Decode one line of a generated header.
///
/// Only lines of the form `PARAM_MAP(name, value)` yield an entry. The
/// argument list is split on the first comma.
pub fn decode_header_line(line: &str) -> Option<ParamEntry> {
    let args = line
        .trim()
        .strip_prefix(PARAM_MACRO)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;

    let (name, value) = args.split_once(',')?;
    non_empty_entry(name, value)
}

fn non_empty_entry(name: &str, value: &str) -> Option<ParamEntry> {
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some(ParamEntry::new(name, value))
}

/// Parse config text into a dictionary. Later lines override earlier ones.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub fn parse_cfg(text: &str) -> ParamDict {
    text.split(['\r', '\n']).filter_map(decode_cfg_line).collect()
}

/// Parse the entries out of a previously generated header.
pub fn parse_header(text: &str) -> ParamDict {
    text.lines().filter_map(decode_header_line).collect()
}

/// Read and parse a config file.
///
/// Returns `Ok(None)` if the file doesn't exist. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn read_cfg_file(path: &Path) -> io::Result<Option<ParamDict>> {
    if !path.exists() {
        return Ok(None);
    }

    let bytes = fs::read(path)?;
    Ok(Some(parse_cfg(&String::from_utf8_lossy(&bytes))))
}

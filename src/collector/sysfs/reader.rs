//! Attribute-file reads and device enumeration for the power_supply class.
//!
//! Each sysfs attribute is a plain-text file whose first line is the value.
//! The readers here report every failure to the caller; substituting
//! defaults for unreadable attributes is the orchestrator's decision, made
//! in one place (`PowerSupplyCollector`).

use std::io;
use std::path::{Path, PathBuf};

use crate::collector::traits::FileSystem;

/// Error reading a single attribute file.
#[derive(Debug)]
pub enum ReadError {
    /// Attribute file absent or unreadable.
    Io(io::Error),
    /// Attribute file present but holds no content.
    Empty,
    /// Attribute text is not a valid number.
    Parse(String),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "I/O error: {}", e),
            ReadError::Empty => write!(f, "attribute file is empty"),
            ReadError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Reads one attribute of a power-supply device.
///
/// Returns the first line of `<supply>/<attribute>`, without its line
/// terminator. An absent or unreadable file is `ReadError::Io`; a file
/// with no content is `ReadError::Empty`.
pub fn read_attribute<F: FileSystem>(
    fs: &F,
    supply: &Path,
    attribute: &str,
) -> Result<String, ReadError> {
    let content = fs.read_to_string(&supply.join(attribute))?;
    match content.lines().next() {
        Some(line) if !line.is_empty() => Ok(line.to_string()),
        _ => Err(ReadError::Empty),
    }
}

/// Reads one numeric attribute of a power-supply device.
///
/// Layers floating-point parsing over [`read_attribute`]; text that is not
/// a valid number is `ReadError::Parse`.
pub fn read_attribute_f64<F: FileSystem>(
    fs: &F,
    supply: &Path,
    attribute: &str,
) -> Result<f64, ReadError> {
    let text = read_attribute(fs, supply, attribute)?;
    text.trim()
        .parse::<f64>()
        .map_err(|e| ReadError::Parse(format!("{}: {:?}: {}", attribute, text, e)))
}

/// Lists power-supply device directories under the class directory.
///
/// Keeps entries whose name contains at least one ASCII digit (the kernel
/// names supply units with a numeric suffix: BAT0, AC0, ucsi-source-psy-1,
/// ...), sorted by path so enumeration order is deterministic.
///
/// Failure to list the directory itself is the one error that aborts a
/// whole collection cycle: no devices can be discovered at all.
pub fn list_supplies<F: FileSystem>(fs: &F, class_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut supplies: Vec<PathBuf> = fs
        .read_dir(class_dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().chars().any(|c| c.is_ascii_digit()))
                .unwrap_or(false)
        })
        .collect();
    supplies.sort();
    Ok(supplies)
}

//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod stats;

pub(crate) use render::RenderArgs;
pub(crate) use stats::StatsArgs;

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read markdown from `path`, or from stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n").unwrap();

        assert_eq!(read_input(Some(path.as_path())).unwrap(), "# Title\n");
    }

    #[test]
    fn test_read_input_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = read_input(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
        assert!(err.to_string().contains("missing.md"));
    }
}

//! Input/output paths: validation, reading, and atomic writing.

use crate::error::{ToggleError, ToggleResult};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Validated source and destination for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub input: PathBuf,
    pub output: PathBuf,
    /// The destination already exists and will be replaced.
    pub overwrite: bool,
}

/// Check the paths before anything is read or written.
///
/// The output defaults to the input, so the file is rewritten in place.
pub fn validate(input: Option<&Path>, output: Option<&Path>) -> ToggleResult<Plan> {
    let input = input
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(ToggleError::MissingInput)?;

    if !input.exists() {
        return Err(ToggleError::InputNotFound(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(ToggleError::InputNotFile(input.to_path_buf()));
    }

    let output = output
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(input);
    if output.is_dir() {
        return Err(ToggleError::OutputIsDirectory(output.to_path_buf()));
    }

    Ok(Plan {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        overwrite: output.exists(),
    })
}

/// Read a UTF-8 text file as lines without their terminators.
pub fn read_lines(path: &Path) -> ToggleResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write every line followed by `\n`.
///
/// The content goes to a temporary file next to the destination first and
/// is then renamed over it, so a failed write never truncates the
/// destination. An existing destination keeps its permissions, a symlinked
/// one keeps its link, and a read-only one is refused.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> ToggleResult<()> {
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)?,
        _ => path.to_path_buf(),
    };
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };
    if permissions.as_ref().is_some_and(|p| p.readonly()) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("\"{}\" is read-only", target.display()),
        )
        .into());
    }

    let parent = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let temp_file = NamedTempFile::new_in(parent)?;

    {
        let mut writer = BufWriter::new(temp_file.as_file());
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }

    // The temp file is created 0600.
    if let Some(permissions) = permissions {
        fs::set_permissions(temp_file.path(), permissions)?;
    }

    temp_file.persist(&target).map_err(|e| e.error)?;
    tracing::debug!(path = %target.display(), lines = lines.len(), "output persisted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_input() {
        assert!(matches!(validate(None, None), Err(ToggleError::MissingInput)));
        assert!(matches!(
            validate(Some(Path::new("")), None),
            Err(ToggleError::MissingInput)
        ));
    }

    #[test]
    fn test_input_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.sql");
        match validate(Some(&path), None) {
            Err(ToggleError::InputNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_input_is_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            validate(Some(dir.path()), None),
            Err(ToggleError::InputNotFile(_))
        ));
    }

    #[test]
    fn test_output_is_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("seed.sql");
        fs::write(&input, "SELECT 1;\n").unwrap();
        assert!(matches!(
            validate(Some(&input), Some(dir.path())),
            Err(ToggleError::OutputIsDirectory(_))
        ));
    }

    #[test]
    fn test_output_defaults_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("seed.sql");
        fs::write(&input, "SELECT 1;\n").unwrap();

        let plan = validate(Some(&input), None).unwrap();
        assert_eq!(plan.output, input);
        assert!(plan.overwrite);

        let fresh = dir.path().join("out.sql");
        let plan = validate(Some(&input), Some(&fresh)).unwrap();
        assert_eq!(plan.output, fresh);
        assert!(!plan.overwrite);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.sql");
        fs::write(&path, "old content that is longer than the new one\n").unwrap();

        write_lines(&path, &["a", "", "b"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n\nb\n");
        assert_eq!(read_lines(&path).unwrap(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.sql");
        fs::write(&path, [0x49, 0x4e, 0xe9, 0x0a]).unwrap();
        assert!(matches!(read_lines(&path), Err(ToggleError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("seed.sql");
        fs::write(&path, "SELECT 1;\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_lines(&path, &["SELECT 2;"]).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read_to_string(&path).unwrap(), "SELECT 2;\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_through_symlink() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real.sql");
        let link = dir.path().join("link.sql");
        fs::write(&real, "SELECT 1;\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_lines(&link, &["SELECT 2;"]).unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "SELECT 2;\n");
    }

    #[test]
    fn test_read_only_destination_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.sql");
        fs::write(&path, "SELECT 1;\n").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        assert!(matches!(write_lines(&path, &["SELECT 2;"]), Err(ToggleError::Io(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "SELECT 1;\n");
    }
}

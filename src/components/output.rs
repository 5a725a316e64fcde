use crate::error::{AppResult, ErrorReason};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;

/// Replaces `path` with `contents` in one rename.
///
/// The data goes to a temporary file next to `path` first, so a failed run
/// never leaves a partially written file behind.
pub fn write_atomically(path: &Path, contents: &[u8]) -> AppResult<()> {
    let to_error = |source| ErrorReason::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(to_error)?;
    file.write_all(contents).map_err(to_error)?;
    file.as_file().sync_all().map_err(to_error)?;
    file.persist(path).map_err(|e| to_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roots_list.go");
        fs::write(&path, "old").unwrap();

        write_atomically(&path, b"new contents").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new contents");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("roots_list.go");

        let err = write_atomically(&path, b"data").unwrap_err();

        let ErrorReason::Output { path: failed, .. } = err.reason() else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(failed, &path);
        assert!(!path.exists());
    }
}

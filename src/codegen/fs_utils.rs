//! Filesystem utilities for code generation

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Write content to a file, creating parent directories if needed.
///
/// The content goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers see either the old file or the
/// complete new one.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_ref())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.txt");

        write_file(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_file_overwrites_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        write_file(&path, "first version").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_file_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        assert!(write_file(blocker.join("out.txt"), "data").is_err());
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }
}

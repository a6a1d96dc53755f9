//! Capability-based file access for input and output paths.
//!
//! Paths arrive from configuration as UTF-8 strings, so everything here is
//! expressed with `camino` paths and `cap-std`'s `fs_utf8` API. Absolute
//! paths are opened relative to the filesystem root, relative paths relative
//! to the working directory.

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

use crate::error::{LoadError, OutputError};

/// Open an existing file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into memory.
///
/// # Errors
/// Returns [`LoadError::Read`] when the file is missing, unreadable, or not
/// valid UTF-8.
pub fn read_to_string(path: &Utf8Path) -> Result<String, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = open_utf8_file(path).map_err(read_error)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(read_error)?;
    Ok(contents)
}

/// Create (or truncate) `path` for writing, creating missing parent
/// directories first.
///
/// # Errors
/// Returns [`OutputError::CreateParent`] when the parent directory cannot be
/// created and [`OutputError::Write`] when the file itself cannot be.
pub fn create_utf8_file(path: &Utf8Path) -> Result<fs_utf8::File, OutputError> {
    ensure_parent_dir(path).map_err(|source| OutputError::CreateParent {
        path: parent_or_current(path).to_path_buf(),
        source,
    })?;
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = open_dir_and_file(path).map_err(write_error)?;
    dir.create(name.as_str()).map_err(write_error)
}

/// Report whether `path` is a regular file.
///
/// A missing path surfaces as an [`io::ErrorKind::NotFound`] error so callers
/// can tell it apart from a path that exists but is not a file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent_or_current(path), ambient_authority())?;
    Ok((dir, name))
}

fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let (base, relative) = nearest_existing_dir(parent_or_current(path))?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(relative)
}

/// Open the deepest ancestor of `dir` that already exists, returning it with
/// the part of `dir` still to be created beneath it.
///
/// Opening the ambient directory at the ancestor itself keeps `..` segments
/// out of the sandboxed remainder.
fn nearest_existing_dir(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut missing = None;
    for ancestor in dir.ancestors() {
        let base = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        match fs_utf8::Dir::open_ambient_dir(base, ambient_authority()) {
            Ok(opened) => {
                let relative = dir.strip_prefix(ancestor).map_err(io::Error::other)?;
                return Ok((opened, relative.to_path_buf()));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => missing = Some(err),
            Err(err) => return Err(err),
        }
    }
    Err(missing.unwrap_or_else(|| io::Error::from(io::ErrorKind::NotFound)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir {path:?} is not UTF-8"))
    }

    #[rstest]
    fn creates_missing_parents() {
        let dir = TempDir::new().expect("create temp dir");
        let target = utf8_dir(&dir).join("nested/deeper/out.csv");
        let mut file = create_utf8_file(&target).expect("create output file");
        file.write_all(b"id\n").expect("write output");
        drop(file);
        assert_eq!(read_to_string(&target).expect("read back"), "id\n");
        assert!(file_is_file(&target).expect("stat output"));
    }

    #[rstest]
    #[case::sibling_file("out.csv")]
    #[case::sibling_dir("res/deeper/out.csv")]
    fn creates_files_above_the_working_directory(#[case] below: &str) {
        let dir = TempDir::new_in("..").expect("create temp dir beside the crate");
        let name = utf8_dir(&dir)
            .file_name()
            .map(str::to_owned)
            .expect("temp dir has a name");
        let target = Utf8Path::new("..").join(name).join(below);

        let mut file = create_utf8_file(&target).expect("create output file");
        file.write_all(b"id\n").expect("write output");
        drop(file);
        assert_eq!(read_to_string(&target).expect("read back"), "id\n");
    }

    #[rstest]
    fn missing_file_reports_not_found() {
        let dir = TempDir::new().expect("create temp dir");
        let missing = utf8_dir(&dir).join("absent.txt");
        let err = file_is_file(&missing).expect_err("missing file should error");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn directory_is_not_a_file() {
        let dir = TempDir::new().expect("create temp dir");
        let nested = utf8_dir(&dir).join("sub");
        std::fs::create_dir(&nested).expect("create sub dir");
        assert!(!file_is_file(&nested).expect("stat directory"));
    }

    #[rstest]
    fn read_error_names_the_path() {
        let dir = TempDir::new().expect("create temp dir");
        let missing = utf8_dir(&dir).join("absent.txt");
        match read_to_string(&missing) {
            Err(LoadError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}

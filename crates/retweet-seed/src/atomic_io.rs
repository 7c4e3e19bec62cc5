//! All-or-nothing output writes.
//!
//! The SQL artifact is written to a hidden sibling file, synced, and renamed
//! over the target. A failed run leaves any previous artifact untouched and
//! never leaves a truncated one behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::OutputError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to `file_name` inside `dir` via a temp file and rename.
///
/// `file_name` must be a single normal path component; `display_path` is
/// only used in error reports.
///
/// # Errors
///
/// Returns [`OutputError::Write`] if the file cannot be written.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &Utf8Path,
    display_path: &Utf8Path,
    contents: &str,
) -> Result<(), OutputError> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(write_error(display_path, "output path must be a file"));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(".{name}.tmp.{}.{suffix}.{counter}", std::process::id());

    write_to_temp_file(dir, &tmp_name, display_path, contents)?;
    if let Err(err) = rename_over_target(dir, &tmp_name, name) {
        discard_temp_file(dir, &tmp_name);
        return Err(write_error(display_path, err));
    }
    sync_directory(dir);

    Ok(())
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    display_path: &Utf8Path,
    contents: &str,
) -> Result<(), OutputError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| write_error(display_path, err))?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(err) = written {
        drop(file);
        discard_temp_file(dir, tmp_name);
        return Err(write_error(display_path, err));
    }

    Ok(())
}

#[cfg(windows)]
fn rename_over_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn discard_temp_file(dir: &Dir, tmp_name: &str) {
    if dir.remove_file(tmp_name).is_err() {
        // Ignore cleanup failures.
    }
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }
}

fn write_error(path: &Utf8Path, err: impl ToString) -> OutputError {
    OutputError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use cap_std::ambient_authority;
    use camino::Utf8PathBuf;

    use super::*;

    fn scratch_dir(name: &str) -> (Utf8PathBuf, Dir) {
        let path = Utf8PathBuf::from("target")
            .join("retweet-seed-tests")
            .join(format!("{name}-{}", std::process::id()));
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
        root.create_dir_all(&path).expect("create scratch dir");
        let dir = Dir::open_ambient_dir(&path, ambient_authority()).expect("open scratch dir");
        (path, dir)
    }

    #[test]
    fn writes_and_replaces_target() {
        let (path, dir) = scratch_dir("atomic-replace");
        let target = Utf8Path::new("seed.sql");

        write_atomic(&dir, target, &path.join(target), "first").expect("first write");
        write_atomic(&dir, target, &path.join(target), "second").expect("second write");

        assert_eq!(dir.read_to_string(target).expect("read back"), "second");
        let leftovers = dir
            .entries()
            .expect("list dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".seed.sql.tmp"))
            .count();
        assert_eq!(leftovers, 0);
        dir.remove_file(target).expect("clean up");
    }

    #[test]
    fn rejects_nested_file_names() {
        let (path, dir) = scratch_dir("atomic-nested");
        let target = Utf8Path::new("nested/seed.sql");

        let result = write_atomic(&dir, target, &path.join(target), "sql");

        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}

//! Draft files on disk.
//!
//! Writes go to a temporary file next to the target which is then renamed over it, so a failed
//! save leaves any previous file untouched. A replaced file keeps its permissions.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{codec, Error, MessageDraft, PersistenceError};

/// Read and decode the draft stored at `path`.
pub fn read_draft(path: &Path) -> Result<MessageDraft, Error> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_owned(),
        source,
    })?;
    let draft = codec::deserialize(&text)?;
    tracing::debug!(path = %path.display(), topic = %draft.topic(), "read draft");
    Ok(draft)
}

/// Encode `draft` and write it to `path`, replacing any existing file.
pub fn write_draft(path: &Path, draft: &MessageDraft) -> Result<(), PersistenceError> {
    let text = codec::serialize(draft)?;
    write_atomic(path, &text).map_err(|source| PersistenceError::Write {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), topic = %draft.topic(), "wrote draft");
    Ok(())
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    match fs::metadata(path) {
        Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    tmp.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        tmp.write_all(b"\n")?;
    }
    tmp.flush()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_draft, HeaderEntry};

    fn sample() -> MessageDraft {
        build_draft(
            "orders",
            "k1",
            r#"{"id": 7}"#,
            &[HeaderEntry::new("trace-id", "42")],
        )
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");

        write_draft(&path, &sample()).unwrap();

        assert!(fs::read_to_string(&path).unwrap().ends_with("}\n"));
        assert_eq!(read_draft(&path).unwrap(), sample());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, "old contents that are much longer than needed").unwrap();

        write_draft(&path, &sample()).unwrap();

        assert_eq!(read_draft(&path).unwrap(), sample());
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_draft(&path, &sample()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(read_draft(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_draft(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::Read { .. })
        ));
    }

    #[test]
    fn garbage_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, "{ not a draft").unwrap();

        assert!(matches!(read_draft(&path), Err(Error::Malformed(_))));
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = write_draft(&target, &sample()).unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert!(err.to_string().starts_with("could not save the file"));
        assert!(target.join("keep").exists());
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("draft.json");
        assert!(matches!(
            write_draft(&path, &sample()),
            Err(PersistenceError::Write { .. })
        ));
    }
}

// ABOUTME: Output directory layer with atomic overwriting writes
// ABOUTME: Resolves remote paths safely under the root and writes the metadata snapshot

use crate::{model::Deployment, Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const METADATA_FILE: &str = "deployment.json";

pub struct OutputDir {
    pub root: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        OutputDir { root: root.into() }
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Maps a slash-separated remote path onto a location under the root.
    pub fn resolve(&self, remote_path: &str) -> Result<PathBuf> {
        let unsafe_path = || Error::UnsafePath(remote_path.to_string());

        if remote_path.is_empty() || remote_path.contains('\\') {
            return Err(unsafe_path());
        }

        let mut resolved = self.root.clone();
        for segment in remote_path.split('/') {
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) => resolved.push(part),
                _ => return Err(unsafe_path()),
            }
        }
        Ok(resolved)
    }

    pub fn ensure_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    /// Writes a remote file, replacing whatever was there. Returns the local path.
    pub fn write_file(&self, remote_path: &str, content: &[u8]) -> Result<PathBuf> {
        let target = self.resolve(remote_path)?;
        write_atomic(&target, content)?;
        Ok(target)
    }

    pub fn write_metadata_snapshot(&self, deployment: &Deployment) -> Result<PathBuf> {
        let mut json = serde_json::to_string_pretty(&deployment.document)?;
        json.push('\n');

        self.ensure_dir(&self.root)?;
        let target = self.metadata_path();
        write_atomic(&target, json.as_bytes())?;
        Ok(target)
    }
}

/// Writes through a hidden sibling temp file so a crash never leaves a
/// half-written target.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    use rand::Rng;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let random: u32 = rand::thread_rng().gen();
    let tmp_path = parent.join(format!(".{:x}.part", random));

    let written = fs::write(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_nested_path() {
        let out = OutputDir::new("/tmp/out");
        assert_eq!(
            out.resolve("src/lib/index.js").unwrap(),
            PathBuf::from("/tmp/out/src/lib/index.js")
        );
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let out = OutputDir::new("/tmp/out");
        for bad in ["../etc/passwd", "src/../../x", "/abs", "a//b", "./a", "a\\b", ""] {
            assert!(
                matches!(out.resolve(bad), Err(Error::UnsafePath(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path());
        let dir = temp.path().join("a/b/c");

        out.ensure_dir(&dir).unwrap();
        out.ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path().join("export"));

        let written = out.write_file("src/pages/index.tsx", b"export {}").unwrap();
        assert_eq!(written, temp.path().join("export/src/pages/index.tsx"));
        assert_eq!(fs::read_to_string(written).unwrap(), "export {}");
    }

    #[test]
    fn test_write_file_overwrites() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path());

        out.write_file("a.txt", b"first version, longer").unwrap();
        out.write_file("a.txt", b"second").unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("test.txt");
        write_atomic(&target, b"hello").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("test.txt")]);
    }

    #[test]
    fn test_write_atomic_failure_cleans_up_temp_file() {
        let temp = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let target = temp.path().join("taken");
        fs::create_dir_all(target.join("inner")).unwrap();

        assert!(write_atomic(&target, b"hello").is_err());

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("taken")]);
    }

    #[test]
    fn test_write_metadata_snapshot_keeps_key_order() {
        let temp = TempDir::new().unwrap();
        let out = OutputDir::new(temp.path().join("dl"));
        let document: serde_json::Value = serde_json::from_str(
            r#"{"url": "app.vercel.app", "name": "app", "id": "dpl_1", "meta": {"z": 1, "a": 2}}"#,
        )
        .unwrap();
        let deployment = Deployment::from_document(document).unwrap();

        let path = out.write_metadata_snapshot(&deployment).unwrap();
        assert_eq!(path, temp.path().join("dl").join(METADATA_FILE));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n  \"url\": \"app.vercel.app\",\n  \"name\": \"app\",\n  \"id\": \"dpl_1\",\n  \"meta\": {\n    \"z\": 1,\n    \"a\": 2\n  }\n}\n"
        );
    }
}

//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Writes to the real disk, creating parent directories as needed.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_overwrites() {
        let dir = std::env::temp_dir().join("gistlock_live_fs_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("secret.txt");

        LiveFileSystem.write(&path, "first").unwrap();
        LiveFileSystem.write(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        let _ = std::fs::remove_dir_all(&dir);
    }
}

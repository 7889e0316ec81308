use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch manifest tree with a separate output location.
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("root")).unwrap();
        Self { temp }
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().join("root")
    }

    pub fn output(&self) -> PathBuf {
        self.temp.path().join("merged.yaml")
    }

    /// Write `content` to `rel` under the root, creating directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read_output(&self) -> String {
        read(&self.output())
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

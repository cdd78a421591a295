use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct MockEntry {
    content: Option<String>,
    file_type: FileType,
}

/// In-memory [`FileSystem`] for unit tests. Relative paths are rooted at
/// `/mock`; parents are created implicitly.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self {
            files: RwLock::new(HashMap::new()),
            root: PathBuf::from("/mock"),
        };
        fs.add_dir("/mock");
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize(path.as_ref());
        let mut files = self.files.write().unwrap();
        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }
        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize(path.as_ref());
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, &path);
        files.insert(
            path,
            MockEntry {
                content: None,
                file_type: FileType::Directory,
            },
        );
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn kind(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize(path);
        self.files.read().unwrap().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.kind(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.kind(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.kind(path) == Some(FileType::File)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let path = self.normalize(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("no such mock entry: {}", path.display()))?;
        Ok(entry.content.as_ref().map_or(0, |c| c.len() as u64))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize(path);
        let files = self.files.read().unwrap();
        files
            .get(&path)
            .and_then(|e| e.content.clone())
            .ok_or_else(|| anyhow!("no such mock file: {}", path.display()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize(path);
        let files = self.files.read().unwrap();
        if !matches!(files.get(&path).map(|e| e.file_type), Some(FileType::Directory)) {
            return Err(anyhow!("no such mock directory: {}", path.display()));
        }

        let mut result = Vec::new();
        for (entry_path, entry) in files.iter() {
            if entry_path.parent() == Some(path.as_path()) {
                result.push(DirEntry {
                    path: entry_path.clone(),
                    name: entry_path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    file_type: entry.file_type,
                });
            }
        }
        Ok(result)
    }
}

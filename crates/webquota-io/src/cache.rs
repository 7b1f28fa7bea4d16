use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use webquota_core::provider::CacheInfo;
use webquota_core::units::APP_CACHE_FILE;

use crate::error::{Error, Result};

/// Reports the size of `<dir>/ApplicationCache.db`.
#[derive(Debug, Clone)]
pub struct AppCacheFileInfo {
    file: PathBuf,
}

impl AppCacheFileInfo {
    pub fn new(app_cache_dir: impl AsRef<Path>) -> Self {
        Self {
            file: app_cache_dir.as_ref().join(APP_CACHE_FILE),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// File length in bytes; a missing file counts as empty.
    pub fn size_bytes(&self) -> Result<i64> {
        match fs::metadata(&self.file) {
            Ok(meta) => Ok(i64::try_from(meta.len()).unwrap_or(i64::MAX)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(source) => Err(Error::Metadata {
                path: self.file.clone(),
                source,
            }),
        }
    }
}

impl CacheInfo for AppCacheFileInfo {
    fn app_cache_size_bytes(&self) -> i64 {
        match self.size_bytes() {
            Ok(n) => n,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "treating unreadable app cache as empty");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_dir(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("webquota-cache-tests-{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = temp_cache_dir("missing");
        let info = AppCacheFileInfo::new(&dir);
        assert_eq!(info.app_cache_size_bytes(), 0);
        assert!(info.file().ends_with(APP_CACHE_FILE));
    }

    #[test]
    fn reports_file_length() {
        let dir = temp_cache_dir("present");
        fs::write(dir.join(APP_CACHE_FILE), vec![0u8; 4096]).expect("write cache file");
        let info = AppCacheFileInfo::new(&dir);
        assert_eq!(info.size_bytes().unwrap(), 4096);
        assert_eq!(info.app_cache_size_bytes(), 4096);
    }
}

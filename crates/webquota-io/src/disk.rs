use std::path::{Path, PathBuf};

use webquota_core::provider::DiskInfo;

use crate::error::{Error, Result};

/// Partition capacity captured once from the filesystem holding `path`.
///
/// The figures are a snapshot taken in `new`; the allocator only reads them
/// at construction, so there is no point in re-querying.
#[derive(Debug, Clone)]
pub struct StatFsDiskInfo {
    path: PathBuf,
    free_bytes: i64,
    total_bytes: i64,
}

impl StatFsDiskInfo {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let free = fs2::available_space(&path).map_err(|source| Error::Stat {
            path: path.clone(),
            source,
        })?;
        let total = fs2::total_space(&path).map_err(|source| Error::Stat {
            path: path.clone(),
            source,
        })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), free, total, "statfs snapshot");

        Ok(Self {
            path,
            free_bytes: saturating_i64(free),
            total_bytes: saturating_i64(total),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiskInfo for StatFsDiskInfo {
    fn free_space_bytes(&self) -> i64 {
        self.free_bytes
    }

    fn total_size_bytes(&self) -> i64 {
        self.total_bytes
    }
}

fn saturating_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_temp_dir_is_consistent() {
        let info = StatFsDiskInfo::new(std::env::temp_dir()).expect("statfs temp dir");
        assert!(info.total_size_bytes() > 0);
        assert!(info.free_space_bytes() <= info.total_size_bytes());
    }

    #[test]
    fn missing_path_is_a_stat_error() {
        let err = StatFsDiskInfo::new("/definitely/not/a/real/webquota/path").unwrap_err();
        assert!(matches!(err, Error::Stat { .. }));
        assert!(err.to_string().contains("statfs failed"));
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(saturating_i64(u64::MAX), i64::MAX);
        assert_eq!(saturating_i64(42), 42);
    }
}

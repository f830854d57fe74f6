use std::path::{Path, PathBuf};

use crate::{debug, error::Result, utils, warning};

/// Key of the refresh token slot.
pub const REFRESH_TOKEN_KEY: &str = "/refresh-token.txt";

/// Durable key to string storage rooted in a directory.
///
/// Keys are path-like identifiers (`/refresh-token.txt`) resolved below the
/// root. Only the refresh token is stored here.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    root: PathBuf,
}

impl CredentialStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the stored value, or an empty string when the key was never
    /// written or cannot be read. Read failures are logged, not returned.
    pub async fn load(&self, key: &str) -> String {
        let path = self.path_for(key);
        debug!("Loading string from '{}'.", path.display());
        match async_fs::read_to_string(&path).await {
            Ok(value) => {
                debug!("Persisted string: {}", utils::redact(&value));
                value
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Nothing stored under '{}'.", key);
                String::new()
            }
            Err(e) => {
                warning!("Failed to load '{}' from storage, returning empty: {}", key, e);
                String::new()
            }
        }
    }

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// The value goes to a sibling temp file that is synced and then renamed
    /// over the key, so a reader sees either the old or the new value.
    pub async fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        debug!("Saving string to '{}'.", path.display());

        let written = async {
            if let Some(parent) = path.parent() {
                async_fs::create_dir_all(parent).await?;
            }
            let tmp = temp_path(&path);
            async_fs::write(&tmp, value).await?;
            async_fs::OpenOptions::new()
                .write(true)
                .open(&tmp)
                .await?
                .sync_all()
                .await?;
            async_fs::rename(&tmp, &path).await
        }
        .await;

        written.map_err(|e| {
            warning!("Failed to save '{}': {}", key, e);
            e.into()
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key.trim_start_matches('/'))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

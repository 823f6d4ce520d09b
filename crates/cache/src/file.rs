use crate::backend::{CacheBackend, CacheEnvelope};
use crate::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cache persisted as one JSON file per cache id.
#[derive(Clone, Debug)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Option<Duration>,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, cid: &str) -> PathBuf {
        self.dir.join(format!("{}.json", safe_component(cid)))
    }
}

impl CacheBackend for FileCache {
    fn get(&self, cid: &str) -> Result<Option<serde_json::Value>> {
        let path = self.entry_path(cid);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let envelope: CacheEnvelope = match serde_json::from_slice(&bytes) {
            Ok(val) => val,
            Err(err) => {
                log::warn!("Cache file corrupted {}: {err}", path.display());
                return Ok(None);
            }
        };

        if envelope.is_expired(self.ttl) {
            self.invalidate(cid)?;
            return Ok(None);
        }

        Ok(Some(envelope.data))
    }

    fn set(&self, cid: &str, data: serde_json::Value) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(cid);
        let bytes = serde_json::to_vec_pretty(&CacheEnvelope::new(data))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes)?;
        if let Err(err) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn invalidate(&self, cid: &str) -> Result<()> {
        match std::fs::remove_file(self.entry_path(cid)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<()> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in read_dir.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

fn safe_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_component_replaces_separators() {
        assert_eq!(safe_component("alpha_pagination:abc/+="), "alpha_pagination_abc___");
        assert_eq!(safe_component(""), "_");
    }
}

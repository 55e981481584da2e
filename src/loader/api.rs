use log::debug;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cask::{CaskDefinition, LoadError};
use crate::runtime::Runtime;

/// Cask definitions from the locally cached API index.
///
/// The index is a JSON array of definitions. It is read at most once; a
/// missing index means no cask is available from the API.
pub struct ApiSource<'a, R: Runtime> {
    runtime: &'a R,
    index_path: PathBuf,
    index: OnceCell<BTreeMap<String, CaskDefinition>>,
}

impl<'a, R: Runtime> ApiSource<'a, R> {
    pub fn new(runtime: &'a R, index_path: PathBuf) -> Self {
        Self {
            runtime,
            index_path,
            index: OnceCell::new(),
        }
    }

    pub fn available(&self, token: &str) -> Result<bool, LoadError> {
        Ok(self.index()?.contains_key(token))
    }

    pub fn definition(&self, token: &str) -> Result<CaskDefinition, LoadError> {
        self.index()?
            .get(token)
            .cloned()
            .ok_or_else(|| LoadError::unavailable(token, "not in the API index"))
    }

    fn index(&self) -> Result<&BTreeMap<String, CaskDefinition>, LoadError> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let loaded = self.read_index()?;
        Ok(self.index.get_or_init(|| loaded))
    }

    #[tracing::instrument(skip(self))]
    fn read_index(&self) -> Result<BTreeMap<String, CaskDefinition>, LoadError> {
        if !self.runtime.exists(&self.index_path) {
            debug!("No API index at {:?}", self.index_path);
            return Ok(BTreeMap::new());
        }

        let content =
            self.runtime
                .read_to_string(&self.index_path)
                .map_err(|e| LoadError::Io {
                    path: self.index_path.clone(),
                    source: e.into(),
                })?;
        let definitions: Vec<CaskDefinition> =
            serde_json::from_str(&content).map_err(|source| LoadError::Invalid {
                path: self.index_path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} cask(s) from API index {:?}",
            definitions.len(),
            self.index_path
        );
        Ok(definitions
            .into_iter()
            .map(|d| (d.token.clone(), d))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    const INDEX: &str = r#"[
        {"token": "alpha", "version": "1.0"},
        {"token": "gamma", "version": "3.2", "desc": "Gamma app"}
    ]"#;

    fn index_path() -> PathBuf {
        PathBuf::from("/cache/api/cask.json")
    }

    #[test]
    fn test_available_and_definition() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_exists()
            .with(eq(index_path()))
            .times(1)
            .returning(|_| true);
        // Read once, then served from memory.
        runtime
            .expect_read_to_string()
            .with(eq(index_path()))
            .times(1)
            .returning(|_| Ok(INDEX.to_string()));

        let api = ApiSource::new(&runtime, index_path());

        assert!(api.available("alpha").unwrap());
        assert!(!api.available("beta").unwrap());
        assert_eq!(api.definition("gamma").unwrap().version, "3.2");
        assert!(api.definition("beta").unwrap_err().is_unavailable());
    }

    #[test]
    fn test_missing_index_has_no_casks() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);
        runtime.expect_read_to_string().never();

        let api = ApiSource::new(&runtime, index_path());

        assert!(!api.available("alpha").unwrap());
        assert!(api.definition("alpha").unwrap_err().is_unavailable());
    }

    #[test]
    fn test_malformed_index_is_invalid() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("{not json".to_string()));

        let api = ApiSource::new(&runtime, index_path());

        assert!(matches!(
            api.available("alpha"),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unreadable_index_is_io_error() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let api = ApiSource::new(&runtime, index_path());

        assert!(matches!(api.available("alpha"), Err(LoadError::Io { .. })));
    }
}

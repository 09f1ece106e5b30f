/// Builds absolute links to files served from the asset storage host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageResolver {
    base: String,
}

impl StorageResolver {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Empty or absent paths resolve to an empty string.
    pub fn storage_url(&self, path: Option<&str>) -> String {
        match path {
            Some(path) if !path.is_empty() => format!("{}/{}", self.base, path),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        let storage = StorageResolver::new("http://x/storage");
        assert_eq!(
            storage.storage_url(Some("images/x.png")),
            "http://x/storage/images/x.png"
        );
    }

    #[test]
    fn missing_path_is_empty() {
        let storage = StorageResolver::new("http://x/storage");
        assert_eq!(storage.storage_url(None), "");
        assert_eq!(storage.storage_url(Some("")), "");
    }
}

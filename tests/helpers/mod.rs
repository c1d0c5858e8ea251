use anyhow::{Context, Result};
use mistakebook::app::App;
use mistakebook::infrastructure::FileStorage;
use mistakebook::ports::Storage;
use mistakebook::util::testing::MockTransport;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Client wired to a scripted transport and a throwaway storage file
#[allow(dead_code)]
pub struct TestApp {
    _temp_dir: TempDir,
    pub storage_path: PathBuf,
    pub transport: Arc<MockTransport>,
    pub app: App,
}

impl TestApp {
    pub fn new(transport: MockTransport) -> Result<Self> {
        Self::with_session(transport, &[])
    }

    /// Start from storage already holding `items`, as if a previous run had saved them
    pub fn with_session(transport: MockTransport, items: &[(&str, &str)]) -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let storage_path = temp_dir.path().join("storage.json");

        let storage = FileStorage::new(&storage_path);
        for (key, value) in items {
            storage
                .set_item(key, value)
                .context("Failed to seed storage")?;
        }

        let transport = Arc::new(transport);
        let app = App::new(transport.clone(), Arc::new(storage));
        Ok(Self {
            _temp_dir: temp_dir,
            storage_path,
            transport,
            app,
        })
    }

    /// Fresh view of the storage file, independent of the running app
    pub fn stored(&self, key: &str) -> Option<String> {
        FileStorage::new(&self.storage_path)
            .get_item(key)
            .expect("Storage should be readable")
    }

    /// Simulate a restart: new app over the same storage file
    #[allow(dead_code)]
    pub fn restart(&self, transport: MockTransport) -> App {
        App::new(
            Arc::new(transport),
            Arc::new(FileStorage::new(&self.storage_path)),
        )
    }
}

#[allow(dead_code)]
pub mod fixtures {
    use serde_json::{json, Value};

    pub const TOKEN: &str = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b";

    pub fn login_response() -> Value {
        json!({
            "token": TOKEN,
            "user": {"id": 17, "nickname": "Xiaoming", "grade": "Grade 10"}
        })
    }

    pub fn stored_user() -> String {
        login_response()["user"].to_string()
    }
}

use std::path::PathBuf;
use tempfile::TempDir;

use attrangi::config::Config;
use attrangi::session::{SessionContext, SqliteSessionStore, DEFAULT_STORAGE_KEY};
use attrangi::transport::HttpTransport;
use attrangi::ChatController;

#[allow(dead_code)]
pub fn config_for(base_url: &str, tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.session.store_path = Some(tmp.path().join("session.db"));
    config
}

#[allow(dead_code)]
pub fn controller_for(base_url: &str) -> (ChatController, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let config = config_for(base_url, &tmp);
    let store = SqliteSessionStore::new_with_path(tmp.path().join("session.db"))
        .expect("failed to create sqlite session store");
    let session =
        SessionContext::initialize(&store, DEFAULT_STORAGE_KEY).expect("failed to init session");
    let transport = HttpTransport::new(&config.api).expect("failed to build transport");
    let controller = ChatController::new(
        Box::new(transport),
        session,
        config.chat.controller_options(),
    );
    (controller, tmp)
}

#[allow(dead_code)]
pub fn temp_db_path() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let path = tmp.path().join("session.db");
    (tmp, path)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

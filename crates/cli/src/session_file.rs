use anyhow::Context;
use solsend_lib::state::SessionSnapshot;
use std::{
    fs,
    path::{Path, PathBuf},
};

const SESSION_DIR: &str = "solsend";
const SESSION_FILE: &str = "session.json";

pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

/// A missing file is a fresh session; an unreadable one is reported and
/// treated the same way.
pub fn load(path: &Path) -> Option<SessionSnapshot> {
    if !path.exists() {
        return None;
    }

    let parsed = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|data| serde_json::from_str(&data).map_err(anyhow::Error::from));

    match parsed {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("Ignoring unreadable session file {}: {e}", path.display());
            None
        }
    }
}

pub fn save(path: &Path, snapshot: &SessionSnapshot) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const IDENTITY_FILE: &str = "my_character.json";

/// The character this machine plays as. Used as the default attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyCharacter {
    my_char_id: i64,
}

pub fn get_identity_file_path() -> PathBuf {
    PathBuf::from(IDENTITY_FILE)
}

pub fn load_my_character_id() -> Option<i64> {
    load_my_character_id_from(&get_identity_file_path())
}

pub fn load_my_character_id_from(file_path: &Path) -> Option<i64> {
    let content = fs::read_to_string(file_path).ok()?;
    match serde_json::from_str::<MyCharacter>(&content) {
        Ok(identity) => Some(identity.my_char_id),
        Err(e) => {
            warn!("Error parsing {}: {}. Ignoring it.", file_path.display(), e);
            None
        }
    }
}

pub fn save_my_character_id(id: i64) -> io::Result<()> {
    save_my_character_id_to(&get_identity_file_path(), id)
}

pub fn save_my_character_id_to(file_path: &Path, id: i64) -> io::Result<()> {
    let json_content = serde_json::to_string_pretty(&MyCharacter { my_char_id: id })
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON serialization error: {}", e)))?;

    let mut file = fs::File::create(file_path)?;
    file.write_all(json_content.as_bytes())?;
    file.flush()?;

    info!(id, "Remembered my character");
    Ok(())
}

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::profile::Profile;
use crate::core::errors::TetherError;

/// Profile name → profile. Sorted, so the file is stable across rewrites.
pub type ProfileMap = BTreeMap<String, Profile>;

/// Profile name → record exactly as found in the file.
type RawRecords = BTreeMap<String, Value>;

/// What is on disk before decoding individual profiles.
enum RawStore {
    Missing,
    /// Not a JSON object at all.
    Corrupt,
    Records(RawRecords),
}

/// The single JSON file every profile lives in.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// The file does not have to exist yet; it is created by the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `profiles.json` → `profiles.json.bak`, where an unreadable store is kept
    /// before the first save replaces it.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    fn read_raw(&self) -> Result<RawStore, TetherError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store at {:?} yet, starting empty", self.path);
                return Ok(RawStore::Missing);
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<RawRecords>(&data) {
            Ok(records) => Ok(RawStore::Records(records)),
            Err(e) => {
                warn!("The store file {:?} is corrupted or empty ({e}); ignoring it", self.path);
                Ok(RawStore::Corrupt)
            }
        }
    }

    /// Reads every stored profile.
    ///
    /// A missing file is an empty store. A file that is not a JSON object is
    /// reported with a warning and also treated as empty. A single record
    /// that does not decode is skipped with a warning; the others still load.
    /// Nothing on disk is touched. Any other read failure is returned.
    pub fn load(&self) -> Result<ProfileMap, TetherError> {
        let records = match self.read_raw()? {
            RawStore::Missing | RawStore::Corrupt => return Ok(ProfileMap::new()),
            RawStore::Records(records) => records,
        };
        let mut profiles = ProfileMap::new();
        for (name, record) in records {
            match serde_json::from_value::<Profile>(record) {
                Ok(profile) => {
                    profiles.insert(name, profile);
                }
                Err(e) => warn!("Skipping malformed profile {name} in {:?}: {e}", self.path),
            }
        }
        debug!("Loaded {} profile(s) from {:?}", profiles.len(), self.path);
        Ok(profiles)
    }

    /// Rewrites the whole store.
    pub fn save(&self, profiles: &ProfileMap) -> Result<(), TetherError> {
        self.write(profiles)?;
        debug!("Saved {} profile(s) to {:?}", profiles.len(), self.path);
        Ok(())
    }

    /// The content goes to a temp file next to the target which is then
    /// renamed over it, so an interrupted save never leaves half a file.
    fn write<T: Serialize>(&self, value: &T) -> Result<(), TetherError> {
        let bytes = encode(value)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Option<Profile>, TetherError> {
        Ok(self.load()?.remove(name))
    }

    /// Create or overwrite a profile. Overwrites replace the whole record.
    ///
    /// Works on the raw records so entries that fail to decode survive the
    /// rewrite. An unreadable store is copied to [`Self::backup_path`] first.
    pub fn upsert(&self, name: &str, profile: Profile) -> Result<(), TetherError> {
        profile.validate(name)?;
        let mut records = match self.read_raw()? {
            RawStore::Missing => RawRecords::new(),
            RawStore::Corrupt => {
                let backup = self.backup_path();
                fs::copy(&self.path, &backup)?;
                warn!("Kept the unreadable store as {:?}", backup);
                RawRecords::new()
            }
            RawStore::Records(records) => records,
        };
        if records.insert(name.to_string(), serde_json::to_value(&profile)?).is_some() {
            debug!("Overwriting profile {name}");
        }
        self.write(&records)?;
        debug!("Saved profile {name} to {:?}", self.path);
        Ok(())
    }

    /// Delete a profile (`Ok(true)` if removed, `Ok(false)` if it didn’t exist).
    /// Nothing is written when the name is absent.
    pub fn remove(&self, name: &str) -> Result<bool, TetherError> {
        let RawStore::Records(mut records) = self.read_raw()? else {
            return Ok(false);
        };
        if records.remove(name).is_none() {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }
}

/// Pretty JSON with 4-space indentation and a trailing newline.
fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, TetherError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

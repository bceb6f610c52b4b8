//! Class name resolution
//!
//! A bare identifier names a script class when `<name>.psc` exists in one of
//! the active profile's import directories. Namespaced names map to nested
//! directories (`Quest:Stage` -> `quest/stage.psc`). Lookups run on every
//! styled identifier, so results can be cached per profile.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension of Papyrus source files
pub const SCRIPT_EXTENSION: &str = "psc";

/// A named set of import directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Searched in order, first hit wins
    #[serde(default)]
    pub import_dirs: Vec<PathBuf>,
}

impl Profile {
    pub fn new(name: &str, import_dirs: Vec<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            import_dirs,
        }
    }
}

/// Known answers for one profile; the two sets never share a name
#[derive(Debug, Default)]
struct ClassCache {
    classes: HashSet<String>,
    non_classes: HashSet<String>,
}

/// Resolves identifiers to script files
#[derive(Debug, Default)]
pub struct ClassNameResolver {
    caching: bool,
    caches: HashMap<String, ClassCache>,
}

impl ClassNameResolver {
    pub fn new(caching: bool) -> Self {
        Self {
            caching,
            caches: HashMap::new(),
        }
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching
    }

    /// Turn caching on or off; turning it off empties every profile's cache
    pub fn set_caching(&mut self, enabled: bool) {
        self.caching = enabled;
        if !enabled {
            self.clear();
        }
    }

    /// Drop all cached answers
    pub fn clear(&mut self) {
        self.caches.clear();
    }

    /// Whether `identifier` names a script reachable from `profile`
    pub fn is_class(&mut self, identifier: &str, profile: &Profile) -> bool {
        let identifier = identifier.to_lowercase();
        if self.caching {
            if let Some(cache) = self.caches.get(&profile.name) {
                if cache.classes.contains(&identifier) {
                    log::trace!("class cache hit: {}", identifier);
                    return true;
                }
                if cache.non_classes.contains(&identifier) {
                    log::trace!("class cache miss: {}", identifier);
                    return false;
                }
            }
        }
        self.resolve(&identifier, profile).is_some()
    }

    /// Find the script file for `identifier`, unless the cache already
    /// knows it is not a class
    pub fn locate(&mut self, identifier: &str, profile: &Profile) -> Option<PathBuf> {
        let identifier = identifier.to_lowercase();
        let known_miss = self.caching
            && self
                .caches
                .get(&profile.name)
                .is_some_and(|cache| cache.non_classes.contains(&identifier));
        if known_miss {
            log::trace!("class cache miss: {}", identifier);
            return None;
        }
        self.resolve(&identifier, profile)
    }

    /// Find the script file for `identifier`, probing the file system
    pub fn resolve(&mut self, identifier: &str, profile: &Profile) -> Option<PathBuf> {
        let identifier = identifier.to_lowercase();
        let found = relative_script_path(&identifier).and_then(|parts| {
            profile
                .import_dirs
                .iter()
                .find_map(|dir| probe(dir, &parts))
        });
        if self.caching {
            self.remember(&profile.name, identifier, found.is_some());
        }
        found
    }

    fn remember(&mut self, profile: &str, identifier: String, is_class: bool) {
        let cache = self.caches.entry(profile.to_string()).or_default();
        if is_class {
            cache.non_classes.remove(&identifier);
            cache.classes.insert(identifier);
        } else {
            cache.classes.remove(&identifier);
            cache.non_classes.insert(identifier);
        }
    }

    /// Number of cached answers for a profile (classes, non-classes)
    pub fn cached(&self, profile: &str) -> (usize, usize) {
        self.caches
            .get(profile)
            .map_or((0, 0), |c| (c.classes.len(), c.non_classes.len()))
    }
}

/// Path components for a (case-folded) identifier, the last one with the
/// script extension
fn relative_script_path(identifier: &str) -> Option<Vec<String>> {
    let mut parts: Vec<String> = identifier
        .split(':')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let last = parts.last_mut()?;
    last.push('.');
    last.push_str(SCRIPT_EXTENSION);
    Some(parts)
}

/// Look for `parts` under `dir`, falling back to a case-insensitive walk
fn probe(dir: &Path, parts: &[String]) -> Option<PathBuf> {
    let exact = parts.iter().fold(dir.to_path_buf(), |path, part| path.join(part));
    if exact.is_file() {
        return Some(exact);
    }

    let mut current = dir.to_path_buf();
    for part in parts {
        current = fs::read_dir(&current)
            .ok()?
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_name().to_string_lossy().to_lowercase() == *part)?
            .path();
    }
    current.is_file().then_some(current)
}

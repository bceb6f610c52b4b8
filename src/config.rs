//! Configuration file support
//!
//! Loads settings from ~/.papyrus-lex.toml (or %USERPROFILE%\.papyrus-lex.toml
//! on Windows).
//!
//! Example:
//! ```text
//! # papyrus-lex configuration
//! fold_middle = true
//! class_cache = true
//! active_profile = "skyrim"
//!
//! [words]
//! keywords_alt = "length getstate gotostate"
//!
//! [[profiles]]
//! name = "skyrim"
//! import_dirs = ["C:/Skyrim/Data/Scripts/Source"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexError, Result};
use crate::syntax::{builtin, Profile, WordList, WordListKind, WordLists};

/// Word list overrides; unset lists use the built-in Papyrus lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListConfig {
    pub operators: Option<String>,
    pub flow_control: Option<String>,
    pub types: Option<String>,
    pub keywords: Option<String>,
    pub keywords_alt: Option<String>,
    pub fold_open: Option<String>,
    pub fold_middle: Option<String>,
    pub fold_close: Option<String>,
}

impl WordListConfig {
    fn get(&self, kind: WordListKind) -> Option<&str> {
        let list = match kind {
            WordListKind::Operators => &self.operators,
            WordListKind::FlowControl => &self.flow_control,
            WordListKind::Types => &self.types,
            WordListKind::Keywords => &self.keywords,
            WordListKind::KeywordsAlt => &self.keywords_alt,
            WordListKind::FoldOpen => &self.fold_open,
            WordListKind::FoldMiddle => &self.fold_middle,
            WordListKind::FoldClose => &self.fold_close,
        };
        list.as_deref()
    }

    /// Resolve overrides against the built-in lists
    pub fn build(&self) -> WordLists {
        let mut lists = WordLists::default();
        for kind in WordListKind::ALL {
            let words = self.get(kind).unwrap_or_else(|| builtin::default_list(kind));
            lists.set(kind, WordList::from_words(words));
        }
        lists
    }
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Treat a lone `Else`/`ElseIf` line as a fold header
    pub fold_middle: bool,
    /// Cache class name lookups per profile
    pub class_cache: bool,
    /// Highlight block keyword matches
    pub keyword_matching: bool,
    /// Host indicator used when a match is found
    pub matched_indicator: u32,
    /// Host indicator used when no match is found
    pub unmatched_indicator: u32,
    /// Name of the profile used for class names
    pub active_profile: Option<String>,
    /// Word list overrides
    pub words: WordListConfig,
    pub profiles: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fold_middle: false,
            class_cache: true,
            keyword_matching: true,
            matched_indicator: 8,
            unmatched_indicator: 9,
            active_profile: None,
            words: WordListConfig::default(),
            profiles: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".papyrus-lex.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".papyrus-lex.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file gives defaults; an unreadable one is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("ignoring {}: {}", path.display(), e);
            Config::default()
        })
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save current configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save current configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, format!("# papyrus-lex configuration\n{}", contents))?;
        Ok(())
    }

    /// The active profile, if one is set and defined
    pub fn profile(&self) -> Option<&Profile> {
        let name = self.active_profile.as_deref()?;
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Select the active profile by name
    pub fn select_profile(&mut self, name: &str) -> Result<()> {
        if !self.profiles.iter().any(|p| p.name == name) {
            return Err(LexError::UnknownProfile(name.to_string()));
        }
        self.active_profile = Some(name.to_string());
        Ok(())
    }
}

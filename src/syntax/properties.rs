//! Declared property registry
//!
//! Properties are registered while lines are styled (`Int Property Health`)
//! and shifted, flagged or dropped when the host reports edits, so that
//! later uses of the name can be styled as `Property` without a reparse.

use std::collections::HashSet;

/// A property declaration seen by the styler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    /// Case-folded property name
    pub name: String,
    /// Line of the declaration
    pub line: usize,
    /// Set when an edit touched the declaring line
    pub needs_recheck: bool,
}

/// Registry of declared property names for one document
#[derive(Debug, Clone, Default)]
pub struct PropertyTracker {
    records: Vec<PropertyRecord>,
    names: HashSet<String>,
}

impl PropertyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration of `name` on `line`
    ///
    /// The first declaration of a name wins. A record flagged by an edit is
    /// re-pinned to `line` if the declaration now sits at or after it.
    pub fn register(&mut self, name: &str, line: usize) {
        match self.records.iter_mut().find(|r| r.name == name) {
            None => {
                self.records.push(PropertyRecord {
                    name: name.to_string(),
                    line,
                    needs_recheck: false,
                });
                self.names.insert(name.to_string());
            }
            Some(record) if record.line <= line && record.needs_recheck => {
                record.line = line;
                record.needs_recheck = false;
            }
            Some(_) => {}
        }
    }

    /// Apply an edit notification
    ///
    /// `lines_added` is negative for deletions. Records inside a deleted span,
    /// or on a line edited in place, are dropped; records on the edit line are
    /// flagged for recheck; records below the edit are shifted.
    pub fn on_edit(&mut self, edit_line: usize, lines_added: isize) {
        let edit = edit_line as isize;
        let mut removed = Vec::new();

        self.records.retain_mut(|record| {
            let line = record.line as isize;
            if line < edit {
                return true;
            }
            let deleted = (lines_added < 0 && line <= edit - lines_added)
                || (lines_added == 0 && line == edit);
            if deleted {
                removed.push(std::mem::take(&mut record.name));
                return false;
            }
            if line == edit {
                record.needs_recheck = true;
            } else {
                record.line = (line + lines_added).max(0) as usize;
            }
            true
        });

        for name in removed {
            log::trace!("dropping property {} after edit at line {}", name, edit_line);
            self.names.remove(&name);
        }
    }

    /// O(1) membership test against live property names
    pub fn is_property(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Get the record for a name
    pub fn record(&self, name: &str) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every declaration
    pub fn clear(&mut self) {
        self.records.clear();
        self.names.clear();
    }
}

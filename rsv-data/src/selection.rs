use serde::Serialize;
use std::collections::BTreeSet;

/// The set of sources currently summed together.
///
/// Values are immutable; [`toggle`](Self::toggle) returns a new selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceSelection {
    ids: BTreeSet<String>,
}

impl SourceSelection {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SourceSelection {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn contains(&self, source_id: &str) -> bool {
        self.ids.contains(source_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add a source if it is not selected, remove it if it is.
    ///
    /// Removing the only selected source is refused and the selection is
    /// returned unchanged.
    pub fn toggle(&self, source_id: &str) -> Self {
        let mut ids = self.ids.clone();
        if ids.contains(source_id) {
            if ids.len() == 1 {
                return self.clone();
            }
            ids.remove(source_id);
        } else {
            ids.insert(source_id.to_string());
        }
        SourceSelection { ids }
    }
}

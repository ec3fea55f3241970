//! Side-by-side compare set carried in the `compare` URL key

use super::QueryParams;

pub const COMPARE_KEY: &str = "compare";
/// Comparing needs at least two items
pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 5;

/// Ordered, de-duplicated set of app ids picked for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSet {
    ids: Vec<u32>,
}

impl CompareSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `compare` key. Non-positive or unparsable ids are dropped,
    /// repeats keep their first position, and anything past the cap is
    /// ignored. Fewer than two ids means compare mode is off.
    pub fn decode(params: &QueryParams) -> Self {
        let mut ids = Vec::new();
        if let Some(raw) = params.get(COMPARE_KEY) {
            for id in raw.split(',').filter_map(|part| part.trim().parse::<u32>().ok()) {
                if id > 0 && !ids.contains(&id) && ids.len() < MAX_COMPARE {
                    ids.push(id);
                }
            }
        }
        if ids.len() < MIN_COMPARE {
            ids.clear();
        }
        Self { ids }
    }

    /// Append the `compare` key when compare mode is active.
    pub fn encode_into(&self, params: &mut QueryParams) {
        if self.is_active() {
            let joined: Vec<String> = self.ids.iter().map(|id| id.to_string()).collect();
            params.push(COMPARE_KEY, joined.join(","));
        }
    }

    /// Add or remove an id. Adding beyond the cap is ignored; returns whether
    /// the set changed.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| *existing == id) {
            self.ids.remove(pos);
            true
        } else if id > 0 && self.ids.len() < MAX_COMPARE {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_active(&self) -> bool {
        self.ids.len() >= MIN_COMPARE
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }
}

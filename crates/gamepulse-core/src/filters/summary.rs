//! Human-readable summaries of a filter state

use super::fields::{MultiField, RangeField, TriStateField};
use super::{FilterState, MultiSelect};
use crate::scale::format_with_unit;

impl FilterState {
    /// Number of constrained dimensions. A min/max pair counts once.
    pub fn active_filter_count(&self) -> usize {
        let ranges = RangeField::ALL
            .iter()
            .filter(|f| !self.range(**f).is_unbounded())
            .count();
        let multis = MultiField::ALL
            .iter()
            .filter(|f| !self.multi(**f).is_empty())
            .count();
        let tri_states = TriStateField::ALL
            .iter()
            .filter(|f| self.tri_state(**f).is_some())
            .count();
        let singles = [
            self.search.is_some(),
            !self.categories.is_empty(),
            self.min_discount.is_some(),
            self.velocity_tier.is_some(),
            self.steam_deck.is_some(),
            self.controller.is_some(),
            self.release_year.is_some(),
            self.publisher_search.is_some(),
            self.developer_search.is_some(),
            self.publisher_size.is_some(),
            self.min_vs_publisher.is_some(),
            self.ccu_tier.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count();

        ranges + multis + tri_states + singles
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Stable one-line label, e.g. `game · CCU ≥ 1.0K · genres(all): 1,2`.
    ///
    /// Used as the opaque label for exports and saved views.
    pub fn describe(&self) -> String {
        let mut parts = vec![self.app_type.to_string()];

        if let Some(search) = &self.search {
            parts.push(format!("\"{}\"", search));
        }
        for field in RangeField::ALL {
            let range = self.range(*field);
            let unit = field.domain().unit;
            let part = match (range.min, range.max) {
                (Some(lo), Some(hi)) => format!(
                    "{} {}–{}",
                    field.label(),
                    format_with_unit(lo, unit),
                    format_with_unit(hi, unit)
                ),
                (Some(lo), None) => format!("{} ≥ {}", field.label(), format_with_unit(lo, unit)),
                (None, Some(hi)) => format!("{} ≤ {}", field.label(), format_with_unit(hi, unit)),
                (None, None) => continue,
            };
            parts.push(part);
        }
        for field in MultiField::ALL {
            if let Some(part) = describe_multi(field.ids_key(), self.multi(*field)) {
                parts.push(part);
            }
        }
        if !self.categories.is_empty() {
            parts.push(format!("categories: {}", join_ids(&self.categories)));
        }
        for field in TriStateField::ALL {
            match self.tri_state(*field) {
                Some(true) => parts.push(field.label().to_string()),
                Some(false) => parts.push(format!("not {}", field.label())),
                None => {}
            }
        }
        if let Some(discount) = self.min_discount {
            parts.push(format!("discount ≥ {}%", discount));
        }
        if let Some(tier) = self.velocity_tier {
            parts.push(format!("velocity: {}", tier));
        }
        if let Some(deck) = self.steam_deck {
            parts.push(format!("deck: {}", deck));
        }
        if let Some(controller) = self.controller {
            parts.push(format!("controller: {}", controller));
        }
        if let Some(year) = self.release_year {
            parts.push(format!("released {}", year));
        }
        if let Some(publisher) = &self.publisher_search {
            parts.push(format!("publisher: {}", publisher));
        }
        if let Some(developer) = &self.developer_search {
            parts.push(format!("developer: {}", developer));
        }
        if let Some(size) = self.publisher_size {
            parts.push(format!("publisher size: {}", size));
        }
        if let Some(ratio) = self.min_vs_publisher {
            parts.push(format!("vs publisher ≥ {}", ratio));
        }
        if let Some(tier) = self.ccu_tier {
            parts.push(format!("tier {}", tier));
        }

        parts.join(" · ")
    }
}

fn describe_multi(name: &str, select: &MultiSelect) -> Option<String> {
    if select.is_empty() {
        return None;
    }
    Some(format!("{}({}): {}", name, select.mode, join_ids(&select.ids)))
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use crate::filters::fields::{CcuTier, SteamDeck};
    use crate::filters::FilterState;

    #[test]
    fn test_default_has_no_active_filters() {
        let state = FilterState::default();
        assert_eq!(state.active_filter_count(), 0);
        assert!(!state.has_active_filters());
        assert_eq!(state.describe(), "game");
    }

    #[test]
    fn test_pairs_count_once() {
        let mut state = FilterState::default();
        state.ccu.min = Some(1000.0);
        state.ccu.max = Some(5000.0);
        state.genres.ids = vec![1, 2];
        state.is_free = Some(false);
        state.ccu_tier = Some(CcuTier::Tier1);
        assert_eq!(state.active_filter_count(), 4);
    }

    #[test]
    fn test_describe() {
        let mut state = FilterState::default();
        state.ccu.min = Some(1000.0);
        state.genres.ids = vec![1, 2];
        assert_eq!(state.describe(), "game · CCU ≥ 1.0K · genres(all): 1,2");

        state.price.max = Some(19.99);
        state.steam_deck = Some(SteamDeck::Verified);
        state.is_free = Some(false);
        assert_eq!(
            state.describe(),
            "game · CCU ≥ 1.0K · Price ≤ $19.99 · genres(all): 1,2 · not free · deck: verified"
        );
    }
}

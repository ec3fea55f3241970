//! One-click presets for growth, momentum and sentiment ranges
//!
//! A preset is nothing more than a named `(min, max)` pair. Whether a preset
//! is "active" is inferred from the current range values, so a preset button
//! lights up for a hand-typed `minGrowth7d=10` exactly as it does after a
//! click.

use serde::{Deserialize, Serialize};

use crate::filters::fields::RangeField;
use crate::filters::{FilterState, Range};

/// Named preset; the same name can appear in several groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetId {
    Growing,
    Declining,
    Stable,
    Accelerating,
    Decelerating,
    Improving,
    Worsening,
}

impl PresetId {
    pub fn label(self) -> &'static str {
        match self {
            PresetId::Growing => "Growing",
            PresetId::Declining => "Declining",
            PresetId::Stable => "Stable",
            PresetId::Accelerating => "Accelerating",
            PresetId::Decelerating => "Decelerating",
            PresetId::Improving => "Improving",
            PresetId::Worsening => "Worsening",
        }
    }
}

/// Defining pair of a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub id: PresetId,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Preset {
    const fn new(id: PresetId, min: Option<f64>, max: Option<f64>) -> Self {
        Self { id, min, max }
    }

    pub fn range(&self) -> Range {
        Range::new(self.min, self.max)
    }

    /// Exact match on both bounds; two absent bounds match.
    pub fn matches(&self, range: Range) -> bool {
        self.min == range.min && self.max == range.max
    }
}

const TREND_PRESETS: &[Preset] = &[
    Preset::new(PresetId::Growing, Some(10.0), None),
    Preset::new(PresetId::Declining, None, Some(-10.0)),
    Preset::new(PresetId::Stable, Some(-10.0), Some(10.0)),
];

const MOMENTUM_PRESETS: &[Preset] = &[
    Preset::new(PresetId::Accelerating, Some(10.0), None),
    Preset::new(PresetId::Decelerating, None, Some(-10.0)),
];

const SENTIMENT_PRESETS: &[Preset] = &[
    Preset::new(PresetId::Improving, Some(3.0), None),
    Preset::new(PresetId::Worsening, None, Some(-3.0)),
];

/// A range facet that offers presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetGroup {
    Growth7d,
    Growth30d,
    Momentum,
    SentimentDelta,
}

impl PresetGroup {
    pub const ALL: &'static [PresetGroup] = &[
        PresetGroup::Growth7d,
        PresetGroup::Growth30d,
        PresetGroup::Momentum,
        PresetGroup::SentimentDelta,
    ];

    pub fn field(self) -> RangeField {
        match self {
            PresetGroup::Growth7d => RangeField::Growth7d,
            PresetGroup::Growth30d => RangeField::Growth30d,
            PresetGroup::Momentum => RangeField::Momentum,
            PresetGroup::SentimentDelta => RangeField::SentimentDelta,
        }
    }

    /// Presets in detection priority order
    pub fn presets(self) -> &'static [Preset] {
        match self {
            PresetGroup::Growth7d | PresetGroup::Growth30d => TREND_PRESETS,
            PresetGroup::Momentum => MOMENTUM_PRESETS,
            PresetGroup::SentimentDelta => SENTIMENT_PRESETS,
        }
    }

    pub fn preset(self, id: PresetId) -> Option<&'static Preset> {
        self.presets().iter().find(|preset| preset.id == id)
    }
}

/// The preset whose pair equals the group's current range, if any.
pub fn active_preset(state: &FilterState, group: PresetGroup) -> Option<PresetId> {
    let current = state.range(group.field());
    group
        .presets()
        .iter()
        .find(|preset| preset.matches(current))
        .map(|preset| preset.id)
}

pub fn is_preset_active(state: &FilterState, group: PresetGroup, id: PresetId) -> bool {
    active_preset(state, group) == Some(id)
}

/// Overwrite the group's pair with the preset's. Unknown presets leave the
/// state unchanged.
pub fn apply_preset(state: &FilterState, group: PresetGroup, id: PresetId) -> FilterState {
    let mut next = state.clone();
    if let Some(preset) = group.preset(id) {
        *next.range_mut(group.field()) = preset.range();
    }
    next
}

/// Reset both bounds of the group's pair.
pub fn clear_preset(state: &FilterState, group: PresetGroup) -> FilterState {
    let mut next = state.clone();
    *next.range_mut(group.field()) = Range::UNBOUNDED;
    next
}

/// Apply the preset, or clear the pair when that preset is already active.
pub fn toggle_preset(state: &FilterState, group: PresetGroup, id: PresetId) -> FilterState {
    if is_preset_active(state, group, id) {
        clear_preset(state, group)
    } else {
        apply_preset(state, group, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growing_detection_is_exact() {
        let mut state = FilterState::default();
        state.growth_7d = Range::new(Some(10.0), None);
        assert_eq!(active_preset(&state, PresetGroup::Growth7d), Some(PresetId::Growing));
        assert_eq!(active_preset(&state, PresetGroup::Growth30d), None);

        state.growth_7d.min = Some(11.0);
        assert_eq!(active_preset(&state, PresetGroup::Growth7d), None);
    }

    #[test]
    fn test_unbounded_matches_no_preset() {
        let state = FilterState::default();
        for group in PresetGroup::ALL {
            assert_eq!(active_preset(&state, *group), None);
        }
    }

    #[test]
    fn test_preset_pairs_are_distinct() {
        for group in PresetGroup::ALL {
            let presets = group.presets();
            for (i, a) in presets.iter().enumerate() {
                for b in &presets[i + 1..] {
                    assert!(!a.matches(b.range()), "{group:?}: {:?} vs {:?}", a.id, b.id);
                }
            }
        }
    }

    #[test]
    fn test_apply_overwrites_pair_only() {
        let mut state = FilterState::default();
        state.growth_30d = Range::new(Some(-50.0), Some(200.0));
        state.ccu.min = Some(500.0);

        let next = apply_preset(&state, PresetGroup::Growth30d, PresetId::Declining);
        assert_eq!(next.growth_30d, Range::new(None, Some(-10.0)));
        assert_eq!(next.ccu.min, Some(500.0));
        assert!(is_preset_active(&next, PresetGroup::Growth30d, PresetId::Declining));
    }

    #[test]
    fn test_apply_unknown_preset_is_noop() {
        let state = FilterState::default();
        assert_eq!(apply_preset(&state, PresetGroup::Momentum, PresetId::Stable), state);
    }

    #[test]
    fn test_toggle_clears_active_preset() {
        let state = FilterState::default();
        let applied = toggle_preset(&state, PresetGroup::SentimentDelta, PresetId::Improving);
        assert_eq!(applied.sentiment_delta, Range::new(Some(3.0), None));

        let switched = toggle_preset(&applied, PresetGroup::SentimentDelta, PresetId::Worsening);
        assert_eq!(switched.sentiment_delta, Range::new(None, Some(-3.0)));

        let cleared = toggle_preset(&switched, PresetGroup::SentimentDelta, PresetId::Worsening);
        assert!(cleared.sentiment_delta.is_unbounded());
    }
}

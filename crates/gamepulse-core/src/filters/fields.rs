//! Field registry: URL keys, value sets and slider domains for every filter
//!
//! Everything that names a filter field (URL keys, remote payload names,
//! display labels, control domains) is defined here so the codec, the
//! reducer and the UI cannot disagree about it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scale::{Scale, Unit};

/// Defines a closed enum whose variants map 1:1 onto URL parameter values.
macro_rules! param_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $param:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $param)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value used in the URL and the remote payload
            pub fn as_param(self) -> &'static str {
                match self {
                    $($name::$variant => $param),+
                }
            }

            /// Parse a URL value; unknown values are `None`
            pub fn from_param(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($param) {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_param())
            }
        }
    };
}

param_enum! {
    /// Store item type
    AppType {
        All => "all",
        Game => "game",
        Dlc => "dlc",
        Demo => "demo",
        Mod => "mod",
        Video => "video",
        Music => "music",
    }
}

param_enum! {
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

param_enum! {
    /// Sortable result columns
    SortField {
        Name => "name",
        CcuPeak => "ccu_peak",
        Owners => "owners",
        Reviews => "reviews",
        ReviewScore => "review_score",
        Price => "price",
        Playtime => "playtime",
        ReleaseDate => "release_date",
        Growth7d => "growth_7d",
        Growth30d => "growth_30d",
        Momentum => "momentum",
        SentimentDelta => "sentiment_delta",
        ActivePct => "active_pct",
        ReviewRate => "review_rate",
        ValueScore => "value_score",
        HypeDuration => "hype_duration",
        Discount => "discount",
    }
}

param_enum! {
    /// Combinator applied across the selected ids of a multi-select facet
    MultiMode {
        /// Match items having any of the ids
        Any => "any",
        /// Match items having every id
        All => "all",
    }
}

param_enum! {
    /// Player-count velocity bucket computed upstream
    VelocityTier {
        High => "high",
        Medium => "medium",
        Low => "low",
        Dormant => "dormant",
    }
}

param_enum! {
    SteamDeck {
        Verified => "verified",
        Playable => "playable",
        Unsupported => "unsupported",
    }
}

param_enum! {
    ControllerSupport {
        Full => "full",
        Partial => "partial",
    }
}

param_enum! {
    PublisherSize {
        Indie => "indie",
        Mid => "mid",
        Major => "major",
    }
}

param_enum! {
    /// Peak-CCU bucket computed upstream
    CcuTier {
        Tier1 => "1",
        Tier2 => "2",
        Tier3 => "3",
    }
}

param_enum! {
    /// Result table columns
    ColumnId {
        Name => "name",
        Publisher => "publisher",
        Developer => "developer",
        Ccu => "ccu",
        Owners => "owners",
        Reviews => "reviews",
        Score => "score",
        Price => "price",
        Discount => "discount",
        Playtime => "playtime",
        Growth7d => "growth_7d",
        Growth30d => "growth_30d",
        Momentum => "momentum",
        Sentiment => "sentiment",
        ActivePct => "active_pct",
        ReviewRate => "review_rate",
        ValueScore => "value_score",
        Release => "release",
        Hype => "hype",
        SteamDeck => "steam_deck",
        Tier => "tier",
    }
}

impl ColumnId {
    /// Table header text
    pub fn label(self) -> &'static str {
        match self {
            ColumnId::Name => "Name",
            ColumnId::Publisher => "Publisher",
            ColumnId::Developer => "Developer",
            ColumnId::Ccu => "Peak CCU",
            ColumnId::Owners => "Owners",
            ColumnId::Reviews => "Reviews",
            ColumnId::Score => "Score",
            ColumnId::Price => "Price",
            ColumnId::Discount => "Discount",
            ColumnId::Playtime => "Playtime",
            ColumnId::Growth7d => "7d Growth",
            ColumnId::Growth30d => "30d Growth",
            ColumnId::Momentum => "Momentum",
            ColumnId::Sentiment => "Sentiment",
            ColumnId::ActivePct => "Active %",
            ColumnId::ReviewRate => "Review Rate",
            ColumnId::ValueScore => "Value",
            ColumnId::Release => "Released",
            ColumnId::Hype => "Hype",
            ColumnId::SteamDeck => "Steam Deck",
            ColumnId::Tier => "Tier",
        }
    }

    /// Sort applied when the column header is clicked, if the column sorts
    pub fn sort_field(self) -> Option<SortField> {
        let sort = match self {
            ColumnId::Name => SortField::Name,
            ColumnId::Ccu => SortField::CcuPeak,
            ColumnId::Owners => SortField::Owners,
            ColumnId::Reviews => SortField::Reviews,
            ColumnId::Score => SortField::ReviewScore,
            ColumnId::Price => SortField::Price,
            ColumnId::Discount => SortField::Discount,
            ColumnId::Playtime => SortField::Playtime,
            ColumnId::Growth7d => SortField::Growth7d,
            ColumnId::Growth30d => SortField::Growth30d,
            ColumnId::Momentum => SortField::Momentum,
            ColumnId::Sentiment => SortField::SentimentDelta,
            ColumnId::ActivePct => SortField::ActivePct,
            ColumnId::ReviewRate => SortField::ReviewRate,
            ColumnId::ValueScore => SortField::ValueScore,
            ColumnId::Release => SortField::ReleaseDate,
            ColumnId::Hype => SortField::HypeDuration,
            ColumnId::Publisher | ColumnId::Developer | ColumnId::SteamDeck | ColumnId::Tier => return None,
        };
        Some(sort)
    }
}

/// Value domain of a range control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDomain {
    pub min: f64,
    pub max: f64,
    pub scale: Scale,
    pub unit: Unit,
}

impl RangeDomain {
    const fn new(min: f64, max: f64, scale: Scale, unit: Unit) -> Self {
        Self { min, max, scale, unit }
    }
}

/// Every min/max (or min-only) numeric facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeField {
    Ccu,
    Owners,
    Reviews,
    Score,
    Price,
    Playtime,
    Growth7d,
    Growth30d,
    Momentum,
    SentimentDelta,
    ActivePct,
    ReviewRate,
    ValueScore,
    Age,
    Hype,
}

impl RangeField {
    pub const ALL: &'static [RangeField] = &[
        RangeField::Ccu,
        RangeField::Owners,
        RangeField::Reviews,
        RangeField::Score,
        RangeField::Price,
        RangeField::Playtime,
        RangeField::Growth7d,
        RangeField::Growth30d,
        RangeField::Momentum,
        RangeField::SentimentDelta,
        RangeField::ActivePct,
        RangeField::ReviewRate,
        RangeField::ValueScore,
        RangeField::Age,
        RangeField::Hype,
    ];

    pub fn min_key(self) -> &'static str {
        match self {
            RangeField::Ccu => "minCcu",
            RangeField::Owners => "minOwners",
            RangeField::Reviews => "minReviews",
            RangeField::Score => "minScore",
            RangeField::Price => "minPrice",
            RangeField::Playtime => "minPlaytime",
            RangeField::Growth7d => "minGrowth7d",
            RangeField::Growth30d => "minGrowth30d",
            RangeField::Momentum => "minMomentum",
            RangeField::SentimentDelta => "minSentimentDelta",
            RangeField::ActivePct => "minActivePct",
            RangeField::ReviewRate => "minReviewRate",
            RangeField::ValueScore => "minValueScore",
            RangeField::Age => "minAge",
            RangeField::Hype => "minHype",
        }
    }

    /// `None` for min-only facets
    pub fn max_key(self) -> Option<&'static str> {
        match self {
            RangeField::Ccu => Some("maxCcu"),
            RangeField::Owners => Some("maxOwners"),
            RangeField::Reviews => Some("maxReviews"),
            RangeField::Score => Some("maxScore"),
            RangeField::Price => Some("maxPrice"),
            RangeField::Playtime => Some("maxPlaytime"),
            RangeField::Growth7d => Some("maxGrowth7d"),
            RangeField::Growth30d => Some("maxGrowth30d"),
            RangeField::Momentum => Some("maxMomentum"),
            RangeField::SentimentDelta => Some("maxSentimentDelta"),
            RangeField::ActivePct | RangeField::ReviewRate | RangeField::ValueScore => None,
            RangeField::Age => Some("maxAge"),
            RangeField::Hype => Some("maxHype"),
        }
    }

    pub fn is_min_only(self) -> bool {
        self.max_key().is_none()
    }

    /// Column name used in the remote payload (`min_<column>` / `max_<column>`)
    pub fn column(self) -> &'static str {
        match self {
            RangeField::Ccu => "ccu",
            RangeField::Owners => "owners",
            RangeField::Reviews => "reviews",
            RangeField::Score => "score",
            RangeField::Price => "price",
            RangeField::Playtime => "playtime",
            RangeField::Growth7d => "growth_7d",
            RangeField::Growth30d => "growth_30d",
            RangeField::Momentum => "momentum",
            RangeField::SentimentDelta => "sentiment_delta",
            RangeField::ActivePct => "active_pct",
            RangeField::ReviewRate => "review_rate",
            RangeField::ValueScore => "value_score",
            RangeField::Age => "age",
            RangeField::Hype => "hype",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RangeField::Ccu => "CCU",
            RangeField::Owners => "Owners",
            RangeField::Reviews => "Reviews",
            RangeField::Score => "Score",
            RangeField::Price => "Price",
            RangeField::Playtime => "Playtime",
            RangeField::Growth7d => "Growth 7d",
            RangeField::Growth30d => "Growth 30d",
            RangeField::Momentum => "Momentum",
            RangeField::SentimentDelta => "Sentiment Δ",
            RangeField::ActivePct => "Active %",
            RangeField::ReviewRate => "Review rate",
            RangeField::ValueScore => "Value score",
            RangeField::Age => "Release age",
            RangeField::Hype => "Hype duration",
        }
    }

    pub fn domain(self) -> RangeDomain {
        match self {
            RangeField::Ccu => RangeDomain::new(0.0, 1_000_000.0, Scale::Log, Unit::Count),
            RangeField::Owners => RangeDomain::new(0.0, 100_000_000.0, Scale::Log, Unit::Count),
            RangeField::Reviews => RangeDomain::new(0.0, 10_000_000.0, Scale::Log, Unit::Count),
            RangeField::Score => RangeDomain::new(0.0, 100.0, Scale::Linear, Unit::Percent),
            RangeField::Price => RangeDomain::new(0.0, 100.0, Scale::Linear, Unit::Currency),
            RangeField::Playtime => RangeDomain::new(0.0, 1_000.0, Scale::Log, Unit::Hours),
            RangeField::Growth7d => RangeDomain::new(-100.0, 500.0, Scale::Linear, Unit::Percent),
            RangeField::Growth30d => RangeDomain::new(-100.0, 1_000.0, Scale::Linear, Unit::Percent),
            RangeField::Momentum => RangeDomain::new(-100.0, 100.0, Scale::Linear, Unit::Percent),
            RangeField::SentimentDelta => RangeDomain::new(-50.0, 50.0, Scale::Linear, Unit::Percent),
            RangeField::ActivePct => RangeDomain::new(0.0, 100.0, Scale::Linear, Unit::Percent),
            RangeField::ReviewRate => RangeDomain::new(0.0, 100.0, Scale::Linear, Unit::Score),
            RangeField::ValueScore => RangeDomain::new(0.0, 50.0, Scale::Linear, Unit::Score),
            RangeField::Age => RangeDomain::new(0.0, 7_300.0, Scale::Log, Unit::Days),
            RangeField::Hype => RangeDomain::new(0.0, 1_825.0, Scale::Linear, Unit::Days),
        }
    }
}

/// Multi-select facets that carry an any/all combinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiField {
    Genres,
    Tags,
    Platforms,
}

impl MultiField {
    pub const ALL: &'static [MultiField] = &[MultiField::Genres, MultiField::Tags, MultiField::Platforms];

    pub fn ids_key(self) -> &'static str {
        match self {
            MultiField::Genres => "genres",
            MultiField::Tags => "tags",
            MultiField::Platforms => "platforms",
        }
    }

    pub fn mode_key(self) -> &'static str {
        match self {
            MultiField::Genres => "genreMode",
            MultiField::Tags => "tagMode",
            MultiField::Platforms => "platformMode",
        }
    }

    /// Payload name of the combinator (`genre_mode`, ...)
    pub fn mode_column(self) -> &'static str {
        match self {
            MultiField::Genres => "genre_mode",
            MultiField::Tags => "tag_mode",
            MultiField::Platforms => "platform_mode",
        }
    }
}

/// Yes/no/any facets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriStateField {
    IsFree,
    HasWorkshop,
    EarlyAccess,
    SelfPublished,
}

impl TriStateField {
    pub const ALL: &'static [TriStateField] = &[
        TriStateField::IsFree,
        TriStateField::HasWorkshop,
        TriStateField::EarlyAccess,
        TriStateField::SelfPublished,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TriStateField::IsFree => "isFree",
            TriStateField::HasWorkshop => "hasWorkshop",
            TriStateField::EarlyAccess => "earlyAccess",
            TriStateField::SelfPublished => "selfPublished",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            TriStateField::IsFree => "is_free",
            TriStateField::HasWorkshop => "has_workshop",
            TriStateField::EarlyAccess => "early_access",
            TriStateField::SelfPublished => "self_published",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TriStateField::IsFree => "free",
            TriStateField::HasWorkshop => "workshop",
            TriStateField::EarlyAccess => "early access",
            TriStateField::SelfPublished => "self-published",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_param_round_trip() {
        for sort in SortField::ALL {
            assert_eq!(SortField::from_param(sort.as_param()), Some(*sort));
        }
        for column in ColumnId::ALL {
            assert_eq!(ColumnId::from_param(column.as_param()), Some(*column));
        }
        assert_eq!(AppType::from_param("DLC"), Some(AppType::Dlc));
        assert_eq!(AppType::from_param("software"), None);
        assert_eq!(CcuTier::from_param("2"), Some(CcuTier::Tier2));
    }

    #[test]
    fn test_url_keys_are_unique() {
        let mut keys = HashSet::new();
        for field in RangeField::ALL {
            assert!(keys.insert(field.min_key()));
            if let Some(max) = field.max_key() {
                assert!(keys.insert(max));
            }
        }
        for field in MultiField::ALL {
            assert!(keys.insert(field.ids_key()));
            assert!(keys.insert(field.mode_key()));
        }
        for field in TriStateField::ALL {
            assert!(keys.insert(field.key()));
        }
    }

    #[test]
    fn test_min_only_fields() {
        let min_only: Vec<_> = RangeField::ALL.iter().filter(|f| f.is_min_only()).collect();
        assert_eq!(
            min_only,
            vec![&RangeField::ActivePct, &RangeField::ReviewRate, &RangeField::ValueScore]
        );
    }

    #[test]
    fn test_domains_are_well_formed() {
        for field in RangeField::ALL {
            let domain = field.domain();
            assert!(domain.max > domain.min, "{field:?}");
            if domain.scale == Scale::Log {
                assert!(domain.max > 1.0, "{field:?}");
            }
        }
    }

    #[test]
    fn test_column_sort_fields_are_distinct() {
        let mut seen = HashSet::new();
        for column in ColumnId::ALL {
            if let Some(sort) = column.sort_field() {
                assert!(seen.insert(sort), "{column:?}");
            }
        }
        assert_eq!(ColumnId::Ccu.sort_field(), Some(SortField::CcuPeak));
        assert_eq!(ColumnId::Publisher.sort_field(), None);
    }

    #[test]
    fn test_sort_order_flip() {
        assert_eq!(SortOrder::Asc.flipped(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.flipped(), SortOrder::Asc);
    }
}

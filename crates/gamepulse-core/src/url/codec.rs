//! FilterState <-> query parameter codec
//!
//! Encoding writes a key only when the field differs from its default, so the
//! baseline view has an empty query string and shared links stay short.
//! Decoding never fails: malformed values fall back to the default for
//! required fields and to "unconstrained" for everything else.

use tracing::debug;

use super::QueryParams;
use crate::filters::defaults::{
    DEFAULT_COLUMNS, DEFAULT_LIMIT, DEFAULT_MULTI_MODE, DEFAULT_OFFSET, DEFAULT_ORDER,
    DEFAULT_SORT, DEFAULT_TYPE, MAX_DISCOUNT, MAX_LIMIT,
};
use crate::filters::fields::{
    AppType, CcuTier, ColumnId, ControllerSupport, MultiField, MultiMode, PublisherSize,
    RangeField, SortField, SortOrder, SteamDeck, TriStateField, VelocityTier,
};
use crate::filters::{FilterState, MultiSelect, Range};

/// Keys the decoder understands, besides the per-field registry keys
const SCALAR_KEYS: &[&str] = &[
    "type",
    "sort",
    "order",
    "limit",
    "offset",
    "search",
    "minDiscount",
    "velocityTier",
    "categories",
    "steamDeck",
    "controller",
    "releaseYear",
    "publisherSearch",
    "developerSearch",
    "publisherSize",
    "minVsPublisher",
    "ccuTier",
    "columns",
    "compare",
];

// ============================================================================
// Encoding
// ============================================================================

/// Encode the non-default fields of `state`, in a fixed key order.
pub fn encode(state: &FilterState) -> QueryParams {
    let mut params = QueryParams::new();

    if state.app_type != DEFAULT_TYPE {
        params.push("type", state.app_type.as_param());
    }
    if state.sort != DEFAULT_SORT {
        params.push("sort", state.sort.as_param());
    }
    if state.order != DEFAULT_ORDER {
        params.push("order", state.order.as_param());
    }
    if state.limit != DEFAULT_LIMIT {
        params.push("limit", state.limit.to_string());
    }
    if state.offset != DEFAULT_OFFSET {
        params.push("offset", state.offset.to_string());
    }
    write_text(&mut params, "search", &state.search);

    // Metrics
    for field in [
        RangeField::Ccu,
        RangeField::Owners,
        RangeField::Reviews,
        RangeField::Score,
        RangeField::Price,
        RangeField::Playtime,
    ] {
        write_range(&mut params, field, state.range(field));
    }
    write_tri_state(&mut params, TriStateField::IsFree, state.is_free);
    write_display(&mut params, "minDiscount", state.min_discount);

    // Growth and sentiment
    for field in [
        RangeField::Growth7d,
        RangeField::Growth30d,
        RangeField::Momentum,
        RangeField::SentimentDelta,
    ] {
        write_range(&mut params, field, state.range(field));
    }
    write_display(&mut params, "velocityTier", state.velocity_tier);

    // Engagement
    for field in [RangeField::ActivePct, RangeField::ReviewRate, RangeField::ValueScore] {
        write_range(&mut params, field, state.range(field));
    }

    // Content
    write_multi(&mut params, MultiField::Genres, &state.genres);
    write_multi(&mut params, MultiField::Tags, &state.tags);
    write_ids(&mut params, "categories", &state.categories);
    write_tri_state(&mut params, TriStateField::HasWorkshop, state.has_workshop);

    // Platform
    write_multi(&mut params, MultiField::Platforms, &state.platforms);
    write_display(&mut params, "steamDeck", state.steam_deck);
    write_display(&mut params, "controller", state.controller);

    // Release
    write_range(&mut params, RangeField::Age, state.age);
    write_display(&mut params, "releaseYear", state.release_year);
    write_tri_state(&mut params, TriStateField::EarlyAccess, state.early_access);
    write_range(&mut params, RangeField::Hype, state.hype);

    // Relationship
    write_text(&mut params, "publisherSearch", &state.publisher_search);
    write_text(&mut params, "developerSearch", &state.developer_search);
    write_tri_state(&mut params, TriStateField::SelfPublished, state.self_published);
    write_display(&mut params, "publisherSize", state.publisher_size);
    write_display(&mut params, "minVsPublisher", state.min_vs_publisher.filter(|v| v.is_finite()));

    // Activity
    write_display(&mut params, "ccuTier", state.ccu_tier);

    if state.visible_columns.as_slice() != DEFAULT_COLUMNS {
        let columns: Vec<&str> = state.visible_columns.iter().map(|c| c.as_param()).collect();
        params.push("columns", columns.join(","));
    }

    params
}

fn write_range(params: &mut QueryParams, field: RangeField, range: Range) {
    write_display(params, field.min_key(), range.min.filter(|v| v.is_finite()));
    if let Some(max_key) = field.max_key() {
        write_display(params, max_key, range.max.filter(|v| v.is_finite()));
    }
}

fn write_display<T: ToString>(params: &mut QueryParams, key: &str, value: Option<T>) {
    if let Some(value) = value {
        params.push(key, value.to_string());
    }
}

fn write_tri_state(params: &mut QueryParams, field: TriStateField, value: Option<bool>) {
    write_display(params, field.key(), value);
}

fn write_text(params: &mut QueryParams, key: &str, value: &Option<String>) {
    if let Some(text) = value.as_deref().filter(|t| !t.is_empty()) {
        params.push(key, text);
    }
}

fn write_ids(params: &mut QueryParams, key: &str, ids: &[u32]) {
    if !ids.is_empty() {
        let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        params.push(key, joined.join(","));
    }
}

fn write_multi(params: &mut QueryParams, field: MultiField, select: &MultiSelect) {
    write_ids(params, field.ids_key(), &select.ids);
    if select.mode != DEFAULT_MULTI_MODE {
        params.push(field.mode_key(), select.mode.as_param());
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Rebuild a `FilterState` from query parameters.
pub fn decode(params: &QueryParams) -> FilterState {
    log_unknown_keys(params);

    let mut state = FilterState {
        app_type: read_enum(params, "type", AppType::from_param).unwrap_or(DEFAULT_TYPE),
        sort: read_enum(params, "sort", SortField::from_param).unwrap_or(DEFAULT_SORT),
        order: read_enum(params, "order", SortOrder::from_param).unwrap_or(DEFAULT_ORDER),
        search: read_text(params, "search"),
        limit: read_parsed::<u32>(params, "limit")
            .map(|limit| limit.clamp(1, MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT),
        offset: read_parsed::<u32>(params, "offset").unwrap_or(DEFAULT_OFFSET),
        is_free: read_bool(params, TriStateField::IsFree.key()),
        min_discount: read_parsed::<u32>(params, "minDiscount").map(|d| d.min(MAX_DISCOUNT)),
        velocity_tier: read_enum(params, "velocityTier", VelocityTier::from_param),
        genres: read_multi(params, MultiField::Genres),
        tags: read_multi(params, MultiField::Tags),
        categories: read_ids(params, "categories"),
        has_workshop: read_bool(params, TriStateField::HasWorkshop.key()),
        platforms: read_multi(params, MultiField::Platforms),
        steam_deck: read_enum(params, "steamDeck", SteamDeck::from_param),
        controller: read_enum(params, "controller", ControllerSupport::from_param),
        release_year: read_parsed::<i32>(params, "releaseYear"),
        early_access: read_bool(params, TriStateField::EarlyAccess.key()),
        publisher_search: read_text(params, "publisherSearch"),
        developer_search: read_text(params, "developerSearch"),
        self_published: read_bool(params, TriStateField::SelfPublished.key()),
        publisher_size: read_enum(params, "publisherSize", PublisherSize::from_param),
        min_vs_publisher: read_number(params, "minVsPublisher"),
        ccu_tier: read_enum(params, "ccuTier", CcuTier::from_param),
        visible_columns: read_columns(params),
        ..FilterState::default()
    };

    for field in RangeField::ALL {
        let min = read_number(params, field.min_key());
        let max = field.max_key().and_then(|key| read_number(params, key));
        *state.range_mut(*field) = Range::clamped(min, max);
    }

    state
}

fn read_raw<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn read_parsed<T: std::str::FromStr>(params: &QueryParams, key: &str) -> Option<T> {
    let raw = read_raw(params, key)?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        debug!(key, value = raw, "Ignoring unparsable URL value");
    }
    parsed
}

fn read_number(params: &QueryParams, key: &str) -> Option<f64> {
    read_parsed::<f64>(params, key).filter(|v| v.is_finite())
}

fn read_bool(params: &QueryParams, key: &str) -> Option<bool> {
    match read_raw(params, key)? {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            debug!(key, value = other, "Ignoring non-boolean URL value");
            None
        }
    }
}

fn read_enum<T>(params: &QueryParams, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let raw = read_raw(params, key)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        debug!(key, value = raw, "Ignoring unknown URL enum value");
    }
    parsed
}

fn read_text(params: &QueryParams, key: &str) -> Option<String> {
    read_raw(params, key).map(str::to_string)
}

/// Comma-separated ids; unparsable entries and repeats are dropped.
fn read_ids(params: &QueryParams, key: &str) -> Vec<u32> {
    let mut ids = Vec::new();
    let Some(raw) = read_raw(params, key) else {
        return ids;
    };
    for id in raw.split(',').filter_map(|part| part.trim().parse::<u32>().ok()) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

fn read_multi(params: &QueryParams, field: MultiField) -> MultiSelect {
    MultiSelect {
        ids: read_ids(params, field.ids_key()),
        mode: read_enum(params, field.mode_key(), MultiMode::from_param).unwrap_or(DEFAULT_MULTI_MODE),
    }
}

fn read_columns(params: &QueryParams) -> Vec<ColumnId> {
    let mut columns = Vec::new();
    if let Some(raw) = read_raw(params, "columns") {
        for column in raw.split(',').filter_map(ColumnId::from_param) {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    if columns.is_empty() {
        DEFAULT_COLUMNS.to_vec()
    } else {
        columns
    }
}

fn log_unknown_keys(params: &QueryParams) {
    for (key, _) in params.iter() {
        if !is_known_key(key) {
            debug!(key, "Ignoring unknown URL parameter");
        }
    }
}

fn is_known_key(key: &str) -> bool {
    SCALAR_KEYS.contains(&key)
        || RangeField::ALL
            .iter()
            .any(|f| f.min_key() == key || f.max_key() == Some(key))
        || MultiField::ALL
            .iter()
            .any(|f| f.ids_key() == key || f.mode_key() == key)
        || TriStateField::ALL.iter().any(|f| f.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(query: &str) -> FilterState {
        decode(&QueryParams::parse(query))
    }

    fn full_state() -> FilterState {
        let mut state = FilterState {
            app_type: AppType::All,
            sort: SortField::Growth7d,
            order: SortOrder::Asc,
            search: Some("roguelike deck".to_string()),
            limit: 100,
            offset: 200,
            is_free: Some(false),
            min_discount: Some(25),
            velocity_tier: Some(VelocityTier::High),
            categories: vec![2, 9],
            has_workshop: Some(true),
            steam_deck: Some(SteamDeck::Verified),
            controller: Some(ControllerSupport::Full),
            release_year: Some(2023),
            early_access: Some(false),
            publisher_search: Some("Devolver".to_string()),
            developer_search: Some("Team & Co".to_string()),
            self_published: Some(true),
            publisher_size: Some(PublisherSize::Indie),
            min_vs_publisher: Some(1.5),
            ccu_tier: Some(CcuTier::Tier2),
            visible_columns: vec![ColumnId::Name, ColumnId::Momentum, ColumnId::Price],
            ..FilterState::default()
        };
        state.ccu = Range::new(Some(1000.0), Some(50_000.0));
        state.owners = Range::new(Some(20_000.0), None);
        state.reviews = Range::new(None, Some(1_000_000.0));
        state.score = Range::new(Some(80.0), Some(100.0));
        state.price = Range::new(Some(0.99), Some(19.99));
        state.playtime = Range::new(Some(2.5), None);
        state.growth_7d = Range::new(Some(-10.0), Some(10.0));
        state.growth_30d = Range::new(None, Some(-10.0));
        state.momentum = Range::new(Some(0.1), None);
        state.sentiment_delta = Range::new(Some(-3.0), Some(3.0));
        state.active_pct = Range::new(Some(12.5), None);
        state.review_rate = Range::new(Some(1.0), None);
        state.value_score = Range::new(Some(4.0), None);
        state.age = Range::new(Some(0.0), Some(30.0));
        state.hype = Range::new(Some(30.0), Some(365.0));
        state.genres = MultiSelect { ids: vec![1, 23, 4], mode: MultiMode::Any };
        state.tags = MultiSelect { ids: vec![492], mode: MultiMode::All };
        state.platforms = MultiSelect { ids: vec![1, 2], mode: MultiMode::Any };
        state
    }

    #[test]
    fn test_default_state_encodes_to_nothing() {
        assert!(encode(&FilterState::default()).is_empty());
        assert_eq!(encode(&FilterState::default()).to_query_string(), "");
    }

    #[test]
    fn test_empty_query_decodes_to_default() {
        assert_eq!(decode_str(""), FilterState::default());
    }

    #[test]
    fn test_full_state_round_trip() {
        let state = full_state();
        let query = encode(&state).to_query_string();
        assert_eq!(decode_str(&query), state);
    }

    #[test]
    fn test_single_field_round_trips() {
        for field in RangeField::ALL {
            let mut state = FilterState::default();
            *state.range_mut(*field) = Range::new(Some(-2.5), None);
            assert_eq!(decode(&encode(&state)), state, "{field:?}");
        }
        for field in TriStateField::ALL {
            for value in [true, false] {
                let mut state = FilterState::default();
                *state.tri_state_mut(*field) = Some(value);
                assert_eq!(decode(&encode(&state)), state, "{field:?}");
            }
        }
    }

    #[test]
    fn test_encode_uses_independent_min_max_keys() {
        let mut state = FilterState::default();
        state.ccu = Range::new(Some(1000.0), Some(5000.0));
        state.growth_7d = Range::new(Some(10.0), None);
        let params = encode(&state);
        assert_eq!(params.get("minCcu"), Some("1000"));
        assert_eq!(params.get("maxCcu"), Some("5000"));
        assert_eq!(params.get("minGrowth7d"), Some("10"));
        assert!(!params.contains_key("maxGrowth7d"));
        assert_eq!(params.to_query_string(), "minCcu=1000&maxCcu=5000&minGrowth7d=10");
    }

    #[test]
    fn test_multi_select_defaults_to_all() {
        let state = decode_str("genres=1,2");
        assert_eq!(state.genres.ids, vec![1, 2]);
        assert_eq!(state.genres.mode, MultiMode::All);

        let state = decode_str("tags=5&tagMode=any&platformMode=bogus");
        assert_eq!(state.tags.mode, MultiMode::Any);
        assert_eq!(state.platforms.mode, MultiMode::All);
    }

    #[test]
    fn test_mode_key_omitted_for_default() {
        let mut state = FilterState::default();
        state.genres.ids = vec![7];
        let params = encode(&state);
        assert_eq!(params.get("genres"), Some("7"));
        assert!(!params.contains_key("genreMode"));

        state.genres.mode = MultiMode::Any;
        assert_eq!(encode(&state).get("genreMode"), Some("any"));
    }

    #[test]
    fn test_malformed_values_degrade() {
        let state = decode_str(
            "type=software&sort=bogus&order=sideways&limit=abc&offset=-5\
             &minCcu=NaN&maxCcu=lots&isFree=yes&steamDeck=maybe&releaseYear=soon\
             &genres=1,x,,2,1&columns=nope",
        );
        assert_eq!(state.app_type, DEFAULT_TYPE);
        assert_eq!(state.sort, DEFAULT_SORT);
        assert_eq!(state.order, DEFAULT_ORDER);
        assert_eq!(state.limit, DEFAULT_LIMIT);
        assert_eq!(state.offset, DEFAULT_OFFSET);
        assert!(state.ccu.is_unbounded());
        assert_eq!(state.is_free, None);
        assert_eq!(state.steam_deck, None);
        assert_eq!(state.release_year, None);
        assert_eq!(state.genres.ids, vec![1, 2]);
        assert_eq!(state.visible_columns, DEFAULT_COLUMNS.to_vec());
    }

    #[test]
    fn test_decode_clamps() {
        let state = decode_str("limit=100000&minDiscount=250&minPrice=30&maxPrice=10");
        assert_eq!(state.limit, MAX_LIMIT);
        assert_eq!(state.min_discount, Some(MAX_DISCOUNT));
        assert_eq!(state.price, Range::new(Some(30.0), Some(30.0)));

        assert_eq!(decode_str("limit=0").limit, 1);
    }

    #[test]
    fn test_min_only_fields_ignore_max_key() {
        let state = decode_str("minActivePct=10&maxActivePct=50");
        assert_eq!(state.active_pct, Range::new(Some(10.0), None));
    }

    #[test]
    fn test_numbers_have_no_exponent() {
        let mut state = FilterState::default();
        state.owners.min = Some(100_000_000_000_000_000_000.0);
        state.price.max = Some(0.000001);
        let params = encode(&state);
        assert_eq!(params.get("minOwners"), Some("100000000000000000000"));
        assert_eq!(params.get("maxPrice"), Some("0.000001"));
        assert_eq!(decode(&params), state);
    }

    #[test]
    fn test_blank_text_is_absent() {
        let state = decode_str("search=&publisherSearch=%20%20");
        assert_eq!(state.search, None);
        assert_eq!(state.publisher_search, None);
    }

    #[test]
    fn test_columns_round_trip_and_dedupe() {
        let state = decode_str("columns=price,name,price");
        assert_eq!(state.visible_columns, vec![ColumnId::Price, ColumnId::Name]);
        assert_eq!(encode(&state).get("columns"), Some("price,name"));
    }
}

//! Field extraction from protocol detail lines (`1006`).
//!
//! Each detail payload is matched against a fixed, ordered list of patterns;
//! the first pattern whose extractor succeeds names the field. Lines no
//! pattern recognizes are not an error.

use bird_types::FieldValue;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Outcome of parsing one detail payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMatch {
    NoMatch,
    Field {
        name: &'static str,
        value: FieldValue,
    },
}

/// Counter columns of a route change statistics row, in daemon order.
pub const ROUTE_CHANGE_COLUMNS: [&str; 5] =
    ["received", "rejected", "filtered", "ignored", "accepted"];

type Extractor = fn(&Captures<'_>) -> Option<FieldValue>;

struct DetailPattern {
    field: &'static str,
    regex: Regex,
    extract: Extractor,
}

impl DetailPattern {
    fn new(field: &'static str, pattern: &str, extract: Extractor) -> Self {
        Self {
            field,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
            extract,
        }
    }
}

static DETAIL_PATTERNS: Lazy<Vec<DetailPattern>> = Lazy::new(|| {
    vec![
        DetailPattern::new("preference", r"^[ \t]*Preference:[ \t]+(?P<value>[0-9]+)$", count),
        DetailPattern::new("import_limit", r"^[ \t]*Import limit:[ \t]+(?P<value>[0-9]+)$", count),
        DetailPattern::new(
            "receive_limit",
            r"^[ \t]*Receive limit:[ \t]+(?P<value>[0-9]+)$",
            count,
        ),
        DetailPattern::new("export_limit", r"^[ \t]*Export limit:[ \t]+(?P<value>[0-9]+)$", count),
        DetailPattern::new("last_error", r"^[ \t]*Last error:[ \t]+(?P<value>.+)$", text),
        DetailPattern::new(
            "route_stats",
            r"^[ \t]*Routes:[ \t]+(?P<imported>[0-9]+) imported, (?:(?P<filtered>[0-9]+) filtered, )?(?P<exported>[0-9]+) exported, (?P<preferred>[0-9]+) preferred$",
            route_stats,
        ),
        DetailPattern::new(
            "route_change_stats",
            r"^[ \t]*(?P<kind>(?:Import|Export) (?:updates|withdraws)):[ \t]+(?:(?P<received>[0-9]+)|---)[ \t]+(?:(?P<rejected>[0-9]+)|---)[ \t]+(?:(?P<filtered>[0-9]+)|---)[ \t]+(?:(?P<ignored>[0-9]+)|---)[ \t]+(?:(?P<accepted>[0-9]+)|---)$",
            route_change_stats,
        ),
        DetailPattern::new("bgp_state", r"^[ \t]*BGP state:[ \t]+(?P<value>[^ \t]+)$", lowercase),
        DetailPattern::new(
            "bgp_source_address",
            r"^[ \t]*Source address:[ \t]+(?P<value>[^ \t]+)$",
            text,
        ),
        DetailPattern::new(
            "bgp_neighbor_address",
            r"^[ \t]*Neighbor address:[ \t]+(?P<value>[^ \t]+)$",
            text,
        ),
        DetailPattern::new(
            "bgp_neighbor_as",
            r"^[ \t]*Neighbor AS:[ \t]+(?P<value>[0-9]+)$",
            count,
        ),
        DetailPattern::new(
            "bgp_neighbor_id",
            r"^[ \t]*Neighbor ID:[ \t]+(?P<value>[^ \t]+)$",
            text,
        ),
        DetailPattern::new(
            "bgp_neighbor_caps",
            r"^[ \t]*Neighbor caps:[ \t]+(?P<value>.+)$",
            lowercase,
        ),
    ]
});

/// Parses one detail payload into a named field.
pub fn parse_detail(payload: &str) -> DetailMatch {
    for pattern in DETAIL_PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(payload) else {
            continue;
        };

        if let Some(value) = (pattern.extract)(&caps) {
            return DetailMatch::Field {
                name: pattern.field,
                value,
            };
        }
    }

    DetailMatch::NoMatch
}

fn parse_count(caps: &Captures<'_>, group: &str) -> Option<u64> {
    caps.name(group).and_then(|m| m.as_str().parse().ok())
}

fn count(caps: &Captures<'_>) -> Option<FieldValue> {
    parse_count(caps, "value").map(FieldValue::Count)
}

fn text(caps: &Captures<'_>) -> Option<FieldValue> {
    caps.name("value").map(|m| FieldValue::from(m.as_str()))
}

fn lowercase(caps: &Captures<'_>) -> Option<FieldValue> {
    caps.name("value")
        .map(|m| FieldValue::Text(m.as_str().to_lowercase()))
}

fn route_stats(caps: &Captures<'_>) -> Option<FieldValue> {
    let mut stats = vec![
        ("imported", FieldValue::Count(parse_count(caps, "imported")?)),
        ("exported", FieldValue::Count(parse_count(caps, "exported")?)),
        ("preferred", FieldValue::Count(parse_count(caps, "preferred")?)),
    ];

    // Older daemons print no filtered count at all.
    if let Some(filtered) = parse_count(caps, "filtered") {
        stats.push(("filtered", FieldValue::Count(filtered)));
    }

    Some(FieldValue::map(stats))
}

fn route_change_stats(caps: &Captures<'_>) -> Option<FieldValue> {
    let kind = caps.name("kind")?.as_str().to_lowercase().replace(' ', "_");

    // "---" placeholders count as zero.
    let counters = ROUTE_CHANGE_COLUMNS
        .iter()
        .map(|&column| {
            let value = match caps.name(column) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            Some((column, FieldValue::Count(value)))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(FieldValue::map([(kind, FieldValue::map(counters))]))
}

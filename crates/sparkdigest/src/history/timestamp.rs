use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Timelike, Utc};
use serde_json::Value;
use std::fmt;

/// Canonical timestamp carried by every summary record.
pub type Timestamp = DateTime<FixedOffset>;

const GMT_SUFFIX: &str = "GMT";
const GMT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// RFC 3339 text for a canonical timestamp, `Z` for a zero offset.
///
/// Matches what `serde` writes for the same value.
pub fn to_canonical_string(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A timestamp as it arrives from the history server, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch.
    EpochMillis(f64),
    Text(String),
    /// Already typed upstream.
    Canonical(Timestamp),
    /// Any other JSON shape (bool, array, object).
    Other(Value),
}

impl TimestampInput {
    /// Classifies a raw JSON value. `null` is absent.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => match n.as_f64() {
                Some(ms) => Some(Self::EpochMillis(ms)),
                None => Some(Self::Other(Value::Number(n))),
            },
            Value::String(s) => Some(Self::Text(s)),
            other => Some(Self::Other(other)),
        }
    }
}

impl fmt::Display for TimestampInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EpochMillis(ms) => write!(f, "{ms}"),
            Self::Text(s) => f.write_str(s),
            Self::Canonical(ts) => f.write_str(&to_canonical_string(ts)),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedTimestamp {
    Canonical(Timestamp),
    /// No rule applied; the input is handed back untouched.
    Passthrough(TimestampInput),
}

impl NormalizedTimestamp {
    pub fn canonical(&self) -> Option<&Timestamp> {
        match self {
            Self::Canonical(ts) => Some(ts),
            Self::Passthrough(_) => None,
        }
    }

    pub fn into_canonical(self) -> Option<Timestamp> {
        match self {
            Self::Canonical(ts) => Some(ts),
            Self::Passthrough(_) => None,
        }
    }
}

impl fmt::Display for NormalizedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(ts) => f.write_str(&to_canonical_string(ts)),
            Self::Passthrough(input) => input.fmt(f),
        }
    }
}

/// Converts epoch millis and `...GMT` strings to a canonical timestamp.
///
/// Never fails: anything that cannot be converted comes back as
/// [`NormalizedTimestamp::Passthrough`].
pub fn normalize(value: Option<TimestampInput>) -> Option<NormalizedTimestamp> {
    let normalized = match value? {
        TimestampInput::EpochMillis(ms) => match from_epoch_millis(ms) {
            Some(ts) => NormalizedTimestamp::Canonical(ts),
            None => NormalizedTimestamp::Passthrough(TimestampInput::EpochMillis(ms)),
        },
        TimestampInput::Text(text) => match parse_gmt(&text) {
            Some(ts) => NormalizedTimestamp::Canonical(ts),
            None => NormalizedTimestamp::Passthrough(TimestampInput::Text(text)),
        },
        TimestampInput::Canonical(ts) => NormalizedTimestamp::Canonical(ts),
        other @ TimestampInput::Other(_) => NormalizedTimestamp::Passthrough(other),
    };

    Some(normalized)
}

fn from_epoch_millis(ms: f64) -> Option<Timestamp> {
    if !ms.is_finite() {
        return None;
    }

    // whole seconds plus a microsecond fraction rounded half to even;
    // out-of-range values saturate and are rejected by the checked math
    let secs = ms / 1000.0;
    let whole = secs.trunc();
    let fraction_micros = ((secs - whole) * 1_000_000.0).round_ties_even() as i64;
    let micros = (whole as i64)
        .checked_mul(1_000_000)?
        .checked_add(fraction_micros)?;
    let utc = DateTime::<Utc>::from_timestamp_micros(micros)?;

    Some(utc.with_timezone(&Local).fixed_offset())
}

fn parse_gmt(text: &str) -> Option<Timestamp> {
    let stem = text.strip_suffix(GMT_SUFFIX)?;

    // fractional seconds are mandatory, 1 to 6 digits
    let (_, fraction) = stem.rsplit_once('.')?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let ts = DateTime::parse_from_str(&format!("{stem}+0000"), GMT_FORMAT).ok()?;

    // no leap seconds
    if ts.nanosecond() >= 1_000_000_000 {
        return None;
    }

    Some(ts)
}

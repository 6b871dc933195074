//! Wire DTOs for the route, route-info, and data-stream resources.
//!
//! DESIGN
//! ======
//! The backend emits integer ids and a few alternate field names; these types
//! accept both so decoding stays schema-driven. Every record is an immutable
//! snapshot, replaced wholesale on each successful update.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::SourceError;

/// Stable key of a location within one route snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub String);

/// Opaque identifier used to address a command (the market item type).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(pub String);

/// Backend-supplied identity of a log line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LogLineId(pub String);

macro_rules! string_or_int_id {
    ($ty:ident) => {
        impl $ty {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_id_text(deserializer).map(Self)
            }
        }
    };
}

string_or_int_id!(LocationId);
string_or_int_id!(TargetId);
string_or_int_id!(LogLineId);

/// Graph node kind of a route hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    System,
    Station,
}

impl LocationKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Station => "station",
        }
    }
}

/// Trade direction of one action row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Buy,
    Sell,
}

impl ActionKind {
    /// Short glyph rendered in the type column.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Buy => "▼",
            Self::Sell => "▲",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// One buy/sell opportunity at a route hop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "action_type", alias = "type")]
    pub kind: ActionKind,
    pub item: String,
    pub quantity: f64,
    /// Unit price; absent when the backend has no quote.
    #[serde(default)]
    pub price: Option<f64>,
    /// Identifier passed to `POST /open_market_window/{target}`.
    #[serde(rename = "type_id", alias = "target")]
    pub target: TargetId,
}

/// One hop of the computed route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Backend graph id of the system or station, when provided.
    #[serde(default)]
    pub location_id: Option<LocationId>,
    #[serde(rename = "location_type", alias = "type")]
    pub kind: LocationKind,
    #[serde(rename = "location", alias = "label")]
    pub label: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Aggregate figures of the current route. All fields are required.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Net profit per second.
    pub profit_rate: f64,
    /// Loss probability in `[0, 1]`.
    pub risk: f64,
    pub capital: f64,
    /// Seconds.
    pub transport_time: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
}

/// One activity log line.
///
/// Plain strings are keyed by position; objects carrying a backend id keep
/// that id as their identity so truncation upstream re-renders correctly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogLine {
    Keyed { id: LogLineId, text: String },
    Plain(String),
}

impl LogLine {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Keyed { text, .. } => text,
            Self::Plain(text) => text,
        }
    }

    /// Render key for the line at `position`.
    #[must_use]
    pub fn render_key(&self, position: usize) -> String {
        match self {
            Self::Keyed { id, .. } => format!("id:{id}"),
            Self::Plain(_) => format!("pos:{position}"),
        }
    }
}

impl From<&str> for LogLine {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

/// Payload of one `data_stream` event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEnvelope {
    pub log: Vec<LogLine>,
    #[serde(default, deserialize_with = "deserialize_empty_as_none")]
    pub route: Option<Vec<Location>>,
    #[serde(default, deserialize_with = "deserialize_empty_as_none")]
    pub route_info: Option<RouteInfo>,
}

/// Decode the polled `/route` resource.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] if the body is not an array of locations.
pub fn decode_route(value: serde_json::Value) -> Result<Vec<Location>, SourceError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

/// Decode the polled `/route_info` resource.
///
/// `{}` and `null` mean no route has been computed yet.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] if a non-empty record is missing fields.
pub fn decode_route_info(value: serde_json::Value) -> Result<Option<RouteInfo>, SourceError> {
    if is_empty_value(&value) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Decode one text event of the data stream.
///
/// # Errors
///
/// Returns [`SourceError::Decode`] if the text is not a JSON envelope with a `log` field.
pub fn decode_stream_envelope(text: &str) -> Result<StreamEnvelope, SourceError> {
    Ok(serde_json::from_str(text)?)
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn deserialize_empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if is_empty_value(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some).map_err(D::Error::custom)
}

fn deserialize_id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int.to_string());
            }
            if let Some(int) = number.as_u64() {
                return Ok(int.to_string());
            }
            Err(D::Error::custom("expected integer id"))
        }
        _ => Err(D::Error::custom("expected string or integer id")),
    }
}

//! The telemetry report sent by a quadrant board, one JSON object per line.
//!
//! A report looks like this on the wire:
//!
//! ```text
//! {"ts":1523412,"l0":{"dist":212,"en":true},"l1":{"dist":8190,"en":false},
//!  "l2":{...},"l3":{...},"elevation":{"val":0.41,"en":true},
//!  "pitch":{"val":-0.12,"en":true},"roll":{...},"arc":{...},
//!  "events":["hit0","swl"]}
//! ```
//!
//! Older firmware names the LIDAR channels `lidar0..lidar3` with `distance`
//! and `engaged` fields; both spellings decode into the same [Report].
//!
//! Nothing here is validated beyond JSON syntax. Every field is optional,
//! consumers ask for what they need and get a [ReportError::MissingField]
//! when it is not there. A field of the wrong type reads as absent rather
//! than failing the whole line, and `en` flags follow JSON truthiness, so
//! `"en":1` is engaged.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{borrow::Cow, fmt, str::FromStr};

/// Number of LIDAR channels on a board.
pub const N_LIDAR: usize = 4;

/// Field names of the LIDAR channels, in channel order.
pub const LIDAR_FIELDS: [&str; N_LIDAR] = ["l0", "l1", "l2", "l3"];

/// One LIDAR channel of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Lidar {
    /// Measured distance, in sensor units.
    #[serde(alias = "distance", default, deserialize_with = "lenient")]
    pub dist: Option<f64>,
    /// Whether the reading is currently valid.
    #[serde(alias = "engaged", default, deserialize_with = "truthy")]
    pub en: bool,
}

/// One of the scalar parameter channels: elevation, pitch, roll or arc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ParamChannel {
    /// Elevation is in `[0, 1]`, the others in `[-1, 1]`.
    #[serde(default, deserialize_with = "lenient")]
    pub val: Option<f64>,
    /// Whether the reading is currently valid.
    #[serde(default, deserialize_with = "truthy")]
    pub en: bool,
}

/// The four scalar parameters a board reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Height of the hand above the board, unipolar.
    Elevation,
    /// Front/back tilt, bipolar.
    Pitch,
    /// Left/right tilt, bipolar.
    Roll,
    /// Arc position, bipolar.
    Arc,
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Parameter; 4] = [
        Parameter::Elevation,
        Parameter::Pitch,
        Parameter::Roll,
        Parameter::Arc,
    ];

    /// The JSON field name.
    pub fn field(&self) -> &'static str {
        match self {
            Parameter::Elevation => "elevation",
            Parameter::Pitch => "pitch",
            Parameter::Roll => "roll",
            Parameter::Arc => "arc",
        }
    }

    /// Capitalised name for labels.
    pub fn title(&self) -> &'static str {
        match self {
            Parameter::Elevation => "Elevation",
            Parameter::Pitch => "Pitch",
            Parameter::Roll => "Roll",
            Parameter::Arc => "Arc",
        }
    }
}

/// A single decoded telemetry line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Report {
    /// Board timestamp in microseconds.
    #[serde(default, deserialize_with = "timestamp")]
    pub ts: Option<i64>,
    #[allow(missing_docs)]
    #[serde(alias = "lidar0", default, deserialize_with = "lenient")]
    pub l0: Option<Lidar>,
    #[allow(missing_docs)]
    #[serde(alias = "lidar1", default, deserialize_with = "lenient")]
    pub l1: Option<Lidar>,
    #[allow(missing_docs)]
    #[serde(alias = "lidar2", default, deserialize_with = "lenient")]
    pub l2: Option<Lidar>,
    #[allow(missing_docs)]
    #[serde(alias = "lidar3", default, deserialize_with = "lenient")]
    pub l3: Option<Lidar>,
    #[allow(missing_docs)]
    #[serde(default, deserialize_with = "lenient")]
    pub elevation: Option<ParamChannel>,
    #[allow(missing_docs)]
    #[serde(default, deserialize_with = "lenient")]
    pub pitch: Option<ParamChannel>,
    #[allow(missing_docs)]
    #[serde(default, deserialize_with = "lenient")]
    pub roll: Option<ParamChannel>,
    #[allow(missing_docs)]
    #[serde(default, deserialize_with = "lenient")]
    pub arc: Option<ParamChannel>,
    /// Short event tags, see [BoardEvent]. Anything that is not a string is
    /// left out.
    #[serde(default, deserialize_with = "event_tags")]
    pub events: Vec<String>,
}

/// Any value that does not decode as `T` reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Integer timestamps as they are; fractional ones are truncated.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    })
}

fn event_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(tags) => tags
            .into_iter()
            .filter_map(|tag| match tag {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

impl Report {
    /// The LIDAR channel with index `i`, if present.
    pub fn lidar(&self, i: usize) -> Option<&Lidar> {
        match i {
            0 => self.l0.as_ref(),
            1 => self.l1.as_ref(),
            2 => self.l2.as_ref(),
            3 => self.l3.as_ref(),
            _ => None,
        }
    }

    /// The parameter channel `p`, if present.
    pub fn parameter(&self, p: Parameter) -> Option<&ParamChannel> {
        match p {
            Parameter::Elevation => self.elevation.as_ref(),
            Parameter::Pitch => self.pitch.as_ref(),
            Parameter::Roll => self.roll.as_ref(),
            Parameter::Arc => self.arc.as_ref(),
        }
    }

    /// The LIDAR channel `i`, or the name of the missing field.
    pub fn require_lidar(&self, i: usize) -> Result<&Lidar, ReportError> {
        let field = LIDAR_FIELDS.get(i).copied().unwrap_or("l?");
        self.lidar(i).ok_or(ReportError::MissingField(field))
    }

    /// The distance of LIDAR channel `i`.
    pub fn require_dist(&self, i: usize) -> Result<f64, ReportError> {
        self.require_lidar(i)?
            .dist
            .ok_or(ReportError::MissingField("dist"))
    }

    /// The value of parameter `p`, whether or not it is engaged.
    pub fn require_val(&self, p: Parameter) -> Result<f64, ReportError> {
        self.parameter(p)
            .ok_or(ReportError::MissingField(p.field()))?
            .val
            .ok_or(ReportError::MissingField("val"))
    }

    /// The recognised events of this report, in order. Unknown tags are
    /// dropped.
    pub fn board_events(&self) -> impl Iterator<Item = BoardEvent> + '_ {
        self.events.iter().filter_map(|tag| BoardEvent::from_tag(tag))
    }
}

/// Discrete events a board detects on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// `hit0` to `hit3`, a tap over a LIDAR channel.
    Hit(usize),
    /// `swl`
    SwipeLeft,
    /// `swr`
    SwipeRight,
}

impl BoardEvent {
    /// Map a wire tag onto an event.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "hit0" => Some(BoardEvent::Hit(0)),
            "hit1" => Some(BoardEvent::Hit(1)),
            "hit2" => Some(BoardEvent::Hit(2)),
            "hit3" => Some(BoardEvent::Hit(3)),
            "swl" => Some(BoardEvent::SwipeLeft),
            "swr" => Some(BoardEvent::SwipeRight),
            _ => None,
        }
    }
}

/// Everything that can go wrong between a raw line and a usable value.
#[derive(Debug)]
pub enum ReportError {
    /// The line was not valid utf-8, usually garbage left in the hardware
    /// buffer when we first connect.
    Utf8(std::str::Utf8Error),

    /// The line was not valid JSON.
    Json(serde_json::Error),

    /// The line was JSON, but not an object.
    NotAnObject,

    /// A field that the consumer needs was absent.
    MissingField(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ReportError::Utf8(error) => Cow::from(format!("utf-8 error: {}", error)),
            ReportError::Json(error) => Cow::from(format!("failed to parse: {}", error)),
            ReportError::NotAnObject => Cow::from("report is not a JSON object"),
            ReportError::MissingField(field) => Cow::from(format!("keyerror: {}", field)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for ReportError {}

impl From<serde_json::Error> for ReportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::str::Utf8Error> for ReportError {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::Utf8(value)
    }
}

impl FromStr for Report {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        if !value.is_object() {
            return Err(ReportError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Decode one raw line. Blank lines give `Ok(None)`.
pub fn decode_line(line: &[u8]) -> Result<Option<Report>, ReportError> {
    let s = std::str::from_utf8(line)?.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse().map(Some)
}

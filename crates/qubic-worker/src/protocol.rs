//! Host <-> worker message protocol
//!
//! One JSON object per line in each direction. The message kind is carried in
//! `"type"`; all other field names are camelCase.

use qubic_core::{BestMove, Position, PositionError, SearchError, Side};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors turned into `error` events
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid position: {0}")]
    Position(#[from] PositionError),

    #[error("invalid search parameters: {0}")]
    Search(#[from] SearchError),
}

/// Host -> worker requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    StartSearch(StartSearch),
    Stop,
    ClearCache,
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::StartSearch(_) => "start-search",
            Request::Stop => "stop",
            Request::ClearCache => "clear-cache",
        }
    }
}

/// Parameters of a `start-search` request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSearch {
    #[serde(deserialize_with = "deserialize_mask")]
    pub p1_mask: u64,
    #[serde(deserialize_with = "deserialize_mask")]
    pub p2_mask: u64,
    pub ai_is_player1: bool,
    /// Falls back to the configured default when absent or zero
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    #[serde(default)]
    pub clear_cache: bool,
    #[serde(default)]
    pub max_depth: Option<u8>,
}

impl StartSearch {
    pub fn position(&self) -> Result<Position, PositionError> {
        Position::new(self.p1_mask, self.p2_mask)
    }

    pub fn side(&self) -> Side {
        Side::from_is_p1(self.ai_is_player1)
    }

    /// Time budget in milliseconds; a missing or zero value means `default_ms`
    pub fn time_limit_ms_or(&self, default_ms: u64) -> u64 {
        self.time_limit_ms.filter(|&ms| ms > 0).unwrap_or(default_ms)
    }
}

/// Masks arrive either as JSON integers or as decimal strings
#[derive(Deserialize)]
#[serde(untagged)]
enum MaskRepr {
    Number(u64),
    Text(String),
}

fn deserialize_mask<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match MaskRepr::deserialize(deserializer)? {
        MaskRepr::Number(n) => Ok(n),
        MaskRepr::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| de::Error::custom(format!("invalid mask {s:?}: {e}"))),
    }
}

/// Parse one input line
pub fn parse_request(line: &str) -> Result<Request, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}

/// Worker -> host events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    Progress {
        depth: u8,
        score: i32,
    },
    Result {
        #[serde(rename = "move")]
        best: Option<MoveReport>,
    },
    Error {
        message: String,
    },
}

impl Event {
    pub fn result(best: Option<BestMove>) -> Self {
        Event::Result {
            best: best.map(MoveReport::from),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Event::Error {
            message: message.into(),
        }
    }
}

/// Chosen move as reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub score: i32,
    pub depth: u8,
}

impl From<BestMove> for MoveReport {
    fn from(best: BestMove) -> Self {
        let (x, y, z) = best.cell.coords();
        Self {
            x,
            y,
            z,
            score: best.score.raw(),
            depth: best.depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qubic_core::{Cell, Value};

    #[test]
    fn test_parse_start_search_numbers() {
        let req = parse_request(
            r#"{"type":"start-search","p1Mask":1,"p2Mask":2,"aiIsPlayer1":false,"timeLimitMs":500}"#,
        )
        .unwrap();
        let Request::StartSearch(params) = req else {
            panic!("expected start-search, got {req:?}");
        };
        assert_eq!(params.p1_mask, 1);
        assert_eq!(params.p2_mask, 2);
        assert_eq!(params.side(), Side::P2);
        assert_eq!(params.time_limit_ms, Some(500));
        assert_eq!(params.time_limit_ms_or(3000), 500);
        assert!(!params.clear_cache);
        assert_eq!(params.max_depth, None);
    }

    #[test]
    fn test_zero_or_missing_time_limit_uses_default() {
        for line in [
            r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true,"timeLimitMs":0}"#,
            r#"{"type":"start-search","p1Mask":0,"p2Mask":0,"aiIsPlayer1":true}"#,
        ] {
            let Request::StartSearch(params) = parse_request(line).unwrap() else {
                panic!("expected start-search for {line}");
            };
            assert_eq!(params.time_limit_ms_or(3000), 3000, "{line}");
        }
    }

    #[test]
    fn test_parse_start_search_string_masks() {
        // 2^63 + 1 does not fit in an f64 exactly, hosts send it as a string
        let req = parse_request(
            r#"{"type":"start-search","p1Mask":"9223372036854775809","p2Mask":"0","aiIsPlayer1":true,"clearCache":true,"maxDepth":4}"#,
        )
        .unwrap();
        let Request::StartSearch(params) = req else {
            panic!("expected start-search");
        };
        assert_eq!(params.p1_mask, (1 << 63) + 1);
        assert_eq!(params.p2_mask, 0);
        assert!(params.clear_cache);
        assert_eq!(params.max_depth, Some(4));
        assert_eq!(params.side(), Side::P1);
    }

    #[test]
    fn test_parse_rejects_bad_masks() {
        for mask in [r#""18446744073709551616""#, r#""abc""#, "-1", "1.5"] {
            let line = format!(r#"{{"type":"start-search","p1Mask":{mask},"p2Mask":0,"aiIsPlayer1":true}}"#);
            assert!(parse_request(&line).is_err(), "mask {mask} should be rejected");
        }
    }

    #[test]
    fn test_parse_simple_requests() {
        assert_eq!(parse_request(r#"{"type":"stop"}"#).unwrap(), Request::Stop);
        assert_eq!(parse_request(r#"{"type":"clear-cache"}"#).unwrap(), Request::ClearCache);
        assert!(parse_request(r#"{"type":"go"}"#).is_err());
        assert!(parse_request("not json").is_err());
    }

    #[test]
    fn test_overlap_is_reported() {
        let req = parse_request(r#"{"type":"start-search","p1Mask":3,"p2Mask":2,"aiIsPlayer1":true}"#).unwrap();
        let Request::StartSearch(params) = req else {
            panic!("expected start-search");
        };
        assert_eq!(params.position(), Err(PositionError::Overlap(2)));
    }

    #[test]
    fn test_event_serialization() {
        let progress = serde_json::to_string(&Event::Progress { depth: 3, score: -12 }).unwrap();
        assert_eq!(progress, r#"{"type":"progress","depth":3,"score":-12}"#);

        let none = serde_json::to_string(&Event::result(None)).unwrap();
        assert_eq!(none, r#"{"type":"result","move":null}"#);

        let best = BestMove {
            cell: Cell::from_coords(1, 2, 3).unwrap(),
            score: Value::new(7),
            depth: 2,
        };
        let some = serde_json::to_string(&Event::result(Some(best))).unwrap();
        assert_eq!(some, r#"{"type":"result","move":{"x":1,"y":2,"z":3,"score":7,"depth":2}}"#);

        let error = serde_json::to_string(&Event::error("boom")).unwrap();
        assert_eq!(error, r#"{"type":"error","message":"boom"}"#);
    }
}

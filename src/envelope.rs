//! Response envelope and status classification.
//!
//! Every route goes through [`classify`]; it is the only place that decides
//! success versus failure. The decision looks at the status code alone, and
//! the payload is decoded best-effort: anything unreadable becomes `None`.

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Failure payload sent by the service alongside a non-2xx status.
///
/// Objects decode into [`ErrorBody::Fields`]; any other JSON (a bare string,
/// a number, a list) is kept as sent in [`ErrorBody::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Fields(ErrorFields),
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFields {
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other fields the service included.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ErrorBody {
    /// The `Message` field, or the whole body when the service sent a bare
    /// string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Fields(fields) => fields.message.as_deref(),
            Self::Other(value) => value.as_str(),
        }
    }

    /// A field other than `Message`; `None` for non-object bodies.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Fields(fields) => fields.details.get(key),
            Self::Other(_) => None,
        }
    }
}

/// Outcome of one request. The variant carries exactly one payload slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    /// 2xx status; `data` is absent when the body was empty or undecodable.
    Ok { status: u16, data: Option<T> },
    /// Any other status; `error` is absent when the body was empty or undecodable.
    Err { status: u16, error: Option<ErrorBody> },
}

impl<T> Response<T> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok { status, .. } | Self::Err { status, .. } => *status,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok { data, .. } => data.as_ref(),
            Self::Err { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ErrorBody> {
        match self {
            Self::Ok { .. } => None,
            Self::Err { error, .. } => error.as_ref(),
        }
    }

    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Ok { data, .. } => data,
            Self::Err { .. } => None,
        }
    }
}

/// Serializes as `{"isOk": .., "status": .., "data" | "error": ..}`.
impl<T: Serialize> Serialize for Response<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Response", 3)?;
        state.serialize_field("isOk", &self.is_ok())?;
        state.serialize_field("status", &self.status())?;
        match self {
            Self::Ok { data, .. } => state.serialize_field("data", data)?,
            Self::Err { error, .. } => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

/// A status is ok iff its decimal form starts with `2`.
#[must_use]
pub fn is_ok_status(status: u16) -> bool {
    status.to_string().starts_with('2')
}

/// Build the envelope for a status and an optional raw body.
///
/// Never fails: a missing, empty, or malformed body leaves the payload absent.
#[must_use]
pub fn classify<T: DeserializeOwned>(status: u16, body: Option<&[u8]>) -> Response<T> {
    if is_ok_status(status) {
        Response::Ok { status, data: body.and_then(decode) }
    } else {
        Response::Err { status, error: body.and_then(decode) }
    }
}

fn decode<P: DeserializeOwned>(bytes: &[u8]) -> Option<P> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;

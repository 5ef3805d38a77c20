use serde::{Deserialize, Serialize};

use crate::Pager;

/// Outcome reported in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Status::Success => "success",
                Status::Error => "error",
            }
        )
    }
}

/// Standard body for every API response.
///
/// Successful responses carry `data`; errors carry `message`. Collections
/// add `count` and, when paginated, `prev_url`/`next_url`. Fields that are
/// `None` are left out of the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseWrapper<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(rename = "prev_url", skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(rename = "next_url", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> ResponseWrapper<T> {
    /// A single resource.
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
            count: None,
            prev: None,
            next: None,
        }
    }

    /// A page of results. `count` is reported as given; it is not checked
    /// against `data`.
    pub fn collection(data: T, count: u64, pager: &Pager) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
            count: Some(count),
            prev: pager.previous_url().map(str::to_string),
            next: Some(pager.next_url().to_string()),
        }
    }

    /// A failed request.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: Some(message.into()),
            count: None,
            prev: None,
            next: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

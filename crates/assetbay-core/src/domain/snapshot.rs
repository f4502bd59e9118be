//! Download-status snapshot types.
//!
//! A snapshot is an immutable point-in-time read of the server's entitlement
//! verdict for the signed-in user. It is replaced wholesale on every refresh
//! and never patched field-by-field.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A warning banner is shown when the numeric remaining count drops to this
/// value or below. Never applies to the unlimited sentinel.
pub const LOW_REMAINING_WARNING_THRESHOLD: u32 = 3;

/// Remaining downloads for the current day.
///
/// The wire format is either the string sentinel `"unlimited"` or a JSON
/// integer, hence the hand-written serde impls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingDownloads {
    Unlimited,
    Count(u32),
}

impl RemainingDownloads {
    /// Exact user-facing phrasing. The singular/plural split on 1 is part of
    /// the display contract and covered by tests.
    #[must_use]
    pub fn phrase(self) -> String {
        match self {
            Self::Unlimited => "unlimited downloads".to_string(),
            Self::Count(1) => "1 download remaining today".to_string(),
            Self::Count(n) => format!("{n} downloads remaining today"),
        }
    }

    /// Whether the low-remaining warning applies.
    #[must_use]
    pub const fn is_low(self) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Count(n) => n <= LOW_REMAINING_WARNING_THRESHOLD,
        }
    }

    /// The numeric count, if this is not the unlimited sentinel.
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::Count(n) => Some(n),
        }
    }
}

impl fmt::Display for RemainingDownloads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for RemainingDownloads {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_str("unlimited"),
            Self::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for RemainingDownloads {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RemainingVisitor;

        impl Visitor<'_> for RemainingVisitor {
            type Value = RemainingDownloads;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer count or the string \"unlimited\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v)
                    .map(RemainingDownloads::Count)
                    .map_err(|_| E::custom(format!("remaining count {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                // Servers have been seen returning -1 for unlimited
                if v < 0 {
                    return Ok(RemainingDownloads::Unlimited);
                }
                self.visit_u64(v.unsigned_abs())
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v.eq_ignore_ascii_case("unlimited") {
                    Ok(RemainingDownloads::Unlimited)
                } else {
                    v.parse::<u32>().map(RemainingDownloads::Count).map_err(|_| {
                        E::custom(format!("unrecognized remaining-downloads value '{v}'"))
                    })
                }
            }
        }

        deserializer.deserialize_any(RemainingVisitor)
    }
}

/// The active subscription summary embedded in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSubscription {
    pub plan_name: String,
    pub end_date: DateTime<Utc>,
}

/// The server's entitlement verdict for one user at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadStatusSnapshot {
    /// Whether the server will currently honor a download request.
    pub can_download: bool,
    /// Admin override. When set, the gate must treat the user as unlimited
    /// regardless of the other fields.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub has_subscription: bool,
    pub remaining_downloads: RemainingDownloads,
    pub subscription: Option<ActiveSubscription>,
    /// When the daily quota resets, if the server reported it.
    pub resets_at: Option<DateTime<Utc>>,
    /// Human-readable reason from the server, shown verbatim.
    pub message: Option<String>,
}

impl DownloadStatusSnapshot {
    /// A permissive snapshot for tests and default construction.
    #[must_use]
    pub const fn permitted(remaining: RemainingDownloads) -> Self {
        Self {
            can_download: true,
            is_admin: false,
            has_subscription: true,
            remaining_downloads: remaining,
            subscription: None,
            resets_at: None,
            message: None,
        }
    }
}

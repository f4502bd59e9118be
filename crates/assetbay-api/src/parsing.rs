//! JSON normalization boundary for marketplace API responses.
//!
//! One explicit function per external entity converts the wire shape into
//! the canonical domain type. Every historical shape variant the backend
//! has produced is absorbed here, exactly once: `_id` vs `id`, camelCase vs
//! snake_case field names, `data`-wrapped envelopes (including the doubled
//! `data.data.plans`), the `"unlimited"` sentinel, and missing
//! optional-with-default fields. Nothing above this module looks at raw
//! wire JSON.

use chrono::{DateTime, Utc};
use serde_json::Value;

use assetbay_core::{
    ActiveSubscription, AssetSummary, BillingCycle, ChangePlanReceipt, CheckoutSession,
    DownloadReceipt, DownloadStatusSnapshot, RemainingDownloads, SubscriptionDetail,
    SubscriptionPackage, SubscriptionView, UserProfile,
};

use crate::error::{ApiError, ApiResult};

// ============================================================================
// Field helpers
// ============================================================================

/// First present value among aliased field names.
fn field<'a>(json: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        let value = json.get(key)?;
        if value.is_null() { None } else { Some(value) }
    })
}

/// String field, tolerating numeric ids.
fn string_field(json: &Value, keys: &[&str]) -> Option<String> {
    match field(json, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn bool_field(json: &Value, keys: &[&str]) -> Option<bool> {
    field(json, keys)?.as_bool()
}

fn f64_field(json: &Value, keys: &[&str]) -> Option<f64> {
    field(json, keys)?.as_f64()
}

fn i64_field(json: &Value, keys: &[&str]) -> Option<i64> {
    field(json, keys)?.as_i64()
}

/// RFC 3339 timestamp; unparseable values are dropped rather than fatal.
fn timestamp_field(json: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    let raw = string_field(json, keys)?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn missing(entity: &str, field_name: &str) -> ApiError {
    ApiError::InvalidResponse {
        message: format!("{entity} is missing required field '{field_name}'"),
    }
}

/// Unwrap single or doubled `data` envelopes.
fn unwrap_data(json: &Value) -> &Value {
    let mut current = json;
    for _ in 0..2 {
        match current.get("data") {
            Some(inner) if inner.is_object() || inner.is_array() => current = inner,
            _ => break,
        }
    }
    current
}

// ============================================================================
// Entity parsers
// ============================================================================

/// Parse a download-status snapshot.
pub fn parse_download_status(json: &Value) -> ApiResult<DownloadStatusSnapshot> {
    let json = unwrap_data(json);

    let can_download = bool_field(json, &["canDownload", "can_download"])
        .ok_or_else(|| missing("download status", "canDownload"))?;
    let is_admin = bool_field(json, &["isAdmin", "is_admin"]).unwrap_or(false);
    let has_subscription =
        bool_field(json, &["hasSubscription", "has_subscription"]).unwrap_or(false);

    let remaining_downloads =
        parse_remaining(field(json, &["remainingDownloads", "remaining_downloads"]))?;

    let subscription = field(json, &["subscription"])
        .and_then(|sub| {
            let plan_name = string_field(sub, &["planName", "plan_name", "plan"])?;
            let end_date = timestamp_field(sub, &["endDate", "end_date"])?;
            Some(ActiveSubscription {
                plan_name,
                end_date,
            })
        });

    Ok(DownloadStatusSnapshot {
        can_download,
        is_admin,
        has_subscription,
        remaining_downloads,
        subscription,
        resets_at: timestamp_field(json, &["resetsAt", "resets_at"]),
        message: string_field(json, &["message"]),
    })
}

/// Parse the remaining-downloads field: integer, `"unlimited"`, a numeric
/// string, or absent (treated as exhausted).
fn parse_remaining(value: Option<&Value>) -> ApiResult<RemainingDownloads> {
    let Some(value) = value else {
        return Ok(RemainingDownloads::Count(0));
    };
    serde_json::from_value(value.clone()).map_err(|e| ApiError::InvalidResponse {
        message: format!("bad remainingDownloads value: {e}"),
    })
}

/// Parse one subscription package.
pub fn parse_package(json: &Value) -> ApiResult<SubscriptionPackage> {
    let id =
        string_field(json, &["id", "_id"]).ok_or_else(|| missing("package", "id"))?;
    let name = string_field(json, &["name"]).ok_or_else(|| missing("package", "name"))?;

    let billing_cycle = match string_field(json, &["billingCycle", "billing_cycle"]) {
        Some(raw) => parse_billing_cycle(&raw)?,
        None => BillingCycle::Monthly,
    };

    // Negative discounts saturate to zero; values above 100 are passed
    // through (the pricing layer documents that open question)
    let yearly_discount = i64_field(json, &["yearlyDiscount", "yearly_discount"])
        .map_or(0, |v| u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX));

    let features = field(json, &["features"])
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|f| f.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let daily_download_limit = i64_field(json, &["dailyDownloadLimit", "daily_download_limit"])
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);

    Ok(SubscriptionPackage {
        id,
        name,
        description: string_field(json, &["description"]),
        base_price: f64_field(json, &["basePrice", "base_price", "price"]).unwrap_or(0.0),
        billing_cycle,
        yearly_discount,
        daily_download_limit,
        features,
        is_active: bool_field(json, &["isActive", "is_active", "active"]).unwrap_or(true),
    })
}

fn parse_billing_cycle(raw: &str) -> ApiResult<BillingCycle> {
    match raw.to_ascii_uppercase().as_str() {
        "WEEKLY" => Ok(BillingCycle::Weekly),
        "MONTHLY" => Ok(BillingCycle::Monthly),
        "YEARLY" | "ANNUAL" => Ok(BillingCycle::Yearly),
        other => Err(ApiError::InvalidResponse {
            message: format!("unknown billing cycle '{other}'"),
        }),
    }
}

/// Parse the package list out of any of its historical envelopes:
/// `data.data.plans`, `data.plans`, `plans`, `packages`, or a bare array.
pub fn parse_package_list(json: &Value) -> ApiResult<Vec<SubscriptionPackage>> {
    let unwrapped = unwrap_data(json);
    let array = if let Some(arr) = unwrapped.as_array() {
        arr
    } else {
        field(unwrapped, &["plans", "packages"])
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::InvalidResponse {
                message: "package list response contains no plans array".to_string(),
            })?
    };
    array.iter().map(parse_package).collect()
}

/// Parse the current-subscription view.
pub fn parse_subscription_view(json: &Value) -> ApiResult<SubscriptionView> {
    let json = unwrap_data(json);

    let has_subscription =
        bool_field(json, &["hasSubscription", "has_subscription"]).unwrap_or(false);

    let subscription = match field(json, &["subscription"]) {
        Some(sub) => {
            let plan = field(sub, &["plan", "package"])
                .ok_or_else(|| missing("subscription", "plan"))
                .and_then(parse_package)?;
            Some(SubscriptionDetail {
                plan,
                end_date: timestamp_field(sub, &["endDate", "end_date"]),
            })
        }
        None => None,
    };

    Ok(SubscriptionView {
        has_subscription,
        subscription,
    })
}

/// Parse a download receipt.
pub fn parse_download_receipt(json: &Value) -> ApiResult<DownloadReceipt> {
    let json = unwrap_data(json);

    let download_url = string_field(json, &["downloadUrl", "download_url", "url"])
        .ok_or_else(|| missing("download receipt", "downloadUrl"))?;

    // The asset name arrives nested or flat depending on backend version
    let asset_name = field(json, &["asset"])
        .and_then(|asset| string_field(asset, &["name", "title"]))
        .or_else(|| string_field(json, &["assetName", "asset_name"]))
        .ok_or_else(|| missing("download receipt", "asset.name"))?;

    let remaining_downloads =
        match field(json, &["remainingDownloads", "remaining_downloads"]) {
            Some(value) => Some(parse_remaining(Some(value))?),
            None => None,
        };

    Ok(DownloadReceipt {
        download_url,
        asset_name,
        remaining_downloads,
        message: string_field(json, &["message"]),
    })
}

/// Parse a checkout session.
pub fn parse_checkout_session(json: &Value) -> ApiResult<CheckoutSession> {
    let json = unwrap_data(json);
    let url = string_field(json, &["url", "checkoutUrl", "checkout_url"])
        .ok_or_else(|| missing("checkout session", "url"))?;
    Ok(CheckoutSession { url })
}

/// Parse a plan-change acknowledgment.
pub fn parse_change_receipt(json: &Value) -> ApiResult<ChangePlanReceipt> {
    let json = unwrap_data(json);
    let message = string_field(json, &["message"])
        .unwrap_or_else(|| "Subscription updated".to_string());
    Ok(ChangePlanReceipt { message })
}

/// Parse an asset summary.
pub fn parse_asset_summary(json: &Value) -> ApiResult<AssetSummary> {
    let json = unwrap_data(json);
    let id = string_field(json, &["id", "_id"]).ok_or_else(|| missing("asset", "id"))?;
    let name =
        string_field(json, &["name", "title"]).ok_or_else(|| missing("asset", "name"))?;

    // Category is either a plain string or a populated category object
    let category = match field(json, &["category"]) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(obj) if obj.is_object() => string_field(obj, &["name", "title"]),
        _ => None,
    };

    Ok(AssetSummary {
        id,
        name,
        category,
        price: f64_field(json, &["price"]),
    })
}

/// Parse a user profile.
pub fn parse_profile(json: &Value) -> ApiResult<UserProfile> {
    let json = unwrap_data(json);
    // Some backend versions wrap the profile in a `user` object
    let json = field(json, &["user"]).unwrap_or(json);

    let id = string_field(json, &["id", "_id"]).ok_or_else(|| missing("profile", "id"))?;
    let email = string_field(json, &["email"]).ok_or_else(|| missing("profile", "email"))?;

    let is_admin = bool_field(json, &["isAdmin", "is_admin"]).unwrap_or_else(|| {
        string_field(json, &["role"]).is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    });

    Ok(UserProfile {
        id,
        email,
        name: string_field(json, &["name", "username"]),
        is_admin,
    })
}

//! LootLabs client operations built on the [`LinkLocker`](crate::ports::LinkLocker) port.
//!
//! Link creation returns the raw response for [`super::normalize`] to
//! interpret. Encryption and anti-bypass composition are exposed for callers
//! that want an obfuscated link; the publishing pipeline does not use them.

use serde_json::Value;

use crate::config::{LinkSettings, LockerConfig};
use crate::context::ServiceContext;
use crate::error::{EncryptError, HttpError};
use crate::ports::{EncryptMethod, LinkRequest};

/// Hosts serving LootLabs short links.
const LOCKER_DOMAINS: [&str; 2] = ["loot-link.com", "lootdest.org"];

impl LinkRequest {
    /// Builds a request for `destination_url` with the configured link parameters.
    #[must_use]
    pub fn new(settings: &LinkSettings, destination_url: impl Into<String>) -> Self {
        Self {
            title: settings.title.clone(),
            url: destination_url.into(),
            tier_id: settings.tier_id,
            number_of_tasks: settings.number_of_tasks,
            theme: settings.theme,
        }
    }
}

/// Requests a gated link and returns the undecoded response.
///
/// # Errors
///
/// Propagates transport failures, non-success statuses and non-JSON bodies.
pub async fn create_link(
    ctx: &ServiceContext,
    locker: &LockerConfig,
    request: &LinkRequest,
) -> Result<Value, HttpError> {
    let raw = ctx.locker.create_content_locker(locker, request).await?;
    tracing::debug!(response = %raw, "content locker response");
    Ok(raw)
}

/// Encrypts `destination_url` for use in the `&data=` parameter.
///
/// # Errors
///
/// Returns [`EncryptError::Request`] when the call fails and
/// [`EncryptError::Rejected`] when the response `type` is not the success
/// discriminator for `method` or carries no token.
pub async fn encrypt_url(
    ctx: &ServiceContext,
    locker: &LockerConfig,
    destination_url: &str,
    method: EncryptMethod,
) -> Result<String, EncryptError> {
    let raw = ctx.locker.encrypt_url(locker, destination_url, method).await?;
    let kind = raw.get("type").and_then(Value::as_str);
    let message = raw.get("message");

    if kind != Some(method.success_type()) {
        let reason = match message {
            Some(Value::String(m)) => m.clone(),
            Some(Value::Null) | None => "unknown error".to_string(),
            Some(other) => other.to_string(),
        };
        return Err(EncryptError::Rejected(reason));
    }

    match message {
        Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
        _ => Err(EncryptError::Rejected("response carried no encrypted payload".into())),
    }
}

/// Appends an encrypted destination to a LootLabs short link.
///
/// `https://loot-link.com/s?XiBpFlWo` becomes
/// `https://loot-link.com/s?XiBpFlWo&data=<encrypted>`.
///
/// # Errors
///
/// Returns [`EncryptError::InvalidLockerUrl`] if `base_loot_url` is not a
/// `loot-link.com` or `lootdest.org` short link.
pub fn anti_bypass_url(base_loot_url: &str, encrypted: &str) -> Result<String, EncryptError> {
    let domain = LOCKER_DOMAINS
        .iter()
        .find(|domain| base_loot_url.contains(&format!("{domain}/s?")))
        .ok_or_else(|| EncryptError::InvalidLockerUrl(base_loot_url.to_string()))?;
    let short_code = base_loot_url.rsplit('?').next().unwrap_or_default();
    if short_code.is_empty() {
        return Err(EncryptError::InvalidLockerUrl(base_loot_url.to_string()));
    }
    Ok(format!("https://{domain}/s?{short_code}&data={encrypted}"))
}

/// Encrypts `new_destination_url` (bearer transport) and composes it onto
/// `base_loot_url`.
///
/// # Errors
///
/// Returns an error if encryption fails or the base link is not a LootLabs
/// short link.
pub async fn compose_anti_bypass(
    ctx: &ServiceContext,
    locker: &LockerConfig,
    base_loot_url: &str,
    new_destination_url: &str,
) -> Result<String, EncryptError> {
    let encrypted = encrypt_url(ctx, locker, new_destination_url, EncryptMethod::Bearer).await?;
    anti_bypass_url(base_loot_url, &encrypted)
}

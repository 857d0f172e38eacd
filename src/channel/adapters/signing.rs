//! Request signing for the transactional email API.
//!
//! The remote service verifies a keyed-hash signature over a canonical form of
//! each request. Every byte of the canonical request and string to sign is
//! part of the external protocol: header names are lower-cased and emitted in
//! a fixed order, timestamps use the compact ISO 8601 basic format, and all
//! digests are lower-case hex SHA-256.

use crate::provider::domain::EmailCredentials;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Signature algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
/// Content type of every signed request.
pub const CONTENT_TYPE: &str = "application/json";
/// Header carrying the request timestamp.
pub const DATE_HEADER: &str = "x-amz-date";
/// Signed header names, in canonical order.
pub const SIGNED_HEADERS: &str = "content-type;host;x-amz-date";

const KEY_PREFIX: &str = "AWS4";
const SCOPE_TERMINATOR: &str = "aws4_request";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_FORMAT: &str = "%Y%m%d";

/// Where a signed request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningTarget {
    method: String,
    host: String,
    path: String,
    region: String,
    service: String,
}

impl SigningTarget {
    /// Creates a signing target for a `POST` request.
    #[must_use]
    pub fn post(
        host: impl Into<String>,
        path: impl Into<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            method: "POST".to_owned(),
            host: host.into(),
            path: path.into(),
            region: region.into(),
            service: service.into(),
        }
    }

    /// Returns the signed host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the signed resource path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Headers and intermediate values produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    timestamp: String,
    credential_scope: String,
    canonical_request: String,
    string_to_sign: String,
    signature: String,
    authorization: String,
}

impl RequestSignature {
    /// Returns the value of the timestamp header.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the `date/region/service/aws4_request` scope.
    #[must_use]
    pub fn credential_scope(&self) -> &str {
        &self.credential_scope
    }

    /// Returns the canonical request that was hashed.
    #[must_use]
    pub fn canonical_request(&self) -> &str {
        &self.canonical_request
    }

    /// Returns the string that was signed.
    #[must_use]
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Returns the hex-encoded signature.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns the value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}

/// Signing failed because a key could not be used for HMAC.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signing key rejected: {0}")]
pub struct SigningError(String);

/// Signs a request body for `target` at instant `at`.
///
/// Deterministic: identical inputs always produce an identical signature.
///
/// # Errors
///
/// Returns [`SigningError`] if the HMAC implementation rejects a key.
pub fn sign_request(
    target: &SigningTarget,
    credentials: &EmailCredentials,
    body: &[u8],
    at: DateTime<Utc>,
) -> Result<RequestSignature, SigningError> {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let date_stamp = at.format(DATE_FORMAT).to_string();

    let canonical_headers = format!(
        "content-type:{CONTENT_TYPE}\nhost:{host}\n{DATE_HEADER}:{timestamp}\n",
        host = target.host,
    );
    let canonical_request = [
        target.method.as_str(),
        target.path.as_str(),
        "",
        canonical_headers.as_str(),
        SIGNED_HEADERS,
        sha256_hex(body).as_str(),
    ]
    .join("\n");

    let credential_scope = format!(
        "{date_stamp}/{region}/{service}/{SCOPE_TERMINATOR}",
        region = target.region,
        service = target.service,
    );
    let string_to_sign = [
        ALGORITHM,
        timestamp.as_str(),
        credential_scope.as_str(),
        sha256_hex(canonical_request.as_bytes()).as_str(),
    ]
    .join("\n");

    let signing_key = derive_signing_key(credentials.secret_key(), &date_stamp, target)?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);
    let authorization = format!(
        "{ALGORITHM} Credential={access_key}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        access_key = credentials.access_key(),
    );

    Ok(RequestSignature {
        timestamp,
        credential_scope,
        canonical_request,
        string_to_sign,
        signature,
        authorization,
    })
}

fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    target: &SigningTarget,
) -> Result<Vec<u8>, SigningError> {
    let seed = format!("{KEY_PREFIX}{secret_key}");
    let date_key = hmac_sha256(seed.as_bytes(), date_stamp.as_bytes())?;
    let region_key = hmac_sha256(&date_key, target.region.as_bytes())?;
    let service_key = hmac_sha256(&region_key, target.service.as_bytes())?;
    hmac_sha256(&service_key, SCOPE_TERMINATOR.as_bytes())
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>, SigningError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|err| SigningError(err.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

use http::HeaderMap;
use http::header::AUTHORIZATION;
use secrecy::SecretString;
use thiserror::Error;

/// Failure to obtain a bearer token from a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent
    #[error("missing authorization header")]
    Missing,

    /// Header present but not a usable `Bearer <token>` value
    #[error("invalid authorization header")]
    Invalid,
}

/// Extract the bearer token from the `Authorization` header
///
/// The scheme is matched case-insensitively. An empty token is rejected.
///
/// # Errors
///
/// Returns [`AuthError::Missing`] when the header is absent and
/// [`AuthError::Invalid`] when it is not valid UTF-8, uses another scheme,
/// or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<SecretString, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::Missing)?;
    let value = value.to_str().map_err(|_| AuthError::Invalid)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::Invalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Invalid);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Invalid);
    }

    Ok(SecretString::from(token.to_owned()))
}

use serde_json::Value;
use validator::Validate;

use crate::api::{ApiError, ApiRequest, ApiTransport};
use crate::domain::credential::Credential;
use crate::domain::profile::UserProfile;
use crate::forms::login::LoginForm;
use crate::services::{ServiceError, ServiceResult};
use crate::session::SessionStore;

pub const LOGIN_FIELDS_REQUIRED: &str = "Telefon raqam va parol kiritilishi shart";
pub const LOGIN_TOKENS_MISSING: &str = "Tokenlar olinmadi, qaytadan urinib ko‘ring";
pub const LOGIN_WRONG_CREDENTIALS: &str = "Noto'g'ri telefon raqam yoki parol";
pub const LOGIN_SERVER_UNREACHABLE: &str =
    "Server bilan bog'lanib bo'lmadi. Internetni tekshiring.";
pub const LOGIN_FAILED: &str = "Tizimga kirishda xatolik yuz berdi";

/// Maps a failed login call to the notification shown to the user.
///
/// A backend `message` wins over the generic texts; any failure after the
/// request went out without such a message reads as a connectivity problem.
pub fn login_error_message(err: &ApiError) -> String {
    match (err, err.backend_message()) {
        (ApiError::Unauthorized, _) => LOGIN_WRONG_CREDENTIALS.to_string(),
        (_, Some(message)) => message.to_string(),
        (
            ApiError::Network(_)
            | ApiError::ServerError { .. }
            | ApiError::NotFound { .. }
            | ApiError::Rejected { .. },
            None,
        ) => LOGIN_SERVER_UNREACHABLE.to_string(),
        _ => LOGIN_FAILED.to_string(),
    }
}

/// Pulls the token pair out of `{data: {tokens: {access, refresh}}}`.
fn extract_credential(body: &Value) -> Option<Credential> {
    let access = body.pointer("/data/tokens/access").and_then(Value::as_str)?;
    let refresh = body.pointer("/data/tokens/refresh").and_then(Value::as_str)?;
    if access.is_empty() || refresh.is_empty() {
        return None;
    }
    Some(Credential::new(access, refresh))
}

/// Signs in with phone and password and stores the returned credential.
pub async fn login<R, S>(api: &R, session: &S, form: &LoginForm) -> ServiceResult<Credential>
where
    R: ApiTransport + ?Sized,
    S: SessionStore + ?Sized,
{
    let form = form.normalized();
    if let Err(err) = form.validate() {
        log::warn!("Rejected login form: {err}");
        return Err(ServiceError::Login(LOGIN_FIELDS_REQUIRED.to_string()));
    }

    let request = ApiRequest::post("/accounts/login/", &form.to_payload())?;
    let body = api.request(request).await.map_err(|err| {
        log::error!("Login request failed: {err}");
        ServiceError::Login(login_error_message(&err))
    })?;

    let credential = extract_credential(&body).ok_or_else(|| {
        log::error!("Login response did not contain a token pair");
        ServiceError::Login(LOGIN_TOKENS_MISSING.to_string())
    })?;

    session.set_credential(credential.clone()).map_err(|err| {
        log::error!("Failed to store credential: {err}");
        err
    })?;
    log::info!("Signed in as {}", form.phone);

    Ok(credential)
}

/// Forgets the stored credential.
pub fn logout<S>(session: &S) -> ServiceResult<()>
where
    S: SessionStore + ?Sized,
{
    session.clear()?;
    log::info!("Signed out");
    Ok(())
}

/// Loads the signed-in user's profile.
pub async fn load_profile<R>(api: &R) -> ServiceResult<UserProfile>
where
    R: ApiTransport + ?Sized,
{
    let body = api
        .request(ApiRequest::get("/accounts/me/").require_auth())
        .await
        .map_err(|err| {
            log::error!("Failed to fetch user: {err}");
            err
        })?;

    serde_json::from_value(body)
        .map_err(|err| ServiceError::Api(ApiError::Malformed(err.to_string())))
}

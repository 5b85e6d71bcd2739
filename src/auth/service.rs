//! Authentication calls
//!
//! Credentials are checked locally before anything is sent. A successful
//! login installs the returned [`Session`] on the shared [`ApiClient`].

use crate::api::paths;
use crate::api::{
    ApiClient, ApiResult, AuthPayload, AuthUser, ForgotPasswordRequest, LoginRequest,
    RegisterRequest, ResetPasswordRequest,
};
use crate::forms::{rules, ValidationErrors};

use super::Session;

/// Minimum password length accepted by register and reset
pub const MIN_PASSWORD_LEN: usize = 8;

/// Login, registration and password recovery
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let mut errors = ValidationErrors::new();
        rules::email(&mut errors, "email", email);
        rules::required(&mut errors, "password", "Password", password);
        errors.into_result()?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let payload: AuthPayload = self.client.post(paths::AUTH_LOGIN, &request).await?;

        let session = Session::new(payload.token, payload.user);
        self.client.set_session(Some(session.clone())).await;
        tracing::info!(user = %session.user.email, "Logged in");
        Ok(session)
    }

    /// Create an account
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> ApiResult<AuthUser> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "name", "Name", name);
        rules::email(&mut errors, "email", email);
        check_new_password(&mut errors, password, confirm_password);
        errors.into_result()?;

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        let user: AuthUser = self.client.post(paths::AUTH_REGISTER, &request).await?;
        tracing::info!(user = %user.email, "Registered");
        Ok(user)
    }

    /// Ask for a reset link. Returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let mut errors = ValidationErrors::new();
        rules::email(&mut errors, "email", email);
        errors.into_result()?;

        let request = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        self.client
            .post_for_message(paths::AUTH_FORGOT_PASSWORD, &request)
            .await
    }

    /// Set a new password using the emailed token
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirm_password: &str,
    ) -> ApiResult<String> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "token", "Reset token", token);
        check_new_password(&mut errors, password, confirm_password);
        errors.into_result()?;

        let request = ResetPasswordRequest {
            token: token.trim().to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        self.client
            .post_for_message(paths::AUTH_RESET_PASSWORD, &request)
            .await
    }

    /// End the session. The local session is dropped even if the API
    /// call fails.
    pub async fn logout(&self) {
        if self.client.session().await.is_some() {
            if let Err(e) = self
                .client
                .post_for_message(paths::AUTH_LOGOUT, &serde_json::json!({}))
                .await
            {
                tracing::warn!(error = %e, "Logout request failed");
            }
        }
        self.client.set_session(None).await;
    }

    /// The user behind the current session
    pub async fn me(&self) -> ApiResult<AuthUser> {
        self.client.get(paths::AUTH_ME, &[]).await
    }
}

fn check_new_password(errors: &mut ValidationErrors, password: &str, confirm: &str) {
    if rules::required(errors, "password", "Password", password)
        && password.chars().count() < MIN_PASSWORD_LEN
    {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if password != confirm {
        errors.add("confirmPassword", "Passwords do not match");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::test_support::{MockApi, MOCK_EMAIL, MOCK_PASSWORD};

    #[tokio::test]
    async fn test_login_installs_session() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        let session = auth.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
        assert!(!session.token.is_empty());
        assert_eq!(session.user.email, MOCK_EMAIL);

        let client_session = auth.client().session().await.unwrap();
        assert_eq!(client_session.token, session.token);

        let me = auth.me().await.unwrap();
        assert_eq!(me.email, MOCK_EMAIL);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        let err = auth.login(MOCK_EMAIL, "wrong-password").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert!(auth.client().session().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_credentials_never_sent() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        let err = auth.login("not-an-email", "").await.unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.has("email"));
                assert!(errors.has("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(mock.last_request().is_none());
    }

    #[tokio::test]
    async fn test_register_password_rules() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        let err = auth
            .register("Grace", "grace@example.com", "short", "different")
            .await
            .unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.has("password"));
                assert!(errors.has("confirmPassword"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let user = auth
            .register("Grace", "grace@example.com", "long-enough", "long-enough")
            .await
            .unwrap();
        assert_eq!(user.name, "Grace");
    }

    #[tokio::test]
    async fn test_password_recovery_messages() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        let message = auth.forgot_password(MOCK_EMAIL).await.unwrap();
        assert!(!message.is_empty());

        let message = auth
            .reset_password("reset-token", "new-password", "new-password")
            .await
            .unwrap();
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mock = MockApi::start().await;
        let auth = AuthService::new(mock.client());

        auth.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
        auth.logout().await;

        assert!(auth.client().session().await.is_none());
        let err = auth.me().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}

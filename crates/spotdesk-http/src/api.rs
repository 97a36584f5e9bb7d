//! Typed dashboard endpoints.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use spotdesk_core::api::{
    Ack, ApiResponse, CommissionQuery, CommissionRow, DashboardOverview, DashboardUser,
    OtpVerification, ProfileUpdate, RefreshResponseData, UserListQuery, UserProfile,
};
use spotdesk_core::{
    ClientConfig, Credentials, Navigator, RefreshToken, Result, Session, SessionProvider,
    SessionStore,
};

use crate::client::AuthenticatedHttpClient;
use crate::coordinator::RefreshCoordinator;
use crate::endpoints::*;
use crate::provider::{self, HttpSessionProvider};
use crate::request::{ApiRequest, FormField};
use crate::sign_out::ForcedSignOut;
use crate::transport::ApiTransport;

/// The dashboard backend, wired with session handling.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: AuthenticatedHttpClient,
    provider: HttpSessionProvider,
}

impl DashboardApi {
    /// Build the client, provider, coordinator and forced sign-out for `config`.
    ///
    /// The session is not loaded; call [`restore`](Self::restore) or
    /// [`sign_in`](Self::sign_in) first.
    pub fn connect(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let transport = ApiTransport::new(&config)?;
        let provider = HttpSessionProvider::new(transport.clone(), config, store);

        let shared: Arc<dyn SessionProvider> = Arc::new(provider.clone());
        let coordinator = Arc::new(RefreshCoordinator::new(Arc::clone(&shared)));
        let sign_out = Arc::new(ForcedSignOut::new(shared, navigator));

        Ok(Self {
            client: AuthenticatedHttpClient::new(transport, coordinator, sign_out),
            provider,
        })
    }

    pub fn client(&self) -> &AuthenticatedHttpClient {
        &self.client
    }

    pub fn provider(&self) -> &HttpSessionProvider {
        &self.provider
    }

    /// Load the persisted session.
    pub async fn restore(&self) -> Result<Option<Session>> {
        self.provider.restore().await
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Sign in and replace the current session.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        self.provider.sign_in(credentials).await
    }

    /// Tell the backend, then drop the local session regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        match self
            .client
            .send::<Ack>(&ApiRequest::post(LOGOUT))
            .await
        {
            Ok(_) => debug!("Backend acknowledged logout"),
            Err(e) => warn!(error = %e, "Backend logout failed; clearing local session anyway"),
        }

        info!("Logged out");
        self.provider.sign_out().await
    }

    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<Ack> {
        let request = ApiRequest::post(FORGOT_PASSWORD).with_json(&ForgotPasswordRequest { email })?;
        self.public(&request).await
    }

    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<ApiResponse<OtpVerification>> {
        let request = ApiRequest::post(VERIFY_OTP).with_json(&VerifyOtpRequest { email, otp })?;
        self.public(&request).await
    }

    #[instrument(skip(self, otp, password, confirm_password))]
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Ack> {
        let request = ApiRequest::post(RESET_PASSWORD).with_json(&ResetPasswordRequest {
            email,
            otp,
            password,
            confirm_password,
        })?;
        self.public(&request).await
    }

    /// Raw refresh-token exchange. Does not touch the stored session.
    pub async fn refresh_token(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<ApiResponse<RefreshResponseData>> {
        provider::refresh(self.client.transport(), refresh_token).await
    }

    #[instrument(skip_all)]
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<Ack> {
        let request = ApiRequest::post(CHANGE_PASSWORD).with_json(&ChangePasswordRequest {
            old_password,
            new_password,
        })?;
        self.client.send(&request).await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub async fn dashboard_overview(&self) -> Result<ApiResponse<DashboardOverview>> {
        self.client.send(&ApiRequest::get(DASHBOARD_OVERVIEW)).await
    }

    pub async fn users(&self, query: &UserListQuery) -> Result<ApiResponse<Vec<DashboardUser>>> {
        let request = ApiRequest::get(USERS).with_query(query.to_params());
        self.client.send(&request).await
    }

    pub async fn commission_report(
        &self,
        query: &CommissionQuery,
    ) -> Result<ApiResponse<Vec<CommissionRow>>> {
        let request = ApiRequest::get(COMMISSION_REPORT).with_query(query.to_params());
        self.client.send(&request).await
    }

    // ========================================================================
    // Profile
    // ========================================================================

    pub async fn profile(&self) -> Result<ApiResponse<UserProfile>> {
        self.client.send(&ApiRequest::get(PROFILE)).await
    }

    #[instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiResponse<UserProfile>> {
        let request = ApiRequest::put(PROFILE).with_form(profile_form(update));
        self.client.send(&request).await
    }

    async fn public<R: serde::de::DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        self.client.transport().send(request, None).await
    }
}

fn profile_form(update: &ProfileUpdate) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text {
            name: "fullName",
            value: update.full_name.clone(),
        },
        FormField::Text {
            name: "phone",
            value: update.phone.clone(),
        },
        FormField::Text {
            name: "bio",
            value: update.bio.clone(),
        },
    ];
    if let Some(avatar) = &update.avatar {
        fields.push(FormField::File {
            name: "avatar",
            file_name: avatar.file_name.clone(),
            content_type: avatar.content_type.clone(),
            bytes: avatar.bytes.clone(),
        });
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotdesk_core::api::AvatarUpload;

    #[test]
    fn profile_form_adds_avatar_only_when_present() {
        let mut update = ProfileUpdate {
            full_name: "Ada".to_string(),
            phone: "555".to_string(),
            bio: String::new(),
            avatar: None,
        };
        assert_eq!(profile_form(&update).len(), 3);

        update.avatar = Some(AvatarUpload {
            file_name: "me.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        });
        let fields = profile_form(&update);
        assert_eq!(fields.len(), 4);
        assert!(matches!(
            &fields[3],
            FormField::File { name: "avatar", file_name, .. } if file_name == "me.png"
        ));
    }
}

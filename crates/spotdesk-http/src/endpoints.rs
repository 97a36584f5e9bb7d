//! Endpoint paths and request bodies.

use serde::Serialize;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";
pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
pub const LOGOUT: &str = "/auth/logout";
pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
pub const VERIFY_OTP: &str = "/auth/verify";
pub const RESET_PASSWORD: &str = "/auth/reset-password";
pub const CHANGE_PASSWORD: &str = "/auth/change-password";
pub const DASHBOARD_OVERVIEW: &str = "/admin/dashboard-overview";
pub const USERS: &str = "/admin/users";
pub const COMMISSION_REPORT: &str = "/admin/commission-report";
pub const PROFILE: &str = "/user/profile";

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

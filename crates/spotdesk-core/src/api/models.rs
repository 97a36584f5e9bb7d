//! Resource payloads returned by the backend.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// `data` of a successful `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "_id")]
    pub id: String,
}

/// `data` of a successful `POST /auth/refresh-token`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

/// `data` of a successful `POST /auth/verify`.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerification {
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A row of `GET /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bookings: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_events: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_fisherman: u64,
    pub total_spot_owner: u64,
    pub total_running_events: u64,
    pub total_earnings: f64,
    pub commission_rate: f64,
}

/// One month of the sales chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPoint {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub join_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// `data` of `GET /admin/dashboard-overview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub metrics: DashboardMetrics,
    #[serde(default)]
    pub sales_report: Vec<SalesPoint>,
    #[serde(default)]
    pub recent_users: Vec<RecentUser>,
}

/// A row of `GET /admin/commission-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRow {
    pub owner_id: String,
    pub owner_name: String,
    pub owner_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_avatar: Option<String>,
    pub total_events: u64,
    pub total_earnings: f64,
    pub platform_commission: f64,
}

/// `data` of `GET /user/profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

/// Fields sent to `PUT /user/profile` as multipart form data.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub bio: String,
    pub avatar: Option<AvatarUpload>,
}

/// An avatar image attached to a profile update.
#[derive(Clone, Default)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for AvatarUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

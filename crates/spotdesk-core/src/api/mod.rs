//! Backend API payloads.
//!
//! This module defines the wire types for dashboard endpoints. The calls
//! themselves live in the HTTP crate.

mod envelope;
mod models;
mod query;

pub use envelope::{Ack, ApiResponse, ErrorBody, PaginationMeta};
pub use models::{
    Avatar, AvatarUpload, CommissionRow, DashboardMetrics, DashboardOverview, DashboardUser,
    LoginResponseData, OtpVerification, ProfileUpdate, RecentUser, RefreshResponseData,
    SalesPoint, UserProfile,
};
pub use query::{CommissionQuery, DEFAULT_PAGE_SIZE, UserListQuery};

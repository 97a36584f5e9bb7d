//! CLI argument definitions.

use clap::{Parser, Subcommand};

use spotdesk_core::types::DEFAULT_BASE_URL;

use crate::commands::{
    change_password, commissions, forgot_password, login, logout, overview, profile,
    reset_password, users, verify_otp, whoami,
};

/// Admin dashboard client for spotdesk.
#[derive(Parser, Debug)]
#[command(name = "spotdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend API base URL
    #[arg(long, global = true, env = "SPOTDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with an admin or vendor account
    Login(login::LoginArgs),

    /// Sign out and forget the saved session
    Logout(logout::LogoutArgs),

    /// Display the signed-in account
    Whoami(whoami::WhoamiArgs),

    /// Show dashboard metrics, sales and recent users
    Overview(overview::OverviewArgs),

    /// List users
    Users(users::UsersArgs),

    /// Show the commission report per spot owner
    Commissions(commissions::CommissionsArgs),

    /// Show or update your profile
    Profile(profile::ProfileCommand),

    /// Change your password
    ChangePassword(change_password::ChangePasswordArgs),

    /// Request a password reset code by email
    ForgotPassword(forgot_password::ForgotPasswordArgs),

    /// Check a password reset code
    VerifyOtp(verify_otp::VerifyOtpArgs),

    /// Set a new password with a reset code
    ResetPassword(reset_password::ResetPasswordArgs),
}

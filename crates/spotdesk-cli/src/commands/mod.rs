//! Subcommand implementations.

pub mod change_password;
pub mod commissions;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod overview;
pub mod profile;
pub mod reset_password;
pub mod users;
pub mod verify_otp;
pub mod whoami;

use anyhow::Result;

use crate::cli::Commands;

pub async fn handle(cmd: Commands, base_url: &str) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args, base_url).await,
        Commands::Logout(args) => logout::run(args, base_url).await,
        Commands::Whoami(args) => whoami::run(args, base_url).await,
        Commands::Overview(args) => overview::run(args, base_url).await,
        Commands::Users(args) => users::run(args, base_url).await,
        Commands::Commissions(args) => commissions::run(args, base_url).await,
        Commands::Profile(cmd) => profile::handle(cmd, base_url).await,
        Commands::ChangePassword(args) => change_password::run(args, base_url).await,
        Commands::ForgotPassword(args) => forgot_password::run(args, base_url).await,
        Commands::VerifyOtp(args) => verify_otp::run(args, base_url).await,
        Commands::ResetPassword(args) => reset_password::run(args, base_url).await,
    }
}

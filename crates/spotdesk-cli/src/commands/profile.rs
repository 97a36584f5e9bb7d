//! Profile subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use spotdesk_core::api::{AvatarUpload, ProfileUpdate, UserProfile};

use crate::output;
use crate::session;

const PROFILE_ROUTE: &str = "/settings";

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Display your profile
    Show(ShowArgs),

    /// Change profile fields; anything not given keeps its current value
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub bio: Option<String>,

    /// Image file to upload as the new avatar
    #[arg(long)]
    pub avatar: Option<PathBuf>,
}

pub async fn handle(cmd: ProfileCommand, base_url: &str) -> Result<()> {
    match cmd.command {
        ProfileSubcommand::Show(args) => show(args, base_url).await,
        ProfileSubcommand::Update(args) => update(args, base_url).await,
    }
}

async fn show(args: ShowArgs, base_url: &str) -> Result<()> {
    let api = session::connect_to(base_url, PROFILE_ROUTE).await?;
    let profile = api.profile().await.map_err(output::api_error)?.data;

    if args.json {
        return output::json_pretty(&profile);
    }

    print_profile(&profile);
    Ok(())
}

async fn update(args: UpdateArgs, base_url: &str) -> Result<()> {
    let api = session::connect_to(base_url, PROFILE_ROUTE).await?;
    let current = api.profile().await.map_err(output::api_error)?.data;

    let avatar = args.avatar.as_deref().map(read_avatar).transpose()?;
    let update = ProfileUpdate {
        full_name: args.full_name.unwrap_or(current.full_name),
        phone: args.phone.or(current.phone).unwrap_or_default(),
        bio: args.bio.or(current.bio).unwrap_or_default(),
        avatar,
    };

    let profile = api
        .update_profile(&update)
        .await
        .map_err(output::api_error)?
        .data;

    output::success("Profile updated");
    println!();
    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    output::field("Name", &profile.full_name);
    output::field("Email", &profile.email);
    output::field("Role", profile.role.label());
    output::field("Phone", output::or_dash(profile.phone.as_deref()));
    output::field("Bio", output::or_dash(profile.bio.as_deref()));
    if let Some(url) = profile.avatar.as_ref().and_then(|a| a.url.as_deref()) {
        output::field("Avatar", url);
    }
}

fn read_avatar(path: &Path) -> Result<AvatarUpload> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read avatar {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".to_string());

    Ok(AvatarUpload {
        content_type: image_mime(path).map(str::to_string),
        file_name,
        bytes,
    })
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn mime_from_extension() {
        assert_eq!(image_mime(Path::new("me.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("me.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("me")), None);
        assert_eq!(image_mime(Path::new("notes.txt")), None);
    }

    #[test]
    fn avatar_is_read_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("face.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let avatar = read_avatar(&path).unwrap();
        assert_eq!(avatar.file_name, "face.webp");
        assert_eq!(avatar.content_type.as_deref(), Some("image/webp"));
        assert_eq!(avatar.bytes, vec![1, 2, 3]);

        assert!(read_avatar(&dir.path().join("missing.png")).is_err());
    }
}

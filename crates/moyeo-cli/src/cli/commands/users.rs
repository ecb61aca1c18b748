//! Profile and order-history commands.

use anyhow::Result;

use moyeo_client::session::IdentityPatch;
use moyeo_types::user::UpdateProfileRequest;

use crate::cli::App;

pub async fn show(app: &App) -> Result<()> {
    app.token()?;
    let profile = app.api.profile().await?;
    let user = &profile.user;

    println!("{} <{}>", user.nickname, user.email);
    println!("  name:     {}", user.name);
    println!("  phone:    {}", user.phone);
    if let Some(campus) = &user.campus {
        println!("  campus:   {campus}");
    }
    if let Some(department) = &user.department {
        println!("  dept:     {department}");
    }
    println!("  points:   {}", user.points);
    println!("  meetings: {} completed", profile.completed_meetings);
    for badge in &profile.badges {
        println!("  {:<8} ×{}", badge.badge.as_str(), badge.count);
    }
    Ok(())
}

pub async fn update(
    app: &mut App,
    current_password: String,
    nickname: Option<String>,
    profile_image: Option<String>,
) -> Result<()> {
    app.token()?;
    app.api
        .update_profile(&UpdateProfileRequest {
            current_password,
            nickname: nickname.clone(),
            profile_image,
        })
        .await?;
    // keep the persisted identity snapshot in sync
    app.session.update_identity(IdentityPatch {
        nickname,
        ..IdentityPatch::default()
    })?;
    println!("profile updated");
    Ok(())
}

pub async fn delete(app: &mut App, password: &str) -> Result<()> {
    app.token()?;
    app.api.delete_account(password).await?;
    app.session.logout()?;
    println!("account deleted");
    Ok(())
}

pub async fn orders(app: &App, page: u32, limit: u32) -> Result<()> {
    app.token()?;
    let orders = app.api.order_history(page, limit).await?;
    if orders.is_empty() {
        println!("no orders");
        return Ok(());
    }
    for order in orders {
        let title = order.meeting_title.as_deref().unwrap_or(&order.store_name);
        println!(
            "#{:<4} [{}] {}  {}원 (+{}원 delivery)  {}",
            order.id,
            order.status.as_str(),
            title,
            order.total_amount,
            order.delivery_fee,
            order.created_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

pub async fn public(app: &App, user_id: i64) -> Result<()> {
    let user = app.api.public_profile(user_id).await?;
    println!("{}", user.nickname);
    if let Some(department) = &user.department {
        println!("  dept:     {department}");
    }
    println!("  meetings: {} completed", user.completed_meetings);
    for badge in &user.badges {
        println!("  {:<8} ×{}", badge.badge.as_str(), badge.count);
    }
    Ok(())
}

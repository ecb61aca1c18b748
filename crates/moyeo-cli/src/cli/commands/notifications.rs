//! Notification commands.

use anyhow::Result;

use crate::cli::App;

pub async fn list(app: &App) -> Result<()> {
    app.token()?;
    let notifications = app.api.notifications().await?;
    if notifications.is_empty() {
        println!("no notifications");
        return Ok(());
    }
    for notification in notifications {
        let mark = if notification.is_read { " " } else { "●" };
        println!(
            "{mark} #{:<4} [{}] {}",
            notification.id,
            notification.created_at.format("%m-%d %H:%M"),
            notification.title,
        );
        if let Some(content) = &notification.content {
            println!("         {content}");
        }
    }
    Ok(())
}

pub async fn read(app: &App, id: i64) -> Result<()> {
    app.token()?;
    app.api.mark_notification_read(id).await?;
    println!("marked #{id} read");
    Ok(())
}

pub async fn read_all(app: &App) -> Result<()> {
    app.token()?;
    app.api.mark_all_notifications_read().await?;
    println!("marked all notifications read");
    Ok(())
}

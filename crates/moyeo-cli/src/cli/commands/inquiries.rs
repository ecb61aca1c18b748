//! Customer-support inquiry commands.

use anyhow::Result;

use crate::cli::App;

pub async fn create(app: &App, title: &str, content: &str) -> Result<()> {
    app.token()?;
    app.api.create_inquiry(title, content).await?;
    println!("inquiry filed");
    Ok(())
}

pub async fn list(app: &App) -> Result<()> {
    app.token()?;
    let inquiries = app.api.my_inquiries().await?;
    if inquiries.is_empty() {
        println!("no inquiries");
        return Ok(());
    }
    for inquiry in inquiries {
        println!(
            "#{:<4} [{}] {} ({})",
            inquiry.id,
            inquiry.status.as_str(),
            inquiry.title,
            inquiry.created_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

pub async fn show(app: &App, id: i64) -> Result<()> {
    app.token()?;
    let inquiry = app.api.inquiry(id).await?;
    println!("{} ({})", inquiry.title, inquiry.created_at.format("%Y-%m-%d %H:%M"));
    println!("{}", inquiry.content);
    match inquiry.answer {
        Some(answer) => {
            println!("--- answer ---");
            println!("{answer}");
        }
        None => println!("(awaiting answer)"),
    }
    Ok(())
}

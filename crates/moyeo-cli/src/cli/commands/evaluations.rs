//! Post-meeting evaluation commands.

use anyhow::{Result, anyhow};

use moyeo_types::evaluation::{BadgeType, EvaluationEntry};

use crate::cli::App;

pub async fn targets(app: &App, meeting_id: i64) -> Result<()> {
    app.token()?;
    let targets = app.api.evaluation_targets(meeting_id).await?;
    if targets.is_empty() {
        println!("no one left to rate for meeting #{meeting_id}");
        return Ok(());
    }
    for target in targets {
        let done = if target.already_evaluated { " (rated)" } else { "" };
        println!("#{:<4} {}{done}", target.user_id, target.nickname);
    }
    Ok(())
}

pub async fn submit(app: &App, meeting_id: i64, ratings: &[String]) -> Result<()> {
    app.token()?;
    let evaluations = ratings
        .iter()
        .map(|spec| parse_rating(spec))
        .collect::<Result<Vec<_>>>()?;
    let count = evaluations.len();
    app.api.submit_evaluations(meeting_id, evaluations).await?;
    println!("submitted {count} rating(s) for meeting #{meeting_id}");
    Ok(())
}

/// Parses `userId:badge` where badge is good, normal, or bad.
fn parse_rating(spec: &str) -> Result<EvaluationEntry> {
    let (user, badge) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid rating '{spec}' (expected userId:badge)"))?;
    let target_id = user
        .parse()
        .map_err(|_| anyhow!("invalid user id in '{spec}'"))?;
    let badge: BadgeType = badge.parse().map_err(|e: String| anyhow!(e))?;
    Ok(EvaluationEntry { target_id, badge })
}

//! Account commands: register, login, logout, whoami.

use anyhow::{Result, bail};

use moyeo_types::user::{LoginRequest, RegisterRequest};

use crate::cli::App;

pub async fn register(app: &mut App, request: RegisterRequest) -> Result<()> {
    let auth = app.api.register(&request).await?;
    app.session.login(&auth.token, auth.user.clone())?;
    app.api.set_bearer(auth.token);
    println!("registered and logged in as {} <{}>", auth.user.nickname, auth.user.email);
    Ok(())
}

pub async fn login(app: &mut App, email: &str, password: &str) -> Result<()> {
    let auth = app
        .api
        .login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;
    app.session.login(&auth.token, auth.user.clone())?;
    app.api.set_bearer(auth.token);
    println!("logged in as {} <{}>", auth.user.nickname, auth.user.email);
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    app.session.logout()?;
    println!("logged out");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let Some(user) = app.session.user() else {
        bail!("not logged in — run `moyeo login` first");
    };
    println!("{} <{}>", user.nickname, user.email);
    println!("  name:   {}", user.name);
    println!("  role:   {}", user.role.as_str());
    if let Some(campus) = &user.campus {
        println!("  campus: {campus}");
    }
    Ok(())
}

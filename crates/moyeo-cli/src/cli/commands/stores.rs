//! Store browsing commands.

use anyhow::{Result, anyhow};

use moyeo_client::api::StoreQuery;
use moyeo_types::store::StoreCategory;

use crate::cli::App;

pub async fn list(
    app: &App,
    category: Option<&str>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    let category = category
        .map(|c| c.parse::<StoreCategory>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let stores = app
        .api
        .list_stores(&StoreQuery {
            category,
            page,
            limit,
        })
        .await?;

    if stores.is_empty() {
        println!("no stores found");
        return Ok(());
    }
    for store in stores {
        println!(
            "#{:<4} {:<10} {}  (delivery {}원, min order {}원)",
            store.id,
            store.category.as_str(),
            store.name,
            store.delivery_fee,
            store.min_order_amount,
        );
    }
    Ok(())
}

pub async fn show(app: &App, id: i64) -> Result<()> {
    let detail = app.api.store(id).await?;
    let store = &detail.store;

    println!("{} ({})", store.name, store.category.as_str());
    println!("  address:   {}", store.address);
    if let (Some(open), Some(close)) = (&store.open_time, &store.close_time) {
        println!("  hours:     {open}–{close}");
    }
    if let Some(closed) = &store.closed_days {
        println!("  closed:    {closed}");
    }
    println!("  delivery:  {}원 (min order {}원)", store.delivery_fee, store.min_order_amount);

    println!("menu:");
    for menu in &detail.menus {
        let mark = if menu.is_available { " " } else { "x" };
        println!("  {mark} #{:<4} {:<20} {}원", menu.id, menu.name, menu.price);
    }
    Ok(())
}

//! Meeting lifecycle commands.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};

use moyeo_client::api::MeetingQuery;
use moyeo_client::cart::Cart;
use moyeo_types::cart::CartItem;
use moyeo_types::meeting::{CreateMeetingRequest, DiningType, Meeting, OrderType};

use crate::cli::App;

#[derive(clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub store: i64,
    #[arg(long)]
    pub title: Option<String>,
    /// individual or together
    #[arg(long, default_value = "individual")]
    pub dining: String,
    /// instant or reservation
    #[arg(long = "order-type", default_value = "instant")]
    pub order_type: String,
    #[arg(long)]
    pub pickup: String,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, default_value_t = 2)]
    pub min_members: u32,
    #[arg(long, default_value_t = 10)]
    pub max_members: u32,
    #[arg(long)]
    pub delivery_fee: i64,
    #[arg(long)]
    pub allow_early_order: bool,
    /// Recruiting deadline, RFC 3339 (e.g. 2026-09-01T18:00:00+09:00)
    #[arg(long)]
    pub deadline: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub campus: Option<String>,
}

pub async fn list(app: &App, query: MeetingQuery) -> Result<()> {
    let meetings = app.api.list_meetings(&query).await?;
    if meetings.is_empty() {
        println!("no meetings found");
        return Ok(());
    }
    for meeting in meetings {
        print_summary(&meeting);
    }
    Ok(())
}

fn print_summary(meeting: &Meeting) {
    let title = meeting.title.as_deref().unwrap_or(&meeting.store_name);
    println!(
        "#{:<4} [{}] {}  {}/{} members, delivery {}원 ({}원/인), deadline {}",
        meeting.id,
        meeting.status.as_str(),
        title,
        meeting.current_members,
        meeting.max_members,
        meeting.delivery_fee,
        meeting.delivery_fee_share(),
        meeting.deadline.format("%m-%d %H:%M"),
    );
}

pub async fn show(app: &App, id: i64) -> Result<()> {
    let detail = app.api.meeting(id).await?;
    print_summary(&detail.meeting);
    println!("  store:    {} (min order {}원)", detail.meeting.store_name, detail.min_order_amount);
    println!("  pickup:   {}", detail.meeting.pickup_location);
    if let Some(description) = &detail.meeting.description {
        println!("  notes:    {description}");
    }

    println!("members:");
    for member in &detail.members {
        let mark = if member.is_leader { "*" } else { " " };
        println!("  {mark} {} (joined {})", member.nickname, member.joined_at.format("%m-%d %H:%M"));
    }

    if !detail.order_items.is_empty() {
        println!("order lines:");
        for item in &detail.order_items {
            let shared = if item.is_shared { " (shared)" } else { "" };
            println!(
                "  #{:<4} {} ×{} {}원{shared} — {}",
                item.id, item.menu_name, item.quantity, item.price, item.orderer_nickname,
            );
        }
    }
    Ok(())
}

pub async fn create(app: &App, args: CreateArgs) -> Result<()> {
    app.token()?;

    let dining_type = match args.dining.as_str() {
        "individual" => DiningType::Individual,
        "together" => DiningType::Together,
        other => bail!("unknown dining type '{other}' (individual|together)"),
    };
    let order_type = match args.order_type.as_str() {
        "instant" => OrderType::Instant,
        "reservation" => OrderType::Reservation,
        other => bail!("unknown order type '{other}' (instant|reservation)"),
    };
    let deadline: DateTime<Utc> = DateTime::parse_from_rfc3339(&args.deadline)
        .with_context(|| format!("invalid deadline '{}'", args.deadline))?
        .with_timezone(&Utc);

    let id = app
        .api
        .create_meeting(&CreateMeetingRequest {
            store_id: args.store,
            title: args.title,
            dining_type,
            order_type,
            pickup_location: args.pickup,
            meeting_location: args.location,
            min_members: args.min_members,
            max_members: args.max_members,
            delivery_fee: args.delivery_fee,
            allow_early_order: args.allow_early_order,
            deadline,
            description: args.description,
            campus: args.campus,
        })
        .await?;
    println!("created meeting #{id}");
    Ok(())
}

/// Joins a meeting: menu selections are resolved against the store's menu
/// board, collected into a cart, and submitted as one join request.
pub async fn join(app: &App, id: i64, items: &[String], points: Option<i64>) -> Result<()> {
    app.token()?;

    let detail = app.api.meeting(id).await?;
    let store = app.api.store(detail.meeting.store_id).await?;

    let mut cart = Cart::new();
    cart.set_meeting(id);
    for spec in items {
        let (menu_id, quantity, is_shared) = parse_item_spec(spec)?;
        let menu = store
            .menus
            .iter()
            .find(|m| m.id == menu_id)
            .with_context(|| format!("menu #{menu_id} is not on {}'s board", store.store.name))?;
        if !menu.is_available {
            bail!("menu '{}' is currently unavailable", menu.name);
        }
        cart.add_item(CartItem {
            menu_id,
            menu_name: menu.name.clone(),
            price: menu.price,
            quantity,
            is_shared,
        });
    }
    if cart.is_empty() {
        bail!("nothing to order");
    }

    for line in cart.items() {
        let shared = if line.is_shared { " (shared)" } else { "" };
        println!("  {} ×{} = {}원{shared}", line.menu_name, line.quantity, line.line_total());
    }
    println!("  menu total:     {}원", cart.total_price());
    println!("  delivery share: {}원", detail.meeting.delivery_fee_share());
    if let Some(points) = points {
        println!("  points used:    {points}");
    }

    app.api.join_meeting(id, &cart.to_join_request(points)).await?;
    println!("joined meeting #{id}");
    Ok(())
}

/// Parses `menuId:quantity[:shared]`.
fn parse_item_spec(spec: &str) -> Result<(i64, u32, bool)> {
    let mut parts = spec.split(':');
    let menu_id = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| anyhow!("invalid item '{spec}' (expected menuId:quantity[:shared])"))?;
    let quantity: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| anyhow!("invalid item '{spec}' (expected menuId:quantity[:shared])"))?;
    if quantity == 0 {
        bail!("quantity must be at least 1 in '{spec}'");
    }
    let is_shared = match parts.next() {
        None => false,
        Some("shared") => true,
        Some(other) => bail!("unknown flag '{other}' in '{spec}' (only 'shared')"),
    };
    Ok((menu_id, quantity, is_shared))
}

pub async fn order(app: &App, id: i64) -> Result<()> {
    app.token()?;
    app.api.process_order(id).await?;
    println!("order sent for meeting #{id}");
    Ok(())
}

pub async fn complete(app: &App, id: i64) -> Result<()> {
    app.token()?;
    let summary = app.api.complete_meeting(id).await?;
    println!("meeting #{id} completed; refund per person: {}원", summary.refund_per_person);
    Ok(())
}

pub async fn cancel_item(app: &App, order_item_id: i64) -> Result<()> {
    app.token()?;
    app.api.cancel_order_item(order_item_id).await?;
    println!("cancelled order line #{order_item_id}");
    Ok(())
}

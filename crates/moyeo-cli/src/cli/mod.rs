//! CLI entry and dispatch.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use moyeo_client::api::Api;
use moyeo_client::config::{Config, paths};
use moyeo_client::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "moyeo")]
#[command(version)]
#[command(about = "Terminal client for the moyeo group-delivery service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        university: Option<String>,
        #[arg(long)]
        campus: Option<String>,
    },
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the logged-in identity
    Whoami,
    /// Browse stores
    Stores {
        #[command(subcommand)]
        command: StoreCommands,
    },
    /// Browse and manage meetings
    Meetings {
        #[command(subcommand)]
        command: MeetingCommands,
    },
    /// Join the realtime chat for a meeting
    Chat {
        /// Meeting id (the chat room is looked up from it)
        #[arg(value_name = "MEETING_ID")]
        meeting_id: i64,
    },
    /// Notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Customer-support inquiries
    Inquiries {
        #[command(subcommand)]
        command: InquiryCommands,
    },
    /// Profile and order history
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Rate co-members after a completed meeting
    Evaluate {
        #[command(subcommand)]
        command: EvaluateCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum StoreCommands {
    /// List stores
    List {
        /// Filter by category (korean, chinese, ..., etc)
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a store with its menu board
    Show {
        #[arg(value_name = "STORE_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum MeetingCommands {
    /// List meetings
    List {
        #[arg(long)]
        campus: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show a meeting with members and order lines
    Show {
        #[arg(value_name = "MEETING_ID")]
        id: i64,
    },
    /// Create a meeting
    Create(commands::meetings::CreateArgs),
    /// Join a meeting with menu selections
    Join {
        #[arg(value_name = "MEETING_ID")]
        id: i64,
        /// Menu selection as menuId:quantity[:shared]; repeatable
        #[arg(long = "item", value_name = "SPEC", required = true)]
        items: Vec<String>,
        /// Points to spend
        #[arg(long)]
        points: Option<i64>,
    },
    /// Leader: close recruiting and send the pooled order
    Order {
        #[arg(value_name = "MEETING_ID")]
        id: i64,
    },
    /// Leader: mark the meeting completed
    Complete {
        #[arg(value_name = "MEETING_ID")]
        id: i64,
    },
    /// Cancel one of your menu lines before ordering
    CancelItem {
        #[arg(value_name = "ORDER_ITEM_ID")]
        order_item_id: i64,
    },
}

#[derive(clap::Subcommand)]
enum NotificationCommands {
    /// List notifications
    List,
    /// Mark one notification read
    Read {
        #[arg(value_name = "NOTIFICATION_ID")]
        id: i64,
    },
    /// Mark every notification read
    ReadAll,
}

#[derive(clap::Subcommand)]
enum InquiryCommands {
    /// File an inquiry
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// List your inquiries
    List,
    /// Show one inquiry with its answer, if any
    Show {
        #[arg(value_name = "INQUIRY_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Show your profile
    Show,
    /// Update nickname or profile image
    Update {
        #[arg(long)]
        current_password: String,
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        profile_image: Option<String>,
    },
    /// Delete the account
    Delete {
        #[arg(long)]
        password: String,
    },
    /// Show your order history
    Orders {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show another user's public profile
    Of {
        #[arg(value_name = "USER_ID")]
        user_id: i64,
    },
}

#[derive(clap::Subcommand)]
enum EvaluateCommands {
    /// List members you can still rate for a meeting
    Targets {
        #[arg(value_name = "MEETING_ID")]
        meeting_id: i64,
    },
    /// Submit ratings
    Submit {
        #[arg(value_name = "MEETING_ID")]
        meeting_id: i64,
        /// Rating as userId:badge (good|normal|bad); repeatable
        #[arg(long = "rate", value_name = "SPEC", required = true)]
        ratings: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the service base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("MOYEO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

/// Context shared by every command: persisted session plus the gateway.
pub(crate) struct App {
    pub session: SessionStore,
    pub api: Api,
}

impl App {
    fn load() -> Result<Self> {
        let config = Config::load().context("load config")?;
        let session = SessionStore::load().context("load session")?;
        let mut api = Api::new(config.resolved_base_url());
        if let Some(token) = session.token() {
            api.set_bearer(token);
        }
        Ok(Self { session, api })
    }

    /// The bearer credential, or a friendly refusal for commands that
    /// need an authenticated session.
    pub fn token(&self) -> Result<&str> {
        match self.session.token() {
            Some(token) => Ok(token),
            None => bail!("not logged in — run `moyeo login` first"),
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    // config subcommands must work without a valid session or server
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                println!("{}", paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(url),
        };
    }

    let mut app = App::load()?;

    match cli.command {
        Commands::Register {
            email,
            password,
            name,
            phone,
            department,
            address,
            university,
            campus,
        } => {
            commands::auth::register(
                &mut app,
                moyeo_types::user::RegisterRequest {
                    email,
                    password,
                    name,
                    phone,
                    department,
                    address,
                    university,
                    campus,
                },
            )
            .await
        }
        Commands::Login { email, password } => commands::auth::login(&mut app, &email, &password).await,
        Commands::Logout => commands::auth::logout(&mut app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Stores { command } => match command {
            StoreCommands::List {
                category,
                page,
                limit,
            } => commands::stores::list(&app, category.as_deref(), page, limit).await,
            StoreCommands::Show { id } => commands::stores::show(&app, id).await,
        },
        Commands::Meetings { command } => match command {
            MeetingCommands::List {
                campus,
                category,
                sort,
                status,
                page,
                limit,
            } => {
                commands::meetings::list(
                    &app,
                    moyeo_client::api::MeetingQuery {
                        campus,
                        category,
                        sort,
                        status,
                        page,
                        limit,
                    },
                )
                .await
            }
            MeetingCommands::Show { id } => commands::meetings::show(&app, id).await,
            MeetingCommands::Create(args) => commands::meetings::create(&app, args).await,
            MeetingCommands::Join { id, items, points } => {
                commands::meetings::join(&app, id, &items, points).await
            }
            MeetingCommands::Order { id } => commands::meetings::order(&app, id).await,
            MeetingCommands::Complete { id } => commands::meetings::complete(&app, id).await,
            MeetingCommands::CancelItem { order_item_id } => {
                commands::meetings::cancel_item(&app, order_item_id).await
            }
        },
        Commands::Chat { meeting_id } => commands::chat::run(&app, meeting_id).await,
        Commands::Notifications { command } => match command {
            NotificationCommands::List => commands::notifications::list(&app).await,
            NotificationCommands::Read { id } => commands::notifications::read(&app, id).await,
            NotificationCommands::ReadAll => commands::notifications::read_all(&app).await,
        },
        Commands::Inquiries { command } => match command {
            InquiryCommands::Create { title, content } => {
                commands::inquiries::create(&app, &title, &content).await
            }
            InquiryCommands::List => commands::inquiries::list(&app).await,
            InquiryCommands::Show { id } => commands::inquiries::show(&app, id).await,
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::users::show(&app).await,
            ProfileCommands::Update {
                current_password,
                nickname,
                profile_image,
            } => commands::users::update(&mut app, current_password, nickname, profile_image).await,
            ProfileCommands::Delete { password } => commands::users::delete(&mut app, &password).await,
            ProfileCommands::Orders { page, limit } => {
                commands::users::orders(&app, page, limit).await
            }
            ProfileCommands::Of { user_id } => commands::users::public(&app, user_id).await,
        },
        Commands::Evaluate { command } => match command {
            EvaluateCommands::Targets { meeting_id } => {
                commands::evaluations::targets(&app, meeting_id).await
            }
            EvaluateCommands::Submit {
                meeting_id,
                ratings,
            } => commands::evaluations::submit(&app, meeting_id, &ratings).await,
        },
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

//! Folio CLI
//!
//! Command-line admin for a portfolio:
//! - Sign in and manage the session
//! - List, browse, show, add and edit every portfolio section
//! - Change record status (resumes can also be deleted)
//! - Upload media and preview the public portfolio

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use folio::api::{ApiClient, ApiError};
use folio::auth::{AuthService, SessionStore};
use folio::config::{generate_default_config, Config};
use folio::forms::{Form, FormState};
use folio::listing::{ListPage, ListQuery, LoadOutcome, SortDir};
use folio::model::{Entity, Status};
use folio::notify::Notifications;
use folio::portfolio::{PortfolioService, PortfolioSource};
use folio::routing::{AdminRoute, ENTITY_ROUTES};
use folio::services::*;
use folio::table::{Paging, Row, Table};
use folio::upload::MediaUploader;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin for your portfolio")]
#[command(long_about = "Folio manages the sections of your public portfolio.\nSign in, edit achievements, experience, skills and more, then preview the result.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, /etc/folio, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        name: String,
        email: String,
        #[arg(short, long)]
        password: String,
        /// Password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Request a password reset link
    ForgotPassword { email: String },

    /// Set a new password with the emailed token
    ResetPassword {
        token: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage achievements
    Achievements {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage testimonials
    Testimonials {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage social links
    SocialLinks {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage navigation links
    Navlinks {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage templates
    Templates {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage resumes
    Resumes {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage education
    Educations {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage work experience
    Experiences {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Manage skills
    Skills {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Upload files to the media host
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Preview a public portfolio
    Portfolio { username: String },

    /// Open an admin route, e.g. "/skills/list?page=1&size=25"
    Open { route: String },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone)]
pub enum EntityAction {
    /// One page of records
    List {
        /// Start from a list URL query string
        #[arg(long)]
        query: Option<String>,
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long)]
        size: Option<u32>,
        #[arg(long)]
        sort_by: Option<String>,
        /// asc or desc
        #[arg(long)]
        sort_dir: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Filters in key=value format (status=ACTIVE, company=...)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<String>,
    },

    /// Interactive list page
    Browse {
        #[arg(long)]
        query: Option<String>,
    },

    /// Show one record
    Show { id: String },

    /// Create a record from key=value fields
    Add { fields: Vec<String> },

    /// Update a record from key=value fields
    Edit { id: String, fields: Vec<String> },

    /// Change a record's status (ACTIVE, INACTIVE, BLOCKED, DELETED)
    Status { id: String, status: String },

    /// Delete a record (resumes only)
    Delete { id: String },
}

/// Everything a command needs
struct App {
    config: Config,
    client: ApiClient,
    store: SessionStore,
    format: OutputFormat,
    notifications: Notifications,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = result {
        eprintln!("✗ {:#}", e);
        if let Some(ApiError::Unauthorized(_)) = e.downcast_ref::<ApiError>() {
            eprintln!();
            eprintln!("Sign in first:");
            eprintln!("  folio login <email> --password <password>");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    if let Err(e) = folio::logging::init(&config.logging) {
        eprintln!("Logging disabled: {}", e);
    }
    tracing::debug!(api = %config.api.base_url, "Folio CLI v{}", env!("CARGO_PKG_VERSION"));

    let store = SessionStore::from_config(&config.session);
    let mut client = ApiClient::new(&config.api)?;
    match store.load() {
        Ok(Some(session)) => client = client.with_session(session),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable session"),
    }

    let ctx = App {
        config,
        client,
        store,
        format: cli.format,
        notifications: Notifications::new(),
    };

    let result = dispatch(&ctx, cli.command).await;
    for toast in ctx.notifications.drain() {
        eprintln!("{}", toast);
    }
    result
}

async fn dispatch(ctx: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let auth = AuthService::new(ctx.client.clone());
            let session = auth.login(&email, &password).await?;
            ctx.store.save(&session)?;
            ctx.notifications
                .success(format!("Signed in as {}", session.user.email));
        }

        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let auth = AuthService::new(ctx.client.clone());
            let user = auth.register(&name, &email, &password, &confirm).await?;
            ctx.notifications
                .success(format!("Account created for {}. You can sign in now.", user.email));
        }

        Commands::ForgotPassword { email } => {
            let message = AuthService::new(ctx.client.clone())
                .forgot_password(&email)
                .await?;
            ctx.notifications.info(message);
        }

        Commands::ResetPassword {
            token,
            password,
            confirm,
        } => {
            let message = AuthService::new(ctx.client.clone())
                .reset_password(&token, &password, &confirm)
                .await?;
            ctx.notifications.success(message);
        }

        Commands::Logout => {
            AuthService::new(ctx.client.clone()).logout().await;
            if ctx.store.clear()? {
                ctx.notifications.success("Signed out");
            } else {
                ctx.notifications.info("No session to sign out of");
            }
        }

        Commands::Whoami => {
            let user = AuthService::new(ctx.client.clone()).me().await?;
            match ctx.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&user)?),
                _ => {
                    println!("{:<10} {}", "Name", user.name);
                    println!("{:<10} {}", "Email", user.email);
                    println!("{:<10} {}", "Profile", user.profile_id.as_deref().unwrap_or("-"));
                    println!("{:<10} {}", "Role", user.role.as_deref().unwrap_or("-"));
                }
            }
        }

        Commands::Achievements { action } => entity(ctx, "achievements", action).await?,
        Commands::Testimonials { action } => entity(ctx, "testimonials", action).await?,
        Commands::SocialLinks { action } => entity(ctx, "social-links", action).await?,
        Commands::Navlinks { action } => entity(ctx, "navlinks", action).await?,
        Commands::Templates { action } => entity(ctx, "templates", action).await?,
        Commands::Resumes { action } => entity(ctx, "resumes", action).await?,
        Commands::Educations { action } => entity(ctx, "educations", action).await?,
        Commands::Experiences { action } => entity(ctx, "experiences", action).await?,
        Commands::Skills { action } => entity(ctx, "skills", action).await?,

        Commands::Upload { files } => upload(ctx, &files).await?,

        Commands::Portfolio { username } => portfolio(ctx, &username).await?,

        Commands::Open { route } => open(ctx, &route).await?,

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Cannot write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Route an entity action to its resource
async fn entity(ctx: &App, name: &str, action: EntityAction) -> Result<()> {
    match name {
        "achievements" => run_entity::<AchievementResource>(ctx, action).await,
        "testimonials" => run_entity::<TestimonialResource>(ctx, action).await,
        "social-links" => run_entity::<SocialLinkResource>(ctx, action).await,
        "navlinks" => run_entity::<NavlinkResource>(ctx, action).await,
        "templates" => run_entity::<TemplateResource>(ctx, action).await,
        "resumes" => run_entity::<ResumeResource>(ctx, action).await,
        "educations" => run_entity::<EducationResource>(ctx, action).await,
        "experiences" => run_entity::<ExperienceResource>(ctx, action).await,
        "skills" => run_entity::<SkillResource>(ctx, action).await,
        other => bail!("Unknown entity: {}", other),
    }
}

fn parse_filter(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .with_context(|| format!("Expected key=value, got '{}'", pair))
}

async fn run_entity<R: Resource>(ctx: &App, action: EntityAction) -> Result<()> {
    let service = EntityService::<R>::new(ctx.client.clone());

    match action {
        EntityAction::List {
            query,
            page,
            size,
            sort_by,
            sort_dir,
            search,
            filters,
        } => {
            let mut list_query = ListQuery::from_query_string_or(
                query.as_deref().unwrap_or_default(),
                ctx.config.list.default_page_size,
            );
            if let Some(sort_by) = sort_by {
                list_query.set_sort(&sort_by, sort_dir.as_deref().and_then(SortDir::parse));
            } else if let Some(dir) = sort_dir.as_deref().and_then(SortDir::parse) {
                list_query.sort_dir = dir;
            }
            if let Some(search) = search {
                list_query.set_search(&search);
            }
            for pair in &filters {
                let (key, value) = parse_filter(pair)?;
                list_query.set_filter(key, value);
            }
            if let Some(size) = size {
                list_query.set_size(size);
            }
            if let Some(page) = page {
                list_query.set_page(page);
            }

            let list = ListPage::new(service, list_query).with_notifications(ctx.notifications.clone());
            if list.load().await == LoadOutcome::Failed {
                bail!("Could not load {}", R::PLURAL);
            }
            print_list::<R>(ctx, &list)?;
        }

        EntityAction::Browse { query } => browse::<R>(ctx, service, query).await?,

        EntityAction::Show { id } => {
            let record = service.get(&id).await?;
            print_record::<R>(ctx, &record)?;
        }

        EntityAction::Add { fields } => {
            let mut state = FormState::<R::Form>::add();
            state.apply_pairs(&fields)?;
            if !state.validate() {
                bail!("{} is invalid: {}", R::NAME, state.errors());
            }
            let record = service.create(state.form()).await?;
            ctx.notifications
                .success(format!("{} created ({})", R::NAME, record.id()));
            print_record::<R>(ctx, &record)?;
        }

        EntityAction::Edit { id, fields } => {
            let current = service.get(&id).await?;
            let mut state = FormState::<R::Form>::edit(&current);
            state.apply_pairs(&fields)?;
            if !state.validate() {
                bail!("{} is invalid: {}", R::NAME, state.errors());
            }
            let record = service.update(&id, state.form()).await?;
            ctx.notifications.success(format!("{} updated", R::NAME));
            print_record::<R>(ctx, &record)?;
        }

        EntityAction::Status { id, status } => {
            let status: Status = status.parse()?;
            let record = service.set_status(&id, status).await?;
            ctx.notifications
                .success(format!("{} is now {}", R::NAME, record.status()));
        }

        EntityAction::Delete { id } => {
            let message = service.delete(&id).await?;
            ctx.notifications.success(if message.is_empty() {
                format!("{} deleted", R::NAME)
            } else {
                message
            });
        }
    }

    Ok(())
}

fn print_list<R: Resource>(ctx: &App, list: &ListPage<EntityService<R>>) -> Result<()> {
    let records = list.records();

    match ctx.format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "records": records,
                "meta": list.meta(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        format => {
            let schema = R::schema();
            let rows: Vec<Row> = records.iter().map(R::row).collect();
            let table = Table::new(&schema, &rows, Paging::Server(list.meta()));
            if format == OutputFormat::Csv {
                print!("{}", table.to_csv()?);
            } else {
                println!("{}", table.to_text());
                println!();
                println!("{}", list.current_url());
            }
        }
    }
    Ok(())
}

fn print_record<R: Resource>(ctx: &App, record: &R::Record) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let state = FormState::<R::Form>::view(record);
    let values = serde_json::to_value(state.form())?;

    println!("{} {} [{}]", R::NAME, record.id(), record.status());
    println!("{}", "-".repeat(40));
    for field in <R::Form as Form>::FIELDS {
        let value = match values.get(*field) {
            None | Some(serde_json::Value::Null) => "-".to_string(),
            Some(serde_json::Value::String(s)) if s.is_empty() => "-".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        println!("{:<18} {}", field, value);
    }
    Ok(())
}

const BROWSE_HELP: &str = "\
Commands:
  n, next              next page
  p, prev              previous page
  page <n>             go to page n (0-based)
  size <n>             rows per page
  sort <key> [asc|desc]
  search <text>        (empty text clears)
  filter <key>=<value> (empty value clears)
  r, reload
  q, quit";

async fn browse<R: Resource>(
    ctx: &App,
    service: EntityService<R>,
    query: Option<String>,
) -> Result<()> {
    let list = ListPage::from_url(service, query.as_deref().unwrap_or_default(), &ctx.config.list)
        .with_notifications(ctx.notifications.clone());

    list.load().await;
    show_page::<R>(ctx, &list)?;
    println!("{}", BROWSE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        let outcome = match command {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "n" | "next" => list.next_page().await,
            "p" | "prev" => list.previous_page().await,
            "r" | "reload" => list.load().await,
            "page" => match arg.parse() {
                Ok(page) => list.set_page(page).await,
                Err(_) => {
                    eprintln!("page expects a number");
                    continue;
                }
            },
            "size" => match arg.parse() {
                Ok(size) => list.set_size(size).await,
                Err(_) => {
                    eprintln!("size expects a number");
                    continue;
                }
            },
            "sort" => {
                let mut parts = arg.split_whitespace();
                match parts.next() {
                    Some(key) => {
                        list.set_sort(key, parts.next().and_then(SortDir::parse))
                            .await
                    }
                    None => {
                        eprintln!("sort expects a column key");
                        continue;
                    }
                }
            }
            "search" => list.set_search(arg).await,
            "filter" => {
                let (key, value) = arg.split_once('=').unwrap_or((arg, ""));
                list.set_filter(key.trim(), value.trim()).await
            }
            _ => {
                println!("{}", BROWSE_HELP);
                continue;
            }
        };

        if outcome != LoadOutcome::Stale {
            show_page::<R>(ctx, &list)?;
        }
    }

    Ok(())
}

fn show_page<R: Resource>(ctx: &App, list: &ListPage<EntityService<R>>) -> Result<()> {
    for toast in ctx.notifications.drain() {
        eprintln!("{}", toast);
    }
    print_list::<R>(ctx, list)
}

async fn upload(ctx: &App, files: &[PathBuf]) -> Result<()> {
    let uploader = MediaUploader::new(&ctx.config.media)?;
    let media = uploader.upload_many(files).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&media)?),
        _ => {
            for item in &media {
                println!("{}\t{}", item.public_id, item.secure_url);
            }
        }
    }
    ctx.notifications
        .success(format!("Uploaded {} file(s)", media.len()));
    Ok(())
}

async fn portfolio(ctx: &App, username: &str) -> Result<()> {
    let portfolio = PortfolioService::new(ctx.client.clone())
        .fetch(username)
        .await?
        .visible();

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&portfolio)?);
        return Ok(());
    }

    println!("{}", portfolio.profile.display_name());
    if let Some(headline) = &portfolio.profile.headline {
        println!("{}", headline);
    }
    println!("{}", "-".repeat(40));

    let sections: [(&str, Vec<&str>); 8] = [
        ("Experience", portfolio.experiences.iter().map(|r| r.title()).collect()),
        ("Education", portfolio.educations.iter().map(|r| r.title()).collect()),
        ("Skills", portfolio.skills.iter().map(|r| r.title()).collect()),
        ("Achievements", portfolio.achievements.iter().map(|r| r.title()).collect()),
        ("Testimonials", portfolio.testimonials.iter().map(|r| r.title()).collect()),
        ("Links", portfolio.social_links.iter().map(|r| r.title()).collect()),
        ("Navigation", portfolio.navlinks.iter().map(|r| r.title()).collect()),
        ("Resumes", portfolio.resumes.iter().map(|r| r.title()).collect()),
    ];
    for (label, items) in sections.iter().filter(|(_, items)| !items.is_empty()) {
        println!("{} ({})", label, items.len());
        for item in items {
            println!("  - {}", item);
        }
    }
    if portfolio.is_empty() {
        println!("Nothing published yet.");
    }
    Ok(())
}

/// Resolve an admin route to the matching command
async fn open(ctx: &App, route: &str) -> Result<()> {
    let route = AdminRoute::parse(route)?;
    if route.requires_auth() && ctx.client.session().await.is_none() {
        return Err(ApiError::Unauthorized("Sign in to open this page".to_string()).into());
    }

    match route {
        AdminRoute::Dashboard => {
            println!("Sections:");
            for entity in ENTITY_ROUTES {
                println!("  /{}/list", entity);
            }
        }
        AdminRoute::Login => println!("folio login <email> --password <password>"),
        AdminRoute::Register => {
            println!("folio register <name> <email> --password <password> --confirm <password>")
        }
        AdminRoute::ForgotPassword => println!("folio forgot-password <email>"),
        AdminRoute::ResetPassword { token } => println!(
            "folio reset-password {} --password <password> --confirm <password>",
            token.as_deref().unwrap_or("<token>")
        ),
        AdminRoute::List { entity: name, query } => {
            let action = EntityAction::List {
                query: Some(query.to_query_string()),
                page: None,
                size: None,
                sort_by: None,
                sort_dir: None,
                search: None,
                filters: Vec::new(),
            };
            entity(ctx, &name, action).await?;
        }
        AdminRoute::Add { entity: name } => {
            println!("folio {} add key=value ...", name);
        }
        AdminRoute::Edit { entity: name, id } | AdminRoute::View { entity: name, id } => {
            entity(ctx, &name, EntityAction::Show { id }).await?;
        }
    }
    Ok(())
}

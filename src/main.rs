//! EventSync command line client
//!
//! Drives the same view flows a browser front end would: the filtered event
//! list, event detail with check-in and delete, the create and edit forms,
//! the personal agenda, and login/registration.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventsync_client::{
    config::AppConfig,
    models::{CreateEvent, EventSummary, EventType, FilterRequest, LoginRequest, RegisterRequest},
    navigation::{History, Navigator},
    services::{CategoriesApi, EventsApi},
    session::{CredentialStore, FileCredentialStore, MemoryCredentialStore},
    views::{
        event_detail::parse_event_id, AgendaState, DeleteOutcome, DetailState, EventDetailView,
        EventForm, EventListView, ListState, MyEventsView, Prompter,
    },
    AppState,
};

#[derive(Parser)]
#[command(name = "eventsync")]
#[command(about = "Browse, filter and manage EventSync events", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Events service URL (or use EVENTSYNC_API_URL)")]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered
    Events {
        #[arg(long)]
        name: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Category name; repeat for several
        #[arg(long = "category")]
        categories: Vec<String>,
        /// One-based page number
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Show one event
    Show { id: String },

    /// Check in, or cancel an existing check-in
    CheckIn { id: String },

    Delete {
        id: String,
        #[arg(short, long, help = "Do not ask for confirmation")]
        yes: bool,
    },

    Create(EventArgs),

    /// Edit an event; unset options keep the current value
    Edit {
        id: String,
        #[command(flatten)]
        changes: EditArgs,
    },

    Categories,

    /// Events you organize or are checked into
    Mine,

    Login {
        email: String,
        #[arg(long, help = "Read from stdin when omitted")]
        password: Option<String>,
    },

    Register {
        name: String,
        email: String,
        #[arg(long, help = "Read from stdin when omitted")]
        password: Option<String>,
    },

    Logout,
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Strictly after today, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// ONLINE, PRESENCIAL or HIBRIDO
    #[arg(long = "type", default_value = "PRESENCIAL")]
    event_type: EventType,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    ticket_url: Option<String>,
    #[arg(long)]
    site_url: Option<String>,
    #[arg(long)]
    online_url: Option<String>,
    #[arg(long)]
    category_id: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long = "type")]
    event_type: Option<EventType>,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    location: Option<String>,
}

/// Confirmation read from the terminal
struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// `--yes` on the command line
struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

fn read_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end().to_string())
}

fn print_summaries(events: &[EventSummary]) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }
    for event in events {
        println!(
            "{}  {} {}  {}  [{}]  {}",
            event.id,
            event.date,
            event.start_time,
            event.name,
            event.category_name.as_deref().unwrap_or("-"),
            event.location.as_deref().unwrap_or(""),
        );
    }
}

fn init_tracing(config: &AppConfig) {
    let level = &config.logging.level;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("eventsync_client={level},eventsync={level}").into());

    let json = config.logging.format == "json";
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_tracing(&config);

    let credentials: Arc<dyn CredentialStore> = if config.session.persist {
        Arc::new(FileCredentialStore::open(&config.session.store_path)?)
    } else {
        Arc::new(MemoryCredentialStore::new())
    };
    let history = Arc::new(History::new());
    let navigator: Arc<dyn Navigator> = history.clone();

    let state = AppState::new(config, credentials, navigator)?;
    tracing::debug!(
        base_url = %state.config.api.base_url,
        persist = state.config.session.persist,
        "Starting EventSync client v{}",
        env!("CARGO_PKG_VERSION")
    );
    let result = run(cli.command, &state).await;

    if let Some(route) = history.current() {
        tracing::debug!(route = %route, "Final route");
    }
    result
}

fn detail_view(events: Arc<dyn EventsApi>, state: &AppState) -> EventDetailView {
    EventDetailView::new(events, state.credentials().clone(), state.navigator().clone())
}

async fn run(command: Commands, state: &AppState) -> Result<()> {
    let services = &state.services;
    let events: Arc<dyn EventsApi> = services.events.clone();

    match command {
        Commands::Events {
            name,
            date,
            categories,
            page,
        } => {
            let filtered = name.is_some() || date.is_some() || !categories.is_empty();
            let initial = filtered.then(|| FilterRequest {
                name,
                date,
                category_name: (!categories.is_empty()).then_some(categories),
            });

            let mut view = EventListView::with_initial_filter(events, initial);
            view.mount().await;
            if let ListState::Error(message) = view.state() {
                bail!("{}", message);
            }
            if let Err(total_pages) = view.open_page(page - 1).await {
                bail!("Page {} is out of range; there are {} page(s).", page, total_pages);
            }

            match view.state() {
                ListState::Loaded { events, .. } => {
                    print_summaries(events);
                    if let Some(pagination) = view.pagination() {
                        let labels: Vec<String> = pagination
                            .pages
                            .iter()
                            .map(|b| match b.current {
                                true => format!("[{}]", b.label),
                                false => b.label.clone(),
                            })
                            .collect();
                        println!("\nPages: {}", labels.join(" "));
                    }
                }
                ListState::Error(message) => bail!("{}", message),
                ListState::Idle | ListState::Loading => {}
            }
        }

        Commands::Show { id } => {
            let mut view = detail_view(events, state);
            view.load(Some(&id)).await;
            match view.state() {
                DetailState::Ready { event, checked_in } => {
                    println!("{} ({})", event.name, event.event_type);
                    println!("{}", event.description);
                    println!(
                        "When: {} {}-{}",
                        event.date,
                        event.start_time.as_deref().unwrap_or("?"),
                        event.end_time.as_deref().unwrap_or("?")
                    );
                    if let Some(location) = &event.location {
                        println!("Where: {}", location);
                    }
                    if let Some(category) = &event.category {
                        println!("Category: {}", category.name);
                    }
                    println!("Organizer: {} <{}>", event.organizer.name, event.organizer.email);
                    if view.can_check_in() {
                        println!("Checked in: {}", if *checked_in { "yes" } else { "no" });
                    }
                    if let Some(route) = view.edit_route() {
                        println!("Edit: {}", route);
                    }
                }
                DetailState::NotFound => bail!("Event not found."),
                DetailState::Error(message) => bail!("{}", message),
                DetailState::Loading => {}
            }
        }

        Commands::CheckIn { id } => {
            let mut view = detail_view(events, state);
            view.load(Some(&id)).await;
            if let DetailState::Error(message) = view.state() {
                bail!("{}", message);
            }
            match view.toggle_check_in().await {
                Ok(true) => println!("Checked in."),
                Ok(false) => println!("Check-in cancelled."),
                Err(message) => bail!("{}", message),
            }
        }

        Commands::Delete { id, yes } => {
            let mut view = detail_view(events, state);
            view.load(Some(&id)).await;
            if let DetailState::Error(message) = view.state() {
                bail!("{}", message);
            }

            let outcome = if yes {
                view.delete(&AssumeYes).await
            } else {
                view.delete(&StdinPrompter).await
            };
            match outcome {
                DeleteOutcome::Deleted => println!("Event deleted."),
                DeleteOutcome::Cancelled => println!("Nothing deleted."),
                DeleteOutcome::Failed(message) => bail!("{}", message),
            }
        }

        Commands::Create(args) => {
            let form = CreateEvent {
                name: args.name,
                description: args.description,
                location: args.location,
                date: args.date,
                start_time: args.start,
                end_time: args.end,
                event_type: args.event_type,
                ticket_url: args.ticket_url,
                official_site_url: args.site_url,
                online_url: args.online_url,
                category_id: args.category_id,
            };
            let view = EventForm::new(events, state.navigator().clone());
            match view.create(&form).await {
                Ok(id) => println!("Created event {}", id),
                Err(message) => bail!("{}", message),
            }
        }

        Commands::Edit { id, changes } => {
            let Some(uuid) = parse_event_id(&id) else {
                bail!("Invalid event id: {}", id);
            };
            let view = EventForm::new(events, state.navigator().clone());
            let mut form = match view.load_for_edit(Some(&id)).await {
                Ok(form) => form,
                Err(message) => bail!("{}", message),
            };

            if let Some(name) = changes.name {
                form.name = name;
            }
            if let Some(description) = changes.description {
                form.description = description;
            }
            if let Some(date) = changes.date {
                form.date = date;
            }
            if let Some(event_type) = changes.event_type {
                form.event_type = event_type;
            }
            if changes.start.is_some() {
                form.start_time = changes.start;
            }
            if changes.end.is_some() {
                form.end_time = changes.end;
            }
            if changes.location.is_some() {
                form.location = changes.location;
            }

            match view.update(uuid, &form).await {
                Ok(id) => println!("Updated event {}", id),
                Err(message) => bail!("{}", message),
            }
        }

        Commands::Categories => {
            for category in services.categories.fetch_categories().await? {
                println!("{}  {}", category.id, category.name);
            }
        }

        Commands::Mine => {
            let mut view = MyEventsView::new(events);
            view.load().await;
            match view.state() {
                AgendaState::Loaded(events) => print_summaries(events),
                AgendaState::Error(message) => bail!("{}", message),
                AgendaState::Idle | AgendaState::Loading => {}
            }
        }

        Commands::Login { email, password } => {
            let request = LoginRequest {
                email,
                password: read_password(password)?,
            };
            services.auth.login(&request).await?;
            println!("Logged in as {}", request.email);
        }

        Commands::Register {
            name,
            email,
            password,
        } => {
            let request = RegisterRequest {
                name,
                email,
                password: read_password(password)?,
            };
            services.auth.register(&request).await?;
            println!("Account created. You can now log in.");
        }

        Commands::Logout => {
            services.auth.logout()?;
            println!("Logged out.");
        }
    }

    Ok(())
}

//! Command-line console for the dojo admin API.

mod output;
mod prompt;

use anyhow::{anyhow, bail, Context};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use dojo_admin::{
    ActionOutcome, ClientsScreen, InstructorsScreen, ListSynchronizer, PanelSession,
    SubmitOutcome,
};
use dojo_client::{ApiClient, ListSource};
use dojo_core::forms::{ClientField, InstructorField, ResourceForm};
use dojo_core::models::{PhotoUpload, Resource, ResourceId};
use dojo_core::search::Searchable;
use dojo_core::Config;
use prompt::TerminalNotifier;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "dojo=warn,dojo_admin=info,dojo_client=info";

#[derive(Parser)]
#[command(name = "dojoctl", about = "Dojo admin console", version)]
struct Cli {
    /// API base URL (can also be set via DOJO_API_URL env var)
    #[arg(long, env = "DOJO_API_URL", global = true)]
    api_url: Option<String>,

    /// Output lists in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Accept every confirmation without prompting
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Manage clients
    #[command(subcommand)]
    Clients(ClientCommands),
    /// Manage instructors
    #[command(subcommand)]
    Instructors(InstructorCommands),
    /// Show a list and keep it in sync until interrupted
    Watch {
        #[arg(value_enum)]
        resource: ResourceKind,
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Clients,
    Instructors,
}

#[derive(Subcommand)]
enum ClientCommands {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Show {
        id: ResourceId,
    },
    Create {
        #[command(flatten)]
        fields: ClientFields,
        /// Photo file to upload
        #[arg(long)]
        photo: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct ClientFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// DNI or RUC
    #[arg(long)]
    document_type: Option<String>,
    #[arg(long)]
    document: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    cellphome: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Birthday as YYYY-MM-DD
    #[arg(long)]
    birthday: Option<String>,
}

impl ClientFields {
    /// Provided values in form order; the document type comes first so the
    /// document is validated against the right rule.
    fn assignments(&self) -> Vec<(ClientField, &str)> {
        [
            (ClientField::DocumentType, &self.document_type),
            (ClientField::Name, &self.name),
            (ClientField::LastName, &self.last_name),
            (ClientField::Document, &self.document),
            (ClientField::Address, &self.address),
            (ClientField::Cellphome, &self.cellphome),
            (ClientField::Email, &self.email),
            (ClientField::Gender, &self.gender),
            (ClientField::Birthday, &self.birthday),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

#[derive(Subcommand)]
enum InstructorCommands {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Show {
        id: ResourceId,
    },
    Create {
        #[command(flatten)]
        fields: InstructorFields,
        /// Photo file to upload
        #[arg(long)]
        photo: PathBuf,
    },
    /// Edit an instructor; omitted fields keep their stored values
    Update {
        id: ResourceId,
        #[command(flatten)]
        fields: InstructorFields,
        /// Replacement photo; the stored photo is kept when omitted
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Publish or unpublish on the website
    PublishToggle {
        id: ResourceId,
    },
    /// Activate or deactivate
    StatusToggle {
        id: ResourceId,
    },
}

#[derive(Args, Debug, Default)]
struct InstructorFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    specialty: Option<String>,
    #[arg(long)]
    belt_level: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    experience_years: Option<String>,
    #[arg(long)]
    certifications: Option<String>,
    #[arg(long)]
    social_media_facebook: Option<String>,
    #[arg(long)]
    social_media_instagram: Option<String>,
    #[arg(long)]
    social_media_twitter: Option<String>,
    /// active or inactive
    #[arg(long)]
    status: Option<String>,
}

impl InstructorFields {
    fn assignments(&self) -> Vec<(InstructorField, &str)> {
        [
            (InstructorField::Name, &self.name),
            (InstructorField::LastName, &self.last_name),
            (InstructorField::Specialty, &self.specialty),
            (InstructorField::BeltLevel, &self.belt_level),
            (InstructorField::Bio, &self.bio),
            (InstructorField::Email, &self.email),
            (InstructorField::Phone, &self.phone),
            (InstructorField::ExperienceYears, &self.experience_years),
            (InstructorField::Certifications, &self.certifications),
            (InstructorField::SocialMediaFacebook, &self.social_media_facebook),
            (InstructorField::SocialMediaInstagram, &self.social_media_instagram),
            (InstructorField::SocialMediaTwitter, &self.social_media_twitter),
            (InstructorField::Status, &self.status),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

/// Environment config with command-line overrides applied.
fn resolve_config(mut config: Config, api_url: Option<String>, yes: bool) -> Config {
    if let Some(url) = api_url
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
    {
        config.api_url = url;
    }
    config.assume_yes |= yes;
    config
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr),
        )
        .init();
}

fn read_photo(path: &Path) -> anyhow::Result<PhotoUpload> {
    PhotoUpload::from_path(path).with_context(|| format!("reading photo {}", path.display()))
}

/// Turn a submit outcome into the process result, listing violations on rejection.
fn submit_result<F: ResourceForm, R>(
    outcome: SubmitOutcome,
    panel: &PanelSession<F, R>,
) -> anyhow::Result<()> {
    let error = panel.error().unwrap_or(dojo_core::UNKNOWN_ERROR_MESSAGE);
    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Rejected => {
            let violations = panel.form().violations();
            if violations.is_empty() {
                bail!("{}", error)
            }
            bail!("{}\n{}", error, output::violations(&violations))
        }
        SubmitOutcome::Failed => bail!("{}", error),
    }
}

fn action_result(outcome: ActionOutcome, id: ResourceId) -> anyhow::Result<()> {
    match outcome {
        ActionOutcome::Succeeded => Ok(()),
        ActionOutcome::Declined => {
            println!("Cancelado.");
            Ok(())
        }
        ActionOutcome::NotFound => bail!("Instructor {} no encontrado", id),
        ActionOutcome::Failed => bail!("La acción sobre el instructor {} falló", id),
    }
}

fn load_error<R, S>(list: &ListSynchronizer<R, S>) -> anyhow::Result<()>
where
    R: Resource + Searchable,
    S: ListSource<R>,
{
    match list.error() {
        Some(message) => Err(anyhow!("{}", message)),
        None => Ok(()),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Print `list`, then re-print it whenever a polled refresh changes it.
async fn watch<R, S>(
    list: &mut ListSynchronizer<R, S>,
    interval: Duration,
    render: impl Fn(&[R]) -> anyhow::Result<String>,
) -> anyhow::Result<()>
where
    R: Resource + Searchable,
    S: ListSource<R>,
{
    print!("{}", render(list.view())?);
    let mut handle = list.start_polling(interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            changed = list.apply_next_poll(&mut handle) => match changed {
                Some(true) => print!("\n{}", render(list.view())?),
                Some(false) => {}
                None => break,
            },
            _ = &mut ctrl_c => break,
        }
    }
    handle.stop();
    Ok(())
}

async fn run_clients(
    command: ClientCommands,
    api: &ApiClient,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let service = Arc::new(api.clients());
    let mut screen = ClientsScreen::new(service, TerminalNotifier::stdio(config.assume_yes));
    match command {
        ClientCommands::List { search } => {
            screen.load().await;
            load_error(screen.list())?;
            screen.search(search.as_deref().unwrap_or_default());
            let view = screen.list().view();
            if json {
                println!("{}", output::to_json(view)?);
            } else {
                print!("{}", output::clients_table(view, today()));
            }
        }
        ClientCommands::Show { id } => {
            screen.load().await;
            load_error(screen.list())?;
            if !screen.open_view(id) {
                bail!("Cliente {} no encontrado", id);
            }
            let record = screen
                .panel()
                .selected()
                .ok_or_else(|| anyhow!("Cliente {} no encontrado", id))?;
            println!("{}", screen.panel_title());
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        ClientCommands::Create { fields, photo } => {
            screen.open_create();
            for (field, value) in fields.assignments() {
                screen.set_field(field, value)?;
            }
            screen.select_photo(read_photo(&photo)?);
            let outcome = screen.submit().await;
            submit_result(outcome, screen.panel())?;
            if let Some(message) = screen.panel().success() {
                println!("{}", message);
            }
            screen.close_panel();
        }
    }
    Ok(())
}

async fn run_instructors(
    command: InstructorCommands,
    api: &ApiClient,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let service = Arc::new(api.instructors());
    let notifier = TerminalNotifier::stdio(config.assume_yes);
    let mut screen = InstructorsScreen::new(service, notifier, config);
    match command {
        InstructorCommands::List { search } => {
            screen.load().await;
            load_error(screen.list())?;
            screen.search(search.as_deref().unwrap_or_default());
            let view = screen.list().view();
            if json {
                println!("{}", output::to_json(view)?);
            } else {
                print!("{}", output::instructors_table(view));
            }
        }
        InstructorCommands::Show { id } => {
            screen.load().await;
            load_error(screen.list())?;
            if !screen.open_view(id) {
                bail!("Instructor {} no encontrado", id);
            }
            let record = screen
                .panel()
                .selected()
                .ok_or_else(|| anyhow!("Instructor {} no encontrado", id))?;
            println!("{}", screen.panel_title());
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        InstructorCommands::Create { fields, photo } => {
            screen.open_create();
            for (field, value) in fields.assignments() {
                screen.set_field(field, value);
            }
            screen.select_photo(read_photo(&photo)?);
            let outcome = screen.submit().await;
            submit_result(outcome, screen.panel())?;
        }
        InstructorCommands::Update { id, fields, photo } => {
            screen.load().await;
            load_error(screen.list())?;
            if !screen.open_edit(id) {
                bail!("Instructor {} no encontrado", id);
            }
            for (field, value) in fields.assignments() {
                screen.set_field(field, value);
            }
            if let Some(path) = photo {
                screen.select_photo(read_photo(&path)?);
            }
            let outcome = screen.submit().await;
            submit_result(outcome, screen.panel())?;
        }
        InstructorCommands::PublishToggle { id } => {
            screen.load().await;
            load_error(screen.list())?;
            action_result(screen.toggle_publish(id).await, id)?;
        }
        InstructorCommands::StatusToggle { id } => {
            screen.load().await;
            load_error(screen.list())?;
            action_result(screen.toggle_status(id).await, id)?;
        }
    }
    Ok(())
}

async fn run_watch(
    resource: ResourceKind,
    search: Option<String>,
    api: &ApiClient,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let term = search.unwrap_or_default();
    match resource {
        ResourceKind::Clients => {
            let service = Arc::new(api.clients());
            let mut screen =
                ClientsScreen::new(service, TerminalNotifier::stdio(config.assume_yes));
            screen.load().await;
            load_error(screen.list())?;
            screen.search(&term);
            watch(screen.list_mut(), config.poll_interval, |view| {
                if json {
                    output::to_json(view).map(|text| text + "\n")
                } else {
                    Ok(output::clients_table(view, today()))
                }
            })
            .await
        }
        ResourceKind::Instructors => {
            let service = Arc::new(api.instructors());
            let notifier = TerminalNotifier::stdio(config.assume_yes);
            let mut screen = InstructorsScreen::new(service, notifier, config);
            screen.load().await;
            load_error(screen.list())?;
            screen.search(&term);
            watch(screen.list_mut(), config.poll_interval, |view| {
                if json {
                    output::to_json(view).map(|text| text + "\n")
                } else {
                    Ok(output::instructors_table(view))
                }
            })
            .await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        api_url,
        json,
        yes,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    init_tracing();
    let config = resolve_config(Config::from_env(), api_url, yes);
    let api = ApiClient::from_config(&config)?;

    match command {
        Commands::Completions { .. } => Ok(()),
        Commands::Clients(command) => run_clients(command, &api, &config, json).await,
        Commands::Instructors(command) => run_instructors(command, &api, &config, json).await,
        Commands::Watch { resource, search } => {
            run_watch(resource, search, &api, &config, json).await
        }
    }
}

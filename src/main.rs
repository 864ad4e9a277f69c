use std::io::Write;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use roster::api::{HttpUsersGateway, UsersGateway};
use roster::config::{self, Settings};
use roster::console::{parse_command, ConsoleCommand, HELP};
use roster::table::{draft_table, page_summary, users_table};
use roster::view::{RemoveOutcome, SubmitOutcome, UsersView};

#[derive(Parser)]
#[command(
    name = "roster",
    author,
    version,
    about = "Manage users of a remote users API",
    long_about = r#"roster — list, create, edit and delete users held by a remote users API.

Configuration comes from environment variables or a .env file (see `--env-file`):
  API_BASE_URL     base URL of the API (default http://localhost:5000)
  API_TOKEN        bearer token, optional
  USERS_ENDPOINT   collection path (default /users)
  PAGE_SIZE        rows per page: 5, 10 or 20 (default 10)
  DELETE_REFRESH   on-success (default) or always

Examples:
  roster users list --page 1
  roster users create --full-name "Ada Lovelace" --email ada@x.com --username ada --password s3cret --role 2:editor
  roster users edit 5 --full-name "New Name"
  roster console
"#,
    after_help = "Use `roster <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users through the configured API
    #[command(about = "List, create, edit and delete users", long_about = "Each command fetches the current list from the API, performs the mutation and shows the refreshed list.")]
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
    /// Interactive users screen
    #[command(about = "Open the interactive users screen", long_about = "Keeps the list and the edit form open between commands. Type `help` inside the console for the command list.")]
    Console,
    /// Validate configuration and API connectivity
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Print the resolved configuration and try to fetch the users list from the configured API.")]
    CheckConfig,
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List users", long_about = "Fetch and display users. Use `--page` and `--per-page` for pagination; page 0 shows everything.")]
    List {
        /// Page number to display (1-indexed). Use 0 to show all users.
        #[arg(long, short = 'p', default_value = "0")]
        page: usize,
        /// Number of users per page (defaults to PAGE_SIZE)
        #[arg(long)]
        per_page: Option<usize>,
    },
    #[command(about = "Create a user", long_about = "Create a user; the server assigns its id. A duplicate username or email is reported as a conflict.")]
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Role as <id>:<name>, e.g. 2:editor
        #[arg(long)]
        role: String,
    },
    #[command(about = "Edit a user", long_about = "Change fields of an existing user; fields not given keep their current value.")]
    Edit {
        id: i64,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Role as <id>:<name>
        #[arg(long)]
        role: Option<String>,
    },
    #[command(about = "Delete a user", long_about = "Delete a user by id and show the refreshed list.")]
    Delete { id: i64 },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{}", Paint::new(msg.to_string()).red());
    process::exit(1);
}

fn print_users(view: &UsersView, page: usize, per_page: usize) {
    let page = view.page(page, per_page);
    if page.total_count == 0 {
        println!("(empty list)");
        return;
    }
    println!("\n{}", users_table(page.items));
    println!("{}", Paint::new(page_summary(&page)).dim());
    if view.list_is_stale() {
        println!("{}", Paint::new("The list could not be refreshed and may be out of date.").yellow());
    }
}

fn build_view(settings: &Settings) -> UsersView {
    let client = match reqwest::Client::builder()
        .user_agent(format!("roster/{}", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(c) => c,
        Err(e) => fail(format!("Failed to create HTTP client: {}", e)),
    };
    let gateway: Arc<dyn UsersGateway> = Arc::new(HttpUsersGateway::from_settings(client, settings));
    UsersView::new(gateway, settings.delete_refresh)
}

async fn activate_or_exit(view: &mut UsersView) {
    if let Err(e) = view.activate().await {
        tracing::error!(%e, "Initial users fetch failed");
        fail(format!("Failed to load users: {}", e));
    }
}

fn fill_form(view: &mut UsersView, fields: &[(&str, Option<String>)]) {
    for (field, value) in fields {
        if let Some(v) = value {
            if let Err(e) = view.set_field(field, v) {
                fail(e);
            }
        }
    }
}

fn report_submit(outcome: SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Saved(rec) => {
            let status = if rec.is_new() { "saved".to_string() } else { format!("saved (id {})", rec.id) };
            println!("{} '{}' {}", Paint::new("User").green(), rec.username, Paint::new(status).green());
            true
        }
        SubmitOutcome::Conflict(message) => {
            eprintln!("{} {}", Paint::new("Conflict:").red().bold(), message);
            false
        }
        SubmitOutcome::Failed(e) => {
            eprintln!("{}: {}", Paint::new("Saving the user failed").red(), e);
            false
        }
        SubmitOutcome::NotOpen => {
            eprintln!("{}", Paint::new("No form is open; use `new` or `edit <id>`").yellow());
            false
        }
    }
}

fn report_remove(outcome: RemoveOutcome, id: i64) -> bool {
    match outcome {
        RemoveOutcome::Deleted => {
            println!("{} {} {}", Paint::new("User").green(), id, Paint::new("deleted").green());
            true
        }
        RemoveOutcome::Failed(e) => {
            eprintln!("{} {}: {}", Paint::new("Failed to delete user").red(), id, e);
            false
        }
        RemoveOutcome::InvalidId(id) => {
            eprintln!("{} {}", Paint::new("Not a persisted user id:").red(), id);
            false
        }
    }
}

async fn run_users(settings: &Settings, sub: UserCommands) {
    let mut view = build_view(settings);
    activate_or_exit(&mut view).await;
    match sub {
        UserCommands::List { page, per_page } => {
            print_users(&view, page, per_page.unwrap_or(settings.page_size));
        }
        UserCommands::Create { full_name, email, username, password, role } => {
            view.start_create();
            fill_form(&mut view, &[
                ("fullName", Some(full_name)),
                ("email", Some(email)),
                ("username", Some(username)),
                ("password", Some(password)),
                ("role", Some(role)),
            ]);
            if !report_submit(view.save().await) {
                process::exit(1);
            }
            print_users(&view, 0, settings.page_size);
        }
        UserCommands::Edit { id, full_name, email, username, password, role } => {
            if !view.start_edit_by_id(id) {
                fail(format!("User {} not found", id));
            }
            fill_form(&mut view, &[
                ("fullName", full_name),
                ("email", email),
                ("username", username),
                ("password", password),
                ("role", role),
            ]);
            if !report_submit(view.save().await) {
                process::exit(1);
            }
            print_users(&view, 0, settings.page_size);
        }
        UserCommands::Delete { id } => {
            if !report_remove(view.remove(id).await, id) {
                process::exit(1);
            }
            print_users(&view, 0, settings.page_size);
        }
    }
}

fn prompt(view: &UsersView) {
    let session = view.session();
    let label = if !session.is_open() {
        "users> ".to_string()
    } else if session.draft().is_new() {
        "users [new]> ".to_string()
    } else {
        format!("users [edit {}]> ", session.draft().id)
    };
    print!("{}", Paint::new(label).cyan().bold());
    let _ = std::io::stdout().flush();
}

/// Show `message` as an alert and wait for the user to acknowledge it.
async fn alert(lines: &mut Lines<BufReader<Stdin>>, message: &str) {
    println!("{} {}", Paint::new("!").red().bold(), Paint::new(message).red());
    print!("{}", Paint::new("Press Enter to continue").dim());
    let _ = std::io::stdout().flush();
    let _ = lines.next_line().await;
}

async fn run_console(settings: &Settings) {
    let mut view = build_view(settings);
    activate_or_exit(&mut view).await;

    let mut page = 1;
    let mut per_page = settings.page_size;
    print_users(&view, page, per_page);
    println!("{}", Paint::new("Type `help` for commands.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&view);
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(%e, "Failed to read from stdin");
                break;
            }
        };
        let cmd = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", Paint::new(e.to_string()).red());
                continue;
            }
        };
        match cmd {
            ConsoleCommand::List => {
                if let Err(e) = view.refresh().await {
                    eprintln!("{}: {}", Paint::new("Failed to load users").red(), e);
                }
                print_users(&view, page, per_page);
            }
            ConsoleCommand::Page(n) => {
                page = n;
                print_users(&view, page, per_page);
            }
            ConsoleCommand::PageSize(n) => {
                per_page = n;
                page = 1;
                print_users(&view, page, per_page);
            }
            ConsoleCommand::New => {
                view.start_create();
                println!("{}", draft_table(view.session().draft()));
            }
            ConsoleCommand::Edit(id) => {
                if view.start_edit_by_id(id) {
                    println!("{}", draft_table(view.session().draft()));
                } else {
                    eprintln!("{} {}", Paint::new("No listed user with id").red(), id);
                }
            }
            ConsoleCommand::Set { field, value } => {
                if !view.session().is_open() {
                    eprintln!("{}", Paint::new("No form is open; use `new` or `edit <id>`").yellow());
                } else if let Err(e) = view.set_field(&field, &value) {
                    eprintln!("{}", Paint::new(e.to_string()).red());
                }
            }
            ConsoleCommand::Draft => {
                if view.session().is_open() {
                    println!("{}", draft_table(view.session().draft()));
                } else {
                    println!("(no form open)");
                }
            }
            ConsoleCommand::Save => {
                if !view.session().is_open() {
                    eprintln!("{}", Paint::new("No form is open; use `new` or `edit <id>`").yellow());
                    continue;
                }
                match view.save().await {
                    SubmitOutcome::Conflict(message) => alert(&mut lines, &message).await,
                    SubmitOutcome::Failed(e) => alert(&mut lines, &format!("Saving the user failed: {}", e)).await,
                    outcome => {
                        if report_submit(outcome) {
                            print_users(&view, page, per_page);
                        }
                    }
                }
            }
            ConsoleCommand::Cancel => view.cancel(),
            ConsoleCommand::Delete(id) => {
                let outcome = view.remove(id).await;
                report_remove(outcome, id);
                print_users(&view, page, per_page);
            }
            ConsoleCommand::Help => println!("{}", HELP),
            ConsoleCommand::Quit => break,
        }
    }
}

async fn check_config(settings: &Settings) {
    println!("{} {}", Paint::new("API_BASE_URL").bold(), settings.api_base_url);
    println!("{} {}", Paint::new("USERS_ENDPOINT").bold(), settings.users_endpoint);
    println!("{} {}", Paint::new("API_TOKEN").bold(), if settings.api_token.is_empty() { "(not set)" } else { "(set)" });
    println!("{} {}", Paint::new("PAGE_SIZE").bold(), settings.page_size);
    println!("{} {:?}", Paint::new("DELETE_REFRESH").bold(), settings.delete_refresh);

    let mut view = build_view(settings);
    match view.activate().await {
        Ok(()) => {
            println!("{}", Paint::new(format!("Configuration looks valid ({} users returned)", view.records().len())).green());
        }
        Err(e) => fail(format!("Configuration appears invalid: {}", e)),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        roster::api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let settings = Settings::from_env();

    match cli.command {
        Commands::Users { sub } => run_users(&settings, sub).await,
        Commands::Console => run_console(&settings).await,
        Commands::CheckConfig => check_config(&settings).await,
    }
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Client;

#[derive(Parser)]
#[command(name = "advising")]
#[command(about = "Student advising client - drive the advising pages from a terminal", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Client storage file holding the session and theme preference
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store or inspect the signed-in session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Clear all client state
    Logout,
    /// Show or toggle the light/dark theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Load a page and print what it renders
    Page {
        #[command(subcommand)]
        page: PageCommand,
    },
    /// Request password reset instructions
    ForgotPassword {
        #[arg(long)]
        matric: String,
    },
    /// Record a grade for a student
    SubmitGrade {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        course_id: String,
        #[arg(long)]
        grade: String,
        #[arg(long)]
        semester: String,
        /// Grade points; omit to send none
        #[arg(long)]
        gpa: Option<String>,
    },
    /// Save an advising note for an advisee
    AddNote {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        content: String,
    },
    /// Email an advisee's guardian
    ContactGuardian {
        #[arg(long)]
        advisee_id: String,
        /// Defaults to "Regarding your ward, <name>"
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
        #[arg(long)]
        urgent: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a session issued by the login flow
    Set {
        #[arg(long)]
        token: String,
        /// `student` or `lecturer`
        #[arg(long)]
        role: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Print the stored session
    Show,
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
enum PageCommand {
    /// Public resource catalog
    Resources {
        #[arg(long)]
        category: Option<String>,
    },
    /// Lecturer dashboard, optionally drilling into one advisee
    LecturerDashboard {
        #[arg(long)]
        results: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        details: Option<String>,
    },
    LecturerProfile,
    /// Student courses overview
    Courses,
    StudentProfile,
    StudentResults,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Client::open(cli.config, cli.storage)?;

    match cli.command {
        Commands::Session { action } => match action {
            SessionAction::Set {
                token,
                role,
                name,
                account_id,
            } => commands::session::set(&client, token, &role, name, account_id)?,
            SessionAction::Show => commands::session::show(&client)?,
        },
        Commands::Logout => commands::session::logout(&client).await?,
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::session::theme(&client)?,
            ThemeAction::Toggle => commands::session::toggle_theme(&client).await?,
        },
        Commands::Page { page } => match page {
            PageCommand::Resources { category } => {
                commands::page::resources(&client, category).await?
            }
            PageCommand::LecturerDashboard {
                results,
                notes,
                details,
            } => commands::page::lecturer_dashboard(&client, results, notes, details).await?,
            PageCommand::LecturerProfile => commands::page::lecturer_profile(&client).await?,
            PageCommand::Courses => commands::page::student_courses(&client).await?,
            PageCommand::StudentProfile => commands::page::student_profile(&client).await?,
            PageCommand::StudentResults => commands::page::student_results(&client).await?,
        },
        Commands::ForgotPassword { matric } => {
            commands::action::forgot_password(&client, &matric).await?
        }
        Commands::SubmitGrade {
            student_id,
            course_id,
            grade,
            semester,
            gpa,
        } => {
            let fields = commands::action::GradeFields {
                student_id,
                course_id,
                grade,
                semester,
                gpa,
            };
            commands::action::submit_grade(&client, fields).await?
        }
        Commands::AddNote {
            student_id,
            content,
        } => commands::action::add_note(&client, &student_id, &content).await?,
        Commands::ContactGuardian {
            advisee_id,
            subject,
            message,
            urgent,
        } => {
            commands::action::contact_guardian(&client, &advisee_id, subject, &message, urgent)
                .await?
        }
    }

    Ok(())
}

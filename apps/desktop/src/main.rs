use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_api_url},
    render, HttpStudentApi, Outcome, PageView, StudentForm, StudentsPage,
};
use shared::domain::{Student, StudentId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "alunos", about = "List and edit student records")]
struct Cli {
    /// Collection endpoint; overrides alunos.toml and ALUNOS_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        /// Print the table body as HTML rows instead of text.
        #[arg(long)]
        html: bool,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        class: String,
        #[arg(long)]
        course: String,
        #[arg(long)]
        enrollment: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        enrollment: Option<String>,
    },
    Delete {
        id: i64,
    },
}

struct TerminalView {
    html: bool,
}

impl PageView for TerminalView {
    fn show_rows(&mut self, students: &[Student]) {
        if self.html {
            print!("{}", render::table_rows_html(students));
        } else {
            print!("{}", render::table_text(students));
        }
    }

    fn show_form(&mut self, form: &StudentForm) {
        tracing::debug!(editing = ?form.editing, "form updated");
    }

    fn alert(&mut self, message: &str) {
        eprintln!("alert: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url.as_deref() {
        settings.api_url = normalize_api_url(api_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = HttpStudentApi::new(&settings.api_url)
        .with_context(|| format!("cannot use collection endpoint '{}'", settings.api_url))?;
    let html = matches!(cli.command, Command::List { html: true });
    let mut page = StudentsPage::new(api, TerminalView { html });

    let outcome = match cli.command {
        Command::List { .. } => page.start().await,
        Command::Create {
            name,
            class,
            course,
            enrollment,
        } => {
            page.set_form(StudentForm {
                name,
                class_group: class,
                course,
                enrollment,
                editing: None,
            });
            page.submit().await
        }
        Command::Edit {
            id,
            name,
            class,
            course,
            enrollment,
        } => match page.begin_edit(StudentId(id)).await {
            Outcome::Completed => {
                let form = page.form_mut();
                overlay(&mut form.name, name);
                overlay(&mut form.class_group, class);
                overlay(&mut form.course, course);
                overlay(&mut form.enrollment, enrollment);
                page.submit().await
            }
            other => other,
        },
        Command::Delete { id } => page.delete(StudentId(id)).await,
    };

    Ok(match outcome {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::Invalid => ExitCode::from(2),
        Outcome::Failed => ExitCode::FAILURE,
    })
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    connect, load_settings, render::FlashBanner, DetailRender, FormRender, ListBody, ListRender,
    Session, Settlement, View,
};
use shared::{
    domain::{EditableField, EmployeeId, Gender},
    protocol::{create_employee_route, edit_employee_route, employee_route, employees_route},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse and maintain the employee roster")]
struct Cli {
    /// Overrides the server named in roster.toml or the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        gender: Option<Gender>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        gender: Option<Gender>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    info!(server_url = %settings.server_url, "using roster server");

    match cli.command {
        Command::List => {
            let session = connect(&settings, employees_route()).await?;
            print_view(&session);
        }
        Command::Show { id } => {
            let session = connect(&settings, &employee_route(EmployeeId(id))).await?;
            print_view(&session);
        }
        Command::Create {
            name,
            email,
            gender,
        } => {
            let mut session = connect(&settings, create_employee_route()).await?;
            {
                let form = session.form_mut()?;
                form.set_name(name);
                form.set_email(email);
                form.set_gender(gender);
            }
            submit_form(&mut session).await?;
        }
        Command::Edit {
            id,
            name,
            email,
            gender,
        } => {
            let mut session = connect(&settings, &edit_employee_route(EmployeeId(id))).await?;
            {
                let form = session.form_mut()?;
                if let Some(name) = name {
                    form.set_name(name);
                }
                if let Some(email) = email {
                    form.set_email(email);
                }
                if gender.is_some() {
                    form.set_gender(gender);
                }
                if !form.is_dirty() {
                    println!("Nothing to update.");
                    return Ok(());
                }
            }
            submit_form(&mut session).await?;
        }
        Command::Delete { id, yes } => {
            let mut session = connect(&settings, employees_route()).await?;
            let Some(prompt) = session.request_delete(EmployeeId(id))? else {
                bail!("a delete for employee {id} is already in progress");
            };
            if !yes && !confirm(prompt.message)? {
                session.decline_delete()?;
                debug!(employee_id = id, "delete declined");
                println!("Delete cancelled.");
                return Ok(());
            }
            match session.confirm_delete().await? {
                Some(Settlement::Failed { message }) => {
                    print_view(&session);
                    bail!(message);
                }
                Some(_) => print_view(&session),
                None => bail!("no delete was awaiting confirmation"),
            }
        }
    }

    Ok(())
}

async fn submit_form(session: &mut Session) -> Result<()> {
    let settlement = session
        .submit()
        .await?
        .ok_or_else(|| anyhow!("a submission is already in flight"))?;
    match settlement {
        Settlement::Navigated { .. } => {
            print_view(session);
            Ok(())
        }
        Settlement::Rejected(_) | Settlement::Failed { .. } => {
            print_view(session);
            bail!("the employee was not saved")
        }
        Settlement::Stale => bail!("the answer arrived for a view that is no longer shown"),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("reading confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn print_view(session: &Session) {
    match session.view() {
        View::List(list) => print_list(&list.render()),
        View::Detail(detail) => print_detail(&detail.render()),
        View::Form(form) => print_form(&form.render()),
    }
}

fn print_banners(banners: &[FlashBanner]) {
    for banner in banners {
        println!("[{:?}] {}", banner.kind, banner.message);
    }
}

fn print_list(render: &ListRender) {
    println!("{}", render.heading);
    print_banners(&render.banners);
    match &render.body {
        ListBody::Empty {
            message,
            call_to_action,
        } => {
            println!("{message}");
            println!("{} ({})", call_to_action.label, call_to_action.href);
        }
        ListBody::Table { rows } => {
            println!(
                "{:>6}  {:<24} {:<32} {:<8} {}",
                "ID", "Name", "Email", "Gender", "Created"
            );
            for row in rows {
                println!(
                    "{:>6}  {:<24} {:<32} {:<8} {}",
                    row.id, row.name, row.email, row.gender, row.created
                );
            }
        }
    }
}

fn print_detail(render: &DetailRender) {
    println!("{}", render.heading);
    print_banners(&render.banners);
    println!("Name: {}", render.name);
    println!("Email: {}", render.email);
    println!("Gender: {}", render.gender);
    println!("{}: {}", render.created_at.label, render.created_at.display);
    println!("{}: {}", render.updated_at.label, render.updated_at.display);
}

fn print_form(render: &FormRender) {
    println!("{}", render.heading);
    print_banners(&render.banners);
    if let Some(failure) = &render.failure {
        println!("{failure}");
    }
    for field in EditableField::ALL {
        let Some(input) = render.input(field) else {
            continue;
        };
        println!("{}: {}", input.label, input.value);
        if let Some(error) = &input.error {
            println!("  {error}");
        }
    }
}

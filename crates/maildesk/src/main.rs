//! `maildesk` - command-line front end for the local mail engine.
//!
//! Runs one command per invocation against the JSON store in the user data
//! directory.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use maildesk_core::{
    ComposeRequest, Folder, JsonStore, MailConfig, MailMessage, MailOrchestrator, SendMode,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maildesk=info,maildesk_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = MailConfig::load(config_path()).context("Failed to load configuration")?;
    let data_dir = data_dir();
    info!("Starting maildesk with data in {}", data_dir.display());
    let store = JsonStore::open(&data_dir).context("Failed to open mail store")?;
    let mut mail = MailOrchestrator::new(store, config).context("Failed to load mail data")?;

    if cli.command.needs_session() {
        sign_in(&mut mail, cli.user.as_deref(), cli.secret.as_deref())?;
    }
    run(&mut mail, cli.command)?;
    if mail.is_authenticated() {
        mail.logout()?;
    }
    Ok(())
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("maildesk")
        .join("config.json")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("maildesk")
}

fn sign_in(
    mail: &mut MailOrchestrator<JsonStore>,
    email: Option<&str>,
    secret: Option<&str>,
) -> Result<()> {
    let email = email.context("No account given; use --user or MAILDESK_USER")?;
    let secret = secret.context("No secret given; use --secret or MAILDESK_SECRET")?;
    if !mail.login(email, secret)? {
        bail!("Sign-in failed for {email}");
    }
    Ok(())
}

fn run(mail: &mut MailOrchestrator<JsonStore>, command: Command) -> Result<()> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            if mail.create_account(&name, &email, &password)? {
                println!("Account created: {email}");
            } else {
                bail!("An account already exists for {email}");
            }
        }
        Command::Send {
            to,
            subject,
            body,
            priority,
        } => {
            let request = ComposeRequest::new(to, subject, body).with_priority(priority);
            let id = mail.compose(request, SendMode::Now)?;
            println!("Sent {id}");
        }
        Command::Draft { subject, body, to } => {
            let id = mail.compose(ComposeRequest::new(to, subject, body), SendMode::Draft)?;
            println!("Saved draft {id}");
        }
        Command::List { folder } => {
            let mailbox = mail.open_folder(folder)?;
            println!("{folder} ({} messages, {} unread)", mailbox.len(), mailbox.unread_count());
            print_messages(mailbox.messages());
        }
        Command::Priority { folder } => print_messages(&mail.messages_by_priority(folder)),
        Command::Recent { limit } => print_messages(&mail.organize_by_timestamp(limit)),
        Command::Read { id } => {
            mail.mark_read(id)?;
            if let Some((folder, message)) = mail.find_message(id) {
                println!("Folder:   {folder}");
                println!("From:     {}", message.sender);
                println!("To:       {}", message.receiver);
                println!("Subject:  {}", message.subject);
                println!("Priority: {}", message.priority);
                println!("Date:     {}", message.timestamp.format("%Y-%m-%d %H:%M"));
                println!();
                println!("{}", message.body);
            }
        }
        Command::Delete { id, folder } => {
            mail.delete(id, folder)?;
            println!("Moved {id} to Trash");
        }
        Command::Important { id } => {
            mail.mark_important(id)?;
            println!("Moved {id} to Important");
        }
        Command::Spam { id } => {
            mail.mark_spam(id)?;
            println!("Moved {id} to Spam");
        }
        Command::Search { query } => {
            let hits = mail.search(&query);
            if hits.is_empty() {
                println!("No messages match \"{query}\"");
            }
            for (folder, message) in &hits {
                println!("[{folder}] {}", summary(message));
            }
        }
        Command::EmptyTrash => {
            let removed = mail.empty_trash()?;
            println!("Removed {removed} messages from Trash");
        }
        Command::Contacts => {
            for contact in mail.contacts() {
                println!("{}", contact.display());
            }
            let recent = mail.recent_contacts();
            if !recent.is_empty() {
                println!("Recently contacted: {}", recent.join(", "));
            }
        }
        Command::FindContact { query } => {
            let found = mail.find_contacts(&query);
            if found.is_empty() {
                println!("No contacts match \"{query}\"");
            }
            for contact in found {
                println!("{}", contact.display());
            }
        }
        Command::AddContact { name, email, phone } => {
            mail.add_contact(&name, &email, phone.as_deref())?;
            println!("Added contact {name}");
        }
        Command::Connect { email: peer } => {
            if mail.connect(&peer)? {
                println!("Connected with {peer}");
            } else {
                bail!("Cannot connect with {peer}");
            }
        }
        Command::Mutuals { email: peer } => {
            let mutuals = mail.mutual_connections(&peer);
            if mutuals.is_empty() {
                println!("No mutual connections with {peer}");
            }
            for (n, address) in mutuals.iter().enumerate() {
                println!("{}. {address}", n + 1);
            }
        }
        Command::Trust { email: sender } => {
            println!("Spam score for {sender}: {}%", mail.spam_probability(&sender)?);
        }
        Command::Stats => {
            let stats = mail.stats();
            println!("Users: {}", stats.users);
            for folder in Folder::ALL {
                if let Some(s) = stats.folder(folder) {
                    println!("{folder}: {} ({} unread)", s.count, s.unread);
                }
            }
            println!("Scheduled: {}", stats.scheduled);
            println!("Incoming: {}", stats.incoming);
            println!("High-priority: {}", stats.priority);
        }
        Command::Config { key } => match key {
            Some(key) => match mail.config().value(&key) {
                Some(value) => println!("{key} = {value}"),
                None => bail!("Unknown setting `{key}`"),
            },
            None => println!("{}", serde_json::to_string_pretty(mail.config())?),
        },
    }
    Ok(())
}

fn summary(message: &MailMessage) -> String {
    format!(
        "{} {} p{} {:<24} {}",
        message.id,
        if message.is_read { " " } else { "*" },
        message.priority,
        message.sender,
        message.subject
    )
}

fn print_messages(messages: &[MailMessage]) {
    for message in messages {
        println!("{}", summary(message));
    }
}

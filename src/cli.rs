//! Command-line front end.
//!
//! One-shot commands cold-start the controller from the file store, apply a
//! single operation and print the resulting phase as JSON. `shell` keeps one
//! controller alive and reads commands line by line, so in-memory-only
//! transitions such as the sign-up view toggle can be chained.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use cb_app::usecases::{AuthFlowError, PhaseError};
use cb_app::App;
use cb_core::{AppPhase, Profile, SignupMethod};

#[derive(Parser, Debug)]
#[command(name = "coffeebrew")]
#[command(version, about = "CoffeeBrew app shell")]
pub struct Cli {
    /// Config file. Defaults to config.toml inside the data directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory for stored state and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the phase a cold start resolves to
    Status,
    /// Show the splash screen, then resolve the phase
    Launch,
    /// Finish the onboarding walkthrough
    CompleteOnboarding,
    /// Switch the auth screen to sign-up
    SignupView,
    /// Switch the auth screen back to sign-in
    SigninView,
    /// Sign in with email and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Continue without an account
    Guest,
    /// Create an account with email and password
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Create an account through google, apple or facebook
    Social {
        #[arg(value_parser = parse_provider)]
        provider: SignupMethod,
    },
    Logout,
    BackToOnboarding,
    /// Clear every stored key and start over
    Restart,
    /// Change fields of the current profile
    UpdateProfile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Interactive session over a single controller
    Shell,
}

fn parse_provider(raw: &str) -> Result<SignupMethod, String> {
    raw.parse::<SignupMethod>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// Parse one line typed into the shell.
///
/// Words split on whitespace. Quote a value to keep its spaces, e.g.
/// `update-profile --display-name "Head Barista"`.
pub fn parse_shell_line(line: &str) -> Result<Command> {
    let words = split_words(line)?;
    ShellLine::try_parse_from(words)
        .map(|parsed| parsed.command)
        .map_err(|err| anyhow!(err.render().to_string()))
}

/// Single quotes are literal. Elsewhere a backslash escapes the next character.
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), _) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => bail!("line ends with a dangling backslash"),
            },
            (Some(_), _) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, _) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// What every command prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub phase: AppPhase,
    pub screen: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// Set when the operation went through but storage did not fully agree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub struct Session {
    app: App,
}

impl Session {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Leave `Splash`, optionally waiting out the splash timer.
    pub async fn start(&self, with_splash: bool) -> AppPhase {
        if with_splash {
            self.app.launch.execute().await
        } else {
            self.app.controller.resolve_startup_phase().await
        }
    }

    pub async fn execute(&self, command: &Command) -> Result<CommandOutput> {
        let controller = &self.app.controller;

        let warning = match command {
            Command::Status | Command::Launch | Command::Shell => None,
            Command::CompleteOnboarding => {
                controller.complete_onboarding().await?;
                None
            }
            Command::SignupView => {
                controller.navigate_to_signup().await?;
                None
            }
            Command::SigninView => {
                controller.back_to_signin().await?;
                None
            }
            Command::SignIn { email, password } => {
                auth_warning(self.app.sign_in.with_password(email, password).await)?
            }
            Command::Guest => auth_warning(self.app.sign_in.as_guest().await)?,
            Command::SignUp {
                email,
                password,
                confirm,
            } => auth_warning(self.app.sign_up.with_email(email, password, confirm).await)?,
            Command::Social { provider } => {
                auth_warning(self.app.sign_up.with_provider(*provider).await)?
            }
            Command::Logout => {
                controller.logout().await?;
                None
            }
            Command::BackToOnboarding => {
                controller.back_to_onboarding().await?;
                None
            }
            Command::Restart => controller
                .restart()
                .await?
                .storage_error
                .map(|err| format!("stored state was not fully cleared: {err}")),
            Command::UpdateProfile {
                email,
                display_name,
            } => {
                let mut profile = controller.profile().await.unwrap_or_default();
                if let Some(email) = email {
                    profile.email = Some(email.clone());
                }
                if let Some(display_name) = display_name {
                    profile.display_name = Some(display_name.clone());
                }
                controller.update_profile(profile).await?;
                None
            }
        };

        let snapshot = controller.snapshot().await;
        Ok(CommandOutput {
            phase: snapshot.phase,
            screen: snapshot.phase.screen_name(),
            profile: snapshot.profile,
            warning,
        })
    }
}

/// A profile that failed to save still leaves the user signed in.
fn auth_warning(result: Result<AppPhase, AuthFlowError>) -> Result<Option<String>> {
    match result {
        Ok(_) => Ok(None),
        Err(AuthFlowError::Phase(PhaseError::ProfileNotPersisted(err))) => {
            warn!(error = %err, "signed in without a saved profile");
            Ok(Some(format!("signed in, but the profile was not saved: {err}")))
        }
        Err(err) => Err(err.into()),
    }
}

/// Run one command, or the interactive shell, and print to stdout.
pub async fn run(session: &Session, command: Command) -> Result<()> {
    if command == Command::Shell {
        session.start(false).await;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        return run_shell(session, stdin, &mut std::io::stdout()).await;
    }

    session.start(command == Command::Launch).await;
    let output = session.execute(&command).await?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

/// Read commands line by line until EOF or `exit`, one JSON reply per line.
///
/// Command failures are printed as `{"error": ...}` and do not end the
/// session.
pub async fn run_shell<R, W>(session: &Session, reader: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write_line(out, &session.execute(&Command::Status).await?)?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let reply = match parse_shell_line(line) {
            Ok(Command::Shell | Command::Launch) => {
                Err(anyhow!("`{line}` is not available inside the shell"))
            }
            Ok(command) => session.execute(&command).await,
            Err(err) => Err(err),
        };

        match reply {
            Ok(output) => write_line(out, &output)?,
            Err(err) => write_line(out, &serde_json::json!({ "error": format!("{err:#}") }))?,
        }
    }

    Ok(())
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(value)?)?;
    out.flush()?;
    Ok(())
}

//! Terminal front end: a stdin/stdout REPL driving one [`Navigator`].
//!
//! Rendered plan output goes to stdout; prompts, progress and errors go to
//! stderr, next to the tracing output.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::str::FromStr;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::NavigatorError;
use crate::plan::AdaptationRequest;
use crate::present::{View, banner, select};
use crate::session::{Navigator, Outcome, PendingKind, RoleChoice, Snapshot, Stage};

/// Delay between revealed progress steps while a request is pending.
const STEP_INTERVAL: Duration = Duration::from_millis(1200);

const HELP: &str = "\
Commands:
  roles                          list the offered roles
  role <name|number>             pick a listed role
  custom <text>                  type a custom dream role
  github <user>                  set the GitHub username (optional)
  resume <text>                  append a line to the resume text
  clear                          clear the resume text
  sample                         load the sample resume
  upload <path>                  upload a PDF resume
  generate                       analyze the profile and build a plan
  view <skills|gaps|roadmap|project>
  adapt [completed missed confidence [reason]]
                                 re-plan after falling behind (once)
  reset                          start over
  dismiss                        clear the error message
  status                         show the current session
  help                           show this help
  quit                           exit";

type Lines = Pin<Box<dyn Stream<Item = String> + Send>>;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Roles,
    Role(String),
    Custom(String),
    Github(String),
    Resume(String),
    Clear,
    Sample,
    Upload(PathBuf),
    Generate,
    View(View),
    Adapt(AdaptationRequest),
    Reset,
    Dismiss,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("usage: {word} <{what}>"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "roles" => Ok(Self::Roles),
            "role" => required("name|number").map(Self::Role),
            "custom" => required("text").map(Self::Custom),
            "github" => Ok(Self::Github(rest.to_string())),
            "resume" => Ok(Self::Resume(rest.to_string())),
            "clear" => Ok(Self::Clear),
            "sample" => Ok(Self::Sample),
            "upload" => required("path").map(|p| Self::Upload(PathBuf::from(p))),
            "generate" | "submit" => Ok(Self::Generate),
            "view" => rest.parse().map(Self::View),
            "adapt" => parse_adapt(rest).map(Self::Adapt),
            "reset" => Ok(Self::Reset),
            "dismiss" => Ok(Self::Dismiss),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "/quit" => Ok(Self::Quit),
            other => Err(format!("unknown command {other:?}; type `help`")),
        }
    }
}

/// `adapt` alone is the missed-week demo; otherwise the numbers come first.
/// Range checks are left to the navigator so the error is surfaced there.
fn parse_adapt(args: &str) -> Result<AdaptationRequest, String> {
    if args.is_empty() {
        return Ok(AdaptationRequest::missed_week());
    }
    const USAGE: &str = "usage: adapt [completed missed confidence [reason]]";

    let mut parts = args.splitn(4, char::is_whitespace);
    let mut number = || -> Result<u32, String> {
        parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| USAGE.to_string())
    };
    let days_completed = number()?;
    let days_missed = number()?;
    let confidence = u8::try_from(number()?).map_err(|_| USAGE.to_string())?;
    let reason = parts.next().map(str::trim).unwrap_or_default();

    Ok(AdaptationRequest {
        days_completed,
        days_missed,
        confidence,
        reason: if reason.is_empty() {
            AdaptationRequest::missed_week().reason
        } else {
            reason.to_string()
        },
    })
}

/// Read a resume file for upload, returning its bytes and bare file name.
pub async fn read_upload(path: &Path) -> std::io::Result<(Vec<u8>, String)> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    Ok((bytes, filename))
}

/// Resolve `role <name|number>` against the offered roles (1-based, case-insensitive).
pub fn resolve_role<'a>(roles: &'a [String], arg: &str) -> Option<&'a str> {
    if let Ok(n) = arg.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| roles.get(i)).map(String::as_str);
    }
    roles
        .iter()
        .find(|r| r.eq_ignore_ascii_case(arg.trim()))
        .map(String::as_str)
}

/// Numbered role list, with the current pick marked.
pub fn render_roles(roles: &[String], choice: &RoleChoice) -> String {
    let mut out = String::new();
    for (i, role) in roles.iter().enumerate() {
        let mark = match choice {
            RoleChoice::Listed(r) if r == role => "*",
            _ => " ",
        };
        out.push_str(&format!("{mark} {:>2}. {role}\n", i + 1));
    }
    let custom = match choice {
        RoleChoice::Custom(text) => format!("* custom: {text}"),
        _ => "  custom: (type `custom <role>`)".to_string(),
    };
    out.push_str(&custom);
    out
}

/// Summary of the session, shaped by its stage.
pub fn render_status(snap: &Snapshot) -> String {
    let mut out = format!("Stage: {}\n", snap.stage);
    match snap.stage {
        Stage::CollectingInput => {
            let draft = &snap.draft;
            let lines = draft.resume_text.lines().count();
            out.push_str(&format!(
                "Resume: {} ({lines} lines)\n",
                if draft.resume_text.trim().is_empty() { "empty" } else { "filled" }
            ));
            if let Some(upload) = &draft.upload {
                out.push_str(&format!("Upload: {upload}\n"));
            }
            let role = draft.role.effective();
            out.push_str(&format!(
                "Dream role: {}\n",
                if role.is_empty() { "(none)" } else { role }
            ));
            if !draft.github_username.trim().is_empty() {
                out.push_str(&format!("GitHub: {}\n", draft.github_username.trim()));
            }
        }
        Stage::AwaitingGeneration | Stage::AwaitingAdaptation => {
            if let Some(kind) = snap.stage.pending_kind() {
                out.push_str(&format!("{}\n", kind.headline()));
            }
        }
        Stage::DisplayingResults => {
            if let Some(req) = &snap.adaptation_request {
                out.push_str(&format!(
                    "Adapted: {} done, {} missed, confidence {}/5\n",
                    req.days_completed, req.days_missed, req.confidence
                ));
            } else if snap.adaptation_offered() {
                out.push_str("Adaptation available: `adapt`\n");
            }
        }
    }
    if let Some(error) = &snap.error {
        out.push_str(&format!("Error: {error}\n"));
    }
    out.trim_end().to_string()
}

/// Banner, view tabs, and the selected view. `None` outside the results stage.
pub fn render_results(snap: &Snapshot, view: View) -> Option<String> {
    if snap.stage != Stage::DisplayingResults {
        return None;
    }
    let plan = snap.plan.as_ref()?;
    let adaptation = snap.adaptation.as_ref();

    let tabs: Vec<String> = View::ALL
        .iter()
        .map(|v| if *v == view { format!("[{v}]") } else { v.to_string() })
        .collect();
    Some(format!(
        "{}\n\n{}\n\n{}",
        banner(plan, adaptation),
        tabs.join("  "),
        select(plan, adaptation, view)
    ))
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented terminal session.
pub struct Cli {
    navigator: Navigator,
    view: View,
}

impl Cli {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            view: View::default(),
        }
    }

    /// Read commands from stdin until EOF or `quit`.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut lines = stdin_lines();
        eprintln!("Type `help` for commands.");
        eprint!("> ");

        while let Some(line) = lines.next().await {
            if line.is_empty() {
                eprint!("> ");
                continue;
            }
            match line.parse::<Command>() {
                Ok(cmd) => {
                    if let Flow::Quit = self.handle(cmd, &mut lines).await? {
                        break;
                    }
                }
                Err(usage) => eprintln!("{usage}"),
            }
            eprint!("> ");
        }
        Ok(())
    }

    async fn handle(&mut self, cmd: Command, lines: &mut Lines) -> anyhow::Result<Flow> {
        let show_results = matches!(
            cmd,
            Command::Generate | Command::Adapt(_) | Command::View(_)
        );
        let nav = &self.navigator;
        let result: Result<(), NavigatorError> = match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                eprintln!("{HELP}");
                Ok(())
            }
            Command::Status => {
                println!("{}", render_status(&nav.snapshot().await));
                Ok(())
            }
            Command::Roles => {
                let snap = nav.snapshot().await;
                println!("{}", render_roles(&snap.roles, &snap.draft.role));
                Ok(())
            }
            Command::Role(arg) => {
                let roles = nav.snapshot().await.roles;
                match resolve_role(&roles, &arg) {
                    Some(role) => {
                        let role = role.to_string();
                        nav.edit_draft(|d| d.select_role(role)).await
                    }
                    None => {
                        eprintln!("No such role {arg:?}; use `roles` or `custom <text>`.");
                        Ok(())
                    }
                }
            }
            Command::Custom(text) => nav.edit_draft(|d| d.set_custom_role(text)).await,
            Command::Github(user) => nav.edit_draft(|d| d.github_username = user).await,
            Command::Resume(line) => {
                nav.edit_draft(|d| {
                    d.resume_text.push_str(&line);
                    d.resume_text.push('\n');
                })
                .await
            }
            Command::Clear => nav.edit_draft(|d| d.resume_text.clear()).await,
            Command::Sample => {
                let result = nav.load_sample().await;
                if result.is_ok() {
                    eprintln!("Sample resume loaded.");
                }
                result
            }
            Command::Upload(path) => match read_upload(&path).await {
                Ok((bytes, filename)) => {
                    eprintln!("Extracting text from {filename}...");
                    nav.upload_resume(bytes, &filename)
                        .await
                        .map(|status| eprintln!("{status}"))
                }
                Err(e) => {
                    eprintln!("Could not read {}: {e}", path.display());
                    Ok(())
                }
            },
            Command::Generate => {
                let nav = nav.clone();
                let op = async move { nav.submit().await };
                match self.pending(PendingKind::Generate, op, lines).await {
                    Some(outcome) => outcome.map(|o| {
                        self.view = View::default();
                        report(o)
                    }),
                    None => return Ok(Flow::Quit),
                }
            }
            Command::Adapt(request) => {
                let nav = nav.clone();
                let op = async move { nav.request_adaptation(request).await };
                match self.pending(PendingKind::Adapt, op, lines).await {
                    Some(outcome) => outcome.map(report),
                    None => return Ok(Flow::Quit),
                }
            }
            Command::View(view) => {
                self.view = view;
                Ok(())
            }
            Command::Reset => {
                nav.reset().await;
                self.view = View::default();
                eprintln!("Session reset.");
                Ok(())
            }
            Command::Dismiss => {
                nav.dismiss_error().await;
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("{e}");
        }
        if show_results {
            if let Some(text) = render_results(&self.navigator.snapshot().await, self.view) {
                println!("\n{text}\n");
            }
        }
        Ok(Flow::Continue)
    }

    /// Drive a pending request while narrating progress. Only `reset` and
    /// `quit` are accepted meanwhile; `reset` abandons the request at once.
    /// Returns `None` on quit.
    async fn pending<F>(
        &self,
        kind: PendingKind,
        op: F,
        lines: &mut Lines,
    ) -> Option<Result<Outcome, NavigatorError>>
    where
        F: Future<Output = Result<Outcome, NavigatorError>>,
    {
        eprintln!("{}", kind.headline());
        let mut steps = kind.steps().iter();
        let mut ticker = tokio::time::interval(STEP_INTERVAL);
        tokio::pin!(op);

        loop {
            tokio::select! {
                result = &mut op => return Some(result),
                _ = ticker.tick() => {
                    if let Some(step) = steps.next() {
                        eprintln!("  ✓ {step}");
                    }
                }
                line = lines.next() => match line.as_deref().map(str::trim) {
                    Some("reset") => {
                        // The late response is dropped by the navigator either way.
                        self.navigator.reset().await;
                        eprintln!("Session reset.");
                        return Some(Ok(Outcome::Discarded));
                    }
                    Some("quit") | Some("exit") | None => return None,
                    Some(_) => eprintln!("Still working; only `reset` or `quit` for now."),
                },
            }
        }
    }
}

/// What to tell the user about a finished request, if anything.
pub fn outcome_note(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Completed(_) => None,
        Outcome::RolledBack { stage, error } => Some(format!(
            "{error}\nRequest failed; back to {stage}. Adjust and try again."
        )),
        Outcome::Discarded => Some("Request discarded.".to_string()),
    }
}

fn report(outcome: Outcome) {
    if let Some(note) = outcome_note(&outcome) {
        eprintln!("{note}");
    }
}

/// Stdin as a stream of trimmed lines.
fn stdin_lines() -> Lines {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });

    Box::pin(stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|line| (line, rx))
    }))
}

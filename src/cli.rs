// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::app::{AuthScreen, Portal, View};
use crate::core::{ConfigManager, EnhancementService, FsOps, ServiceClient};
use crate::forms::{
    ApplicationErrors, ApplicationField, ApplicationForm, Download, LoginField, RegisterField,
    SubmitOutcome, SubmitRefused,
};
use crate::render::render_result;
use crate::types::EnhancementResult;
use crate::utils::clean_path_input;

const QUIT_COMMAND: &str = ":quit";
const REGISTER_COMMAND: &str = ":register";
const LOGIN_COMMAND: &str = ":login";

#[derive(Parser)]
#[command(name = "resume-enhancer")]
#[command(about = "Tailor a PDF resume to a job description using the enhancement service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enhancement endpoint (overrides ENHANCER_SERVICE_URL and enhancer.yaml)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Where downloads are saved
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in, then submit applications interactively (default)
    Session,
    /// Submit a single application without prompts
    Enhance {
        /// Company name
        #[arg(long)]
        company: String,
        /// Job description text
        #[arg(long, conflicts_with = "jd_file", required_unless_present = "jd_file")]
        jd: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        jd_file: Option<PathBuf>,
        /// Resume to enhance (PDF)
        #[arg(long)]
        resume: PathBuf,
        /// Save the JSON (and LaTeX, when returned) exports
        #[arg(long)]
        download: bool,
    },
    /// Render a saved enhancement response
    Render { file: PathBuf },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command.unwrap_or(Command::Session) {
        Command::Session => {
            let service = ServiceClient::new(config.service_url.clone())?;
            let stdin = std::io::stdin();
            let mut session = Session::new(
                stdin.lock(),
                std::io::stdout(),
                service,
                config.output_dir.clone(),
            );
            session.run().await
        }
        Command::Enhance {
            company,
            jd,
            jd_file,
            resume,
            download,
        } => {
            let job_description = match (jd, jd_file) {
                (Some(text), _) => text,
                (None, Some(path)) => FsOps::read_file_safe(&path).await?,
                (None, None) => String::new(),
            };
            let service = ServiceClient::new(config.service_url.clone())?;
            let request = EnhanceRequest {
                job_description,
                company_name: company,
                resume,
                download,
            };
            enhance_once(&service, &mut std::io::stdout(), request, &config.output_dir).await
        }
        Command::Render { file } => {
            let content = FsOps::read_file_safe(&file).await?;
            let result: EnhancementResult = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            print!("{}", render_result(&result));
            Ok(())
        }
    }
}

pub struct EnhanceRequest {
    pub job_description: String,
    pub company_name: String,
    pub resume: PathBuf,
    pub download: bool,
}

/// Run one submission end to end; any failure is returned as an error
pub async fn enhance_once<S, W>(
    service: &S,
    out: &mut W,
    request: EnhanceRequest,
    output_dir: &Path,
) -> Result<()>
where
    S: EnhancementService + ?Sized,
    W: Write,
{
    let mut form = ApplicationForm::new();
    form.set(ApplicationField::JobDescription, request.job_description);
    form.set(ApplicationField::CompanyName, request.company_name);
    form.select_resume(FsOps::read_resume(&request.resume).await?);

    writeln!(out, "Submitting...")?;
    match form.submit(service).await {
        Ok(_) => {}
        Err(SubmitRefused::Invalid) => {
            write_application_errors(out, form.errors())?;
            anyhow::bail!("Application form is invalid");
        }
        Err(refused) => anyhow::bail!(refused),
    }

    if let Some(message) = form.error_message() {
        anyhow::bail!("{}", message);
    }

    if let Some(view) = form.view() {
        write!(out, "{}", view)?;
    }

    if request.download {
        for download in [form.download_json(), form.download_latex()]
            .into_iter()
            .flatten()
        {
            let path = FsOps::save_download(output_dir, &download).await?;
            writeln!(out, "Saved {}", path.display())?;
        }
    }
    Ok(())
}

fn write_application_errors<W: Write>(out: &mut W, errors: &ApplicationErrors) -> Result<()> {
    for message in [
        &errors.job_description,
        &errors.company_name,
        &errors.resume,
    ]
    .into_iter()
    .flatten()
    {
        writeln!(out, "  ! {}", message)?;
    }
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

/// Line-based rendition of the portal: credential screens, then the
/// application form and its result actions.
pub struct Session<R, W, S> {
    input: R,
    output: W,
    service: S,
    output_dir: PathBuf,
    portal: Portal,
    result_shown: bool,
}

impl<R, W, S> Session<R, W, S>
where
    R: BufRead,
    W: Write,
    S: EnhancementService,
{
    pub fn new(input: R, output: W, service: S, output_dir: PathBuf) -> Self {
        Self {
            input,
            output,
            service,
            output_dir,
            portal: Portal::new(),
            result_shown: false,
        }
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Interactive session started");
        loop {
            let flow = match self.portal.view() {
                View::Credentials(AuthScreen::Login) => self.login_screen()?,
                View::Credentials(AuthScreen::Register) => self.register_screen()?,
                View::Application => self.application_screen().await?,
            };
            if let Flow::Quit = flow {
                writeln!(self.output, "Goodbye.")?;
                info!("Interactive session ended");
                return Ok(());
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.read_input()
    }

    /// Read one line; `None` on end of input or `:quit`
    fn read_input(&mut self) -> Result<Option<String>> {
        self.output.flush()?;

        // Blocking read on the runtime thread: no task is in flight while the
        // session waits for a line. `block_in_place` panics on the
        // current-thread runtime the session tests use.
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let value = line.trim_end_matches(['\r', '\n']).to_string();
        if value.trim() == QUIT_COMMAND {
            return Ok(None);
        }
        Ok(Some(value))
    }

    /// Read lines until an empty one
    fn prompt_multiline(&mut self, label: &str) -> Result<Option<String>> {
        writeln!(self.output, "{} (finish with an empty line)", label)?;
        let mut lines = Vec::new();
        loop {
            write!(self.output, "> ")?;
            let Some(line) = self.read_input()? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                return Ok(Some(lines.join("\n")));
            }
            lines.push(line);
        }
    }

    fn login_screen(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n== {} ==", AuthScreen::Login.title())?;
        writeln!(
            self.output,
            "(type {} to create an account, {} to leave)",
            REGISTER_COMMAND, QUIT_COMMAND
        )?;

        let Some(email) = self.prompt("Email address")? else {
            return Ok(Flow::Quit);
        };
        if email.trim() == REGISTER_COMMAND {
            self.portal.toggle_form();
            return Ok(Flow::Continue);
        }
        let Some(password) = self.prompt("Password")? else {
            return Ok(Flow::Quit);
        };

        self.portal.login.set(LoginField::Email, email);
        self.portal.login.set(LoginField::Password, password);

        match self.portal.submit_login() {
            SubmitOutcome::Accepted => writeln!(self.output, "Signed in.")?,
            SubmitOutcome::Invalid => {
                let errors = self.portal.login.errors().clone();
                for field in [LoginField::Email, LoginField::Password] {
                    if let Some(message) = errors.get(field) {
                        writeln!(self.output, "  ! {}", message)?;
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn register_screen(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n== {} ==", AuthScreen::Register.title())?;
        writeln!(
            self.output,
            "(type {} if you already have an account)",
            LOGIN_COMMAND
        )?;

        let fields = [
            (RegisterField::Name, "Full Name"),
            (RegisterField::Email, "Email address"),
            (RegisterField::Password, "Password"),
            (RegisterField::ConfirmPassword, "Confirm Password"),
        ];
        for (field, label) in fields {
            let Some(value) = self.prompt(label)? else {
                return Ok(Flow::Quit);
            };
            if value.trim() == LOGIN_COMMAND {
                self.portal.toggle_form();
                return Ok(Flow::Continue);
            }
            self.portal.register.set(field, value);
        }

        match self.portal.submit_register() {
            Ok(notice) => writeln!(self.output, "{}", notice)?,
            Err(_) => {
                let errors = self.portal.register.errors().clone();
                for (field, _) in fields {
                    if let Some(message) = errors.get(field) {
                        writeln!(self.output, "  ! {}", message)?;
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn application_screen(&mut self) -> Result<Flow> {
        if let Some(message) = self.portal.application.error_message().map(str::to_string) {
            return self.error_actions(&message);
        }
        if self.portal.application.result().is_some() {
            return self.result_actions().await;
        }
        self.fill_application().await
    }

    /// Prompt for every field that is empty or flagged, then submit
    async fn fill_application(&mut self) -> Result<Flow> {
        let form = &self.portal.application;
        let errors = form.errors().clone();
        let ask_jd = errors.job_description.is_some()
            || form.value(ApplicationField::JobDescription).is_empty();
        let ask_company = errors.company_name.is_some()
            || form.value(ApplicationField::CompanyName).is_empty();
        let ask_resume = errors.resume.is_some() || form.file_name().is_empty();

        writeln!(self.output, "\n== Job Application Portal ==")?;

        if ask_jd {
            if let Some(message) = &errors.job_description {
                writeln!(self.output, "  ! {}", message)?;
            }
            let Some(jd) = self.prompt_multiline("Job Description")? else {
                return Ok(Flow::Quit);
            };
            self.portal
                .application
                .set(ApplicationField::JobDescription, jd);
        }

        if ask_company {
            if let Some(message) = &errors.company_name {
                writeln!(self.output, "  ! {}", message)?;
            }
            let Some(company) = self.prompt("Company Name")? else {
                return Ok(Flow::Quit);
            };
            self.portal
                .application
                .set(ApplicationField::CompanyName, company);
        }

        if ask_resume {
            if let Some(message) = &errors.resume {
                writeln!(self.output, "  ! {}", message)?;
            }
            let Some(raw_path) = self.prompt("Upload Resume (PDF up to 10MB), path")? else {
                return Ok(Flow::Quit);
            };
            let path = PathBuf::from(clean_path_input(&raw_path));
            if !path.as_os_str().is_empty() {
                match FsOps::read_resume(&path).await {
                    Ok(file) => {
                        self.portal.application.select_resume(file);
                        if !self.portal.application.file_name().is_empty() {
                            writeln!(
                                self.output,
                                "  + {}",
                                self.portal.application.file_name()
                            )?;
                        }
                    }
                    Err(e) => {
                        error!("Could not load resume: {:#}", e);
                        writeln!(self.output, "  ! {:#}", e)?;
                    }
                }
            }
        }

        writeln!(self.output, "Submitting...")?;
        match self.portal.application.submit(&self.service).await {
            Ok(_) => {}
            Err(SubmitRefused::Invalid) => {
                writeln!(self.output, "Please correct the highlighted fields.")?;
            }
            Err(refused) => writeln!(self.output, "  ! {}", refused)?,
        }
        Ok(Flow::Continue)
    }

    async fn result_actions(&mut self) -> Result<Flow> {
        let form = &self.portal.application;
        let has_latex = form.download_latex().is_some();

        if !self.result_shown {
            if let Some(view) = form.view() {
                write!(self.output, "\n{}", view)?;
            }
            self.result_shown = true;
        }

        writeln!(self.output, "\n[j] Download Enhanced Resume")?;
        if has_latex {
            writeln!(self.output, "[l] Download LaTeX Code")?;
        }
        writeln!(self.output, "[n] Create Another")?;
        writeln!(self.output, "[q] Quit")?;

        let Some(choice) = self.prompt("Choose an action")? else {
            return Ok(Flow::Quit);
        };
        match choice.trim() {
            "j" => {
                let download = self.portal.application.download_json();
                self.save(download).await?;
            }
            "l" if has_latex => {
                let download = self.portal.application.download_latex();
                self.save(download).await?;
            }
            "n" => {
                self.portal.application.reset();
                self.result_shown = false;
            }
            "q" => return Ok(Flow::Quit),
            other => writeln!(self.output, "Unknown action: {}", other)?,
        }
        Ok(Flow::Continue)
    }

    fn error_actions(&mut self, message: &str) -> Result<Flow> {
        writeln!(self.output, "\n{}", message)?;
        writeln!(self.output, "[t] Try Again")?;
        writeln!(self.output, "[q] Quit")?;

        let Some(choice) = self.prompt("Choose an action")? else {
            return Ok(Flow::Quit);
        };
        match choice.trim() {
            "t" => self.portal.application.reset(),
            "q" => return Ok(Flow::Quit),
            other => writeln!(self.output, "Unknown action: {}", other)?,
        }
        Ok(Flow::Continue)
    }

    async fn save(&mut self, download: Option<Download>) -> Result<()> {
        let Some(download) = download else {
            return Ok(());
        };
        match FsOps::save_download(&self.output_dir, &download).await {
            Ok(path) => writeln!(self.output, "Saved {}", path.display())?,
            Err(e) => {
                error!("Download failed: {:#}", e);
                writeln!(self.output, "  ! {:#}", e)?;
            }
        }
        Ok(())
    }
}

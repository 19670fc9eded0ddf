use chronicles_config::Config;
use eyre::{Result, WrapErr};
use std::{
    path::Path,
    process::{Command, Output, Stdio},
};

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Loads a `.env` file from the current directory, if there is one.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        let _ = sh_warn!("failed to load .env: {err}");
    }
}

/// The tools a run shells out to, besides the chain.
pub trait Toolchain {
    /// Compiles the project, refreshing the artifacts constructor arguments are decoded with.
    fn build(&self, config: &Config) -> Result<()>;

    /// Returns the url of the `origin` remote of the repository at `root`.
    fn remote_url(&self, root: &Path) -> Result<String>;
}

/// [`Toolchain`] running the `forge` and `git` executables.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn build(&self, config: &Config) -> Result<()> {
        Command::new(&config.forge)
            .arg("build")
            .current_dir(&config.root)
            .stdin(Stdio::null())
            .exec()
            .map(drop)
            .wrap_err("failed to build the project")
    }

    fn remote_url(&self, root: &Path) -> Result<String> {
        Git::new(root).remote_url("origin")
    }
}

/// Read-only `git` queries against a repository.
#[derive(Clone, Copy, Debug)]
pub struct Git<'a> {
    pub root: &'a Path,
}

impl<'a> Git<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn cmd(self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(self.root).stdin(Stdio::null());
        cmd
    }

    /// `git remote get-url <remote>`
    pub fn remote_url(self, remote: &str) -> Result<String> {
        self.cmd()
            .args(["remote", "get-url", remote])
            .get_stdout_lossy()
            .wrap_err_with(|| format!("failed to read the url of the `{remote}` remote"))
    }
}

/// Extension trait for [`Command`].
pub trait CommandUtils {
    /// Returns the command's output if execution is successful, otherwise, throws an error.
    fn exec(&mut self) -> Result<Output>;

    /// Returns the command's stdout if execution is successful, otherwise, throws an error.
    fn get_stdout_lossy(&mut self) -> Result<String>;
}

impl CommandUtils for Command {
    #[track_caller]
    fn exec(&mut self) -> Result<Output> {
        trace!(command=?self, "executing");

        let output = self.output().wrap_err_with(|| {
            format!("failed to run {}", self.get_program().to_string_lossy())
        })?;

        trace!(code=?output.status.code(), "executed");

        if output.status.success() {
            return Ok(output);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let msg = if stdout.is_empty() {
            stderr.to_string()
        } else if stderr.is_empty() {
            stdout.to_string()
        } else {
            format!("stdout:\n{stdout}\n\nstderr:\n{stderr}")
        };

        let mut name = self.get_program().to_string_lossy().into_owned();
        if let Some(arg) = self.get_args().next() {
            let arg = arg.to_string_lossy();
            if !arg.starts_with('-') {
                name.push(' ');
                name.push_str(&arg);
            }
        }

        let mut err = match output.status.code() {
            Some(code) => format!("{name} exited with code {code}"),
            None => format!("{name} terminated by a signal"),
        };
        if !msg.is_empty() {
            err.push(':');
            err.push(if msg.lines().count() == 1 { ' ' } else { '\n' });
            err.push_str(&msg);
        }
        Err(eyre::eyre!(err))
    }

    #[track_caller]
    fn get_stdout_lossy(&mut self) -> Result<String> {
        let output = self.exec()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().into())
    }
}

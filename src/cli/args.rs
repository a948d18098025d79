//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Shape
//!
//! There are no subcommands. At most one action flag is accepted; without
//! one, the trailing arguments are the task and are routed. An empty task
//! starts a local session. Everything after the first task word is passed
//! through verbatim, flags included.
//!
//! # Global Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output; implies --no-interactive
//! - `--no-interactive`: Never prompt
//! - `--yes` / `-y`: Answer yes to the API confirmation prompt

use clap::{ArgGroup, Parser};

use crate::core::settings::SettingsCommand;
use crate::ui::prompts;

/// Routes assistant tasks between the Claude API and local Claude
#[derive(Parser, Debug)]
#[command(name = "claude-auto")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("action").multiple(false)))]
#[command(after_help = "\
EXAMPLES:
    # Route a task (high-context work goes to the API)
    claude-auto analyze the entire codebase for security issues

    # See which rule decides a task, without running anything
    claude-auto --explain fix this bug

    # Cost controls
    claude-auto --set-limit 5
    claude-auto --emergency-stop
    claude-auto --cost-control

ENVIRONMENT:
    ANTHROPIC_API_KEY     API key (takes precedence over the stored key)
    CLAUDE_AUTO_HOME      Directory for settings, usage and secrets
    CLAUDE_AUTO_CONFIG    Path to config.toml
    CLAUDE_AUTO_LOG       Log filter (e.g. debug, claude_auto=trace)")]
pub struct Cli {
    /// Configure the API key
    #[arg(long, group = "action")]
    pub setup: bool,

    /// Provide the API key without prompting (with --setup)
    #[arg(long, value_name = "KEY", requires = "setup")]
    pub api_key: Option<String>,

    /// Skip verifying the API key against the service (with --setup)
    #[arg(long, requires = "setup")]
    pub no_verify: bool,

    /// Remove the stored API key
    #[arg(long, group = "action")]
    pub logout: bool,

    /// Open the interactive cost-control center
    #[arg(long, group = "action")]
    pub cost_control: bool,

    /// Enable API mode
    #[arg(long, group = "action")]
    pub enable: bool,

    /// Disable API mode (local only)
    #[arg(long, group = "action")]
    pub disable: bool,

    /// Show settings, usage and API key status
    #[arg(long, group = "action")]
    pub status: bool,

    /// Show the detailed usage report
    #[arg(long, group = "action")]
    pub report: bool,

    /// Explain how the task would be classified
    #[arg(long, group = "action")]
    pub explain: bool,

    /// Show where the task would run, without running it
    #[arg(long, group = "action")]
    pub dry_run: bool,

    /// Set the cost limit in USD (0 removes it)
    #[arg(long, value_name = "USD", group = "action", allow_negative_numbers = true)]
    pub set_limit: Option<f64>,

    /// Set the warning threshold in USD
    #[arg(long, value_name = "USD", group = "action", allow_negative_numbers = true)]
    pub set_warning: Option<f64>,

    /// Toggle the confirmation requirement for API calls
    #[arg(long, group = "action")]
    pub toggle_confirm: bool,

    /// Reset usage statistics
    #[arg(long, group = "action")]
    pub reset_usage: bool,

    /// Disable the API, force local and require confirmation
    #[arg(long, group = "action")]
    pub emergency_stop: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", group = "action")]
    pub completion: Option<Shell>,

    /// Answer yes to the API confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_interactive: bool,

    /// The task, passed through verbatim to the assistant
    #[arg(
        value_name = "TASK",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub task: Vec<String>,
}

/// The single thing an invocation does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Route,
    DryRun,
    Explain,
    Setup,
    Logout,
    CostControl,
    Status,
    Report,
    ResetUsage,
    Policy(SettingsCommand),
    Completion(Shell),
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if neither `--no-interactive` nor `--quiet` was set,
    /// the config allows prompts, and a terminal is attached.
    pub fn interactive(&self, config_allows: bool) -> bool {
        !self.no_interactive && !self.quiet && config_allows && prompts::terminal_attached()
    }

    /// Resolve the action flags into one [`Action`].
    pub fn action(&self) -> Action {
        if self.setup {
            Action::Setup
        } else if self.logout {
            Action::Logout
        } else if self.cost_control {
            Action::CostControl
        } else if self.status {
            Action::Status
        } else if self.report {
            Action::Report
        } else if self.explain {
            Action::Explain
        } else if self.dry_run {
            Action::DryRun
        } else if self.reset_usage {
            Action::ResetUsage
        } else if let Some(shell) = self.completion {
            Action::Completion(shell)
        } else if let Some(command) = self.policy() {
            Action::Policy(command)
        } else {
            Action::Route
        }
    }

    fn policy(&self) -> Option<SettingsCommand> {
        if self.enable {
            Some(SettingsCommand::EnableApi)
        } else if self.disable {
            Some(SettingsCommand::DisableApi)
        } else if let Some(amount) = self.set_limit {
            Some(SettingsCommand::SetCostLimit(amount))
        } else if let Some(amount) = self.set_warning {
            Some(SettingsCommand::SetWarningThreshold(amount))
        } else if self.toggle_confirm {
            Some(SettingsCommand::ToggleConfirmation)
        } else if self.emergency_stop {
            Some(SettingsCommand::EmergencyShutdown)
        } else {
            None
        }
    }
}

/// Shell types for completion generation.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

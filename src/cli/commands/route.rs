//! route command - Classify, gate and run a task
//!
//! The default action. `--dry-run` goes through the same lifecycle but
//! stops before dispatch and prints what would have happened.

use anyhow::Result;

use super::Workspace;
use crate::dispatch::ProcessDispatcher;
use crate::engine::{AssumeYes, Confirm, Context, FinalRoute, RouteReport, Router};
use crate::secrets::{CredentialProvider, StaticCredential, API_KEY_ENV};
use crate::ui::output;
use crate::ui::prompts::TerminalConfirm;

/// Credentials from the configured secret store.
///
/// An unusable store still leaves the environment variable.
fn credentials(ctx: &Context, workspace: &Workspace) -> Box<dyn CredentialProvider> {
    match workspace.credentials() {
        Ok(provider) => Box::new(provider),
        Err(e) => {
            output::warn(format!("{:#}", e), ctx.verbosity());
            Box::new(StaticCredential(
                std::env::var(API_KEY_ENV).ok().filter(|v| !v.trim().is_empty()),
            ))
        }
    }
}

fn confirmer(ctx: &Context) -> Box<dyn Confirm> {
    if ctx.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm::new(ctx.interactive))
    }
}

fn dispatcher(ctx: &Context, workspace: &Workspace) -> ProcessDispatcher {
    ProcessDispatcher::from_config(&workspace.config).with_verbosity(ctx.verbosity())
}

/// Route and run `task`, returning the child's exit code.
pub fn route(ctx: &Context, workspace: &Workspace, task: &[String]) -> Result<i32> {
    if task.is_empty() {
        output::notice("Tip: use --help for usage information", ctx.verbosity());
    }

    let store = workspace.store();
    let dispatcher = dispatcher(ctx, workspace);
    let credentials = credentials(ctx, workspace);
    let confirm = confirmer(ctx);

    let report = Router::new(
        &store,
        &store,
        &dispatcher,
        credentials.as_ref(),
        confirm.as_ref(),
    )
    .with_cost_per_call(workspace.config.cost_per_call())
    .with_verbosity(ctx.verbosity())
    .route(task)?;

    Ok(report.exit_code())
}

/// Show where `task` would run without running or recording it.
pub fn dry_run(ctx: &Context, workspace: &Workspace, task: &[String]) -> Result<i32> {
    let store = workspace.store();
    let dispatcher = dispatcher(ctx, workspace);
    let credentials = credentials(ctx, workspace);

    let report = Router::new(
        &store,
        &store,
        &dispatcher,
        credentials.as_ref(),
        &AssumeYes,
    )
    .with_cost_per_call(workspace.config.cost_per_call())
    .with_verbosity(ctx.verbosity())
    .dry_run(task)?;

    if ctx.quiet {
        println!("{}", outcome_label(&report));
    } else {
        print_dry_run(ctx, &dispatcher, &report, task);
    }
    Ok(0)
}

/// One word for scripts: `remote`, `local` or `confirm`.
fn outcome_label(report: &RouteReport) -> String {
    match report.final_route {
        Some(final_route) => final_route.route().to_string(),
        None => "confirm".to_string(),
    }
}

fn print_dry_run(
    ctx: &Context,
    dispatcher: &ProcessDispatcher,
    report: &RouteReport,
    task: &[String],
) {
    let verbosity = ctx.verbosity();
    let classification = &report.classification;

    output::print(
        format!(
            "Classified: {} ({})",
            classification.route, classification.rule
        ),
        verbosity,
    );
    output::print(
        format!("Reason:     {}", classification.explanation()),
        verbosity,
    );

    let decision = match report.final_route {
        Some(FinalRoute::Remote) => "run on the API".to_string(),
        Some(FinalRoute::Local) => "run locally".to_string(),
        Some(FinalRoute::Downgraded(reason)) => format!("run locally ({})", reason),
        None => "ask for confirmation before using the API".to_string(),
    };
    output::print(format!("Decision:   {}", decision), verbosity);

    if let Some(final_route) = report.final_route {
        let mut argv = vec![dispatcher.command().to_string()];
        argv.extend(dispatcher.argv(final_route.route(), task));
        output::print(format!("Would run:  {}", argv.join(" ")), verbosity);
    }
}

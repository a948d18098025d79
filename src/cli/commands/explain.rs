//! explain command - Show which rule classifies a task

use anyhow::Result;

use crate::core::classify;
use crate::engine::Context;
use crate::ui::output;

/// Print the route and deciding rule for `task` without running anything.
///
/// In quiet mode only the route label is printed.
pub fn explain(ctx: &Context, task: &[String]) -> Result<i32> {
    let classification = classify::evaluate(&task.join(" "));

    if ctx.quiet {
        println!("{}", classification.route);
        return Ok(0);
    }

    let verbosity = ctx.verbosity();
    output::print(format!("Route:  {}", classification.route), verbosity);
    output::print(format!("Rule:   {}", classification.rule), verbosity);
    output::print(
        format!("Reason: {}", classification.explanation()),
        verbosity,
    );
    Ok(0)
}

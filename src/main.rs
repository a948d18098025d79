//! claude-auto binary entry point.

use std::process::ExitCode;

use claude_auto::cli;
use claude_auto::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => exit_code(code),
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Clamp a child's exit status into the range a process can return.
fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

use std::io::{self, BufRead, Write};

use client_core::navigation::Confirm;
use tracing::warn;

/// Asks on stdout and reads one line from stdin. Anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "prompt: failed to flush stdout");
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!(error = %err, "prompt: failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

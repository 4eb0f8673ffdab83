use std::io::Read;

use snag_capture::{CaptureOutcome, HookInput, capture};
use snag_config::SnagConfig;
use snag_core::SkipReason;
use tracing::debug;

/// Best-effort: every problem ends as a debug log line, never an error exit.
pub(crate) fn handle_capture() {
    let mut raw = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut raw) {
        debug!(error = %err, reason = %SkipReason::InputUnavailable, "failed to read hook input");
        return;
    }

    let input = match HookInput::parse(&raw) {
        Ok(input) => input,
        Err(err) => {
            debug!(error = %err, reason = %SkipReason::ParseFailure, "capture skipped");
            return;
        }
    };

    let config = SnagConfig::load(&input.project_root());
    if let CaptureOutcome::Captured(reflection) = capture(&input, &config) {
        debug!(path = ?input.transcript_path, id = %reflection.id, "capture finished");
    }
}

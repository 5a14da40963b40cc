//! git-highlights: analyze merged PRs and generate meeting-ready markdown
//! summaries of the week's work.

use std::process::ExitCode;

use git_highlights::cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = cli::report_error(&err, &mut std::io::stderr().lock());
            ExitCode::from(1)
        }
    }
}

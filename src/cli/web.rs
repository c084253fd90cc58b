//! Web command - open the repository page in a browser

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, link};
use anstream::println;
use gira::error::Result;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Print the repository URL and try to open it
pub fn run_web(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;
    let url = ctx.hosting.web_url();
    println!("{}", link(&url, &url).accent());

    let opened = Command::new(OPENER)
        .arg(&url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    if !opened {
        debug!(opener = OPENER, "could not launch a browser");
        println!("{}", "Open the URL above in your browser.".muted());
    }
    Ok(())
}

//! Batch box detection command
//!
//! Runs box detection over every `*-box.png` in a template directory and
//! reports how many templates succeeded.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{info, warn};

use crate::api::MockupKit;
use crate::commands::command_traits::Command;
use crate::errors::MockupResult;

/// Command for processing all box templates in a directory
pub struct DetectAllCommand<'a> {
    /// Directory to scan; the configured template directory when absent
    directory: Option<PathBuf>,
    /// Whether to draw a progress bar
    show_progress: bool,
    /// Library facade
    kit: &'a MockupKit,
}

impl<'a> DetectAllCommand<'a> {
    /// Create a new batch detect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `kit` - Library facade
    ///
    /// # Returns
    /// A new DetectAllCommand instance
    pub fn new(args: &ArgMatches, kit: &'a MockupKit) -> MockupResult<Self> {
        let directory = args.get_one::<String>("input").map(PathBuf::from);
        let show_progress = !args.get_flag("no-progress");

        Ok(DetectAllCommand {
            directory,
            show_progress,
            kit,
        })
    }
}

impl<'a> Command for DetectAllCommand<'a> {
    fn execute(&self) -> MockupResult<()> {
        let summary = self.kit.process_all_templates(self.directory.as_deref(), self.show_progress)?;

        for (path, reason) in &summary.failed {
            warn!("Could not process {}: {}", path.display(), reason);
        }

        info!("{}", "=".repeat(50));
        info!("Succeeded: {}", summary.succeeded.len());
        info!("Failed: {}", summary.failed.len());
        info!("Total: {}", summary.total());
        info!("{}", "=".repeat(50));

        Ok(())
    }
}

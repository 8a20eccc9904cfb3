//! Box detection command
//!
//! Detects the placeholder box in a single box template and writes the
//! resulting placement parameters next to it.

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::MockupKit;
use crate::commands::command_traits::Command;
use crate::errors::MockupResult;
use crate::utils::arg_utils::required_string;

/// Command for detecting the box in one template
pub struct DetectCommand<'a> {
    /// Path to the box template
    input_file: PathBuf,
    /// Library facade
    kit: &'a MockupKit,
}

impl<'a> DetectCommand<'a> {
    /// Create a new detect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `kit` - Library facade
    ///
    /// # Returns
    /// A new DetectCommand instance or an error
    pub fn new(args: &ArgMatches, kit: &'a MockupKit) -> MockupResult<Self> {
        let input_file = required_string(args, "input", "box template path (e.g. templates/tshirt-white-box.png)")?;

        Ok(DetectCommand {
            input_file: PathBuf::from(input_file),
            kit,
        })
    }
}

impl<'a> Command for DetectCommand<'a> {
    fn execute(&self) -> MockupResult<()> {
        let (bbox, params_path) = self.kit.process_template(&self.input_file)?;

        info!("Position: X={}, Y={}", bbox.x, bbox.y);
        info!("Size: {}x{}", bbox.width, bbox.height);
        info!("Saved parameters to {}", params_path.display());

        Ok(())
    }
}

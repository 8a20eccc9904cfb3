//! Design adjustment command
//!
//! Re-encodes a design as PNG, inverting its colors first when the target
//! template is a dark garment.

use std::fs;
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::MockupKit;
use crate::commands::command_traits::Command;
use crate::errors::MockupResult;
use crate::utils::arg_utils::required_string;
use crate::utils::image_utils::{ensure_png_extension, timestamped_png_name};

/// Command for adjusting a design to a template
pub struct AdjustCommand<'a> {
    /// Path to the design image
    design_file: PathBuf,
    /// Template the design is meant for
    template: String,
    /// Path of the PNG to write
    output_file: PathBuf,
    /// Library facade
    kit: &'a MockupKit,
}

impl<'a> AdjustCommand<'a> {
    /// Create a new adjust command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `kit` - Library facade
    ///
    /// # Returns
    /// A new AdjustCommand instance or an error
    pub fn new(args: &ArgMatches, kit: &'a MockupKit) -> MockupResult<Self> {
        let design_file = PathBuf::from(required_string(args, "input", "design file")?);
        let template = required_string(args, "template", "template name (--template)")?;

        let output_file = match args.get_one::<String>("output") {
            Some(path) => ensure_png_extension(&PathBuf::from(path)),
            None => kit.config().output_dir.join(timestamped_png_name("design")),
        };

        Ok(AdjustCommand {
            design_file,
            template,
            output_file,
            kit,
        })
    }
}

impl<'a> Command for AdjustCommand<'a> {
    fn execute(&self) -> MockupResult<()> {
        let png = self.kit.adjust_design(&self.design_file, &self.template)?;
        fs::write(&self.output_file, &png)?;

        info!("Adjusted design written to {}", self.output_file.display());
        Ok(())
    }
}

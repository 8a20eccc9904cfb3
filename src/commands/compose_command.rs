//! Mockup compositing command
//!
//! Places a design on either an explicit mockup image or a named template
//! and writes the PNG result.

use std::fs;
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::api::MockupKit;
use crate::commands::command_traits::Command;
use crate::errors::{MockupError, MockupResult};
use crate::template::{validate_template_name, PlacementOverrides};
use crate::utils::arg_utils::{placement_overrides, required_string};
use crate::utils::image_utils::{ensure_png_extension, timestamped_png_name};

/// Background the design is placed on
enum Background {
    /// An arbitrary mockup image
    Mockup(PathBuf),
    /// A template from the template directory
    Template(String),
}

/// Command for compositing a design onto a mockup
pub struct ComposeCommand<'a> {
    /// Path to the design image
    design_file: PathBuf,
    /// Where the design goes
    background: Background,
    /// Placement values given on the command line
    overrides: PlacementOverrides,
    /// Path of the PNG to write
    output_file: PathBuf,
    /// Library facade
    kit: &'a MockupKit,
}

impl<'a> ComposeCommand<'a> {
    /// Create a new compose command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `kit` - Library facade
    ///
    /// # Returns
    /// A new ComposeCommand instance or an error
    pub fn new(args: &ArgMatches, kit: &'a MockupKit) -> MockupResult<Self> {
        let design_file = PathBuf::from(required_string(args, "input", "design file")?);

        let background = match (args.get_one::<String>("mockup"), args.get_one::<String>("template")) {
            (Some(mockup), None) => Background::Mockup(PathBuf::from(mockup)),
            (None, Some(template)) => {
                validate_template_name(template)?;
                Background::Template(template.clone())
            }
            (Some(_), Some(_)) => {
                return Err(MockupError::GenericError(
                    "Use either --mockup or --template, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(MockupError::GenericError(
                    "Both design and mockup required: pass --mockup FILE or --template NAME".to_string(),
                ))
            }
        };

        let overrides = placement_overrides(args)?;

        let output_file = match args.get_one::<String>("output") {
            Some(path) => ensure_png_extension(&PathBuf::from(path)),
            None => {
                let prefix = match &background {
                    Background::Mockup(_) => "mockup",
                    Background::Template(name) => name.as_str(),
                };
                kit.config().output_dir.join(timestamped_png_name(prefix))
            }
        };

        Ok(ComposeCommand {
            design_file,
            background,
            overrides,
            output_file,
            kit,
        })
    }
}

impl<'a> Command for ComposeCommand<'a> {
    fn execute(&self) -> MockupResult<()> {
        let png = match &self.background {
            Background::Mockup(mockup) => {
                self.kit.create_mockup(&self.design_file, mockup, &self.overrides)?
            }
            Background::Template(name) => {
                self.kit.create_mockup_from_template(&self.design_file, name, &self.overrides)?
            }
        };

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.output_file, &png)?;

        info!("Mockup written to {} ({} bytes)", self.output_file.display(), png.len());
        self.kit.logger().log(&format!("Mockup written to {}", self.output_file.display()))?;

        Ok(())
    }
}

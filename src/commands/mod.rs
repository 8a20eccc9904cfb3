//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod detect_command;
pub mod detect_all_command;
pub mod compose_command;
pub mod list_templates_command;
pub mod adjust_command;

pub use command_traits::{Command, CommandFactory};
pub use detect_command::DetectCommand;
pub use detect_all_command::DetectAllCommand;
pub use compose_command::ComposeCommand;
pub use list_templates_command::ListTemplatesCommand;
pub use adjust_command::AdjustCommand;

use clap::ArgMatches;
use crate::api::MockupKit;
use crate::errors::MockupResult;

/// The command selected by a set of CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    DetectAll,
    Compose,
    ListTemplates,
    Adjust,
    Detect,
}

impl CommandKind {
    /// Flags are checked in this order: detect-all, compose, list-templates,
    /// adjust. Without any of them a single template is detected.
    pub fn from_args(args: &ArgMatches) -> Self {
        if args.get_flag("detect-all") {
            CommandKind::DetectAll
        } else if args.get_flag("compose") {
            CommandKind::Compose
        } else if args.get_flag("list-templates") {
            CommandKind::ListTemplates
        } else if args.get_flag("adjust") {
            CommandKind::Adjust
        } else {
            CommandKind::Detect
        }
    }
}

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct MockupCommandFactory;

impl MockupCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        MockupCommandFactory
    }
}

impl Default for MockupCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for MockupCommandFactory {
    fn create_command(&self, args: &ArgMatches, kit: &'a MockupKit) -> MockupResult<Box<dyn Command + 'a>> {
        match CommandKind::from_args(args) {
            CommandKind::DetectAll => Ok(Box::new(DetectAllCommand::new(args, kit)?)),
            CommandKind::Compose => Ok(Box::new(ComposeCommand::new(args, kit)?)),
            CommandKind::ListTemplates => Ok(Box::new(ListTemplatesCommand::new(kit))),
            CommandKind::Adjust => Ok(Box::new(AdjustCommand::new(args, kit)?)),
            CommandKind::Detect => Ok(Box::new(DetectCommand::new(args, kit)?)),
        }
    }
}

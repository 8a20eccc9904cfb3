use clap::{Arg, Command as ClapCommand, ArgAction};
use std::path::Path;
use std::process;
use log::error;

use mockupkit::api::MockupKit;
use mockupkit::commands::{CommandFactory, MockupCommandFactory};
use mockupkit::config::AppConfig;
use mockupkit::detection::{Color, Tolerance};
use mockupkit::errors::{MockupError, MockupResult};
use mockupkit::utils::logger::Logger;

fn build_cli() -> ClapCommand {
    ClapCommand::new("MockupKit")
        .version("0.1.0")
        .about("Detect placeholder boxes in mockup templates and composite designs onto them")
        .arg(
            Arg::new("input")
                .help("Box template to detect, template directory for --detect-all, or design file for --compose/--adjust")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("detect")
                .short('d')
                .long("detect")
                .help("Detect the placeholder box in a box template and save its parameters (default)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("detect-all")
                .long("detect-all")
                .help("Detect boxes in every *-box.png of the template directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("compose")
                .short('c')
                .long("compose")
                .help("Composite the design onto a mockup or template")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-templates")
                .short('l')
                .long("list-templates")
                .help("List available templates as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("adjust")
                .short('a')
                .long("adjust")
                .help("Adjust a design for a template (inverts colors for dark templates)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mockup")
                .short('m')
                .long("mockup")
                .help("Mockup image to composite onto")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("template")
                .short('t')
                .long("template")
                .help("Template name from the template directory")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("x")
                .long("x")
                .help("Left edge of the design on the mockup")
                .value_name("PX")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("y")
                .long("y")
                .help("Top edge of the design on the mockup")
                .value_name("PX")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Width of the box the design is fitted into")
                .value_name("PX")
                .required(false),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Height of the box the design is fitted into")
                .value_name("PX")
                .required(false),
        )
        .arg(
            Arg::new("rotation")
                .long("rotation")
                .help("Clockwise rotation in degrees")
                .value_name("DEGREES")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output PNG file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Configuration file (defaults to mockupkit.toml when present)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .help("Placeholder color to detect as 'r,g,b'")
                .value_name("R,G,B")
                .required(false),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .help("Per-channel color tolerance (0-255)")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar during --detect-all")
                .action(ArgAction::SetTrue),
        )
}

/// Load the configuration file and apply --color and --tolerance on top
fn load_config(matches: &clap::ArgMatches) -> MockupResult<AppConfig> {
    let mut config = AppConfig::load(matches.get_one::<String>("config").map(Path::new))?;

    if let Some(color) = matches.get_one::<String>("color") {
        config.detection.target = color.parse::<Color>()
            .map_err(|_| MockupError::invalid_parameter("color", color.as_str()))?;
    }

    if let Some(tolerance) = matches.get_one::<String>("tolerance") {
        let value = tolerance.trim().parse::<u8>()
            .map_err(|_| MockupError::invalid_parameter("tolerance", tolerance.as_str()))?;
        config.detection.tolerance = Tolerance::new(value);
    }

    Ok(config)
}

fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = Logger::init_global_logger("mockupkit-global.log", matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let config = match load_config(&matches) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let kit = match MockupKit::new(Some(Path::new("mockupkit.log")), config) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = MockupCommandFactory::new();

    let command_result = factory.create_command(&matches, &kit);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockupkit::commands::CommandKind;

    #[test]
    fn test_cli_definition() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_config_overrides() {
        let matches = build_cli().get_matches_from(["mockupkit", "--color", "0,255,0", "--tolerance", "9", "x.png"]);
        let config = load_config(&matches).unwrap();
        assert_eq!(config.detection.target, Color::new(0, 255, 0));
        assert_eq!(config.detection.tolerance, Tolerance::new(9));

        let matches = build_cli().get_matches_from(["mockupkit", "--tolerance", "900"]);
        assert!(load_config(&matches).is_err());
    }

    #[test]
    fn test_command_dispatch() {
        let kind = |argv: &[&str]| CommandKind::from_args(&build_cli().get_matches_from(argv));

        assert_eq!(kind(&["mockupkit", "shirt-box.png"]), CommandKind::Detect);
        assert_eq!(kind(&["mockupkit", "--detect", "shirt-box.png"]), CommandKind::Detect);
        assert_eq!(kind(&["mockupkit", "--detect-all", "templates"]), CommandKind::DetectAll);
        assert_eq!(kind(&["mockupkit", "--compose", "d.png", "--template", "shirt"]), CommandKind::Compose);
        assert_eq!(kind(&["mockupkit", "--list-templates"]), CommandKind::ListTemplates);
        assert_eq!(kind(&["mockupkit", "--adjust", "d.png", "-t", "mug-black"]), CommandKind::Adjust);
    }

    #[test]
    fn test_command_dispatch_order() {
        let kind = |argv: &[&str]| CommandKind::from_args(&build_cli().get_matches_from(argv));

        assert_eq!(kind(&["mockupkit", "--compose", "--detect-all"]), CommandKind::DetectAll);
        assert_eq!(kind(&["mockupkit", "--list-templates", "--compose"]), CommandKind::Compose);
        assert_eq!(kind(&["mockupkit", "--adjust", "--list-templates"]), CommandKind::ListTemplates);
        assert_eq!(kind(&["mockupkit", "--detect", "--adjust"]), CommandKind::Adjust);
    }
}

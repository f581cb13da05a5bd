//! Command-line argument parsing.

use clap::{ArgAction, Parser};

use crate::tools::{lite_tool_count, Mode};

/// RabbitMQ MCP server.
#[derive(Parser, Debug)]
#[command(
    name = "rabbitmq-mcp",
    version,
    about = "MCP server exposing the RabbitMQ HTTP Management API as agent tools",
    disable_version_flag = true
)]
pub struct Cli {
    /// Run with the reduced catalog: only the essential development and
    /// operations tools.
    #[arg(short = 'l', long = "lite")]
    pub lite: bool,

    /// Print version information.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.lite {
            Mode::Lite
        } else {
            Mode::Full
        }
    }
}

/// Operator-facing description of the running mode.
pub fn mode_description(mode: Mode, total_tools: usize) -> String {
    match mode {
        Mode::Lite => format!("lite mode ({} core tools)", lite_tool_count()),
        Mode::Full => format!("full mode (all {total_tools} tools)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_full_mode() {
        let cli = Cli::parse_from(["rabbitmq-mcp"]);
        assert_eq!(cli.mode(), Mode::Full);
    }

    #[test]
    fn lite_flag_enables_lite_mode() {
        assert_eq!(Cli::parse_from(["rabbitmq-mcp", "--lite"]).mode(), Mode::Lite);
        assert_eq!(Cli::parse_from(["rabbitmq-mcp", "-l"]).mode(), Mode::Lite);
    }

    #[test]
    fn mode_descriptions_carry_tool_counts() {
        assert_eq!(
            mode_description(Mode::Lite, 120),
            format!("lite mode ({} core tools)", lite_tool_count())
        );
        assert_eq!(mode_description(Mode::Full, 120), "full mode (all 120 tools)");
    }
}

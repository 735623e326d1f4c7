//! Topic help with usage examples
//!
//! Complements clap's generated `--help` with longer explanations of file
//! patterns, the check stages, environment variables and exit codes.

use crate::{config::env::EnvManager, types::CheckStage};
use colored::*;

/// Help text renderer for the CLI
pub struct HelpSystem {
    version: &'static str,
}

impl HelpSystem {
    /// Topics accepted by `--help-topic`
    pub const TOPICS: [&'static str; 5] = ["patterns", "stages", "env", "exit-codes", "examples"];

    pub fn new() -> Self {
        Self { version: crate::VERSION }
    }

    /// Display the main help message
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_options_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_footer(use_colors));

        help
    }

    /// Display help for a single topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "patterns" | "pattern" => Some(self.format_pattern_help(use_colors)),
            "stages" | "checks" => Some(self.format_stages_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "exit-codes" | "exit" => Some(self.format_exit_code_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            _ => None,
        }
    }

    fn header(text: &str, use_colors: bool) -> String {
        if use_colors {
            text.bright_green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "Environment Config Check";
        let subtitle = "Keeps per-environment property files structurally identical";

        if use_colors {
            format!("{}\n{}\nVersion: {}\n", title.bright_cyan().bold(), subtitle.bright_blue(), self.version.green())
        } else {
            format!("{}\n{}\nVersion: {}\n", title, subtitle, self.version)
        }
    }

    fn format_usage_section(&self, use_colors: bool) -> String {
        let patterns = [
            "env-config-check [OPTIONS]",
            "env-config-check --resource-dir <DIR> [OPTIONS]",
            "env-config-check --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", Self::header("USAGE:", use_colors));
        for pattern in patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }
        usage
    }

    fn format_options_section(&self, use_colors: bool) -> String {
        let options = [
            OptionHelp {
                short: None,
                long: "source-dir",
                value: "<DIR>",
                description: "Project source directory; scans its sibling 'resources'",
                example: Some("--source-dir app/src/main/java"),
            },
            OptionHelp {
                short: None,
                long: "resource-dir",
                value: "<DIR>",
                description: "Scan this directory directly",
                example: Some("--resource-dir config/"),
            },
            OptionHelp {
                short: Some("p"),
                long: "pattern",
                value: "<PATTERN>",
                description: "File name pattern, '*' wildcards allowed",
                example: Some("--pattern 'app-*.properties'"),
            },
            OptionHelp {
                short: None,
                long: "error-policy",
                value: "<POLICY>",
                description: "strict (default) or lenient for unexpected errors",
                example: Some("--error-policy lenient"),
            },
            OptionHelp {
                short: None,
                long: "format",
                value: "<FORMAT>",
                description: "Report format: text or json",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "verbose",
                value: "",
                description: "Show per-file and per-stage details",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "debug",
                value: "",
                description: "Show debug logs and build information",
                example: None,
            },
            OptionHelp {
                short: None,
                long: "log-format",
                value: "<FORMAT>",
                description: "Log line format on stderr: console, json or compact",
                example: Some("--debug --log-format json"),
            },
            OptionHelp {
                short: None,
                long: "no-color",
                value: "",
                description: "Disable colored output",
                example: None,
            },
        ];

        let mut output = format!("{}\n", Self::header("OPTIONS:", use_colors));
        for option in options {
            output.push_str(&option.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = [
            ExampleHelp {
                title: "Check a Maven-style project",
                command: "env-config-check --source-dir src/main/java",
                description: "Compares env-config-*.properties under src/main/resources",
            },
            ExampleHelp {
                title: "Custom file names",
                command: "env-config-check --resource-dir config --pattern 'application-*.properties'",
                description: "Compares application-dev.properties, application-prod.properties, ...",
            },
            ExampleHelp {
                title: "Machine-readable report",
                command: "env-config-check --resource-dir config --format json",
                description: "Prints the per-file summary as JSON on success",
            },
        ];

        let mut output = format!("{}\n", Self::header("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_footer(&self, use_colors: bool) -> String {
        let mut footer = format!("{}\n", Self::header("ADDITIONAL HELP:", use_colors));
        for topic in Self::TOPICS {
            let command = format!("--help-topic {}", topic);
            if use_colors {
                footer.push_str(&format!("  {}\n", command.bright_yellow()));
            } else {
                footer.push_str(&format!("  {}\n", command));
            }
        }
        footer
    }

    fn format_pattern_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::header("FILE NAME PATTERNS:", use_colors));
        help.push_str(&format!("Default: {}\n\n", crate::defaults::DEFAULT_FILE_PATTERN));
        help.push_str("Each '*' matches one or more non-whitespace characters. The pattern\n");
        help.push_str("must match the whole file name, and only files ending in .properties\n");
        help.push_str("are considered. Other characters are regular expression syntax.\n\n");
        help.push_str("Files are compared in name order; the first one is the reference.\n");
        help
    }

    fn format_stages_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::header("CHECK STAGES:", use_colors));
        help.push_str("Stages run in order and the first failure stops the check.\n\n");

        let details = [
            "every file has as many lines as the reference",
            "every file declares as many distinct keys",
            "keys appear at the same positions as in the reference",
            "no key or non-blank value has leading or trailing whitespace",
        ];
        for (i, (stage, detail)) in CheckStage::ALL.iter().zip(details).enumerate() {
            let name = if use_colors { stage.name().bright_cyan().to_string() } else { stage.name().to_string() };
            help.push_str(&format!("  {}. {}: {}\n", i + 1, name, detail));
        }
        help
    }

    fn format_environment_help(&self, use_colors: bool) -> String {
        format!("{}\n\n{}", Self::header("ENVIRONMENT:", use_colors), EnvManager::display_env_help())
    }

    fn format_exit_code_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n\n", Self::header("EXIT CODES:", use_colors));
        let codes = [
            (0, "All files are consistent (or an unexpected error was ignored)"),
            (1, "Files are inconsistent or could not be parsed"),
            (2, "Invalid configuration or arguments"),
            (5, "I/O error"),
            (99, "Internal error"),
        ];
        for (code, meaning) in codes {
            help.push_str(&format!("  {:>2}  {}\n", code, meaning));
        }
        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for formatting individual options
struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
    example: Option<&'static str>,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let mut option_str = match self.short {
            Some(short) if use_colors => format!("  {}, ", format!("-{}", short).bright_cyan()),
            Some(short) => format!("  -{}, ", short),
            None => "      ".to_string(),
        };

        let long_with_value = if self.value.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("--{} {}", self.long, self.value)
        };

        if use_colors {
            option_str.push_str(&format!("{:<30} {}", long_with_value.bright_cyan(), self.description.white()));
        } else {
            option_str.push_str(&format!("{:<30} {}", long_with_value, self.description));
        }

        if let Some(example) = self.example {
            if use_colors {
                option_str.push_str(&format!(
                    "\n{}{}",
                    " ".repeat(36),
                    format!("Example: {}", example).bright_blue().italic()
                ));
            } else {
                option_str.push_str(&format!("\n{}Example: {}", " ".repeat(36), example));
            }
        }

        option_str
    }
}

/// Helper struct for formatting examples
struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!(
                "  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n", self.title, self.command, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_display() {
        let help = HelpSystem::new().display_main_help(false);

        assert!(help.contains("Environment Config Check"));
        assert!(help.contains("USAGE:"));
        assert!(help.contains("--resource-dir <DIR>"));
        assert!(help.contains("--help-topic stages"));
    }

    #[test]
    fn test_every_topic_renders() {
        let help_system = HelpSystem::new();
        for topic in HelpSystem::TOPICS {
            assert!(help_system.display_topic_help(topic, false).is_some(), "topic {}", topic);
        }
        assert!(help_system.display_topic_help("dns", false).is_none());
    }

    #[test]
    fn test_stages_help_in_order() {
        let help = HelpSystem::new().display_topic_help("stages", false).unwrap();
        let line_count = help.find("line count parity").unwrap();
        let whitespace = help.find("whitespace hygiene").unwrap();
        assert!(line_count < whitespace);
    }

    #[test]
    fn test_exit_codes_help() {
        let help = HelpSystem::new().display_topic_help("exit-codes", false).unwrap();
        assert!(help.contains(" 1  Files are inconsistent"));
        assert!(help.contains("99  Internal error"));
    }

    #[test]
    fn test_option_formatting() {
        let option = OptionHelp {
            short: Some("p"),
            long: "pattern",
            value: "<PATTERN>",
            description: "File name pattern",
            example: Some("--pattern 'a-*.properties'"),
        };

        let plain = option.format(false);
        assert!(plain.starts_with("  -p, --pattern <PATTERN>"));
        assert!(plain.contains("Example: --pattern 'a-*.properties'"));
    }
}

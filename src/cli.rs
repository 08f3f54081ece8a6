use clap::{Parser, Subcommand};

/// Agency operations service: templates, projects and AI-assisted planning
#[derive(Parser)]
#[command(name = "agencyos", version)]
pub struct Cli {
    /// Path to the YAML configuration file (defaults to ./agencyos.yaml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long, global = true, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under logs/
    #[arg(long, global = true)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on; overrides the configuration
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate a project template from a prompt
    Template {
        /// What the template should plan
        prompt: String,
        /// Spin up a project for this client from the generated template
        #[arg(long, value_name = "CLIENT_ID")]
        use_for: Option<String>,
    },
    /// Generate an automation workflow from a prompt
    Workflow {
        /// What the workflow should automate
        prompt: String,
    },
    /// Write an executive summary for a client
    Report {
        /// Client identifier
        client_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_template_command_with_globals() {
        let cli = Cli::try_parse_from([
            "agencyos",
            "template",
            "3-month SEO Audit plan",
            "--use-for",
            "1",
            "--logging-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.logging_level, "debug");
        match cli.command {
            Command::Template { prompt, use_for } => {
                assert_eq!(prompt, "3-month SEO Audit plan");
                assert_eq!(use_for.as_deref(), Some("1"));
            }
            _ => panic!("expected template command"),
        }
    }

    #[test]
    fn serve_port_is_optional() {
        let cli = Cli::try_parse_from(["agencyos", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: None }));
        assert!(!cli.log_to_file);
    }

    #[test]
    fn command_is_required() {
        assert!(Cli::try_parse_from(["agencyos"]).is_err());
    }
}

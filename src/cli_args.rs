use clap::Parser;

/// In-memory library of books served over HTTP, with OpenAPI documentation.
#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Path to the YAML server configuration file.
    #[clap(long, env = "CONFIG_FILE", default_value = "config.yaml")]
    pub config_file: String,
}

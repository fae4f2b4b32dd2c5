//! Server configuration.
//!
//! Priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env`)
//! 3. TOML config file (`~/.config/todoshare/config.toml`)
//! 4. Compiled defaults
//!
//! The Google client secret only ever lives here, on the server.

use std::path::{Path, PathBuf};

use todoshare_google::Credentials;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4100";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error(
        "Google credentials not found.\n\n\
        Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET, or add to {0}:\n\n\
        [google]\n\
        client_id = \"your-client-id.apps.googleusercontent.com\"\n\
        client_secret = \"your-client-secret\"\n\n\
        See https://console.cloud.google.com/apis/credentials for setup."
    )]
    MissingCredentials(String),

    #[error("could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerSection,
    google: GoogleSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
    public_origin: Option<String>,
    session_file: Option<PathBuf>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct GoogleSection {
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "todoshare server")]
pub struct CliArgs {
    /// Address to listen on.
    #[arg(short, long, env = "TODOSHARE_ADDR")]
    pub bind: Option<String>,

    /// Origin the browser reaches this server at; the OAuth redirect goes to `{origin}/auth/callback`.
    #[arg(long, env = "TODOSHARE_ORIGIN")]
    pub origin: Option<String>,

    /// Path to config file (default: `~/.config/todoshare/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where the Google session is stored (default: `~/.config/todoshare/session.toml`).
    #[arg(long, env = "TODOSHARE_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[arg(long, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    pub google_client_id: Option<String>,

    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TODOSHARE_LOG")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub public_origin: String,
    pub session_file: PathBuf,
    pub credentials: Credentials,
    pub log_level: String,
}

pub fn base_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join("todoshare"))
}

impl ServerConfig {
    /// Load configuration by merging CLI args, env vars, and the TOML file.
    ///
    /// An explicit `--config` must exist; the default path may be missing.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => base_dir()?.join("config.toml"),
        };
        let default_session_file = base_dir()?.join("session.toml");

        Self::resolve(cli, file, &config_path, default_session_file)
    }

    fn resolve(
        cli: &CliArgs,
        file: ConfigFile,
        config_path: &Path,
        default_session_file: PathBuf,
    ) -> Result<Self, ConfigError> {
        let bind_addr = cli
            .bind
            .clone()
            .or(file.server.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let public_origin = cli
            .origin
            .clone()
            .or(file.server.public_origin)
            .unwrap_or_else(|| format!("http://{bind_addr}"));

        let session_file = cli
            .session_file
            .clone()
            .or(file.server.session_file)
            .unwrap_or(default_session_file);

        let client_id = cli.google_client_id.clone().or(file.google.client_id);
        let client_secret = cli.google_client_secret.clone().or(file.google.client_secret);

        let credentials = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Credentials {
                    client_id,
                    client_secret,
                }
            }
            _ => {
                return Err(ConfigError::MissingCredentials(
                    config_path.display().to_string(),
                ));
            }
        };

        Ok(ServerConfig {
            bind_addr,
            public_origin,
            session_file,
            credentials,
            log_level: cli.log_level.clone(),
        })
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = match explicit_path {
        Some(p) => {
            let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
                path: p.to_path_buf(),
                source: e,
            })?;
            return Ok(toml::from_str(&contents)?);
        }
        None => match dirs::config_dir() {
            Some(dir) => dir.join("todoshare").join("config.toml"),
            None => return Ok(ConfigFile::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(cli: &CliArgs, toml_str: &str) -> Result<ServerConfig, ConfigError> {
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        ServerConfig::resolve(
            cli,
            file,
            Path::new("/tmp/todoshare/config.toml"),
            PathBuf::from("/tmp/todoshare/session.toml"),
        )
    }

    #[test]
    fn file_values_fill_in_defaults() {
        let config = resolve(
            &CliArgs::default(),
            r#"
[server]
bind_addr = "0.0.0.0:8080"
public_origin = "https://todo.example.com"

[google]
client_id = "id"
client_secret = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.public_origin, "https://todo.example.com");
        assert_eq!(config.session_file, PathBuf::from("/tmp/todoshare/session.toml"));
        assert_eq!(config.credentials.client_id, "id");
    }

    #[test]
    fn cli_overrides_file() {
        let cli = CliArgs {
            bind: Some("127.0.0.1:9999".into()),
            google_client_id: Some("cli-id".into()),
            ..Default::default()
        };

        let config = resolve(
            &cli,
            r#"
[server]
bind_addr = "0.0.0.0:8080"

[google]
client_id = "file-id"
client_secret = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9999");
        assert_eq!(config.public_origin, "http://127.0.0.1:9999");
        assert_eq!(config.credentials.client_id, "cli-id");
        assert_eq!(config.credentials.client_secret, "secret");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = resolve(
            &CliArgs::default(),
            r#"
[google]
client_id = "id"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingCredentials(_)));
        assert!(err.to_string().contains("GOOGLE_CLIENT_SECRET"));
    }
}

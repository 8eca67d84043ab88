use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::MovePolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

/// Flags for the server binary. Anything left unset falls back to the TOML
/// file, then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "freezer-tracker")]
#[command(about = "Track what is stored in which freezer")]
pub struct ServeArgs {
    /// Address to serve on, e.g. `:8080`, `127.0.0.1:8080` or `localhost:8080`
    #[arg(long, alias = "port", env = "FREEZER_LISTEN")]
    pub listen: Option<String>,

    /// Path of the JSON state document
    #[arg(long, env = "FREEZER_STORE")]
    pub store: Option<PathBuf>,

    /// Directory holding the built web UI
    #[arg(long, env = "FREEZER_UI_DIR")]
    pub ui_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "FREEZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// `strict` rejects moves to unknown freezers, `lossy` drops the container
    #[arg(long)]
    pub move_policy: Option<MovePolicy>,

    /// `compact` or `json`
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServeArgs {
    /// Defaults, then the TOML file (if any), then explicit flags.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            settings = settings.merge_toml(&file_config);
        }

        if let Some(listen) = &self.listen {
            settings.listen = listen.clone();
        }
        if let Some(store) = &self.store {
            settings.store_path = store.clone();
        }
        if let Some(ui_dir) = &self.ui_dir {
            settings.ui_dir = Some(ui_dir.clone());
        }
        if let Some(policy) = self.move_policy {
            settings.move_policy = policy;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        if self.verbose {
            settings.verbose = true;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_without_config_file() {
        let args = ServeArgs::parse_from([
            "freezer-tracker",
            "--port",
            ":9000",
            "--move-policy",
            "lossy",
        ]);

        let settings = args.resolve().unwrap();
        assert_eq!(settings.listen, ":9000");
        assert_eq!(settings.move_policy, MovePolicy::Lossy);
        assert_eq!(settings.store_path, PathBuf::from("contents.json"));
    }

    #[test]
    fn test_port_flag_accepts_host_name() {
        let args = ServeArgs::parse_from(["freezer-tracker", "--port", "localhost:8080"]);

        let settings = args.resolve().unwrap();
        assert_eq!(settings.bind_addr().unwrap(), "localhost:8080");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[server]\nlisten = \":7000\"\n[store]\npath = \"from-toml.json\"\n[logging]\nformat = \"json\"\n",
            )
            .unwrap();
        let config_path = temp_file.path().to_string_lossy().into_owned();

        let args = ServeArgs::parse_from([
            "freezer-tracker",
            "--config",
            config_path.as_str(),
            "--store",
            "from-flag.json",
        ]);

        let settings = args.resolve().unwrap();
        assert_eq!(settings.listen, ":7000");
        assert_eq!(settings.store_path, PathBuf::from("from-flag.json"));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = ServeArgs::parse_from([
            "freezer-tracker",
            "--config",
            "/nonexistent/freezer-tracker.toml",
        ]);
        assert!(args.resolve().is_err());
    }
}

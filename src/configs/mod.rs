use crate::{
    components::{StoreSource, DEFAULT_EXPORT_ARGS, DEFAULT_EXPORT_PROGRAM, DEFAULT_TRUST_LIST_URL},
    error::AppResult,
};
use clap::Parser;
use config::{Config, Environment as ConfigEnv, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::{default::Default, path::PathBuf};

pub const DEFAULT_OUTPUT: &str = "roots_list.go";

/// Generates the root CA bundle embedded in the mobile runtime.
#[derive(Clone, Debug, Default, Parser)]
#[command(version, about)]
pub struct Args {
    /// File name to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_trust_list_url")]
    pub trust_list_url: String,

    #[serde(default)]
    pub store: StoreConfig,
}

impl GlobalConfig {
    pub fn load_config(args: &Args) -> AppResult<Self> {
        let mut builder = Config::builder()
            .add_source(ConfigFile::with_name("roots-gen").required(false));
        if let Some(path) = &args.config {
            builder = builder.add_source(ConfigFile::from(path.as_path()).required(true));
        }
        let cfg = builder
            .add_source(
                ConfigEnv::with_prefix("ROOTSGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option(
                "output",
                args.output
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            trust_list_url: default_trust_list_url(),
            store: Default::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_trust_list_url() -> String {
    DEFAULT_TRUST_LIST_URL.to_owned()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_program")]
    pub program: PathBuf,

    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Read the store from this PEM file instead of running `program`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl StoreConfig {
    pub fn source(&self) -> StoreSource {
        match &self.file {
            Some(path) => StoreSource::File(path.clone()),
            None => StoreSource::Command {
                program: self.program.clone(),
                args: self.args.clone(),
            },
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            file: None,
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_PROGRAM)
}

fn default_args() -> Vec<String> {
    DEFAULT_EXPORT_ARGS.iter().map(|arg| arg.to_string()).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::{fs, path::Path};

    #[test]
    fn defaults_without_any_source() {
        let cfg: GlobalConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.output, Path::new("roots_list.go"));
        assert_eq!(cfg.trust_list_url, "https://support.apple.com/en-us/HT208125");
        assert_eq!(cfg.store.source(), StoreSource::default());
        assert_eq!(cfg.store.source(), GlobalConfig::default().store.source());
    }

    #[test]
    fn store_file_replaces_command() {
        let store = StoreConfig {
            file: Some("roots.pem".into()),
            ..Default::default()
        };
        assert_eq!(store.source(), StoreSource::File("roots.pem".into()));
    }

    #[test]
    fn config_file_and_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roots.toml");
        fs::write(
            &path,
            "output = \"from_file.go\"\n\
             trust_list_url = \"http://127.0.0.1/trusted\"\n\
             [store]\n\
             file = \"system.pem\"\n",
        )
        .unwrap();

        let args = Args {
            output: None,
            config: Some(path.clone()),
        };
        let cfg = GlobalConfig::load_config(&args).unwrap();
        assert_eq!(cfg.output, Path::new("from_file.go"));
        assert_eq!(cfg.trust_list_url, "http://127.0.0.1/trusted");
        assert_eq!(cfg.store.source(), StoreSource::File("system.pem".into()));

        let args = Args {
            output: Some("from_cli.go".into()),
            config: Some(path),
        };
        let cfg = GlobalConfig::load_config(&args).unwrap();
        assert_eq!(cfg.output, Path::new("from_cli.go"));
    }

    #[test]
    fn parses_command_line() {
        let args = Args::try_parse_from(["roots-gen", "--output", "roots.go"]).unwrap();
        assert_eq!(args.output, Some(PathBuf::from("roots.go")));
        assert!(args.config.is_none());
    }
}

use crate::{
    components::FingerprintIndex,
    error::{AppResult, ErrorReason},
};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tokio::process::Command;

pub const DEFAULT_EXPORT_PROGRAM: &str = "/usr/bin/security";
pub const DEFAULT_EXPORT_ARGS: [&str; 4] = [
    "find-certificate",
    "-a",
    "-p",
    "/System/Library/Keychains/SystemRootCertificates.keychain",
];

/// Where the local root store comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreSource {
    /// Run a command that prints the store as concatenated PEM blocks.
    Command { program: PathBuf, args: Vec<String> },
    /// Read a PEM bundle from disk.
    File(PathBuf),
}

impl Default for StoreSource {
    fn default() -> Self {
        Self::Command {
            program: DEFAULT_EXPORT_PROGRAM.into(),
            args: DEFAULT_EXPORT_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl StoreSource {
    pub async fn load_index(&self) -> AppResult<FingerprintIndex> {
        match self {
            StoreSource::Command { program, args } => {
                let stdout = export(program, args).await?;
                Ok(FingerprintIndex::from_pem(&stdout))
            }
            StoreSource::File(path) => FingerprintIndex::read_from(File::open(path)?),
        }
    }
}

async fn export(program: &Path, args: &[String]) -> AppResult<Vec<u8>> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| ErrorReason::ExportSpawn {
            program: program.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ErrorReason::ExportFailed {
            program: program.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        }
        .into());
    }

    debug!("{} exported {} bytes", program.display(), output.stdout.len());
    Ok(output.stdout)
}

#[cfg(feature = "backtrace")]
use backtrace::Backtrace;
use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
    process::ExitStatus,
};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    reason: ErrorReason,
    #[cfg(feature = "backtrace")]
    bt: Backtrace,
}

impl AppError {
    pub(crate) fn new(reason: ErrorReason) -> Self {
        Self {
            reason,
            #[cfg(feature = "backtrace")]
            bt: Backtrace::new(),
        }
    }

    pub fn reason(&self) -> &ErrorReason {
        &self.reason
    }
}

impl<E> From<E> for AppError
where
    E: Into<ErrorReason>,
{
    fn from(reason: E) -> Self {
        Self::new(reason.into())
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.reason().source()
    }
}

#[derive(Debug, Error)]
pub enum ErrorReason {
    #[error("failed to load the configuration")]
    Config(#[from] config::ConfigError),
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("failed to retrieve the trust list")]
    Transport(#[from] reqwest::Error),
    #[error("expected section `{0}` not found in the trust list document")]
    SectionNotFound(&'static str),
    #[error("the trusted section of the trust list document is not terminated")]
    UnterminatedSection,
    #[error("expected column `{0}` not found in the trust list table")]
    ColumnNotFound(&'static str),
    #[error("trust list row {row} has {cells} cells, at least {required} required")]
    RowShape {
        row: usize,
        cells: usize,
        required: usize,
    },
    #[error("failed to run the store export command `{program}`")]
    ExportSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store export command `{program}` exited with {status}: {stderr}")]
    ExportFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("failed to write the generated file `{}`", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("X509 certificate parsing error")]
    X509(#[from] x509_certificate::X509CertificateError),
    #[error("failed to decode the certificate subject: {0}")]
    Subject(String),
}

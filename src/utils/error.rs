use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown check '{0}'")]
    UnknownCheck(String),

    #[error("no '{command}' output was collected for device {device}")]
    SnapshotNotFound { device: String, command: String },

    #[error("device {device}: '{command}' output is missing field '{field}'")]
    MalformedSnapshot {
        device: String,
        command: String,
        field: String,
    },

    #[error("device {device}: '{command}' output is not valid JSON: {source}")]
    SnapshotDecode {
        device: String,
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("device {device}, check {check}: {source}")]
    Device {
        device: String,
        check: String,
        #[source]
        source: Box<AuditError>,
    },
}

impl AuditError {
    pub fn malformed(device: &str, command: &str, field: impl Into<String>) -> Self {
        AuditError::MalformedSnapshot {
            device: device.to_string(),
            command: command.to_string(),
            field: field.into(),
        }
    }

    pub fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        AuditError::Write { path: path.to_path_buf(), source }
    }

    /// Attach the check that was running when `self` occurred.
    pub fn in_check(self, device: &str, check: &str) -> Self {
        AuditError::Device {
            device: device.to_string(),
            check: check.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

use std::path::PathBuf;

/// Failures of the driver itself. Grammar violations are not errors here;
/// they are part of a job's result.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A configured input or output folder does not exist.
    #[error("{role} folder not found: {}", .path.display())]
    MissingDir { role: &'static str, path: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}

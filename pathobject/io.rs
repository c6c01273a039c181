use std::io::Write as _;

/// Abstract interface to the file system and process environment.
///
/// Every `Path` method that touches the outside world goes through the `Io` of
/// its path type. Paths are passed as plain strings in the path type's own
/// dialect, so an implementation backed by the real OS only makes sense for
/// the native dialect.
///
/// This abstraction exists to allow testing file and environment access in a
/// controlled environment.
pub trait Io: Send + Sync + 'static {
    /// The current working directory.
    fn current_dir(&self) -> Result<String, std::io::Error>;

    /// Resolve symlinks and relative components against the filesystem.
    fn canonicalize(&self, path: &str) -> Result<String, std::io::Error>;

    /// Read a file from the filesystem.
    fn read_file(&self, path: &str) -> Result<Vec<u8>, std::io::Error>;

    /// Write a file to the filesystem, truncating it unless `append` is true.
    fn write_file(&self, path: &str, data: &[u8], append: bool) -> Result<(), std::io::Error>;

    /// Read environment variable.
    fn read_env(&self, name: &str) -> Option<String>;
}

/// [`Io`] backed by `std::fs` and `std::env`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSystem(());

impl RealSystem {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn into_utf8(path: std::path::PathBuf) -> Result<String, std::io::Error> {
    path.into_os_string().into_string().map_err(|path| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("path is not valid UTF-8: {}", path.to_string_lossy()),
        )
    })
}

impl Io for RealSystem {
    fn current_dir(&self) -> Result<String, std::io::Error> {
        into_utf8(std::env::current_dir()?)
    }

    fn canonicalize(&self, path: &str) -> Result<String, std::io::Error> {
        tracing::trace!("canonicalize {path}");
        into_utf8(std::fs::canonicalize(path)?)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, std::io::Error> {
        tracing::trace!("read {path}");
        std::fs::read(path)
    }

    fn write_file(&self, path: &str, data: &[u8], append: bool) -> Result<(), std::io::Error> {
        tracing::trace!("write {path} ({} bytes, append: {append})", data.len());
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        file.write_all(data)
    }

    fn read_env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

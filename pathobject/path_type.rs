use std::sync::{Arc, LazyLock};

use pathobject_syntax::{Capabilities, ModuleError, Nt, PathModule, Posix};

use crate::{AsPathStr, Error, Io, Path, RealSystem};

/// A path dialect binding: the path module that decides all syntax questions
/// for a family of [`Path`] values, plus a display name.
///
/// Cheap to clone; all clones share the same binding. Paths created through a
/// `PathType` carry a handle to it.
///
/// Two path types are the same dialect if their modules have the same
/// [`PathModule::name()`]. The display name and the [`Io`] do not take part in
/// comparisons.
#[derive(Clone)]
pub struct PathType {
    inner: Arc<Binding>,
}

struct Binding {
    name: Arc<str>,
    module: Arc<dyn PathModule>,
    io: Arc<dyn Io>,
}

static NATIVE: LazyLock<PathType> = LazyLock::new(|| {
    #[cfg(windows)]
    let module: Arc<dyn PathModule> = Arc::new(Nt);
    #[cfg(not(windows))]
    let module: Arc<dyn PathModule> = Arc::new(Posix);
    PathType::bind(module, "Path", Arc::new(RealSystem::new()))
});

static POSIX: LazyLock<PathType> =
    LazyLock::new(|| PathType::bind(Arc::new(Posix), "POSIXPath", Arc::new(RealSystem::new())));

static NT: LazyLock<PathType> =
    LazyLock::new(|| PathType::bind(Arc::new(Nt), "NTPath", Arc::new(RealSystem::new())));

impl PathType {
    fn bind(module: Arc<dyn PathModule>, name: impl Into<Arc<str>>, io: Arc<dyn Io>) -> Self {
        Self {
            inner: Arc::new(Binding {
                name: name.into(),
                module,
                io,
            }),
        }
    }

    /// The path type for the host's own path conventions, named `Path`.
    #[must_use]
    pub fn native() -> Self {
        NATIVE.clone()
    }

    /// POSIX paths, on any host. Named `POSIXPath`.
    #[must_use]
    pub fn posix() -> Self {
        POSIX.clone()
    }

    /// Windows NT paths, on any host. Named `NTPath`.
    #[must_use]
    pub fn nt() -> Self {
        NT.clone()
    }

    /// Create a path type bound to `module`.
    ///
    /// The functions in [`Capabilities::REQUIRED`] are validated here, and a
    /// module lacking any of them is rejected with [`Error::Configuration`].
    /// Optional functions (`splitunc()`, `expanduser()`, ...) are only checked
    /// when a path method needs them, which then fails with the same error.
    ///
    /// `name` is used when rendering paths with `{:?}` and has no effect on
    /// behavior.
    pub fn for_path_module<M: PathModule>(
        module: M,
        name: impl Into<Arc<str>>,
    ) -> Result<Self, Error> {
        Self::for_shared_module(Arc::new(module), name)
    }

    /// Same as [`PathType::for_path_module()`], for a module that is already
    /// shared.
    pub fn for_shared_module(
        module: Arc<dyn PathModule>,
        name: impl Into<Arc<str>>,
    ) -> Result<Self, Error> {
        let missing = Capabilities::REQUIRED.difference(module.capabilities());
        if let Some(function) = missing.function_names().next() {
            return Err(Error::Configuration {
                module: module.name().to_owned(),
                function,
            });
        }

        let name = name.into();
        tracing::debug!("bound path type `{name}` to module `{}`", module.name());
        Ok(Self::bind(module, name, Arc::new(RealSystem::new())))
    }

    /// Same dialect, different display name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<Arc<str>>) -> Self {
        Self::bind(self.inner.module.clone(), name, self.inner.io.clone())
    }

    /// Same dialect, performing file and environment access through `io`.
    #[must_use]
    pub fn with_io(&self, io: Arc<dyn Io>) -> Self {
        Self::bind(self.inner.module.clone(), self.inner.name.clone(), io)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    #[must_use]
    pub fn module(&self) -> &dyn PathModule {
        &*self.inner.module
    }

    #[inline]
    #[must_use]
    pub fn io(&self) -> &dyn Io {
        &*self.inner.io
    }

    #[inline]
    #[must_use]
    pub fn is_same_dialect(&self, other: &PathType) -> bool {
        self.inner.module.name() == other.inner.module.name()
    }

    /// Wrap `path` without any validation or normalization.
    #[inline]
    #[must_use]
    pub fn path(&self, path: impl Into<String>) -> Path {
        Path::from_parts(path.into(), self.clone())
    }

    /// Wrap anything that can be interpreted as a path of this dialect.
    pub fn try_path(&self, value: impl AsPathStr) -> Result<Path, Error> {
        Ok(self.path(value.as_path_str(self)?))
    }

    /// The current working directory.
    pub fn cwd(&self) -> Result<Path, Error> {
        Ok(self.path(self.io().current_dir()?))
    }

    /// Fail with [`Error::Configuration`] unless the module reports all of
    /// `capabilities`.
    pub(crate) fn require(&self, capabilities: Capabilities) -> Result<(), Error> {
        let missing = capabilities.difference(self.module().capabilities());
        match missing.function_names().next() {
            Some(function) => Err(Error::Configuration {
                module: self.module().name().to_owned(),
                function,
            }),
            None => Ok(()),
        }
    }

    /// Attribute the result of a module call to this path type's module.
    #[inline]
    pub(crate) fn call<T>(&self, result: Result<T, ModuleError>) -> Result<T, Error> {
        result.map_err(|err| Error::from_module(self.module().name(), err))
    }
}

impl PartialEq for PathType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.is_same_dialect(other)
    }
}

impl Eq for PathType {}

impl std::fmt::Debug for PathType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathType")
            .field("name", &self.name())
            .field("module", &self.module().name())
            .finish_non_exhaustive()
    }
}

impl Default for PathType {
    #[inline]
    fn default() -> Self {
        Self::native()
    }
}

use std::borrow::Cow;

/// Environment variable lookup used by `expanduser()` and `expandvars()`.
pub type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

bitflags::bitflags! {
    /// The set of functions a [`PathModule`] actually implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        const JOIN = 1 << 0;
        const SPLIT = 1 << 1;
        const SPLITDRIVE = 1 << 2;
        const NORMPATH = 1 << 3;
        const ISABS = 1 << 4;
        const SPLITEXT = 1 << 5;
        const NORMCASE = 1 << 6;
        const BASENAME = 1 << 7;
        const DIRNAME = 1 << 8;
        const SPLITUNC = 1 << 9;
        const EXPANDUSER = 1 << 10;
        const EXPANDVARS = 1 << 11;

        /// Every path type needs these.
        const REQUIRED = Self::JOIN.bits()
            | Self::SPLIT.bits()
            | Self::SPLITDRIVE.bits()
            | Self::NORMPATH.bits()
            | Self::ISABS.bits();
    }
}

const FUNCTION_NAMES: [(Capabilities, &str); 12] = [
    (Capabilities::JOIN, "join"),
    (Capabilities::SPLIT, "split"),
    (Capabilities::SPLITDRIVE, "splitdrive"),
    (Capabilities::NORMPATH, "normpath"),
    (Capabilities::ISABS, "isabs"),
    (Capabilities::SPLITEXT, "splitext"),
    (Capabilities::NORMCASE, "normcase"),
    (Capabilities::BASENAME, "basename"),
    (Capabilities::DIRNAME, "dirname"),
    (Capabilities::SPLITUNC, "splitunc"),
    (Capabilities::EXPANDUSER, "expanduser"),
    (Capabilities::EXPANDVARS, "expandvars"),
];

impl Capabilities {
    /// Names of the functions in this set, in declaration order.
    pub fn function_names(self) -> impl Iterator<Item = &'static str> {
        FUNCTION_NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ModuleError {
    #[error("`{function}` is not supported by this path module")]
    Unsupported { function: &'static str },
    #[error("`{function}` rejected its input: {message}")]
    Invalid {
        function: &'static str,
        message: String,
    },
}

impl ModuleError {
    #[inline]
    #[must_use]
    pub const fn unsupported(function: &'static str) -> Self {
        Self::Unsupported { function }
    }
}

/// A path-syntax dialect: the string-level operations of one filesystem path
/// convention.
///
/// Every function has a default implementation returning
/// [`ModuleError::Unsupported`], so a module only implements what it needs.
/// A few defaults are built from other functions and the separator constants
/// instead. [`PathModule::capabilities()`] must report exactly the functions a
/// module supports; consumers use it to validate a module up front.
///
/// Functions never access the filesystem or the process environment. The
/// expansion functions receive an explicit [`Env`] lookup instead.
pub trait PathModule: Send + Sync + 'static {
    /// Module identity. Two modules with the same name are considered the
    /// same dialect.
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Primary separator.
    fn sep(&self) -> char;

    /// Alternative separator, if the dialect accepts one.
    fn altsep(&self) -> Option<char> {
        None
    }

    fn curdir(&self) -> &str {
        "."
    }

    fn pardir(&self) -> &str {
        ".."
    }

    fn extsep(&self) -> char {
        '.'
    }

    /// Join `parts` onto `base`. An absolute part discards everything before
    /// it.
    fn join(&self, base: &str, parts: &[&str]) -> Result<String, ModuleError> {
        _ = (base, parts);
        Err(ModuleError::unsupported("join"))
    }

    /// Split into `(head, tail)`, where `tail` is the last component.
    fn split<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("split"))
    }

    /// Split into `(drive, rest)`. `drive` is empty if the dialect has no
    /// drive syntax.
    fn splitdrive<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("splitdrive"))
    }

    /// Split into `(root, ext)`, where `ext` is empty or starts with
    /// [`PathModule::extsep()`]. The default looks for the extension after the
    /// last [`PathModule::sep()`] or [`PathModule::altsep()`].
    fn splitext<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        Ok(split_extension(self, path))
    }

    fn normpath(&self, path: &str) -> Result<String, ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("normpath"))
    }

    fn isabs(&self, path: &str) -> Result<bool, ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("isabs"))
    }

    fn normcase<'a>(&self, path: &'a str) -> Result<Cow<'a, str>, ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("normcase"))
    }

    fn basename<'a>(&self, path: &'a str) -> Result<&'a str, ModuleError> {
        self.split(path).map(|(_, tail)| tail)
    }

    fn dirname<'a>(&self, path: &'a str) -> Result<&'a str, ModuleError> {
        self.split(path).map(|(head, _)| head)
    }

    /// Split into `(unc_mount, rest)`, where `unc_mount` is a
    /// `\\host\share` prefix or empty.
    fn splitunc<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        _ = path;
        Err(ModuleError::unsupported("splitunc"))
    }

    fn expanduser<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        _ = (path, env);
        Err(ModuleError::unsupported("expanduser"))
    }

    fn expandvars<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        _ = (path, env);
        Err(ModuleError::unsupported("expandvars"))
    }
}

/// Leading extension separators of the final component do not start an
/// extension, so `.bashrc` has none.
fn split_extension<'a, M: PathModule + ?Sized>(module: &M, path: &'a str) -> (&'a str, &'a str) {
    let (sep, altsep, extsep) = (module.sep(), module.altsep(), module.extsep());
    let start = path
        .rmatch_indices(|c: char| c == sep || Some(c) == altsep)
        .next()
        .map_or(0, |(index, matched)| index + matched.len());
    let name = &path[start..];
    match name.rfind(extsep) {
        Some(dot) if name[..dot].chars().any(|c| c != extsep) => path.split_at(start + dot),
        _ => (path, ""),
    }
}

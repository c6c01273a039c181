mod file;
mod relative;
mod split_all;

use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    fmt::{Debug, Display},
    hash::Hash,
    ops::Add,
};

use pathobject_syntax::Capabilities;

use crate::{Error, PathType};

pub use file::*;
pub use split_all::*;

/// A path string bound to a path dialect.
///
/// `Path` is immutable: every operation returns a new value. All syntax
/// decisions are delegated to the module of the path's [`PathType`], and
/// results that are paths themselves come back as `Path` values of the same
/// type. Non-path results (booleans, single name components, extensions) are
/// plain values.
///
/// Comparisons only see the dialect and the string:
///
/// - Paths of the same dialect are equal iff their strings are equal. The
///   display name of the path type is ignored.
/// - Paths of different dialects are never equal and are unordered
///   (`partial_cmp()` returns `None`). Use [`Path::try_cmp()`] to get an error
///   instead.
/// - Comparing with a `str` compares the strings only.
#[derive(Clone)]
pub struct Path {
    path: String,
    kind: PathType,
}

impl Path {
    /// A path of the native dialect.
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        PathType::native().path(path)
    }

    /// The current working directory, as a native path.
    pub fn cwd() -> Result<Self, Error> {
        PathType::native().cwd()
    }

    #[inline]
    pub(crate) fn from_parts(path: String, kind: PathType) -> Self {
        Self { path, kind }
    }

    /// A new path of the same type.
    #[inline]
    fn sibling(&self, path: impl Into<String>) -> Self {
        self.kind.path(path)
    }

    #[inline]
    #[must_use]
    pub fn path_type(&self) -> &PathType {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.path
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Plain string concatenation, keeping the path type.
    #[must_use]
    pub fn concat(&self, suffix: &str) -> Self {
        let mut path = String::with_capacity(self.path.len() + suffix.len());
        path.push_str(&self.path);
        path.push_str(suffix);
        self.sibling(path)
    }

    pub fn is_absolute(&self) -> Result<bool, Error> {
        self.kind.call(self.kind.module().isabs(&self.path))
    }

    /// Collapse redundant separators and `.`/`..` components.
    pub fn normalize(&self) -> Result<Self, Error> {
        let normalized = self.kind.call(self.kind.module().normpath(&self.path))?;
        Ok(self.sibling(normalized))
    }

    /// Normalize case, and separators where the dialect has more than one.
    pub fn normcase(&self) -> Result<Self, Error> {
        self.kind.require(Capabilities::NORMCASE)?;
        let normalized = self.kind.call(self.kind.module().normcase(&self.path))?;
        Ok(self.sibling(normalized.into_owned()))
    }

    /// The normalized absolute path, resolving relative paths against the
    /// current working directory.
    pub fn absolute(&self) -> Result<Self, Error> {
        let module = self.kind.module();
        if self.is_absolute()? {
            return self.normalize();
        }
        let cwd = self.kind.io().current_dir()?;
        let joined = self.kind.call(module.join(&cwd, &[self.path.as_str()]))?;
        let normalized = self.kind.call(module.normpath(&joined))?;
        Ok(self.sibling(normalized))
    }

    /// The canonical path, with symlinks resolved. Accesses the filesystem.
    pub fn realpath(&self) -> Result<Self, Error> {
        Ok(self.sibling(self.kind.io().canonicalize(&self.path)?))
    }

    pub fn expanduser(&self) -> Result<Self, Error> {
        self.kind.require(Capabilities::EXPANDUSER)?;
        let io = self.kind.io();
        let expanded = self
            .kind
            .call(self.kind.module().expanduser(&self.path, &|name: &str| io.read_env(name)))?;
        Ok(self.sibling(expanded.into_owned()))
    }

    pub fn expandvars(&self) -> Result<Self, Error> {
        self.kind.require(Capabilities::EXPANDVARS)?;
        let io = self.kind.io();
        let expanded = self
            .kind
            .call(self.kind.module().expandvars(&self.path, &|name: &str| io.read_env(name)))?;
        Ok(self.sibling(expanded.into_owned()))
    }

    /// Join `parts` onto this path using the dialect's rules. An absolute part
    /// discards everything before it.
    pub fn joinpath<I>(&self, parts: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: AsPathStr,
    {
        let parts: Vec<I::Item> = parts.into_iter().collect();
        let parts = parts
            .iter()
            .map(|part| part.as_path_str(&self.kind))
            .collect::<Result<Vec<&str>, Error>>()?;
        let joined = self.kind.call(self.kind.module().join(&self.path, &parts))?;
        Ok(self.sibling(joined))
    }

    /// Join a single part onto this path.
    #[inline]
    pub fn join(&self, part: impl AsPathStr) -> Result<Self, Error> {
        self.joinpath([part])
    }

    /// The directory part of the path.
    pub fn dirname(&self) -> Result<Self, Error> {
        let dirname = self.kind.call(self.kind.module().dirname(&self.path))?;
        Ok(self.sibling(dirname))
    }

    /// Synonym for [`Path::dirname()`].
    #[inline]
    pub fn parent(&self) -> Result<Self, Error> {
        self.dirname()
    }

    /// The final component of the path.
    pub fn basename(&self) -> Result<String, Error> {
        let basename = self.kind.call(self.kind.module().basename(&self.path))?;
        Ok(basename.to_owned())
    }

    /// Synonym for [`Path::basename()`].
    #[inline]
    pub fn name(&self) -> Result<String, Error> {
        self.basename()
    }

    /// `(parent, name)`.
    pub fn splitpath(&self) -> Result<(Self, String), Error> {
        let (parent, child) = self.kind.call(self.kind.module().split(&self.path))?;
        Ok((self.sibling(parent), child.to_owned()))
    }

    /// `(drive, rest)`. The drive is empty if there is none, which is always
    /// the case for dialects without drive syntax.
    ///
    /// Concatenating the two always gives back the original string.
    pub fn splitdrive(&self) -> Result<(Self, String), Error> {
        let (drive, rest) = self.kind.call(self.kind.module().splitdrive(&self.path))?;
        Ok((self.sibling(drive), rest.to_owned()))
    }

    /// The drive specifier, e.g. `C:`.
    pub fn drive(&self) -> Result<Self, Error> {
        self.splitdrive().map(|(drive, _)| drive)
    }

    /// `(stem, extension)`, where the extension keeps its leading dot, so that
    /// `stem + extension == self`.
    pub fn splitext(&self) -> Result<(Self, String), Error> {
        self.kind.require(Capabilities::SPLITEXT)?;
        let (stem, ext) = self.kind.call(self.kind.module().splitext(&self.path))?;
        Ok((self.sibling(stem), ext.to_owned()))
    }

    /// Remove one extension.
    pub fn stripext(&self) -> Result<Self, Error> {
        self.splitext().map(|(stem, _)| stem)
    }

    /// The extension including its dot, e.g. `.py`, or empty.
    pub fn ext(&self) -> Result<String, Error> {
        self.splitext().map(|(_, ext)| ext)
    }

    /// `(unc_mount, rest)`. Only available for dialects with UNC paths.
    pub fn splitunc(&self) -> Result<(Self, String), Error> {
        self.kind.require(Capabilities::SPLITUNC)?;
        let (unc, rest) = self.kind.call(self.kind.module().splitunc(&self.path))?;
        Ok((self.sibling(unc), rest.to_owned()))
    }

    /// The UNC mount point for this path. Empty for paths on local drives.
    pub fn uncshare(&self) -> Result<Self, Error> {
        self.splitunc().map(|(unc, _)| unc)
    }

    /// Whether the final component matches the shell-style `pattern`, after
    /// applying the dialect's case normalization to both.
    ///
    /// Only `*`, `?`, and `[...]` are special. Braces are literal, and so is a
    /// `[` without a closing `]`.
    pub fn fnmatch(&self, pattern: &str) -> Result<bool, Error> {
        self.kind.require(Capabilities::NORMCASE)?;
        let module = self.kind.module();
        let name = self.basename()?;
        let name = self.kind.call(module.normcase(&name))?;
        let pattern = self.kind.call(module.normcase(pattern))?;
        let matcher = globset::GlobBuilder::new(&fnmatch_to_glob(&pattern))
            .backslash_escape(false)
            .literal_separator(true)
            .build()?
            .compile_matcher();
        Ok(matcher.is_match(&*name))
    }

    /// Compare two paths of the same dialect.
    pub fn try_cmp(&self, other: &Path) -> Result<std::cmp::Ordering, Error> {
        self.partial_cmp(other).ok_or_else(|| Error::DialectMismatch {
            expected: self.kind.module().name().to_owned(),
            found: format!("{other:?}"),
        })
    }
}

/// Translate a shell-style pattern into globset syntax.
fn fnmatch_to_glob(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains(['{', '}', '[']) {
        return Cow::Borrowed(pattern);
    }

    let mut glob = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        let after = &rest[ch.len_utf8()..];
        rest = match ch {
            '{' => {
                glob.push_str("[{]");
                after
            }
            '}' => {
                glob.push_str("[}]");
                after
            }
            '[' => match class_len(after) {
                Some(len) => {
                    glob.push('[');
                    glob.push_str(&after[..len]);
                    &after[len..]
                }
                None => {
                    glob.push_str("[[]");
                    after
                }
            },
            ch => {
                glob.push(ch);
                after
            }
        };
    }
    Cow::Owned(glob)
}

/// Length of a character class body after its `[`, including the closing
/// `]`. A `]` right after the opening (or after `!`) is a member.
fn class_len(body: &str) -> Option<usize> {
    let mut start = usize::from(body.starts_with('!'));
    if body[start..].starts_with(']') {
        start += 1;
    }
    body[start..].find(']').map(|end| start + end + 1)
}

/// Fallible conversion to a path string of a particular dialect.
pub trait AsPathStr {
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error>;
}

impl AsPathStr for str {
    #[inline]
    fn as_path_str(&self, _: &PathType) -> Result<&str, Error> {
        Ok(self)
    }
}

impl AsPathStr for String {
    #[inline]
    fn as_path_str(&self, _: &PathType) -> Result<&str, Error> {
        Ok(self)
    }
}

impl AsPathStr for Path {
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error> {
        if self.kind.is_same_dialect(path_type) {
            Ok(&self.path)
        } else {
            Err(Error::DialectMismatch {
                expected: path_type.module().name().to_owned(),
                found: format!("{self:?}"),
            })
        }
    }
}

impl AsPathStr for OsStr {
    fn as_path_str(&self, _: &PathType) -> Result<&str, Error> {
        self.to_str().ok_or_else(|| Error::TypeMismatch {
            value: self.to_string_lossy().into_owned(),
            expected: "a UTF-8 path string",
        })
    }
}

impl AsPathStr for OsString {
    #[inline]
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error> {
        self.as_os_str().as_path_str(path_type)
    }
}

impl AsPathStr for std::path::Path {
    #[inline]
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error> {
        self.as_os_str().as_path_str(path_type)
    }
}

impl AsPathStr for std::path::PathBuf {
    #[inline]
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error> {
        self.as_os_str().as_path_str(path_type)
    }
}

impl<T: AsPathStr + ?Sized> AsPathStr for &T {
    #[inline]
    fn as_path_str(&self, path_type: &PathType) -> Result<&str, Error> {
        (**self).as_path_str(path_type)
    }
}

impl PartialEq for Path {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.kind.is_same_dialect(&other.kind) && self.path == other.path
    }
}

impl Eq for Path {}

impl PartialOrd for Path {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.kind.is_same_dialect(&other.kind) {
            Some(self.path.cmp(&other.path))
        } else {
            None
        }
    }
}

impl Hash for Path {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.module().name().hash(state);
        self.path.hash(state);
    }
}

impl PartialEq<str> for Path {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.path == other
    }
}

impl PartialEq<&str> for Path {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.path == *other
    }
}

impl PartialEq<String> for Path {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.path == *other
    }
}

impl PartialEq<Path> for str {
    #[inline]
    fn eq(&self, other: &Path) -> bool {
        self == other.path
    }
}

impl PartialEq<Path> for &str {
    #[inline]
    fn eq(&self, other: &Path) -> bool {
        *self == other.path
    }
}

impl Add<&str> for Path {
    type Output = Path;

    #[inline]
    fn add(mut self, rhs: &str) -> Path {
        self.path.push_str(rhs);
        self
    }
}

impl Add<&str> for &Path {
    type Output = Path;

    #[inline]
    fn add(self, rhs: &str) -> Path {
        self.concat(rhs)
    }
}

impl AsRef<str> for Path {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl AsRef<std::path::Path> for Path {
    #[inline]
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.path)
    }
}

impl From<&str> for Path {
    #[inline]
    fn from(path: &str) -> Self {
        Path::new(path)
    }
}

impl From<String> for Path {
    #[inline]
    fn from(path: String) -> Self {
        Path::new(path)
    }
}

impl From<Path> for String {
    #[inline]
    fn from(path: Path) -> Self {
        path.path
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", self.kind.name(), self.path)
    }
}

impl Display for Path {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <str as Display>::fmt(&self.path, f)
    }
}

impl serde::Serialize for Path {
    #[inline]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}

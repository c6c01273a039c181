use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::{Capabilities, Env, ModuleError, PathModule};

/// POSIX path syntax: `/` separated, no drives, case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Posix;

impl Posix {
    pub const SEPARATOR: char = '/';
    pub const NAME: &'static str = "posixpath";
}

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+|\{[^}]*\})").expect("invalid variable regex"));

/// Strip trailing separators, unless the head consists of nothing else.
fn trim_head(head: &str) -> &str {
    if head.bytes().all(|b| b == b'/') {
        head
    } else {
        head.trim_end_matches(Posix::SEPARATOR)
    }
}

impl PathModule for Posix {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    #[inline]
    fn capabilities(&self) -> Capabilities {
        Capabilities::all().difference(Capabilities::SPLITUNC)
    }

    #[inline]
    fn sep(&self) -> char {
        Self::SEPARATOR
    }

    fn join(&self, base: &str, parts: &[&str]) -> Result<String, ModuleError> {
        let mut path = String::from(base);
        for part in parts {
            if part.starts_with(Self::SEPARATOR) {
                path.clear();
            } else if !path.is_empty() && !path.ends_with(Self::SEPARATOR) {
                path.push(Self::SEPARATOR);
            }
            path.push_str(part);
        }
        Ok(path)
    }

    fn split<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        let index = path.rfind(Self::SEPARATOR).map_or(0, |i| i + 1);
        let (head, tail) = path.split_at(index);
        Ok((trim_head(head), tail))
    }

    #[inline]
    fn splitdrive<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        Ok(("", path))
    }

    fn normpath(&self, path: &str) -> Result<String, ModuleError> {
        if path.is_empty() {
            return Ok(String::from("."));
        }

        // POSIX leaves exactly two leading slashes implementation-defined, so
        // they are preserved. Three or more collapse to one.
        let initial_slashes = if path.starts_with("//") && !path.starts_with("///") {
            2
        } else {
            usize::from(path.starts_with(Self::SEPARATOR))
        };

        let mut components = Vec::<&str>::with_capacity(16);
        for component in path.split(Self::SEPARATOR) {
            match component {
                "" | "." => {}
                ".." if (initial_slashes != 0 || !components.is_empty())
                    && components.last() != Some(&"..") =>
                {
                    components.pop();
                }
                component => components.push(component),
            }
        }

        let mut normalized = "/".repeat(initial_slashes);
        normalized.push_str(&components.join("/"));
        if normalized.is_empty() {
            normalized.push('.');
        }
        Ok(normalized)
    }

    #[inline]
    fn isabs(&self, path: &str) -> Result<bool, ModuleError> {
        Ok(path.starts_with(Self::SEPARATOR))
    }

    #[inline]
    fn normcase<'a>(&self, path: &'a str) -> Result<Cow<'a, str>, ModuleError> {
        Ok(Cow::Borrowed(path))
    }

    fn basename<'a>(&self, path: &'a str) -> Result<&'a str, ModuleError> {
        let index = path.rfind(Self::SEPARATOR).map_or(0, |i| i + 1);
        Ok(&path[index..])
    }

    fn dirname<'a>(&self, path: &'a str) -> Result<&'a str, ModuleError> {
        let index = path.rfind(Self::SEPARATOR).map_or(0, |i| i + 1);
        Ok(trim_head(&path[..index]))
    }

    /// Only `~` itself is expanded, from `$HOME`. There is no password
    /// database here, so `~user` is returned unchanged.
    fn expanduser<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(Cow::Borrowed(path));
        };
        if !rest.is_empty() && !rest.starts_with(Self::SEPARATOR) {
            return Ok(Cow::Borrowed(path));
        }
        let Some(home) = env("HOME") else {
            return Ok(Cow::Borrowed(path));
        };

        let mut expanded = String::from(home.trim_end_matches(Self::SEPARATOR));
        expanded.push_str(rest);
        if expanded.is_empty() {
            expanded.push(Self::SEPARATOR);
        }
        Ok(Cow::Owned(expanded))
    }

    /// `$name` and `${name}`. Unknown variables are left in place.
    fn expandvars<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        if !path.contains('$') {
            return Ok(Cow::Borrowed(path));
        }

        let mut expanded = String::with_capacity(path.len());
        let mut last = 0;
        for captures in VARIABLE.captures_iter(path) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let name = &captures[1];
            let name = name
                .strip_prefix('{')
                .and_then(|name| name.strip_suffix('}'))
                .unwrap_or(name);

            expanded.push_str(&path[last..whole.start()]);
            match env(name) {
                Some(value) => expanded.push_str(&value),
                None => expanded.push_str(whole.as_str()),
            }
            last = whole.end();
        }
        expanded.push_str(&path[last..]);
        Ok(Cow::Owned(expanded))
    }
}

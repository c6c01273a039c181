use std::fmt::Debug;

use crate::{Error, Path, PathType};

/// The components of a path, root to leaf.
///
/// An absolute path (or one with a drive) has an anchor, such as `/`, `C:\`,
/// `C:`, or `\\host\share\`. The anchor keeps the path type; the remaining
/// parts are plain strings. Relative paths have no anchor, and a leading `.`
/// or `..` is an ordinary part.
///
/// Rejoining with [`SplitAll::join()`] gives back a path that normalizes to
/// the same thing as the original.
#[derive(Clone, PartialEq, Eq)]
pub struct SplitAll {
    kind: PathType,
    anchor: Option<Path>,
    parts: Vec<String>,
}

impl SplitAll {
    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<&Path> {
        self.anchor.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Option<Path>, Vec<String>) {
        (self.anchor, self.parts)
    }

    /// Number of elements, counting the anchor.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len() + usize::from(self.anchor.is_some())
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Join the anchor and the parts again.
    pub fn join(&self) -> Result<Path, Error> {
        let base = self.anchor.as_ref().map_or("", Path::as_str);
        let parts: Vec<&str> = self.parts.iter().map(String::as_str).collect();
        let joined = self.kind.call(self.kind.module().join(base, &parts))?;
        Ok(self.kind.path(joined))
    }
}

impl Debug for SplitAll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        if let Some(anchor) = &self.anchor {
            list.entry(anchor);
        }
        list.entries(&self.parts).finish()
    }
}

impl Path {
    /// Split the path into all of its components. See [`SplitAll`].
    pub fn splitall(&self) -> Result<SplitAll, Error> {
        let kind = self.path_type();
        let module = kind.module();

        let mut parts = Vec::new();
        let mut location = self.as_str();
        while location != module.curdir() && location != module.pardir() {
            let (head, tail) = kind.call(module.split(location))?;
            // `split()` only ever shortens the head, so this terminates.
            if head.len() >= location.len() {
                break;
            }
            parts.push(tail.to_owned());
            location = head;
        }

        let anchor = if location.is_empty() {
            None
        } else if kind.call(module.isabs(location))?
            || !kind.call(module.splitdrive(location))?.0.is_empty()
        {
            Some(kind.path(location))
        } else {
            parts.push(location.to_owned());
            None
        };

        parts.reverse();
        Ok(SplitAll {
            kind: kind.clone(),
            anchor,
            parts,
        })
    }
}

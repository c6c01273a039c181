use std::borrow::Cow;

use crate::{Capabilities, Env, ModuleError, PathModule};

/// Windows NT path syntax: `\` separated (`/` accepted), drive letters and UNC
/// shares, case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nt;

impl Nt {
    pub const SEPARATOR: char = '\\';
    pub const ALT_SEPARATOR: char = '/';
    pub const NAME: &'static str = "ntpath";
}

const SEPARATORS: [char; 2] = [Nt::SEPARATOR, Nt::ALT_SEPARATOR];

#[inline]
fn is_sep(b: u8) -> bool {
    b == b'\\' || b == b'/'
}

#[inline]
fn find_sep(path: &str, from: usize) -> Option<usize> {
    path.get(from..)?.find(SEPARATORS).map(|i| i + from)
}

/// Length of a `\\host\share` prefix starting at the beginning of `path`, or
/// `None` if `path` does not start with a well-formed one.
fn unc_prefix_len(path: &str) -> Option<usize> {
    let host_end = find_sep(path, 2)?;
    match find_sep(path, host_end + 1) {
        // Empty share name.
        Some(share_end) if share_end == host_end + 1 => None,
        Some(share_end) => Some(share_end),
        None => Some(path.len()),
    }
}

impl PathModule for Nt {
    #[inline]
    fn name(&self) -> &str {
        Self::NAME
    }

    #[inline]
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    #[inline]
    fn sep(&self) -> char {
        Self::SEPARATOR
    }

    #[inline]
    fn altsep(&self) -> Option<char> {
        Some(Self::ALT_SEPARATOR)
    }

    fn join(&self, base: &str, parts: &[&str]) -> Result<String, ModuleError> {
        let (drive, path) = self.splitdrive(base)?;
        let mut result_drive = drive;
        let mut result_path = String::from(path);

        for part in parts {
            let (part_drive, part_path) = self.splitdrive(part)?;
            if part_path.starts_with(SEPARATORS) {
                // Rooted part: replaces the path, keeps the current drive
                // unless it brings its own.
                if !part_drive.is_empty() || result_drive.is_empty() {
                    result_drive = part_drive;
                }
                result_path = String::from(part_path);
                continue;
            } else if !part_drive.is_empty() && part_drive != result_drive {
                if part_drive.to_lowercase() != result_drive.to_lowercase() {
                    // Different drive: start over.
                    result_drive = part_drive;
                    result_path = String::from(part_path);
                    continue;
                }
                result_drive = part_drive;
            }

            if !result_path.is_empty() && !result_path.ends_with(SEPARATORS) {
                result_path.push(Self::SEPARATOR);
            }
            result_path.push_str(part_path);
        }

        let mut joined = String::with_capacity(result_drive.len() + result_path.len() + 1);
        joined.push_str(result_drive);
        // A UNC drive needs a separator before a relative path, `C:` does not.
        if !result_path.is_empty()
            && !result_path.starts_with(SEPARATORS)
            && !result_drive.is_empty()
            && !result_drive.ends_with(':')
        {
            joined.push(Self::SEPARATOR);
        }
        joined.push_str(&result_path);
        Ok(joined)
    }

    fn split<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        let (drive, rest) = self.splitdrive(path)?;
        let index = rest.rfind(SEPARATORS).map_or(0, |i| i + 1);
        let (head, tail) = rest.split_at(index);
        let trimmed = head.trim_end_matches(SEPARATORS);
        let head = if trimmed.is_empty() { head } else { trimmed };
        Ok((&path[..drive.len() + head.len()], tail))
    }

    fn splitdrive<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        let bytes = path.as_bytes();
        if bytes.len() >= 2 {
            if is_sep(bytes[0]) && is_sep(bytes[1]) && !bytes.get(2).copied().is_some_and(is_sep)
            {
                return Ok(match unc_prefix_len(path) {
                    Some(len) => path.split_at(len),
                    None => ("", path),
                });
            }
            if bytes[1] == b':' {
                return Ok(path.split_at(2));
            }
        }
        Ok(("", path))
    }

    fn normpath(&self, path: &str) -> Result<String, ModuleError> {
        // Device and extended-length paths are taken literally.
        if path.starts_with(r"\\.\") || path.starts_with(r"\\?\") {
            return Ok(String::from(path));
        }

        let path = path.replace(Self::ALT_SEPARATOR, r"\");
        let (drive, rest) = self.splitdrive(&path)?;
        let mut prefix = String::from(drive);
        let trimmed = rest.trim_start_matches(Self::SEPARATOR);
        if drive.is_empty() {
            // Without a drive, every leading separator is kept.
            prefix.push_str(&rest[..rest.len() - trimmed.len()]);
        } else if trimmed.len() != rest.len() {
            prefix.push(Self::SEPARATOR);
        }
        let rest = trimmed;

        let mut components = Vec::<&str>::with_capacity(16);
        for component in rest.split(Self::SEPARATOR) {
            match component {
                "" | "." => {}
                ".." => {
                    if components.last().is_some_and(|last| *last != "..") {
                        components.pop();
                    } else if !(components.is_empty() && prefix.ends_with(Self::SEPARATOR)) {
                        components.push(component);
                    }
                    // `..` directly below a root is dropped.
                }
                component => components.push(component),
            }
        }

        if prefix.is_empty() && components.is_empty() {
            components.push(".");
        }
        prefix.push_str(&components.join(r"\"));
        Ok(prefix)
    }

    fn isabs(&self, path: &str) -> Result<bool, ModuleError> {
        let (_, rest) = self.splitdrive(path)?;
        Ok(rest.starts_with(SEPARATORS))
    }

    #[inline]
    fn normcase<'a>(&self, path: &'a str) -> Result<Cow<'a, str>, ModuleError> {
        let path = path.replace(Self::ALT_SEPARATOR, r"\");
        Ok(Cow::Owned(path.to_lowercase()))
    }

    fn splitunc<'a>(&self, path: &'a str) -> Result<(&'a str, &'a str), ModuleError> {
        let bytes = path.as_bytes();
        if bytes.get(1) == Some(&b':') {
            // Drive letter, not a share.
            return Ok(("", path));
        }
        if bytes.len() >= 2 && is_sep(bytes[0]) && is_sep(bytes[1]) {
            // `\\\share` has an empty host.
            return Ok(match unc_prefix_len(path) {
                Some(len) if find_sep(path, 2) != Some(2) => path.split_at(len),
                _ => ("", path),
            });
        }
        Ok(("", path))
    }

    /// `~` expands from `USERPROFILE`, falling back to `HOMEDRIVE` +
    /// `HOMEPATH`. `~user` is guessed as a sibling of the current profile
    /// directory.
    fn expanduser<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        let Some(rest) = path.strip_prefix('~') else {
            return Ok(Cow::Borrowed(path));
        };
        let user_end = rest.find(SEPARATORS).unwrap_or(rest.len());

        let mut home = if let Some(profile) = env("USERPROFILE") {
            profile
        } else if let Some(home_path) = env("HOMEPATH") {
            let home_drive = env("HOMEDRIVE").unwrap_or_default();
            self.join(&home_drive, &[&home_path])?
        } else {
            return Ok(Cow::Borrowed(path));
        };

        if user_end != 0 {
            let target_user = &rest[..user_end];
            let current_user = env("USERNAME");
            if current_user.as_deref() != Some(target_user) {
                let (profiles, current_name) = self.split(&home)?;
                // Only guess if the profile directory is named after the
                // current user.
                if current_user.as_deref() != Some(current_name) {
                    return Ok(Cow::Borrowed(path));
                }
                let sibling = self.join(profiles, &[target_user])?;
                home = sibling;
            }
        }

        home.push_str(&rest[user_end..]);
        Ok(Cow::Owned(home))
    }

    /// `%name%`, `$name`, and `${name}`. `%%` and `$$` are escapes, and text
    /// inside single quotes is copied verbatim. Unknown variables are left in
    /// place.
    fn expandvars<'a>(&self, path: &'a str, env: Env<'_>) -> Result<Cow<'a, str>, ModuleError> {
        if !path.contains(['$', '%']) {
            return Ok(Cow::Borrowed(path));
        }

        let mut expanded = String::with_capacity(path.len());
        let mut rest = path;
        while let Some(ch) = rest.chars().next() {
            let after = &rest[ch.len_utf8()..];
            rest = match ch {
                '\'' => {
                    expanded.push('\'');
                    match after.find('\'') {
                        Some(end) => {
                            expanded.push_str(&after[..=end]);
                            &after[end + 1..]
                        }
                        None => {
                            expanded.push_str(after);
                            ""
                        }
                    }
                }
                '%' => {
                    if let Some(tail) = after.strip_prefix('%') {
                        expanded.push('%');
                        tail
                    } else if let Some(end) = after.find('%') {
                        let name = &after[..end];
                        match env(name) {
                            Some(value) => expanded.push_str(&value),
                            None => {
                                expanded.push('%');
                                expanded.push_str(name);
                                expanded.push('%');
                            }
                        }
                        &after[end + 1..]
                    } else {
                        expanded.push('%');
                        expanded.push_str(after);
                        ""
                    }
                }
                '$' => {
                    if let Some(tail) = after.strip_prefix('$') {
                        expanded.push('$');
                        tail
                    } else if let Some(braced) = after.strip_prefix('{') {
                        if let Some(end) = braced.find('}') {
                            let name = &braced[..end];
                            match env(name) {
                                Some(value) => expanded.push_str(&value),
                                None => {
                                    expanded.push_str("${");
                                    expanded.push_str(name);
                                    expanded.push('}');
                                }
                            }
                            &braced[end + 1..]
                        } else {
                            expanded.push_str("${");
                            expanded.push_str(braced);
                            ""
                        }
                    } else {
                        let end = after
                            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
                            .unwrap_or(after.len());
                        let name = &after[..end];
                        match env(name) {
                            Some(value) => expanded.push_str(&value),
                            None => {
                                expanded.push('$');
                                expanded.push_str(name);
                            }
                        }
                        &after[end..]
                    }
                }
                ch => {
                    expanded.push(ch);
                    after
                }
            };
        }
        Ok(Cow::Owned(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "USERPROFILE" => Some(String::from(r"C:\Users\zack")),
            "USERNAME" => Some(String::from("zack")),
            "FOO" => Some(String::from("foo")),
            _ => None,
        }
    }

    #[test]
    fn splitdrive() {
        let nt = Nt;
        assert_eq!(
            nt.splitdrive(r"C:\Documents and Settings\Zack").unwrap(),
            ("C:", r"\Documents and Settings\Zack")
        );
        assert_eq!(nt.splitdrive("c:foo").unwrap(), ("c:", "foo"));
        assert_eq!(
            nt.splitdrive(r"\\server\share\dir").unwrap(),
            (r"\\server\share", r"\dir")
        );
        assert_eq!(
            nt.splitdrive("//server/share").unwrap(),
            ("//server/share", "")
        );
        assert_eq!(nt.splitdrive(r"\\server").unwrap(), ("", r"\\server"));
        assert_eq!(nt.splitdrive(r"\\server\\x").unwrap(), ("", r"\\server\\x"));
        assert_eq!(nt.splitdrive(r"\\\x").unwrap(), ("", r"\\\x"));
        assert_eq!(nt.splitdrive(r"\a\b").unwrap(), ("", r"\a\b"));
        assert_eq!(nt.splitdrive("").unwrap(), ("", ""));
    }

    #[test]
    fn isabs() {
        let nt = Nt;
        assert!(nt.isabs(r"C:\a").unwrap());
        assert!(nt.isabs("/a").unwrap());
        assert!(nt.isabs(r"\\server\share\a").unwrap());
        assert!(!nt.isabs("C:a").unwrap());
        assert!(!nt.isabs(r"a\b").unwrap());
        assert!(!nt.isabs(r"\\server\share").unwrap());
    }

    #[test]
    fn join() {
        let nt = Nt;
        assert_eq!(nt.join(r"C:\", &["Documents"]).unwrap(), r"C:\Documents");
        assert_eq!(nt.join("a", &["b", "c"]).unwrap(), r"a\b\c");
        assert_eq!(nt.join(r"a\", &["b"]).unwrap(), r"a\b");
        assert_eq!(nt.join(r"C:\a", &[r"\b"]).unwrap(), r"C:\b");
        assert_eq!(nt.join(r"C:\a", &[r"D:b"]).unwrap(), "D:b");
        assert_eq!(nt.join(r"C:\a", &["c:b"]).unwrap(), r"c:\a\b");
        assert_eq!(nt.join("C:", &["a"]).unwrap(), "C:a");
        assert_eq!(nt.join(r"\\server\share", &["a"]).unwrap(), r"\\server\share\a");
        assert_eq!(nt.join("", &["a"]).unwrap(), "a");
    }

    #[test]
    fn split() {
        let nt = Nt;
        assert_eq!(nt.split(r"C:\a\b").unwrap(), (r"C:\a", "b"));
        assert_eq!(nt.split(r"C:\a").unwrap(), (r"C:\", "a"));
        assert_eq!(nt.split(r"C:\").unwrap(), (r"C:\", ""));
        assert_eq!(nt.split("C:a").unwrap(), ("C:", "a"));
        assert_eq!(nt.split("a/b\\\\c").unwrap(), ("a/b", "c"));
        assert_eq!(
            nt.split(r"\\server\share\x").unwrap(),
            (r"\\server\share\", "x")
        );
    }

    #[test]
    fn normpath() {
        let nt = Nt;
        assert_eq!(nt.normpath(r"C:\A\..\B").unwrap(), r"C:\B");
        assert_eq!(nt.normpath("A/B/").unwrap(), r"A\B");
        assert_eq!(nt.normpath(r"C:\..\a").unwrap(), r"C:\a");
        assert_eq!(nt.normpath(r"..\..\a").unwrap(), r"..\..\a");
        assert_eq!(nt.normpath("").unwrap(), ".");
        assert_eq!(nt.normpath("C:").unwrap(), "C:");
        assert_eq!(nt.normpath(r"C:.\a").unwrap(), r"C:a");
        assert_eq!(nt.normpath(r"\\?\C:\a\..").unwrap(), r"\\?\C:\a\..");
        assert_eq!(nt.normpath(r"\\server").unwrap(), r"\\server");
        assert_eq!(nt.normpath(r"\\\a").unwrap(), r"\\\a");
        assert_eq!(nt.normpath(r"\\\a\..\..").unwrap(), r"\\\");
        assert_eq!(nt.normpath(r"C:\\\a").unwrap(), r"C:\a");
        assert_eq!(
            nt.normpath(r"//server/share/a/./b").unwrap(),
            r"\\server\share\a\b"
        );
    }

    #[test]
    fn normcase() {
        assert_eq!(Nt.normcase("C:/Program Files").unwrap(), r"c:\program files");
    }

    #[test]
    fn splitunc() {
        let nt = Nt;
        assert_eq!(
            nt.splitunc(r"\\server\share\dir\file").unwrap(),
            (r"\\server\share", r"\dir\file")
        );
        assert_eq!(nt.splitunc(r"C:\dir").unwrap(), ("", r"C:\dir"));
        assert_eq!(nt.splitunc(r"\\\share").unwrap(), ("", r"\\\share"));
        assert_eq!(nt.splitunc(r"\\server").unwrap(), ("", r"\\server"));
    }

    #[test]
    fn expanduser() {
        let nt = Nt;
        assert_eq!(
            nt.expanduser(r"~\Desktop", &env).unwrap(),
            r"C:\Users\zack\Desktop"
        );
        assert_eq!(
            nt.expanduser(r"~guido\Desktop", &env).unwrap(),
            r"C:\Users\guido\Desktop"
        );
        assert_eq!(nt.expanduser(r"a\~", &env).unwrap(), r"a\~");
        assert_eq!(nt.expanduser("~", &|_| None).unwrap(), "~");

        let legacy = |name: &str| match name {
            "HOMEDRIVE" => Some(String::from("D:")),
            "HOMEPATH" => Some(String::from(r"\home")),
            _ => None,
        };
        assert_eq!(nt.expanduser("~/x", &legacy).unwrap(), r"D:\home/x");
    }

    #[test]
    fn expandvars() {
        let nt = Nt;
        assert_eq!(nt.expandvars(r"%FOO%\bar", &env).unwrap(), r"foo\bar");
        assert_eq!(nt.expandvars("$FOO-x", &env).unwrap(), "$FOO-x");
        assert_eq!(nt.expandvars("${FOO}x", &env).unwrap(), "foox");
        assert_eq!(nt.expandvars("$FOO/x", &env).unwrap(), "foo/x");
        assert_eq!(nt.expandvars("%%FOO%%", &env).unwrap(), "%FOO%");
        assert_eq!(nt.expandvars("$$FOO", &env).unwrap(), "$FOO");
        assert_eq!(nt.expandvars("'%FOO%'%FOO%", &env).unwrap(), "'%FOO%'foo");
        assert_eq!(nt.expandvars("%BAR%", &env).unwrap(), "%BAR%");
        assert_eq!(nt.expandvars("%FOO", &env).unwrap(), "%FOO");
        assert_eq!(nt.expandvars("${FOO", &env).unwrap(), "${FOO");
    }
}

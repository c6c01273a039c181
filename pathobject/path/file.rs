use std::borrow::Cow;

use crate::{Error, Path};

/// The host's line separator.
#[cfg(windows)]
pub const LINESEP: &str = "\r\n";
#[cfg(not(windows))]
pub const LINESEP: &str = "\n";

/// Options for [`Path::write_text()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteText {
    /// Line separator to write. All standard line endings in the text are
    /// replaced with this. `None` writes the text unchanged.
    pub linesep: Option<Cow<'static, str>>,
    /// Append to the file instead of truncating it.
    pub append: bool,
}

impl Default for WriteText {
    #[inline]
    fn default() -> Self {
        Self {
            linesep: Some(Cow::Borrowed(LINESEP)),
            append: false,
        }
    }
}

impl WriteText {
    #[must_use]
    pub fn append() -> Self {
        Self {
            append: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn verbatim() -> Self {
        Self {
            linesep: None,
            ..Self::default()
        }
    }
}

/// Translate `\r\n`, `\r\u{85}`, `\r`, `\u{85}`, and `\u{2028}` to `\n`.
#[must_use]
pub fn universal_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains(['\r', '\u{85}', '\u{2028}']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("\r\n", "\n")
            .replace("\r\u{85}", "\n")
            .replace(['\r', '\u{85}', '\u{2028}'], "\n"),
    )
}

impl Path {
    /// Read the contents of this file.
    pub fn bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.path_type().io().read_file(self.as_str())?)
    }

    /// Write `data` to this file, truncating it unless `append` is true.
    pub fn write_bytes(&self, data: &[u8], append: bool) -> Result<(), Error> {
        Ok(self.path_type().io().write_file(self.as_str(), data, append)?)
    }

    /// Read the contents of this file as UTF-8 text, with line endings
    /// translated to `\n`.
    pub fn text(&self) -> Result<String, Error> {
        let text = String::from_utf8(self.bytes()?)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        if let Cow::Owned(translated) = universal_newlines(&text) {
            return Ok(translated);
        }
        Ok(text)
    }

    /// Write `text` to this file as UTF-8.
    pub fn write_text(&self, text: &str, options: &WriteText) -> Result<(), Error> {
        let text = match options.linesep {
            Some(ref linesep) => match universal_newlines(text) {
                normalized if linesep == "\n" => normalized,
                normalized => Cow::Owned(normalized.replace('\n', linesep)),
            },
            None => Cow::Borrowed(text),
        };
        self.write_bytes(text.as_bytes(), options.append)
    }
}

use pathobject_syntax::Capabilities;

use crate::{AsPathStr, Error, Path};

impl Path {
    /// The relative path from the current working directory to this path.
    pub fn relpath(&self) -> Result<Path, Error> {
        let cwd = self.path_type().cwd()?;
        self.relpathfrom(&cwd)
    }

    /// The relative path from `origin` to this path.
    pub fn relpathfrom(&self, origin: impl AsPathStr) -> Result<Path, Error> {
        self.path_type().try_path(origin)?.relpathto(self)
    }

    /// The relative path from this path to `destination`.
    ///
    /// If no relative path exists, e.g. because the paths are on different
    /// drives, this returns the absolute `destination`. Identical paths give
    /// the current directory (`.`).
    pub fn relpathto(&self, destination: impl AsPathStr) -> Result<Path, Error> {
        let kind = self.path_type();
        kind.require(Capabilities::NORMCASE)?;
        let module = kind.module();

        let origin = self.absolute()?.normcase()?.splitall()?;
        let destination = kind.try_path(destination)?.absolute()?;
        let destination_parts = destination.splitall()?;

        // Only the origin is case-normalized up front, because the
        // destination's components are part of the result.
        let origin_anchor = origin.anchor().map_or("", Path::as_str);
        let destination_anchor = destination_parts.anchor().map_or("", Path::as_str);
        if origin_anchor != kind.call(module.normcase(destination_anchor))? {
            tracing::trace!("no relative path from {self:?} to {destination:?}");
            return Ok(destination);
        }

        let mut common = 0;
        for (origin_part, destination_part) in
            origin.parts().iter().zip(destination_parts.parts())
        {
            if *origin_part != kind.call(module.normcase(destination_part))? {
                break;
            }
            common += 1;
        }

        let mut segments = vec![module.pardir(); origin.parts().len() - common];
        segments.extend(destination_parts.parts()[common..].iter().map(String::as_str));

        match segments.split_first() {
            None => Ok(kind.path(module.curdir())),
            Some((first, rest)) => Ok(kind.path(kind.call(module.join(first, rest))?)),
        }
    }
}

use super::{NormalizeFlags, Normalizer};
use crate::compare::CompareFlags;
use crate::error::Result;
use crate::name::FileName;

impl Normalizer {
    /// Expresses `path` relative to the directory `to`.
    ///
    /// Both are normalized first (no flags, completed against `base`).
    /// Components are matched under `flags`. When the two share no
    /// component, or sit on different filesystems, the normalized `path`
    /// is returned as is.
    ///
    /// # Errors
    ///
    /// As [`normalize`](Self::normalize).
    ///
    /// # Panics
    ///
    /// Panics if `flags` contains [`CompareFlags::FINAL_FIRST`] or the
    /// encodings differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{CompareFlags, Interpretation, PathContext};
    ///
    /// let mut ctx = PathContext::in_memory();
    /// let p = ctx.parse("/src/lib/util.c", Interpretation::Unix);
    /// let to = ctx.parse("/src/bin", Interpretation::Unix);
    /// let rel = ctx.make_relative(&p, &to, CompareFlags::empty(), None)?;
    /// assert_eq!(rel.to_string(), "../lib/util.c");
    /// # Ok::<(), pathtree::Error>(())
    /// ```
    pub fn make_relative(
        &mut self,
        path: &FileName,
        to: &FileName,
        flags: CompareFlags,
        base: Option<&FileName>,
    ) -> Result<FileName> {
        path.assert_compatible(to);
        let path = self.normalize(path, NormalizeFlags::empty(), base)?;
        let to = self.normalize(to, NormalizeFlags::empty(), base)?;

        let common = match usize::try_from(path.common_prefix_num_names(&to, flags)) {
            Ok(common) if common > 0 => common,
            _ => return Ok(path),
        };

        let mut result = self.tree().relative_root(path.encoding());
        for _ in common..to.num_names() {
            result.push_name("..");
        }
        for name in path.names().iter().skip(common) {
            result.push_name(name);
        }
        Ok(result)
    }
}

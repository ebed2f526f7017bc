//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for in-memory file systems and
//! helpers for environment-variable tests.

use std::env;
use std::rc::Rc;

use pathtree::fs::MemoryFileSystem;
use pathtree::{FileName, PathContext};

/// Builder for an in-memory file system and a context on top of it.
///
/// # Examples
///
/// ```no_run
/// # use common::FsFixture;
/// let (fs, ctx) = FsFixture::new()
///     .cwd("/work")
///     .dir("/work/src")
///     .symlink("/work/latest", "src")
///     .build();
/// ```
#[allow(dead_code)]
#[derive(Default)]
pub struct FsFixture {
    cwd: Option<String>,
    dirs: Vec<String>,
    files: Vec<(String, u64)>,
    symlinks: Vec<(String, String)>,
    short_names: Vec<(String, String)>,
    case_insensitive: bool,
}

#[allow(dead_code)]
impl FsFixture {
    /// Creates an empty fixture with `/` as working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory (created as a directory).
    pub fn cwd(mut self, path: &str) -> Self {
        self.cwd = Some(path.to_string());
        self
    }

    /// Adds a directory and its parents.
    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    /// Adds a regular file.
    pub fn file(mut self, path: &str, size: u64) -> Self {
        self.files.push((path.to_string(), size));
        self
    }

    /// Adds a symlink.
    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        self.symlinks.push((path.to_string(), target.to_string()));
        self
    }

    /// Gives `path` an 8.3 alias.
    pub fn short_name(mut self, path: &str, short: &str) -> Self {
        self.short_names.push((path.to_string(), short.to_string()));
        self
    }

    /// Makes lookups ignore ASCII case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Builds the file system and a context using it.
    pub fn build(self) -> (Rc<MemoryFileSystem>, PathContext) {
        let fs = Rc::new(MemoryFileSystem::new());
        fs.set_case_insensitive(self.case_insensitive);
        if let Some(cwd) = &self.cwd {
            fs.add_dir(cwd);
            fs.set_current_dir(cwd);
        }
        for dir in &self.dirs {
            fs.add_dir(dir);
        }
        for (path, size) in &self.files {
            fs.add_file(path, *size);
        }
        for (path, target) in &self.symlinks {
            fs.add_symlink(path, target);
        }
        for (path, short) in &self.short_names {
            fs.add_short_name(path, short);
        }
        let ctx = PathContext::with_file_system(Box::new(Rc::clone(&fs)));
        (fs, ctx)
    }
}

/// Renders handles in portable form.
#[allow(dead_code)]
pub fn strings(names: &[FileName]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Sets an environment variable for the lifetime of the guard.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    /// Sets `key` to `value`.
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    /// Removes `key`.
    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clears every `PATHTREE_*` variable read by the configuration layer.
#[allow(dead_code)]
pub fn clear_pathtree_env_vars() -> Vec<EnvGuard> {
    pathtree::config::ENV_VARS
        .iter()
        .map(|k| EnvGuard::remove(k))
        .collect()
}

use include_dir::Dir;
use log::debug;

use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::loader::{LoadedTemplate, TemplateRoot};

/// Loader for the snapshot compiled into the binary.
pub struct EmbeddedLoader {
    dir: &'static Dir<'static>,
}

impl EmbeddedLoader {
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }

    /// Fails when the snapshot holds no entries.
    pub fn check(&self) -> Result<()> {
        if self.dir.entries().is_empty() {
            return Err(Error::TemplateNotFound { searched: "<embedded>".to_string() });
        }
        Ok(())
    }
}

impl TemplateLoader for EmbeddedLoader {
    fn load(&self) -> Result<LoadedTemplate> {
        self.check()?;
        debug!("Using embedded template with {} top-level entries.", self.dir.entries().len());
        Ok(LoadedTemplate::new(TemplateRoot::Embedded(self.dir)))
    }
}

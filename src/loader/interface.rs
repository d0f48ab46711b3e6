use crate::error::Result;
use crate::loader::LoadedTemplate;

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Makes the template available for walking.
    ///
    /// # Returns
    /// * `Result<LoadedTemplate>` - Walkable root plus any scratch artifacts
    fn load(&self) -> Result<LoadedTemplate>;
}

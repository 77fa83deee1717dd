pub mod css;
pub mod json;

use std::path::Path;

use anyhow::{Context, Result};

use crate::card::CardStyle;

/// A format the card's role bindings can be written in.
pub trait StyleBackend {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Render the bindings; `title` is the artwork caption.
    fn serialize(&self, style: &CardStyle, title: &str) -> String;

    /// Write the rendered bindings to `path`.
    fn write_to(&self, style: &CardStyle, title: &str, path: &Path) -> Result<()> {
        let content = self.serialize(style, title);
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {} to {}", self.name(), path.display()))?;
        Ok(())
    }
}

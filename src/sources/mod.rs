pub mod colormind;
pub mod rijks;

use async_trait::async_trait;

use crate::artwork::{ArtworkDetail, ArtworkSummary};
use crate::error::SourceResult;
use crate::pipeline::request::{Palette, PaletteRequest};

/// A museum collection that can be searched and queried for detail.
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Human-readable service name for logs.
    fn name(&self) -> &str;

    /// One page of landscape painting search results.
    async fn list(&self, page: u8) -> SourceResult<Vec<ArtworkSummary>>;

    /// Detail record (swatches) of one artwork.
    async fn detail(&self, object_number: &str) -> SourceResult<ArtworkDetail>;
}

/// A service that completes a partially fixed five-color palette.
#[async_trait]
pub trait PaletteSource: Send + Sync {
    fn name(&self) -> &str;

    async fn suggest(&self, request: &PaletteRequest) -> SourceResult<Palette>;
}

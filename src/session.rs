//! Per-run postcard state: the chosen artwork and the current palette.

use rand::Rng;
use tracing::{debug, info};

use crate::artwork::{pick_landscape, ArtworkDetail, ArtworkSummary};
use crate::card::{CardStyle, FrontColor};
use crate::color::Color;
use crate::error::SourceResult;
use crate::pipeline::dominant::dominant_color;
use crate::pipeline::request::{Palette, PaletteRequest};
use crate::sources::rijks::PAGE_COUNT;
use crate::sources::{ArtworkSource, PaletteSource};

/// The artwork on the card front. Set once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkState {
    pub summary: ArtworkSummary,
    pub detail: ArtworkDetail,
    pub dominant: Option<Color>,
}

impl ArtworkState {
    pub fn front(&self) -> FrontColor {
        match self.dominant {
            Some(color) => FrontColor::Dominant(color),
            None => FrontColor::MatchRear,
        }
    }
}

/// The palette currently painted on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteState {
    pub palette: Palette,
    /// Request number this palette answered.
    pub generation: u64,
}

/// Everything one postcard needs, passed explicitly between stages.
#[derive(Debug, Clone)]
pub struct Session {
    request: PaletteRequest,
    artwork: Option<ArtworkState>,
    palette: Option<PaletteState>,
    issued: u64,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            request: PaletteRequest::new(model),
            artwork: None,
            palette: None,
            issued: 0,
        }
    }

    pub fn artwork(&self) -> Option<&ArtworkState> {
        self.artwork.as_ref()
    }

    pub fn palette(&self) -> Option<&PaletteState> {
        self.palette.as_ref()
    }

    pub fn request(&self) -> &PaletteRequest {
        &self.request
    }

    /// Search the collection, pick a landscape piece and read its swatches.
    ///
    /// The detail call is only made once the search has returned. When the
    /// artwork has a dominant color it is anchored into the palette request.
    pub async fn load_artwork<S, R>(
        &mut self,
        source: &S,
        page: Option<u8>,
        rng: &mut R,
    ) -> SourceResult<&ArtworkState>
    where
        S: ArtworkSource + ?Sized,
        R: Rng,
    {
        let page = page.unwrap_or_else(|| rng.random_range(1..=PAGE_COUNT));
        let artworks = source.list(page).await?;
        let summary = pick_landscape(&artworks, rng)?.clone();
        info!(
            source = source.name(),
            page,
            object_number = %summary.object_number,
            title = %summary.long_title,
            "selected artwork"
        );

        let detail = source.detail(&summary.object_number).await?;
        let dominant = dominant_color(&detail.colors);
        match dominant {
            Some(color) => {
                let polarity = self.request.anchor(color);
                info!(dominant = %color, ?polarity, "anchored dominant color");
            }
            None => debug!("artwork has no swatches; front follows card rear"),
        }

        Ok(&*self.artwork.insert(ArtworkState {
            summary,
            detail,
            dominant,
        }))
    }

    /// Reserve a generation number and snapshot the request to send.
    pub fn begin_palette_request(&mut self) -> (u64, PaletteRequest) {
        self.issued += 1;
        (self.issued, self.request.clone())
    }

    /// Replace the palette unless a newer request has already been answered.
    ///
    /// Returns whether the palette was installed.
    pub fn install_palette(&mut self, generation: u64, palette: Palette) -> bool {
        if let Some(current) = &self.palette {
            if current.generation >= generation {
                debug!(
                    generation,
                    current = current.generation,
                    "dropping stale palette response"
                );
                return false;
            }
        }
        self.palette = Some(PaletteState {
            palette,
            generation,
        });
        true
    }

    /// Ask for a fresh palette and install it.
    pub async fn reroll<P>(&mut self, source: &P) -> SourceResult<Palette>
    where
        P: PaletteSource + ?Sized,
    {
        let (generation, request) = self.begin_palette_request();
        let palette = source.suggest(&request).await?;
        info!(source = source.name(), generation, "palette generated");
        self.install_palette(generation, palette);
        Ok(palette)
    }

    /// Role bindings for the current palette, if one has arrived.
    pub fn card_style(&self) -> Option<CardStyle> {
        let front = self
            .artwork
            .as_ref()
            .map_or(FrontColor::MatchRear, ArtworkState::front);
        self.palette
            .as_ref()
            .map(|state| CardStyle::new(state.palette, front))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("default")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(seed: u8) -> Palette {
        Palette([
            Color::new(seed, 0, 0),
            Color::new(0, seed, 0),
            Color::new(0, 0, seed),
            Color::new(seed, seed, 0),
            Color::new(seed, seed, seed),
        ])
    }

    #[test]
    fn no_style_before_first_palette() {
        assert!(Session::default().card_style().is_none());
    }

    #[test]
    fn newer_palette_replaces_older() {
        let mut session = Session::default();
        let (first, _) = session.begin_palette_request();
        let (second, _) = session.begin_palette_request();
        assert!(session.install_palette(first, palette(1)));
        assert!(session.install_palette(second, palette(2)));
        assert_eq!(session.palette().unwrap().palette, palette(2));
    }

    #[test]
    fn late_response_to_old_request_is_dropped() {
        let mut session = Session::default();
        let (first, _) = session.begin_palette_request();
        let (second, _) = session.begin_palette_request();
        assert!(session.install_palette(second, palette(2)));
        assert!(!session.install_palette(first, palette(1)));
        assert_eq!(session.palette().unwrap().generation, second);
    }

    #[test]
    fn style_without_artwork_follows_rear() {
        let mut session = Session::default();
        let (generation, _) = session.begin_palette_request();
        session.install_palette(generation, palette(200));
        let style = session.card_style().unwrap();
        assert_eq!(style.front.color, Color::new(200, 200, 200));
        assert_eq!(style.front.alpha, Some(0.25));
    }
}

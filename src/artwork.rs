use rand::Rng;
use serde::Deserialize;

use crate::error::SourceError;

/// Web-sized image reference attached to an artwork record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl WebImage {
    /// Landscape means strictly wider than tall.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

/// One entry of the collection search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkSummary {
    pub object_number: String,
    #[serde(default)]
    pub web_image: Option<WebImage>,
    #[serde(default)]
    pub long_title: String,
}

/// A `{hex, percentage}` entry describing a color's share of the artwork.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Swatch {
    pub hex: String,
    pub percentage: f32,
}

/// Detail record for a single artwork.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArtworkDetail {
    #[serde(default)]
    pub colors: Vec<Swatch>,
}

/// Indices of the records whose image is landscape-oriented.
pub fn landscape_indices(artworks: &[ArtworkSummary]) -> Vec<usize> {
    artworks
        .iter()
        .enumerate()
        .filter(|(_, art)| art.web_image.as_ref().is_some_and(WebImage::is_landscape))
        .map(|(i, _)| i)
        .collect()
}

/// Pick a landscape artwork uniformly at random.
pub fn pick_landscape<'a, R: Rng>(
    artworks: &'a [ArtworkSummary],
    rng: &mut R,
) -> Result<&'a ArtworkSummary, SourceError> {
    let eligible = landscape_indices(artworks);
    if eligible.is_empty() {
        return Err(SourceError::NoLandscapeArtwork {
            searched: artworks.len(),
        });
    }
    let chosen = eligible[rng.random_range(0..eligible.len())];
    Ok(&artworks[chosen])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn art(id: &str, width: u32, height: u32) -> ArtworkSummary {
        ArtworkSummary {
            object_number: id.to_string(),
            web_image: Some(WebImage {
                url: format!("https://images.example/{id}.jpg"),
                width,
                height,
            }),
            long_title: format!("Artwork {id}"),
        }
    }

    #[test]
    fn only_wider_than_tall_is_eligible() {
        let artworks = [art("a", 100, 50), art("b", 50, 100), art("c", 80, 80)];
        assert_eq!(landscape_indices(&artworks), vec![0]);
    }

    #[test]
    fn repeated_selection_always_returns_the_only_landscape() {
        let artworks = [art("a", 100, 50), art("b", 50, 100), art("c", 80, 80)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = pick_landscape(&artworks, &mut rng).unwrap();
            assert_eq!(picked.object_number, "a");
        }
    }

    #[test]
    fn selection_covers_every_landscape_record() {
        let artworks = [art("a", 200, 100), art("b", 50, 100), art("c", 300, 120)];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen_a = false;
        let mut seen_c = false;
        for _ in 0..200 {
            match pick_landscape(&artworks, &mut rng).unwrap().object_number.as_str() {
                "a" => seen_a = true,
                "c" => seen_c = true,
                other => panic!("portrait artwork {other} selected"),
            }
        }
        assert!(seen_a && seen_c);
    }

    #[test]
    fn records_without_image_are_skipped() {
        let mut bare = art("bare", 0, 0);
        bare.web_image = None;
        let artworks = [bare, art("wide", 10, 5)];
        assert_eq!(landscape_indices(&artworks), vec![1]);
    }

    #[test]
    fn no_landscape_is_an_error() {
        let artworks = [art("b", 50, 100), art("c", 80, 80)];
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_landscape(&artworks, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SourceError::NoLandscapeArtwork { searched: 2 }
        ));
    }

    #[test]
    fn deserializes_collection_record() {
        let json = r#"{
            "objectNumber": "SK-A-4118",
            "longTitle": "River Landscape, Jan van Goyen, 1645",
            "webImage": {"url": "https://lh3.example/x", "width": 2500, "height": 1300},
            "hasImage": true
        }"#;
        let record: ArtworkSummary = serde_json::from_str(json).unwrap();
        assert_eq!(record.object_number, "SK-A-4118");
        assert!(record.web_image.unwrap().is_landscape());
    }

    #[test]
    fn detail_without_colors_is_empty() {
        let detail: ArtworkDetail = serde_json::from_str("{}").unwrap();
        assert!(detail.colors.is_empty());
    }
}

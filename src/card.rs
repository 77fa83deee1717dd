use crate::color::Color;
use crate::pipeline::request::Palette;

/// A paintable element of the postcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardRole {
    /// Typed sender/recipient addresses.
    InputText,
    /// "Stamp & send" text inside the stamp box.
    StampText,
    /// "From:" / "To:" labels.
    LabelText,
    /// Email input and message backgrounds.
    FieldBackground,
    /// Outline of the stamp box.
    StampBorder,
    /// Outline of the stamp box under the pointer.
    StampBorderHover,
    /// Artwork title on the card rear.
    Caption,
    /// Placeholders, message text and required-field markers.
    Placeholder,
    /// Date stamp ink and ring.
    DateStamp,
    /// Card rear background.
    CardRear,
}

impl CardRole {
    /// Stable kebab-case name.
    pub fn key(self) -> &'static str {
        match self {
            CardRole::InputText => "input-text",
            CardRole::StampText => "stamp-text",
            CardRole::LabelText => "label-text",
            CardRole::FieldBackground => "field-background",
            CardRole::StampBorder => "stamp-border",
            CardRole::StampBorderHover => "stamp-border-hover",
            CardRole::Caption => "caption",
            CardRole::Placeholder => "placeholder",
            CardRole::DateStamp => "date-stamp",
            CardRole::CardRear => "card-rear",
        }
    }
}

/// `(role, palette index, alpha)`; `None` alpha means opaque.
const ROLE_TABLE: [(CardRole, usize, Option<f32>); 10] = [
    (CardRole::InputText, 0, None),
    (CardRole::StampText, 0, None),
    (CardRole::LabelText, 1, None),
    (CardRole::FieldBackground, 1, Some(0.1)),
    (CardRole::StampBorder, 1, Some(0.1)),
    (CardRole::StampBorderHover, 1, Some(0.8)),
    (CardRole::Caption, 1, Some(0.8)),
    (CardRole::Placeholder, 2, None),
    (CardRole::DateStamp, 3, None),
    (CardRole::CardRear, 4, Some(CARD_REAR_ALPHA)),
];

/// Translucency of the card rear, shared by the anonymous front.
pub const CARD_REAR_ALPHA: f32 = 0.25;

/// A palette color bound to a role, with optional translucency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleColor {
    pub color: Color,
    pub alpha: Option<f32>,
}

impl RoleColor {
    pub fn opaque(color: Color) -> Self {
        Self { color, alpha: None }
    }

    pub fn translucent(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha: Some(alpha),
        }
    }

    /// CSS value: `rgb(...)` when opaque, `rgba(...)` otherwise.
    pub fn css(&self) -> String {
        match self.alpha {
            Some(alpha) => self.color.to_css_rgba(alpha),
            None => self.color.to_css_rgb(),
        }
    }

    /// The color as it appears over an opaque backdrop.
    pub fn flatten(&self, backdrop: Color) -> Color {
        match self.alpha {
            Some(alpha) => self.color.over(backdrop, alpha),
            None => self.color,
        }
    }
}

/// What colors the front of the card behind the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontColor {
    /// The artwork's most prevalent color.
    Dominant(Color),
    /// No swatch data: follow the card rear.
    MatchRear,
}

/// The full role-to-color mapping for one palette.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub palette: Palette,
    pub roles: Vec<(CardRole, RoleColor)>,
    pub front: RoleColor,
}

impl CardStyle {
    /// Bind every role to its palette entry.
    pub fn new(palette: Palette, front: FrontColor) -> Self {
        let roles = ROLE_TABLE
            .iter()
            .map(|&(role, index, alpha)| {
                let color = palette.colors()[index];
                let bound = match alpha {
                    Some(alpha) => RoleColor::translucent(color, alpha),
                    None => RoleColor::opaque(color),
                };
                (role, bound)
            })
            .collect();
        let front = match front {
            FrontColor::Dominant(color) => RoleColor::opaque(color),
            FrontColor::MatchRear => RoleColor::translucent(palette.background(), CARD_REAR_ALPHA),
        };
        Self {
            palette,
            roles,
            front,
        }
    }

    /// Color bound to `role`.
    pub fn role(&self, role: CardRole) -> RoleColor {
        self.roles
            .iter()
            .find(|(candidate, _)| *candidate == role)
            .map(|(_, color)| *color)
            // every role is in ROLE_TABLE
            .unwrap_or(RoleColor::opaque(self.palette.text()))
    }
}

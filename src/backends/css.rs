use crate::card::{CardRole, CardStyle};

use super::StyleBackend;

/// Stylesheet for the postcard page.
pub struct CssBackend;

/// Where each role lands in the page: `(selector, property)`.
fn binding(role: CardRole) -> (&'static str, &'static str) {
    match role {
        CardRole::InputText => ("#senderEmail, #recipientEmail", "color"),
        CardRole::StampText => (".stampHere", "color"),
        CardRole::LabelText => (
            "label[for=\"senderEmail\"], label[for=\"recipientEmail\"]",
            "color",
        ),
        CardRole::FieldBackground => ("input[type=\"email\"], textarea", "background-color"),
        CardRole::StampBorder => (".stampHere", "border-color"),
        CardRole::StampBorderHover => (".stampHere:hover", "border-color"),
        CardRole::Caption => (".formBottom p", "color"),
        CardRole::Placeholder => (
            "input[type=\"email\"]::placeholder, textarea, form span",
            "color",
        ),
        CardRole::DateStamp => (".dateStamp", "color"),
        CardRole::CardRear => (".postcardRear", "background-color"),
    }
}

fn rule(out: &mut String, selector: &str, property: &str, value: &str) {
    out.push_str(&format!("{selector} {{\n    {property}: {value};\n}}\n"));
}

impl StyleBackend for CssBackend {
    fn name(&self) -> &str {
        "CSS"
    }

    fn serialize(&self, style: &CardStyle, title: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("/* {} */\n", title.replace("*/", "* /")));

        for (i, color) in style.palette.colors().iter().enumerate() {
            rule(
                &mut out,
                &format!(".colPaletteContainer div:nth-of-type({})", i + 1),
                "background-color",
                &color.to_css_rgb(),
            );
        }

        for (role, color) in &style.roles {
            let (selector, property) = binding(*role);
            rule(&mut out, selector, property, &color.css());
        }
        // the postmark ring shares its ink
        let date = style.role(CardRole::DateStamp);
        rule(&mut out, ".dateStamp", "border-color", &date.css());

        rule(
            &mut out,
            ".postcardFront",
            "background-color",
            &style.front.css(),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FrontColor;
    use crate::color::Color;
    use crate::pipeline::request::Palette;

    fn test_style(front: FrontColor) -> CardStyle {
        CardStyle::new(
            Palette([
                Color::new(49, 47, 49),
                Color::new(91, 84, 75),
                Color::new(146, 135, 116),
                Color::new(206, 190, 160),
                Color::new(232, 226, 209),
            ]),
            front,
        )
    }

    #[test]
    fn every_rule_is_well_formed() {
        let output = CssBackend.serialize(&test_style(FrontColor::MatchRear), "River View");
        assert!(output.starts_with("/* River View */\n"));
        let opens = output.matches('{').count();
        let closes = output.matches('}').count();
        assert_eq!(opens, closes);
        // 5 strip swatches + 10 roles + postmark ring + front
        assert_eq!(opens, 17);
    }

    #[test]
    fn rear_and_anonymous_front_share_value() {
        let output = CssBackend.serialize(&test_style(FrontColor::MatchRear), "t");
        assert!(output.contains(".postcardRear {\n    background-color: rgba(232, 226, 209, 0.25);"));
        assert!(output.contains(".postcardFront {\n    background-color: rgba(232, 226, 209, 0.25);"));
    }

    #[test]
    fn dominant_front_is_opaque() {
        let output = CssBackend.serialize(
            &test_style(FrontColor::Dominant(Color::new(40, 60, 30))),
            "t",
        );
        assert!(output.contains(".postcardFront {\n    background-color: rgb(40, 60, 30);"));
    }

    #[test]
    fn hover_border_is_stronger() {
        let output = CssBackend.serialize(&test_style(FrontColor::MatchRear), "t");
        assert!(output.contains(".stampHere {\n    border-color: rgba(91, 84, 75, 0.1);"));
        assert!(output.contains(".stampHere:hover {\n    border-color: rgba(91, 84, 75, 0.8);"));
    }

    #[test]
    fn title_cannot_close_comment() {
        let output = CssBackend.serialize(&test_style(FrontColor::MatchRear), "a */ b");
        assert!(output.starts_with("/* a * / b */"));
    }

    #[test]
    fn write_to_creates_file() {
        let style = test_style(FrontColor::MatchRear);
        let dir = std::env::temp_dir().join("postful-test-css-backend");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("card.css");

        CssBackend.write_to(&style, "t", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, CssBackend.serialize(&style, "t"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

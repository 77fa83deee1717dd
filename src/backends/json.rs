use serde_json::{json, Map, Value};

use crate::card::CardStyle;

use super::StyleBackend;

/// Machine-readable role bindings, for front ends that style themselves.
pub struct JsonBackend;

impl StyleBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn serialize(&self, style: &CardStyle, title: &str) -> String {
        let roles: Map<String, Value> = style
            .roles
            .iter()
            .map(|(role, color)| (role.key().to_string(), Value::String(color.css())))
            .collect();
        let palette: Vec<String> = style.palette.colors().iter().map(|c| c.to_hex()).collect();

        let document = json!({
            "title": title,
            "palette": palette,
            "front": style.front.css(),
            "roles": roles,
        });
        let mut out = serde_json::to_string_pretty(&document).unwrap_or_default();
        out.push('\n');
        out
    }
}

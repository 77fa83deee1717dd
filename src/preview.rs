use std::io::Write;

use anyhow::Result;
use crossterm::style::{Color as TermColor, Stylize};

use crate::card::CardStyle;
use crate::color::Color;

/// Page color the card sits on; translucent roles are flattened over it.
pub const PAGE_BACKDROP: Color = Color::WHITE;

fn term(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Print the palette strip and every role binding as colored swatches.
pub fn print_preview(out: &mut impl Write, style: &CardStyle, title: &str) -> Result<()> {
    writeln!(out, "{}", title.bold())?;

    let mut strip = String::from("  ");
    for color in style.palette.colors() {
        strip.push_str(&format!("{}", "        ".on(term(*color))));
    }
    writeln!(out, "{strip}")?;

    let mut hexes = String::from("  ");
    for color in style.palette.colors() {
        hexes.push_str(&format!("{:<8}", color.to_hex()));
    }
    writeln!(out, "{hexes}")?;
    writeln!(out)?;

    for (role, bound) in &style.roles {
        let shown = bound.flatten(PAGE_BACKDROP);
        writeln!(
            out,
            "  {}  {:<20} {}",
            "    ".on(term(shown)),
            role.key(),
            bound.css()
        )?;
    }
    let front = style.front.flatten(PAGE_BACKDROP);
    writeln!(
        out,
        "  {}  {:<20} {}",
        "    ".on(term(front)),
        "card-front",
        style.front.css()
    )?;
    Ok(())
}

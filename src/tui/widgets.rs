use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};

use crate::card::{CardRole, CardStyle, RoleColor};
use crate::color::Color as AppColor;
use crate::preview::PAGE_BACKDROP;
use crate::send::{StampView, STAMP_PLACEHOLDER};

use super::Field;

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// A role color as it looks on top of `backdrop`.
fn shown(role: RoleColor, backdrop: AppColor) -> Color {
    to_color(role.flatten(backdrop))
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// The five-swatch strip; clicking it on the web page re-rolls the palette.
pub struct PaletteStrip<'a> {
    style: Option<&'a CardStyle>,
}

impl<'a> PaletteStrip<'a> {
    pub fn new(style: Option<&'a CardStyle>) -> Self {
        Self { style }
    }
}

impl Widget for PaletteStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" .postful  (ctrl-r: new palette) ");
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(style) = self.style else {
            Paragraph::new("  waiting for palette...").render(inner, buf);
            return;
        };

        let width = (inner.width / 5).max(1);
        let mut spans = Vec::new();
        for color in style.palette.colors() {
            let label = format!("{:^w$}", color.to_hex(), w = width as usize);
            spans.push(Span::styled(
                label,
                Style::default().bg(to_color(*color)).fg(contrast_fg(*color)),
            ));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// The artwork side of the card.
pub struct CardFront<'a> {
    pub style: Option<&'a CardStyle>,
    pub title: &'a str,
    pub image_url: &'a str,
}

impl Widget for CardFront<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = self
            .style
            .map(|style| shown(style.front, PAGE_BACKDROP))
            .unwrap_or(Color::Reset);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(bg));
        let fg = self
            .style
            .map(|style| contrast_fg(style.front.flatten(PAGE_BACKDROP)))
            .unwrap_or(Color::Reset);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title.to_string(),
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.image_url.to_string(),
                Style::default().fg(fg).add_modifier(Modifier::DIM),
            )),
        ];
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// The writing side of the card: form, stamp box and postmark.
pub struct CardRear<'a> {
    pub style: Option<&'a CardStyle>,
    pub sender: &'a str,
    pub recipient: &'a str,
    pub message: &'a str,
    pub focus: Field,
    pub caption: &'a str,
    pub stamp: Option<StampView<'a>>,
}

impl CardRear<'_> {
    fn field_line(
        &self,
        style: &CardStyle,
        rear: AppColor,
        label: &str,
        value: &str,
        placeholder: &str,
        field: Field,
    ) -> Line<'static> {
        let label_style = Style::default().fg(shown(style.role(CardRole::LabelText), rear));
        let field_bg = shown(style.role(CardRole::FieldBackground), rear);
        let (text, fg) = if value.is_empty() {
            (placeholder.to_string(), style.role(CardRole::Placeholder))
        } else {
            (value.to_string(), style.role(CardRole::InputText))
        };
        let mut value_style = Style::default().bg(field_bg).fg(shown(fg, rear));
        if self.focus == field {
            value_style = value_style.add_modifier(Modifier::UNDERLINED);
        }
        let marker = Style::default().fg(shown(style.role(CardRole::Placeholder), rear));
        Line::from(vec![
            Span::styled(format!("{label:<6}"), label_style),
            Span::styled(format!(" {text:<30} "), value_style),
            Span::styled("*", marker),
        ])
    }

    fn stamp_lines(&self, style: &CardStyle, rear: AppColor) -> Vec<Line<'static>> {
        let stamp_fg = Style::default().fg(shown(style.role(CardRole::StampText), rear));
        let Some(view) = &self.stamp else {
            return vec![Line::from(Span::styled(STAMP_PLACEHOLDER, stamp_fg))];
        };

        let mut lines = Vec::new();
        if view.stamp_opacity > 0.0 {
            let tilt = match view.angle {
                a if a < 0 => "\\",
                0 => "|",
                _ => "/",
            };
            let ink = style.role(CardRole::DateStamp).color;
            let faded = ink.over(rear, view.stamp_opacity);
            lines.push(Line::from(Span::styled(
                format!("[{tilt} STAMP {tilt}] {:+}°", view.angle),
                Style::default().fg(to_color(faded)).add_modifier(Modifier::BOLD),
            )));
        }
        if view.date_stamp_visible && view.date_stamp_opacity > 0.0 {
            let ink = style.role(CardRole::DateStamp).color;
            let faded = ink.over(rear, view.date_stamp_opacity);
            lines.push(Line::from(Span::styled(
                format!("( {} )", view.date_text),
                Style::default().fg(to_color(faded)),
            )));
        }
        if let Some(placeholder) = view.placeholder {
            lines.push(Line::from(Span::styled(placeholder, stamp_fg)));
        }
        lines
    }
}

impl Widget for CardRear<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(style) = self.style else {
            Paragraph::new("")
                .block(Block::bordered().border_type(BorderType::Rounded))
                .render(area, buf);
            return;
        };

        let rear = style.role(CardRole::CardRear).flatten(PAGE_BACKDROP);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(to_color(rear)));
        let inner = block.inner(area);
        block.render(area, buf);

        let [form_area, stamp_area] =
            Layout::horizontal([Constraint::Min(40), Constraint::Length(38)]).areas(inner);
        let [fields_area, caption_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(2)]).areas(form_area);

        let mut lines = vec![
            Line::from(""),
            self.field_line(
                style,
                rear,
                "From:",
                self.sender,
                "your email here",
                Field::Sender,
            ),
            Line::from(""),
            self.field_line(
                style,
                rear,
                "To:",
                self.recipient,
                "recipient email",
                Field::Recipient,
            ),
            Line::from(""),
        ];
        let mut message_style = Style::default()
            .bg(shown(style.role(CardRole::FieldBackground), rear))
            .fg(shown(style.role(CardRole::Placeholder), rear));
        if self.focus == Field::Message {
            message_style = message_style.add_modifier(Modifier::UNDERLINED);
        }
        let message = if self.message.is_empty() {
            "write your message".to_string()
        } else {
            self.message.to_string()
        };
        lines.push(Line::from(Span::styled(format!(" {message} "), message_style)));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(fields_area, buf);

        Paragraph::new(Line::from(Span::styled(
            self.caption.to_string(),
            Style::default()
                .fg(shown(style.role(CardRole::Caption), rear))
                .add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true })
        .render(caption_area, buf);

        let border = if self.stamp.is_some() {
            style.role(CardRole::StampBorderHover)
        } else {
            style.role(CardRole::StampBorder)
        };
        let stamp_block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(shown(border, rear)));
        Paragraph::new(self.stamp_lines(style, rear))
            .block(stamp_block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(stamp_area, buf);
    }
}

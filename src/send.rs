//! The "stamp & send" form and its animation timeline.

use std::time::Duration;

use chrono::NaiveDate;
use rand::Rng;
use tokio::time::{sleep_until, Instant};
use validator::ValidateEmail;

use crate::error::FormError;

/// Acknowledgement shown once the card has "gone out".
pub const SENT_ACK: &str = "Postcard sent!";
/// Text in the empty stamp box.
pub const STAMP_PLACEHOLDER: &str = "Stamp & send";
/// Postmark origin printed before the date.
pub const POSTMARK_ORIGIN: &str = "Port of Amsterdam";
/// Stamps land up to this many degrees off square.
pub const STAMP_ANGLE_LIMIT: i32 = 5;

const DATE_STAMP_DELAY: Duration = Duration::from_millis(2000);
const DATE_STAMP_FADE: Duration = Duration::from_millis(600);
const SEND_DELAY: Duration = Duration::from_millis(4000);
const DATE_STAMP_HIDE_DELAY: Duration = Duration::from_millis(610);
const STAMP_FADE_DELAY: Duration = Duration::from_millis(1000);
const STAMP_FADE: Duration = Duration::from_millis(450);
const PLACEHOLDER_DELAY: Duration = Duration::from_millis(1500);

/// Sender, recipient and message typed on the card rear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendForm {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}

impl SendForm {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    /// Both addresses must be present and well-formed.
    pub fn validate(&self) -> Result<(), FormError> {
        check_email("sender", &self.sender)?;
        check_email("recipient", &self.recipient)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn check_email(field: &'static str, value: &str) -> Result<(), FormError> {
    // email inputs ignore surrounding whitespace
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingEmail { field });
    }
    if !value.validate_email() {
        return Err(FormError::InvalidEmail {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Postmark text, e.g. `Port of Amsterdam, Oct 15 2026`.
pub fn date_stamp(date: NaiveDate) -> String {
    format!("{POSTMARK_ORIGIN}, {}", date.format("%b %-d %Y"))
}

/// Whole-degree tilt in `[-limit, limit)`.
pub fn random_angle<R: Rng>(rng: &mut R, limit: i32) -> i32 {
    if limit <= 0 {
        return 0;
    }
    rng.random_range(-limit..limit)
}

/// One step of the send animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Stamp appears tilted; the placeholder clears; the postmark moves to the front.
    StampApplied,
    /// Postmark fades in.
    DateStampFadeIn,
    /// Acknowledge the send and reset the form; the postmark starts fading out.
    Sent,
    /// Postmark hidden and moved behind the card.
    DateStampHidden,
    /// Stamp fades out.
    StampFadeOut,
    /// The empty stamp box shows its placeholder again.
    PlaceholderRestored,
}

/// Visual state of the stamp box at a point in the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct StampView<'a> {
    pub angle: i32,
    pub stamp_opacity: f32,
    pub date_stamp_opacity: f32,
    pub date_stamp_visible: bool,
    pub date_text: &'a str,
    pub placeholder: Option<&'static str>,
    pub sent: bool,
    pub finished: bool,
}

/// The timed cues that follow a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSequence {
    angle: i32,
    date_text: String,
    cues: Vec<(Duration, Cue)>,
}

impl SendSequence {
    pub fn new(angle: i32, date_text: impl Into<String>) -> Self {
        let hide_start = SEND_DELAY;
        let cues = vec![
            (Duration::ZERO, Cue::StampApplied),
            (DATE_STAMP_DELAY, Cue::DateStampFadeIn),
            (SEND_DELAY, Cue::Sent),
            (hide_start + DATE_STAMP_HIDE_DELAY, Cue::DateStampHidden),
            (hide_start + STAMP_FADE_DELAY, Cue::StampFadeOut),
            (hide_start + PLACEHOLDER_DELAY, Cue::PlaceholderRestored),
        ];
        Self {
            angle,
            date_text: date_text.into(),
            cues,
        }
    }

    /// Validate the form and plan the animation for `today`.
    pub fn start<R: Rng>(
        form: &SendForm,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Self, FormError> {
        form.validate()?;
        Ok(Self::new(
            random_angle(rng, STAMP_ANGLE_LIMIT),
            date_stamp(today),
        ))
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn cues(&self) -> &[(Duration, Cue)] {
        &self.cues
    }

    /// Time from the send until the placeholder is back.
    pub fn duration(&self) -> Duration {
        self.cues.last().map_or(Duration::ZERO, |(at, _)| *at)
    }

    /// Cues whose time falls in `(after, until]`.
    pub fn cues_between(&self, after: Option<Duration>, until: Duration) -> Vec<Cue> {
        self.cues
            .iter()
            .filter(|(at, _)| after.map_or(true, |after| *at > after) && *at <= until)
            .map(|(_, cue)| *cue)
            .collect()
    }

    /// What the stamp box looks like `elapsed` after the send.
    pub fn view_at(&self, elapsed: Duration) -> StampView<'_> {
        let fade_out_start = SEND_DELAY + STAMP_FADE_DELAY;
        let stamp_opacity = 1.0 - progress(elapsed, fade_out_start, STAMP_FADE);

        let fade_in = progress(elapsed, DATE_STAMP_DELAY, DATE_STAMP_FADE);
        let fade_out = progress(elapsed, SEND_DELAY, DATE_STAMP_FADE);
        let date_stamp_visible =
            elapsed >= DATE_STAMP_DELAY && elapsed < SEND_DELAY + DATE_STAMP_HIDE_DELAY;
        let date_stamp_opacity = if date_stamp_visible {
            fade_in * (1.0 - fade_out)
        } else {
            0.0
        };

        let finished = elapsed >= self.duration();
        StampView {
            angle: self.angle,
            stamp_opacity,
            date_stamp_opacity,
            date_stamp_visible,
            date_text: &self.date_text,
            placeholder: finished.then_some(STAMP_PLACEHOLDER),
            sent: elapsed >= SEND_DELAY,
            finished,
        }
    }

    /// Sleep through the timeline, reporting each cue as it comes due.
    pub async fn play<F>(&self, mut on_cue: F)
    where
        F: FnMut(Cue),
    {
        let start = Instant::now();
        for (at, cue) in &self.cues {
            sleep_until(start + *at).await;
            on_cue(*cue);
        }
    }
}

/// Linear 0..=1 progress through a `length` window starting at `start`.
fn progress(elapsed: Duration, start: Duration, length: Duration) -> f32 {
    if elapsed <= start {
        0.0
    } else if elapsed >= start + length {
        1.0
    } else {
        (elapsed - start).as_secs_f32() / length.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn valid_form_passes() {
        let form = SendForm::new("me@example.com", "you@example.org", "Greetings");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn empty_addresses_are_missing() {
        let form = SendForm::new("", "you@example.org", "");
        assert_eq!(
            form.validate(),
            Err(FormError::MissingEmail { field: "sender" })
        );
        let form = SendForm::new("me@example.com", "   ", "");
        assert_eq!(
            form.validate(),
            Err(FormError::MissingEmail { field: "recipient" })
        );
    }

    #[test]
    fn malformed_address_is_rejected() {
        let form = SendForm::new("me@example.com", "not an email", "");
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidEmail {
                field: "recipient",
                ..
            })
        ));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let form = SendForm::new("  me@example.com ", "you@example.org\n", "");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn reset_clears_everything() {
        let mut form = SendForm::new("a@b.nl", "c@d.nl", "hoi");
        form.reset();
        assert_eq!(form, SendForm::default());
    }

    #[test]
    fn postmark_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(date_stamp(date), "Port of Amsterdam, Oct 5 2026");
    }

    #[test]
    fn angle_stays_within_limit() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let angle = random_angle(&mut rng, STAMP_ANGLE_LIMIT);
            assert!((-5..5).contains(&angle), "angle {angle} out of range");
        }
        assert_eq!(random_angle(&mut rng, 0), 0);
    }

    #[test]
    fn start_refuses_invalid_form() {
        let mut rng = StdRng::seed_from_u64(3);
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let form = SendForm::new("me@example.com", "", "");
        assert!(SendSequence::start(&form, today, &mut rng).is_err());
    }

    #[test]
    fn timeline_matches_choreography() {
        let sequence = SendSequence::new(2, "Port of Amsterdam, Oct 15 2026");
        let offsets: Vec<u64> = sequence
            .cues()
            .iter()
            .map(|(at, _)| at.as_millis() as u64)
            .collect();
        assert_eq!(offsets, vec![0, 2000, 4000, 4610, 5000, 5500]);
        assert_eq!(sequence.duration(), ms(5500));
    }

    #[test]
    fn view_before_postmark() {
        let sequence = SendSequence::new(-3, "pm");
        let view = sequence.view_at(ms(100));
        assert_eq!(view.angle, -3);
        assert_eq!(view.stamp_opacity, 1.0);
        assert!(!view.date_stamp_visible);
        assert_eq!(view.placeholder, None);
        assert!(!view.sent);
    }

    #[test]
    fn view_while_postmarked() {
        let sequence = SendSequence::new(0, "pm");
        let half = sequence.view_at(ms(2300));
        assert!(half.date_stamp_visible);
        assert!((half.date_stamp_opacity - 0.5).abs() < 0.01);
        let full = sequence.view_at(ms(3000));
        assert_eq!(full.date_stamp_opacity, 1.0);
        assert_eq!(full.date_text, "pm");
    }

    #[test]
    fn view_after_send() {
        let sequence = SendSequence::new(0, "pm");
        let sent = sequence.view_at(ms(4100));
        assert!(sent.sent);
        assert!(sent.date_stamp_opacity < 1.0);
        assert!(!sequence.view_at(ms(4610)).date_stamp_visible);
        assert!(sequence.view_at(ms(5225)).stamp_opacity < 0.6);
        assert_eq!(sequence.view_at(ms(5450)).stamp_opacity, 0.0);

        let done = sequence.view_at(ms(5500));
        assert!(done.finished);
        assert_eq!(done.placeholder, Some(STAMP_PLACEHOLDER));
    }

    #[test]
    fn cues_between_windows() {
        let sequence = SendSequence::new(0, "pm");
        assert_eq!(sequence.cues_between(None, ms(0)), vec![Cue::StampApplied]);
        assert_eq!(
            sequence.cues_between(Some(ms(0)), ms(4700)),
            vec![Cue::DateStampFadeIn, Cue::Sent, Cue::DateStampHidden]
        );
        assert!(sequence.cues_between(Some(ms(5500)), ms(9000)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn play_reports_cues_in_order() {
        let sequence = SendSequence::new(1, "pm");
        let mut seen = Vec::new();
        sequence.play(|cue| seen.push(cue)).await;
        assert_eq!(
            seen,
            vec![
                Cue::StampApplied,
                Cue::DateStampFadeIn,
                Cue::Sent,
                Cue::DateStampHidden,
                Cue::StampFadeOut,
                Cue::PlaceholderRestored,
            ]
        );
    }
}

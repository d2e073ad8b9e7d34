//! Monochrome screens for a 128x64 panel.

use core::fmt::Write as _;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};
use heapless::String;
use u8g2_fonts::{
    fonts,
    types::{FontColor, HorizontalAlignment, VerticalPosition},
    FontRenderer,
};

use crate::config::MAX_DIGITS;
use crate::session::{AuthScreen, Notice};
use crate::touch::{Channel, ProgressSink};

pub const PANEL_WIDTH: i32 = 128;
pub const PANEL_HEIGHT: i32 = 64;

const CENTER_X: i32 = PANEL_WIDTH / 2;
const SINGLE_LINE_Y: i32 = 24;
const FIRST_LINE_Y: i32 = 16;
const SECOND_LINE_Y: i32 = 40;
const DOT_DIAMETER: u32 = 7;
const HIGHLIGHT_DIAMETER: u32 = 11;
/// Longest prompt shown before a numeric entry, in bytes.
pub const PROMPT_CAPACITY: usize = 16;
const DIGIT_LINE_CAPACITY: usize = PROMPT_CAPACITY + 2 + MAX_DIGITS;

const NOTICE_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_6x10_tf>();

pub type DrawResult<E> = Result<(), u8g2_fonts::Error<E>>;

pub fn button_center(channel: Channel) -> Point {
    match channel {
        Channel::Up => Point::new(64, 12),
        Channel::Right => Point::new(100, 32),
        Channel::Down => Point::new(64, 52),
        Channel::Left => Point::new(28, 32),
        Channel::Center => Point::new(64, 32),
    }
}

/// Clears the panel, draws the five pads as dots, links the entered path and
/// enlarges the most recent element.
pub fn draw_pattern<T>(display: &mut T, entered: &[Channel]) -> DrawResult<T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    display
        .clear(BinaryColor::Off)
        .map_err(u8g2_fonts::Error::DisplayError)?;

    let filled = PrimitiveStyle::with_fill(BinaryColor::On);
    for channel in Channel::ALL {
        Circle::with_center(button_center(channel), DOT_DIAMETER)
            .into_styled(filled)
            .draw(display)
            .map_err(u8g2_fonts::Error::DisplayError)?;
    }

    let link = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    for pair in entered.windows(2) {
        Line::new(button_center(pair[0]), button_center(pair[1]))
            .into_styled(link)
            .draw(display)
            .map_err(u8g2_fonts::Error::DisplayError)?;
    }

    if let Some(&last) = entered.last() {
        Circle::with_center(button_center(last), HIGHLIGHT_DIAMETER)
            .into_styled(filled)
            .draw(display)
            .map_err(u8g2_fonts::Error::DisplayError)?;
    }
    Ok(())
}

pub fn draw_notice<T>(display: &mut T, notice: &Notice) -> DrawResult<T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    display
        .clear(BinaryColor::Off)
        .map_err(u8g2_fonts::Error::DisplayError)?;

    let (first, second) = notice.lines();
    match (notice, second) {
        (Notice::WrongPattern { attempts_left }, Some(second)) => {
            let mut line: String<24> = String::new();
            let _ = write!(&mut line, "{} {}", attempts_left, second);
            draw_centered(display, first, FIRST_LINE_Y)?;
            draw_centered(display, &line, SECOND_LINE_Y)
        }
        (Notice::LoginWarning { segments }, Some(second)) => {
            draw_centered(display, first, FIRST_LINE_Y)?;
            draw_centered(display, second, SECOND_LINE_Y - 6)?;
            let mut marks: String<16> = String::new();
            for &matched in segments.iter() {
                let _ = marks.push(if matched { '+' } else { '-' });
            }
            draw_centered(display, &marks, SECOND_LINE_Y + 8)
        }
        (_, Some(second)) => {
            draw_centered(display, first, FIRST_LINE_Y)?;
            draw_centered(display, second, SECOND_LINE_Y)
        }
        (_, None) => draw_centered(display, first, SINGLE_LINE_Y),
    }
}

/// Renders `"<prompt>: <digits>"` for an in-progress numeric entry.
///
/// Prompts longer than [`PROMPT_CAPACITY`] are clipped on a char boundary.
pub fn draw_digits<T>(display: &mut T, prompt: &str, entered: &[u8]) -> DrawResult<T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    display
        .clear(BinaryColor::Off)
        .map_err(u8g2_fonts::Error::DisplayError)?;

    let shown = clip(prompt, PROMPT_CAPACITY);
    if shown.len() < prompt.len() {
        log::warn!("render: prompt clipped to {} bytes", shown.len());
    }
    let mut line: String<DIGIT_LINE_CAPACITY> = String::new();
    let _ = line.push_str(shown);
    let _ = line.push_str(": ");
    for &digit in entered.iter().take(MAX_DIGITS) {
        if let Some(c) = char::from_digit(u32::from(digit), 10) {
            let _ = line.push(c);
        }
    }
    draw_centered(display, &line, SINGLE_LINE_Y)
}

fn clip(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn draw_centered<T>(display: &mut T, text: &str, center_y: i32) -> DrawResult<T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    NOTICE_FONT
        .render_aligned(
            text,
            Point::new(CENTER_X, center_y),
            VerticalPosition::Center,
            HorizontalAlignment::Center,
            FontColor::Transparent(BinaryColor::On),
            display,
        )
        .map(|_| ())
}

/// `AuthScreen` that draws every update onto a binary display.
///
/// Draw errors are logged and counted, never propagated into the session.
pub struct GraphicsScreen<D> {
    display: D,
    failures: u32,
}

impl<D> GraphicsScreen<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(display: D) -> Self {
        Self {
            display,
            failures: 0,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn into_inner(self) -> D {
        self.display
    }

    fn note(&mut self, result: DrawResult<D::Error>, what: &str) {
        if result.is_err() {
            self.failures = self.failures.saturating_add(1);
            log::warn!("render: {} draw failed ({} total)", what, self.failures);
        }
    }
}

impl<D> ProgressSink for GraphicsScreen<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn digits(&mut self, prompt: &str, entered: &[u8]) {
        let result = draw_digits(&mut self.display, prompt, entered);
        self.note(result, "digits");
    }

    fn pattern(&mut self, entered: &[Channel]) {
        let result = draw_pattern(&mut self.display, entered);
        self.note(result, "pattern");
    }
}

impl<D> AuthScreen for GraphicsScreen<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn notice(&mut self, notice: &Notice) {
        let result = draw_notice(&mut self.display, notice);
        self.note(result, "notice");
    }
}

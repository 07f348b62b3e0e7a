use super::font::{draw_text, fill_rect, text_width, GLYPH_HEIGHT};
use super::{CardRenderer, StagedCard};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use image::{ImageFormat, Rgb, RgbImage};

const MARGIN: u32 = 24;
const CELL: u32 = 72;
const HEADER: u32 = 88;
const WEEKDAY_BAR: u32 = 20;
const ROWS: u32 = 6;

const WIDTH: u32 = MARGIN * 2 + CELL * 7;
const HEIGHT: u32 = MARGIN * 4 + HEADER + WEEKDAY_BAR + CELL * ROWS;

const BACKGROUND: Rgb<u8> = Rgb([255, 250, 240]);
const HEADER_FILL: Rgb<u8> = Rgb([120, 164, 212]);
const HEADER_INK: Rgb<u8> = Rgb([255, 255, 255]);
const WEEKDAY_FILL: Rgb<u8> = Rgb([200, 214, 230]);
const SUNDAY_FILL: Rgb<u8> = Rgb([240, 178, 178]);
const INK: Rgb<u8> = Rgb([70, 70, 80]);
const SUNDAY_INK: Rgb<u8> = Rgb([204, 68, 68]);
const TODAY_FILL: Rgb<u8> = Rgb([255, 204, 102]);
const TODAY_INK: Rgb<u8> = Rgb([40, 40, 40]);

/// Where the days of a month fall in a Sunday-first grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    /// Column of the 1st, 0 = Sunday.
    pub first_column: u32,
    pub days: u32,
    pub today: u32,
}

impl MonthLayout {
    pub fn for_date(date: NaiveDate) -> Result<Self> {
        let first = date
            .with_day(1)
            .ok_or_else(|| Error::Invariant(format!("no first day for {}", date)))?;
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let last = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| Error::Invariant(format!("no last day for {}", date)))?;

        Ok(Self {
            first_column: first.weekday().num_days_from_sunday(),
            days: last.day(),
            today: date.day(),
        })
    }

    /// Grid `(column, row)` of a day of the month.
    pub fn position(&self, day: u32) -> (u32, u32) {
        let index = self.first_column + day - 1;
        (index % 7, index / 7)
    }
}

/// Renders a month grid PNG with today highlighted and Sundays tinted.
#[derive(Debug, Default, Clone)]
pub struct CalendarRenderer;

impl CalendarRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw(date: NaiveDate) -> Result<RgbImage> {
        let layout = MonthLayout::for_date(date)?;
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        fill_rect(&mut img, MARGIN, MARGIN, WIDTH - MARGIN * 2, HEADER, HEADER_FILL);
        let title = format!("{:04}-{:02}", date.year(), date.month());
        let title_scale = 8;
        draw_text(
            &mut img,
            (WIDTH - text_width(&title, title_scale)) / 2,
            MARGIN + (HEADER - GLYPH_HEIGHT * title_scale) / 2,
            &title,
            title_scale,
            HEADER_INK,
        );

        let bar_y = MARGIN * 2 + HEADER;
        for column in 0..7 {
            let fill = if column == 0 { SUNDAY_FILL } else { WEEKDAY_FILL };
            fill_rect(
                &mut img,
                MARGIN + column * CELL + 2,
                bar_y,
                CELL - 4,
                WEEKDAY_BAR,
                fill,
            );
        }

        let grid_y = bar_y + WEEKDAY_BAR + MARGIN;
        let scale = 5;
        for day in 1..=layout.days {
            let (column, row) = layout.position(day);
            let x = MARGIN + column * CELL;
            let y = grid_y + row * CELL;

            let ink = if day == layout.today {
                fill_rect(&mut img, x + 4, y + 4, CELL - 8, CELL - 8, TODAY_FILL);
                TODAY_INK
            } else if column == 0 {
                SUNDAY_INK
            } else {
                INK
            };

            let label = day.to_string();
            draw_text(
                &mut img,
                x + (CELL - text_width(&label, scale)) / 2,
                y + (CELL - GLYPH_HEIGHT * scale) / 2,
                &label,
                scale,
                ink,
            );
        }

        Ok(img)
    }

    fn render_sync(date: NaiveDate) -> Result<StagedCard> {
        let img = Self::draw(date)?;
        let mut file = tempfile::Builder::new()
            .prefix(&format!("calendar-{}-", date.format("%Y%m%d")))
            .suffix(".png")
            .tempfile()?;
        img.write_to(file.as_file_mut(), ImageFormat::Png)?;
        Ok(StagedCard::new(file))
    }
}

#[async_trait]
impl CardRenderer for CalendarRenderer {
    async fn render(&self, date: NaiveDate) -> Result<StagedCard> {
        let card = tokio::task::spawn_blocking(move || Self::render_sync(date))
            .await
            .map_err(|e| Error::Invariant(format!("Calendar rendering task join error: {}", e)))??;
        tracing::info!("Rendered calendar card at {}", card.path().display());
        Ok(card)
    }
}

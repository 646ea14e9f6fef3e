use api::{Document, RawPoint};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use super::HourlyPrice;

/// Calendar month the derived hours are filtered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceMonth {
    pub year: i32,
    pub month: u32,
}

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::new(time.year(), time.month())
    }

    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        time.year() == self.year && time.month() == self.month
    }
}

/// Flattens the periods of a document into gap-filled, converted hourly prices
/// of the reference month. Periods are neither sorted nor deduplicated against each other.
pub fn normalize(document: &Document, reference_month: ReferenceMonth) -> Vec<HourlyPrice> {
    document
        .periods
        .iter()
        .flat_map(|period| {
            fill_missing_positions(&period.points)
                .into_iter()
                .filter_map(move |point| {
                    let timestamp = position_timestamp(period.start, point.position)?;
                    if !reference_month.contains(&timestamp) {
                        return None;
                    }

                    Some(HourlyPrice {
                        timestamp,
                        price: convert_price(point.price),
                    })
                })
        })
        .collect()
}

/// The upstream leaves out hours whose price repeats, so each gap holds the price
/// of the point before it. Nothing is filled in front of the first point.
pub fn fill_missing_positions(points: &[RawPoint]) -> Vec<RawPoint> {
    let mut filled = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        filled.push(*point);

        if let Some(next) = points.get(i + 1) {
            filled.extend(
                (point.position + 1..next.position).map(|position| RawPoint {
                    position,
                    price: point.price,
                }),
            );
        }
    }

    filled
}

/// `None` when the hour falls outside the representable time range.
pub fn position_timestamp(start: DateTime<Utc>, position: u32) -> Option<DateTime<Utc>> {
    start.checked_add_signed(Duration::hours(i64::from(position) - 1))
}

/// EUR/MWh to c/kWh, VAT 25.5 % included.
pub fn convert_price(price: f64) -> f64 {
    price * 0.1 * 1.255
}

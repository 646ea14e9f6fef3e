use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::DecodeError;
use crate::models::{
    AcknowledgementDocument, Document, MarketDocument, MarketPeriod, Period, RawPoint,
};

const PERIOD_START_FORMAT: &str = "%Y-%m-%dT%H:%MZ";
const ACKNOWLEDGEMENT_ROOT: &[u8] = b"Acknowledgement_MarketDocument";

/// Decodes a day-ahead price document into periods of position-indexed points.
pub fn decode_document(body: &[u8]) -> Result<Document, DecodeError> {
    let xml = std::str::from_utf8(body)?;

    if is_acknowledgement(xml)? {
        let acknowledgement: AcknowledgementDocument = quick_xml::de::from_str(xml)?;
        let reason = acknowledgement.reason.into_iter().next();
        return Err(DecodeError::Acknowledgement {
            code: reason.as_ref().map(|r| r.code.clone()).unwrap_or_default(),
            text: reason.map(|r| r.text).unwrap_or_default(),
        });
    }

    let market: MarketDocument = quick_xml::de::from_str(xml)?;

    let mut periods = Vec::new();
    for series in market.time_series {
        for period in series.period {
            periods.push(decode_period(period)?);
        }
    }

    let document = Document { periods };
    debug!("Decoded document: {:#?}", document);

    Ok(document)
}

pub fn parse_period_start(value: &str) -> Result<DateTime<Utc>, DecodeError> {
    NaiveDateTime::parse_from_str(value.trim(), PERIOD_START_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|source| DecodeError::TimeParse {
            value: value.to_string(),
            source,
        })
}

fn decode_period(period: MarketPeriod) -> Result<Period, DecodeError> {
    let start = parse_period_start(&period.time_interval.start)?;
    let end = parse_period_start(&period.time_interval.end)?;
    let span = (end - start).num_hours();

    // Positions are 1-based, strictly increasing and within the period's interval.
    let mut previous = 0;
    let mut points = Vec::with_capacity(period.point.len());
    for point in period.point {
        if point.position <= previous {
            return Err(DecodeError::UnorderedPositions {
                previous,
                position: point.position,
            });
        }
        if i64::from(point.position) > span {
            return Err(DecodeError::PositionOutOfRange {
                position: point.position,
                span,
            });
        }
        previous = point.position;
        points.push(RawPoint {
            position: point.position,
            price: point.price,
        });
    }

    Ok(Period { start, points })
}

fn is_acknowledgement(xml: &str) -> Result<bool, DecodeError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(quick_xml::DeError::from)? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(element.local_name().as_ref() == ACKNOWLEDGEMENT_ROOT);
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}

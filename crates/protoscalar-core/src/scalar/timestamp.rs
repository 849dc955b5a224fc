//! Tick-based timestamps.
//!
//! A tick is 100 nanoseconds counted from `0001-01-01T00:00:00`. UTC
//! timestamps count ticks of the UTC instant; offset timestamps count ticks
//! of the local wall clock and carry the offset separately.

use super::{ExtendedScalar, ScalarValue};
use crate::error::{Error, FormatError, Result};
use crate::proto;
use crate::registry::{ExtendedType, Primitive};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};

/// Ticks per second
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Ticks of `9999-12-31T23:59:59.9999999`, the last representable instant
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
const MAX_OFFSET_TICKS: i64 = 14 * 60 * TICKS_PER_MINUTE;
const NANOS_PER_TICK: u32 = 100;

/// Seconds from `0001-01-01` to the Unix epoch
const UNIX_EPOCH_SECONDS: i64 = 62_135_596_800;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn naive_to_ticks(naive: &NaiveDateTime) -> i64 {
    let utc = naive.and_utc();
    let ticks = (i128::from(utc.timestamp()) + i128::from(UNIX_EPOCH_SECONDS))
        * i128::from(TICKS_PER_SECOND)
        + i128::from(utc.timestamp_subsec_nanos() / NANOS_PER_TICK);
    // Only reachable outside 0001..=9999
    i64::try_from(ticks).unwrap_or(if ticks < 0 { i64::MIN } else { i64::MAX })
}

fn ticks_to_naive(ty: ExtendedType, ticks: i64) -> Result<NaiveDateTime> {
    if !(0..=MAX_TICKS).contains(&ticks) {
        return Err(Error::out_of_range(
            ty,
            format!("ticks {ticks} outside 0..={MAX_TICKS}"),
        ));
    }
    let seconds = ticks.div_euclid(TICKS_PER_SECOND) - UNIX_EPOCH_SECONDS;
    let nanos = ticks.rem_euclid(TICKS_PER_SECOND) as u32 * NANOS_PER_TICK;
    DateTime::from_timestamp(seconds, nanos)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| Error::out_of_range(ty, format!("ticks {ticks} not representable")))
}

/// Sub-second part in ticks, ignoring any leap-second overflow
fn fraction_ticks<T: Timelike>(value: &T) -> u32 {
    (value.nanosecond() % 1_000_000_000) / NANOS_PER_TICK
}

fn truncate_to_ticks<Tz: TimeZone>(value: DateTime<Tz>) -> DateTime<Tz> {
    let nanos = value.nanosecond() % 1_000_000_000;
    value
        .with_nanosecond(nanos - nanos % NANOS_PER_TICK)
        .unwrap_or(value)
}

/// Parses text without an offset; such text is taken to be UTC.
fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_offset(text: &str) -> std::result::Result<DateTime<FixedOffset>, FormatError> {
    let trimmed = text.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .or_else(|| parse_naive(trimmed).map(|naive| naive.and_utc().fixed_offset()))
        .ok_or_else(|| FormatError::new(text, "not a valid round-trip timestamp"))
}

/// Text parses only to values a setter would accept
fn parsed_in_domain<T: ExtendedScalar>(
    text: &str,
    value: T,
) -> std::result::Result<T, FormatError> {
    value
        .normalize()
        .map_err(|e| FormatError::new(text, e.to_string()))
}

fn single_int64(ty: ExtendedType, primitives: &[Primitive]) -> Result<i64> {
    match primitives {
        [Primitive::Int64(ticks)] => Ok(*ticks),
        _ => Err(Error::invalid_shape(ty, "expected a single int64")),
    }
}

impl ExtendedScalar for DateTime<Utc> {
    const TYPE: ExtendedType = ExtendedType::Timestamp;

    type Proxy = proto::Timestamp;

    fn zero() -> Self {
        DateTime::from_timestamp(-UNIX_EPOCH_SECONDS, 0).unwrap_or_default()
    }

    fn normalize(self) -> Result<Self> {
        let value = truncate_to_ticks(self);
        Self::from_proxy(&value.to_proxy())?;
        Ok(value)
    }

    fn to_proxy(&self) -> Self::Proxy {
        proto::Timestamp {
            ticks: naive_to_ticks(&self.naive_utc()),
        }
    }

    fn from_proxy(proxy: &Self::Proxy) -> Result<Self> {
        ticks_to_naive(Self::TYPE, proxy.ticks).map(|naive| naive.and_utc())
    }

    fn decompose(&self) -> Vec<Primitive> {
        vec![Primitive::Int64(self.to_proxy().ticks)]
    }

    fn recompose(primitives: &[Primitive]) -> Result<Self> {
        let ticks = single_int64(Self::TYPE, primitives)?;
        Self::from_proxy(&proto::Timestamp { ticks })
    }

    fn to_canonical_text(&self) -> String {
        format!(
            "{}.{:07}Z",
            self.format(DATE_TIME_FORMAT),
            fraction_ticks(self)
        )
    }

    fn parse_canonical_text(text: &str) -> std::result::Result<Self, FormatError> {
        let value = parse_offset(text)?.with_timezone(&Utc);
        parsed_in_domain(text, value)
    }

    fn into_value(self) -> ScalarValue {
        ScalarValue::Timestamp(self)
    }
}

impl ExtendedScalar for DateTime<FixedOffset> {
    const TYPE: ExtendedType = ExtendedType::OffsetTimestamp;

    type Proxy = proto::OffsetTimestamp;

    fn zero() -> Self {
        <DateTime<Utc> as ExtendedScalar>::zero().fixed_offset()
    }

    fn normalize(self) -> Result<Self> {
        let value = truncate_to_ticks(self);
        Self::from_proxy(&value.to_proxy())?;
        Ok(value)
    }

    fn to_proxy(&self) -> Self::Proxy {
        proto::OffsetTimestamp {
            ticks: naive_to_ticks(&self.naive_local()),
            offset_ticks: i64::from(self.offset().local_minus_utc()) * TICKS_PER_SECOND,
        }
    }

    fn from_proxy(proxy: &Self::Proxy) -> Result<Self> {
        let ty = Self::TYPE;
        if proxy.offset_ticks % TICKS_PER_MINUTE != 0 || proxy.offset_ticks.abs() > MAX_OFFSET_TICKS
        {
            return Err(Error::out_of_range(
                ty,
                format!(
                    "offset of {} ticks is not whole minutes within ±14 hours",
                    proxy.offset_ticks
                ),
            ));
        }
        let utc_ticks = proxy.ticks.checked_sub(proxy.offset_ticks).unwrap_or(-1);
        if !(0..=MAX_TICKS).contains(&utc_ticks) {
            return Err(Error::out_of_range(
                ty,
                format!("UTC instant of ticks {} is not representable", proxy.ticks),
            ));
        }

        let local = ticks_to_naive(ty, proxy.ticks)?;
        let offset = FixedOffset::east_opt((proxy.offset_ticks / TICKS_PER_SECOND) as i32)
            .ok_or_else(|| Error::out_of_range(ty, "offset not representable"))?;
        offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| Error::out_of_range(ty, "local time not representable"))
    }

    fn decompose(&self) -> Vec<Primitive> {
        let proxy = self.to_proxy();
        vec![
            Primitive::Int64(proxy.ticks),
            Primitive::Int64(proxy.offset_ticks),
        ]
    }

    fn recompose(primitives: &[Primitive]) -> Result<Self> {
        match primitives {
            [Primitive::Int64(ticks), Primitive::Int64(offset_ticks)] => {
                Self::from_proxy(&proto::OffsetTimestamp {
                    ticks: *ticks,
                    offset_ticks: *offset_ticks,
                })
            }
            _ => Err(Error::invalid_shape(Self::TYPE, "expected two int64 values")),
        }
    }

    fn to_canonical_text(&self) -> String {
        format!(
            "{}.{:07}{}",
            self.format(DATE_TIME_FORMAT),
            fraction_ticks(self),
            self.format("%:z")
        )
    }

    fn parse_canonical_text(text: &str) -> std::result::Result<Self, FormatError> {
        let value = parse_offset(text)?;
        parsed_in_domain(text, value)
    }

    fn into_value(self) -> ScalarValue {
        ScalarValue::OffsetTimestamp(self)
    }
}

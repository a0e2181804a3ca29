use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

use crate::error::NormalizeError;

/// Parse the source API's `YYYYMMDD-HHMMSS-ffffff` timestamps.
///
/// The trailing counter is a sub-second fraction of one to six digits,
/// right-padded to microseconds (`000` is zero, `5` is half a second).
pub fn parse(raw: &str) -> Result<NaiveDateTime, NormalizeError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(\d{8})-(\d{6})-(\d{1,6})$").unwrap());

    let malformed = || NormalizeError::MalformedTimestamp(raw.to_string());
    let caps = re.captures(raw).ok_or_else(malformed)?;

    let date = NaiveDate::parse_from_str(&caps[1], "%Y%m%d").map_err(|_| malformed())?;
    let time = NaiveTime::parse_from_str(&caps[2], "%H%M%S").map_err(|_| malformed())?;
    let micros: u32 = format!("{:0<6}", &caps[3]).parse().map_err(|_| malformed())?;
    let time = time
        .with_nanosecond(micros * 1_000)
        .ok_or_else(malformed)?;

    Ok(NaiveDateTime::new(date, time))
}

/// `1866-08-01`
pub fn calendar_date(raw: &str) -> Result<String, NormalizeError> {
    Ok(parse(raw)?.date().format("%Y-%m-%d").to_string())
}

/// `2014-02-21T02:01:26.763833`; the fraction is dropped when it is zero.
pub fn instant(raw: &str) -> Result<String, NormalizeError> {
    let parsed = parse(raw)?;
    let fmt = if parsed.nanosecond() == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M:%S%.6f"
    };
    Ok(parsed.format(fmt).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_calendar_date() {
        assert_eq!(calendar_date("18660801-143000-000").unwrap(), "1866-08-01");
        assert_eq!(calendar_date("19031231-000000-0").unwrap(), "1903-12-31");
    }

    #[test]
    fn keeps_full_instant() {
        assert_eq!(
            instant("20140221-020126-763833").unwrap(),
            "2014-02-21T02:01:26.763833"
        );
        assert_eq!(instant("20140221-020126-000").unwrap(), "2014-02-21T02:01:26");
        assert_eq!(instant("20140221-020126-5").unwrap(), "2014-02-21T02:01:26.500000");
    }

    #[test]
    fn rejects_other_formats() {
        for raw in [
            "1866-08-01",
            "18660801",
            "18660801-1430-000",
            "18661301-143000-000",
            "18660832-143000-000",
            "18660801-253000-000",
            "18660801-143000-1234567",
            " 18660801-143000-000",
            "",
        ] {
            assert_eq!(
                parse(raw),
                Err(NormalizeError::MalformedTimestamp(raw.to_string())),
                "{}",
                raw
            );
        }
    }
}

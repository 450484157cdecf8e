use chrono::{Datelike, Local, NaiveDate};
use icu_calendar::types::DateFields;
use icu_calendar::{AnyCalendar, AnyCalendarKind, Date};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;

use crate::calendar::{CalendarDate, ValidRange};
use crate::error::{Error, ErrorKind, Result};

pub const MIN_YEAR: i32 = 3761;
pub const MAX_YEAR: i32 = 99_999;

// 3761 Teves 18 is Gregorian 0001-01-01, the first day that still has a
// Gregorian equivalent.
const MIN_FIXED: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HebrewMonth {
    Nissan = 1,
    Iyar,
    Sivan,
    Tammuz,
    Av,
    Elul,
    Tishrei,
    Cheshvan,
    Kislev,
    Teves,
    Shevat,
    Adar,
    AdarII,
}

impl HebrewMonth {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// CLDR month code, which counts from Tishrei and calls the leap month
    /// Adar I `M05L`.
    fn code(self, leap: bool) -> Option<&'static str> {
        use HebrewMonth::*;
        match (self, leap) {
            (Tishrei, _) => Some("M01"),
            (Cheshvan, _) => Some("M02"),
            (Kislev, _) => Some("M03"),
            (Teves, _) => Some("M04"),
            (Shevat, _) => Some("M05"),
            (Adar, true) => Some("M05L"),
            (Adar, false) | (AdarII, true) => Some("M06"),
            (AdarII, false) => None,
            (Nissan, _) => Some("M07"),
            (Iyar, _) => Some("M08"),
            (Sivan, _) => Some("M09"),
            (Tammuz, _) => Some("M10"),
            (Av, _) => Some("M11"),
            (Elul, _) => Some("M12"),
        }
    }

    fn from_code(code: &str, leap: bool) -> Option<Self> {
        use HebrewMonth::*;
        match code {
            "M01" => Some(Tishrei),
            "M02" => Some(Cheshvan),
            "M03" => Some(Kislev),
            "M04" => Some(Teves),
            "M05" => Some(Shevat),
            "M05L" => Some(Adar),
            "M06" if leap => Some(AdarII),
            "M06" => Some(Adar),
            "M07" => Some(Nissan),
            "M08" => Some(Iyar),
            "M09" => Some(Sivan),
            "M10" => Some(Tammuz),
            "M11" => Some(Av),
            "M12" => Some(Elul),
            _ => None,
        }
    }
}

impl FromPrimitive for HebrewMonth {
    fn from_i64(n: i64) -> Option<Self> {
        if n < 0 {
            None
        } else {
            Self::from_u64(n as u64)
        }
    }

    fn from_u64(n: u64) -> Option<Self> {
        use HebrewMonth::*;
        match n {
            1 => Some(Nissan),
            2 => Some(Iyar),
            3 => Some(Sivan),
            4 => Some(Tammuz),
            5 => Some(Av),
            6 => Some(Elul),
            7 => Some(Tishrei),
            8 => Some(Cheshvan),
            9 => Some(Kislev),
            10 => Some(Teves),
            11 => Some(Shevat),
            12 => Some(Adar),
            13 => Some(AdarII),
            _ => None,
        }
    }
}

const ELUL: u8 = HebrewMonth::Elul as u8;

fn hebrew() -> AnyCalendar {
    AnyCalendar::new(AnyCalendarKind::Hebrew)
}

fn hebrew_date(year: i32, month_code: Option<&str>, day: u8) -> Result<Date<AnyCalendar>> {
    let mut fields = DateFields::default();
    fields.extended_year = Some(year);
    match month_code {
        Some(code) => fields.month_code = Some(code.as_bytes()),
        None => fields.ordinal_month = Some(1),
    }
    fields.day = Some(day);

    Date::try_from_fields(fields, Default::default(), hebrew()).map_err(|err| {
        Error::new(
            ErrorKind::InvalidDateConstruction,
            &format!("{} {:?} {} is not a Hebrew date: {:?}", year, month_code, day, err),
        )
    })
}

fn out_of_range(fixed: i64) -> Error {
    Error::new(
        ErrorKind::OutOfSupportedRange,
        &format!("day number {} is not representable", fixed),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JewishDate {
    year: i32,
    month: u8,
    day: u8,
    fixed: i64,
    leap: bool,
    months: u8,
    month_days: u8,
}

impl JewishDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("year {} not in {}..={}", year, MIN_YEAR, MAX_YEAR),
            ));
        }

        // 1 Tishrei
        let new_year = hebrew_date(year, None, 1)?;
        let code = HebrewMonth::from_u8(month)
            .filter(|_| month <= new_year.months_in_year())
            .and_then(|m| m.code(new_year.is_in_leap_year()))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidDateConstruction,
                    &format!("year {} has no month {}", year, month),
                )
            })?;

        let first = hebrew_date(year, Some(code), 1)?;
        if day < 1 || day > first.days_in_month() {
            return Err(Error::new(
                ErrorKind::InvalidDateConstruction,
                &format!("month {} of year {} has no day {}", month, year, day),
            ));
        }

        let date = Self::from_icu(&hebrew_date(year, Some(code), day)?)?;
        if (date.year, date.month, date.day) != (year, month, day) {
            return Err(Error::new(
                ErrorKind::InvalidDateConstruction,
                &format!("{}-{}-{} came back as {}", year, month, day, date),
            ));
        }

        if date.fixed < MIN_FIXED {
            return Err(Error::new(
                ErrorKind::OutOfSupportedRange,
                "dates before 1 January 1 CE are not supported",
            ));
        }

        Ok(date)
    }

    fn from_icu(date: &Date<AnyCalendar>) -> Result<Self> {
        let leap = date.is_in_leap_year();
        let code = date.month().standard_code.0.to_string();
        let month = HebrewMonth::from_code(&code, leap).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidDateConstruction,
                &format!("unknown month code {}", code),
            )
        })?;

        let iso = date.to_iso();
        let gregorian = NaiveDate::from_ymd_opt(
            iso.year().extended_year(),
            iso.month().ordinal as u32,
            iso.day_of_month().0 as u32,
        )
        .ok_or_else(|| {
            Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("{:?} has no Gregorian equivalent", iso),
            )
        })?;

        Ok(JewishDate {
            year: date.year().extended_year(),
            month: month.number(),
            day: date.day_of_month().0,
            fixed: gregorian.num_days_from_ce() as i64,
            leap,
            months: date.months_in_year(),
            month_days: date.days_in_month(),
        })
    }

    fn from_fixed(fixed: i64) -> Result<Self> {
        if fixed < MIN_FIXED {
            return Err(out_of_range(fixed));
        }

        let gregorian = i32::try_from(fixed)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or_else(|| out_of_range(fixed))?;

        let date = Self::from_gregorian(gregorian)?;
        if date.year > MAX_YEAR {
            return Err(out_of_range(fixed));
        }

        Ok(date)
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        let month = date.month() as u8;
        let day = date.day() as u8;
        let iso = Date::try_new_iso(date.year(), month, day).map_err(|err| {
            Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("{} is not an ISO date: {:?}", date, err),
            )
        })?;

        let converted = Self::from_icu(&iso.to_any().to_calendar(hebrew()))?;
        if converted.fixed < MIN_FIXED {
            return Err(out_of_range(converted.fixed));
        }

        Ok(converted)
    }

    pub fn today() -> Result<Self> {
        Self::from_gregorian(Local::now().date_naive())
    }

    /// Range the viewer keeps its selection in: 3761 Shevat 1 up to the last
    /// day of year 9999.
    pub fn supported_range() -> Result<ValidRange<Self>> {
        Ok(ValidRange::new(
            Self::new(3761, HebrewMonth::Shevat.number(), 1)?,
            Self::new(9999, ELUL, 29)?,
        ))
    }

    pub fn hebrew_month(&self) -> HebrewMonth {
        // month is validated on construction
        HebrewMonth::from_u8(self.month).unwrap_or(HebrewMonth::Nissan)
    }

    pub fn is_leap_year(&self) -> bool {
        self.leap
    }
}

impl CalendarDate for JewishDate {
    fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        Self::new(year, month, day)
    }

    fn from_gregorian(date: NaiveDate) -> Result<Self> {
        JewishDate::from_gregorian(date)
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn month(&self) -> u8 {
        self.month
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn day_of_week(&self) -> u8 {
        (self.fixed.rem_euclid(7) + 1) as u8
    }

    fn months_in_year(&self) -> u8 {
        self.months
    }

    fn days_in_month(&self) -> u8 {
        self.month_days
    }

    fn add_days(&self, delta: i64) -> Result<Self> {
        let fixed = self.fixed.checked_add(delta).ok_or_else(|| {
            Error::new(
                ErrorKind::OutOfSupportedRange,
                &format!("cannot move {} days", delta),
            )
        })?;

        Self::from_fixed(fixed)
    }

    fn to_gregorian(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.fixed as i32).unwrap_or(NaiveDate::MAX)
    }
}

impl PartialOrd for JewishDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JewishDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fixed.cmp(&other.fixed)
    }
}

impl fmt::Display for JewishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u8, day: u8) -> JewishDate {
        JewishDate::new(year, month, day).expect("valid test date")
    }

    #[test]
    fn gregorian_anchors() {
        let cases = [
            ((5784, 7, 1), (2023, 9, 16)),
            ((5784, 1, 15), (2024, 4, 23)),
            ((5785, 7, 1), (2024, 10, 3)),
            ((5784, 13, 1), (2024, 3, 11)),
            ((3761, 10, 18), (1, 1, 1)),
            ((3761, 11, 1), (1, 1, 13)),
        ];

        for ((y, m, d), (gy, gm, gd)) in cases.iter().copied() {
            let date = ymd(y, m, d);
            assert_eq!(
                date.to_gregorian(),
                NaiveDate::from_ymd_opt(gy, gm, gd).unwrap(),
                "{}",
                date
            );
            assert_eq!(JewishDate::from_gregorian(date.to_gregorian()).unwrap(), date);
        }
    }

    #[test]
    fn weekday_starts_on_sunday() {
        // 2023-09-16 was a Saturday, 2024-03-10 a Sunday
        assert_eq!(ymd(5784, 7, 1).day_of_week(), 7);
        assert_eq!(ymd(5784, 12, 30).day_of_week(), 1);
        assert_eq!(ymd(5784, 1, 15).day_of_week(), 3);
    }

    #[test]
    fn leap_years_and_month_lengths() {
        assert!(!ymd(5783, 7, 1).is_leap_year());
        assert!(ymd(5784, 7, 1).is_leap_year());
        assert!(!ymd(5785, 7, 1).is_leap_year());
        assert!(ymd(5787, 7, 1).is_leap_year());
        assert_eq!(ymd(5784, 1, 1).months_in_year(), 13);
        assert_eq!(ymd(5785, 1, 1).months_in_year(), 12);

        let year_length = |year: i32| {
            (ymd(year + 1, 7, 1).to_gregorian() - ymd(year, 7, 1).to_gregorian()).num_days()
        };
        assert_eq!(year_length(5784), 383);
        assert_eq!(year_length(5786), 354);
        assert_eq!(year_length(5787), 385);

        let lengths_5784: Vec<u8> = (1..=13).map(|m| ymd(5784, m, 1).days_in_month()).collect();
        assert_eq!(
            lengths_5784,
            vec![30, 29, 30, 29, 30, 29, 30, 29, 29, 29, 30, 30, 29]
        );

        let lengths_5785: Vec<u8> = (1..=12).map(|m| ymd(5785, m, 1).days_in_month()).collect();
        assert_eq!(
            lengths_5785,
            vec![30, 29, 30, 29, 30, 29, 30, 30, 30, 29, 30, 29]
        );
    }

    #[test]
    fn adar_names_follow_the_year() {
        assert_eq!(ymd(5784, 12, 1).hebrew_month(), HebrewMonth::Adar);
        assert_eq!(ymd(5784, 13, 1).hebrew_month(), HebrewMonth::AdarII);
        assert_eq!(ymd(5785, 12, 1).hebrew_month(), HebrewMonth::Adar);

        // Adar I
        assert_eq!(
            ymd(5784, 12, 1).to_gregorian(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
        );
    }

    #[test]
    fn construction_rejects_impossible_dates() {
        assert!(JewishDate::new(5785, 13, 1).unwrap_err().is_invalid_date());
        assert!(JewishDate::new(5785, 6, 30).unwrap_err().is_invalid_date());
        assert!(JewishDate::new(5784, 0, 1).unwrap_err().is_invalid_date());
        assert!(JewishDate::new(3761, 11, 0).unwrap_err().is_invalid_date());
        assert!(JewishDate::new(3760, 1, 1).unwrap_err().is_out_of_range());
        assert!(JewishDate::new(3761, 10, 17).unwrap_err().is_out_of_range());
    }

    #[test]
    fn add_days_crosses_year_boundary() {
        let erev = ymd(5784, 6, 29);
        assert_eq!(erev.forward().unwrap(), ymd(5785, 7, 1));
        assert_eq!(ymd(5785, 7, 1).add_days(-1).unwrap(), erev);
        assert_eq!(ymd(5784, 12, 30).forward().unwrap(), ymd(5784, 13, 1));
        assert_eq!(ymd(5785, 12, 29).forward().unwrap(), ymd(5785, 1, 1));
    }

    #[test]
    fn add_days_fails_outside_engine() {
        let first = ymd(3761, 10, 18);
        assert!(first.add_days(-1).unwrap_err().is_out_of_range());
        assert!(first.add_days(i64::MIN).unwrap_err().is_out_of_range());
        assert!(first.add_days(i64::MAX).unwrap_err().is_out_of_range());
    }

    #[test]
    fn supported_range_bounds() {
        let range = JewishDate::supported_range().unwrap();
        assert_eq!(range.min(), ymd(3761, 11, 1));
        assert_eq!(range.max(), ymd(9999, 6, 29));
        assert_eq!(
            range.max().to_gregorian(),
            NaiveDate::from_ymd_opt(6239, 9, 25).unwrap()
        );
    }
}

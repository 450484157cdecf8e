use serde::Deserialize;

use super::date::{HebrewMonth, JewishDate};
use crate::calendar::CalendarDate;

const GERESH: char = '\u{05F3}';
const GERSHAYIM: char = '\u{05F4}';
const EFES: &str = "אפס";
const ALAFIM: &str = "אלפים";

const ONES: [&str; 10] = ["", "א", "ב", "ג", "ד", "ה", "ו", "ז", "ח", "ט"];
const TENS: [&str; 10] = ["", "י", "כ", "ל", "מ", "נ", "ס", "ע", "פ", "צ"];
const TEN_ENDS: [&str; 10] = ["", "י", "ך", "ל", "ם", "ן", "ס", "ע", "ף", "ץ"];
const HUNDREDS: [&str; 10] = ["", "ק", "ר", "ש", "ת", "תק", "תר", "תש", "תת", "תתק"];

const MONTHS_LATIN: [&str; 13] = [
    "Nissan", "Iyar", "Sivan", "Tammuz", "Av", "Elul", "Tishrei", "Cheshvan", "Kislev", "Teves",
    "Shevat", "Adar", "Adar II",
];
const MONTHS_HEBREW: [&str; 13] = [
    "ניסן", "אייר", "סיון", "תמוז", "אב", "אלול", "תשרי", "חשון", "כסלו", "טבת", "שבט", "אדר",
    "אדר ב׳",
];

const WEEKDAYS_LATIN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS_HEBREW: [&str; 7] = [
    "יום א׳", "יום ב׳", "יום ג׳", "יום ד׳", "יום ה׳", "יום ו׳", "שבת",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Hebrew,
}

impl Default for Script {
    fn default() -> Self {
        Script::Latin
    }
}

/// Writes `number` in Hebrew letters.
///
/// Numbers from 1000 on drop their thousands unless `long` is set, the way
/// years are usually written (5784 is תשפ״ד). 15 and 16 use ט״ו and ט״ז.
pub fn hebrew_number(number: u32, long: bool) -> String {
    if number == 0 {
        return EFES.to_owned();
    }

    let thousands = (number / 1000) as usize;
    let short = number % 1000;

    if short == 0 && thousands < 10 {
        return format!("{}{} {}", ONES[thousands], GERESH, ALAFIM);
    }

    let single_letter =
        short < 11 || (short < 100 && short % 10 == 0) || (short <= 400 && short % 100 == 0);

    let mut letters = String::new();

    let hundreds = (short / 100) as usize;
    // 500 and up repeat tav
    letters.push_str(HUNDREDS[hundreds]);

    let rest = short % 100;
    match rest {
        15 => letters.push_str("טו"),
        16 => letters.push_str("טז"),
        _ => {
            let tens = (rest / 10) as usize;
            if rest % 10 == 0 && !single_letter {
                letters.push_str(TEN_ENDS[tens]);
            } else {
                letters.push_str(TENS[tens]);
            }
            letters.push_str(ONES[(rest % 10) as usize]);
        }
    }

    if single_letter {
        letters.push(GERESH);
    } else {
        let last = letters.char_indices().last().map_or(0, |(idx, _)| idx);
        letters.insert(last, GERSHAYIM);
    }

    if long && thousands > 0 && thousands < 10 {
        format!("{}{} {}", ONES[thousands], GERESH, letters)
    } else {
        letters
    }
}

/// Turns dates into the labels of the viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    script: Script,
    long_years: bool,
}

impl Formatter {
    pub fn new(script: Script) -> Self {
        Formatter {
            script,
            long_years: false,
        }
    }

    pub fn long_years(mut self, long_years: bool) -> Self {
        self.long_years = long_years;
        self
    }

    pub fn number(&self, number: u32) -> String {
        match self.script {
            Script::Latin => number.to_string(),
            Script::Hebrew => hebrew_number(number, false),
        }
    }

    pub fn year(&self, date: &JewishDate) -> String {
        match self.script {
            Script::Latin => date.year().to_string(),
            Script::Hebrew => hebrew_number(date.year() as u32, self.long_years),
        }
    }

    pub fn day(&self, date: &JewishDate) -> String {
        self.number(date.day() as u32)
    }

    pub fn month(&self, date: &JewishDate) -> String {
        let month = date.hebrew_month();
        match (self.script, month) {
            (Script::Latin, HebrewMonth::Adar) if date.is_leap_year() => "Adar I".to_owned(),
            (Script::Hebrew, HebrewMonth::Adar) if date.is_leap_year() => "אדר א׳".to_owned(),
            (Script::Latin, m) => MONTHS_LATIN[m.number() as usize - 1].to_owned(),
            (Script::Hebrew, m) => MONTHS_HEBREW[m.number() as usize - 1].to_owned(),
        }
    }

    /// Label of header cell `index`, 0 being the first day of the week.
    pub fn weekday(&self, index: usize) -> &'static str {
        match self.script {
            Script::Latin => WEEKDAYS_LATIN[index % 7],
            Script::Hebrew => WEEKDAYS_HEBREW[index % 7],
        }
    }

    pub fn format(&self, date: &JewishDate) -> String {
        format!("{} {} {}", self.day(date), self.month(date), self.year(date))
    }

    /// Text below the grid: the formatted date and, if asked for, the
    /// Gregorian equivalent on a second line.
    pub fn status(&self, date: &JewishDate, show_gregorian: bool) -> String {
        if show_gregorian {
            format!("{}\n{}", self.format(date), date.to_gregorian())
        } else {
            self.format(date)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hebrew_numerals() {
        assert_eq!(hebrew_number(1, false), "א׳");
        assert_eq!(hebrew_number(15, false), "ט״ו");
        assert_eq!(hebrew_number(16, false), "ט״ז");
        assert_eq!(hebrew_number(20, false), "כ׳");
        assert_eq!(hebrew_number(29, false), "כ״ט");
        assert_eq!(hebrew_number(5784, false), "תשפ״ד");
        assert_eq!(hebrew_number(5784, true), "ה׳ תשפ״ד");
        assert_eq!(hebrew_number(5780, false), "תש״ף");
        assert_eq!(hebrew_number(5000, false), "ה׳ אלפים");
        assert_eq!(hebrew_number(0, false), "אפס");
    }

    #[test]
    fn month_names_follow_leap_years() {
        let latin = Formatter::new(Script::Latin);
        let adar_leap = JewishDate::new(5784, 12, 1).unwrap();
        let adar_common = JewishDate::new(5785, 12, 1).unwrap();
        let adar_two = JewishDate::new(5784, 13, 1).unwrap();

        assert_eq!(latin.month(&adar_leap), "Adar I");
        assert_eq!(latin.month(&adar_common), "Adar");
        assert_eq!(latin.month(&adar_two), "Adar II");

        let hebrew = Formatter::new(Script::Hebrew);
        assert_eq!(hebrew.month(&adar_common), "אדר");
        assert_eq!(hebrew.month(&adar_leap), "אדר א׳");
    }

    #[test]
    fn status_text() {
        let date = JewishDate::new(5784, 1, 15).unwrap();

        let latin = Formatter::new(Script::Latin);
        assert_eq!(latin.status(&date, true), "15 Nissan 5784\n2024-04-23");
        assert_eq!(latin.status(&date, false), "15 Nissan 5784");

        let hebrew = Formatter::new(Script::Hebrew);
        assert_eq!(hebrew.format(&date), "ט״ו ניסן תשפ״ד");
    }

    #[test]
    fn weekday_labels() {
        let latin = Formatter::new(Script::Latin);
        assert_eq!(latin.weekday(0), "Sun");
        assert_eq!(latin.weekday(6), "Sat");
        assert_eq!(Formatter::new(Script::Hebrew).weekday(6), "שבת");
    }
}

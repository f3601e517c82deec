use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

use crate::HrError;

/// Body of `POST /api/register`. Every field is optional on the wire so a
/// missing one becomes a validation error instead of a JSON rejection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub ad: Option<String>,
    #[serde(default)]
    pub soyad: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_staff_code")]
    pub employee_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Code {
    Text(String),
    Number(i64),
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        match code {
            Code::Text(text) => text.trim().to_string(),
            Code::Number(number) => number.to_string(),
        }
    }
}

/// Staff codes arrive as strings or bare numbers.
pub fn staff_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Code::deserialize(deserializer).map(String::from)
}

pub fn optional_staff_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Code>::deserialize(deserializer).map(|code| code.map(String::from))
}

/// Trimmed, checked registration fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidRegistration {
    pub ad: String,
    pub soyad: String,
    pub email: String,
    pub employee_id: String,
}

fn required(value: &Option<String>) -> Result<String, HrError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(HrError::MissingFields)
}

pub fn validate_registration(input: &Registration) -> Result<ValidRegistration, HrError> {
    let ad = required(&input.ad)?;
    let soyad = required(&input.soyad)?;
    let email = required(&input.email)?.to_lowercase();
    let employee_id = required(&input.employee_id)?;
    if employee_id.len() != 4 || !employee_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HrError::InvalidStaffCode);
    }
    Ok(ValidRegistration {
        ad,
        soyad,
        email,
        employee_id,
    })
}

/// `"Shift  Lead"` becomes `"shift_lead"`.
pub fn role_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn parse_date(value: &str) -> Result<NaiveDate, HrError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| HrError::InvalidDate(value.to_string()))
}

/// Accepts `HH:MM` and returns it zero padded.
pub fn parse_clock(value: &str) -> Result<String, HrError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| HrError::InvalidTime(value.to_string()))
}

/// Validates `YYYY-MM` and returns it normalised.
pub fn parse_month(value: &str) -> Result<String, HrError> {
    let value = value.trim();
    let valid = value.len() == 7
        && NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();
    if valid {
        Ok(value.to_string())
    } else {
        Err(HrError::InvalidMonth(value.to_string()))
    }
}

/// Whole days from `start` to `end`, both included.
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> Result<i32, HrError> {
    if end < start {
        return Err(HrError::EndBeforeStart);
    }
    let days = (end - start).num_days() + 1;
    i32::try_from(days).map_err(|_| HrError::InvalidDate(end.to_string()))
}

/// Hours between check-in and check-out, rounded to two decimals.
pub fn worked_hours(
    check_in: DateTime<FixedOffset>,
    check_out: DateTime<FixedOffset>,
) -> Result<f64, HrError> {
    let seconds = (check_out - check_in).num_seconds();
    if seconds < 0 {
        return Err(HrError::CheckOutBeforeCheckIn);
    }
    Ok(round2(seconds as f64 / 3600.0))
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn registration(ad: &str, soyad: &str, email: &str, code: &str) -> Registration {
        Registration {
            ad: Some(ad.into()),
            soyad: Some(soyad.into()),
            email: Some(email.into()),
            employee_id: Some(code.into()),
        }
    }

    #[test]
    fn registration_requires_every_field() {
        let mut input = registration("Ayşe", "Yılmaz", "ayse@company.com", "1234");
        input.soyad = Some("   ".into());
        assert_eq!(validate_registration(&input), Err(HrError::MissingFields));
        input.soyad = None;
        assert_eq!(validate_registration(&input), Err(HrError::MissingFields));
    }

    #[test]
    fn staff_code_must_be_four_digits() {
        for code in ["123", "12345", "12a4", "١٢٣٤"] {
            let input = registration("Ayşe", "Yılmaz", "ayse@company.com", code);
            assert_eq!(
                validate_registration(&input),
                Err(HrError::InvalidStaffCode),
                "{code}"
            );
        }
        let ok = validate_registration(&registration(" Ayşe ", "Yılmaz", "Ayse@Company.com", "0042"))
            .unwrap();
        assert_eq!(ok.ad, "Ayşe");
        assert_eq!(ok.email, "ayse@company.com");
        assert_eq!(ok.employee_id, "0042");
    }

    #[test]
    fn numeric_staff_code_reaches_validation() {
        let input: Registration = serde_json::from_value(serde_json::json!({
            "ad": "Ayşe", "soyad": "Yılmaz", "email": "a@b.com", "employee_id": 301
        }))
        .unwrap();
        assert_eq!(input.employee_id.as_deref(), Some("301"));
        assert_eq!(validate_registration(&input), Err(HrError::InvalidStaffCode));

        let input: Registration =
            serde_json::from_value(serde_json::json!({"employee_id": null})).unwrap();
        assert_eq!(input.employee_id, None);
    }

    #[test]
    fn error_text_matches_ui_messages() {
        assert_eq!(HrError::MissingFields.to_string(), "Tüm alanları doldurunuz!");
        assert_eq!(
            HrError::InvalidStaffCode.to_string(),
            "Personel ID tam 4 haneli olmalıdır!"
        );
    }

    #[test]
    fn slugs_collapse_whitespace() {
        assert_eq!(role_slug("Shift  Lead"), "shift_lead");
        assert_eq!(role_slug(" Kasa Sorumlusu "), "kasa_sorumlusu");
        assert_eq!(role_slug("Admin"), "admin");
    }

    #[test]
    fn leave_days_are_inclusive() {
        let start = parse_date("2025-11-10").unwrap();
        assert_eq!(leave_days(start, parse_date("2025-11-12").unwrap()), Ok(3));
        assert_eq!(leave_days(start, start), Ok(1));
        assert_eq!(
            leave_days(start, parse_date("2025-11-09").unwrap()),
            Err(HrError::EndBeforeStart)
        );
        let feb = parse_date("2024-02-28").unwrap();
        assert_eq!(leave_days(feb, parse_date("2024-03-01").unwrap()), Ok(3));
    }

    #[test]
    fn months_and_dates_are_checked() {
        assert_eq!(parse_month("2025-10").unwrap(), "2025-10");
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-1").is_err());
        assert!(parse_month("October").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn clock_times_are_normalised() {
        assert_eq!(parse_clock("8:05").unwrap(), "08:05");
        assert_eq!(parse_clock("20:00").unwrap(), "20:00");
        assert!(parse_clock("24:30").is_err());
        assert!(parse_clock("noon").is_err());
    }

    #[test]
    fn worked_hours_round_to_cents() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let check_in = tz.with_ymd_and_hms(2025, 10, 27, 8, 30, 0).unwrap();
        let check_out = tz.with_ymd_and_hms(2025, 10, 27, 17, 10, 0).unwrap();
        assert_eq!(worked_hours(check_in, check_out), Ok(8.67));
        assert_eq!(
            worked_hours(check_out, check_in),
            Err(HrError::CheckOutBeforeCheckIn)
        );
    }
}

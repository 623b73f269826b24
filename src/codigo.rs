use chrono::NaiveDate;

/// Fixed format marker between the issuing unit and the date.
const FORMAT_MARKER: &str = "00";

/// Compose a document code: `{AREA}{DEPARTAMENTO}{DIVISION}00{yyyymmdd}{number:04}`.
///
/// Unit codes are trimmed and upper-cased. Keeping the per-unit counter is up
/// to the caller; see [`next_number`].
pub fn compose(area: &str, departamento: &str, division: &str, date: NaiveDate, number: u32) -> String {
    format!(
        "{}{}{}{FORMAT_MARKER}{}{number:04}",
        normalize_unit(area),
        normalize_unit(departamento),
        normalize_unit(division),
        date.format("%Y%m%d"),
    )
}

/// Sequence number following the last one issued by a unit.
pub fn next_number(last: Option<u32>) -> u32 {
    last.unwrap_or(0).saturating_add(1)
}

fn normalize_unit(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{compose, next_number};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn composes_code() {
        assert_eq!(compose("dg", " ot ", "div", date(), 7), "DGOTDIV00202405010007");
    }

    #[test]
    fn wide_numbers_are_not_truncated() {
        assert_eq!(compose("A", "B", "C", date(), 12345), "ABC002024050112345");
    }

    #[test]
    fn numbering_starts_at_one() {
        assert_eq!(next_number(None), 1);
        assert_eq!(next_number(Some(41)), 42);
    }

    #[test]
    fn numbering_stops_at_the_largest_counter() {
        assert_eq!(next_number(Some(u32::MAX)), u32::MAX);
    }
}

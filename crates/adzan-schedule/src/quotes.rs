use chrono::{Datelike, NaiveDate};

/// Devotional quotes rotated on the home screen.
pub const DAILY_QUOTES: [&str; 4] = [
    "Sesungguhnya salat mencegah dari perbuatan keji dan mungkar. (QS. Al-‘Ankabut: 45)",
    "Sesungguhnya salat itu fardhu bagi orang beriman pada waktunya. (QS. An-Nisa: 103)",
    "Mintalah pertolongan dengan sabar dan salat. (QS. Al-Baqarah: 45)",
    "Perjanjian antara kami dengan orang kafir adalah salat; siapa meninggalkan salat maka ia kafir. (HR. Ahmad, Abu Daud)",
];

/// Quote appended to every prayer-time alert.
pub const ALERT_QUOTE: &str = "“Perjanjian antara kami dengan orang kafir adalah sholat. Barangsiapa yang meninggalkan sholat maka ia telah kafir.”\nHR. Ahmad, Abu Daud";

/// Quote of the day, keyed on day-of-year (1 January = day 1).
pub fn daily_quote(date: NaiveDate) -> &'static str {
    DAILY_QUOTES[date.ordinal() as usize % DAILY_QUOTES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_quote_rotates() {
        let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(daily_quote(jan1), DAILY_QUOTES[1]);
        assert_eq!(daily_quote(jan1.succ_opt().unwrap()), DAILY_QUOTES[2]);
        let jan4 = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(daily_quote(jan4), DAILY_QUOTES[0]);
    }
}

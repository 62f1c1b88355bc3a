//! Text helpers for recommendation strings (pt-PT)

use chrono::{Datelike, Months, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Whole-euro amount, e.g. `€1250`. Halves round away from zero.
pub fn euros(value: f64) -> String {
    format!("€{}", whole(value))
}

/// Rounded amount without the currency sign
pub fn whole(value: f64) -> String {
    let rounded = value.round();
    // Avoid printing "-0"
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

/// Interest rate as entered, e.g. `8`, `7.5`
pub fn rate(value: f64) -> String {
    format!("{}", value)
}

/// Full month name, e.g. `março`
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Month and year, e.g. `março de 2027`
pub fn month_year(date: NaiveDate) -> String {
    format!("{} de {}", month_name(date), date.year())
}

/// `date` moved forward by whole months, clamped to the end of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// `month_year` of `today + months`, or a plain month count when out of range
pub fn target_month_year(today: NaiveDate, months: u32) -> String {
    match add_months(today, months) {
        Some(date) => month_year(date),
        None => format!("{} meses", months),
    }
}

/// Singular/plural month noun
pub fn months_word(months: u32) -> &'static str {
    if months == 1 {
        "mês"
    } else {
        "meses"
    }
}

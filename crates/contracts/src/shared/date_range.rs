use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive range of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "fecha_inicio")]
    pub start: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err("La fecha de inicio no puede ser posterior a la fecha fin".into());
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `2024-05-01_2024-05-31`, used in export file names.
    pub fn file_suffix(&self) -> String {
        format!("{}_{}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DatePreset {
    #[default]
    #[serde(rename = "hoy")]
    Today,
    #[serde(rename = "semana")]
    Week,
    #[serde(rename = "mes")]
    Month,
    #[serde(rename = "personalizado")]
    Custom,
}

impl DatePreset {
    pub fn all() -> Vec<Self> {
        vec![
            DatePreset::Today,
            DatePreset::Week,
            DatePreset::Month,
            DatePreset::Custom,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            DatePreset::Today => "hoy",
            DatePreset::Week => "semana",
            DatePreset::Month => "mes",
            DatePreset::Custom => "personalizado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Hoy",
            DatePreset::Week => "Esta semana",
            DatePreset::Month => "Este mes",
            DatePreset::Custom => "Personalizado",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.code() == code)
    }

    /// Week starts on Monday; week and month presets end today.
    pub fn resolve(
        &self,
        today: NaiveDate,
        custom: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<DateRange, String> {
        match self {
            DatePreset::Today => DateRange::new(today, today),
            DatePreset::Week => {
                let offset = today.weekday().num_days_from_monday() as i64;
                DateRange::new(today - Duration::days(offset), today)
            }
            DatePreset::Month => {
                let first = today.with_day(1).unwrap_or(today);
                DateRange::new(first, today)
            }
            DatePreset::Custom => {
                let (start, end) =
                    custom.ok_or_else(|| "Selecciona las fechas del periodo".to_string())?;
                DateRange::new(start, end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_presets() {
        // 2024-05-16 is a Thursday
        let today = d(2024, 5, 16);
        assert_eq!(
            DatePreset::Today.resolve(today, None).unwrap(),
            DateRange { start: today, end: today }
        );
        assert_eq!(DatePreset::Week.resolve(today, None).unwrap().start, d(2024, 5, 13));
        assert_eq!(DatePreset::Month.resolve(today, None).unwrap().start, d(2024, 5, 1));
    }

    #[test]
    fn test_week_on_monday_is_single_day() {
        let monday = d(2024, 5, 13);
        let range = DatePreset::Week.resolve(monday, None).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_custom_range_validation() {
        let today = d(2024, 5, 16);
        assert!(DatePreset::Custom.resolve(today, None).is_err());
        assert!(DatePreset::Custom
            .resolve(today, Some((d(2024, 5, 10), d(2024, 5, 1))))
            .is_err());
        let range = DatePreset::Custom
            .resolve(today, Some((d(2024, 4, 1), d(2024, 4, 30))))
            .unwrap();
        assert!(range.contains(d(2024, 4, 30)));
        assert!(!range.contains(d(2024, 5, 1)));
        assert_eq!(range.file_suffix(), "2024-04-01_2024-04-30");
    }

    #[test]
    fn test_codes() {
        assert_eq!(DatePreset::from_code("semana"), Some(DatePreset::Week));
        assert_eq!(DatePreset::from_code("anual"), None);
    }
}

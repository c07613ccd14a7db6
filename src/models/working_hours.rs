//! Modelo de WorkingHours
//!
//! Registro único con el horario semanal del concesionario y excepciones
//! por fecha.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Horario de un día de la semana (0 = domingo .. 6 = sábado)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub day_of_week: u8,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub holiday_name: Option<String>,
}

/// Excepción para una fecha concreta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub default_open: String,
    pub default_close: String,
    pub days: Vec<DayHours>,
    #[serde(default)]
    pub overrides: Vec<DateOverride>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Origen del horario efectivo de una fecha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursSource {
    Override,
    Weekly,
}

/// Horario efectivo en una fecha
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveHours {
    pub date: NaiveDate,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub source: HoursSource,
    pub note: Option<String>,
}

impl Default for WorkingHours {
    /// Lunes a sábado 09:00–18:00, domingo cerrado
    fn default() -> Self {
        let days = (0..7u8)
            .map(|day| DayHours {
                day_of_week: day,
                is_open: day != 0,
                open_time: None,
                close_time: None,
                is_holiday: false,
                holiday_name: None,
            })
            .collect();

        Self {
            default_open: "09:00".to_string(),
            default_close: "18:00".to_string(),
            days,
            overrides: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl WorkingHours {
    /// Horario efectivo: un override de la fecha exacta gana sobre el semanal
    pub fn hours_for_date(&self, date: NaiveDate) -> EffectiveHours {
        if let Some(entry) = self.overrides.iter().find(|o| o.date == date) {
            return EffectiveHours {
                date,
                is_open: entry.is_open,
                open_time: entry
                    .is_open
                    .then(|| entry.open_time.clone().unwrap_or_else(|| self.default_open.clone())),
                close_time: entry
                    .is_open
                    .then(|| entry.close_time.clone().unwrap_or_else(|| self.default_close.clone())),
                source: HoursSource::Override,
                note: entry.reason.clone(),
            };
        }

        let weekday = date.weekday().num_days_from_sunday() as u8;
        let day = self.days.iter().find(|d| d.day_of_week == weekday);

        let is_open = day.map(|d| d.is_open && !d.is_holiday).unwrap_or(false);
        EffectiveHours {
            date,
            is_open,
            open_time: is_open.then(|| {
                day.and_then(|d| d.open_time.clone())
                    .unwrap_or_else(|| self.default_open.clone())
            }),
            close_time: is_open.then(|| {
                day.and_then(|d| d.close_time.clone())
                    .unwrap_or_else(|| self.default_close.clone())
            }),
            source: HoursSource::Weekly,
            note: day.filter(|d| d.is_holiday).and_then(|d| d.holiday_name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekly_hours() {
        let hours = WorkingHours::default();

        // 2026-10-12 es lunes
        let monday = hours.hours_for_date(date("2026-10-12"));
        assert!(monday.is_open);
        assert_eq!(monday.open_time.as_deref(), Some("09:00"));
        assert_eq!(monday.source, HoursSource::Weekly);

        // 2026-10-11 es domingo
        let sunday = hours.hours_for_date(date("2026-10-11"));
        assert!(!sunday.is_open);
        assert_eq!(sunday.open_time, None);
    }

    #[test]
    fn test_override_wins() {
        let mut hours = WorkingHours::default();
        hours.overrides.push(DateOverride {
            date: date("2026-12-24"),
            is_open: true,
            open_time: None,
            close_time: Some("14:00".to_string()),
            reason: Some("Nochebuena".to_string()),
        });

        let effective = hours.hours_for_date(date("2026-12-24"));
        assert_eq!(effective.source, HoursSource::Override);
        assert_eq!(effective.open_time.as_deref(), Some("09:00"));
        assert_eq!(effective.close_time.as_deref(), Some("14:00"));
        assert_eq!(effective.note.as_deref(), Some("Nochebuena"));
    }

    #[test]
    fn test_holiday_day_is_closed() {
        let mut hours = WorkingHours::default();
        let monday = hours.days.iter_mut().find(|d| d.day_of_week == 1).unwrap();
        monday.is_holiday = true;
        monday.holiday_name = Some("Feriado".to_string());

        let effective = hours.hours_for_date(date("2026-10-12"));
        assert!(!effective.is_open);
        assert_eq!(effective.note.as_deref(), Some("Feriado"));
    }
}

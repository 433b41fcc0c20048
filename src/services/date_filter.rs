use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::watch;

/// Inclusive month window used to scope every dashboard query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOption {
    pub id: String,
    pub label: String,
    pub period: DatePeriod,
}

/// Holds the globally selected reporting period and the fixed menu of
/// selectable periods (current month plus five months back, computed once
/// at construction). Injected wherever the active period matters; selection
/// changes fan out through a watch channel.
pub struct DateRangeProvider {
    options: Vec<PeriodOption>,
    selected: watch::Sender<String>,
}

const CURRENT_PERIOD_ID: &str = "current";
const MONTHS_BACK: u32 = 5;

impl DateRangeProvider {
    pub fn new() -> Self {
        Self::anchored_at(Utc::now().date_naive())
    }

    /// Builds the option menu relative to an explicit "today". The menu is
    /// immutable for the provider's lifetime.
    pub fn anchored_at(today: NaiveDate) -> Self {
        let options = (0..=MONTHS_BACK)
            .map(|back| {
                let id = if back == 0 {
                    CURRENT_PERIOD_ID.to_string()
                } else {
                    format!("prev{back}")
                };
                let label = match back {
                    0 => "Current Month".to_string(),
                    1 => "1 Month Ago".to_string(),
                    n => format!("{n} Months Ago"),
                };
                PeriodOption {
                    id,
                    label,
                    period: month_window(today, back),
                }
            })
            .collect();
        let (selected, _) = watch::channel(CURRENT_PERIOD_ID.to_string());
        Self { options, selected }
    }

    pub fn options(&self) -> &[PeriodOption] {
        &self.options
    }

    /// Switches the active period. Unknown ids are ignored.
    pub fn select(&self, id: &str) {
        if self.options.iter().any(|option| option.id == id) {
            self.selected.send_replace(id.to_string());
        } else {
            tracing::warn!(id, "ignoring unknown period id");
        }
    }

    pub fn selected_id(&self) -> String {
        self.selected.borrow().clone()
    }

    pub fn active_option(&self) -> &PeriodOption {
        let id = self.selected.borrow().clone();
        self.options
            .iter()
            .find(|option| option.id == id)
            .unwrap_or(&self.options[0])
    }

    pub fn active_period(&self) -> DatePeriod {
        self.active_option().period
    }

    /// Receiver that observes every selection change.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.selected.subscribe()
    }
}

impl Default for DateRangeProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn month_window(today: NaiveDate, months_back: u32) -> DatePeriod {
    let first_of_month = today.with_day(1).unwrap_or(today);
    let start = first_of_month
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(first_of_month);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start);
    DatePeriod { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DateRangeProvider {
        DateRangeProvider::anchored_at(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    #[test]
    fn test_defaults_to_current_month() {
        let provider = provider();
        let period = provider.active_period();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(provider.selected_id(), "current");
    }

    #[test]
    fn test_six_fixed_options() {
        let provider = provider();
        let options = provider.options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0].label, "Current Month");
        assert_eq!(options[1].label, "1 Month Ago");
        assert_eq!(options[5].label, "5 Months Ago");
        assert_eq!(options[5].id, "prev5");
        // Crosses the year boundary: March 2024 minus 5 months.
        assert_eq!(
            options[5].period.start,
            NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()
        );
        assert_eq!(
            options[5].period.end,
            NaiveDate::from_ymd_opt(2023, 10, 31).unwrap()
        );
    }

    #[test]
    fn test_select_previous_month() {
        let provider = provider();
        provider.select("prev2");
        let period = provider.active_period();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_unknown_id_is_a_noop() {
        let provider = provider();
        provider.select("prev2");
        provider.select("next-quarter");
        assert_eq!(provider.selected_id(), "prev2");
    }

    #[tokio::test]
    async fn test_subscribers_see_selection_changes() {
        let provider = provider();
        let mut rx = provider.subscribe();
        provider.select("prev1");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "prev1");
    }

    #[test]
    fn test_february_window() {
        let provider =
            DateRangeProvider::anchored_at(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let period = provider.active_period();
        // 2024 is a leap year.
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}

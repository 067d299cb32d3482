//! Calendar Seasonality
//!
//! Groups daily returns by weekday, day-of-month and month-of-year and
//! reports the arithmetic mean return per group. The mappings are sparse:
//! a calendar slot with no observations is absent, which downstream must
//! keep distinct from a slot present with mean 0.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::series::ReturnSeries;

/// Mean daily return per calendar grouping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seasonality {
    /// Keyed by weekday, Monday = 0 .. Sunday = 6
    pub by_weekday: BTreeMap<u32, f64>,
    /// Keyed by day of month, 1-31
    pub by_day_of_month: BTreeMap<u32, f64>,
    /// Keyed by month of year, 1-12
    pub by_month: BTreeMap<u32, f64>,
}

impl Seasonality {
    /// Aggregate mean returns across the three calendar keys
    pub fn from_returns(returns: &ReturnSeries) -> Self {
        let mut weekday_acc: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        let mut day_acc: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        let mut month_acc: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

        for point in returns.points() {
            let weekday = point.date.weekday().num_days_from_monday();
            accumulate(&mut weekday_acc, weekday, point.ret);
            accumulate(&mut day_acc, point.date.day(), point.ret);
            accumulate(&mut month_acc, point.date.month(), point.ret);
        }

        Self {
            by_weekday: means(weekday_acc),
            by_day_of_month: means(day_acc),
            by_month: means(month_acc),
        }
    }
}

fn accumulate(acc: &mut BTreeMap<u32, (f64, usize)>, key: u32, ret: f64) {
    let entry = acc.entry(key).or_insert((0.0, 0));
    entry.0 += ret;
    entry.1 += 1;
}

fn means(acc: BTreeMap<u32, (f64, usize)>) -> BTreeMap<u32, f64> {
    acc.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}

/// English weekday label for a Monday = 0 key, used by the report renderer
pub fn weekday_name(key: u32) -> &'static str {
    match key {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::ReturnPoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn point(y: i32, m: u32, d: u32, ret: f64) -> ReturnPoint {
        ReturnPoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            ret,
        }
    }

    #[test]
    fn test_weekday_grouping() {
        // 2024-07-01 is a Monday, 2024-07-08 too
        let series = ReturnSeries::from_points(vec![
            point(2024, 7, 1, 0.01),
            point(2024, 7, 2, -0.02),
            point(2024, 7, 8, 0.03),
        ]);
        let seasonality = Seasonality::from_returns(&series);

        assert_relative_eq!(seasonality.by_weekday[&0], 0.02, epsilon = 1e-12);
        assert_relative_eq!(seasonality.by_weekday[&1], -0.02, epsilon = 1e-12);
        // No Wednesday observations: key absent, not zero
        assert!(!seasonality.by_weekday.contains_key(&2));
    }

    #[test]
    fn test_day_of_month_grouping() {
        let series = ReturnSeries::from_points(vec![
            point(2024, 1, 15, 0.01),
            point(2024, 2, 15, 0.03),
            point(2024, 2, 16, -0.01),
        ]);
        let seasonality = Seasonality::from_returns(&series);

        assert_relative_eq!(seasonality.by_day_of_month[&15], 0.02, epsilon = 1e-12);
        assert_relative_eq!(seasonality.by_day_of_month[&16], -0.01, epsilon = 1e-12);
        assert_eq!(seasonality.by_day_of_month.len(), 2);
    }

    #[test]
    fn test_month_grouping_sparse() {
        let series = ReturnSeries::from_points(vec![
            point(2024, 3, 4, 0.01),
            point(2024, 3, 5, 0.03),
            point(2024, 11, 6, -0.04),
        ]);
        let seasonality = Seasonality::from_returns(&series);

        assert_relative_eq!(seasonality.by_month[&3], 0.02, epsilon = 1e-12);
        assert_relative_eq!(seasonality.by_month[&11], -0.04, epsilon = 1e-12);
        assert!(!seasonality.by_month.contains_key(&7));
    }

    #[test]
    fn test_empty_series_yields_empty_mappings() {
        let series = ReturnSeries::from_points(Vec::new());
        let seasonality = Seasonality::from_returns(&series);
        assert!(seasonality.by_weekday.is_empty());
        assert!(seasonality.by_day_of_month.is_empty());
        assert!(seasonality.by_month.is_empty());
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(0), "Monday");
        assert_eq!(weekday_name(4), "Friday");
        assert_eq!(weekday_name(6), "Sunday");
    }
}

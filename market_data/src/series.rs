//! Validated, chronologically ordered price history for one symbol

use crate::{DailyOhlcv, MarketDataError, Result};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// An immutable daily price history keyed by an asset symbol.
///
/// Construction checks every bar and the strict date ordering, so code that
/// holds a `PriceSeries` can rely on `low <= open, close <= high`, positive
/// prices and ascending dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    records: Vec<DailyOhlcv>,
}

impl PriceSeries {
    /// Build a series from OHLCV records.
    ///
    /// An empty record list is allowed; the engines decide whether an empty
    /// history is an error for what they are doing.
    pub fn new(symbol: impl Into<String>, records: Vec<DailyOhlcv>) -> Result<Self> {
        for record in &records {
            record
                .data
                .validate()
                .map_err(|reason| MarketDataError::InvalidRecord {
                    date: record.date,
                    reason,
                })?;
        }

        for pair in records.windows(2) {
            if pair[0].date >= pair[1].date {
                return Err(MarketDataError::OutOfOrder {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            records,
        })
    }

    /// Build a series from close prices alone, one bar per consecutive day
    /// starting at `start`.
    pub fn from_closes(symbol: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Result<Self> {
        let mut records = Vec::with_capacity(closes.len());
        for (i, &close) in closes.iter().enumerate() {
            let date = start
                .checked_add_days(Days::new(i as u64))
                .ok_or_else(|| MarketDataError::InvalidRecord {
                    date: start,
                    reason: format!("date overflow at offset {}", i),
                })?;
            records.push(DailyOhlcv::flat(date, close));
        }

        Self::new(symbol, records)
    }

    /// A new snapshot with `more` appended after the existing records
    pub fn extended(&self, more: Vec<DailyOhlcv>) -> Result<Self> {
        let mut records = self.records.clone();
        records.extend(more);
        Self::new(self.symbol.clone(), records)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[DailyOhlcv] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Close prices in chronological order
    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.data.close).collect()
    }

    /// Most recent close, if any
    pub fn latest_close(&self) -> Option<f64> {
        self.records.last().map(|r| r.data.close)
    }

    /// Most recent close, failing on an empty series
    pub fn current_price(&self) -> Result<f64> {
        self.latest_close()
            .ok_or_else(|| MarketDataError::EmptySeries(self.symbol.clone()))
    }

    /// Most recent date, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// A numeric column by name (`open`, `high`, `low`, `close`, `volume`).
    ///
    /// `price` is accepted as an alias for `close`. Unknown names yield `None`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let pick: fn(&DailyOhlcv) -> f64 = match name.to_ascii_lowercase().as_str() {
            "open" => |r| r.data.open,
            "high" => |r| r.data.high,
            "low" => |r| r.data.low,
            "close" | "price" => |r| r.data.close,
            "volume" => |r| r.data.volume as f64,
            _ => return None,
        };

        Some(self.records.iter().map(pick).collect())
    }

    /// Whether `name` resolves to a column of this series
    pub fn has_column(&self, name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "open" | "high" | "low" | "close" | "price" | "volume"
        )
    }

    /// The trailing `n` records as a new series (all of them if shorter)
    pub fn tail(&self, n: usize) -> Self {
        let start = self.records.len().saturating_sub(n);
        Self {
            symbol: self.symbol.clone(),
            records: self.records[start..].to_vec(),
        }
    }

    /// Split into the first `at` records and the rest
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.records.len());
        let (head, rest) = self.records.split_at(at);
        (
            Self {
                symbol: self.symbol.clone(),
                records: head.to_vec(),
            },
            Self {
                symbol: self.symbol.clone(),
                records: rest.to_vec(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OhlcvData;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_from_closes() {
        let series = PriceSeries::from_closes("GOLD", date(1), &[100.0, 101.0, 99.5]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 99.5]);
        assert_eq!(series.latest_close(), Some(99.5));
        assert_eq!(series.last_date(), Some(date(3)));
        assert_eq!(series.current_price(), Ok(99.5));
    }

    #[test]
    fn test_empty_series_has_no_current_price() {
        let empty = PriceSeries::new("ETF", Vec::new()).unwrap();
        assert_eq!(
            empty.current_price(),
            Err(MarketDataError::EmptySeries("ETF".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_positive_close() {
        let result = PriceSeries::from_closes("GOLD", date(1), &[100.0, 0.0]);
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_order_dates() {
        let records = vec![DailyOhlcv::flat(date(2), 10.0), DailyOhlcv::flat(date(2), 11.0)];
        assert!(matches!(
            PriceSeries::new("SLV", records),
            Err(MarketDataError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_columns() {
        let records = vec![DailyOhlcv {
            date: date(1),
            data: OhlcvData {
                open: 10.0,
                high: 12.0,
                low: 9.0,
                close: 11.0,
                volume: 500,
            },
        }];
        let series = PriceSeries::new("GLD", records).unwrap();

        assert_eq!(series.column("HIGH"), Some(vec![12.0]));
        assert_eq!(series.column("price"), Some(vec![11.0]));
        assert_eq!(series.column("volume"), Some(vec![500.0]));
        assert_eq!(series.column("adj_close"), None);
        assert!(!series.has_column("adj_close"));
    }

    #[test]
    fn test_extended_and_split() {
        let series = PriceSeries::from_closes("GOLD", date(1), &[1.0, 2.0, 3.0]).unwrap();
        let longer = series
            .extended(vec![DailyOhlcv::flat(date(4), 4.0)])
            .unwrap();
        assert_eq!(longer.len(), 4);
        assert_eq!(series.len(), 3);

        let (train, test) = longer.split_at(3);
        assert_eq!(train.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(test.closes(), vec![4.0]);
        assert_eq!(longer.tail(2).closes(), vec![3.0, 4.0]);

        // Extending with a stale date is rejected
        assert!(series.extended(vec![DailyOhlcv::flat(date(2), 4.0)]).is_err());
    }
}

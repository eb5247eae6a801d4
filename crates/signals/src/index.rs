//! Typed store of aggregated sentiment records.

use chrono::NaiveDate;
use smart_money_core::{SentimentKey, SentimentRecord};
use std::collections::BTreeMap;

/// Sentiment records keyed by (security, date).
///
/// The composite key orders by security first, so a security's history is a
/// contiguous range and per-security scans never touch other securities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentIndex {
    records: BTreeMap<SentimentKey, SentimentRecord>,
}

impl SentimentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced.
    pub fn insert(&mut self, record: SentimentRecord) -> Option<SentimentRecord> {
        self.records.insert(record.key(), record)
    }

    #[must_use]
    pub fn get(&self, security_id: &str, date: NaiveDate) -> Option<&SentimentRecord> {
        self.records.get(&SentimentKey::new(security_id, date))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in (security, date) order.
    pub fn iter(&self) -> impl Iterator<Item = &SentimentRecord> {
        self.records.values()
    }

    /// Full history of one security, oldest first.
    pub fn history<'a>(
        &'a self,
        security_id: &str,
    ) -> impl DoubleEndedIterator<Item = &'a SentimentRecord> + 'a {
        let lo = SentimentKey::new(security_id, NaiveDate::MIN);
        let hi = SentimentKey::new(security_id, NaiveDate::MAX);
        self.records.range(lo..=hi).map(|(_, r)| r)
    }

    /// The `n` most recent records dated on or before `reference_date`,
    /// oldest first.
    #[must_use]
    pub fn window(
        &self,
        security_id: &str,
        reference_date: NaiveDate,
        n: usize,
    ) -> Vec<&SentimentRecord> {
        let lo = SentimentKey::new(security_id, NaiveDate::MIN);
        let hi = SentimentKey::new(security_id, reference_date);
        Self::tail(self.records.range(lo..=hi).map(|(_, r)| r), n)
    }

    /// The `n` most recent records dated strictly before `date`, oldest first.
    #[must_use]
    pub fn preceding(
        &self,
        security_id: &str,
        date: NaiveDate,
        n: usize,
    ) -> Vec<&SentimentRecord> {
        let lo = SentimentKey::new(security_id, NaiveDate::MIN);
        let hi = SentimentKey::new(security_id, date);
        Self::tail(self.records.range(lo..hi).map(|(_, r)| r), n)
    }

    /// Distinct securities, sorted.
    #[must_use]
    pub fn securities(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for key in self.records.keys() {
            if out.last() != Some(&key.security_id.as_str()) {
                out.push(&key.security_id);
            }
        }
        out
    }

    /// Every record dated `date`, in security order.
    #[must_use]
    pub fn records_on(&self, date: NaiveDate) -> Vec<&SentimentRecord> {
        self.records.values().filter(|r| r.date == date).collect()
    }

    fn tail<'a>(
        iter: impl DoubleEndedIterator<Item = &'a SentimentRecord>,
        n: usize,
    ) -> Vec<&'a SentimentRecord> {
        let mut out: Vec<_> = iter.rev().take(n).collect();
        out.reverse();
        out
    }
}

impl FromIterator<SentimentRecord> for SentimentIndex {
    fn from_iter<I: IntoIterator<Item = SentimentRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

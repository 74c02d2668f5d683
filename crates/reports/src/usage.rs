use std::collections::BTreeMap;

use chrono::NaiveDate;

use wardstock_inventory::{ItemKind, UsageHistoryRecord};

/// Per-item usage rollup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUsageSummary {
    pub item_name: String,
    pub kind: ItemKind,
    pub total_quantity: u64,
    pub times_used: u64,
}

/// Roll usage history up per item, most-used first (ties by name).
pub fn summarize_usage(records: &[UsageHistoryRecord]) -> Vec<ItemUsageSummary> {
    let mut by_item: BTreeMap<(ItemKind, String), ItemUsageSummary> = BTreeMap::new();

    for record in records {
        by_item
            .entry((record.kind, record.item_name.clone()))
            .and_modify(|summary| {
                summary.total_quantity += record.quantity;
                summary.times_used += 1;
            })
            .or_insert_with(|| ItemUsageSummary {
                item_name: record.item_name.clone(),
                kind: record.kind,
                total_quantity: record.quantity,
                times_used: 1,
            });
    }

    let mut summaries: Vec<ItemUsageSummary> = by_item.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    summaries
}

/// Quantity used per calendar day (UTC).
pub fn daily_usage(records: &[UsageHistoryRecord]) -> BTreeMap<NaiveDate, u64> {
    let mut per_day = BTreeMap::new();
    for record in records {
        *per_day.entry(record.recorded_at.date_naive()).or_default() += record.quantity;
    }
    per_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wardstock_core::PatientId;

    fn at(day: &str) -> DateTime<Utc> {
        format!("{day}T10:00:00Z").parse().unwrap()
    }

    fn record(name: &str, kind: ItemKind, quantity: u64, day: &str) -> UsageHistoryRecord {
        UsageHistoryRecord {
            patient_id: PatientId::new("p-1"),
            item_name: name.to_string(),
            quantity,
            kind,
            recorded_at: at(day),
        }
    }

    #[test]
    fn summaries_sum_per_item_and_sort_most_used_first() {
        let records = vec![
            record("Gauze", ItemKind::Supplies, 2, "2026-08-01"),
            record("Paracetamol", ItemKind::Medicines, 10, "2026-08-01"),
            record("Gauze", ItemKind::Supplies, 3, "2026-08-02"),
        ];

        let summaries = summarize_usage(&records);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].item_name, "Paracetamol");
        assert_eq!(summaries[0].total_quantity, 10);
        assert_eq!(summaries[1].total_quantity, 5);
        assert_eq!(summaries[1].times_used, 2);
    }

    #[test]
    fn daily_usage_buckets_by_utc_date() {
        let records = vec![
            record("Gauze", ItemKind::Supplies, 2, "2026-08-01"),
            record("Gauze", ItemKind::Supplies, 3, "2026-08-01"),
            record("Gauze", ItemKind::Supplies, 1, "2026-08-02"),
        ];

        let per_day = daily_usage(&records);
        assert_eq!(per_day.len(), 2);
        assert_eq!(per_day[&"2026-08-01".parse::<NaiveDate>().unwrap()], 5);
        assert_eq!(per_day[&"2026-08-02".parse::<NaiveDate>().unwrap()], 1);
    }

    #[test]
    fn empty_history_produces_empty_reports() {
        assert!(summarize_usage(&[]).is_empty());
        assert!(daily_usage(&[]).is_empty());
    }
}

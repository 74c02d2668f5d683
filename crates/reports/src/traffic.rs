use std::collections::BTreeMap;

use chrono::NaiveDate;

use wardstock_records::PatientIntake;

/// Registrations per calendar day (UTC).
pub fn daily_visits(intakes: &[PatientIntake]) -> BTreeMap<NaiveDate, u64> {
    let mut per_day = BTreeMap::new();
    for intake in intakes {
        *per_day.entry(intake.registered_at.date_naive()).or_default() += 1;
    }
    per_day
}

/// The busiest day on record, if any. The earliest day wins a tie.
pub fn peak_day(intakes: &[PatientIntake]) -> Option<(NaiveDate, u64)> {
    let mut best: Option<(NaiveDate, u64)> = None;
    for (day, count) in daily_visits(intakes) {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((day, count)),
        }
    }
    best
}

// src/analysis/aggregate.rs

use std::collections::HashSet;
use std::ops::AddAssign;

use crate::config::{Breakdown, Dataset, EmploymentData, StateRecord, Totals};

pub const NATIONAL_NAME: &str = "India";
pub const TOP_CITY_LIMIT: usize = 5;
pub const TOP_SKILL_LIMIT: usize = 10;

/// Rolls every state record up into one national record.
///
/// Scalar totals and every breakdown are summed key by key (a state without a
/// key contributes nothing to it). The average salary is the rounded mean over
/// the states that report a non-zero salary. Skills are de-duplicated in
/// encounter order and capped at [`TOP_SKILL_LIMIT`]; cities are reduced to the
/// [`TOP_CITY_LIMIT`] largest, ties keeping encounter order.
///
/// The result is recomputed from scratch on every call. An empty dataset gives
/// an all-zero record.
pub fn national_summary(dataset: &Dataset) -> StateRecord {
    let mut totals = Totals::default();
    let mut startups_by_sector = Breakdown::new();
    let mut funding_by_sector = Breakdown::new();
    let mut startups_growth_yearly = Breakdown::new();
    let mut cities = Breakdown::new();
    let mut startup_stage_distribution = Breakdown::new();

    let mut total_jobs = 0;
    let mut salary_sum = 0.0;
    let mut salary_count = 0u32;
    let mut seen_skills = HashSet::new();
    let mut skills = Vec::new();

    for record in dataset.records() {
        totals.total_startups += record.totals.total_startups;
        totals.unicorns_total += record.totals.unicorns_total;
        totals.women_led_total += record.totals.women_led_total;

        accumulate(&mut startups_by_sector, &record.startups_by_sector);
        accumulate(&mut funding_by_sector, &record.funding_by_sector);
        accumulate(&mut startups_growth_yearly, &record.startups_growth_yearly);
        accumulate(&mut cities, &record.top_cities_by_startups);
        accumulate(&mut startup_stage_distribution, &record.startup_stage_distribution);

        if let Some(employment) = &record.employment_data {
            total_jobs += employment.total_jobs;
            if employment.avg_salary != 0.0 {
                salary_sum += employment.avg_salary;
                salary_count += 1;
            }
            for skill in &employment.top_skills {
                if seen_skills.insert(skill.as_str()) {
                    skills.push(skill.clone());
                }
            }
        }
    }

    let avg_salary = if salary_count > 0 {
        (salary_sum / f64::from(salary_count)).round()
    } else {
        0.0
    };
    skills.truncate(TOP_SKILL_LIMIT);

    StateRecord {
        full_name: NATIONAL_NAME.to_string(),
        totals,
        startups_by_sector,
        funding_by_sector,
        startups_growth_yearly,
        top_cities_by_startups: top_entries(cities, TOP_CITY_LIMIT),
        startup_stage_distribution,
        employment_data: Some(EmploymentData {
            total_jobs,
            avg_salary,
            top_skills: skills,
        }),
    }
}

fn accumulate<V>(into: &mut Breakdown<V>, from: &Breakdown<V>)
where
    V: Copy + Default + AddAssign,
{
    for (key, value) in from {
        *into.entry(key.clone()).or_default() += *value;
    }
}

/// The `limit` largest entries, descending. The sort is stable so equal
/// counts stay in encounter order.
pub fn top_entries(entries: Breakdown<u64>, limit: usize) -> Breakdown<u64> {
    let mut sorted: Vec<(String, u64)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.truncate(limit);
    sorted.into_iter().collect()
}

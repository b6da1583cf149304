use std::collections::HashMap;

use crate::models::{Partition, Question, Unit};

/// Questions taken from each unit for Part A.
pub const PART_A_PER_UNIT: usize = 2;
/// Total questions in Part B.
pub const PART_B_TOTAL: usize = 5;

/// Splits the fetched units into the two exam sections.
///
/// Part A takes the first [`PART_A_PER_UNIT`] questions of every unit, in unit order.
/// Part B walks the flattened question list and picks up to [`PART_B_TOTAL`] questions,
/// counting picks per unit id. The per-unit cap is the flattened list length, so in
/// practice only the global cap ever stops Part B.
pub fn partition(units: &[Unit]) -> Partition {
    Partition {
        part_a: part_a(units),
        part_b: part_b(units),
    }
}

fn part_a(units: &[Unit]) -> Vec<Question> {
    units
        .iter()
        .flat_map(|unit| unit.questions.iter().take(PART_A_PER_UNIT))
        .cloned()
        .collect()
}

fn part_b(units: &[Unit]) -> Vec<Question> {
    let flattened = units
        .iter()
        .flat_map(|unit| unit.questions.iter())
        .collect::<Vec<_>>();
    let per_unit_cap = flattened.len();

    let mut picked_per_unit: HashMap<&str, usize> = HashMap::new();
    let mut part_b = Vec::with_capacity(PART_B_TOTAL.min(flattened.len()));

    for question in flattened {
        if part_b.len() >= PART_B_TOTAL {
            break;
        }

        let picked = picked_per_unit.entry(question.unit_id()).or_insert(0);
        if *picked < per_unit_cap {
            part_b.push(question.clone());
            *picked += 1;
        }
    }

    part_b
}

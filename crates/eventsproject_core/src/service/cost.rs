//! Event cost rule.

use crate::model::logistics::Logistics;

/// Sums `unit_price * quantity` over reserved items.
///
/// Non-reserved items contribute nothing; an empty slice costs `0.0`.
/// Negative prices or quantities are summed as given.
pub fn compute_cost(logistics: &[Logistics]) -> f64 {
    logistics
        .iter()
        .filter(|item| item.reserved)
        .map(Logistics::line_total)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::compute_cost;
    use crate::model::logistics::Logistics;

    #[test]
    fn reserved_items_are_multiplied_and_summed() {
        let items = vec![
            Logistics::new("projector", 100.0, 2).reserved(true),
            Logistics::new("chairs", 1.5, 10).reserved(true),
        ];
        assert_eq!(compute_cost(&items), 215.0);
    }

    #[test]
    fn unreserved_items_are_ignored() {
        let items = vec![
            Logistics::new("projector", 100.0, 2).reserved(true),
            Logistics::new("catering", 500.0, 3),
        ];
        assert_eq!(compute_cost(&items), 200.0);
    }

    #[test]
    fn empty_set_costs_nothing() {
        assert_eq!(compute_cost(&[]), 0.0);
    }

    #[test]
    fn negative_inputs_are_not_clamped() {
        let items = vec![Logistics::new("refund", -20.0, 2).reserved(true)];
        assert_eq!(compute_cost(&items), -40.0);
    }
}

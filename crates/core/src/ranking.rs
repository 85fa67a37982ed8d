//! Top-N ranking of services by cost

use cost_widget_types::ServiceCost;

/// Sort items by cost, highest first, and keep at most `limit`
///
/// The sort is stable, so items with equal cost keep their input order.
/// Costs are compared with `f64::total_cmp`, which keeps the ordering
/// deterministic even for values a billing source should never send.
pub fn rank_by_cost<T, F>(mut items: Vec<T>, limit: usize, cost: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| cost(b).total_cmp(&cost(a)));
    items.truncate(limit);
    items
}

/// The `limit` most expensive services, sorted descending
pub fn top_services(services: Vec<ServiceCost>, limit: usize) -> Vec<ServiceCost> {
    rank_by_cost(services, limit, |s| s.cost)
}

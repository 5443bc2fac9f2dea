//! Time-window clustering.
//!
//! Customers are ordered by (ready, due, id) and cut into `k` contiguous
//! bands whose sizes differ by at most one. Neighbouring bands therefore
//! hold customers whose windows open at similar times.

use std::cmp::Ordering;

use crate::models::ProblemInstance;

/// Partitions the customers of `instance` into `k` time-window bands.
///
/// Always returns exactly `max(k, 1)` clusters; with more clusters than
/// customers the trailing ones are empty. The first `n % k` clusters get
/// one extra customer.
///
/// # Examples
///
/// ```
/// use mtvrptw::models::{Customer, Parameters, ProblemInstance, TimeWindow};
/// use mtvrptw::constructive::cluster_by_time_window;
///
/// let tw = |r, d| TimeWindow::new(r, d).unwrap();
/// let depot = Customer::depot(0.0, 0.0).with_time_window(tw(0.0, 500.0));
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 1, 0.0).with_time_window(tw(200.0, 300.0)),
///     Customer::new(2, 2.0, 0.0, 1, 0.0).with_time_window(tw(0.0, 100.0)),
///     Customer::new(3, 3.0, 0.0, 1, 0.0).with_time_window(tw(210.0, 290.0)),
///     Customer::new(4, 4.0, 0.0, 1, 0.0).with_time_window(tw(10.0, 90.0)),
/// ];
/// let instance = ProblemInstance::new(depot, customers, 10, Parameters::default()).unwrap();
///
/// let clusters = cluster_by_time_window(&instance, 2);
/// assert_eq!(clusters, vec![vec![2, 4], vec![1, 3]]);
/// ```
pub fn cluster_by_time_window(instance: &ProblemInstance, k: usize) -> Vec<Vec<usize>> {
    let mut ids: Vec<usize> = instance.customer_ids().collect();
    ids.sort_by(|&a, &b| time_window_order(instance, a, b));

    let k = k.max(1);
    let base = ids.len() / k;
    let extra = ids.len() % k;

    let mut clusters = Vec::with_capacity(k);
    let mut start = 0;
    for c in 0..k {
        let size = base + usize::from(c < extra);
        clusters.push(ids[start..start + size].to_vec());
        start += size;
    }
    clusters
}

fn time_window_order(instance: &ProblemInstance, a: usize, b: usize) -> Ordering {
    let (ta, tb) = (instance.node(a).time_window(), instance.node(b).time_window());
    ta.ready()
        .total_cmp(&tb.ready())
        .then(ta.due().total_cmp(&tb.due()))
        .then(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Parameters, TimeWindow};

    fn instance(windows: &[(f64, f64)]) -> ProblemInstance {
        let depot = Customer::depot(0.0, 0.0)
            .with_time_window(TimeWindow::new(0.0, 1000.0).expect("valid"));
        let customers = windows
            .iter()
            .enumerate()
            .map(|(i, &(r, d))| {
                Customer::new(i + 1, 1.0, 1.0, 1, 0.0)
                    .with_time_window(TimeWindow::new(r, d).expect("valid"))
            })
            .collect();
        ProblemInstance::new(depot, customers, 10, Parameters::default()).expect("valid")
    }

    #[test]
    fn test_single_cluster_holds_everyone() {
        let inst = instance(&[(50.0, 60.0), (0.0, 100.0), (20.0, 30.0)]);
        assert_eq!(cluster_by_time_window(&inst, 1), vec![vec![2, 3, 1]]);
    }

    #[test]
    fn test_uneven_split() {
        let inst = instance(&[
            (0.0, 100.0),
            (10.0, 100.0),
            (20.0, 100.0),
            (30.0, 100.0),
            (40.0, 100.0),
        ]);
        let clusters = cluster_by_time_window(&inst, 3);
        assert_eq!(clusters, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_ties_broken_by_due_then_id() {
        let inst = instance(&[(0.0, 90.0), (0.0, 50.0), (0.0, 50.0)]);
        assert_eq!(cluster_by_time_window(&inst, 1), vec![vec![2, 3, 1]]);
    }

    #[test]
    fn test_more_clusters_than_customers() {
        let inst = instance(&[(0.0, 100.0), (5.0, 100.0)]);
        let clusters = cluster_by_time_window(&inst, 4);
        assert_eq!(clusters.len(), 4);
        assert_eq!(clusters[0], vec![1]);
        assert_eq!(clusters[1], vec![2]);
        assert!(clusters[2].is_empty() && clusters[3].is_empty());
    }

    #[test]
    fn test_empty_instance() {
        let inst = instance(&[]);
        let clusters = cluster_by_time_window(&inst, 2);
        assert_eq!(clusters, vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn test_zero_treated_as_one() {
        let inst = instance(&[(0.0, 100.0)]);
        assert_eq!(cluster_by_time_window(&inst, 0), vec![vec![1]]);
    }
}

use crate::models::{PricingStats, Property, RawProperty};

/// A listing that may yield a price per unit of area
pub trait PriceArea {
    /// `price / size`, or `None` when either value is unusable or `size <= 0`
    fn price_per_area(&self) -> Option<f64>;
}

impl PriceArea for Property {
    fn price_per_area(&self) -> Option<f64> {
        price_per_area(Some(self.price), Some(self.size))
    }
}

impl PriceArea for RawProperty {
    fn price_per_area(&self) -> Option<f64> {
        price_per_area(
            self.price.as_ref().and_then(|p| p.as_f64()),
            self.size.as_ref().and_then(|s| s.as_f64()),
        )
    }
}

impl<T: PriceArea + ?Sized> PriceArea for &T {
    fn price_per_area(&self) -> Option<f64> {
        (**self).price_per_area()
    }
}

#[inline]
fn price_per_area(price: Option<f64>, size: Option<f64>) -> Option<f64> {
    let (price, size) = (price?, size?);
    if !price.is_finite() || !size.is_finite() || size <= 0.0 {
        return None;
    }

    let value = price / size;
    value.is_finite().then_some(value)
}

/// Sorted price-per-area values of every usable listing
pub fn price_per_area_values<T: PriceArea>(listings: &[T]) -> Vec<f64> {
    let mut values: Vec<f64> = listings.iter().filter_map(PriceArea::price_per_area).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Linear-interpolation percentile over an ascending slice
///
/// `pos = (n - 1) * q`, interpolating between the two closest ranks.
/// Returns `None` for an empty slice.
pub fn quartile(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let pos = (n - 1) as f64 * q;
    let base = pos.floor();
    let rest = pos - base;
    let index = base as usize;

    if index >= n - 1 {
        return Some(sorted[n - 1]);
    }

    Some(sorted[index] + (sorted[index + 1] - sorted[index]) * rest)
}

/// Reduce comparables to price-per-area statistics
///
/// Listings without a usable price or a positive size are skipped. Returns
/// `None` when nothing is left.
pub fn compute_pricing_stats<T: PriceArea>(comparables: &[T]) -> Option<PricingStats> {
    let values = price_per_area_values(comparables);

    let (min, max) = match (values.first(), values.last()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => {
            tracing::debug!(
                "No usable price/size among {} comparables",
                comparables.len()
            );
            return None;
        }
    };

    // scale before summing so values near f64::MAX cannot overflow the total
    let count = values.len() as f64;
    let average = values.iter().map(|v| v / count).sum::<f64>();

    Some(PricingStats {
        lower_quartile: quartile(&values, 0.25)?,
        median: quartile(&values, 0.5)?,
        upper_quartile: quartile(&values, 0.75)?,
        min,
        max,
        average,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNumber;

    fn sample(price: f64, size: f64) -> RawProperty {
        RawProperty {
            price: Some(RawNumber::Number(price)),
            size: Some(RawNumber::Number(size)),
            ..RawProperty::default()
        }
    }

    #[test]
    fn test_quartiles_of_four_values() {
        let comparables = vec![
            sample(100.0, 100.0),
            sample(200.0, 100.0),
            sample(300.0, 100.0),
            sample(400.0, 100.0),
        ];

        let stats = compute_pricing_stats(&comparables).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.average, 2.5);
        assert!((stats.lower_quartile - 1.75).abs() < 1e-12);
        assert!((stats.median - 2.5).abs() < 1e-12);
        assert!((stats.upper_quartile - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let comparables = vec![sample(400.0, 100.0), sample(100.0, 100.0), sample(300.0, 100.0)];

        let stats = compute_pricing_stats(&comparables).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_single_value() {
        let stats = compute_pricing_stats(&[sample(250.0, 50.0)]).unwrap();

        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.lower_quartile, 5.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.upper_quartile, 5.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let mut unparseable = sample(0.0, 0.0);
        unparseable.price = Some(RawNumber::Text("call for price".to_string()));

        let comparables = vec![
            sample(100.0, 0.0),
            unparseable,
            RawProperty::default(),
            sample(300.0, 100.0),
        ];

        let stats = compute_pricing_stats(&comparables).unwrap();
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_empty_and_all_invalid() {
        let empty: Vec<RawProperty> = vec![];
        assert!(compute_pricing_stats(&empty).is_none());

        let invalid = vec![sample(100.0, 0.0), RawProperty::default()];
        assert!(compute_pricing_stats(&invalid).is_none());
    }

    #[test]
    fn test_average_of_huge_values_stays_finite() {
        let comparables = vec![sample(f64::MAX, 1.0), sample(f64::MAX, 1.0)];

        let stats = compute_pricing_stats(&comparables).unwrap();
        assert!(stats.average.is_finite());
        assert_eq!(stats.average, f64::MAX);
        assert_eq!(stats.median, f64::MAX);
    }

    #[test]
    fn test_quartile_interpolation() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(quartile(&values, 0.0), Some(10.0));
        assert_eq!(quartile(&values, 0.25), Some(20.0));
        assert_eq!(quartile(&values, 0.5), Some(30.0));
        assert_eq!(quartile(&values, 1.0), Some(50.0));
        assert!((quartile(&values, 0.1).unwrap() - 14.0).abs() < 1e-9);
        assert_eq!(quartile(&[], 0.5), None);
    }
}

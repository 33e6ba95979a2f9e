// Criterion benchmarks for the comparables engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use comparables_engine::core::{compute_pricing_stats, similarity::relative_similarity_score, Matcher};
use comparables_engine::models::{Location, Property, PropertyType};

fn create_comparable(id: usize) -> Property {
    Property {
        listing_name: format!("Listing {}", id),
        property_type: if id % 3 == 0 { PropertyType::Apartment } else { PropertyType::House },
        bedrooms: 1 + (id % 5) as u32,
        bathrooms: 1.0 + (id % 3) as f64,
        price: 80_000.0 + (id % 50) as f64 * 4_000.0,
        size: 60.0 + (id % 40) as f64 * 5.0,
        amenity_count: (id % 8) as u32,
        age: (id % 30) as u32,
        parking_spots: (id % 4) as u32,
        condition: 1 + (id % 4) as u8,
        location: Location::new(
            "San José",
            if id % 2 == 0 { "Escazú" } else { "Santa Ana" },
            format!("District {}", id % 6),
        ),
    }
}

fn bench_relative_similarity(c: &mut Criterion) {
    c.bench_function("relative_similarity_score", |b| {
        b.iter(|| {
            relative_similarity_score(
                "bedrooms",
                black_box(4.0),
                black_box(6.0),
                black_box(0.66),
                black_box(1.0),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_config();
    let base = create_comparable(7);

    let mut group = c.benchmark_group("matching");

    for comparable_count in [10, 50, 100, 500, 1000].iter() {
        let comparables: Vec<Property> = (0..*comparable_count).map(create_comparable).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(comparable_count),
            &comparables,
            |b, comparables| {
                b.iter(|| matcher.score(black_box(&base), black_box(comparables)));
            },
        );
    }

    group.finish();
}

fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");

    for comparable_count in [10, 100, 1000].iter() {
        let comparables: Vec<Property> = (0..*comparable_count).map(create_comparable).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(comparable_count),
            &comparables,
            |b, comparables| {
                b.iter(|| compute_pricing_stats(black_box(comparables.as_slice())));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_relative_similarity, bench_matching, bench_pricing);
criterion_main!(benches);

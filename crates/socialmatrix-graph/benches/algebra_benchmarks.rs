use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use socialmatrix_core::{Friendship, Gender, Person, SocialGraph};
use socialmatrix_graph::{algebra, encode, AnalyticsEngine, GraphAlgebra};
use std::hint::black_box;

/// Generate a test network with `people` members and roughly `density` edges per pair
fn create_test_network(label: &str, people: usize, density: f64) -> SocialGraph {
    let members: Vec<Person> = (0..people)
        .map(|i| Person::new(format!("person_{:03}", i), Gender::Unspecified, label))
        .collect();

    let mut friendships = Vec::new();
    for i in 0..people {
        for j in (i + 1)..people {
            if fastrand::f64() < density {
                friendships.push(Friendship::new(&members[i].name, &members[j].name));
            }
        }
    }

    SocialGraph::from_parts(label, members, friendships)
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    for size in [10usize, 50, 100] {
        let a = create_test_network("A", size, 0.3);
        let b = create_test_network("B", size, 0.3);

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bench, _| {
            let mut facade = GraphAlgebra::new();
            bench.iter(|| facade.combine_union(black_box(&a), black_box(&b)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("product", size), &size, |bench, _| {
            let mut facade = GraphAlgebra::new();
            bench.iter(|| facade.combine_product(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn bench_square_and_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics");
    for size in [10usize, 50, 100] {
        let g = create_test_network("A", size, 0.2);
        let (_, adjacency) = encode(&g);
        let engine = AnalyticsEngine::default();

        group.bench_with_input(BenchmarkId::new("square", size), &size, |bench, _| {
            bench.iter(|| algebra::square(black_box(&adjacency)));
        });
        group.bench_with_input(BenchmarkId::new("analyze", size), &size, |bench, _| {
            bench.iter(|| engine.analyze(black_box(&g)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_combine, bench_square_and_analytics);
criterion_main!(benches);

//! Criterion benchmarks for response normalization

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use pokedex::services::normalizer::{detail_from_value, list_from_value};
use pokedex::services::queries::LIST_LIMIT;
use serde_json::{json, Value};
use std::hint::black_box;

/// A full first-generation list payload
fn list_payload() -> Value {
    let pokemon: Vec<Value> = (1..=LIST_LIMIT as i64)
        .map(|id| {
            json!({
                "id": id,
                "pokemonspecy": { "pokemonspeciesnames": [{ "name": format!("Pokemon{}", id) }] },
                "pokemonsprites": [{ "sprites": format!("https://img.example/{}.png", id) }],
                "pokemontypes": [
                    { "type": { "typenames": [{ "name": "Grass" }] } },
                    { "type": { "typenames": [{ "name": "Poison" }] } }
                ]
            })
        })
        .collect();
    json!({ "pokemon": pokemon })
}

fn detail_payload() -> Value {
    json!({
        "pokemon": [{
            "id": 25,
            "pokemonspecy": {
                "capture_rate": 190,
                "pokemonspeciesnames": [{ "name": "Pikachu" }]
            },
            "pokemonsprites": [{ "sprites": "https://img.example/25.png" }],
            "pokemontypes": [{ "type": { "typenames": [{ "name": "Electric" }] } }],
            "height": 4,
            "weight": 60,
            "pokemonstats": [
                { "base_stat": 35, "stat": { "name": "hp" } },
                { "base_stat": 55, "stat": { "name": "attack" } },
                { "base_stat": 40, "stat": { "name": "defense" } },
                { "base_stat": 90, "stat": { "name": "speed" } }
            ]
        }]
    })
}

fn bench_normalize_list(c: &mut Criterion) {
    let payload = list_payload();

    let mut group = c.benchmark_group("normalizer");
    group.throughput(Throughput::Elements(LIST_LIMIT as u64));
    group.bench_function("list_151", |b| {
        b.iter(|| list_from_value(black_box(payload.clone())));
    });
    group.finish();
}

fn bench_normalize_detail(c: &mut Criterion) {
    let payload = detail_payload();

    let mut group = c.benchmark_group("normalizer");
    group.bench_function("detail", |b| {
        b.iter(|| detail_from_value(black_box(payload.clone()), 25));
    });
    group.finish();
}

criterion_group!(benches, bench_normalize_list, bench_normalize_detail);
criterion_main!(benches);

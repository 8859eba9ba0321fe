use criterion::{black_box, criterion_group, criterion_main, Criterion};
use query_values::{Config, Record, Values};

// Simple data structures for benchmarking
#[derive(Debug, Default, Record)]
struct SimpleStruct {
    id: u32,
    name: String,
    active: bool,
}

#[derive(Debug, Default, Record)]
struct SimpleWithOption {
    id: u32,
    name: String,
    email: Option<String>,
}

#[derive(Debug, Default, Record)]
struct SimpleVecWrapper {
    items: Vec<u32>,
}

// Embedded records share the parent's keys
#[derive(Debug, Default, Record)]
struct Address {
    city: String,
    street: String,
    postcode: String,
}

#[derive(Debug, Default, Record)]
struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    #[query(flatten)]
    address: Option<Box<Address>>,
    user_ids: Vec<u8>,
}

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), vec![(*value).to_owned()]))
        .collect()
}

fn deserialize_simple_struct(c: &mut Criterion) {
    let input = values(&[("id", "42"), ("name", "Acme"), ("active", "")]);
    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| query_values::from_values::<SimpleStruct>(black_box(&input)))
    });
}

fn deserialize_simple_with_option_some(c: &mut Criterion) {
    let input = values(&[("id", "42"), ("name", "Acme"), ("email", "acme@example.com")]);
    c.bench_function("deserialize_simple_with_option_some", |b| {
        b.iter(|| query_values::from_values::<SimpleWithOption>(black_box(&input)))
    });
}

fn deserialize_simple_with_option_none(c: &mut Criterion) {
    let input = values(&[("id", "42"), ("name", "Acme")]);
    c.bench_function("deserialize_simple_with_option_none", |b| {
        b.iter(|| query_values::from_values::<SimpleWithOption>(black_box(&input)))
    });
}

fn deserialize_simple_vec(c: &mut Criterion) {
    let input = values(&[("items", "1,2,3,4,5")]);
    c.bench_function("deserialize_simple_vec", |b| {
        b.iter(|| query_values::from_values::<SimpleVecWrapper>(black_box(&input)))
    });
}

fn deserialize_nested_struct(c: &mut Criterion) {
    let input = values(&[
        ("id", "42"),
        ("name", "Acme"),
        ("phone", "12345"),
        ("city", "Carrot City"),
        ("street", "Special-Street* No. 11"),
        ("postcode", "12345"),
        ("user_ids", "1,2,3,4"),
    ]);
    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| query_values::from_values::<QueryParams>(black_box(&input)))
    });
}

fn deserialize_large_vec(c: &mut Criterion) {
    let items = (0..1000).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
    let input = values(&[("items", &items)]);
    c.bench_function("deserialize_large_vec", |b| {
        b.iter(|| query_values::from_values::<SimpleVecWrapper>(black_box(&input)))
    });
}

fn deserialize_unknown_keys(c: &mut Criterion) {
    let mut input = values(&[("id", "42"), ("name", "Acme")]);
    for i in 0..50 {
        input.insert(format!("extra{i}"), vec![i.to_string()]);
    }
    let lenient = Config::new().strict(false);
    c.bench_function("deserialize_unknown_keys_lenient", |b| {
        b.iter(|| lenient.from_values::<SimpleStruct>(black_box(&input)))
    });
    c.bench_function("deserialize_unknown_keys_strict", |b| {
        b.iter(|| query_values::from_values::<SimpleStruct>(black_box(&input)))
    });
}

criterion_group!(
    deserialize_benches,
    deserialize_simple_struct,
    deserialize_simple_with_option_some,
    deserialize_simple_with_option_none,
    deserialize_simple_vec,
    deserialize_nested_struct,
    deserialize_large_vec,
    deserialize_unknown_keys,
);

criterion_main!(deserialize_benches);

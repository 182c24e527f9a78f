use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rlibphonenumber::PhoneNumberUtil;

use phonenumber::{self as rlp, country::Id};

/// (number, region for rlibphonenumber, region for rust-phonenumber)
type TestEntity = (&'static str, &'static str, Id);

/// A mix of national, international, vanity and invalid input, so that no
/// single code path dominates the measurement.
fn setup_parsing_data() -> Vec<TestEntity> {
    use phonenumber::country::Id::*;
    vec![
        ("0011 54 9 11 8765 4321 ext. 1234", "AU", AU),
        ("(650) 253-0000", "US", US),
        ("+44 20 8765 4321", "GB", GB),
        ("020 8765 4321", "GB", GB),
        // Mobile number of Argentina with the "15" prefix.
        ("011 15-8765-4321", "AR", AR),
        // Italian leading zero.
        ("02 3661 8300", "IT", IT),
        ("1-800-FLOWERS", "US", US),
        ("12345", "DE", DE),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let _ = env_logger::try_init();
    let phone_util = PhoneNumberUtil::new();
    let numbers_to_parse = setup_parsing_data();

    let mut group = c.benchmark_group("Parsing Comparison");

    group.bench_function("rlibphonenumber: parse()", |b| {
        b.iter(|| {
            for (number_str, region, _) in &numbers_to_parse {
                let _ = phone_util.parse(black_box(number_str), black_box(region));
            }
        })
    });

    group.bench_function("rust-phonenumber: parse()", |b| {
        b.iter(|| {
            for (number_str, _, region_id) in &numbers_to_parse {
                let _ = rlp::parse(black_box(Some(*region_id)), black_box(number_str));
            }
        })
    });

    group.bench_function("rlibphonenumber: parse() + is_valid_number()", |b| {
        b.iter(|| {
            for (number_str, region, _) in &numbers_to_parse {
                if let Ok(number) = phone_util.parse(black_box(number_str), black_box(region)) {
                    black_box(phone_util.is_valid_number(&number));
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);

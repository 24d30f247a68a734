use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use ivy_parser::parser::Parser;

fn expr(source: &str) {
    let source = source.into();
    let _ast = Parser::new(&source).parse_expr().unwrap();
    assert!(source.has_no_errors());
}

fn program(source: &str) {
    let source = source.into();
    let _ast = Parser::new(&source).parse_program().unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "1".to_string();
    for _i in 0..200 {
        source.push_str(" - (2 / 3 + 5 * 5)");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| expr(&source)));
}

fn nested_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested-blocks");

    let mut source = "int i;".to_string();
    for _i in 0..100 {
        source.push_str(" while (i < 10) { i = i + 1;");
    }
    source.push_str(" print(i);");
    for _i in 0..100 {
        source.push_str(" }");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested-blocks", |b| b.iter(|| program(&source)));
}

criterion_group!(benches, long_expr, stress_precedence, nested_blocks);
criterion_main!(benches);

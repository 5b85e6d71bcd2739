//! Benchmarks for table rendering and paging
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use folio::api::PaginationMeta;
use folio::table::{CellValue, Column, Pager, Paging, Row, Table, TableSchema};

fn schema() -> TableSchema {
    TableSchema::new(vec![
        Column::new("Name", "name"),
        Column::new("Category", "category"),
        Column::number("Proficiency", "proficiency"),
        Column::new("Status", "status"),
        Column::date("Created", "createdAt"),
    ])
}

fn create_test_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            vec![
                CellValue::Text(format!("Skill {}", i)),
                CellValue::Text(if i % 2 == 0 { "Backend" } else { "Frontend" }.to_string()),
                CellValue::Number((i % 100) as f64),
                CellValue::Text("ACTIVE".to_string()),
                CellValue::Empty,
            ]
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let schema = schema();

    for size in [10, 50] {
        let rows = create_test_rows(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("text_{}", size), |b| {
            let meta = PaginationMeta {
                current_page: 0,
                page_size: size as u32,
                total_pages: 1,
                total_records: size as u64,
            };
            let table = Table::new(&schema, &rows, Paging::Server(meta));
            b.iter(|| black_box(&table).to_text())
        });

        group.bench_function(format!("csv_{}", size), |b| {
            let table = Table::new(&schema, &rows, Paging::Server(PaginationMeta::empty(10)));
            b.iter(|| black_box(&table).to_csv().unwrap())
        });
    }

    group.finish();
}

fn bench_pager(c: &mut Criterion) {
    let mut group = c.benchmark_group("pager");
    let schema = schema();
    let rows = create_test_rows(10_000);

    group.bench_function("window_10000", |b| {
        let mut pager = Pager::with_rows_per_page(50).unwrap();
        pager.set_page(57, rows.len());
        b.iter(|| black_box(&pager).slice(black_box(&rows)).len())
    });

    group.bench_function("client_page_text_10000", |b| {
        let mut pager = Pager::with_rows_per_page(25).unwrap();
        pager.set_page(120, rows.len());
        let table = Table::new(&schema, &rows, Paging::Client(pager));
        b.iter(|| black_box(&table).to_text())
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_pager);
criterion_main!(benches);

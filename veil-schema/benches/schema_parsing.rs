//! Benchmarks for schema parsing and rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use veil_schema::{parse_schema, render_schema};

/// A small schema with a datasource, an enum and two related models.
const SMALL_SCHEMA: &str = r#"
datasource db {
    provider = "postgresql"
    url      = env("DATABASE_URL")
}

enum Role {
    USER
    ADMIN
}

model User {
    id        Int      @id @default(autoincrement())
    email     String   @unique
    name      String?
    role      Role     @default(USER)
    posts     Post[]
    createdAt DateTime @default(now())
}

model Post {
    id        Int     @id @default(autoincrement())
    title     String  @db.VarChar(255)
    published Boolean @default(false)
    author    User    @relation(fields: [authorId], references: [id])
    authorId  Int

    @@index([authorId], map: "post_author_index")
}
"#;

fn generate_large_schema(model_count: usize) -> String {
    let mut schema = String::new();

    schema.push_str(
        r#"
enum Status {
    ACTIVE
    INACTIVE
    PENDING
}
"#,
    );

    for i in 0..model_count {
        schema.push_str(&format!(
            r#"
// Model number {i}
model Model{i} {{
    id          Int      @id @default(autoincrement())
    name        String   @default("model {i}")
    description String?
    status      Status   @default(ACTIVE)
    count       Int      @default(0)
    parentId    Int?

    @@index([name, status], map: "model_{i}_name_status")
}}
"#
        ));
    }

    schema
}

/// Benchmark small schema parsing.
fn bench_parse_small(c: &mut Criterion) {
    c.bench_function("parse_small_schema", |b| {
        b.iter(|| black_box(parse_schema(black_box(SMALL_SCHEMA)).unwrap()))
    });
}

/// Benchmark large schema parsing with varying model counts.
fn bench_parse_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_large_schema");

    for model_count in [10, 50, 100].iter() {
        let schema = generate_large_schema(*model_count);
        group.throughput(Throughput::Bytes(schema.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("models", model_count),
            &schema,
            |b, schema| b.iter(|| black_box(parse_schema(schema).unwrap())),
        );
    }

    group.finish();
}

/// Benchmark rendering an already parsed schema.
fn bench_render(c: &mut Criterion) {
    let schema = parse_schema(&generate_large_schema(50)).unwrap();

    c.bench_function("render_50_models", |b| {
        b.iter(|| black_box(render_schema(black_box(&schema))))
    });
}

criterion_group!(benches, bench_parse_small, bench_parse_large, bench_render);
criterion_main!(benches);

//! Throughput benchmarks for the stores, the dispatcher and the RESP codec.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use respkv::commands::CommandHandler;
use respkv::protocol::{RespReader, Value};
use respkv::storage::Database;
use std::sync::Arc;
use std::time::Duration;

fn bench_strings(c: &mut Criterion) {
    let db = Arc::new(Database::new());
    for i in 0..100_000 {
        db.strings.set(
            Bytes::from(format!("key:{}", i)),
            Bytes::from(format!("value:{}", i)),
        );
    }

    let mut group = c.benchmark_group("strings");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set", |b| {
        let mut i = 0u64;
        let value = Bytes::from("x".repeat(1024));
        b.iter(|| {
            db.strings
                .set(Bytes::from(format!("new:{}", i)), value.clone());
            i += 1;
        });
    });

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 100_000);
            black_box(db.strings.get(key.as_bytes()));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("missing:{}", i);
            black_box(db.strings.get(key.as_bytes()));
            i += 1;
        });
    });

    group.finish();
}

fn bench_hashes(c: &mut Criterion) {
    let db = Arc::new(Database::new());
    for i in 0..100 {
        db.hashes.hset(
            Bytes::from("user:1"),
            Bytes::from(format!("field:{}", i)),
            Bytes::from("value"),
        );
    }

    let mut group = c.benchmark_group("hashes");

    group.bench_function("hset", |b| {
        let mut i = 0u64;
        b.iter(|| {
            db.hashes.hset(
                Bytes::from(format!("hash:{}", i % 1_000)),
                Bytes::from(format!("field:{}", i)),
                Bytes::from("value"),
            );
            i += 1;
        });
    });

    group.bench_function("hgetall_100_fields", |b| {
        b.iter(|| black_box(db.hashes.hgetall(b"user:1")));
    });

    group.finish();
}

/// Full request path minus the socket: dispatch of pre-decoded requests.
fn bench_dispatch(c: &mut Criterion) {
    let handler = CommandHandler::new(Arc::new(Database::new()));
    let set = Value::array(vec![
        Value::bulk_string("SET"),
        Value::bulk_string("key"),
        Value::bulk_string("value"),
    ]);
    let get = Value::array(vec![Value::bulk_string("get"), Value::bulk_string("key")]);

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set", |b| {
        b.iter(|| black_box(handler.dispatch(set.clone())));
    });

    group.bench_function("get", |b| {
        b.iter(|| black_box(handler.dispatch(get.clone())));
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let request = Value::array(vec![
        Value::bulk_string("HSET"),
        Value::bulk_string("user:1"),
        Value::bulk_string("name"),
        Value::bulk_string(Bytes::from("x".repeat(1024))),
    ]);
    let wire = request.serialize();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(wire.len() as u64));

    group.bench_function("serialize", |b| {
        let mut buf = Vec::with_capacity(wire.len());
        b.iter(|| {
            buf.clear();
            request.serialize_into(&mut buf);
            black_box(buf.len());
        });
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut reader = RespReader::new(&wire[..]);
                black_box(reader.read_value().await.unwrap());
            })
        });
    });

    group.finish();
}

/// Writers on the string store alongside writers on the hash store.
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("2_string_2_hash_threads", |b| {
        b.iter(|| {
            let db = Arc::new(Database::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let db = Arc::clone(&db);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = Bytes::from(format!("key:{}:{}", t, i));
                            if t % 2 == 0 {
                                db.strings.set(key.clone(), Bytes::from("value"));
                                db.strings.get(&key);
                            } else {
                                db.hashes.hset(Bytes::from("h"), key.clone(), Bytes::from("value"));
                                db.hashes.hget(b"h", &key);
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(db.strings.len() + db.hashes.field_count(b"h"));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_strings,
    bench_hashes,
    bench_dispatch,
    bench_codec,
    bench_concurrent,
);

criterion_main!(benches);

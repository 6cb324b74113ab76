//! Benchmarks for the kvwire protocol codec

use bytes::BytesMut;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kvwire::protocol::{decode_reply, encode_command, frame_len};
use kvwire::Command;

fn encode_benchmarks(c: &mut Criterion) {
    let command = Command::set("person:prateek", r#"{"name":"Prateek","age":18}"#);
    c.bench_function("encode_set", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(128);
            encode_command(black_box(&command), &mut buf);
            buf
        })
    });

    let members: Vec<String> = (0..50).map(|i| format!("Lead:G{}", i)).collect();
    let sadd = Command::sadd("index:lead:status:loggedin", members);
    c.bench_function("encode_sadd_50_members", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(2048);
            encode_command(black_box(&sadd), &mut buf);
            buf
        })
    });
}

fn decode_benchmarks(c: &mut Criterion) {
    let mut raw = String::from("*50\r\n");
    for i in 0..50 {
        let member = format!("Lead:G{}", i);
        raw.push_str(&format!("${}\r\n{}\r\n", member.len(), member));
    }
    let raw = raw.into_bytes();

    c.bench_function("decode_array_50_members", |b| {
        b.iter(|| decode_reply(black_box(&raw)))
    });

    c.bench_function("frame_len_array_50_members", |b| {
        b.iter(|| frame_len(black_box(&raw)))
    });

    let bulk = b"$27\r\n{\"name\":\"Prateek\",\"age\":18}\r\n";
    c.bench_function("decode_bulk", |b| {
        b.iter(|| decode_reply(black_box(bulk)))
    });
}

criterion_group!(benches, encode_benchmarks, decode_benchmarks);
criterion_main!(benches);

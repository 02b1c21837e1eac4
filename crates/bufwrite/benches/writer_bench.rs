use criterion::{Criterion, criterion_group, criterion_main};
use http::{HeaderMap, StatusCode};
use micro_bufwrite::pool::BufferPool;
use micro_bufwrite::sink::ResponseSink;
use micro_bufwrite::writer::{GzipWriter, Piece, PlainWriter, ResponseWriter};
use std::hint::black_box;
use std::io;

// Mock sink counting how often the "network" is touched
#[derive(Default)]
struct MockSink {
    headers: HeaderMap,
    status: Option<StatusCode>,
    write_calls: usize,
    written: usize,
}

impl io::Write for MockSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_calls += 1;
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseSink for MockSink {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

fn bench_plain_small_writes(c: &mut Criterion) {
    let pool = BufferPool::new(10_000);

    c.bench_function("plain_1000_small_writes", |b| {
        b.iter(|| {
            let mut sink = MockSink::default();
            let mut writer = PlainWriter::with_pool(&mut sink, &pool);
            for _ in 0..1000 {
                writer.write(black_box(b"0123456789")).unwrap();
            }
            writer.close().unwrap();
            black_box(sink.write_calls);
        });
    });
}

fn bench_plain_write_all(c: &mut Criterion) {
    let pool = BufferPool::new(10_000);

    c.bench_function("plain_write_all_mixed", |b| {
        b.iter(|| {
            let mut sink = MockSink::default();
            let mut writer = PlainWriter::with_pool(&mut sink, &pool);
            for i in 0..200u64 {
                writer
                    .write_all(&[Piece::from("row "), Piece::from(black_box(i)), Piece::from(b'\n')])
                    .unwrap();
            }
            writer.close().unwrap();
            black_box(sink.written);
        });
    });
}

fn bench_gzip_small_writes(c: &mut Criterion) {
    let pool = BufferPool::new(10_000);

    c.bench_function("gzip_1000_small_writes", |b| {
        b.iter(|| {
            let mut sink = MockSink::default();
            let mut writer = GzipWriter::with_pool(&mut sink, &pool);
            for _ in 0..1000 {
                writer.write(black_box(b"0123456789")).unwrap();
            }
            writer.close().unwrap();
            black_box(sink.written);
        });
    });
}

criterion_group!(benches, bench_plain_small_writes, bench_plain_write_all, bench_gzip_small_writes);
criterion_main!(benches);

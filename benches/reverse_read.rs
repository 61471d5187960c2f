use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use revlines::{ReaderConfig, ReversedReader};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use tempfile::NamedTempFile;

fn create_test_file(size_kb: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let target_size = size_kb * 1024;
    let mut current_size = 0;
    let mut line_num = 0;

    while current_size < target_size {
        let log_line = format!(
            "[2024-09-02T10:{}:{:02}] INFO: Request {} user_{}\r\n",
            (line_num / 3600) % 24,
            (line_num / 60) % 60,
            line_num,
            line_num % 1000
        );
        temp_file.write_all(log_line.as_bytes()).unwrap();
        current_size += log_line.len();
        line_num += 1;
    }

    temp_file.flush().unwrap();
    temp_file
}

fn bench_reverse_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_read");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    let sizes_kb = [500, 5000, 20000]; // 500KB, 5MB, 20MB
    let chunk_sizes = [4 * 1024, 64 * 1024, 1024 * 1024];

    for &size_kb in &sizes_kb {
        let temp_file = create_test_file(size_kb);
        let size_label = if size_kb < 1024 {
            format!("{}KB", size_kb)
        } else {
            format!("{}MB", size_kb / 1024)
        };

        for &chunk_size in &chunk_sizes {
            let config = ReaderConfig::default().with_chunk_size(chunk_size);
            group.bench_with_input(
                BenchmarkId::new(format!("chunk_{}KB", chunk_size / 1024), &size_label),
                &temp_file.path(),
                |b, path| {
                    b.iter(|| {
                        let mut reader = ReversedReader::open_with_config(path, config).unwrap();
                        let mut bytes = 0usize;
                        while let Some(line) = reader.next_line_bytes().unwrap() {
                            bytes += line.len();
                        }
                        reader.close();
                        black_box(bytes);
                    });
                },
            );
        }

        // Forward baseline over the same file
        group.bench_with_input(
            BenchmarkId::new("forward_bufread", &size_label),
            &temp_file.path(),
            |b, path| {
                b.iter(|| {
                    let reader = BufReader::new(File::open(path).unwrap());
                    let mut bytes = 0usize;
                    for line in reader.lines() {
                        bytes += line.unwrap().len();
                    }
                    black_box(bytes);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reverse_read);
criterion_main!(benches);

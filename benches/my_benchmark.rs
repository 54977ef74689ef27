use criterion::{criterion_group, criterion_main, Criterion};
use lammps_thermo::{extract, Bounds, SectionOptions, ThermoTable};
use std::hint::black_box;
use std::path::Path;
use std::time::Duration;

fn synthetic_log(runs: usize, rows: usize) -> Vec<String> {
    let mut lines = vec!["LAMMPS (29 Oct 2020)".to_string(), "units real".to_string()];
    for _ in 0..runs {
        lines.push("Step Time Temp PotEng KinEng Press Volume".to_string());
        for i in 0..rows {
            let t = i as f64;
            lines.push(format!(
                "{} {} {} {} {} {} {}",
                i * 10,
                t * 0.01,
                300.0 + (t * 0.1).sin(),
                -5724.26 + (t * 0.05).cos(),
                2415.3,
                1.0 + (t * 0.3).sin() * 200.0,
                27000.0 - t * 0.001
            ));
        }
        lines.push("Loop time of 88.1203 on 1 procs".to_string());
    }
    lines
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("my_group");
    group.measurement_time(Duration::from_secs(6));

    let lines = synthetic_log(4, 20_000);
    let options = SectionOptions::default().skip_sections(3);
    group.bench_function("extract last section", |b| {
        b.iter(|| black_box(extract(&lines, &options).unwrap()))
    });

    let path = Path::new("./src/tests-data/log/multi_run.log");
    group.bench_function("load small log", |b| {
        b.iter(|| black_box(ThermoTable::open(path).unwrap()))
    });

    let (header, data) = extract(&lines, &options).unwrap();
    let table = ThermoTable::new(header, data).unwrap();
    group.bench_function("query time range", |b| {
        b.iter(|| {
            black_box(
                table
                    .query(&["Temp", "Press"], Some(Bounds::between(50.0, 150.0)), None)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

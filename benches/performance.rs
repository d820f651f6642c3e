use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pydeps::core::{CodebaseAnalyzer, EdgeAggregator, RelativeImportResolver};
use pydeps::parsers::python::PythonExtractor;
use pydeps::parsers::ImportExtractor;
use pydeps::AnalysisConfig;
use std::path::Path;

/// Letters-only suffix (`a`, `b`, ..., `ba`): import names cannot contain digits.
fn letters(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'a' + (index % 26) as u8);
        index /= 26;
        if index == 0 {
            break;
        }
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn write_package(root: &Path, packages: usize, modules: usize) {
    for p in 0..packages {
        let package_dir = root.join(format!("pkg_{}", letters(p)));
        std::fs::create_dir_all(&package_dir).unwrap();
        std::fs::write(package_dir.join("__init__.py"), "").unwrap();

        for m in 0..modules {
            let content = format!(
                r#"import os
import sys
import mod_{}
from pkg_{}.mod_{} import thing

class Component{}:
    def render(self):
        import json
        return json.dumps(self.__dict__)

def helper():
    from pkg_{} import mod_{}
    return mod_{}

if __name__ == '__main__':
    helper()
"#,
                letters((m + 1) % modules),
                letters((p + 1) % packages),
                letters(m),
                letters(m),
                letters(p),
                letters(m),
                letters(m)
            );
            let file = package_dir.join(format!("mod_{}.py", letters(m)));
            std::fs::write(file, content).unwrap();
        }
    }
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("codebase_analysis");

    let small = tempfile::TempDir::new().unwrap();
    write_package(small.path(), 2, 5);

    group.bench_function("small_codebase", |b| {
        let analyzer = CodebaseAnalyzer::new(AnalysisConfig::new()).unwrap();
        b.iter(|| black_box(analyzer.analyze(black_box(small.path())).unwrap()));
    });

    let large = tempfile::TempDir::new().unwrap();
    write_package(large.path(), 20, 25);

    group.bench_function("large_codebase", |b| {
        let analyzer = CodebaseAnalyzer::new(AnalysisConfig::new()).unwrap();
        b.iter(|| black_box(analyzer.analyze(black_box(large.path())).unwrap()));
    });

    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_stages");

    let source: String = (0..500)
        .map(|i| {
            let name = letters(i);
            format!("import mod_{name}\nif x:\n    from pkg import mod_{name}\n")
        })
        .collect();
    let extractor = PythonExtractor::new().unwrap();

    group.bench_function("extract_lines", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&source))));
    });

    let dir = tempfile::TempDir::new().unwrap();
    write_package(dir.path(), 10, 20);
    let catalog = CodebaseAnalyzer::new(AnalysisConfig::new())
        .unwrap()
        .analyze(dir.path())
        .unwrap()
        .catalog;

    group.bench_function("resolve_and_aggregate", |b| {
        let resolver = RelativeImportResolver::new();
        let aggregator = EdgeAggregator::new();
        b.iter(|| {
            let resolved = resolver.resolve(black_box(&catalog));
            black_box(aggregator.aggregate(&resolved))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis, benchmark_stages);
criterion_main!(benches);

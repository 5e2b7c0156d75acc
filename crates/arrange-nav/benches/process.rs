//! Benchmarks for navigation builds.

use std::fs;
use std::path::Path;

use arrange_meta::NavEntry;
use arrange_nav::{Options, build};
use arrange_storage::FsFiles;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Create a docs tree with specified depth and breadth.
///
/// Every directory gets an index page, a few numbered pages, and a `.pages`
/// file that reverses natural order and pins the index first.
fn create_docs(root: &Path, depth: usize, breadth: usize) {
    fn create_level(dir: &Path, current_depth: usize, max_depth: usize, breadth: usize) {
        if current_depth > max_depth {
            return;
        }

        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("index.md"),
            format!("# Level {current_depth}\n\nContent at depth {current_depth}."),
        )
        .unwrap();
        for i in 0..breadth {
            fs::write(dir.join(format!("page-{i}.md")), format!("# Page {i}\n")).unwrap();
        }
        fs::write(
            dir.join(".pages"),
            "order: desc\nsort_type: natural\nnav:\n  - index.md\n  - ...\n",
        )
        .unwrap();

        for i in 0..breadth {
            let child_dir = dir.join(format!("section-{i}"));
            create_level(&child_dir, current_depth + 1, max_depth, breadth);
        }
    }

    create_level(root, 0, depth, breadth);
}

fn bench_build(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let options = Options::default();

    let mut group = c.benchmark_group("build");

    for (depth, breadth) in [(2, 5), (3, 4), (4, 3)] {
        let source_dir = temp_dir.path().join(format!("docs_{depth}_{breadth}"));
        create_docs(&source_dir, depth, breadth);
        let files = FsFiles::scan(&source_dir, &options.filename).unwrap();

        group.bench_with_input(
            BenchmarkId::new("directory_tree", format!("d{depth}_b{breadth}")),
            &files,
            |b, files| b.iter(|| build(files, &options, None, &[]).unwrap()),
        );
    }

    group.finish();
}

fn bench_host_rest(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let source_dir = temp_dir.path().join("docs");
    create_docs(&source_dir, 3, 4);
    let options = Options::default();
    let files = FsFiles::scan(&source_dir, &options.filename).unwrap();
    let entries = NavEntry::list_from_yaml_str(
        "- index.md\n- ... | section-0/**\n- Flat: ['... | flat | **/page-1.md']\n- ...\n",
        "nav.yaml",
    )
    .unwrap();

    c.bench_function("build/host_rest", |b| {
        b.iter(|| build(&files, &options, Some(entries.clone()), &[]).unwrap());
    });
}

fn bench_title_order(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let source_dir = temp_dir.path().join("docs");
    create_docs(&source_dir, 3, 4);
    let options = Options {
        order_by: Some(arrange_meta::OrderBy::Title),
        ..Options::default()
    };
    let files = FsFiles::scan(&source_dir, &options.filename).unwrap();

    c.bench_function("build/order_by_title", |b| {
        b.iter(|| build(&files, &options, None, &[]).unwrap());
    });
}

criterion_group!(benches, bench_build, bench_host_rest, bench_title_order);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keepdrop::{BranchKey, BranchSelector, RuleList};

/// Build a rule list of `n` rules: a leading `drop *`, then alternating keeps
/// and drops on distinct module labels so every rule is scanned.
fn rule_lines(n: usize) -> Vec<String> {
    let mut lines = vec!["drop *".to_string()];
    for i in 1..n {
        let action = if i % 3 == 0 { "drop" } else { "keep" };
        lines.push(format!("{action} *_module{i}_*_*"));
    }
    lines
}

fn build_rules(n: usize) -> RuleList {
    RuleList::parse(rule_lines(n)).unwrap()
}

/// A universe of `n` branches spread across the module labels used above.
fn universe(n: usize) -> Vec<BranchKey> {
    (0..n)
        .map(|i| BranchKey::new("recoTracks", format!("module{}", i % 64), "", "RECO"))
        .collect()
}

fn bench_should_keep(c: &mut Criterion) {
    let mut group = c.benchmark_group("should_keep");
    let key = BranchKey::new("recoTracks", "module7", "", "RECO");

    for &n in &[5, 50, 500] {
        let rules = build_rules(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| rules.should_keep(black_box(&key)));
        });

        group.bench_function(&format!("{n}_rules_detailed"), |b| {
            b.iter(|| rules.evaluate_detailed(black_box(&key)));
        });
    }

    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");

    for &n in &[50, 500] {
        let rules = build_rules(n);
        let branches = universe(1_000);

        group.bench_function(&format!("{n}_rules_build_1000_branches"), |b| {
            b.iter(|| BranchSelector::new(rules.clone(), black_box(branches.clone())));
        });

        let selector = BranchSelector::new(rules.clone(), branches.clone());
        let key = &branches[7];
        group.bench_function(&format!("{n}_rules_lookup"), |b| {
            b.iter(|| selector.should_keep(black_box(key)));
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for &n in &[5, 50, 500] {
        let lines = rule_lines(n);
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| black_box(RuleList::parse(&lines).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_should_keep, bench_selector, bench_compilation);
criterion_main!(benches);

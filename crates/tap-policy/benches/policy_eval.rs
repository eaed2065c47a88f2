// SPDX-License-Identifier: MIT OR Apache-2.0
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tap_catalog::Catalog;
use tap_core::{PipelineStep, Policy, Section, Tool};
use tap_policy::run;

fn sample_catalog() -> Catalog {
    Catalog::new([
        Tool::core("read", "Read", "Read a file", Section::Files).with_profiles(["coding"]),
        Tool::core("write", "Write", "Write a file", Section::Files).with_profiles(["coding"]),
        Tool::core("exec", "Exec", "Run a command", Section::Runtime)
            .with_profiles(["coding"])
            .in_openclaw_group(),
        Tool::core("grep", "Grep", "Search files", Section::Files).with_profiles(["coding"]),
        Tool::core("glob", "Glob", "Find files", Section::Files).with_profiles(["coding"]),
        Tool::core("message", "Message", "Send a message", Section::Messaging)
            .with_profiles(["messaging"])
            .in_openclaw_group(),
        Tool::core("session_status", "Session Status", "Inspect session", Section::Sessions),
    ])
}

fn sample_tools() -> Vec<String> {
    vec![
        "read".into(),
        "write".into(),
        "exec".into(),
        "grep".into(),
        "glob".into(),
        "message".into(),
        "session_status".into(),
    ]
}

fn sample_steps() -> Vec<PipelineStep> {
    vec![
        PipelineStep::new(
            "tools.profile (coding)",
            Some(Policy::allow_only(["group:files", "exec"])),
        ),
        PipelineStep::new("tools.allow", Some(Policy::deny_only(["exec"]))),
        PipelineStep::empty("tools.byProvider.allow"),
    ]
}

fn bench_pipeline_run(c: &mut Criterion) {
    let catalog = sample_catalog();
    let steps = sample_steps();
    c.bench_function("pipeline/run", |b| {
        b.iter(|| {
            run(
                black_box(sample_tools()),
                black_box(&steps),
                |t| (t.clone(), None),
                None,
                &catalog,
            )
        })
    });
}

fn bench_filter(c: &mut Criterion) {
    let tools = sample_tools();
    let policy = Policy::allow_only(["read", "write", "exec", "grep", "glob"]);
    c.bench_function("filter/allow_deny", |b| {
        b.iter(|| tap_policy::filter(black_box(tools.clone()), &policy, |t| t.clone()))
    });
}

criterion_group!(benches, bench_pipeline_run, bench_filter);
criterion_main!(benches);

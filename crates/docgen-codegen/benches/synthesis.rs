//! Performance benchmarks for example synthesis and report emission.
//!
//! Tests synthesis cost across:
//! - Struct nesting depth (cold registry, nothing memoized yet)
//! - Interface size (full report, methods sharing struct types)
//!
//! Run with: cargo bench --package docgen-codegen

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use docgen_codegen::{ExampleRegistry, ReportEmitter, Synthesizer};
use docgen_core::{FieldDef, InterfaceDesc, MethodDesc, ParamDesc, StructTable, TypeDesc};
use docgen_introspector::MethodDocs;
use std::hint::black_box;

// ============================================================================
// Test Data Generators
// ============================================================================

/// Creates a chain of structs `Level0 -> Level1 -> ... -> Level{depth}`,
/// each carrying a few registered leaves and a list of the next level.
fn nested_structs(depth: usize) -> StructTable {
    let mut structs = StructTable::new();
    for level in 0..=depth {
        let mut fields = vec![
            FieldDef::exported("Cid", TypeDesc::named("Cid")),
            FieldDef::exported("Height", TypeDesc::named("ChainEpoch")),
            FieldDef::exported("Miner", TypeDesc::named("Address")),
            FieldDef::exported("Proof", TypeDesc::array(TypeDesc::named("u8"), 32)),
        ];
        if level < depth {
            fields.push(FieldDef::exported(
                "Children",
                TypeDesc::list(TypeDesc::structure(format!("Level{}", level + 1))),
            ));
        }
        structs.insert(format!("Level{level}"), fields);
    }
    structs
}

/// Creates an interface whose methods return pointers into the struct chain.
fn interface(methods: usize, depth: usize) -> InterfaceDesc {
    InterfaceDesc {
        name: "FullNode".to_string(),
        methods: (0..methods)
            .map(|i| MethodDesc {
                name: format!("method_{i:04}"),
                params: vec![
                    ParamDesc {
                        name: "ctx".to_string(),
                        ty: TypeDesc::named("Context"),
                    },
                    ParamDesc {
                        name: "tsk".to_string(),
                        ty: TypeDesc::named("TipSetKey"),
                    },
                ],
                returns: TypeDesc::pointer(TypeDesc::structure(format!(
                    "Level{}",
                    i % (depth + 1)
                ))),
            })
            .collect(),
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_struct_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_depth");

    for depth in [1, 4, 16, 64] {
        let structs = nested_structs(depth);
        group.throughput(Throughput::Elements(depth as u64 + 1));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let mut registry = ExampleRegistry::with_defaults();
                let mut synth = Synthesizer::new(&mut registry, &structs);
                black_box(synth.synthesize(&TypeDesc::structure("Level0")).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let depth = 8;
    let structs = nested_structs(depth);
    let docs = MethodDocs::new();
    let emitter = ReportEmitter::new().unwrap();

    for methods in [10, 100, 1000] {
        let iface = interface(methods, depth);
        group.throughput(Throughput::Elements(methods as u64));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &iface, |b, iface| {
            b.iter(|| {
                let mut registry = ExampleRegistry::with_defaults();
                let mut synth = Synthesizer::new(&mut registry, &structs);
                let mut out = Vec::with_capacity(methods * 512);
                black_box(emitter.run(iface, &docs, &mut synth, &mut out).unwrap())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark Configuration
// ============================================================================

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(std::time::Duration::from_secs(5));
    targets =
        bench_struct_depth,
        bench_report,
);

criterion_main!(benches);

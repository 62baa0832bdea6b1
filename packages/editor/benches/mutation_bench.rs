//! Mutation benchmarks
//!
//! Target: any single edit on a 1000-node page well under one frame (16ms)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{
    add_component, duplicate_component, locator, reparent_component, ComponentNode, Document,
    DocumentStore, EditorConfig, IdGenerator, ReorderDirection,
};

/// `sections` root sections, each with `rows` rows of `cells` cells
fn generate_page(sections: usize, rows: usize, cells: usize) -> Document {
    let mut components = Vec::new();
    for s in 0..sections {
        let mut section = ComponentNode::new(format!("s{}", s), "section");
        for r in 0..rows {
            let mut row = ComponentNode::new(format!("s{}r{}", s, r), "row");
            for c in 0..cells {
                row = row.with_child(
                    ComponentNode::new(format!("s{}r{}c{}", s, r, c), "text")
                        .with_prop("text", format!("Cell {}", c))
                        .with_style("padding", "4px"),
                );
            }
            section = section.with_child(row);
        }
        components.push(section);
    }
    Document::with_components(components)
}

fn find_deepest(c: &mut Criterion) {
    let page = generate_page(10, 10, 9);

    c.bench_function("find_last_node_1000", |b| {
        b.iter(|| locator::find(black_box(&page.components), black_box("s9r9c8")))
    });
}

fn add_and_reparent(c: &mut Criterion) {
    let page = generate_page(10, 10, 9);

    c.bench_function("add_component_1000", |b| {
        b.iter(|| add_component(&page, ComponentNode::new("new", "text"), Some("s5r5"), Some(0)))
    });

    c.bench_function("reparent_component_1000", |b| {
        b.iter(|| reparent_component(&page, "s0r0", Some("s9"), None))
    });
}

fn duplicate_section(c: &mut Criterion) {
    let page = generate_page(10, 10, 9);

    c.bench_function("duplicate_section_100_nodes", |b| {
        b.iter(|| {
            let mut ids = IdGenerator::from_seed("bench");
            duplicate_component(&page, "s3", &mut ids, 20.0)
        })
    });
}

fn store_with_history(c: &mut Criterion) {
    c.bench_function("store_reorder_with_full_history", |b| {
        let mut store = DocumentStore::with_document(EditorConfig::default(), generate_page(10, 10, 9))
            .expect("valid page");
        b.iter(|| store.reorder_component("s4", ReorderDirection::Top))
    });
}

criterion_group!(
    benches,
    find_deepest,
    add_and_reparent,
    duplicate_section,
    store_with_history
);
criterion_main!(benches);

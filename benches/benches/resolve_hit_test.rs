// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_drag_registry::{ScrollPosition, ViewFlags, ViewRegistry};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `lists` scrollable columns, each holding `rows` receptive rows; every
/// column also monitors.
fn gen_lists(lists: usize, rows: usize) -> (ViewRegistry<ViewFlags>, Vec<ScrollPosition>) {
    let mut reg = ViewRegistry::new();
    let mut scrolls = Vec::with_capacity(lists);
    for l in 0..lists {
        let list = format!("list{l}");
        let scroll = ScrollPosition::at(Vec2::new(0.0, 40.0));
        reg.register(list.as_str().into(), None, Some(scroll.clone()));
        reg.update_protocol(&list, ViewFlags::MONITORING | ViewFlags::RECEPTIVE);
        let x0 = l as f64 * 210.0;
        reg.update_measurements(&list, Some(Rect::new(x0, 0.0, x0 + 200.0, 800.0)));
        for r in 0..rows {
            let row = format!("{list}/row{r}");
            reg.register(row.as_str().into(), Some(list.as_str().into()), None);
            reg.update_protocol(&row, ViewFlags::RECEPTIVE | ViewFlags::DRAGGABLE);
            let y0 = r as f64 * 24.0;
            reg.update_measurements(&row, Some(Rect::new(0.0, y0, 200.0, y0 + 24.0)));
        }
        scrolls.push(scroll);
    }
    (reg, scrolls)
}

fn gen_chain(depth: usize) -> ViewRegistry<ViewFlags> {
    let mut reg = ViewRegistry::new();
    let mut parent: Option<String> = None;
    for d in 0..depth {
        let id = format!("n{d}");
        reg.register(
            id.as_str().into(),
            parent.as_deref().map(Into::into),
            Some(ScrollPosition::at(Vec2::new(0.0, 1.0))),
        );
        reg.update_measurements(&id, Some(Rect::new(1.0, 2.0, 1001.0, 1002.0)));
        parent = Some(id);
    }
    reg
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_absolute");
    for &depth in &[4usize, 16, 64] {
        let reg = gen_chain(depth);
        let leaf = format!("n{}", depth - 1);
        group.bench_function(format!("chain_depth{depth}"), |b| {
            b.iter(|| black_box(reg.resolve_absolute(black_box(&leaf), false)));
        });
        group.bench_function(format!("chain_depth{depth}_clipped"), |b| {
            b.iter(|| black_box(reg.resolve_absolute(black_box(&leaf), true)));
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_monitors_and_receiver");
    for &(lists, rows) in &[(4usize, 32usize), (8, 128), (16, 256)] {
        let (reg, _scrolls) = gen_lists(lists, rows);
        let mut rng = Rng::new(0xD1A6_D20B_0000_0001);
        let points: Vec<Point> = (0..256)
            .map(|_| Point::new(rng.next_f64() * lists as f64 * 210.0, rng.next_f64() * 800.0))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("lists{lists}_rows{rows}"), |b| {
            b.iter(|| {
                let mut found = 0_usize;
                for p in &points {
                    let hits = reg.find_monitors_and_receiver(*p, Some("list0/row0"));
                    found += hits.monitors.len() + usize::from(hits.receiver.is_some());
                }
                black_box(found)
            });
        });
    }
    group.finish();
}

fn bench_scrolled_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrolled_hit_test");
    let (reg, scrolls) = gen_lists(8, 128);
    group.bench_function("scroll_then_hit", |b| {
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 7.0) % 2000.0;
            for s in &scrolls {
                s.set(Vec2::new(0.0, offset));
            }
            black_box(reg.find_monitors_and_receiver(Point::new(300.0, 400.0), None))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_hit_test, bench_scrolled_hit_test);
criterion_main!(benches);

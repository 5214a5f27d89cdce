use std::collections::HashSet;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use radnetz::core::{Bereich, Kante, Polylinie};
use radnetz::sackgassen::bestimme_sackgassen;
use radnetz::strecken::{erstelle_strecken_einer_partition, verschmelze_unvollstaendige_strecken};

/// Gitternetz mit `seite` x `seite` Knoten und allen horizontalen und
/// vertikalen Kanten; lange Ketten entstehen durch ausgedünnte Zeilen.
fn gitter_kanten(seite: usize) -> Vec<Kante> {
    let knoten_id = |x: usize, y: usize| (y * seite + x) as u64 + 1;
    let position = |x: usize, y: usize| Vec2::new(x as f32 * 50.0, y as f32 * 50.0);

    let mut kanten = Vec::new();
    let mut naechste_id = 1u64;
    for y in 0..seite {
        for x in 0..seite {
            if x + 1 < seite && y % 3 == 0 {
                kanten.push(Kante::neu(
                    naechste_id,
                    knoten_id(x, y),
                    knoten_id(x + 1, y),
                    Polylinie::neu(vec![position(x, y), position(x + 1, y)]),
                ));
                naechste_id += 1;
            }
            if y + 1 < seite {
                kanten.push(Kante::neu(
                    naechste_id,
                    knoten_id(x, y),
                    knoten_id(x, y + 1),
                    Polylinie::neu(vec![position(x, y), position(x, y + 1)]),
                ));
                naechste_id += 1;
            }
        }
    }
    kanten
}

fn partitionen(seite: usize, spalten: usize) -> Vec<Bereich> {
    let breite = seite as f32 * 50.0;
    let schritt = breite / spalten as f32;
    (0..spalten)
        .map(|i| {
            Bereich::neu(
                Vec2::new(i as f32 * schritt - 1.0, -1.0),
                Vec2::new((i + 1) as f32 * schritt + 1.0, breite + 1.0),
            )
        })
        .collect()
}

fn bench_streckenbildung(c: &mut Criterion) {
    let mut group = c.benchmark_group("streckenbildung");

    for &seite in &[20usize, 50] {
        let kanten = gitter_kanten(seite);
        let bereiche = partitionen(seite, 4);

        group.bench_with_input(
            BenchmarkId::new("partitionen_und_verschmelzung", seite),
            &kanten,
            |b, kanten| {
                b.iter(|| {
                    let mut verarbeitet = HashSet::new();
                    let mut offene = Vec::new();
                    let mut vollstaendig = 0usize;
                    for bereich in &bereiche {
                        for strecke in erstelle_strecken_einer_partition(
                            black_box(kanten),
                            bereich,
                            &mut verarbeitet,
                        ) {
                            if strecke.ist_vollstaendig() {
                                vollstaendig += 1;
                            } else {
                                offene.push(strecke);
                            }
                        }
                    }
                    let ergebnis = verschmelze_unvollstaendige_strecken(offene);
                    black_box(vollstaendig + ergebnis.vollstaendig.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_sackgassen(c: &mut Criterion) {
    let mut group = c.benchmark_group("sackgassen");

    for &seite in &[20usize, 50] {
        let kanten = gitter_kanten(seite);

        group.bench_with_input(BenchmarkId::new("gitter", seite), &kanten, |b, kanten| {
            b.iter(|| black_box(bestimme_sackgassen(black_box(kanten).iter())).len())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_streckenbildung, bench_sackgassen);
criterion_main!(benches);

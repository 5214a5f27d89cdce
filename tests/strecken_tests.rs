//! Integrationstests für die Streckenbildung über Partitionen hinweg
//! und die Sackgassen-Erkennung.

use std::collections::{BTreeSet, HashSet};

use glam::Vec2;
use radnetz::core::{Bereich, Kante, Netzklasse, Polylinie};
use radnetz::sackgassen::bestimme_sackgassen;
use radnetz::strecken::{
    erstelle_strecken_einer_partition, verschmelze_unvollstaendige_strecken, StreckeVonKanten,
};

fn kante(id: u64, von: u64, nach: u64) -> Kante {
    Kante::neu(
        id,
        von,
        nach,
        Polylinie::neu(vec![
            Vec2::new(von as f32 * 10.0, 0.0),
            Vec2::new(nach as f32 * 10.0, 0.0),
        ]),
    )
}

fn kante_mit_klasse(id: u64, von: u64, nach: u64, klasse: Netzklasse) -> Kante {
    let mut kante = kante(id, von, nach);
    kante.kanten_attribut_gruppe.netzklassen = BTreeSet::from([klasse]);
    kante
}

/// Baut Strecken über mehrere Partitionen und verschmilzt die Reste.
fn strecken_ueber_partitionen(
    kanten: &[Kante],
    partitionen: &[Bereich],
) -> (Vec<StreckeVonKanten>, Vec<StreckeVonKanten>) {
    let mut verarbeitet = HashSet::new();
    let mut vollstaendig = Vec::new();
    let mut offene = Vec::new();

    for partition in partitionen {
        for strecke in erstelle_strecken_einer_partition(kanten, partition, &mut verarbeitet) {
            if strecke.ist_vollstaendig() {
                vollstaendig.push(strecke);
            } else {
                offene.push(strecke);
            }
        }
    }

    let ergebnis = verschmelze_unvollstaendige_strecken(offene);
    vollstaendig.extend(ergebnis.vollstaendig);
    (vollstaendig, ergebnis.unvollstaendig)
}

#[test]
fn kette_ueber_partitionsgrenze_wird_vollstaendig() {
    // Kette 1-2-3-4-5, geschnitten von zwei Partitionen
    let kanten = vec![kante(1, 1, 2), kante(2, 2, 3), kante(3, 3, 4), kante(4, 4, 5)];
    let partitionen = [
        Bereich::neu(Vec2::new(0.0, -10.0), Vec2::new(25.0, 10.0)),
        Bereich::neu(Vec2::new(25.0, -10.0), Vec2::new(100.0, 10.0)),
    ];

    let (vollstaendig, unvollstaendig) = strecken_ueber_partitionen(&kanten, &partitionen);

    assert!(unvollstaendig.is_empty());
    assert_eq!(vollstaendig.len(), 1);
    let strecke = &vollstaendig[0];
    assert_eq!(strecke.kanten().len(), 4);
    let enden = [strecke.von_knoten(), strecke.nach_knoten()];
    assert!(enden.contains(&1) && enden.contains(&5));
}

#[test]
fn jede_kante_liegt_in_genau_einer_strecke() {
    // T-förmiges Netz: 1-2-3-4 mit Abzweig 3-5
    let kanten = vec![kante(1, 1, 2), kante(2, 2, 3), kante(3, 3, 4), kante(4, 3, 5)];
    let partitionen = [
        Bereich::neu(Vec2::new(0.0, -10.0), Vec2::new(22.0, 10.0)),
        Bereich::neu(Vec2::new(22.0, -10.0), Vec2::new(100.0, 10.0)),
    ];

    let (vollstaendig, unvollstaendig) = strecken_ueber_partitionen(&kanten, &partitionen);

    let mut alle_ids: Vec<u64> = vollstaendig
        .iter()
        .chain(unvollstaendig.iter())
        .flat_map(|s| s.kanten_ids())
        .collect();
    alle_ids.sort_unstable();
    assert_eq!(alle_ids, vec![1, 2, 3, 4]);
}

#[test]
fn netzklassen_grenze_trennt_strecken() {
    // 1-2 RadNETZ, 2-3 Kommunalnetz: Knoten 2 hat Grad 2, trennt aber fachlich
    let kanten = vec![
        kante_mit_klasse(1, 1, 2, Netzklasse::RadnetzAlltag),
        kante_mit_klasse(2, 2, 3, Netzklasse::KommunalnetzAlltag),
    ];
    let partitionen = [Bereich::neu(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0))];

    let (vollstaendig, unvollstaendig) = strecken_ueber_partitionen(&kanten, &partitionen);

    assert!(unvollstaendig.is_empty());
    assert_eq!(vollstaendig.len(), 2);
    assert!(vollstaendig.iter().all(|s| s.kanten().len() == 1));
}

#[test]
fn strecken_und_sackgassen_stimmen_ueberein() {
    // Kette A(1)-B(2)-C(3)-D(4): die Streckenenden sind genau die Sackgassen
    let kanten = vec![kante(1, 1, 2), kante(2, 2, 3), kante(3, 3, 4)];
    let partitionen = [Bereich::neu(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0))];

    let (vollstaendig, _) = strecken_ueber_partitionen(&kanten, &partitionen);
    let sackgassen = bestimme_sackgassen(kanten.iter());

    assert_eq!(sackgassen, HashSet::from([1, 4]));
    let strecke = &vollstaendig[0];
    assert!(sackgassen.contains(&strecke.von_knoten()));
    assert!(sackgassen.contains(&strecke.nach_knoten()));
}

#[test]
fn doppeltes_umdrehen_ist_identitaet() {
    let mut strecke = StreckeVonKanten::neu((&kante(1, 1, 2)).into(), true, false);
    assert!(strecke.fuege_hinzu((&kante(2, 2, 3)).into(), true));
    let original = strecke.clone();
    strecke.umdrehen();
    strecke.umdrehen();
    assert_eq!(strecke, original);
}

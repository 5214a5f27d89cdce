//! Sackgassen-Erkennung: Knoten, an denen ein Teilnetz endet.
//!
//! Eine Sackgasse ist ein Knoten mit Grad 0 oder 1 im betrachteten
//! Teilnetz. Schleifenkanten zählen an ihrem Knoten doppelt und bilden
//! daher nie eine Sackgasse.

use std::collections::{BTreeSet, HashMap, HashSet};

use glam::Vec2;

use crate::core::{Kante, Netz, Netzklasse, Polygon};

/// Sackgassen-Knoten einer Kantenmenge.
pub fn bestimme_sackgassen<'a>(kanten: impl IntoIterator<Item = &'a Kante>) -> HashSet<u64> {
    let mut grad: HashMap<u64, usize> = HashMap::new();
    for kante in kanten {
        *grad.entry(kante.von_knoten).or_default() += 1;
        *grad.entry(kante.nach_knoten).or_default() += 1;
    }
    grad.into_iter()
        .filter(|&(_, g)| g <= 1)
        .map(|(id, _)| id)
        .collect()
}

/// Sackgassen innerhalb einer Verwaltungsgrenze.
///
/// Knoten ohne bekannte Position und Aufrufe ohne Grenzpolygon liefern
/// keine Treffer: ohne Gebietszuschnitt ist keine Aussage möglich.
pub fn bestimme_sackgassen_in_grenze<'a>(
    kanten: impl IntoIterator<Item = &'a Kante>,
    knoten_positionen: &HashMap<u64, Vec2>,
    grenze: Option<&Polygon>,
) -> HashSet<u64> {
    let Some(grenze) = grenze else {
        return HashSet::new();
    };
    bestimme_sackgassen(kanten)
        .into_iter()
        .filter(|id| {
            knoten_positionen
                .get(id)
                .is_some_and(|&position| grenze.enthaelt(position))
        })
        .collect()
}

/// Sackgassen des Teilnetzes aller Kanten mit mindestens einer der
/// angegebenen Netzklassen.
pub fn bestimme_sackgassen_fuer_netzklassen(
    netz: &Netz,
    netzklassen: &BTreeSet<Netzklasse>,
) -> HashSet<u64> {
    let (kanten, _) = netz.kanten_mit_netzklassen(netzklassen);
    bestimme_sackgassen(kanten.into_iter())
}

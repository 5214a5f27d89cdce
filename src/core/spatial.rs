//! KD-Tree über die Knotenpositionen des Netzes.
//!
//! Zwei Abnehmer: die Netzbezug-Kaskade sucht nach einer Knotenlöschung
//! Ersatzknoten im Umkreis, die Streckenbildung und Bereichs-Queries
//! fragen Knoten je Partitions-Kachel ab.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::geometrie::Bereich;
use crate::core::Knoten;

/// Knoten-Fund einer Umkreissuche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotenTreffer {
    /// ID des gefundenen Knotens
    pub knoten_id: u64,
    /// Euklidische Distanz zum Suchpunkt
    pub distanz: f32,
}

/// Unveränderlicher Index über die Knoten eines Netzstands; wird nach
/// jeder Knotenmutation neu aufgebaut.
#[derive(Debug, Clone)]
pub struct KnotenIndex {
    tree: KdTree<f64, 2>,
    /// Tree-Items sind Indizes in diese nach ID sortierte Liste
    eintraege: Vec<(u64, Vec2)>,
}

impl KnotenIndex {
    /// Index ohne Knoten.
    pub fn leer() -> Self {
        Self {
            tree: KdTree::new(),
            eintraege: Vec::new(),
        }
    }

    /// Indexiert die übergebenen Knoten.
    pub fn aus_knoten<'a>(knoten: impl IntoIterator<Item = &'a Knoten>) -> Self {
        let mut eintraege: Vec<(u64, Vec2)> =
            knoten.into_iter().map(|k| (k.id, k.position)).collect();
        eintraege.sort_unstable_by_key(|(id, _)| *id);

        let mut tree = KdTree::new();
        for (idx, (_, position)) in eintraege.iter().enumerate() {
            tree.add(&[position.x as f64, position.y as f64], idx as u64);
        }
        Self { tree, eintraege }
    }

    /// Anzahl indexierter Knoten.
    pub fn anzahl(&self) -> usize {
        self.eintraege.len()
    }

    /// Alle Knoten im Umkreis um `position`, nächster zuerst.
    pub fn im_umkreis(&self, position: Vec2, radius: f32) -> Vec<KnotenTreffer> {
        if self.eintraege.is_empty() || radius < 0.0 {
            return Vec::new();
        }

        let quadriert = (radius as f64) * (radius as f64);
        let mut treffer: Vec<KnotenTreffer> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(
                &[position.x as f64, position.y as f64],
                quadriert,
            )
            .into_iter()
            .filter_map(|nachbar| {
                let (knoten_id, _) = *self.eintraege.get(nachbar.item as usize)?;
                Some(KnotenTreffer {
                    knoten_id,
                    distanz: (nachbar.distance as f32).sqrt(),
                })
            })
            .collect();

        treffer.sort_by(|a, b| a.distanz.total_cmp(&b.distanz));
        treffer
    }

    /// IDs aller Knoten im Bereich. Vorfilter über den Umkreis der
    /// Bereichsdiagonale, danach exakte Rechteckprüfung.
    pub fn im_bereich(&self, bereich: &Bereich) -> Vec<u64> {
        if self.eintraege.is_empty() {
            return Vec::new();
        }

        let mitte = (bereich.min + bereich.max) * 0.5;
        let halbdiagonale = (bereich.max - bereich.min) * 0.5;

        self.tree
            .within_unsorted::<SquaredEuclidean>(
                &[mitte.x as f64, mitte.y as f64],
                halbdiagonale.length_squared() as f64,
            )
            .into_iter()
            .filter_map(|nachbar| {
                let (knoten_id, position) = *self.eintraege.get(nachbar.item as usize)?;
                bereich.enthaelt(position).then_some(knoten_id)
            })
            .collect()
    }
}

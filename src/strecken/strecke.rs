//! Strecken: maximale Ketten von Kanten gleicher Netzklassen zwischen
//! Knoten vom Grad ungleich 2.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{Kante, Netzklasse, Polylinie};

/// Eine Kante innerhalb einer Strecke, in Laufrichtung der Strecke
/// orientiert: `von_knoten` ist der streckenseitig frühere Knoten,
/// die Geometrie läuft von `von_knoten` nach `nach_knoten`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreckenKante {
    pub kante_id: u64,
    pub von_knoten: u64,
    pub nach_knoten: u64,
    pub geometrie: Polylinie,
    pub netzklassen: BTreeSet<Netzklasse>,
}

impl StreckenKante {
    /// Dreht die Laufrichtung der Kante innerhalb der Strecke um.
    fn umgedreht(&self) -> Self {
        Self {
            kante_id: self.kante_id,
            von_knoten: self.nach_knoten,
            nach_knoten: self.von_knoten,
            geometrie: self.geometrie.umgekehrt(),
            netzklassen: self.netzklassen.clone(),
        }
    }
}

impl From<&Kante> for StreckenKante {
    fn from(kante: &Kante) -> Self {
        Self {
            kante_id: kante.id,
            von_knoten: kante.von_knoten,
            nach_knoten: kante.nach_knoten,
            geometrie: kante.geometrie.clone(),
            netzklassen: kante.kanten_attribut_gruppe.netzklassen.clone(),
        }
    }
}

/// Eine (möglicherweise noch unvollständige) Strecke.
///
/// Vollständig ist eine Strecke erst, wenn beide Enden als Endpunkte
/// markiert sind: entweder weil dort ein Knoten vom Grad ungleich 2
/// liegt, oder weil sie dort künstlich gekappt wurde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreckeVonKanten {
    kanten: Vec<StreckenKante>,
    von_knoten: u64,
    nach_knoten: u64,
    von_knoten_endpunkt: bool,
    nach_knoten_endpunkt: bool,
}

impl StreckeVonKanten {
    pub fn neu(kante: StreckenKante, von_endpunkt: bool, nach_endpunkt: bool) -> Self {
        Self {
            von_knoten: kante.von_knoten,
            nach_knoten: kante.nach_knoten,
            kanten: vec![kante],
            von_knoten_endpunkt: von_endpunkt,
            nach_knoten_endpunkt: nach_endpunkt,
        }
    }

    pub fn kanten(&self) -> &[StreckenKante] {
        &self.kanten
    }

    pub fn kanten_ids(&self) -> Vec<u64> {
        self.kanten.iter().map(|k| k.kante_id).collect()
    }

    pub fn von_knoten(&self) -> u64 {
        self.von_knoten
    }

    pub fn nach_knoten(&self) -> u64 {
        self.nach_knoten
    }

    pub fn von_knoten_endpunkt(&self) -> bool {
        self.von_knoten_endpunkt
    }

    pub fn nach_knoten_endpunkt(&self) -> bool {
        self.nach_knoten_endpunkt
    }

    /// Netzklassen der Strecke (alle Kanten tragen dieselben).
    pub fn netzklassen(&self) -> &BTreeSet<Netzklasse> {
        &self.kanten[0].netzklassen
    }

    pub fn laenge(&self) -> f32 {
        self.kanten.iter().map(|k| k.geometrie.laenge()).sum()
    }

    pub fn ist_vollstaendig(&self) -> bool {
        self.von_knoten_endpunkt && self.nach_knoten_endpunkt
    }

    /// Klassenbildendes Kriterium: eine Kante passt an die Strecke,
    /// wenn ihre Netzklassen-Menge exakt übereinstimmt.
    pub fn passt_an_strecke_ran(&self, kante: &StreckenKante) -> bool {
        *self.netzklassen() == kante.netzklassen
    }

    /// Hängt eine Kante an das passende Ende an und orientiert sie in
    /// Laufrichtung der Strecke. `false`, wenn die Kante an keinem der
    /// beiden Enden anschließt.
    pub fn fuege_hinzu(&mut self, kante: StreckenKante, fernes_ende_endpunkt: bool) -> bool {
        if kante.von_knoten == self.nach_knoten {
            self.nach_knoten = kante.nach_knoten;
            self.kanten.push(kante);
            self.nach_knoten_endpunkt = fernes_ende_endpunkt;
        } else if kante.nach_knoten == self.nach_knoten {
            let gedreht = kante.umgedreht();
            self.nach_knoten = gedreht.nach_knoten;
            self.kanten.push(gedreht);
            self.nach_knoten_endpunkt = fernes_ende_endpunkt;
        } else if kante.nach_knoten == self.von_knoten {
            self.von_knoten = kante.von_knoten;
            self.kanten.insert(0, kante);
            self.von_knoten_endpunkt = fernes_ende_endpunkt;
        } else if kante.von_knoten == self.von_knoten {
            let gedreht = kante.umgedreht();
            self.von_knoten = gedreht.von_knoten;
            self.kanten.insert(0, gedreht);
            self.von_knoten_endpunkt = fernes_ende_endpunkt;
        } else {
            return false;
        }
        true
    }

    /// Markiert das Ende am gegebenen Knoten als Endpunkt (künstliche
    /// Kappung oder nachträglich erkannter Grad-ungleich-2-Knoten).
    pub fn markiere_endpunkt_an(&mut self, knoten_id: u64) {
        if self.von_knoten == knoten_id {
            self.von_knoten_endpunkt = true;
        }
        if self.nach_knoten == knoten_id {
            self.nach_knoten_endpunkt = true;
        }
    }

    /// Dreht die gesamte Strecke um.
    pub fn umdrehen(&mut self) {
        self.kanten.reverse();
        for kante in &mut self.kanten {
            *kante = kante.umgedreht();
        }
        std::mem::swap(&mut self.von_knoten, &mut self.nach_knoten);
        std::mem::swap(
            &mut self.von_knoten_endpunkt,
            &mut self.nach_knoten_endpunkt,
        );
    }

    /// Verschmilzt eine andere Strecke, die an einem Ende anschließt.
    /// `false`, wenn kein gemeinsames Ende existiert.
    pub fn verschmelze(&mut self, mut andere: StreckeVonKanten) -> bool {
        if andere.von_knoten == self.nach_knoten {
            // passt bereits
        } else if andere.nach_knoten == self.nach_knoten {
            andere.umdrehen();
        } else if andere.nach_knoten == self.von_knoten {
            self.umdrehen();
            andere.umdrehen();
        } else if andere.von_knoten == self.von_knoten {
            self.umdrehen();
        } else {
            return false;
        }
        debug_assert_eq!(andere.von_knoten, self.nach_knoten);

        self.nach_knoten = andere.nach_knoten;
        self.nach_knoten_endpunkt = andere.nach_knoten_endpunkt;
        self.kanten.append(&mut andere.kanten);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn strecken_kante(id: u64, von: u64, nach: u64) -> StreckenKante {
        StreckenKante {
            kante_id: id,
            von_knoten: von,
            nach_knoten: nach,
            geometrie: Polylinie::neu(vec![
                Vec2::new(von as f32 * 10.0, 0.0),
                Vec2::new(nach as f32 * 10.0, 0.0),
            ]),
            netzklassen: BTreeSet::new(),
        }
    }

    #[test]
    fn fuege_hinzu_orientiert_die_kante() {
        let mut strecke = StreckeVonKanten::neu(strecken_kante(1, 10, 11), true, false);
        // Kante 2 läuft 12 -> 11, muss für die Strecke gedreht werden
        assert!(strecke.fuege_hinzu(strecken_kante(2, 12, 11), true));
        assert_eq!(strecke.nach_knoten(), 12);
        assert_eq!(strecke.kanten()[1].von_knoten, 11);
        assert!(strecke.ist_vollstaendig());
    }

    #[test]
    fn fuege_hinzu_am_anfang() {
        let mut strecke = StreckeVonKanten::neu(strecken_kante(1, 10, 11), false, true);
        assert!(strecke.fuege_hinzu(strecken_kante(2, 9, 10), true));
        assert_eq!(strecke.von_knoten(), 9);
        assert_eq!(strecke.kanten()[0].kante_id, 2);
    }

    #[test]
    fn nicht_anschliessende_kante_wird_abgelehnt() {
        let mut strecke = StreckeVonKanten::neu(strecken_kante(1, 10, 11), true, true);
        assert!(!strecke.fuege_hinzu(strecken_kante(2, 20, 21), true));
    }

    #[test]
    fn umdrehen_ist_involutiv() {
        let mut strecke = StreckeVonKanten::neu(strecken_kante(1, 10, 11), true, false);
        strecke.fuege_hinzu(strecken_kante(2, 11, 12), false);
        let original = strecke.clone();
        strecke.umdrehen();
        assert_eq!(strecke.von_knoten(), 12);
        assert_eq!(strecke.nach_knoten(), 10);
        strecke.umdrehen();
        assert_eq!(strecke, original);
    }

    #[test]
    fn verschmelze_haengt_ketten_zusammen() {
        let mut links = StreckeVonKanten::neu(strecken_kante(1, 10, 11), true, false);
        let rechts = StreckeVonKanten::neu(strecken_kante(2, 11, 12), false, true);
        assert!(links.verschmelze(rechts));
        assert_eq!(links.von_knoten(), 10);
        assert_eq!(links.nach_knoten(), 12);
        assert_eq!(links.kanten_ids(), vec![1, 2]);
        assert!(links.ist_vollstaendig());
    }

    #[test]
    fn verschmelze_dreht_gegenlaeufige_strecke() {
        let mut links = StreckeVonKanten::neu(strecken_kante(1, 10, 11), true, false);
        // andere läuft 12 -> 11, schließt also mit ihrem nach-Ende an
        let rechts = StreckeVonKanten::neu(strecken_kante(2, 12, 11), true, false);
        assert!(links.verschmelze(rechts));
        assert_eq!(links.nach_knoten(), 12);
        assert!(links.ist_vollstaendig());
    }
}

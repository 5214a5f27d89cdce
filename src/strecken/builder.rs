//! Streckenbildung über räumliche Partitionen.
//!
//! Das Netz wird partitionsweise verarbeitet: innerhalb einer Partition
//! werden Ketten soweit möglich zusammengesetzt, an Partitionsgrenzen
//! entstehen unvollständige Strecken, die ein zweiter Schritt über alle
//! Partitionen hinweg verschmilzt. Der Knotengrad wird dabei stets über
//! den gesamten Kontext bestimmt, nicht nur über die Partition.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::core::{Bereich, Kante, Polylinie};
use crate::strecken::strecke::{StreckeVonKanten, StreckenKante};

/// Ergebnis der Streckenverschmelzung.
#[derive(Debug, Clone, Default)]
pub struct StreckenErgebnis {
    /// Beidseitig an Endpunkten abgeschlossene Strecken
    pub vollstaendig: Vec<StreckeVonKanten>,
    /// Strecken mit mindestens einem offenen Ende
    pub unvollstaendig: Vec<StreckeVonKanten>,
}

/// Baut die Strecken einer Partition auf.
///
/// `kanten_im_kontext` umfasst auch Kanten außerhalb der Partition,
/// damit der Knotengrad global stimmt; verkettet werden nur Kanten,
/// deren Geometrie die Partition schneidet. Bereits verarbeitete Kanten
/// werden übersprungen und neu aufgenommene in `verarbeitet` vermerkt.
pub fn erstelle_strecken_einer_partition(
    kanten_im_kontext: &[Kante],
    partition: &Bereich,
    verarbeitet: &mut HashSet<u64>,
) -> Vec<StreckeVonKanten> {
    let grad = knotengrad(kanten_im_kontext);

    let partition_kanten: Vec<&Kante> = kanten_im_kontext
        .iter()
        .filter(|k| partition.schneidet(&k.geometrie))
        .collect();

    let mut adjazenz: HashMap<u64, Vec<usize>> = HashMap::new();
    for (i, kante) in partition_kanten.iter().enumerate() {
        adjazenz.entry(kante.von_knoten).or_default().push(i);
        if kante.nach_knoten != kante.von_knoten {
            adjazenz.entry(kante.nach_knoten).or_default().push(i);
        }
    }

    let ist_endpunkt = |knoten: u64| grad.get(&knoten).copied().unwrap_or(0) != 2;

    let mut strecken = Vec::new();
    for kante in &partition_kanten {
        if verarbeitet.contains(&kante.id) {
            continue;
        }
        verarbeitet.insert(kante.id);

        let strecken_kante = StreckenKante::from(*kante);
        if kante.von_knoten == kante.nach_knoten {
            // Schleifenkante: in sich geschlossen, nie verlängerbar
            strecken.push(StreckeVonKanten::neu(strecken_kante, true, true));
            continue;
        }

        let mut strecke = StreckeVonKanten::neu(
            strecken_kante,
            ist_endpunkt(kante.von_knoten),
            ist_endpunkt(kante.nach_knoten),
        );

        verlaengere(
            &mut strecke,
            &partition_kanten,
            &adjazenz,
            verarbeitet,
            &ist_endpunkt,
            true,
        );
        verlaengere(
            &mut strecke,
            &partition_kanten,
            &adjazenz,
            verarbeitet,
            &ist_endpunkt,
            false,
        );

        strecken.push(strecke);
    }

    debug!(
        "Partition: {} Strecken aus {} Kanten gebildet",
        strecken.len(),
        partition_kanten.len()
    );
    strecken
}

/// Verlängert eine Strecke an einem Ende bis zum nächsten Endpunkt
/// oder bis zum Rand der Partition.
fn verlaengere(
    strecke: &mut StreckeVonKanten,
    partition_kanten: &[&Kante],
    adjazenz: &HashMap<u64, Vec<usize>>,
    verarbeitet: &mut HashSet<u64>,
    ist_endpunkt: &dyn Fn(u64) -> bool,
    am_nach_ende: bool,
) {
    loop {
        let (terminal, abgeschlossen) = if am_nach_ende {
            (strecke.nach_knoten(), strecke.nach_knoten_endpunkt())
        } else {
            (strecke.von_knoten(), strecke.von_knoten_endpunkt())
        };
        if abgeschlossen {
            return;
        }

        let eigene = strecke.kanten_ids();
        let kandidat = adjazenz
            .get(&terminal)
            .into_iter()
            .flatten()
            .map(|&i| partition_kanten[i])
            .find(|k| !eigene.contains(&k.id));

        let kandidat = match kandidat {
            // Partitionsgrenze: Ende bleibt offen für die Verschmelzung
            None => return,
            Some(k) => k,
        };

        let strecken_kante = StreckenKante::from(kandidat);
        if !strecke.passt_an_strecke_ran(&strecken_kante) {
            // Netzklassen-Grenze: künstlicher Endpunkt
            strecke.markiere_endpunkt_an(terminal);
            return;
        }
        if verarbeitet.contains(&kandidat.id) {
            // Gehört bereits zu einer anderen Teilstrecke; die
            // Verschmelzung führt beide später zusammen
            return;
        }

        let fernes_ende = kandidat
            .andere_knoten(terminal)
            .unwrap_or(terminal);
        verarbeitet.insert(kandidat.id);
        strecke.fuege_hinzu(strecken_kante, ist_endpunkt(fernes_ende));
    }
}

/// Verschmilzt die an Partitionsgrenzen offen gebliebenen Strecken.
///
/// Ein Worklist-Durchlauf über die offenen Knoten genügt: nach jeder
/// Verschmelzung wird nur der neu entstandene offene Knoten erneut
/// eingereiht. Strecken mit danach noch offenen Enden (z.B. weil das
/// Gegenstück in keinem Kontext lag) bleiben unvollständig.
pub fn verschmelze_unvollstaendige_strecken(strecken: Vec<StreckeVonKanten>) -> StreckenErgebnis {
    let mut slots: Vec<Option<StreckeVonKanten>> = strecken.into_iter().map(Some).collect();

    let mut offene: HashMap<u64, Vec<usize>> = HashMap::new();
    for (i, slot) in slots.iter().enumerate() {
        if let Some(strecke) = slot {
            if !strecke.von_knoten_endpunkt() {
                offene.entry(strecke.von_knoten()).or_default().push(i);
            }
            if !strecke.nach_knoten_endpunkt() {
                offene.entry(strecke.nach_knoten()).or_default().push(i);
            }
        }
    }

    let mut worklist: VecDeque<u64> = offene.keys().copied().collect();
    while let Some(knoten) = worklist.pop_front() {
        let kandidaten: Vec<usize> = offene
            .get(&knoten)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&i| {
                slots[i].as_ref().is_some_and(|s| {
                    (s.von_knoten() == knoten && !s.von_knoten_endpunkt())
                        || (s.nach_knoten() == knoten && !s.nach_knoten_endpunkt())
                })
            })
            .collect();

        let [a, b] = kandidaten[..] else { continue };
        if a == b {
            // Ringschluss: beide offenen Enden derselben Strecke
            if let Some(strecke) = slots[a].as_mut() {
                strecke.markiere_endpunkt_an(knoten);
            }
            continue;
        }

        let Some(andere) = slots[b].take() else { continue };
        let eigene = match slots[a].as_mut() {
            Some(s) => s,
            None => {
                slots[b] = Some(andere);
                continue;
            }
        };

        if !eigene.passt_an_strecke_ran(&andere.kanten()[0]) {
            eigene.markiere_endpunkt_an(knoten);
            let mut andere = andere;
            andere.markiere_endpunkt_an(knoten);
            slots[b] = Some(andere);
            continue;
        }

        let fernes_ende = if andere.von_knoten() == knoten {
            andere.nach_knoten()
        } else {
            andere.von_knoten()
        };
        if eigene.verschmelze(andere) {
            offene.entry(fernes_ende).or_default().push(a);
            worklist.push_back(fernes_ende);
        }
    }

    let mut ergebnis = StreckenErgebnis::default();
    for strecke in slots.into_iter().flatten() {
        if strecke.ist_vollstaendig() {
            ergebnis.vollstaendig.push(strecke);
        } else {
            ergebnis.unvollstaendig.push(strecke);
        }
    }
    debug!(
        "Streckenverschmelzung: {} vollständig, {} unvollständig",
        ergebnis.vollstaendig.len(),
        ergebnis.unvollstaendig.len()
    );
    ergebnis
}

/// Zerlegt eine Referenzgeometrie an den projizierten Knoten einer
/// Strecke in Teil-LineStrings, je einen pro Streckenkante und in deren
/// Laufrichtung orientiert.
pub fn sub_linestrings_durch_knoten_projektion(
    referenz: &Polylinie,
    strecke: &StreckeVonKanten,
) -> Vec<Polylinie> {
    strecke
        .kanten()
        .iter()
        .map(|kante| {
            let von = referenz.projiziere(kante.geometrie.start());
            let bis = referenz.projiziere(kante.geometrie.ende());
            let stueck = referenz.teilstueck(von.min(bis), von.max(bis));
            if von > bis {
                stueck.umgekehrt()
            } else {
                stueck
            }
        })
        .collect()
}

fn knotengrad(kanten: &[Kante]) -> HashMap<u64, usize> {
    let mut grad: HashMap<u64, usize> = HashMap::new();
    for kante in kanten {
        // Schleifenkanten zählen an ihrem Knoten doppelt
        *grad.entry(kante.von_knoten).or_default() += 1;
        *grad.entry(kante.nach_knoten).or_default() += 1;
    }
    grad
}

//! Core-Domänentypen: Knoten, Kanten, Attributgruppen, Netz, Spatial-Index.

pub mod attribute;
pub mod geometrie;
pub mod kante;
pub mod knoten;
pub mod linear_referenz;
pub mod netz;
pub mod spatial;

pub use attribute::{
    defragmentiere, fuege_ein, liste_ist_lueckenlos, schneide_auf, sortiere_und_pruefe,
    LinearReferenzierteAttribute,
};
pub use attribute::{
    BelagArt, Bordstein, FahrtrichtungAttributGruppe, FuehrungsformAttributGruppe,
    FuehrungsformAttribute, GeschwindigkeitAttributGruppe, GeschwindigkeitAttribute,
    Hoechstgeschwindigkeit, IstStandard, KantenAttributGruppe, KantenAttribute, KantenStatus,
    KnotenForm, Netzklasse, Ortslage, Radverkehrsfuehrung, Richtung, VerwaltungseinheitId,
    ZustaendigkeitAttributGruppe, ZustaendigkeitAttribute,
};
pub use geometrie::{Bereich, Polygon, Polylinie};
pub use kante::Kante;
pub use knoten::{Knoten, KnotenAttribute, QuellSystem};
pub use linear_referenz::{LinearReferenzierterAbschnitt, Seitenbezug};
pub use netz::Netz;
pub use spatial::{KnotenIndex, KnotenTreffer};

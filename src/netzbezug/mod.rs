//! Netzbezug-Pflege: hält räumliche Referenzen von Fach-Entitäten
//! konsistent, wenn Kanten oder Knoten gelöscht oder ersetzt werden.

pub mod bezug;
pub mod events;
pub mod repository;
pub mod service;

pub use bezug::{AbschnittsweiserKantenSeitenBezug, Netzbezug, PunktuellerKantenBezug};
pub use events::{
    KanteErsetztEvent, KantenGeloeschtEvent, KnotenGeloeschtEvent, NetzAenderungAusloeser,
};
pub use repository::{
    InMemoryNetzbezugRepository, InMemoryProtokoll, MitNetzbezug, NetzbezugRepository, Protokoll,
    ProtokollEintrag,
};
pub use service::{
    BenannterKonsument, NetzbezugAenderungsService, NetzbezugAenderungStatistik,
    NetzbezugKonsument, ERSATZ_TOLERANZ, MAX_PARAMETER,
};

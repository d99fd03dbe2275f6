//! Seed values used when a collection has never been stored.

use crate::models::{
    ActivityKind, Animal, AnimalStatus, Lot, LotStatus, Paddock, PaddockStatus, Property,
    WeightRecord,
};

pub fn property() -> Property {
    Property {
        name: "Fazenda Bela Vista".into(),
        owner: "Carlos Oliveira".into(),
        address: "Rodovia BR-153, Km 45".into(),
        city: "Goiânia".into(),
        state: "GO".into(),
        total_area: 450.0,
        registration_number: "CAR-GO-12345678".into(),
        activity: ActivityKind::Mixed,
        founded_year: "2012".into(),
    }
}

fn weighings(points: &[(&str, f64)]) -> Vec<WeightRecord> {
    points
        .iter()
        .map(|&(date, weight)| WeightRecord {
            date: date.into(),
            weight,
        })
        .collect()
}

pub fn animals() -> Vec<Animal> {
    vec![
        Animal {
            id: "1".into(),
            tag: "BR-1001".into(),
            breed: "Nelore".into(),
            birth_date: "2021-03-15".into(),
            age: "3 anos".into(),
            weight: 450.0,
            weight_history: weighings(&[("2024-01-10", 410.0), ("2024-03-10", 435.0), ("2024-05-10", 450.0)]),
            lot: "Engorda 01".into(),
            paddock: "Piquete A1".into(),
            status: AnimalStatus::Healthy,
            last_update: "2024-05-10T00:00:00+00:00".into(),
        },
        Animal {
            id: "2".into(),
            tag: "BR-1002".into(),
            breed: "Nelore".into(),
            birth_date: "2022-06-20".into(),
            age: "1 anos".into(),
            weight: 380.0,
            weight_history: weighings(&[("2024-01-12", 340.0), ("2024-04-12", 380.0)]),
            lot: "Engorda 01".into(),
            paddock: "Piquete A1".into(),
            status: AnimalStatus::Healthy,
            last_update: "2024-05-12T00:00:00+00:00".into(),
        },
        Animal {
            id: "3".into(),
            tag: "BR-2005".into(),
            breed: "Holandês".into(),
            birth_date: "2020-01-10".into(),
            age: "4 anos".into(),
            weight: 520.0,
            weight_history: weighings(&[("2024-01-14", 510.0), ("2024-05-14", 520.0)]),
            lot: "Leite 01".into(),
            paddock: "Mombaça 02".into(),
            status: AnimalStatus::UnderObservation,
            last_update: "2024-05-14T00:00:00+00:00".into(),
        },
    ]
}

pub fn paddocks() -> Vec<Paddock> {
    vec![
        Paddock {
            id: "1".into(),
            name: "Piquete A1".into(),
            area: "15 ha".into(),
            forage: "Brachiaria".into(),
            status: PaddockStatus::Active,
            rest_start: None,
            rest_end: None,
        },
        Paddock {
            id: "2".into(),
            name: "Mombaça 02".into(),
            area: "10 ha".into(),
            forage: "Mombaça".into(),
            status: PaddockStatus::Resting,
            rest_start: Some("2024-05-01".into()),
            rest_end: Some("2024-06-01".into()),
        },
        Paddock {
            id: "3".into(),
            name: "Reserva Sul".into(),
            area: "50 ha".into(),
            forage: "Nativo".into(),
            status: PaddockStatus::Maintenance,
            rest_start: None,
            rest_end: None,
        },
    ]
}

pub fn lots() -> Vec<Lot> {
    vec![
        Lot {
            id: "1".into(),
            name: "Engorda 01".into(),
            description: "Lote de machos para terminação".into(),
            paddock: "Piquete A1".into(),
            capacity: 60,
            formed_on: "2024-01-15".into(),
            status: LotStatus::Active,
        },
        Lot {
            id: "2".into(),
            name: "Leite 01".into(),
            description: "Vacas em lactação".into(),
            paddock: "Mombaça 02".into(),
            capacity: 30,
            formed_on: "2023-11-20".into(),
            status: LotStatus::Active,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_references_resolve() {
        let lot_names: HashSet<_> = lots().into_iter().map(|l| l.name).collect();
        let paddock_names: HashSet<_> = paddocks().into_iter().map(|p| p.name).collect();

        for animal in animals() {
            assert!(lot_names.contains(&animal.lot), "{} has unknown lot", animal.tag);
            assert!(paddock_names.contains(&animal.paddock));
        }
        for lot in lots() {
            assert!(paddock_names.contains(&lot.paddock));
        }
    }
}

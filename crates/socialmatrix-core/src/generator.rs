//! Random people and networks for demos and quick experiments.

use crate::{
    Gender, GeneratorConfig, NetworkStore, Person, Result, SocialGraph, SocialMatrixError,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

pub const FEMALE_NAMES: [&str; 13] = [
    "Alice", "Diana", "Fiona", "Hannah", "Julia", "Laura", "Nina", "Paula", "Rachel", "Tina",
    "Uma", "Wendy", "Yvonne",
];

pub const MALE_NAMES: [&str; 13] = [
    "Bob", "Charlie", "Ethan", "George", "Ian", "Kevin", "Michael", "Oscar", "Quentin", "Steve",
    "Victor", "Xander", "Zach",
];

pub const NAME_POOL_SIZE: usize = FEMALE_NAMES.len() + MALE_NAMES.len();

#[derive(Debug, Clone, Default)]
pub struct NetworkGenerator {
    config: GeneratorConfig,
}

impl NetworkGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Fresh network of `min_people..=max_people` people with random friendships.
    pub fn random_network<R: Rng + ?Sized>(&self, label: &str, rng: &mut R) -> SocialGraph {
        let max = self.config.max_people.min(NAME_POOL_SIZE);
        let min = self.config.min_people.min(max);
        let count = rng.random_range(min..=max);

        let mut graph = SocialGraph::new(label);
        let mut used: HashSet<&str> = HashSet::new();
        for _ in 0..count {
            let (gender, pool, fallback) = if rng.random_bool(0.5) {
                (Gender::Male, &MALE_NAMES, &FEMALE_NAMES)
            } else {
                (Gender::Female, &FEMALE_NAMES, &MALE_NAMES)
            };
            let (gender, name) = match pick_unused(pool, &used, rng) {
                Some(name) => (gender, name),
                None => match pick_unused(fallback, &used, rng) {
                    Some(name) => (opposite(gender), name),
                    None => break,
                },
            };
            used.insert(name);
            if let Err(e) = graph.add_person(Person::new(name, gender, label)) {
                debug!("skipping generated person {}: {}", name, e);
            }
        }

        let names: Vec<String> = graph.people().iter().map(|p| p.name.clone()).collect();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                if rng.random_bool(self.config.edge_probability) {
                    if let Err(e) = graph.add_friendship(&names[i], &names[j]) {
                        debug!("skipping generated friendship: {}", e);
                    }
                }
            }
        }

        debug!(
            network = label,
            "generated {} people and {} friendships",
            graph.person_count(),
            graph.friendship_count()
        );
        graph
    }

    /// Adds one person whose name is not yet used in `graph`.
    ///
    /// The gender follows the pool the name was drawn from.
    pub fn add_random_person<R: Rng + ?Sized>(
        &self,
        graph: &mut SocialGraph,
        rng: &mut R,
    ) -> Result<Person> {
        let available: Vec<(&str, Gender)> = FEMALE_NAMES
            .iter()
            .map(|n| (*n, Gender::Female))
            .chain(MALE_NAMES.iter().map(|n| (*n, Gender::Male)))
            .filter(|(n, _)| !graph.contains(n))
            .collect();

        let &(name, gender) = available
            .choose(rng)
            .ok_or_else(|| SocialMatrixError::NamePoolExhausted(graph.label().to_string()))?;

        let person = Person::new(name, gender, graph.label());
        graph.add_person(person.clone())?;
        Ok(person)
    }
}

fn pick_unused<'a, R: Rng + ?Sized>(
    pool: &[&'a str],
    used: &HashSet<&str>,
    rng: &mut R,
) -> Option<&'a str> {
    let free: Vec<&'a str> = pool.iter().copied().filter(|n| !used.contains(n)).collect();
    free.choose(rng).copied()
}

fn opposite(gender: Gender) -> Gender {
    match gender {
        Gender::Male => Gender::Female,
        Gender::Female => Gender::Male,
        Gender::Unspecified => Gender::Unspecified,
    }
}

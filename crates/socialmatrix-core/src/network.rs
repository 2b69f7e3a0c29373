use crate::{Friendship, NetworkStore, Person, Result, SocialMatrixError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A labelled social network: people in insertion order plus undirected friendships.
///
/// The editing API keeps every friendship anchored on existing people and rejects
/// self-loops and mirrored duplicates. Graphs deserialized or built through
/// [`SocialGraph::from_parts`] are taken as-is; downstream code filters whatever
/// does not hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialGraph {
    #[serde(default)]
    label: String,
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    friendships: Vec<Friendship>,
}

impl SocialGraph {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            people: Vec::new(),
            friendships: Vec::new(),
        }
    }

    /// Builds a graph without validation.
    pub fn from_parts(
        label: impl Into<String>,
        people: Vec<Person>,
        friendships: Vec<Friendship>,
    ) -> Self {
        Self {
            label: label.into(),
            people,
            friendships,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn friendships(&self) -> &[Friendship] {
        &self.friendships
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn friendship_count(&self) -> usize {
        self.friendships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.people.iter().any(|p| p.name == name)
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.friendships.iter().any(|f| f.connects(a, b))
    }

    pub fn add_friendship(&mut self, a: &str, b: &str) -> Result<()> {
        if a == b {
            return Err(SocialMatrixError::SelfLoop(a.to_string()));
        }
        for name in [a, b] {
            if !self.contains(name) {
                return Err(SocialMatrixError::PersonNotFound(name.to_string()));
            }
        }
        if self.are_friends(a, b) {
            return Err(SocialMatrixError::DuplicateFriendship {
                from: a.to_string(),
                to: b.to_string(),
            });
        }
        self.friendships.push(Friendship::new(a, b));
        debug!(network = %self.label, "added friendship {} - {}", a, b);
        Ok(())
    }

    pub fn remove_friendship(&mut self, a: &str, b: &str) -> Result<Friendship> {
        let pos = self
            .friendships
            .iter()
            .position(|f| f.connects(a, b))
            .ok_or_else(|| SocialMatrixError::FriendshipNotFound {
                from: a.to_string(),
                to: b.to_string(),
            })?;
        Ok(self.friendships.remove(pos))
    }

    /// Friendships whose endpoints both exist, excluding self-loops.
    pub fn valid_friendships(&self) -> impl Iterator<Item = &Friendship> + '_ {
        let names: HashSet<&str> = self.people.iter().map(|p| p.name.as_str()).collect();
        self.friendships.iter().filter(move |f| {
            !f.is_self_loop()
                && names.contains(f.source.as_str())
                && names.contains(f.target.as_str())
        })
    }

    /// Independent copy of this network with every person retagged to `label`.
    pub fn duplicate_as(&self, label: impl Into<String>) -> Self {
        let label = label.into();
        let people = self
            .people
            .iter()
            .map(|p| p.clone().with_network_tag(label.clone()))
            .collect();
        Self {
            label,
            people,
            friendships: self.friendships.clone(),
        }
    }
}

impl NetworkStore for SocialGraph {
    fn add_person(&mut self, mut person: Person) -> Result<()> {
        let trimmed = person.name.trim().to_string();
        if trimmed.is_empty() {
            return Err(SocialMatrixError::EmptyName);
        }
        person.name = trimmed;
        if self.contains(&person.name) {
            return Err(SocialMatrixError::DuplicatePerson(person.name));
        }
        debug!(network = %self.label, "added person {}", person.name);
        self.people.push(person);
        Ok(())
    }

    fn get_person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    fn update_person(&mut self, person: Person) -> Result<()> {
        match self.people.iter_mut().find(|p| p.name == person.name) {
            Some(existing) => {
                *existing = person;
                Ok(())
            }
            None => Err(SocialMatrixError::PersonNotFound(person.name)),
        }
    }

    fn remove_person(&mut self, name: &str) -> Result<Person> {
        let pos = self
            .people
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SocialMatrixError::PersonNotFound(name.to_string()))?;
        let removed = self.people.remove(pos);
        let before = self.friendships.len();
        self.friendships.retain(|f| !f.touches(name));
        debug!(
            network = %self.label,
            "removed person {} and {} friendships",
            name,
            before - self.friendships.len()
        );
        Ok(removed)
    }

    fn find_people_by_prefix(&self, prefix: &str) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|p| p.name.starts_with(prefix))
            .collect()
    }
}

use socialmatrix_core::{Person, SocialGraph};
use std::collections::{BTreeMap, HashMap};

/// Canonical vertex space shared by every matrix in one computation.
///
/// Names are sorted ascending (byte-wise `String` order) so the same inputs
/// always produce the same row/column positions. When a name occurs in
/// several graphs, the person record from the earliest graph wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexIndex {
    people: Vec<Person>,
    positions: HashMap<String, usize>,
}

impl VertexIndex {
    pub fn build(graphs: &[&SocialGraph]) -> Self {
        let mut merged: BTreeMap<&str, &Person> = BTreeMap::new();
        for graph in graphs {
            for person in graph.people() {
                merged.entry(person.name.as_str()).or_insert(person);
            }
        }

        let people: Vec<Person> = merged.into_values().cloned().collect();
        let positions = people
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        Self { people, positions }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn name(&self, i: usize) -> &str {
        &self.people[i].name
    }

    /// Representative person record for slot `i`.
    pub fn person(&self, i: usize) -> &Person {
        &self.people[i]
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.people.iter().map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialmatrix_core::{Gender, Person};

    fn graph(label: &str, names: &[(&str, Gender)]) -> SocialGraph {
        SocialGraph::from_parts(
            label,
            names
                .iter()
                .map(|(n, g)| Person::new(*n, *g, label))
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn names_are_sorted_and_deduplicated() {
        let a = graph("A", &[("Carol", Gender::Female), ("Alice", Gender::Female)]);
        let b = graph("B", &[("Bob", Gender::Male), ("Alice", Gender::Unspecified)]);
        let index = VertexIndex::build(&[&a, &b]);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(index.position("Bob"), Some(1));
        assert_eq!(index.position("bob"), None);
    }

    #[test]
    fn first_graph_wins_on_collision() {
        let a = graph("A", &[("Alice", Gender::Female)]);
        let b = graph("B", &[("Alice", Gender::Unspecified), ("Bob", Gender::Male)]);

        let ab = VertexIndex::build(&[&a, &b]);
        let alice = ab.person(ab.position("Alice").unwrap());
        assert_eq!(alice.network_tag, "A");
        assert_eq!(alice.gender, Gender::Female);

        let ba = VertexIndex::build(&[&b, &a]);
        assert_eq!(ba.person(0).network_tag, "B");
        assert_eq!(ba.person(1).network_tag, "B");
    }

    #[test]
    fn empty_inputs_give_empty_index() {
        assert!(VertexIndex::build(&[]).is_empty());
        let empty = SocialGraph::new("A");
        assert_eq!(VertexIndex::build(&[&empty, &empty]).len(), 0);
    }

    #[test]
    fn ordering_is_bytewise() {
        let a = graph("A", &[("bob", Gender::Male), ("Zed", Gender::Male)]);
        let index = VertexIndex::build(&[&a]);
        assert_eq!(index.name(0), "Zed");
        assert_eq!(index.name(1), "bob");
    }
}

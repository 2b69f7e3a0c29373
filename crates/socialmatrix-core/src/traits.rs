use crate::{Person, Result};

/// Person-level editing operations over a single network.
pub trait NetworkStore {
    fn add_person(&mut self, person: Person) -> Result<()>;
    fn get_person(&self, name: &str) -> Option<&Person>;
    fn update_person(&mut self, person: Person) -> Result<()>;
    /// Removes the person together with every friendship touching them.
    fn remove_person(&mut self, name: &str) -> Result<Person>;
    fn find_people_by_prefix(&self, prefix: &str) -> Vec<&Person>;
}

use crate::Gender;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "network", default)]
    pub network_tag: String,
}

impl Person {
    pub fn new(name: impl Into<String>, gender: Gender, network_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender,
            network_tag: network_tag.into(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_network_tag(mut self, network_tag: impl Into<String>) -> Self {
        self.network_tag = network_tag.into();
        self
    }
}

use std::fmt;

use bulkable_types::ModelName;
use serde::{Deserialize, Serialize};

/// How a relation connects its owner to the target model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// One-to-many where the declaring model is the container.
    OwnsMany,
    /// One-to-one where the declaring model is the container.
    OwnsOne,
    /// Many-to-one pointing at the container.
    OwnedBy,
}

impl RelationKind {
    /// Returns `true` for `OwnsMany` and `OwnsOne`.
    pub fn is_owning(&self) -> bool {
        matches!(self, Self::OwnsMany | Self::OwnsOne)
    }

    /// Returns `true` for `OwnedBy`.
    pub fn is_owned_by(&self) -> bool {
        matches!(self, Self::OwnedBy)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OwnsMany => "owns-many",
            Self::OwnsOne => "owns-one",
            Self::OwnedBy => "owned-by",
        };
        f.write_str(s)
    }
}

/// A relation declared on a model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    /// Relation name; also the record slot holding the targets.
    pub name: String,
    pub kind: RelationKind,
    /// Declared target model.
    pub target: ModelName,
    /// The owned-by relation on the target that points back at the owner.
    ///
    /// Only meaningful on owning relations. When set, inserted targets get
    /// the owner's id written into `<inverse>_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
}

impl RelationDescriptor {
    pub fn new(name: impl Into<String>, kind: RelationKind, target: ModelName) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
            inverse: None,
        }
    }

    /// `has_many`-style relation.
    pub fn owns_many(name: impl Into<String>, target: ModelName) -> Self {
        Self::new(name, RelationKind::OwnsMany, target)
    }

    /// `has_one`-style relation.
    pub fn owns_one(name: impl Into<String>, target: ModelName) -> Self {
        Self::new(name, RelationKind::OwnsOne, target)
    }

    /// `belongs_to`-style relation.
    pub fn owned_by(name: impl Into<String>, target: ModelName) -> Self {
        Self::new(name, RelationKind::OwnedBy, target)
    }

    /// Name the owned-by relation on the target that points back here.
    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }
}

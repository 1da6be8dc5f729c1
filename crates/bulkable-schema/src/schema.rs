use std::collections::{BTreeMap, HashSet};

use bulkable_types::{ModelName, Record};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, Violation};
use crate::relation::{RelationDescriptor, RelationKind};
use crate::traits::{RelationLookup, Validator};

// ---------------------------------------------------------------------------
// ModelDef
// ---------------------------------------------------------------------------

/// Declaration of one model: its validated fields and its relations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDef {
    pub name: ModelName,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

impl ModelDef {
    pub fn new(name: ModelName) -> Self {
        Self {
            name,
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }

    /// Look up a declared relation by name.
    pub fn find_relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// All failed field rules for `record`, in declaration order.
    pub fn violations(&self, record: &Record) -> Vec<Violation> {
        let mut out = Vec::new();
        for field in &self.fields {
            let value = record.field(&field.name);
            for rule in &field.rules {
                if let Some(message) = rule.check(value) {
                    out.push(Violation {
                        field: field.name.clone(),
                        message,
                    });
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SchemaDocument {
    models: Vec<ModelDef>,
}

/// Read-only registry of model declarations.
///
/// The schema is the relation-metadata table and the default validator for
/// bulk insertion. It is checked once on construction: model names and
/// relation names are unique, relation targets are declared, and inverses
/// name an owned-by relation on the target.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    models: BTreeMap<ModelName, ModelDef>,
}

impl Schema {
    /// Build a schema from model declarations.
    pub fn new(models: impl IntoIterator<Item = ModelDef>) -> SchemaResult<Self> {
        let mut map = BTreeMap::new();
        for model in models {
            let mut names = HashSet::new();
            for rel in &model.relations {
                if !names.insert(rel.name.as_str()) {
                    return Err(SchemaError::DuplicateRelation {
                        model: model.name.clone(),
                        relation: rel.name.clone(),
                    });
                }
            }
            if map.contains_key(&model.name) {
                return Err(SchemaError::DuplicateModel(model.name));
            }
            map.insert(model.name.clone(), model);
        }

        let schema = Self { models: map };
        schema.check_relations()?;
        debug!(models = schema.models.len(), "schema loaded");
        Ok(schema)
    }

    /// Load a schema from a JSON document of the form
    /// `{"models": [{"name": ..., "fields": [...], "relations": [...]}]}`.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let doc: SchemaDocument = serde_json::from_str(json)?;
        Self::new(doc.models)
    }

    fn check_relations(&self) -> SchemaResult<()> {
        for model in self.models.values() {
            for rel in &model.relations {
                let Some(target) = self.models.get(&rel.target) else {
                    return Err(SchemaError::UnknownTarget {
                        model: model.name.clone(),
                        relation: rel.name.clone(),
                        target: rel.target.clone(),
                    });
                };
                if let Some(inverse) = &rel.inverse {
                    let points_back = target.find_relation(inverse).is_some_and(|back| {
                        back.kind == RelationKind::OwnedBy && back.target == model.name
                    });
                    if !rel.kind.is_owning() || !points_back {
                        return Err(SchemaError::InvalidInverse {
                            model: model.name.clone(),
                            relation: rel.name.clone(),
                            target: rel.target.clone(),
                            inverse: inverse.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn model(&self, name: &ModelName) -> Option<&ModelDef> {
        self.models.get(name)
    }

    pub fn contains(&self, name: &ModelName) -> bool {
        self.models.contains_key(name)
    }

    /// Declared model names, sorted.
    pub fn model_names(&self) -> impl Iterator<Item = &ModelName> {
        self.models.keys()
    }

    /// Failed field rules for `record` according to its model's declaration.
    /// Records of undeclared models have no rules.
    pub fn violations(&self, record: &Record) -> Vec<Violation> {
        self.models
            .get(record.model())
            .map(|def| def.violations(record))
            .unwrap_or_default()
    }
}

impl RelationLookup for Schema {
    fn relations_of(&self, model: &ModelName) -> &[RelationDescriptor] {
        self.models
            .get(model)
            .map(|def| def.relations.as_slice())
            .unwrap_or_default()
    }
}

impl Validator for Schema {
    fn is_valid(&self, record: &Record) -> bool {
        self.violations(record).is_empty()
    }
}

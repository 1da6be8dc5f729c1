use std::collections::HashMap;

use bulkable_types::ModelName;

/// Items grouped by model, in order of first appearance.
///
/// Each group keeps its items in push order, so concatenating the targets of
/// several records preserves per-record emission order.
pub(crate) struct TypeGroups<T> {
    groups: Vec<(ModelName, Vec<T>)>,
    index: HashMap<ModelName, usize>,
}

impl<T> TypeGroups<T> {
    pub(crate) fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(crate) fn push(&mut self, model: &ModelName, item: T) {
        let slot = match self.index.get(model) {
            Some(&slot) => slot,
            None => {
                self.index.insert(model.clone(), self.groups.len());
                self.groups.push((model.clone(), Vec::new()));
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(item);
    }

    pub(crate) fn into_groups(self) -> Vec<(ModelName, Vec<T>)> {
        self.groups
    }
}
